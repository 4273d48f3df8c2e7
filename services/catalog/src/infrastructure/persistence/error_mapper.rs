//! 数据库错误映射工具
//!
//! 提供统一的 SQLx 错误到 AppError 的转换

use catalog_errors::AppError;

/// 将 SQLx 错误转换为 AppError，区分不同错误类型
///
/// 唯一约束冲突映射为 Conflict，用于兜住并发创建同名产品时
/// 应用层预检查漏掉的竞态。其余约束违规说明应用层校验有缺口，
/// 一律按基础设施错误处理。
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::RowNotFound => AppError::not_found("Record not found"),
        sqlx::Error::Database(db_err) => {
            if let Some(code) = db_err.code() {
                match code.as_ref() {
                    // PostgreSQL 约束违规代码
                    "23505" => AppError::conflict("Duplicate entry violates unique constraint"),
                    "23514" => AppError::database("Check constraint violation"),
                    "23502" => AppError::database("Not null constraint violation"),
                    "22001" => AppError::database("String data too long"),
                    "22P02" => AppError::database("Invalid input syntax"),
                    _ => AppError::database(format!("Database error ({}): {}", code, db_err)),
                }
            } else {
                AppError::database(db_err.to_string())
            }
        }
        sqlx::Error::PoolTimedOut => AppError::internal("Database connection pool timeout"),
        sqlx::Error::PoolClosed => AppError::internal("Database connection pool is closed"),
        sqlx::Error::Protocol(msg) => {
            AppError::internal(format!("Database protocol error: {}", msg))
        }
        _ => AppError::database(e.to_string()),
    }
}
