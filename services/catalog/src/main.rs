//! Catalog Service - Product CRUD API

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use catalog::api::{self, AppState, product_routes};
use catalog::application::ServiceHandler;
use catalog::infrastructure::PostgresProductRepository;
use catalog::infrastructure::persistence::{check_connection, create_pool};
use catalog_config::AppConfig;
use catalog_telemetry::{init_metrics, init_tracing, init_tracing_json};
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // 1. 加载配置
    let config = AppConfig::load("config")?;

    // 2. 初始化运行时
    if config.is_production() {
        init_tracing_json(&config.telemetry.log_level);
    } else {
        init_tracing(&config.telemetry.log_level);
    }

    info!(
        app_name = %config.app_name,
        app_env = %config.app_env,
        "Runtime initialized"
    );

    // 3. 初始化 Metrics 记录器
    let metrics_handle = init_metrics();

    // 4. 创建数据库连接池
    let pool = create_pool(&config.database).await?;
    check_connection(&pool).await?;
    info!("Database connection established");

    // 5. 组装仓储与业务处理器
    let product_repo = Arc::new(PostgresProductRepository::new(pool.clone()));
    let handler = Arc::new(ServiceHandler::new(product_repo));
    let state = AppState { handler };

    // 6. 启动运维端点
    let ops_port = config.server.ops_port();
    let ops_handle = tokio::spawn({
        let pool = pool.clone();
        let metrics_handle = metrics_handle.clone();
        async move {
            if let Err(e) = api::ops::serve(pool, metrics_handle, ops_port).await {
                error!("Ops server error: {}", e);
            }
        }
    });

    // 7. 构建路由
    let app = product_routes(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(RequestBodyLimitLayer::new(1024 * 1024));

    // 8. 启动服务器
    let addr: SocketAddr = config.server.bind_addr().parse()?;
    info!(%addr, "HTTP server starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // 9. 清理
    ops_handle.abort();

    info!("Service stopped");

    Ok(())
}

/// 等待关闭信号
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
