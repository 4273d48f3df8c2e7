//! 产品仓储接口

use async_trait::async_trait;
use catalog_errors::AppResult;

use crate::domain::entities::Product;
use crate::domain::value_objects::ProductId;

/// 产品仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    // ========== CRUD ==========

    /// 根据 ID 查找产品
    async fn find_by_id(&self, id: &ProductId) -> AppResult<Option<Product>>;

    /// 列出全部产品，按 ID 升序
    async fn list_all(&self) -> AppResult<Vec<Product>>;

    /// 保存产品（新建）
    async fn save(&self, product: &Product) -> AppResult<()>;

    /// 更新产品
    async fn update(&self, product: &Product) -> AppResult<()>;

    /// 删除产品
    async fn delete(&self, id: &ProductId) -> AppResult<()>;

    // ========== 唯一性检查 ==========

    /// 检查名称是否已被占用
    async fn exists_by_name(&self, name: &str) -> AppResult<bool>;

    /// 检查名称是否被其他产品占用（更新时排除自身）
    async fn exists_by_name_excluding(&self, name: &str, id: &ProductId) -> AppResult<bool>;
}
