//! Business logic handler

use std::sync::Arc;

use catalog_errors::{AppError, AppResult, ValidationErrors};
use tracing::{info, warn};

use crate::domain::entities::Product;
use crate::domain::repositories::ProductRepository;
use crate::domain::value_objects::ProductName;

use super::commands::*;
use super::queries::*;

pub struct ServiceHandler {
    product_repo: Arc<dyn ProductRepository>,
}

impl ServiceHandler {
    pub fn new(product_repo: Arc<dyn ProductRepository>) -> Self {
        Self { product_repo }
    }

    // ========== 产品 CRUD ==========

    /// 创建产品
    pub async fn create_product(&self, cmd: CreateProductCommand) -> AppResult<Product> {
        info!("Creating product: {}", cmd.name);

        // 1. 校验命令，收集所有字段错误
        let mut errors = cmd.field_errors();

        // 2. 名称本身合法时才检查唯一性
        if errors.field("name").is_none() && self.product_repo.exists_by_name(&cmd.name).await? {
            errors.add("name", "The name has already been taken.");
        }

        errors.into_result()?;

        // 3. 创建产品实体
        let name = ProductName::new(cmd.name.clone()).map_err(|e| {
            AppError::validation(ValidationErrors::single("name", e.to_string()))
        })?;
        let price = cmd.price.ok_or_else(|| {
            AppError::validation(ValidationErrors::single("price", "The price field is required."))
        })?;
        let product = Product::new(name, cmd.description.clone(), price);

        // 4. 保存到数据库
        self.product_repo.save(&product).await?;

        info!("Product created successfully: {}", product.id().0);
        Ok(product)
    }

    /// 获取产品
    pub async fn get_product(&self, query: GetProductQuery) -> AppResult<Product> {
        info!("Getting product: {}", query.id.0);

        let product = self
            .product_repo
            .find_by_id(&query.id)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found"))?;

        Ok(product)
    }

    /// 列表查询
    pub async fn list_products(&self) -> AppResult<Vec<Product>> {
        info!("Listing products");

        let products = self.product_repo.list_all().await?;

        info!("Found {} products", products.len());
        Ok(products)
    }

    /// 更新产品
    pub async fn update_product(&self, cmd: UpdateProductCommand) -> AppResult<Product> {
        info!("Updating product: {}", cmd.id.0);

        // 1. 获取现有产品，不存在直接报 404
        let mut product = self
            .product_repo
            .find_by_id(&cmd.id)
            .await?
            .ok_or_else(|| AppError::not_found("Product not found"))?;

        // 没有携带任何字段时直接返回现有产品
        if cmd.is_empty() {
            return Ok(product);
        }

        // 2. 校验命令，收集所有字段错误
        let mut errors = cmd.field_errors();

        // 3. 名称变更时检查唯一性，排除自身
        if let Some(Some(name)) = &cmd.name {
            if errors.field("name").is_none()
                && self
                    .product_repo
                    .exists_by_name_excluding(name, &cmd.id)
                    .await?
            {
                errors.add("name", "The name has already been taken.");
            }
        }

        errors.into_result()?;

        // 4. 只更新出现的字段
        if let Some(Some(name)) = cmd.name {
            let name = ProductName::new(name).map_err(|e| {
                AppError::validation(ValidationErrors::single("name", e.to_string()))
            })?;
            product.rename(name);
        }
        if let Some(description) = cmd.description {
            product.set_description(description);
        }
        if let Some(Some(price)) = cmd.price {
            product.change_price(price);
        }

        // 5. 保存更新
        self.product_repo.update(&product).await?;

        info!("Product updated successfully: {}", cmd.id.0);
        Ok(product)
    }

    /// 删除产品
    pub async fn delete_product(&self, cmd: DeleteProductCommand) -> AppResult<()> {
        info!("Deleting product: {}", cmd.id.0);

        // 1. 检查产品是否存在
        let product = self.product_repo.find_by_id(&cmd.id).await?;

        if product.is_none() {
            warn!("Product not found: {}", cmd.id.0);
            return Err(AppError::not_found("Product not found"));
        }

        // 2. 执行删除
        self.product_repo.delete(&cmd.id).await?;

        info!("Product deleted successfully: {}", cmd.id.0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockProductRepository;
    use crate::domain::value_objects::ProductId;
    use rust_decimal::Decimal;

    fn product(name: &str, description: Option<&str>, price: Decimal) -> Product {
        Product::new(
            ProductName::new(name).unwrap(),
            description.map(String::from),
            price,
        )
    }

    fn create_cmd(name: &str) -> CreateProductCommand {
        CreateProductCommand {
            name: name.to_string(),
            description: None,
            price: Some(Decimal::new(1000, 2)),
        }
    }

    #[tokio::test]
    async fn test_create_product_persists_and_returns_entity() {
        let mut repo = MockProductRepository::new();
        repo.expect_exists_by_name()
            .withf(|name| name == "Keyboard")
            .returning(|_| Ok(false));
        repo.expect_save().times(1).returning(|_| Ok(()));

        let handler = ServiceHandler::new(Arc::new(repo));
        let created = handler.create_product(create_cmd("Keyboard")).await.unwrap();

        assert_eq!(created.name().as_str(), "Keyboard");
        assert_eq!(created.price(), Decimal::new(1000, 2));
        assert_eq!(created.created_at(), created.updated_at());
    }

    #[tokio::test]
    async fn test_create_product_rejects_taken_name() {
        let mut repo = MockProductRepository::new();
        repo.expect_exists_by_name().returning(|_| Ok(true));
        repo.expect_save().never();

        let handler = ServiceHandler::new(Arc::new(repo));
        let err = handler.create_product(create_cmd("Keyboard")).await.unwrap_err();

        match err {
            AppError::Validation(errors) => {
                assert_eq!(
                    errors.field("name"),
                    Some(&["The name has already been taken.".to_string()][..])
                );
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_product_surfaces_conflict_from_storage_race() {
        // 预检查通过后另一请求抢先插入同名产品，唯一约束在保存时兜底
        let mut repo = MockProductRepository::new();
        repo.expect_exists_by_name().returning(|_| Ok(false));
        repo.expect_save()
            .returning(|_| Err(AppError::conflict("Duplicate entry violates unique constraint")));

        let handler = ServiceHandler::new(Arc::new(repo));
        let err = handler.create_product(create_cmd("Keyboard")).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(err.status_code(), 409);
    }

    #[tokio::test]
    async fn test_create_product_skips_uniqueness_check_for_invalid_name() {
        let mut repo = MockProductRepository::new();
        repo.expect_exists_by_name().never();
        repo.expect_save().never();

        let handler = ServiceHandler::new(Arc::new(repo));
        let cmd = CreateProductCommand {
            name: String::new(),
            description: None,
            price: None,
        };
        let err = handler.create_product(cmd).await.unwrap_err();

        match err {
            AppError::Validation(errors) => {
                // 两个字段的错误都要收集到
                assert!(errors.field("name").is_some());
                assert!(errors.field("price").is_some());
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_product_missing_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let handler = ServiceHandler::new(Arc::new(repo));
        let err = handler
            .get_product(GetProductQuery { id: ProductId::new() })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_product_missing_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_update().never();

        let handler = ServiceHandler::new(Arc::new(repo));
        let cmd = UpdateProductCommand {
            id: ProductId::new(),
            name: Some(Some("New name".to_string())),
            description: None,
            price: None,
        };
        let err = handler.update_product(cmd).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_product_keeps_unsupplied_fields() {
        let existing = product("Keyboard", Some("Mechanical"), Decimal::new(4999, 2));
        let id = existing.id().clone();

        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_exists_by_name_excluding().returning(|_, _| Ok(false));
        repo.expect_update()
            .withf(|p| p.description() == Some("Mechanical") && p.price() == Decimal::new(4999, 2))
            .times(1)
            .returning(|_| Ok(()));

        let handler = ServiceHandler::new(Arc::new(repo));
        let cmd = UpdateProductCommand {
            id,
            name: Some(Some("Gaming keyboard".to_string())),
            description: None,
            price: None,
        };
        let updated = handler.update_product(cmd).await.unwrap();

        assert_eq!(updated.name().as_str(), "Gaming keyboard");
        assert_eq!(updated.description(), Some("Mechanical"));
    }

    #[tokio::test]
    async fn test_update_product_rejects_name_taken_by_other() {
        let existing = product("Keyboard", None, Decimal::new(4999, 2));
        let id = existing.id().clone();

        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_exists_by_name_excluding().returning(|_, _| Ok(true));
        repo.expect_update().never();

        let handler = ServiceHandler::new(Arc::new(repo));
        let cmd = UpdateProductCommand {
            id,
            name: Some(Some("Mouse".to_string())),
            description: None,
            price: None,
        };
        let err = handler.update_product(cmd).await.unwrap_err();

        match err {
            AppError::Validation(errors) => {
                assert_eq!(
                    errors.field("name"),
                    Some(&["The name has already been taken.".to_string()][..])
                );
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_product_with_no_fields_returns_unchanged() {
        let existing = product("Keyboard", Some("Mechanical"), Decimal::new(4999, 2));
        let id = existing.id().clone();
        let before = existing.updated_at();

        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_update().never();

        let handler = ServiceHandler::new(Arc::new(repo));
        let cmd = UpdateProductCommand {
            id,
            name: None,
            description: None,
            price: None,
        };
        let updated = handler.update_product(cmd).await.unwrap();

        assert_eq!(updated.updated_at(), before);
    }

    #[tokio::test]
    async fn test_delete_product_missing_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        repo.expect_delete().never();

        let handler = ServiceHandler::new(Arc::new(repo));
        let err = handler
            .delete_product(DeleteProductCommand { id: ProductId::new() })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_product_removes_existing() {
        let existing = product("Keyboard", None, Decimal::new(4999, 2));
        let id = existing.id().clone();

        let mut repo = MockProductRepository::new();
        repo.expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        repo.expect_delete().times(1).returning(|_| Ok(()));

        let handler = ServiceHandler::new(Arc::new(repo));
        handler.delete_product(DeleteProductCommand { id }).await.unwrap();
    }
}
