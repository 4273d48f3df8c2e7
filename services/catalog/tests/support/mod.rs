//! 测试辅助：内存仓储与测试应用

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use catalog::api::{AppState, product_routes};
use catalog::application::ServiceHandler;
use catalog::domain::entities::Product;
use catalog::domain::repositories::ProductRepository;
use catalog::domain::value_objects::ProductId;
use catalog_errors::{AppError, AppResult};

/// 内存产品仓储，模拟数据库的唯一约束和未命中语义
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: Mutex<Vec<Product>>,
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: &ProductId) -> AppResult<Option<Product>> {
        let products = self.products.lock().unwrap();
        Ok(products.iter().find(|p| p.id() == id).cloned())
    }

    async fn list_all(&self) -> AppResult<Vec<Product>> {
        let mut products = self.products.lock().unwrap().clone();
        products.sort_by(|a, b| a.id().0.cmp(&b.id().0));
        Ok(products)
    }

    async fn save(&self, product: &Product) -> AppResult<()> {
        let mut products = self.products.lock().unwrap();
        if products.iter().any(|p| p.name() == product.name()) {
            return Err(AppError::conflict(
                "Duplicate entry violates unique constraint",
            ));
        }
        products.push(product.clone());
        Ok(())
    }

    async fn update(&self, product: &Product) -> AppResult<()> {
        let mut products = self.products.lock().unwrap();
        if products
            .iter()
            .any(|p| p.id() != product.id() && p.name() == product.name())
        {
            return Err(AppError::conflict(
                "Duplicate entry violates unique constraint",
            ));
        }

        match products.iter_mut().find(|p| p.id() == product.id()) {
            Some(slot) => {
                *slot = product.clone();
                Ok(())
            }
            None => Err(AppError::not_found("Product not found")),
        }
    }

    async fn delete(&self, id: &ProductId) -> AppResult<()> {
        let mut products = self.products.lock().unwrap();
        let before = products.len();
        products.retain(|p| p.id() != id);

        if products.len() == before {
            return Err(AppError::not_found("Product not found"));
        }
        Ok(())
    }

    async fn exists_by_name(&self, name: &str) -> AppResult<bool> {
        let products = self.products.lock().unwrap();
        Ok(products.iter().any(|p| p.name().as_str() == name))
    }

    async fn exists_by_name_excluding(&self, name: &str, id: &ProductId) -> AppResult<bool> {
        let products = self.products.lock().unwrap();
        Ok(products
            .iter()
            .any(|p| p.name().as_str() == name && p.id() != id))
    }
}

/// 测试辅助：构建挂上内存仓储的应用
pub fn test_app() -> Router {
    let repo = Arc::new(InMemoryProductRepository::default());
    let handler = Arc::new(ServiceHandler::new(repo));
    product_routes(AppState { handler })
}
