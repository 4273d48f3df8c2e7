//! 产品路由

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use catalog_errors::{AppError, AppResult};

use crate::application::ServiceHandler;
use crate::application::commands::DeleteProductCommand;
use crate::application::queries::GetProductQuery;
use crate::domain::value_objects::ProductId;
use crate::infrastructure::observability;

use super::dto::{CreateProductRequest, ProductEnvelope, ProductResponse, UpdateProductRequest};

/// 路由共享状态
#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<ServiceHandler>,
}

pub fn product_routes(state: AppState) -> Router {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product)
                .put(update_product)
                .patch(update_product)
                .delete(delete_product),
        )
        .with_state(state)
}

/// 无法解析的 ID 一律视为资源不存在
fn parse_product_id(id: &str) -> AppResult<ProductId> {
    ProductId::from_string(id).map_err(|_| AppError::not_found("Product not found"))
}

async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<ProductResponse>>> {
    let products = state.handler.list_products().await?;
    Ok(Json(products.iter().map(ProductResponse::from).collect()))
}

async fn create_product(
    State(state): State<AppState>,
    Json(req): Json<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ProductEnvelope>)> {
    let product = state.handler.create_product(req.into_command()).await?;
    observability::record_product_created();

    Ok((
        StatusCode::CREATED,
        Json(ProductEnvelope {
            message: "Product created successfully".to_string(),
            data: ProductResponse::from(&product),
        }),
    ))
}

async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ProductResponse>> {
    let id = parse_product_id(&id)?;
    let product = state.handler.get_product(GetProductQuery { id }).await?;
    Ok(Json(ProductResponse::from(&product)))
}

async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateProductRequest>,
) -> AppResult<Json<ProductEnvelope>> {
    let id = parse_product_id(&id)?;
    let product = state.handler.update_product(req.into_command(id)).await?;
    observability::record_product_updated();

    Ok(Json(ProductEnvelope {
        message: "Product updated successfully".to_string(),
        data: ProductResponse::from(&product),
    }))
}

async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_product_id(&id)?;
    state
        .handler
        .delete_product(DeleteProductCommand { id })
        .await?;
    observability::record_product_deleted();

    Ok(StatusCode::NO_CONTENT)
}
