//! HTTP request/response DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::application::commands::{CreateProductCommand, UpdateProductCommand};
use crate::domain::entities::Product;
use crate::domain::value_objects::ProductId;

/// 创建产品请求
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
}

impl CreateProductRequest {
    /// 转换为命令，文本字段先归一化：去掉首尾空白，空串视为缺失
    pub fn into_command(self) -> CreateProductCommand {
        CreateProductCommand {
            name: self.name.map(|s| s.trim().to_string()).unwrap_or_default(),
            description: normalize_optional_text(self.description),
            price: self.price,
        }
    }
}

/// 更新产品请求
///
/// 外层 Option 区分字段缺失与显式 null，缺失的字段不参与更新
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(default, deserialize_with = "double_option")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub price: Option<Option<Decimal>>,
}

impl UpdateProductRequest {
    pub fn into_command(self, id: ProductId) -> UpdateProductCommand {
        UpdateProductCommand {
            id,
            name: self.name.map(normalize_optional_text),
            description: self.description.map(normalize_optional_text),
            price: self.price,
        }
    }
}

/// 保留「字段出现过」的信息：缺失时走 `default` 得到 None，
/// 出现时（包括值为 null）再包一层 Some
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// 文本字段归一化：去掉首尾空白，空串视为 None
fn normalize_optional_text(text: Option<String>) -> Option<String> {
    text.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// 产品响应
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Product> for ProductResponse {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id().0,
            name: product.name().as_str().to_string(),
            description: product.description().map(String::from),
            price: product.price(),
            created_at: product.created_at(),
            updated_at: product.updated_at(),
        }
    }
}

/// 带提示消息的产品响应信封
#[derive(Debug, Serialize)]
pub struct ProductEnvelope {
    pub message: String,
    pub data: ProductResponse,
}
