//! Product queries

use crate::domain::value_objects::ProductId;

/// 获取产品查询
#[derive(Debug, Clone)]
pub struct GetProductQuery {
    pub id: ProductId,
}
