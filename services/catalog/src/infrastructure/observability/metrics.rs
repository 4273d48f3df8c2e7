//! Catalog Metrics
//!
//! 业务指标记录

use metrics::counter;

/// 记录产品创建
pub fn record_product_created() {
    counter!("catalog_products_created_total").increment(1);
}

/// 记录产品更新
pub fn record_product_updated() {
    counter!("catalog_products_updated_total").increment(1);
}

/// 记录产品删除
pub fn record_product_deleted() {
    counter!("catalog_products_deleted_total").increment(1);
}
