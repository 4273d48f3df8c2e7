//! 产品聚合根

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{ProductId, ProductName};

/// 产品聚合根
///
/// 商品目录的核心实体。价格非负、名称唯一等规则在应用层校验，
/// 实体本身只负责持有状态并维护更新时间戳。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// 产品 ID
    id: ProductId,
    /// 产品名称（全局唯一）
    name: ProductName,
    /// 产品描述，可为空
    description: Option<String>,
    /// 单价，非负
    price: Decimal,
    /// 创建时间
    created_at: DateTime<Utc>,
    /// 最后更新时间
    updated_at: DateTime<Utc>,
}

impl Product {
    /// 创建新产品
    pub fn new(name: ProductName, description: Option<String>, price: Decimal) -> Self {
        let now = Utc::now();
        Self {
            id: ProductId::new(),
            name,
            description,
            price,
            created_at: now,
            updated_at: now,
        }
    }

    /// 从各部分构建产品（用于从数据库加载）
    pub fn from_parts(
        id: ProductId,
        name: ProductName,
        description: Option<String>,
        price: Decimal,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            description,
            price,
            created_at,
            updated_at,
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &ProductName {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // ========== 更新方法 ==========

    /// 重命名产品
    pub fn rename(&mut self, name: ProductName) {
        self.name = name;
        self.touch();
    }

    /// 更新描述，传入 None 表示清空
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
        self.touch();
    }

    /// 调整价格
    pub fn change_price(&mut self, price: Decimal) {
        self.price = price;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
