//! Product commands

use catalog_errors::ValidationErrors;
use rust_decimal::Decimal;

use crate::domain::value_objects::ProductId;

/// 创建产品命令
#[derive(Debug, Clone)]
pub struct CreateProductCommand {
    pub name: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
}

impl CreateProductCommand {
    /// 校验所有字段，收集每个字段的全部错误，不短路
    pub fn field_errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        // name: 必填，最长 255 字符
        if self.name.trim().is_empty() {
            errors.add("name", "The name field is required.");
        } else if self.name.chars().count() > 255 {
            errors.add("name", "The name must not be greater than 255 characters.");
        }

        // description: 可空，最长 500 字符
        if let Some(description) = &self.description {
            if description.chars().count() > 500 {
                errors.add(
                    "description",
                    "The description must not be greater than 500 characters.",
                );
            }
        }

        // price: 必填，不能为负数
        match self.price {
            None => errors.add("price", "The price field is required."),
            Some(price) if price < Decimal::ZERO => {
                errors.add("price", "The price must be at least 0.");
            }
            Some(_) => {}
        }

        errors
    }
}

/// 更新产品命令
///
/// 外层 Option 表示字段是否出现在请求里，内层 Option 表示显式传入 null。
/// 缺失的字段保持原值不变。
#[derive(Debug, Clone)]
pub struct UpdateProductCommand {
    pub id: ProductId,
    pub name: Option<Option<String>>,
    pub description: Option<Option<String>>,
    pub price: Option<Option<Decimal>>,
}

impl UpdateProductCommand {
    /// 校验出现的字段，规则与创建一致
    pub fn field_errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        if let Some(name) = &self.name {
            match name {
                None => errors.add("name", "The name field is required."),
                Some(name) if name.trim().is_empty() => {
                    errors.add("name", "The name field is required.");
                }
                Some(name) if name.chars().count() > 255 => {
                    errors.add("name", "The name must not be greater than 255 characters.");
                }
                Some(_) => {}
            }
        }

        // description 传 null 表示清空，不算错误
        if let Some(Some(description)) = &self.description {
            if description.chars().count() > 500 {
                errors.add(
                    "description",
                    "The description must not be greater than 500 characters.",
                );
            }
        }

        if let Some(price) = &self.price {
            match price {
                None => errors.add("price", "The price field is required."),
                Some(price) if *price < Decimal::ZERO => {
                    errors.add("price", "The price must be at least 0.");
                }
                Some(_) => {}
            }
        }

        errors
    }

    /// 是否携带任何待更新字段
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.price.is_none()
    }
}

/// 删除产品命令
#[derive(Debug, Clone)]
pub struct DeleteProductCommand {
    pub id: ProductId,
}
