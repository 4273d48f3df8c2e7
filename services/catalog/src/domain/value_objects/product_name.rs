//! 产品名称值对象

use serde::{Deserialize, Serialize};
use std::fmt;

/// 产品名称值对象
///
/// 名称不能为空，最长 255 个字符，且在全部产品中唯一。
/// 唯一性属于仓储层的约束，这里只校验本地规则。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductName(pub String);

impl ProductName {
    /// 创建新的产品名称
    pub fn new(name: impl Into<String>) -> Result<Self, ProductNameError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    /// 验证名称格式
    fn validate(name: &str) -> Result<(), ProductNameError> {
        if name.trim().is_empty() {
            return Err(ProductNameError::Empty);
        }

        if name.chars().count() > 255 {
            return Err(ProductNameError::TooLong);
        }

        Ok(())
    }

    /// 获取字符串引用
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 产品名称错误
#[derive(Debug, thiserror::Error)]
pub enum ProductNameError {
    #[error("Product name must not be empty")]
    Empty,

    #[error("Product name is too long (maximum 255 characters)")]
    TooLong,
}
