//! 遗忘映射错误处理
//!
//! 只有配置错误一类：容量非法或配置文本无法解析。
//! 查找不到键不是错误，通过 `Option::None` 返回。

use thiserror::Error;

/// 配置相关错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid capacity: max_associations must be at least 1, got {0}")]
    InvalidCapacity(usize),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Unified error type for the forgetting map
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ForgetMapError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
}

impl From<toml::de::Error> for ForgetMapError {
    fn from(err: toml::de::Error) -> Self {
        ForgetMapError::Configuration(ConfigError::Parse(err.to_string()))
    }
}

/// 遗忘映射操作结果
pub type ForgetMapResult<T> = Result<T, ForgetMapError>;
