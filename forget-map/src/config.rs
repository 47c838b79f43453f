// 遗忘映射配置管理（Configuration Management）
//
// 提供遗忘映射的构造配置：
// - 最大关联数（容量）
// - 是否通过 log 门面输出缓存事件
// - TOML 文本解析与校验

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ForgetMapResult};

/// 默认最大关联数
pub const DEFAULT_MAX_ASSOCIATIONS: usize = 1024;

/// 遗忘映射配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForgetMapConfig {
    /// 最大关联数，必须 >= 1
    pub max_associations: usize,
    /// 是否记录缓存事件（覆盖、未命中、淘汰）
    pub log_events: bool,
}

impl Default for ForgetMapConfig {
    fn default() -> Self {
        Self {
            max_associations: DEFAULT_MAX_ASSOCIATIONS,
            log_events: true,
        }
    }
}

impl ForgetMapConfig {
    /// 创建指定容量的配置
    pub fn new(max_associations: usize) -> Self {
        Self {
            max_associations,
            ..Self::default()
        }
    }

    /// 设置是否记录缓存事件
    pub fn with_log_events(mut self, log_events: bool) -> Self {
        self.log_events = log_events;
        self
    }

    /// 验证配置
    ///
    /// 容量小于1时返回 `ConfigError::InvalidCapacity`，不会静默修正。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_associations < 1 {
            return Err(ConfigError::InvalidCapacity(self.max_associations));
        }
        Ok(())
    }

    /// 从TOML文本解析配置
    ///
    /// 缺失的字段使用默认值；解析后立即校验。
    ///
    /// # 示例
    /// ```
    /// use forget_map::ForgetMapConfig;
    ///
    /// let config = ForgetMapConfig::from_toml_str("max_associations = 8").unwrap();
    /// assert_eq!(config.max_associations, 8);
    /// assert!(config.log_events);
    /// ```
    pub fn from_toml_str(content: &str) -> ForgetMapResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// 序列化为TOML文本
    pub fn to_toml_string(&self) -> ForgetMapResult<String> {
        toml::to_string(self).map_err(|e| ConfigError::Parse(e.to_string()).into())
    }
}
