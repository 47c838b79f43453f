//! 遗忘映射（Forgetting Map）
//!
//! 有界、线程安全的键值缓存：容量满时按使用频率而不是最近访问时间淘汰，
//! 使用次数相同时淘汰最早插入的条目。

pub mod config;
mod entry;
pub mod error;
pub mod eviction;
pub mod forget_map;
pub mod observer;
pub mod stats;

// 重新导出主要类型
pub use config::ForgetMapConfig;
pub use error::{ConfigError, ForgetMapError, ForgetMapResult};
pub use forget_map::ForgetMap;
pub use observer::{CacheEvent, CacheObserver, LogObserver, NoopObserver};
pub use stats::CacheStats;
