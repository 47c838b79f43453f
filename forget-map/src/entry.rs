//! 缓存条目
//!
//! 每个条目保存值、使用计数、创建时间和插入序号。
//! 除使用计数外，条目构造后不可变；覆盖写入时整体替换为新条目。

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// 缓存条目（带元数据）
#[derive(Debug)]
pub struct CacheEntry<V> {
    /// 缓存值
    value: Arc<V>,
    /// 使用计数（成功查找次数）
    usage: AtomicU64,
    /// 创建时间戳
    created_at: Instant,
    /// 插入序号，同一时刻创建的条目按此排序
    sequence: u64,
}

impl<V> CacheEntry<V> {
    pub(crate) fn new(value: V, sequence: u64) -> Self {
        Self {
            value: Arc::new(value),
            usage: AtomicU64::new(0),
            created_at: Instant::now(),
            sequence,
        }
    }

    /// 记录一次使用，返回递增后的计数
    #[inline]
    pub(crate) fn record_use(&self) -> u64 {
        self.usage.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// 获取存储内容的共享引用
    #[inline]
    pub fn content(&self) -> Arc<V> {
        Arc::clone(&self.value)
    }

    /// 当前使用计数
    #[inline]
    pub fn usage(&self) -> u64 {
        self.usage.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    #[inline]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}
