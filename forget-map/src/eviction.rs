//! 淘汰选择
//!
//! 两阶段选择：
//! 1. 找出最小使用计数，收集所有等于该计数的候选条目
//! 2. 候选多于一个时选择创建时间最早的条目；创建时间相同则选择插入序号最小的
//!
//! 插入序号在插入锁内分配，因此最终顺序是确定的。

use std::time::Instant;

use crate::entry::CacheEntry;

/// 淘汰候选（条目元数据快照）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvictionCandidate<K> {
    pub key: K,
    pub usage: u64,
    pub created_at: Instant,
    pub sequence: u64,
}

impl<K> EvictionCandidate<K> {
    /// 从条目创建快照
    pub(crate) fn snapshot<V>(key: K, entry: &CacheEntry<V>) -> Self {
        Self {
            key,
            usage: entry.usage(),
            created_at: entry.created_at(),
            sequence: entry.sequence(),
        }
    }
}

/// 从快照中选择受害者
///
/// 快照为空时返回 `None`，否则总能选出唯一的受害者。
pub fn select_victim<K>(snapshot: &[EvictionCandidate<K>]) -> Option<&EvictionCandidate<K>> {
    let lowest_usage = snapshot.iter().map(|c| c.usage).min()?;

    let mut candidates = snapshot.iter().filter(|c| c.usage == lowest_usage);
    let first = candidates.next()?;

    // 平局：最早创建者优先淘汰
    Some(candidates.fold(first, |oldest, candidate| {
        let older = (candidate.created_at, candidate.sequence) < (oldest.created_at, oldest.sequence);
        if older { candidate } else { oldest }
    }))
}
