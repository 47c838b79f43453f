//! 遗忘映射实现
//!
//! 存储预定数量的键值关联，容量满时淘汰使用次数最少的关联。
//!
//! # 并发模型
//!
//! - 条目存储使用 `DashMap`（分片读写锁），查找不经过插入锁
//! - 使用计数为每个条目的 `AtomicU64`，并发查找不会丢失或重复计数
//! - "检查键 → 检查容量 → 淘汰 → 插入" 整个序列由同一把插入锁串行化，
//!   并发插入不会超出容量，也不会重复淘汰
//! - 条目以 `Arc<CacheEntry<V>>` 整体替换，查找只会看到完整的旧条目或新条目
//!
//! 条目数由独立的原子计数维护，只在插入锁内修改，且淘汰的减一先于插入的加一，
//! 因此 `size()` 读到的值总是映射真实出现过的状态，不会超过 `capacity()`。
//! `keys()` 在插入锁内遍历，得到的也是某个真实状态的快照。

use std::collections::HashSet;
use std::fmt::{self, Debug};
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use dashmap::DashMap;
use parking_lot::Mutex;

use crate::config::ForgetMapConfig;
use crate::entry::CacheEntry;
use crate::error::ForgetMapResult;
use crate::eviction::{self, EvictionCandidate};
use crate::observer::{CacheEvent, CacheObserver, LogObserver, NoopObserver};
use crate::stats::{AtomicCacheStats, CacheStats};

/// 预分配上限，避免超大容量在构造时一次性分配
const PREALLOCATE_LIMIT: usize = 1024;

/// 遗忘映射
///
/// # 示例
/// ```
/// use forget_map::ForgetMap;
///
/// let map = ForgetMap::new(2).unwrap();
/// map.insert("a", 1);
/// map.insert("b", 2);
/// map.lookup(&"a");
///
/// // "b" 未被使用过，插入 "c" 时被淘汰
/// map.insert("c", 3);
/// assert!(map.lookup(&"b").is_none());
/// assert_eq!(map.size(), 2);
/// ```
pub struct ForgetMap<K, V> {
    /// 键到条目的并发映射
    entries: DashMap<K, Arc<CacheEntry<V>>>,
    /// 最大关联数
    max_associations: usize,
    /// 插入锁，同时保存下一个插入序号
    insert_guard: Mutex<u64>,
    /// 条目数，仅在持有插入锁时修改
    len: AtomicUsize,
    /// 统计信息
    stats: AtomicCacheStats,
    /// 事件观察者
    observer: Arc<dyn CacheObserver<K>>,
}

impl<K, V> ForgetMap<K, V>
where
    K: Eq + Hash + Clone + Debug,
{
    /// 创建新的遗忘映射，事件输出到 log 门面
    ///
    /// 容量小于1时返回配置错误。
    pub fn new(max_associations: usize) -> ForgetMapResult<Self> {
        Self::with_observer(max_associations, Arc::new(LogObserver))
    }

    /// 从配置创建
    pub fn from_config(config: &ForgetMapConfig) -> ForgetMapResult<Self> {
        let observer: Arc<dyn CacheObserver<K>> = if config.log_events {
            Arc::new(LogObserver)
        } else {
            Arc::new(NoopObserver)
        };
        Self::with_observer(config.max_associations, observer)
    }
}

impl<K, V> ForgetMap<K, V>
where
    K: Eq + Hash + Clone,
{
    /// 创建带自定义观察者的遗忘映射
    pub fn with_observer(
        max_associations: usize,
        observer: Arc<dyn CacheObserver<K>>,
    ) -> ForgetMapResult<Self> {
        ForgetMapConfig::new(max_associations).validate()?;

        log::debug!("Creating ForgetMap with max_associations={}", max_associations);

        Ok(Self {
            entries: DashMap::with_capacity(max_associations.min(PREALLOCATE_LIMIT)),
            max_associations,
            insert_guard: Mutex::new(0),
            len: AtomicUsize::new(0),
            stats: AtomicCacheStats::default(),
            observer,
        })
    }

    /// 插入键值对
    ///
    /// 键已存在时整体替换条目（使用计数归零），不会触发淘汰。
    /// 新键且容量已满时，先淘汰使用次数最少的条目（平局时淘汰最早创建的）。
    pub fn insert(&self, key: K, value: V) {
        let mut next_sequence = self.insert_guard.lock();
        let entry = Arc::new(CacheEntry::new(value, *next_sequence));
        *next_sequence += 1;

        if self.entries.contains_key(&key) {
            self.observer.on_event(CacheEvent::Overwritten { key: &key });
            self.stats.record_overwrite();
            self.entries.insert(key, entry);
            return;
        }

        while self.len.load(Ordering::Acquire) >= self.max_associations {
            if !self.evict_least_used() {
                break;
            }
        }
        self.observer.on_event(CacheEvent::Inserted { key: &key });
        self.stats.record_insertion();

        self.entries.insert(key, entry);
        self.len.fetch_add(1, Ordering::Release);
    }

    /// 查找键对应的值
    ///
    /// 命中时使用计数原子加一；未命中返回 `None` 且不修改映射。
    pub fn lookup(&self, key: &K) -> Option<Arc<V>> {
        let found = self.entries.get(key).map(|entry| {
            entry.record_use();
            entry.content()
        });

        match found {
            Some(value) => {
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.observer.on_event(CacheEvent::Miss { key });
                self.stats.record_miss();
                None
            }
        }
    }

    /// 获取键的使用计数（不修改计数）
    ///
    /// 键不存在时发出 `CacheEvent::Miss`，但不计入未命中统计。
    pub fn usage_of(&self, key: &K) -> Option<u64> {
        let usage = self.entries.get(key).map(|entry| entry.usage());
        if usage.is_none() {
            self.observer.on_event(CacheEvent::Miss { key });
        }
        usage
    }

    /// 检查键是否存在（不计入使用次数）
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// 当前条目数
    pub fn size(&self) -> usize {
        self.len.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// 最大关联数
    pub fn capacity(&self) -> usize {
        self.max_associations
    }

    /// 当前所有键的快照
    ///
    /// 遍历期间持有插入锁，快照不会混入并发插入和淘汰的中间状态。
    pub fn keys(&self) -> HashSet<K> {
        let _guard = self.insert_guard.lock();
        self.entries.iter().map(|item| item.key().clone()).collect()
    }

    /// 获取统计信息快照
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    /// 淘汰一个条目，调用方必须持有插入锁
    ///
    /// 先收集快照再删除，删除时不持有任何分片读锁。
    fn evict_least_used(&self) -> bool {
        let snapshot: Vec<EvictionCandidate<K>> = self
            .entries
            .iter()
            .map(|item| EvictionCandidate::snapshot(item.key().clone(), item.value().as_ref()))
            .collect();

        let Some(victim) = eviction::select_victim(&snapshot) else {
            return false;
        };

        match self.entries.remove(&victim.key) {
            Some((key, entry)) => {
                self.observer.on_event(CacheEvent::Evicted {
                    key: &key,
                    usage: entry.usage(),
                });
                self.len.fetch_sub(1, Ordering::Release);
                self.stats.record_eviction();
                true
            }
            None => false,
        }
    }
}

impl<K, V> Debug for ForgetMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForgetMap")
            .field("max_associations", &self.max_associations)
            .field("size", &self.size())
            .field("stats", &self.stats.snapshot())
            .finish()
    }
}
