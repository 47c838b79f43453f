// 缓存事件观察（Observability）
//
// 缓存事件通过观察者传递给宿主程序，而不是写入全局日志单例。
// 默认实现 `LogObserver` 将事件转发到 log 门面。

use std::fmt::Debug;

/// 缓存事件
#[derive(Debug)]
pub enum CacheEvent<'a, K> {
    /// 新键插入
    Inserted { key: &'a K },
    /// 键已存在，值被覆盖（使用计数归零）
    Overwritten { key: &'a K },
    /// 条目因容量不足被淘汰
    Evicted { key: &'a K, usage: u64 },
    /// 查找或查询使用计数时键不存在
    Miss { key: &'a K },
}

impl<K> CacheEvent<'_, K> {
    /// 事件名称
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheEvent::Inserted { .. } => "inserted",
            CacheEvent::Overwritten { .. } => "overwritten",
            CacheEvent::Evicted { .. } => "evicted",
            CacheEvent::Miss { .. } => "miss",
        }
    }

    /// 事件涉及的键
    pub fn key(&self) -> &K {
        match self {
            CacheEvent::Inserted { key }
            | CacheEvent::Overwritten { key }
            | CacheEvent::Evicted { key, .. }
            | CacheEvent::Miss { key } => *key,
        }
    }
}

/// 缓存事件观察者
///
/// 回调在插入锁内同步执行（插入、覆盖、淘汰事件），实现应尽快返回，
/// 且不得回调同一个映射的 `insert` 或 `keys`。
pub trait CacheObserver<K>: Send + Sync {
    fn on_event(&self, event: CacheEvent<'_, K>);
}

/// 转发到 log 门面的观察者
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl<K: Debug> CacheObserver<K> for LogObserver {
    fn on_event(&self, event: CacheEvent<'_, K>) {
        match event {
            CacheEvent::Inserted { key } => {
                log::trace!("Key {:?} inserted into ForgetMap", key);
            }
            CacheEvent::Overwritten { key } => {
                log::info!("Key {:?} already found in ForgetMap, will override", key);
            }
            CacheEvent::Evicted { key, usage } => {
                log::debug!("Evicted least used key {:?} (usage {})", key, usage);
            }
            CacheEvent::Miss { key } => {
                log::info!("No element found for key {:?}", key);
            }
        }
    }
}

/// 丢弃所有事件
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl<K> CacheObserver<K> for NoopObserver {
    #[inline]
    fn on_event(&self, _event: CacheEvent<'_, K>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    struct Recorder(Mutex<Vec<String>>);

    impl CacheObserver<u32> for Recorder {
        fn on_event(&self, event: CacheEvent<'_, u32>) {
            self.0.lock().push(format!("{}:{}", event.as_str(), event.key()));
        }
    }

    #[test]
    fn test_event_names_and_keys() {
        let key = 5u32;
        let evicted = CacheEvent::Evicted { key: &key, usage: 3 };
        assert_eq!(evicted.as_str(), "evicted");
        assert_eq!(*evicted.key(), 5);
        assert_eq!(CacheEvent::Miss { key: &key }.as_str(), "miss");
    }

    #[test]
    fn test_custom_observer_receives_events() {
        let recorder = Recorder(Mutex::new(Vec::new()));
        recorder.on_event(CacheEvent::Inserted { key: &1 });
        recorder.on_event(CacheEvent::Overwritten { key: &1 });
        assert_eq!(*recorder.0.lock(), vec!["inserted:1", "overwritten:1"]);
    }

    #[test]
    fn test_log_observer_accepts_every_event() {
        let _ = env_logger::builder().is_test(true).try_init();
        let key = "k".to_string();
        let observer = LogObserver;
        observer.on_event(CacheEvent::Inserted { key: &key });
        observer.on_event(CacheEvent::Overwritten { key: &key });
        observer.on_event(CacheEvent::Evicted { key: &key, usage: 0 });
        observer.on_event(CacheEvent::Miss { key: &key });
    }
}
