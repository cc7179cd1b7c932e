//! 缓存后端抽象
//! 节点闭包缓存为建议性数据，后端故障一律按未命中处理

use dashmap::DashMap;
use std::time::{Duration, Instant};
use thiserror::Error;
use uuid::Uuid;

/// 节点祖先闭包缓存键前缀
const NODE_ANCESTORS_CACHE_KEY: &str = "NODE_ANCESTORS_";
/// 资产节点闭包缓存键前缀
const ASSET_NODES_CACHE_KEY: &str = "ASSET_NODES_";

/// 默认缓存 TTL：7 天
pub const DEFAULT_NODE_TTL: Duration = Duration::from_secs(3600 * 24 * 7);

pub fn node_ancestors_key(node_key: &str) -> String {
    format!("{}{}", NODE_ANCESTORS_CACHE_KEY, node_key)
}

pub fn asset_nodes_key(asset_id: Uuid) -> String {
    format!("{}{}", ASSET_NODES_CACHE_KEY, asset_id)
}

/// 缓存后端错误类型
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache backend unavailable: {0}")]
    Backend(String),
}

/// 键值缓存后端
///
/// 实现方按 TTL 过期条目；值为不透明字节串，由调用方负责编解码。
pub trait Cache: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError>;

    fn evict(&self, key: &str) -> Result<(), CacheError>;
}

struct CacheEntry {
    value: Vec<u8>,
    expires_at: Instant,
}

/// 进程内缓存实现
///
/// 过期条目在读取时惰性清除。
#[derive(Default)]
pub struct MemoryCache {
    entries: DashMap<String, CacheEntry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前未过期条目数量
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries.iter().filter(|e| e.expires_at > now).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        if let Some(entry) = self.entries.get(key) {
            if entry.expires_at > Instant::now() {
                return Ok(Some(entry.value.clone()));
            }
        }
        // 条目不存在或已过期
        self.entries.remove_if(key, |_, e| e.expires_at <= Instant::now());
        Ok(None)
    }

    fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError> {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value: value.to_vec(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    fn evict(&self, key: &str) -> Result<(), CacheError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// 空缓存实现，所有读取均未命中
pub struct NoopCache;

impl Cache for NoopCache {
    fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &[u8], _ttl: Duration) -> Result<(), CacheError> {
        Ok(())
    }

    fn evict(&self, _key: &str) -> Result<(), CacheError> {
        Ok(())
    }
}
