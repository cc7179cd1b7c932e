//! 节点层级解析服务
//!
//! 计算资产的节点全闭包。缓存条目只是建议性快照，未命中、过期或
//! 后端故障都回退到由 key 重算，正确性不依赖缓存存在。

use crate::cache::{self, Cache};
use crate::error::AppError;
use crate::models::asset::Asset;
use crate::models::node::Node;
use crate::repository::InventoryStore;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

pub struct NodeHierarchy<S> {
    store: S,
    cache: Arc<dyn Cache>,
    ttl: Duration,
}

impl<S: InventoryStore> NodeHierarchy<S> {
    pub fn new(store: S, cache: Arc<dyn Cache>, ttl: Duration) -> Self {
        Self { store, cache, ttl }
    }

    /// 直接归属节点；无归属的资产视为组织根成员，永不为空
    pub async fn get_direct_nodes(&self, asset: &Asset) -> Result<Vec<Node>, AppError> {
        if !asset.nodes.is_empty() {
            return Ok(asset.nodes.clone());
        }
        let root = self.store.org_root_node(asset.org_id).await?;
        Ok(vec![root])
    }

    /// 节点祖先 key 集合，纯函数
    pub fn get_ancestor_keys(&self, node: &Node, with_self: bool) -> HashSet<String> {
        node.ancestor_keys(with_self)
    }

    /// 资产的节点 key 全闭包
    pub async fn get_all_node_keys(&self, asset: &Asset) -> Result<HashSet<String>, AppError> {
        let cache_key = cache::asset_nodes_key(asset.id);
        if let Some(keys) = self.cached_keys(&cache_key) {
            return Ok(keys);
        }

        let mut keys = HashSet::new();
        for node in self.get_direct_nodes(asset).await? {
            keys.extend(self.node_closure(&node));
        }

        self.put_keys(&cache_key, &keys);
        Ok(keys)
    }

    /// 资产的节点全闭包，一次批量查询解析实体
    pub async fn get_all_nodes(&self, asset: &Asset) -> Result<Vec<Node>, AppError> {
        let keys = self.get_all_node_keys(asset).await?;
        self.store.nodes_by_keys(asset.org_id, &keys).await
    }

    /// 资产的节点全闭包，仅返回标识（flat 形式）
    pub async fn get_all_node_ids(&self, asset: &Asset) -> Result<HashSet<Uuid>, AppError> {
        let nodes = self.get_all_nodes(asset).await?;
        Ok(nodes.into_iter().map(|n| n.id).collect())
    }

    /// 批量版本：先合并所有资产的 key 闭包，再发出一次实体查询，
    /// 避免 N+1 扇出。批次内资产须属于同一组织。
    pub async fn get_all_nodes_for_assets(&self, assets: &[Asset]) -> Result<Vec<Node>, AppError> {
        let Some(first) = assets.first() else {
            return Ok(Vec::new());
        };

        let mut keys = HashSet::new();
        for asset in assets {
            keys.extend(self.get_all_node_keys(asset).await?);
        }
        self.store.nodes_by_keys(first.org_id, &keys).await
    }

    /// 资产节点归属变更后的缓存驱逐钩子
    pub fn invalidate_asset(&self, asset_id: Uuid) {
        self.evict(&cache::asset_nodes_key(asset_id));
    }

    /// 节点换父（key 变更）后的缓存驱逐钩子
    ///
    /// 成员资产的 ASSET_NODES_ 条目不在此处驱逐，由 TTL 过期兜底。
    pub fn invalidate_node(&self, node_key: &str) {
        self.evict(&cache::node_ancestors_key(node_key));
    }

    /// 单节点的祖先闭包（含自身），按节点 key 缓存
    fn node_closure(&self, node: &Node) -> HashSet<String> {
        let cache_key = cache::node_ancestors_key(&node.key);
        if let Some(keys) = self.cached_keys(&cache_key) {
            return keys;
        }
        let keys = node.ancestor_keys(true);
        self.put_keys(&cache_key, &keys);
        keys
    }

    fn cached_keys(&self, cache_key: &str) -> Option<HashSet<String>> {
        let bytes = match self.cache.get(cache_key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                metrics::counter!("inventory.node_cache.miss").increment(1);
                return None;
            }
            Err(e) => {
                // 后端故障按未命中处理，不上抛
                tracing::warn!(key = cache_key, error = %e, "Cache backend unavailable, recomputing");
                metrics::counter!("inventory.node_cache.miss").increment(1);
                return None;
            }
        };

        match serde_json::from_slice::<Vec<String>>(&bytes) {
            Ok(keys) => {
                metrics::counter!("inventory.node_cache.hit").increment(1);
                Some(keys.into_iter().collect())
            }
            Err(e) => {
                tracing::warn!(key = cache_key, error = %e, "Discarding undecodable cache entry");
                self.evict(cache_key);
                metrics::counter!("inventory.node_cache.miss").increment(1);
                None
            }
        }
    }

    fn put_keys(&self, cache_key: &str, keys: &HashSet<String>) {
        let mut list: Vec<&String> = keys.iter().collect();
        list.sort();

        let bytes = match serde_json::to_vec(&list) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(key = cache_key, error = %e, "Failed to encode cache entry");
                return;
            }
        };

        if let Err(e) = self.cache.set(cache_key, &bytes, self.ttl) {
            tracing::warn!(key = cache_key, error = %e, "Failed to populate cache");
        }
    }

    fn evict(&self, cache_key: &str) {
        if let Err(e) = self.cache.evict(cache_key) {
            // 驱逐失败可容忍，下游将读到短暂的陈旧值直至 TTL 过期
            tracing::warn!(key = cache_key, error = %e, "Failed to evict cache entry");
        }
    }
}
