//! In-memory inventory store
//!
//! 供嵌入式场景与测试替换使用，与 Postgres 实现遵循同一接口。

use super::InventoryStore;
use crate::error::AppError;
use crate::models::asset::Asset;
use crate::models::node::Node;
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::HashSet;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryInventoryStore {
    nodes: DashMap<Uuid, Node>,
    assets: DashMap<Uuid, Asset>,
}

impl MemoryInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_node(&self, node: Node) {
        self.nodes.insert(node.id, node);
    }

    pub fn insert_asset(&self, asset: Asset) {
        self.assets.insert(asset.id, asset);
    }

    pub fn remove_asset(&self, id: Uuid) -> Option<Asset> {
        self.assets.remove(&id).map(|(_, asset)| asset)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }
}

#[async_trait]
impl InventoryStore for MemoryInventoryStore {
    async fn org_root_node(&self, org_id: Uuid) -> Result<Node, AppError> {
        self.nodes
            .iter()
            .find(|n| n.org_id == org_id && n.is_org_root())
            .map(|n| n.value().clone())
            .ok_or_else(|| AppError::NotFound(format!("org root node for org {}", org_id)))
    }

    async fn nodes_by_keys(
        &self,
        org_id: Uuid,
        keys: &HashSet<String>,
    ) -> Result<Vec<Node>, AppError> {
        Ok(self
            .nodes
            .iter()
            .filter(|n| n.org_id == org_id && keys.contains(&n.key))
            .map(|n| n.value().clone())
            .collect())
    }

    async fn assets_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Asset>, AppError> {
        Ok(ids
            .iter()
            .filter_map(|id| self.assets.get(id).map(|a| a.value().clone()))
            .collect())
    }

    async fn asset_protocol_names(&self, ids: &[Uuid]) -> Result<Vec<(Uuid, String)>, AppError> {
        let mut pairs = Vec::new();
        for id in ids {
            if let Some(asset) = self.assets.get(id) {
                for protocol in &asset.protocols {
                    pairs.push((asset.id, protocol.name.clone()));
                }
            }
        }
        Ok(pairs)
    }
}
