//! Storage layer
//!
//! 存储引擎是唯一的权威数据源；本层只定义核心消费的批量读取接口，
//! 以及 Postgres 与内存两种实现。

pub mod memory;
pub mod pg_store;

pub use memory::MemoryInventoryStore;
pub use pg_store::PgInventoryStore;

use crate::error::AppError;
use crate::models::asset::Asset;
use crate::models::node::Node;
use async_trait::async_trait;
use std::collections::HashSet;
use uuid::Uuid;

/// 库存核心消费的存储接口
///
/// 所有读取都是批量的：层级解析与凭据分类保证每个批次只发出
/// 一次实体查询，不随资产数量线性增长。
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// 组织根节点，每个组织恰好一个
    async fn org_root_node(&self, org_id: Uuid) -> Result<Node, AppError>;

    /// 按 key 集合批量取节点（去重）
    async fn nodes_by_keys(
        &self,
        org_id: Uuid,
        keys: &HashSet<String>,
    ) -> Result<Vec<Node>, AppError>;

    /// 按 id 集合批量取资产
    async fn assets_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Asset>, AppError>;

    /// 批量取 (资产 id, 协议名) 投影
    async fn asset_protocol_names(&self, ids: &[Uuid]) -> Result<Vec<(Uuid, String)>, AppError>;
}

#[async_trait]
impl<T: InventoryStore + ?Sized> InventoryStore for std::sync::Arc<T> {
    async fn org_root_node(&self, org_id: Uuid) -> Result<Node, AppError> {
        (**self).org_root_node(org_id).await
    }

    async fn nodes_by_keys(
        &self,
        org_id: Uuid,
        keys: &HashSet<String>,
    ) -> Result<Vec<Node>, AppError> {
        (**self).nodes_by_keys(org_id, keys).await
    }

    async fn assets_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Asset>, AppError> {
        (**self).assets_by_ids(ids).await
    }

    async fn asset_protocol_names(&self, ids: &[Uuid]) -> Result<Vec<(Uuid, String)>, AppError> {
        (**self).asset_protocol_names(ids).await
    }
}
