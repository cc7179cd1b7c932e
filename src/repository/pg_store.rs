//! PostgreSQL inventory store (资产数据访问)

use super::InventoryStore;
use crate::error::AppError;
use crate::models::asset::{Asset, Protocol};
use crate::models::category::CategorySpec;
use crate::models::node::Node;
use crate::models::platform::{Platform, PlatformAutomation, PlatformProtocol};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

pub struct PgInventoryStore {
    db: PgPool,
}

#[derive(sqlx::FromRow)]
struct AssetRow {
    id: Uuid,
    org_id: Uuid,
    name: String,
    address: String,
    platform_id: Uuid,
    domain_id: Option<Uuid>,
    is_active: bool,
    gathered_info: Json<serde_json::Map<String, serde_json::Value>>,
    custom_info: Json<serde_json::Map<String, serde_json::Value>>,
    spec: Option<Json<CategorySpec>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct PlatformRow {
    id: Uuid,
    name: String,
    category: String,
    platform_type: String,
    domain_enabled: bool,
    su_enabled: bool,
    automation: Option<Json<PlatformAutomation>>,
    protocols: Json<Vec<PlatformProtocol>>,
}

#[derive(sqlx::FromRow)]
struct ProtocolRow {
    id: Uuid,
    asset_id: Uuid,
    name: String,
    port: i32,
    setting: Option<Json<serde_json::Map<String, serde_json::Value>>>,
}

impl PlatformRow {
    fn into_platform(self) -> Result<Platform, AppError> {
        let category = self
            .category
            .parse()
            .map_err(|e: String| AppError::BadRequest(e))?;
        Ok(Platform {
            id: self.id,
            name: self.name,
            category,
            platform_type: self.platform_type,
            domain_enabled: self.domain_enabled,
            su_enabled: self.su_enabled,
            automation: self.automation.map(|a| a.0),
            protocols: self.protocols.0,
        })
    }
}

impl PgInventoryStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    // ==================== Platforms ====================

    /// 创建平台
    pub async fn create_platform(&self, platform: &Platform) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO platforms (id, name, category, platform_type, domain_enabled, su_enabled, automation, protocols)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(platform.id)
        .bind(&platform.name)
        .bind(platform.category.as_str())
        .bind(&platform.platform_type)
        .bind(platform.domain_enabled)
        .bind(platform.su_enabled)
        .bind(platform.automation.as_ref().map(Json))
        .bind(Json(&platform.protocols))
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// 按 id 集合批量取平台
    async fn platforms_by_ids(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, Platform>, AppError> {
        let rows = sqlx::query_as::<_, PlatformRow>(
            "SELECT id, name, category, platform_type, domain_enabled, su_enabled, automation, protocols
             FROM platforms WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.db)
        .await?;

        let mut platforms = HashMap::with_capacity(rows.len());
        for row in rows {
            let platform = row.into_platform()?;
            platforms.insert(platform.id, platform);
        }
        Ok(platforms)
    }

    // ==================== Nodes ====================

    /// 创建节点
    pub async fn create_node(&self, node: &Node) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO nodes (id, org_id, key, value, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(node.id)
        .bind(node.org_id)
        .bind(&node.key)
        .bind(&node.value)
        .bind(node.created_at)
        .bind(node.updated_at)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    // ==================== Assets ====================

    /// 创建资产及其协议、节点与标签关联
    pub async fn create_asset(&self, asset: &Asset) -> Result<(), AppError> {
        let mut tx = self.db.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO assets (
                id, org_id, name, address, platform_id, domain_id, is_active,
                gathered_info, custom_info, spec, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(asset.id)
        .bind(asset.org_id)
        .bind(&asset.name)
        .bind(&asset.address)
        .bind(asset.platform.id)
        .bind(asset.domain_id)
        .bind(asset.is_active)
        .bind(Json(&asset.gathered_info))
        .bind(Json(&asset.custom_info))
        .bind(asset.spec.as_ref().map(Json))
        .bind(asset.created_at)
        .bind(asset.updated_at)
        .execute(&mut *tx)
        .await?;

        for protocol in &asset.protocols {
            sqlx::query(
                "INSERT INTO protocols (id, asset_id, name, port, setting) VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(protocol.id)
            .bind(asset.id)
            .bind(&protocol.name)
            .bind(protocol.port as i32)
            .bind(protocol.setting.as_ref().map(Json))
            .execute(&mut *tx)
            .await?;
        }

        for node in &asset.nodes {
            sqlx::query("INSERT INTO asset_nodes (asset_id, node_id) VALUES ($1, $2)")
                .bind(asset.id)
                .bind(node.id)
                .execute(&mut *tx)
                .await?;
        }

        for label in &asset.labels {
            sqlx::query(
                "INSERT INTO asset_labels (asset_id, label_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(asset.id)
            .bind(label.id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// 替换资产的节点归属
    ///
    /// 调用方负责随后驱逐对应的缓存键（NodeHierarchy::invalidate_asset）。
    pub async fn set_asset_nodes(&self, asset_id: Uuid, node_ids: &[Uuid]) -> Result<(), AppError> {
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM asset_nodes WHERE asset_id = $1")
            .bind(asset_id)
            .execute(&mut *tx)
            .await?;

        for node_id in node_ids {
            sqlx::query("INSERT INTO asset_nodes (asset_id, node_id) VALUES ($1, $2)")
                .bind(asset_id)
                .bind(node_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// 删除资产，协议记录级联删除
    pub async fn delete_asset(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// 组织内全部资产
    pub async fn list_assets(&self, org_id: Uuid) -> Result<Vec<Asset>, AppError> {
        let rows = sqlx::query_as::<_, AssetRow>(
            "SELECT * FROM assets WHERE org_id = $1 ORDER BY name",
        )
        .bind(org_id)
        .fetch_all(&self.db)
        .await?;

        self.assemble_assets(rows).await
    }

    /// 将资产行与平台、协议、节点、标签装配为完整实体
    async fn assemble_assets(&self, rows: Vec<AssetRow>) -> Result<Vec<Asset>, AppError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let asset_ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let platform_ids: Vec<Uuid> = {
            let unique: HashSet<Uuid> = rows.iter().map(|r| r.platform_id).collect();
            unique.into_iter().collect()
        };

        let platforms = self.platforms_by_ids(&platform_ids).await?;

        let protocol_rows = sqlx::query_as::<_, ProtocolRow>(
            "SELECT id, asset_id, name, port, setting FROM protocols WHERE asset_id = ANY($1)",
        )
        .bind(&asset_ids)
        .fetch_all(&self.db)
        .await?;

        let mut protocols_by_asset: HashMap<Uuid, Vec<Protocol>> = HashMap::new();
        for row in protocol_rows {
            protocols_by_asset.entry(row.asset_id).or_default().push(Protocol {
                id: row.id,
                name: row.name,
                port: row.port as u16,
                setting: row.setting.map(|s| s.0),
            });
        }

        let node_rows = sqlx::query_as::<_, AssetNodeRow>(
            r#"
            SELECT an.asset_id, n.id, n.org_id, n.key, n.value, n.created_at, n.updated_at
            FROM asset_nodes an
            JOIN nodes n ON n.id = an.node_id
            WHERE an.asset_id = ANY($1)
            "#,
        )
        .bind(&asset_ids)
        .fetch_all(&self.db)
        .await?;

        let mut nodes_by_asset: HashMap<Uuid, Vec<Node>> = HashMap::new();
        for row in node_rows {
            nodes_by_asset.entry(row.asset_id).or_default().push(Node {
                id: row.id,
                org_id: row.org_id,
                key: row.key,
                value: row.value,
                created_at: row.created_at,
                updated_at: row.updated_at,
            });
        }

        let label_rows = sqlx::query_as::<_, AssetLabelRow>(
            r#"
            SELECT al.asset_id, l.id, l.org_id, l.name, l.value
            FROM asset_labels al
            JOIN labels l ON l.id = al.label_id
            WHERE al.asset_id = ANY($1)
            "#,
        )
        .bind(&asset_ids)
        .fetch_all(&self.db)
        .await?;

        let mut labels_by_asset: HashMap<Uuid, Vec<crate::models::label::Label>> = HashMap::new();
        for row in label_rows {
            labels_by_asset.entry(row.asset_id).or_default().push(crate::models::label::Label {
                id: row.id,
                org_id: row.org_id,
                name: row.name,
                value: row.value,
            });
        }

        let mut assets = Vec::with_capacity(rows.len());
        for row in rows {
            let platform = platforms.get(&row.platform_id).cloned().ok_or_else(|| {
                AppError::NotFound(format!("platform {} for asset {}", row.platform_id, row.id))
            })?;

            assets.push(Asset {
                id: row.id,
                org_id: row.org_id,
                name: row.name,
                address: row.address,
                platform,
                domain_id: row.domain_id,
                nodes: nodes_by_asset.remove(&row.id).unwrap_or_default(),
                labels: labels_by_asset.remove(&row.id).unwrap_or_default(),
                protocols: protocols_by_asset.remove(&row.id).unwrap_or_default(),
                is_active: row.is_active,
                gathered_info: row.gathered_info.0,
                custom_info: row.custom_info.0,
                spec: row.spec.map(|s| s.0),
                created_at: row.created_at,
                updated_at: row.updated_at,
            });
        }

        Ok(assets)
    }
}

#[derive(sqlx::FromRow)]
struct AssetNodeRow {
    asset_id: Uuid,
    id: Uuid,
    org_id: Uuid,
    key: String,
    value: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct AssetLabelRow {
    asset_id: Uuid,
    id: Uuid,
    org_id: Uuid,
    name: String,
    value: String,
}

#[async_trait]
impl InventoryStore for PgInventoryStore {
    async fn org_root_node(&self, org_id: Uuid) -> Result<Node, AppError> {
        sqlx::query_as::<_, Node>(
            "SELECT * FROM nodes WHERE org_id = $1 AND key NOT LIKE '%:%' LIMIT 1",
        )
        .bind(org_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("org root node for org {}", org_id)))
    }

    async fn nodes_by_keys(
        &self,
        org_id: Uuid,
        keys: &HashSet<String>,
    ) -> Result<Vec<Node>, AppError> {
        let key_list: Vec<String> = keys.iter().cloned().collect();
        let nodes = sqlx::query_as::<_, Node>(
            "SELECT DISTINCT * FROM nodes WHERE org_id = $1 AND key = ANY($2)",
        )
        .bind(org_id)
        .bind(&key_list)
        .fetch_all(&self.db)
        .await?;

        Ok(nodes)
    }

    async fn assets_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Asset>, AppError> {
        let rows = sqlx::query_as::<_, AssetRow>("SELECT * FROM assets WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.db)
            .await?;

        self.assemble_assets(rows).await
    }

    async fn asset_protocol_names(&self, ids: &[Uuid]) -> Result<Vec<(Uuid, String)>, AppError> {
        let pairs = sqlx::query_as::<_, (Uuid, String)>(
            "SELECT asset_id, name FROM protocols WHERE asset_id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.db)
        .await?;

        Ok(pairs)
    }
}
