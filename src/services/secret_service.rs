//! 凭据类型分类服务
//!
//! 按协议到凭据类型的静态映射对资产分类，供批量凭据下发决策使用。

use crate::error::AppError;
use crate::models::asset::Asset;
use crate::models::types::{secret_types_for_protocol, SecretType};
use crate::repository::InventoryStore;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

pub struct SecretTypeClassifier<S> {
    store: S,
}

impl<S: InventoryStore> SecretTypeClassifier<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 过滤出需要指定凭据类型的资产
    ///
    /// 固定两次批量查询（资产 + 协议名投影），与资产数量无关。
    pub async fn get_assets_by_secret_type(
        &self,
        asset_ids: &[Uuid],
        secret_type: SecretType,
    ) -> Result<Vec<Asset>, AppError> {
        let assets = self.store.assets_by_ids(asset_ids).await?;
        let pairs = self.store.asset_protocol_names(asset_ids).await?;

        let mut types_by_asset: HashMap<Uuid, HashSet<SecretType>> = HashMap::new();
        for (asset_id, protocol_name) in pairs {
            types_by_asset
                .entry(asset_id)
                .or_default()
                .extend(secret_types_for_protocol(&protocol_name).iter().copied());
        }

        Ok(assets
            .into_iter()
            .filter(|asset| {
                types_by_asset
                    .get(&asset.id)
                    .is_some_and(|types| types.contains(&secret_type))
            })
            .collect())
    }
}
