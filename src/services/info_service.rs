//! 资产信息聚合服务
//!
//! 将采集信息、用户录入与类别扩展字段按固定优先级合并。备忘表由
//! 调用方的请求生命周期持有，实体对象内部不做隐藏缓存。

use crate::models::asset::Asset;
use serde_json::{Map, Value};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Default)]
pub struct AssetInfoAggregator {
    info_memo: HashMap<Uuid, Map<String, Value>>,
    secret_memo: HashMap<Uuid, Map<String, Value>>,
    auto_memo: HashMap<Uuid, Map<String, Value>>,
}

impl AssetInfoAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 类别扩展的非敏感字段；无扩展实例时为空表
    pub fn spec_info(asset: &Asset) -> Map<String, Value> {
        asset.spec.as_ref().map(|s| s.spec_info()).unwrap_or_default()
    }

    /// 统一信息视图
    ///
    /// 优先级从低到高：采集信息、用户录入、类别扩展字段；同名键后者覆盖前者。
    pub fn info(&mut self, asset: &Asset) -> Map<String, Value> {
        if let Some(info) = self.info_memo.get(&asset.id) {
            return info.clone();
        }

        let mut info = Map::new();
        info.extend(asset.gathered_info.clone());
        info.extend(asset.custom_info.clone());
        info.extend(Self::spec_info(asset));

        self.info_memo.insert(asset.id, info.clone());
        info
    }

    /// 敏感信息视图
    ///
    /// 仅来自类别扩展的敏感字段，绝不合并采集或用户录入层。
    pub fn secret_info(&mut self, asset: &Asset) -> Map<String, Value> {
        if let Some(secret) = self.secret_memo.get(&asset.id) {
            return secret.clone();
        }

        let secret = asset.spec.as_ref().map(|s| s.secret_info()).unwrap_or_default();

        self.secret_memo.insert(asset.id, secret.clone());
        secret
    }

    /// 自动化配置视图
    ///
    /// 基础为平台的 su/domain 开关与 ansible_enabled=false；平台带自动化
    /// 配置时由其字段覆盖扩展（包括 ansible_enabled）。
    pub fn auto_config(&mut self, asset: &Asset) -> Map<String, Value> {
        if let Some(config) = self.auto_memo.get(&asset.id) {
            return config.clone();
        }

        let platform = &asset.platform;
        let mut config = Map::new();
        config.insert("su_enabled".to_string(), Value::Bool(platform.su_enabled));
        config.insert("domain_enabled".to_string(), Value::Bool(platform.domain_enabled));
        config.insert("ansible_enabled".to_string(), Value::Bool(false));

        if let Some(automation) = &platform.automation {
            if let Ok(Value::Object(fields)) = serde_json::to_value(automation) {
                config.extend(fields);
            }
        }

        self.auto_memo.insert(asset.id, config.clone());
        config
    }

    /// 清空备忘表（资产变更后复用同一实例时调用）
    pub fn reset(&mut self) {
        self.info_memo.clear();
        self.secret_memo.clear();
        self.auto_memo.clear();
    }
}
