//! Asset domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use uuid::Uuid;

use super::category::CategorySpec;
use super::label::Label;
use super::node::Node;
use super::platform::{Category, Platform};
use super::tree::{icon_skin_for_platform_type, AssetAsNode, AssetTreeData, TreeNode, TreeNodeMeta};

/// Network protocol record, exclusively owned by its asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Protocol {
    pub id: Uuid,
    pub name: String,
    pub port: u16,
    /// 显式覆盖的 setting；None 时回退到平台目录默认值
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setting: Option<Map<String, Value>>,
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.name, self.port)
    }
}

/// Managed host / device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: Uuid,
    pub org_id: Uuid,
    /// (org_id, name) 组织内唯一
    pub name: String,
    /// 网络地址
    pub address: String,
    pub platform: Platform,
    /// 网关选择用的可选域引用
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_id: Option<Uuid>,
    /// 直接节点归属，可为空；为空时视为组织根成员
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub protocols: Vec<Protocol>,
    pub is_active: bool,
    /// 机器采集的信息
    #[serde(default)]
    pub gathered_info: Map<String, Value>,
    /// 用户录入的信息
    #[serde(default)]
    pub custom_info: Map<String, Value>,
    /// 类别扩展实例，在存储边界完成解码
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<CategorySpec>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Asset {
    pub fn category(&self) -> Category {
        self.platform.category
    }

    pub fn asset_type(&self) -> &str {
        &self.platform.platform_type
    }

    pub fn is_category(&self, category: Category) -> bool {
        self.category() == category
    }

    pub fn is_type(&self, platform_type: &str) -> bool {
        self.asset_type() == platform_type
    }

    pub fn is_gateway(&self) -> bool {
        self.platform.is_gateway()
    }

    /// 有效性检查，返回 (是否有效, 警告信息)
    pub fn is_valid(&self) -> (bool, String) {
        let mut warning = String::new();
        if !self.is_active {
            warning.push_str(" inactive");
        }
        if !warning.is_empty() {
            return (false, warning);
        }
        (true, warning)
    }

    pub fn get_target_ip(&self) -> &str {
        &self.address
    }

    /// 直接归属节点的显示名称
    pub fn nodes_display(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.value.clone()).collect()
    }

    /// name:value 形式的标签列表
    pub fn labels_display(&self) -> Vec<String> {
        self.labels.iter().map(|l| l.to_string()).collect()
    }

    /// 资产伪装为节点的只读投影
    pub fn as_node(&self) -> AssetAsNode {
        AssetAsNode {
            id: self.id,
            key: self.id.to_string(),
            value: self.name.clone(),
            is_node: false,
        }
    }

    /// 资产挂在指定父节点下的树视图投影
    pub fn as_tree_node(&self, parent: &Node) -> TreeNode {
        TreeNode {
            id: self.id.to_string(),
            name: self.name.clone(),
            title: self.address.clone(),
            parent_key: parent.key.clone(),
            is_parent: false,
            icon_skin: icon_skin_for_platform_type(&self.platform.platform_type).to_string(),
            meta: TreeNodeMeta {
                node_type: "asset".to_string(),
                data: AssetTreeData {
                    id: self.id,
                    name: self.name.clone(),
                    address: self.address.clone(),
                    protocols: self.protocols.iter().map(|p| p.to_string()).collect(),
                },
            },
        }
    }
}

impl std::fmt::Display for Asset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.address)
    }
}

/// 资产集合的过滤与分组助手
#[derive(Debug, Clone, Default)]
pub struct AssetQuerySet {
    assets: Vec<Asset>,
}

impl AssetQuerySet {
    pub fn new(assets: Vec<Asset>) -> Self {
        Self { assets }
    }

    /// 仅保留启用的资产
    pub fn active(self) -> Self {
        Self {
            assets: self.assets.into_iter().filter(|a| a.is_active).collect(),
        }
    }

    /// active 的语义别名，保留给后续分化
    pub fn valid(self) -> Self {
        self.active()
    }

    /// 仅保留声明了指定协议的资产
    pub fn has_protocol(self, name: &str) -> Self {
        Self {
            assets: self
                .assets
                .into_iter()
                .filter(|a| a.protocols.iter().any(|p| p.name == name))
                .collect(),
        }
    }

    /// 按平台身份分组，保持平台首次出现的顺序
    pub fn group_by_platform(&self) -> Vec<(Platform, Vec<Asset>)> {
        let mut groups: Vec<(Platform, Vec<Asset>)> = Vec::new();
        let mut index: HashMap<Uuid, usize> = HashMap::new();

        for asset in &self.assets {
            match index.get(&asset.platform.id) {
                Some(&i) => groups[i].1.push(asset.clone()),
                None => {
                    index.insert(asset.platform.id, groups.len());
                    groups.push((asset.platform.clone(), vec![asset.clone()]));
                }
            }
        }
        groups
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Asset> {
        self.assets.iter()
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    pub fn into_inner(self) -> Vec<Asset> {
        self.assets
    }
}

impl From<Vec<Asset>> for AssetQuerySet {
    fn from(assets: Vec<Asset>) -> Self {
        Self::new(assets)
    }
}

impl IntoIterator for AssetQuerySet {
    type Item = Asset;
    type IntoIter = std::vec::IntoIter<Asset>;

    fn into_iter(self) -> Self::IntoIter {
        self.assets.into_iter()
    }
}
