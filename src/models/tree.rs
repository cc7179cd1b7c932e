//! Tree view projections
//!
//! 供展示层消费的只读投影，不复用 Node 实体本身。

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 资产在树中的图标
pub fn icon_skin_for_platform_type(platform_type: &str) -> &'static str {
    match platform_type.to_lowercase().as_str() {
        "windows" => "windows",
        "linux" => "linux",
        _ => "file",
    }
}

/// 树节点元数据携带的资产摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetTreeData {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    /// "name/port" 形式的协议列表
    pub protocols: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNodeMeta {
    #[serde(rename = "type")]
    pub node_type: String,
    pub data: AssetTreeData,
}

/// 资产的树视图投影
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: String,
    pub name: String,
    pub title: String,
    #[serde(rename = "parentKey")]
    pub parent_key: String,
    #[serde(rename = "isParent")]
    pub is_parent: bool,
    #[serde(rename = "iconSkin")]
    pub icon_skin: String,
    pub meta: TreeNodeMeta,
}

/// 资产伪装为节点的只读投影，仅携带树展示所需字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetAsNode {
    pub id: Uuid,
    /// 资产 id 字符串，占据节点 key 的位置
    pub key: String,
    /// 资产名称
    pub value: String,
    pub is_node: bool,
}
