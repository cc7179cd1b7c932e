//! 测试公共模块
//! 提供测试数据构造与内存实现装配

#![allow(dead_code)]

use chrono::Utc;
use inventory_system::cache::{Cache, MemoryCache};
use inventory_system::models::asset::{Asset, Protocol};
use inventory_system::models::category::CategorySpec;
use inventory_system::models::node::Node;
use inventory_system::models::platform::{Category, Platform, PlatformProtocol};
use inventory_system::repository::MemoryInventoryStore;
use inventory_system::services::NodeHierarchy;
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// 测试用缓存 TTL
pub const TEST_TTL: Duration = Duration::from_secs(60);

/// 创建节点
pub fn make_node(org_id: Uuid, key: &str, value: &str) -> Node {
    Node {
        id: Uuid::new_v4(),
        org_id,
        key: key.to_string(),
        value: value.to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// 创建平台目录条目
pub fn make_platform_protocol(name: &str, port: u16, public: bool, setting: Value) -> PlatformProtocol {
    PlatformProtocol {
        name: name.to_string(),
        port,
        public,
        setting: setting.as_object().cloned().unwrap_or_default(),
    }
}

/// 创建平台
pub fn make_platform(
    name: &str,
    category: Category,
    platform_type: &str,
    protocols: Vec<PlatformProtocol>,
) -> Platform {
    Platform {
        id: Uuid::new_v4(),
        name: name.to_string(),
        category,
        platform_type: platform_type.to_string(),
        domain_enabled: false,
        su_enabled: false,
        automation: None,
        protocols,
    }
}

/// 典型 Linux 主机平台，声明 ssh 默认值
pub fn linux_platform() -> Platform {
    make_platform(
        "Linux",
        Category::Host,
        "linux",
        vec![make_platform_protocol(
            "ssh",
            22,
            true,
            serde_json::json!({"x": 1}),
        )],
    )
}

/// 创建协议实例
pub fn make_protocol(name: &str, port: u16) -> Protocol {
    Protocol {
        id: Uuid::new_v4(),
        name: name.to_string(),
        port,
        setting: None,
    }
}

/// 创建资产，默认启用、无节点归属
pub fn make_asset(org_id: Uuid, name: &str, platform: Platform) -> Asset {
    Asset {
        id: Uuid::new_v4(),
        org_id,
        name: name.to_string(),
        address: format!("{}.example.com", name),
        platform,
        domain_id: None,
        nodes: Vec::new(),
        labels: Vec::new(),
        protocols: Vec::new(),
        is_active: true,
        gathered_info: Map::new(),
        custom_info: Map::new(),
        spec: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// 带类别扩展的资产
pub fn make_asset_with_spec(
    org_id: Uuid,
    name: &str,
    platform: Platform,
    spec: CategorySpec,
) -> Asset {
    let mut asset = make_asset(org_id, name, platform);
    asset.spec = Some(spec);
    asset
}

/// 装配内存存储、内存缓存与层级服务
pub fn setup_hierarchy() -> (
    Arc<MemoryInventoryStore>,
    Arc<MemoryCache>,
    NodeHierarchy<Arc<MemoryInventoryStore>>,
) {
    let store = Arc::new(MemoryInventoryStore::new());
    let cache = Arc::new(MemoryCache::new());
    let hierarchy = NodeHierarchy::new(store.clone(), cache.clone() as Arc<dyn Cache>, TEST_TTL);
    (store, cache, hierarchy)
}

/// 在存储中搭建一棵组织树，返回组织 id 与根节点
pub fn seed_org_tree(store: &MemoryInventoryStore) -> (Uuid, Node) {
    let org_id = Uuid::new_v4();
    let root = make_node(org_id, "1", "Default");
    store.insert_node(root.clone());
    store.insert_node(make_node(org_id, "1:2", "Production"));
    store.insert_node(make_node(org_id, "1:2:5", "Web"));
    store.insert_node(make_node(org_id, "1:3", "Staging"));
    (org_id, root)
}
