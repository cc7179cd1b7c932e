//! Platform catalog models
//!
//! 平台是协议默认值与自动化配置的目录，资产侧解析只读取它。

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// 网关平台名称
pub const GATEWAY_PLATFORM_NAME: &str = "Gateway";

/// Asset category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Host,
    Device,
    Database,
    Cloud,
    Web,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Host => "host",
            Category::Device => "device",
            Category::Database => "database",
            Category::Cloud => "cloud",
            Category::Web => "web",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "host" => Ok(Category::Host),
            "device" => Ok(Category::Device),
            "database" => Ok(Category::Database),
            "cloud" => Ok(Category::Cloud),
            "web" => Ok(Category::Web),
            other => Err(format!("unknown category: {}", other)),
        }
    }
}

/// 平台声明的协议默认值条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformProtocol {
    pub name: String,
    /// 默认端口
    pub port: u16,
    /// 可见性标志
    #[serde(default = "default_public")]
    pub public: bool,
    /// 默认 setting，协议实例未覆盖时继承
    #[serde(default)]
    pub setting: Map<String, Value>,
}

fn default_public() -> bool {
    true
}

/// 平台自动化配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformAutomation {
    #[serde(default)]
    pub ansible_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ansible_config: Option<Map<String, Value>>,
    #[serde(default)]
    pub ping_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ping_method: Option<String>,
    #[serde(default)]
    pub gather_facts_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gather_facts_method: Option<String>,
    #[serde(default)]
    pub push_account_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub push_account_method: Option<String>,
    #[serde(default)]
    pub change_secret_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_secret_method: Option<String>,
    #[serde(default)]
    pub verify_account_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verify_account_method: Option<String>,
}

/// Platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: Uuid,
    pub name: String,
    pub category: Category,
    /// 平台类型，如 "linux"、"windows"
    #[serde(rename = "type")]
    pub platform_type: String,
    pub domain_enabled: bool,
    pub su_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automation: Option<PlatformAutomation>,
    #[serde(default)]
    pub protocols: Vec<PlatformProtocol>,
}

impl Platform {
    /// 按名称查找协议目录条目
    ///
    /// 目录按名称应当唯一；若出现重复，取第一个，不报错。
    pub fn protocol_entry(&self, name: &str) -> Option<&PlatformProtocol> {
        self.protocols.iter().find(|p| p.name == name)
    }

    pub fn is_gateway(&self) -> bool {
        self.name == GATEWAY_PLATFORM_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn platform_with_protocols(protocols: Vec<PlatformProtocol>) -> Platform {
        Platform {
            id: Uuid::new_v4(),
            name: "Linux".to_string(),
            category: Category::Host,
            platform_type: "linux".to_string(),
            domain_enabled: true,
            su_enabled: false,
            automation: None,
            protocols,
        }
    }

    #[test]
    fn test_protocol_entry_first_match_wins() {
        let platform = platform_with_protocols(vec![
            PlatformProtocol {
                name: "ssh".to_string(),
                port: 22,
                public: true,
                setting: json!({"x": 1}).as_object().cloned().unwrap(),
            },
            PlatformProtocol {
                name: "ssh".to_string(),
                port: 2222,
                public: false,
                setting: Map::new(),
            },
        ]);

        let entry = platform.protocol_entry("ssh").unwrap();
        assert_eq!(entry.port, 22);
        assert!(entry.public);
    }

    #[test]
    fn test_protocol_entry_missing() {
        let platform = platform_with_protocols(vec![]);
        assert!(platform.protocol_entry("rdp").is_none());
    }

    #[test]
    fn test_platform_protocol_public_defaults_true() {
        let p: PlatformProtocol =
            serde_json::from_value(json!({"name": "ssh", "port": 22})).unwrap();
        assert!(p.public);
        assert!(p.setting.is_empty());
    }
}
