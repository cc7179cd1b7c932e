//! Category-specific structured fields
//!
//! 按类别区分的强类型扩展字段。host/device/cloud 类别没有扩展实例，
//! 对应资产的 spec 为 None。

use super::platform::Category;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Database category extension
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSpec {
    #[serde(default)]
    pub db_name: String,
    #[serde(default)]
    pub use_ssl: bool,
    #[serde(default)]
    pub allow_invalid_cert: bool,
    // 以下三个字段为敏感字段，仅出现在 secret_info 中
    #[serde(default)]
    pub ca_cert: String,
    #[serde(default)]
    pub client_cert: String,
    #[serde(default)]
    pub client_key: String,
}

/// Web category extension
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebSpec {
    #[serde(default)]
    pub autofill: String,
    #[serde(default)]
    pub username_selector: String,
    #[serde(default)]
    pub password_selector: String,
    #[serde(default)]
    pub submit_selector: String,
    #[serde(default)]
    pub script: Vec<Value>,
}

/// 数据库扩展中的敏感字段名
const DATABASE_SECRET_FIELDS: &[&str] = &["ca_cert", "client_cert", "client_key"];

/// 类别扩展实例，按类别标签编解码
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum CategorySpec {
    Database(DatabaseSpec),
    Web(WebSpec),
}

impl CategorySpec {
    pub fn category(&self) -> Category {
        match self {
            CategorySpec::Database(_) => Category::Database,
            CategorySpec::Web(_) => Category::Web,
        }
    }

    /// 非敏感结构化字段
    pub fn spec_info(&self) -> Map<String, Value> {
        match self {
            CategorySpec::Database(spec) => {
                let mut info = to_map(spec);
                for field in DATABASE_SECRET_FIELDS {
                    info.remove(*field);
                }
                info
            }
            CategorySpec::Web(spec) => to_map(spec),
        }
    }

    /// 仅敏感结构化字段
    pub fn secret_info(&self) -> Map<String, Value> {
        match self {
            CategorySpec::Database(spec) => to_map(spec)
                .into_iter()
                .filter(|(name, _)| DATABASE_SECRET_FIELDS.contains(&name.as_str()))
                .collect(),
            CategorySpec::Web(_) => Map::new(),
        }
    }
}

fn to_map<T: Serialize>(value: &T) -> Map<String, Value> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}
