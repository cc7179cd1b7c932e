//! Secret type catalog
//!
//! 协议到凭据类型的静态映射，供批量凭据下发决策使用。

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Credential kind required by a protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretType {
    Password,
    SshKey,
    AccessKey,
    Token,
    ApiKey,
    VncPassword,
}

impl SecretType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SecretType::Password => "password",
            SecretType::SshKey => "ssh_key",
            SecretType::AccessKey => "access_key",
            SecretType::Token => "token",
            SecretType::ApiKey => "api_key",
            SecretType::VncPassword => "vnc_password",
        }
    }
}

impl std::fmt::Display for SecretType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const PASSWORD_ONLY: &[SecretType] = &[SecretType::Password];
const SSH_SECRET_TYPES: &[SecretType] = &[SecretType::Password, SecretType::SshKey];
const VNC_SECRET_TYPES: &[SecretType] = &[SecretType::VncPassword];
const TOKEN_ONLY: &[SecretType] = &[SecretType::Token];

static PROTOCOL_SECRET_TYPES: Lazy<HashMap<&'static str, &'static [SecretType]>> =
    Lazy::new(|| {
        let mut map: HashMap<&'static str, &'static [SecretType]> = HashMap::new();
        map.insert("ssh", SSH_SECRET_TYPES);
        map.insert("sftp", SSH_SECRET_TYPES);
        map.insert("rdp", PASSWORD_ONLY);
        map.insert("telnet", PASSWORD_ONLY);
        map.insert("winrm", PASSWORD_ONLY);
        map.insert("http", PASSWORD_ONLY);
        map.insert("vnc", VNC_SECRET_TYPES);
        map.insert("k8s", TOKEN_ONLY);
        for name in [
            "mysql",
            "mariadb",
            "postgresql",
            "sqlserver",
            "oracle",
            "redis",
            "mongodb",
            "clickhouse",
        ] {
            map.insert(name, PASSWORD_ONLY);
        }
        map
    });

/// 协议名到凭据类型集合；未知协议返回空集
pub fn secret_types_for_protocol(name: &str) -> &'static [SecretType] {
    PROTOCOL_SECRET_TYPES.get(name).copied().unwrap_or(&[])
}
