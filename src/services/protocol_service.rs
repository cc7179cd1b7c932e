//! 协议配置解析服务
//!
//! 合并协议实例的显式覆盖与平台目录声明的默认值。

use crate::models::asset::{Asset, Protocol};
use serde_json::{Map, Value};

/// ssh 协议缺失时的回退端口；其他协议不设等价回退
pub const DEFAULT_SSH_PORT: u16 = 22;

pub struct ProtocolResolver;

impl ProtocolResolver {
    /// 协议生效的 setting
    ///
    /// 显式覆盖优先级最高，直接返回，完全绕过目录；否则取平台目录中
    /// 首个同名条目的默认值；目录无此协议时返回空表。
    pub fn resolve_setting(asset: &Asset, protocol: &Protocol) -> Map<String, Value> {
        if let Some(setting) = &protocol.setting {
            return setting.clone();
        }
        asset
            .platform
            .protocol_entry(&protocol.name)
            .map(|entry| entry.setting.clone())
            .unwrap_or_default()
    }

    /// 协议可见性，目录无条目时默认可见
    pub fn resolve_public(asset: &Asset, protocol: &Protocol) -> bool {
        asset
            .platform
            .protocol_entry(&protocol.name)
            .map(|entry| entry.public)
            .unwrap_or(true)
    }

    /// ssh 目标端口，无 ssh 协议时回退 22
    pub fn resolve_target_port(asset: &Asset) -> u16 {
        asset
            .protocols
            .iter()
            .find(|p| p.name == "ssh")
            .map(|p| p.port)
            .unwrap_or(DEFAULT_SSH_PORT)
    }
}
