//! Node domain model
//!
//! 节点以 key 编码祖先路径，如 "1:2:5"；祖先集恒等于 key 的真前缀集，
//! 缓存只是加速，权威数据始终可由 key 重算。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// 节点路径分隔符
pub const KEY_SEPARATOR: &str = ":";

/// Hierarchy node (asset group)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Node {
    pub id: Uuid,
    pub org_id: Uuid,
    /// 祖先路径编码，如 "1:2:5"
    pub key: String,
    /// 显示名称
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Node {
    /// 计算祖先 key 集合
    ///
    /// 纯函数，仅依赖 key，无 I/O。无祖先的节点（组织根）返回空集或
    /// 仅含自身（with_self = true）。
    pub fn ancestor_keys(&self, with_self: bool) -> HashSet<String> {
        let segments: Vec<&str> = self.key.split(KEY_SEPARATOR).collect();
        let upper = if with_self {
            segments.len()
        } else {
            segments.len().saturating_sub(1)
        };

        let mut keys = HashSet::with_capacity(upper);
        for end in 1..=upper {
            keys.insert(segments[..end].join(KEY_SEPARATOR));
        }
        keys
    }

    /// 父节点 key；组织根没有父节点
    pub fn parent_key(&self) -> Option<String> {
        let (parent, _) = self.key.rsplit_once(KEY_SEPARATOR)?;
        Some(parent.to_string())
    }

    /// 节点层级，根为 1
    pub fn level(&self) -> usize {
        self.key.split(KEY_SEPARATOR).count()
    }

    /// 是否为组织根节点（key 无分隔符）
    pub fn is_org_root(&self) -> bool {
        !self.key.contains(KEY_SEPARATOR)
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.key, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(key: &str) -> Node {
        Node {
            id: Uuid::new_v4(),
            org_id: Uuid::new_v4(),
            key: key.to_string(),
            value: "test".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_ancestor_keys_with_self() {
        let keys = node("1:2:5").ancestor_keys(true);
        let expected: HashSet<String> =
            ["1", "1:2", "1:2:5"].iter().map(|s| s.to_string()).collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_ancestor_keys_without_self() {
        let keys = node("1:2:5").ancestor_keys(false);
        let expected: HashSet<String> = ["1", "1:2"].iter().map(|s| s.to_string()).collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_root_has_no_ancestors() {
        let root = node("1");
        assert!(root.is_org_root());
        assert!(root.ancestor_keys(false).is_empty());
        assert_eq!(
            root.ancestor_keys(true),
            ["1"].iter().map(|s| s.to_string()).collect::<HashSet<_>>()
        );
    }

    #[test]
    fn test_parent_key_and_level() {
        assert_eq!(node("1:2:5").parent_key(), Some("1:2".to_string()));
        assert_eq!(node("1").parent_key(), None);
        assert_eq!(node("1:2:5").level(), 3);
        assert_eq!(node("1").level(), 1);
    }
}
