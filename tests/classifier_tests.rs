//! 凭据类型分类测试

use inventory_system::models::types::SecretType;
use inventory_system::repository::MemoryInventoryStore;
use inventory_system::services::SecretTypeClassifier;
use std::sync::Arc;
use uuid::Uuid;

mod common;
use common::{linux_platform, make_asset, make_protocol};

#[tokio::test]
async fn test_password_matches_ssh_but_not_vnc_asset() {
    let store = Arc::new(MemoryInventoryStore::new());
    let org_id = Uuid::new_v4();

    let mut a1 = make_asset(org_id, "a1", linux_platform());
    a1.protocols = vec![make_protocol("ssh", 22)];
    let mut a2 = make_asset(org_id, "a2", linux_platform());
    a2.protocols = vec![make_protocol("vnc", 5900)];
    store.insert_asset(a1.clone());
    store.insert_asset(a2.clone());

    let classifier = SecretTypeClassifier::new(store.clone());
    let assets = classifier
        .get_assets_by_secret_type(&[a1.id, a2.id], SecretType::Password)
        .await
        .unwrap();

    assert_eq!(assets.len(), 1);
    assert_eq!(assets[0].id, a1.id);
}

#[tokio::test]
async fn test_ssh_asset_matches_both_password_and_ssh_key() {
    let store = Arc::new(MemoryInventoryStore::new());
    let org_id = Uuid::new_v4();

    let mut a1 = make_asset(org_id, "a1", linux_platform());
    a1.protocols = vec![make_protocol("ssh", 22)];
    store.insert_asset(a1.clone());

    let classifier = SecretTypeClassifier::new(store.clone());
    for secret_type in [SecretType::Password, SecretType::SshKey] {
        let assets = classifier
            .get_assets_by_secret_type(&[a1.id], secret_type)
            .await
            .unwrap();
        assert_eq!(assets.len(), 1, "expected match for {}", secret_type);
    }
}

#[tokio::test]
async fn test_vnc_asset_matches_vnc_password() {
    let store = Arc::new(MemoryInventoryStore::new());
    let org_id = Uuid::new_v4();

    let mut a2 = make_asset(org_id, "a2", linux_platform());
    a2.protocols = vec![make_protocol("vnc", 5900)];
    store.insert_asset(a2.clone());

    let classifier = SecretTypeClassifier::new(store.clone());
    let assets = classifier
        .get_assets_by_secret_type(&[a2.id], SecretType::VncPassword)
        .await
        .unwrap();
    assert_eq!(assets.len(), 1);
}

#[tokio::test]
async fn test_unknown_protocol_matches_nothing() {
    let store = Arc::new(MemoryInventoryStore::new());
    let org_id = Uuid::new_v4();

    let mut asset = make_asset(org_id, "a1", linux_platform());
    asset.protocols = vec![make_protocol("gopher", 70)];
    store.insert_asset(asset.clone());

    let classifier = SecretTypeClassifier::new(store.clone());
    let assets = classifier
        .get_assets_by_secret_type(&[asset.id], SecretType::Password)
        .await
        .unwrap();
    assert!(assets.is_empty());
}

#[tokio::test]
async fn test_asset_without_protocols_matches_nothing() {
    let store = Arc::new(MemoryInventoryStore::new());
    let org_id = Uuid::new_v4();

    let asset = make_asset(org_id, "bare", linux_platform());
    store.insert_asset(asset.clone());

    let classifier = SecretTypeClassifier::new(store.clone());
    let assets = classifier
        .get_assets_by_secret_type(&[asset.id], SecretType::Password)
        .await
        .unwrap();
    assert!(assets.is_empty());
}

#[tokio::test]
async fn test_empty_id_set_yields_empty_result() {
    let store = Arc::new(MemoryInventoryStore::new());
    let classifier = SecretTypeClassifier::new(store);
    let assets = classifier
        .get_assets_by_secret_type(&[], SecretType::Password)
        .await
        .unwrap();
    assert!(assets.is_empty());
}
