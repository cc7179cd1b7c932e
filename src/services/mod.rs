//! Business logic services layer

pub mod hierarchy_service;
pub mod info_service;
pub mod protocol_service;
pub mod secret_service;

pub use hierarchy_service::NodeHierarchy;
pub use info_service::AssetInfoAggregator;
pub use protocol_service::ProtocolResolver;
pub use secret_service::SecretTypeClassifier;
