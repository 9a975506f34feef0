use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::config::StorageConfig;

/// Storage configuration snapshot for operators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DebugInfoDto {
    pub has_access_key: bool,
    pub has_secret_key: bool,
    /// Configured region, not a secret
    #[schema(example = "us-west-2")]
    pub region: Option<String>,
}

impl From<&StorageConfig> for DebugInfoDto {
    fn from(config: &StorageConfig) -> Self {
        Self {
            has_access_key: config.access_key_id.is_some(),
            has_secret_key: config.secret_access_key.is_some(),
            region: config.region.clone(),
        }
    }
}
