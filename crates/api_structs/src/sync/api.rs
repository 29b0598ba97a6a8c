use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod bulk_sync {
    use super::*;

    /// One write recorded by a client while it was offline
    #[derive(Debug, Clone, Deserialize, Serialize)]
    pub struct SyncItem {
        /// Client side id, only echoed back in errors
        pub id: Option<Value>,
        #[serde(rename = "type")]
        pub kind: String,
        #[serde(default)]
        pub data: Value,
    }

    /// Items are kept as raw JSON so that one malformed entry is reported on
    /// its own instead of rejecting the whole batch
    #[derive(Debug, Deserialize, Serialize)]
    pub struct RequestBody {
        pub items: Option<Value>,
    }

    #[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
    pub struct SyncError {
        pub id: Option<Value>,
        pub error: String,
    }

    #[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
    pub struct SyncResults {
        pub success: usize,
        pub failed: usize,
        pub skipped: usize,
        pub errors: Vec<SyncError>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub success: bool,
        pub message: String,
        pub results: SyncResults,
    }

    impl APIResponse {
        pub fn new(results: SyncResults) -> Self {
            Self {
                success: true,
                message: format!(
                    "Synced {} items. Failed: {}",
                    results.success, results.failed
                ),
                results,
            }
        }
    }
}
