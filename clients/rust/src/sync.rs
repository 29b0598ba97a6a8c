use crate::{APIResponse, BaseClient};
use reqwest::StatusCode;
use sehat_saathi_api_structs::bulk_sync;
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone)]
pub struct SyncClient {
    base: Arc<BaseClient>,
}

impl SyncClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Uploads the writes a client recorded while offline
    pub async fn bulk(
        &self,
        items: Vec<bulk_sync::SyncItem>,
    ) -> APIResponse<bulk_sync::APIResponse> {
        let items = items
            .iter()
            .filter_map(|item| serde_json::to_value(item).ok())
            .collect();
        let body = bulk_sync::RequestBody {
            items: Some(Value::Array(items)),
        };
        self.base
            .post(body, "api/sync/bulk".into(), StatusCode::OK)
            .await
    }
}
