use serde::{Deserialize, Serialize};

pub mod get_service_health {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub status: String,
        pub message: String,
        /// ISO 8601 time the health check was answered
        pub timestamp: String,
    }
}
