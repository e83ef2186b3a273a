//! Blockchain status endpoints. The chain itself is out of scope; the client
//! only surfaces what the backend reports.

use super::models::{ApiMessage, ChainStatus, TamperCheck};
use crate::http::{ApiClient, ClientError};

pub async fn status(client: &ApiClient) -> Result<ChainStatus, ClientError> {
    client.get("/api/blockchain/status/").await
}

/// Ask the backend to sync its view of the chain now.
pub async fn trigger_sync(client: &ApiClient) -> Result<ApiMessage, ClientError> {
    client
        .post("/api/blockchain/sync/", &serde_json::json!({}))
        .await
}

pub async fn tamper_check(client: &ApiClient) -> Result<TamperCheck, ClientError> {
    client.get("/api/blockchain/tamper-check/").await
}
