//! Election browsing endpoints.

use super::models::{Election, ElectionResults};
use crate::http::{ApiClient, ClientError};

pub async fn list(client: &ApiClient) -> Result<Vec<Election>, ClientError> {
    client.get("/api/elections/").await
}

pub async fn detail(client: &ApiClient, election_id: &str) -> Result<Election, ClientError> {
    client.get(&format!("/api/elections/{election_id}/")).await
}

/// Server-computed results for a closed (or running) election.
pub async fn results(
    client: &ApiClient,
    election_id: &str,
) -> Result<ElectionResults, ClientError> {
    client
        .get(&format!("/api/elections/{election_id}/results/"))
        .await
}
