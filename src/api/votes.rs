//! Vote casting, receipts, and verification endpoints.

use serde::Serialize;

use super::models::{MerkleVerification, Vote};
use crate::http::{ApiClient, ClientError};

#[derive(Debug, Serialize)]
struct CastVoteRequest<'a> {
    candidate_id: &'a str,
    election_id: &'a str,
}

pub async fn cast(
    client: &ApiClient,
    election_id: &str,
    candidate_id: &str,
) -> Result<Vote, ClientError> {
    let vote: Vote = client
        .post(
            "/api/votes/",
            &CastVoteRequest {
                candidate_id,
                election_id,
            },
        )
        .await?;
    tracing::info!(vote_id = %vote.id, election_id, "Vote cast");
    Ok(vote)
}

pub async fn list_mine(client: &ApiClient) -> Result<Vec<Vote>, ClientError> {
    client.get("/api/votes/").await
}

pub async fn detail(client: &ApiClient, vote_id: &str) -> Result<Vote, ClientError> {
    client.get(&format!("/api/votes/{vote_id}/")).await
}

/// Ask the server to re-check the vote against its on-chain transaction.
pub async fn verify(client: &ApiClient, vote_id: &str) -> Result<Vote, ClientError> {
    client
        .post(&format!("/api/votes/{vote_id}/verify/"), &serde_json::json!({}))
        .await
}

/// Server-side Merkle inclusion check; the client only displays pass/fail.
pub async fn merkle_verify(
    client: &ApiClient,
    vote_id: &str,
) -> Result<MerkleVerification, ClientError> {
    client
        .get(&format!("/api/votes/{vote_id}/merkle-verify/"))
        .await
}

/// Direct URL for the PDF receipt, with the access token embedded as a path
/// segment. The receipt is opened in a new tab rather than fetched through
/// the authenticated client, so the token must ride in the URL.
pub fn receipt_url(client: &ApiClient, vote_id: &str) -> Result<String, ClientError> {
    let access = client
        .store()
        .get_access()?
        .ok_or(ClientError::Unauthenticated)?;
    Ok(format!(
        "{}/api/votes/{vote_id}/receipt/{access}/",
        client.base_url()
    ))
}
