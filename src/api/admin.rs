//! Admin dashboard endpoints. Collections come back whole; filtering and
//! pagination happen client-side in [`crate::views`].

use super::models::{AdminUser, AdminVote, ApiMessage, DashboardStats};
use crate::http::{ApiClient, ClientError};

pub async fn stats(client: &ApiClient) -> Result<DashboardStats, ClientError> {
    client.get("/api/admin/stats/").await
}

pub async fn list_users(client: &ApiClient) -> Result<Vec<AdminUser>, ClientError> {
    client.get("/api/admin/users/").await
}

pub async fn list_votes(client: &ApiClient) -> Result<Vec<AdminVote>, ClientError> {
    client.get("/api/admin/votes/").await
}

pub async fn verify_vote(client: &ApiClient, vote_id: &str) -> Result<ApiMessage, ClientError> {
    let message = client
        .post(
            &format!("/api/admin/votes/{vote_id}/verify/"),
            &serde_json::json!({}),
        )
        .await?;
    tracing::debug!(vote_id, "Vote marked verified");
    Ok(message)
}

pub async fn delete_vote(client: &ApiClient, vote_id: &str) -> Result<(), ClientError> {
    client.delete(&format!("/api/admin/votes/{vote_id}/")).await?;
    tracing::debug!(vote_id, "Vote deleted");
    Ok(())
}

pub async fn verify_user(client: &ApiClient, user_id: &str) -> Result<ApiMessage, ClientError> {
    let message = client
        .post(
            &format!("/api/admin/users/{user_id}/verify/"),
            &serde_json::json!({}),
        )
        .await?;
    tracing::debug!(user_id, "User marked verified");
    Ok(message)
}
