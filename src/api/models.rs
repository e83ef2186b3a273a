use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated user, from `/api/profile/` or decoded token claims.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    pub id: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub name: String,
}

/// Access/refresh pair returned by a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Generic acknowledgement body (`{"message": "..."}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

/// A candidate within an election.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub party: Option<String>,
}

/// An election as listed and browsed by voters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Election {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub description: String,
    pub end_time: DateTime<Utc>,
    pub id: String,
    pub is_active: bool,
    pub start_time: DateTime<Utc>,
    pub title: String,
}

/// Server-computed per-candidate tally. Displayed, never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateTally {
    pub candidate_id: String,
    pub candidate_name: String,
    pub vote_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElectionResults {
    pub election_id: String,
    pub tallies: Vec<CandidateTally>,
    pub total_votes: u64,
}

/// One of the caller's own votes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    pub cast_at: DateTime<Utc>,
    pub election_id: String,
    #[serde(default)]
    pub election_name: String,
    pub id: String,
    pub is_verified: bool,
    /// On-chain transaction hash, present once the vote is anchored.
    #[serde(default)]
    pub tx_hash: Option<String>,
}

/// Result of a server-side Merkle inclusion check for a vote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerkleVerification {
    #[serde(default)]
    pub merkle_root: Option<String>,
    pub verified: bool,
}

/// A vote as seen in the admin dashboard (includes the voter).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminVote {
    pub cast_at: DateTime<Utc>,
    pub election_id: String,
    #[serde(default)]
    pub election_name: String,
    pub id: String,
    pub is_verified: bool,
    #[serde(default)]
    pub tx_hash: Option<String>,
    pub voter_email: String,
}

/// A user as seen in the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    pub date_joined: DateTime<Utc>,
    pub email: String,
    pub id: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub is_staff: bool,
    pub is_verified: bool,
    #[serde(default)]
    pub name: String,
}

/// Aggregate counts for the admin dashboard header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub pending_votes: u64,
    pub total_elections: u64,
    pub total_users: u64,
    pub total_votes: u64,
    pub verified_votes: u64,
}

/// Blockchain sync status as reported by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainStatus {
    pub block_height: u64,
    pub connected: bool,
    #[serde(default)]
    pub contract_address: Option<String>,
    pub last_synced_block: u64,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub pending_transactions: u64,
}

/// Result of the server-side tamper check over stored votes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TamperCheck {
    pub checked_votes: u64,
    #[serde(default)]
    pub details: Option<String>,
    pub tampered: bool,
}
