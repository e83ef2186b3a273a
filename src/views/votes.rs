//! Admin vote list: status/election/search filters over the fetched
//! collection, fixed-size pages, and optimistic verify/delete.

use super::{page_slice, search_matches, total_pages};
use crate::api::admin;
use crate::api::models::AdminVote;
use crate::http::{ApiClient, ClientError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Verified,
}

/// Combined filters are a logical AND.
#[derive(Debug, Clone, Default)]
pub struct VoteFilter {
    pub election_id: Option<String>,
    /// Free-text search over voter email and election name.
    pub search: String,
    pub status: StatusFilter,
}

impl VoteFilter {
    pub fn matches(&self, vote: &AdminVote) -> bool {
        let status_ok = match self.status {
            StatusFilter::All => true,
            StatusFilter::Pending => !vote.is_verified,
            StatusFilter::Verified => vote.is_verified,
        };
        let election_ok = self
            .election_id
            .as_deref()
            .is_none_or(|id| vote.election_id == id);
        status_ok
            && election_ok
            && search_matches(&self.search, &[&vote.voter_email, &vote.election_name])
    }
}

pub struct VoteListView {
    pub filter: VoteFilter,
    page_size: usize,
    votes: Vec<AdminVote>,
}

impl VoteListView {
    pub fn new(votes: Vec<AdminVote>, page_size: usize) -> Self {
        Self {
            filter: VoteFilter::default(),
            page_size,
            votes,
        }
    }

    /// Fetch the full collection once and build a view over it.
    pub async fn fetch(client: &ApiClient, page_size: usize) -> Result<Self, ClientError> {
        let votes = admin::list_votes(client).await?;
        tracing::debug!(count = votes.len(), "Fetched admin vote collection");
        Ok(Self::new(votes, page_size))
    }

    /// All votes passing the current filters, in fetch order.
    pub fn visible(&self) -> Vec<&AdminVote> {
        self.votes.iter().filter(|v| self.filter.matches(v)).collect()
    }

    /// 1-based page of the filtered list.
    pub fn page(&self, page: usize) -> Vec<&AdminVote> {
        page_slice(self.visible(), page, self.page_size)
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.visible().len(), self.page_size)
    }

    /// Verify on the server, then patch the in-memory vote — no refetch.
    pub async fn verify(&mut self, client: &ApiClient, vote_id: &str) -> Result<(), ClientError> {
        admin::verify_vote(client, vote_id).await?;
        if let Some(vote) = self.votes.iter_mut().find(|v| v.id == vote_id) {
            vote.is_verified = true;
        }
        Ok(())
    }

    /// Delete on the server, then drop the in-memory vote — no refetch.
    pub async fn delete(&mut self, client: &ApiClient, vote_id: &str) -> Result<(), ClientError> {
        admin::delete_vote(client, vote_id).await?;
        self.votes.retain(|v| v.id != vote_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{test_client, MockBackend};
    use chrono::Utc;

    fn make_vote(id: &str, email: &str, election: &str, verified: bool) -> AdminVote {
        AdminVote {
            cast_at: Utc::now(),
            election_id: election.to_string(),
            election_name: format!("Election {election}"),
            id: id.to_string(),
            is_verified: verified,
            tx_hash: verified.then(|| format!("0x{id}")),
            voter_email: email.to_string(),
        }
    }

    fn sample_view() -> VoteListView {
        VoteListView::new(
            vec![
                make_vote("v1", "ada@example.org", "e1", true),
                make_vote("v2", "bob@example.org", "e1", false),
                make_vote("v3", "ada@example.org", "e2", true),
                make_vote("v4", "cam@example.org", "e2", false),
            ],
            2,
        )
    }

    #[test]
    fn test_verified_filter_is_exact_subset() {
        let mut view = sample_view();
        view.filter.status = StatusFilter::Verified;

        let visible = view.visible();
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|v| v.is_verified));

        view.filter.status = StatusFilter::Pending;
        let visible = view.visible();
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().all(|v| !v.is_verified));
    }

    #[test]
    fn test_election_and_search_filters_and_together() {
        let mut view = sample_view();
        view.filter.election_id = Some("e2".to_string());
        view.filter.search = "ada".to_string();

        let visible = view.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "v3");
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let mut view = sample_view();
        view.filter.search = "ADA@Example".to_string();
        assert_eq!(view.visible().len(), 2);
    }

    #[test]
    fn test_pagination_slices_filtered_list() {
        let view = sample_view();
        assert_eq!(view.total_pages(), 2);
        assert_eq!(view.page(1).len(), 2);
        assert_eq!(view.page(2).len(), 2);
        assert_eq!(view.page(1)[0].id, "v1");
        assert_eq!(view.page(2)[0].id, "v3");
        assert!(view.page(3).is_empty());
    }

    #[test]
    fn test_empty_collection_has_one_empty_page() {
        let view = VoteListView::new(vec![], 10);
        assert_eq!(view.total_pages(), 1);
        assert!(view.page(1).is_empty());
    }

    #[tokio::test]
    async fn test_verify_patches_in_memory_without_refetch() {
        let backend = MockBackend::spawn().await;
        let (client, _nav) = test_client(&backend);
        client
            .store()
            .set_tokens(&backend.current_access(), "refresh-ok")
            .unwrap();

        let mut view = VoteListView::fetch(&client, 10).await.unwrap();
        assert_eq!(view.visible().len(), 2);
        assert!(!view.visible()[1].is_verified);

        view.verify(&client, "v2").await.unwrap();
        assert!(view.visible()[1].is_verified);

        view.delete(&client, "v1").await.unwrap();
        assert_eq!(view.visible().len(), 1);
        assert_eq!(view.visible()[0].id, "v2");
    }
}
