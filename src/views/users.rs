//! Admin user list: verification filter plus name/email search, with
//! optimistic verify-user patching.

use super::{page_slice, search_matches, total_pages};
use crate::api::admin;
use crate::api::models::AdminUser;
use crate::http::{ApiClient, ClientError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerifiedFilter {
    #[default]
    All,
    Unverified,
    Verified,
}

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    /// Free-text search over name and email.
    pub search: String,
    pub verified: VerifiedFilter,
}

impl UserFilter {
    pub fn matches(&self, user: &AdminUser) -> bool {
        let verified_ok = match self.verified {
            VerifiedFilter::All => true,
            VerifiedFilter::Unverified => !user.is_verified,
            VerifiedFilter::Verified => user.is_verified,
        };
        verified_ok && search_matches(&self.search, &[&user.name, &user.email])
    }
}

pub struct UserListView {
    pub filter: UserFilter,
    page_size: usize,
    users: Vec<AdminUser>,
}

impl UserListView {
    pub fn new(users: Vec<AdminUser>, page_size: usize) -> Self {
        Self {
            filter: UserFilter::default(),
            page_size,
            users,
        }
    }

    pub async fn fetch(client: &ApiClient, page_size: usize) -> Result<Self, ClientError> {
        let users = admin::list_users(client).await?;
        tracing::debug!(count = users.len(), "Fetched admin user collection");
        Ok(Self::new(users, page_size))
    }

    pub fn visible(&self) -> Vec<&AdminUser> {
        self.users.iter().filter(|u| self.filter.matches(u)).collect()
    }

    /// 1-based page of the filtered list.
    pub fn page(&self, page: usize) -> Vec<&AdminUser> {
        page_slice(self.visible(), page, self.page_size)
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.visible().len(), self.page_size)
    }

    /// Verify on the server, then patch the in-memory user — no refetch.
    pub async fn verify(&mut self, client: &ApiClient, user_id: &str) -> Result<(), ClientError> {
        admin::verify_user(client, user_id).await?;
        if let Some(user) = self.users.iter_mut().find(|u| u.id == user_id) {
            user.is_verified = true;
        }
        Ok(())
    }
}
