//! chainvote-client - Typed async client for the ChainVote voting platform
//!
//! This crate wraps the platform's REST backend with:
//! - Bearer-token authentication with a single transparent refresh on 401
//! - A session state machine (login, logout, bootstrap from stored tokens)
//! - Registration, OTP verification, and password-reset form flows
//! - Client-side admin list views (filter, search, pagination, optimistic
//!   mutations over an already-fetched collection)
//! - A background blockchain-status poller
//!
//! Browser-only concerns sit behind traits: [`http::Navigator`] for forced
//! navigation and [`storage::TokenStore`] for token persistence.

pub mod api;
pub mod claims;
pub mod config;
pub mod flows;
pub mod http;
pub mod poll;
pub mod session;
pub mod storage;
#[cfg(test)]
pub mod testutil;
pub mod views;

pub use config::ClientConfig;
pub use http::{ApiClient, ClientError, Navigator, Route};
pub use session::{Session, SessionState};
