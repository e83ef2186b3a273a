//! Typed wrappers over the platform's REST endpoints.
//!
//! Each submodule is a thin layer: build the request, hand it to
//! [`crate::ApiClient`], deserialize the documented response shape. All
//! business logic (tallying, proof checking, tamper detection) stays
//! server-side; these calls only move its results.

pub mod admin;
pub mod auth;
pub mod blockchain;
pub mod elections;
pub mod models;
pub mod votes;
