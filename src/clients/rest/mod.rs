//! REST API client for Gitea.
//!
//! A thin layer over [`HttpClient`](crate::clients::HttpClient) offering
//! `get()`, `patch()` and `delete()` with path
//! normalization. [`RestClient`] is also the shared context handed to every
//! materialized resource object.
//!
//! # Path Normalization
//!
//! - Leading slashes are stripped: `/repos/octo/hello` -> `repos/octo/hello`
//! - Trailing slashes are stripped
//! - Empty paths are rejected with [`RestError::InvalidPath`]

mod client;
mod errors;

pub use client::RestClient;
pub use errors::RestError;
