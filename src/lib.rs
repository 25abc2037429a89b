//! # Gitea API Rust Client
//!
//! A Rust client for the Gitea REST API built around materialized resource
//! objects: JSON payloads become objects with named, typed fields, and
//! changes to the writable ones are tracked and committed as partial updates.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`GiteaConfig`] and [`GiteaConfigBuilder`]
//! - Validated newtypes for the instance URL and access token
//! - An async HTTP client and a [`RestClient`] on top of it
//! - Static field descriptors with per-field parsers ([`rest::Descriptor`])
//! - Read-only and mutable resource objects ([`rest::ApiObject`])
//! - Dirty-field tracking with commit-on-demand
//! - [`rest::resources::User`], [`rest::resources::Repository`] and
//!   [`rest::resources::Issue`]
//!
//! ## Quick Start
//!
//! ```rust
//! use gitea_api::{AccessToken, BaseUrl, GiteaConfig};
//!
//! let config = GiteaConfig::builder()
//!     .base_url(BaseUrl::new("https://gitea.example.com").unwrap())
//!     .access_token(AccessToken::new("0123456789abcdef").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_path(), "/api/v1");
//! ```
//!
//! ## Reading and Changing Resources
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use gitea_api::RestClient;
//! use gitea_api::rest::resources::Repository;
//!
//! let client = Arc::new(RestClient::new(&config)?);
//!
//! let mut repo = Repository::find(&client, "octo", "hello").await?;
//! println!("{repo}: {:?}", repo.description()?);
//!
//! repo.set_description("Say hello")?;
//! repo.commit().await?; // PATCH with {"description": "Say hello"}
//! ```
//!
//! ## Errors
//!
//! Object model failures are reported as [`rest::ResourceError`]. Transport
//! failures are passed through unchanged inside it; nothing is retried.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Explicit commits**: Writes stay local until `commit` is called

pub mod clients;
pub mod config;
pub mod error;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{AccessToken, BaseUrl, GiteaConfig, GiteaConfigBuilder};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    DataType, HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, RestClient, RestError,
};

// Re-export resource object types
pub use rest::{ApiObject, MutableResource, Resource, ResourceError};
