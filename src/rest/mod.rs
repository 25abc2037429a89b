//! Resource objects for the Gitea REST API.
//!
//! This module turns JSON payloads into objects with named fields and tracks
//! changes to them:
//!
//! - **[`Descriptor`]**: the static field schema of a resource type
//! - **[`Resource`] trait**: name, schema, URL templates and identity of a type
//! - **[`MutableResource`] trait**: unlocks writes and commits
//! - **[`ApiObject<R>`]**: a materialized object
//! - **Path building**: URL templates per operation
//! - **[`ResourceError`]**: error types for resource operations
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use gitea_api::{BaseUrl, GiteaConfig, RestClient};
//! use gitea_api::rest::resources::Issue;
//!
//! let config = GiteaConfig::builder()
//!     .base_url(BaseUrl::new("https://gitea.example.com")?)
//!     .build()?;
//! let client = Arc::new(RestClient::new(&config)?);
//!
//! let mut issue = Issue::find(&client, "octo", "hello", 7).await?;
//! println!("{issue}: {}", issue.title()?);
//!
//! issue.set_title("Crash on empty input")?;
//! issue.commit().await?;
//!
//! issue.delete().await?;
//! assert!(issue.title().is_err());
//! ```

mod descriptor;
mod errors;
mod object;
mod path;
mod resource;
mod tracking;

pub mod resources;

// Public exports
pub use descriptor::{parse_datetime, parse_nested, Descriptor, FieldParseError, FieldParser, ParseFn};
pub use errors::ResourceError;
pub use object::{ApiObject, FieldTable};
pub use path::{
    build_path, fill_template, get_path, placeholders, resolve_path, ResourceOperation,
    ResourcePath,
};
pub use resource::{MutableResource, Resource};
