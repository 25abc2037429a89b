//! Resource type traits.
//!
//! A resource type is a marker type implementing [`Resource`]. It carries no
//! data itself; it describes how [`ApiObject<Self>`](ApiObject) is built from
//! a payload and addressed on the server:
//!
//! - `NAME`: the type name used in errors, logs and `Display`
//! - `DESCRIPTOR`: the static field schema
//! - `PATHS`: URL templates per operation
//! - `identity_key`: the server-side identity, required for every type
//!
//! Types whose objects can be changed also implement [`MutableResource`],
//! which unlocks `set`, `collect_dirty` and `commit` on their objects.
//!
//! # Example
//!
//! ```rust
//! use gitea_api::rest::{
//!     parse_datetime, Descriptor, FieldParser, FieldTable, MutableResource, Resource,
//!     ResourceError, ResourceOperation, ResourcePath,
//! };
//! use gitea_api::HttpMethod;
//!
//! pub enum Milestone {}
//!
//! impl Resource for Milestone {
//!     type Key = u64;
//!
//!     const NAME: &'static str = "Milestone";
//!     const DESCRIPTOR: Descriptor =
//!         Descriptor::new(&[FieldParser::new("due_on", parse_datetime)])
//!             .with_patchable(&["title", "due_on"]);
//!     const PATHS: &'static [ResourcePath] = &[ResourcePath::new(
//!         HttpMethod::Get,
//!         ResourceOperation::Find,
//!         &["owner", "repo", "id"],
//!         "repos/{owner}/{repo}/milestones/{id}",
//!     )];
//!
//!     fn identity_key(fields: &FieldTable) -> Result<Self::Key, ResourceError> {
//!         fields.identity("id")
//!     }
//! }
//!
//! // No commit: `commit()` fails with `ResourceError::CommitNotImplemented`.
//! impl MutableResource for Milestone {}
//! ```

use crate::rest::{ApiObject, Descriptor, FieldTable, ResourceError, ResourcePath};
use serde_json::Value;
use std::fmt::Debug;
use std::hash::Hash;

/// A Gitea API resource type.
pub trait Resource: Sized + Send + Sync + 'static {
    /// The server identity of an object. Equality and hashing use only this.
    type Key: Clone + Eq + Hash + Debug + Send + Sync;

    /// The type name (e.g., "Repository").
    const NAME: &'static str;

    /// The field schema.
    const DESCRIPTOR: Descriptor;

    /// URL templates per operation. Empty for types that are only ever
    /// materialized from other payloads.
    const PATHS: &'static [ResourcePath] = &[];

    /// Computes the identity key from the materialized fields.
    ///
    /// # Errors
    ///
    /// Implementations return [`ResourceError::IdentityContractMissing`] when
    /// the identity fields are absent; [`FieldTable::identity`] does this.
    fn identity_key(fields: &FieldTable) -> Result<Self::Key, ResourceError>;

    /// Returns the URL arguments addressing `object` on the server.
    ///
    /// The default collects every placeholder name of [`PATHS`](Self::PATHS)
    /// that is present and non-null among the object's fields.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ObjectInvalidated`] after deletion.
    fn path_args(object: &ApiObject<Self>) -> Result<Vec<(&'static str, Value)>, ResourceError> {
        let mut args: Vec<(&'static str, Value)> = Vec::new();

        for path in Self::PATHS {
            for id in path.ids {
                if args.iter().any(|(name, _)| name == id) || !object.has_field(id)? {
                    continue;
                }
                let value = object.get(id)?;
                if !value.is_null() {
                    args.push((*id, value.clone()));
                }
            }
        }

        Ok(args)
    }
}

/// A resource type whose objects can be modified and committed.
#[allow(async_fn_in_trait)]
pub trait MutableResource: Resource {
    /// Sends the pending changes of `object` to the server.
    ///
    /// Implementations are expected to go through
    /// [`ApiObject::commit_with`], which clears the dirty set only on
    /// success. The default fails with
    /// [`ResourceError::CommitNotImplemented`].
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::CommitNotImplemented`] unless overridden.
    async fn commit(object: &mut ApiObject<Self>) -> Result<(), ResourceError> {
        let _ = object;
        Err(ResourceError::CommitNotImplemented { resource: Self::NAME })
    }
}
