//! Mutation tracking for writable objects.
//!
//! Objects of a [`MutableResource`] type keep a dirty set: the names of
//! patchable fields written since materialization or since the last
//! successful commit.
//!
//! ```text
//! Clean --set--> Dirty --commit ok--> Clean
//!                  |  \--commit err--> Dirty (unchanged)
//! any ---delete---> Deleted (terminal)
//! ```
//!
//! Writes store the new value unconditionally. Writing the value a field
//! already holds still marks it dirty.
//!
//! # Example
//!
//! ```rust,ignore
//! use gitea_api::rest::{ApiObject, resources::Repository};
//!
//! let mut repo = Repository::find(&client, "octo", "hello").await?;
//! repo.set("description", "Hello again")?;
//! repo.set("website", "https://octo.example.com")?;
//!
//! assert!(repo.is_dirty());
//! let changes = repo.collect_dirty()?; // {"description": ..., "website": ...}
//!
//! repo.commit().await?; // PATCH repos/octo/hello
//! assert!(!repo.is_dirty());
//! ```

use crate::rest::{resolve_path, ApiObject, MutableResource, ResourceError, ResourceOperation};
use serde_json::{Map, Value};
use std::future::Future;
use std::sync::Arc;

impl<R: MutableResource> ApiObject<R> {
    /// Writes a patchable field and marks it dirty.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ObjectInvalidated`] after deletion,
    /// [`ResourceError::UnknownField`] if no such field is installed and
    /// [`ResourceError::ReadOnlyField`] if the field is not patchable.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), ResourceError> {
        self.ensure_live()?;

        if !self.fields.contains(name) {
            return Err(ResourceError::UnknownField {
                resource: R::NAME,
                field: name.to_string(),
            });
        }
        if !self.fields.is_writable(name) {
            return Err(ResourceError::ReadOnlyField {
                resource: R::NAME,
                field: name.to_string(),
            });
        }

        self.fields.store(name, value.into());
        self.dirty.insert(name.to_string());
        Ok(())
    }

    /// Returns `true` if any field was written since the last successful commit.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Returns the names of dirty fields in sorted order.
    pub fn dirty_fields(&self) -> impl Iterator<Item = &str> {
        self.dirty.iter().map(String::as_str)
    }

    /// Returns a fresh map of the current values of all dirty fields.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ObjectInvalidated`] after deletion.
    pub fn collect_dirty(&self) -> Result<Map<String, Value>, ResourceError> {
        self.ensure_live()?;

        Ok(self
            .dirty
            .iter()
            .filter_map(|name| {
                self.fields
                    .get(name)
                    .map(|value| (name.clone(), value.clone()))
            })
            .collect())
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty.clear();
    }

    /// Sends the pending changes through `send` and clears the dirty set when
    /// it succeeds.
    ///
    /// Nothing is sent when no field is dirty. When `send` fails the dirty
    /// set is left exactly as it was, so the same changes can be retried.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ObjectInvalidated`] after deletion and the
    /// error of `send` unchanged.
    pub async fn commit_with<F, Fut>(&mut self, send: F) -> Result<(), ResourceError>
    where
        F: FnOnce(Map<String, Value>) -> Fut,
        Fut: Future<Output = Result<(), ResourceError>>,
    {
        let changes = self.collect_dirty()?;
        if changes.is_empty() {
            tracing::debug!(resource = R::NAME, "No dirty fields, skipping commit");
            return Ok(());
        }

        let count = changes.len();
        match send(changes).await {
            Ok(()) => {
                tracing::debug!(
                    resource = R::NAME,
                    fields = count,
                    "Committed {} changes",
                    R::NAME
                );
                self.mark_clean();
                Ok(())
            }
            Err(error) => {
                tracing::warn!(
                    resource = R::NAME,
                    error = %error,
                    "Commit failed, keeping dirty fields"
                );
                Err(error)
            }
        }
    }

    /// Sends the pending changes as a PATCH to `R`'s update path.
    ///
    /// The response body is not merged back into the object.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] if `R` has no update
    /// path, [`ResourceError::MissingPathArgument`] if the object does not
    /// carry its URL arguments, and transport errors unchanged.
    pub async fn commit_patch(&mut self) -> Result<(), ResourceError> {
        self.ensure_live()?;
        if !self.is_dirty() {
            tracing::debug!(resource = R::NAME, "No dirty fields, skipping commit");
            return Ok(());
        }

        let args = R::path_args(self)?;
        let (_, path) = resolve_path(R::NAME, R::PATHS, ResourceOperation::Update, &args)?;
        let client = Arc::clone(self.client());

        self.commit_with(|changes| async move {
            client
                .patch(&path, Value::Object(changes))
                .await
                .map(|_| ())
                .map_err(ResourceError::from)
        })
        .await
    }

    /// Commits the pending changes the way `R` defines.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::CommitNotImplemented`] if `R` does not define
    /// a commit, and otherwise the error of [`MutableResource::commit`].
    pub async fn commit(&mut self) -> Result<(), ResourceError> {
        R::commit(self).await
    }
}
