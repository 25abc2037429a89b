//! Error types for resource objects.
//!
//! Four errors come from the object model itself and always point at a
//! caller or schema bug, never at a transient condition:
//!
//! - [`ResourceError::ObjectInvalidated`]: a field was read or written after delete
//! - [`ResourceError::SchemaConflict`]: a field name was installed twice
//! - [`ResourceError::IdentityContractMissing`]: identity was needed but is unavailable
//! - [`ResourceError::CommitNotImplemented`]: the type has no commit
//!
//! Transport failures are wrapped in [`ResourceError::Http`] or
//! [`ResourceError::Rest`] and are otherwise passed through untouched.
//!
//! # Example
//!
//! ```rust,ignore
//! use gitea_api::rest::ResourceError;
//!
//! match issue.set("title", "bugfix") {
//!     Ok(()) => {}
//!     Err(ResourceError::ObjectInvalidated { resource }) => {
//!         eprintln!("{resource} was deleted");
//!     }
//!     Err(e) => return Err(e),
//! }
//! ```

use crate::clients::{HttpError, RestError};
use thiserror::Error;

/// Error type for resource object operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// A field was read or written after the object was deleted.
    #[error("{resource} object has been deleted and can no longer be used")]
    ObjectInvalidated {
        /// The type name of the resource (e.g., "Issue").
        resource: &'static str,
    },

    /// A field name was installed on an object that already carries it.
    #[error("Field '{field}' already exists on {resource} object")]
    SchemaConflict {
        /// The type name of the resource.
        resource: &'static str,
        /// The conflicting field name.
        field: String,
    },

    /// An identity-sensitive operation (equality, hashing, `identity_key`)
    /// ran on an object whose identity fields were absent from its payload.
    #[error("{resource} identity field '{field}' is missing or null")]
    IdentityContractMissing {
        /// The type name of the resource.
        resource: &'static str,
        /// The identity field that could not be read.
        field: &'static str,
    },

    /// `commit` was called on a resource type without a commit implementation.
    #[error("{resource} does not implement commit")]
    CommitNotImplemented {
        /// The type name of the resource.
        resource: &'static str,
    },

    /// A field that was never installed was accessed.
    #[error("{resource} has no field '{field}'")]
    UnknownField {
        /// The type name of the resource.
        resource: &'static str,
        /// The requested field name.
        field: String,
    },

    /// A write was attempted on a field that is not patchable.
    #[error("Field '{field}' of {resource} is read-only")]
    ReadOnlyField {
        /// The type name of the resource.
        resource: &'static str,
        /// The field name.
        field: String,
    },

    /// A field parser rejected the raw payload value.
    #[error("Failed to parse field '{field}' of {resource}: {reason}")]
    FieldParse {
        /// The type name of the resource.
        resource: &'static str,
        /// The field name.
        field: String,
        /// Why parsing failed.
        reason: String,
    },

    /// A stored value could not be converted to the requested Rust type.
    #[error("Field '{field}' of {resource} has an unexpected type: {source}")]
    FieldType {
        /// The type name of the resource.
        resource: &'static str,
        /// The field name.
        field: String,
        /// The underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },

    /// The response payload was not a JSON object.
    #[error("Expected a JSON object payload for {resource}, got {found}")]
    InvalidPayload {
        /// The type name of the resource.
        resource: &'static str,
        /// The JSON kind that was received.
        found: &'static str,
    },

    /// A URL template placeholder had no matching argument.
    #[error("Missing path argument '{argument}' for {resource}")]
    MissingPathArgument {
        /// The type name of the resource.
        resource: &'static str,
        /// The placeholder name.
        argument: String,
    },

    /// No path is declared for the requested operation.
    #[error("Cannot resolve path for {resource}::{operation}")]
    PathResolutionFailed {
        /// The type name of the resource.
        resource: &'static str,
        /// The operation being attempted (e.g., "find", "update", "delete").
        operation: &'static str,
    },

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A REST-level error occurred.
    #[error(transparent)]
    Rest(#[from] RestError),
}

impl ResourceError {
    /// Returns `true` for errors raised by the transport rather than by the
    /// object model.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Rest(_))
    }
}

/// Returns a short name for the JSON kind of a value, for error messages.
pub(crate) const fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::HttpResponseError;
    use serde_json::json;

    #[test]
    fn test_object_invalidated_message() {
        let error = ResourceError::ObjectInvalidated { resource: "Issue" };
        assert!(error.to_string().contains("Issue"));
        assert!(error.to_string().contains("deleted"));
    }

    #[test]
    fn test_schema_conflict_message_names_field() {
        let error = ResourceError::SchemaConflict {
            resource: "Repository",
            field: "name".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Field 'name' already exists on Repository object"
        );
    }

    #[test]
    fn test_transport_errors_are_flagged() {
        let error: ResourceError = RestError::InvalidPath {
            path: String::new(),
        }
        .into();
        assert!(error.is_transport());

        let error: ResourceError = HttpError::Response(HttpResponseError {
            code: 404,
            message: "Not Found".to_string(),
            url: None,
        })
        .into();
        assert!(error.is_transport());
        assert_eq!(error.to_string(), "HTTP 404: Not Found");

        assert!(!ResourceError::CommitNotImplemented { resource: "User" }.is_transport());
    }

    #[test]
    fn test_json_kind() {
        assert_eq!(json_kind(&json!(null)), "null");
        assert_eq!(json_kind(&json!([1])), "array");
        assert_eq!(json_kind(&json!({})), "object");
        assert_eq!(json_kind(&json!("x")), "string");
    }
}
