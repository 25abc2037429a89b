//! URL templates for resource operations.
//!
//! Each resource type declares a table of [`ResourcePath`]s. A template such
//! as `repos/{owner}/{repo}/issues/{index}` is selected per operation and
//! filled from the identifier arguments of a request.
//!
//! # Path Resolution
//!
//! When several paths serve the same operation, the most specific one whose
//! placeholders are all available wins.
//!
//! # Example
//!
//! ```rust
//! use gitea_api::rest::{build_path, get_path, ResourceOperation, ResourcePath};
//! use gitea_api::HttpMethod;
//! use std::collections::HashMap;
//!
//! const PATHS: &[ResourcePath] = &[
//!     ResourcePath::new(
//!         HttpMethod::Get,
//!         ResourceOperation::Find,
//!         &["owner", "repo"],
//!         "repos/{owner}/{repo}",
//!     ),
//!     ResourcePath::new(HttpMethod::Get, ResourceOperation::Find, &["id"], "repositories/{id}"),
//! ];
//!
//! let path = get_path(PATHS, ResourceOperation::Find, &["owner", "repo"]).unwrap();
//!
//! let mut ids = HashMap::new();
//! ids.insert("owner", "octo");
//! ids.insert("repo", "hello world");
//! assert_eq!(build_path(path.template, &ids), "repos/octo/hello%20world");
//! ```

use crate::clients::HttpMethod;
use crate::rest::ResourceError;
use std::collections::HashMap;
use std::fmt::Display;

/// Operations that can be performed on a remote resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// Fetch a single resource (GET).
    Find,
    /// Send a partial update (PATCH).
    Update,
    /// Delete a resource (DELETE).
    Delete,
}

impl ResourceOperation {
    /// Returns the default HTTP method for this operation.
    #[must_use]
    pub const fn default_http_method(&self) -> HttpMethod {
        match self {
            Self::Find => HttpMethod::Get,
            Self::Update => HttpMethod::Patch,
            Self::Delete => HttpMethod::Delete,
        }
    }

    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Find => "find",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// A path configuration for one resource operation.
///
/// Templates use `{name}` placeholders, one per entry of `ids`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePath {
    /// The HTTP method for this path.
    pub http_method: HttpMethod,
    /// The operation this path is used for.
    pub operation: ResourceOperation,
    /// Placeholder names required by the template, in order.
    pub ids: &'static [&'static str],
    /// The URL template with `{name}` placeholders.
    pub template: &'static str,
}

impl ResourcePath {
    /// Creates a new `ResourcePath`.
    #[must_use]
    pub const fn new(
        http_method: HttpMethod,
        operation: ResourceOperation,
        ids: &'static [&'static str],
        template: &'static str,
    ) -> Self {
        Self {
            http_method,
            operation,
            ids,
            template,
        }
    }

    /// Returns the number of required IDs for this path.
    #[must_use]
    pub const fn id_count(&self) -> usize {
        self.ids.len()
    }

    /// Checks if all required IDs are available.
    #[must_use]
    pub fn matches_ids(&self, available_ids: &[&str]) -> bool {
        self.ids.iter().all(|id| available_ids.contains(id))
    }
}

/// Selects the most specific path for an operation whose IDs are all available.
#[must_use]
pub fn get_path<'a>(
    paths: &'a [ResourcePath],
    operation: ResourceOperation,
    available_ids: &[&str],
) -> Option<&'a ResourcePath> {
    paths
        .iter()
        .filter(|p| p.operation == operation)
        .filter(|p| p.matches_ids(available_ids))
        .max_by_key(|p| p.id_count())
}

/// Builds a URL from a template by interpolating percent-encoded IDs.
///
/// Placeholders without a matching entry are left untouched; use
/// [`fill_template`] when a complete path is required.
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn build_path<V: Display>(template: &str, ids: &HashMap<&str, V>) -> String {
    let mut result = template.to_string();

    for (key, value) in ids {
        let placeholder = format!("{{{key}}}");
        let encoded = urlencoding::encode(&value.to_string()).into_owned();
        result = result.replace(&placeholder, &encoded);
    }

    result
}

/// Returns the placeholder names of a template in order of appearance.
#[must_use]
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            break;
        };
        names.push(&after[..end]);
        rest = &after[end + 1..];
    }
    names
}

/// Fills every placeholder of `template` from `args`.
///
/// String values are inserted verbatim (percent-encoded); other JSON values
/// use their JSON text, so `7` becomes `7`.
///
/// # Errors
///
/// Returns [`ResourceError::MissingPathArgument`] for the first placeholder
/// without a non-null argument.
pub fn fill_template(
    resource: &'static str,
    template: &str,
    args: &[(&str, serde_json::Value)],
) -> Result<String, ResourceError> {
    let mut ids: HashMap<&str, String> = HashMap::new();

    for name in placeholders(template) {
        let value = args
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
            .filter(|value| !value.is_null())
            .ok_or_else(|| ResourceError::MissingPathArgument {
                resource,
                argument: name.to_string(),
            })?;
        let text = value
            .as_str()
            .map_or_else(|| value.to_string(), ToString::to_string);
        ids.insert(name, text);
    }

    Ok(build_path(template, &ids))
}

/// Resolves the URL for `operation` from a path table and request arguments.
///
/// The most specific path whose placeholders are all present (and non-null)
/// is used. When none matches, the first path for the operation is filled so
/// the missing argument is reported by name.
///
/// # Errors
///
/// Returns [`ResourceError::PathResolutionFailed`] if the table has no path
/// for the operation, or [`ResourceError::MissingPathArgument`] if a
/// placeholder cannot be filled.
pub fn resolve_path(
    resource: &'static str,
    paths: &[ResourcePath],
    operation: ResourceOperation,
    args: &[(&str, serde_json::Value)],
) -> Result<(HttpMethod, String), ResourceError> {
    let available: Vec<&str> = args
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(name, _)| *name)
        .collect();

    let path = get_path(paths, operation, &available)
        .or_else(|| paths.iter().find(|p| p.operation == operation))
        .ok_or(ResourceError::PathResolutionFailed {
            resource,
            operation: operation.as_str(),
        })?;

    let url = fill_template(resource, path.template, args)?;
    Ok((path.http_method, url))
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceOperation>();
    assert_send_sync::<ResourcePath>();
};
