//! Static field descriptors for resource types.
//!
//! A [`Descriptor`] is a `const` table describing how a resource type turns a
//! raw JSON payload into fields:
//!
//! - `fields`: names with a parser applied to non-null payload values
//! - `patchable`: names that may be written on a mutable object
//!
//! Fields that appear in a payload but not in the descriptor are kept raw.
//! Declared fields that are absent from a payload are present as `null`.
//!
//! # Example
//!
//! ```rust
//! use gitea_api::rest::{parse_datetime, Descriptor, FieldParser};
//!
//! const DESCRIPTOR: Descriptor = Descriptor::new(&[
//!     FieldParser::new("created_at", parse_datetime),
//!     FieldParser::new("updated_at", parse_datetime),
//! ])
//! .with_patchable(&["title", "body"]);
//!
//! assert!(DESCRIPTOR.parser("created_at").is_some());
//! assert!(DESCRIPTOR.is_patchable("title"));
//! assert!(!DESCRIPTOR.is_patchable("created_at"));
//! ```

use crate::clients::RestClient;
use crate::rest::{ApiObject, Resource, ResourceError};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// Error returned by a field parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct FieldParseError(pub String);

impl FieldParseError {
    /// Creates a parse error with the given reason.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// A field parser: converts a raw, non-null payload value into the stored
/// value. The shared client is available for parsers that build nested
/// resource objects.
pub type ParseFn = fn(&Arc<RestClient>, Value) -> Result<Value, FieldParseError>;

/// Associates a field name with its parser.
#[derive(Clone, Copy)]
pub struct FieldParser {
    /// The payload key.
    pub name: &'static str,
    /// The parser applied to non-null values.
    pub parse: ParseFn,
}

impl FieldParser {
    /// Creates a new field parser entry.
    #[must_use]
    pub const fn new(name: &'static str, parse: ParseFn) -> Self {
        Self { name, parse }
    }
}

impl std::fmt::Debug for FieldParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldParser")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// The static field schema of a resource type.
#[derive(Debug, Clone, Copy)]
pub struct Descriptor {
    /// Fields with a declared parser.
    pub fields: &'static [FieldParser],
    /// Fields that may be written. Empty for read-only resources.
    pub patchable: &'static [&'static str],
}

impl Descriptor {
    /// A descriptor with no parsers and no patchable fields.
    pub const EMPTY: Self = Self::new(&[]);

    /// Creates a descriptor from a parser table.
    #[must_use]
    pub const fn new(fields: &'static [FieldParser]) -> Self {
        Self {
            fields,
            patchable: &[],
        }
    }

    /// Sets the patchable field names.
    #[must_use]
    pub const fn with_patchable(mut self, patchable: &'static [&'static str]) -> Self {
        self.patchable = patchable;
        self
    }

    /// Returns the parser declared for `name`.
    #[must_use]
    pub fn parser(&self, name: &str) -> Option<&FieldParser> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Returns `true` if `name` may be written.
    #[must_use]
    pub fn is_patchable(&self, name: &str) -> bool {
        self.patchable.contains(&name)
    }

    /// Returns `true` if the descriptor declares any patchable field.
    #[must_use]
    pub const fn is_mutable(&self) -> bool {
        !self.patchable.is_empty()
    }

    /// Checks that no field name is declared twice.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::SchemaConflict`] naming the first duplicate
    /// parser or patchable name.
    pub fn validate(&self, resource: &'static str) -> Result<(), ResourceError> {
        let mut seen = HashSet::new();
        for field in self.fields {
            if !seen.insert(field.name) {
                return Err(ResourceError::SchemaConflict {
                    resource,
                    field: field.name.to_string(),
                });
            }
        }

        let mut seen = HashSet::new();
        for name in self.patchable {
            if !seen.insert(*name) {
                return Err(ResourceError::SchemaConflict {
                    resource,
                    field: (*name).to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Parses an RFC 3339 timestamp and stores it normalized to UTC.
///
/// Gitea reports timestamps with the server's offset
/// (`2024-01-02T10:00:00+02:00`); the stored form is
/// `2024-01-02T08:00:00Z`.
///
/// # Errors
///
/// Returns [`FieldParseError`] if the value is not a string or not a valid
/// RFC 3339 timestamp.
pub fn parse_datetime(_client: &Arc<RestClient>, raw: Value) -> Result<Value, FieldParseError> {
    let Value::String(text) = raw else {
        return Err(FieldParseError::new(format!(
            "expected a timestamp string, got {raw}"
        )));
    };

    let parsed = DateTime::parse_from_rfc3339(&text)
        .map_err(|e| FieldParseError::new(format!("invalid timestamp '{text}': {e}")))?;

    Ok(Value::String(
        parsed
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Secs, true),
    ))
}

/// Materializes a nested payload through `R`'s descriptor and stores the
/// resulting field values.
///
/// Nested objects go through the same parsers as top-level ones. A nested
/// payload without identity fields is still accepted.
///
/// # Errors
///
/// Returns [`FieldParseError`] carrying the nested materialization error.
pub fn parse_nested<R: Resource>(
    client: &Arc<RestClient>,
    raw: Value,
) -> Result<Value, FieldParseError> {
    let object = ApiObject::<R>::parse_response(client, raw)
        .map_err(|e| FieldParseError::new(e.to_string()))?;

    object
        .to_payload()
        .map_err(|e| FieldParseError::new(e.to_string()))
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Descriptor>();
    assert_send_sync::<FieldParser>();
    assert_send_sync::<FieldParseError>();
};
