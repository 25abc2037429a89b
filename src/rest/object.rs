//! Materialized resource objects.
//!
//! An [`ApiObject<R>`] is built from a JSON payload and the static
//! [`Descriptor`] of its resource type `R`:
//!
//! 1. Every payload key is installed as a read field. Declared parsers run on
//!    non-null values; everything else is kept raw, `null` included.
//! 2. Every declared field missing from the payload is installed as `null`.
//! 3. Every patchable name is made writable. A patchable name missing from
//!    the payload is installed as a writable `null`.
//!
//! Installing a name that already exists is a [`ResourceError::SchemaConflict`]
//! with one exception: step 3 upgrades a field installed by steps 1 and 2 to
//! writable and keeps its parsed value. Upgrading the same name twice is a
//! conflict.
//!
//! Materialization never depends on identity. The key is derived through
//! [`Resource::identity_key`] when the object is built and cached if the
//! identity fields are present. Equality and hashing use only that key and
//! panic with [`ResourceError::IdentityContractMissing`] when there is none;
//! [`ApiObject::identity_key`] reports the same condition as an error.
//!
//! Once [`ApiObject::mark_deleted`] has been called every field access fails
//! with [`ResourceError::ObjectInvalidated`].

use crate::clients::RestClient;
use crate::rest::errors::json_kind;
use crate::rest::{resolve_path, Descriptor, Resource, ResourceError, ResourceOperation};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// The named fields of a materialized object.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldTable {
    resource: &'static str,
    values: BTreeMap<String, Value>,
    writable: BTreeSet<String>,
}

impl FieldTable {
    /// Creates an empty table for the named resource type.
    #[must_use]
    pub const fn new(resource: &'static str) -> Self {
        Self {
            resource,
            values: BTreeMap::new(),
            writable: BTreeSet::new(),
        }
    }

    /// Runs the read pass over `payload`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::SchemaConflict`] if the descriptor declares a
    /// name twice, or [`ResourceError::FieldParse`] if a parser rejects a value.
    pub fn materialize_read_only(
        client: &Arc<RestClient>,
        resource: &'static str,
        descriptor: &Descriptor,
        payload: Map<String, Value>,
    ) -> Result<Self, ResourceError> {
        descriptor.validate(resource)?;
        let mut table = Self::new(resource);

        for (name, raw) in payload {
            let value = match descriptor.parser(&name) {
                Some(field) if !raw.is_null() => {
                    (field.parse)(client, raw).map_err(|e| ResourceError::FieldParse {
                        resource,
                        field: name.clone(),
                        reason: e.0,
                    })?
                }
                _ => raw,
            };
            table.install_read(&name, value)?;
        }

        for field in descriptor.fields {
            if !table.contains(field.name) {
                table.install_read(field.name, Value::Null)?;
            }
        }

        Ok(table)
    }

    /// Runs the read pass, then the writable pass over the patchable names.
    ///
    /// Upgraded fields keep the value produced by their parser rather than
    /// the raw payload value.
    ///
    /// With no patchable names this is the same as
    /// [`materialize_read_only`](Self::materialize_read_only).
    ///
    /// # Errors
    ///
    /// As for the read pass.
    pub fn materialize_writable(
        client: &Arc<RestClient>,
        resource: &'static str,
        descriptor: &Descriptor,
        payload: Map<String, Value>,
    ) -> Result<Self, ResourceError> {
        let mut table = Self::materialize_read_only(client, resource, descriptor, payload)?;

        for name in descriptor.patchable {
            if table.contains(name) {
                table.make_writable(name)?;
            } else {
                table.install_writable(name, Value::Null)?;
            }
        }

        Ok(table)
    }

    /// Installs a read field.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::SchemaConflict`] if `name` already exists.
    pub fn install_read(&mut self, name: &str, value: Value) -> Result<(), ResourceError> {
        self.ensure_absent(name)?;
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Installs a writable field.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::SchemaConflict`] if `name` already exists.
    pub fn install_writable(&mut self, name: &str, value: Value) -> Result<(), ResourceError> {
        self.ensure_absent(name)?;
        self.values.insert(name.to_string(), value);
        self.writable.insert(name.to_string());
        Ok(())
    }

    /// Upgrades an installed read field to writable, keeping its value.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnknownField`] if `name` is not installed and
    /// [`ResourceError::SchemaConflict`] if it is already writable.
    pub fn make_writable(&mut self, name: &str) -> Result<(), ResourceError> {
        if !self.contains(name) {
            return Err(ResourceError::UnknownField {
                resource: self.resource,
                field: name.to_string(),
            });
        }
        if !self.writable.insert(name.to_string()) {
            return Err(self.conflict(name));
        }
        Ok(())
    }

    /// Returns `true` if a field named `name` is installed.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Returns `true` if `name` is installed and writable.
    #[must_use]
    pub fn is_writable(&self, name: &str) -> bool {
        self.writable.contains(name)
    }

    /// Returns the value of a field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Returns the installed field names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Returns the number of installed fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no field is installed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Reads an identity field as `T`.
    ///
    /// Meant for [`Resource::identity_key`] implementations.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::IdentityContractMissing`] if the field is
    /// absent or `null`, and [`ResourceError::FieldType`] if it cannot be
    /// converted to `T`.
    pub fn identity<T: DeserializeOwned>(&self, name: &'static str) -> Result<T, ResourceError> {
        match self.values.get(name) {
            None | Some(Value::Null) => Err(ResourceError::IdentityContractMissing {
                resource: self.resource,
                field: name,
            }),
            Some(value) => {
                serde_json::from_value(value.clone()).map_err(|source| ResourceError::FieldType {
                    resource: self.resource,
                    field: name.to_string(),
                    source,
                })
            }
        }
    }

    pub(crate) fn store(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    pub(crate) fn to_map(&self) -> Map<String, Value> {
        self.values
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    fn ensure_absent(&self, name: &str) -> Result<(), ResourceError> {
        if self.contains(name) {
            return Err(self.conflict(name));
        }
        Ok(())
    }

    fn conflict(&self, name: &str) -> ResourceError {
        ResourceError::SchemaConflict {
            resource: self.resource,
            field: name.to_string(),
        }
    }
}

/// A materialized Gitea API object of resource type `R`.
///
/// Read access is available for every resource type; writes and commits
/// require `R: MutableResource` (see [`crate::rest::MutableResource`]).
///
/// # Example
///
/// ```rust,ignore
/// use gitea_api::rest::{ApiObject, resources::User};
/// use serde_json::json;
///
/// let user = ApiObject::<User>::request(&client, &[("username", json!("octo"))]).await?;
/// println!("{} <{}>", user.login()?, user.get("email")?);
/// ```
pub struct ApiObject<R: Resource> {
    client: Arc<RestClient>,
    pub(crate) fields: FieldTable,
    pub(crate) dirty: BTreeSet<String>,
    deleted: bool,
    key: Option<R::Key>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FieldTable>();
};

impl<R: Resource> ApiObject<R> {
    /// Materializes a payload through `R`'s descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::InvalidPayload`] if `payload` is not a JSON
    /// object, and any error of the materialization passes. Missing identity
    /// fields are not an error here.
    pub fn parse_response(client: &Arc<RestClient>, payload: Value) -> Result<Self, ResourceError> {
        let Value::Object(map) = payload else {
            return Err(ResourceError::InvalidPayload {
                resource: R::NAME,
                found: json_kind(&payload),
            });
        };

        let fields = FieldTable::materialize_writable(client, R::NAME, &R::DESCRIPTOR, map)?;
        Ok(Self::from_fields(client, fields))
    }

    /// Wraps an already materialized field table.
    #[must_use]
    pub fn from_fields(client: &Arc<RestClient>, fields: FieldTable) -> Self {
        let key = R::identity_key(&fields).ok();
        tracing::debug!(
            resource = R::NAME,
            fields = fields.len(),
            has_identity = key.is_some(),
            "Materialized {} object",
            R::NAME
        );

        Self {
            client: Arc::clone(client),
            fields,
            dirty: BTreeSet::new(),
            deleted: false,
            key,
        }
    }

    /// Fetches an object with a GET request and materializes it.
    ///
    /// The URL comes from `R`'s find path filled from `args`. After
    /// materialization every argument not present as a field is installed as
    /// a read field, so `owner` and `repo` stay readable on an issue even
    /// though the issue payload does not carry them.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] if `R` has no find path,
    /// [`ResourceError::MissingPathArgument`] if a placeholder is not covered
    /// by `args`, transport errors unchanged, and materialization errors.
    pub async fn request(
        client: &Arc<RestClient>,
        args: &[(&str, Value)],
    ) -> Result<Self, ResourceError> {
        let (_, path) = resolve_path(R::NAME, R::PATHS, ResourceOperation::Find, args)?;
        let response = client.get(&path, None).await?;

        let mut object = Self::parse_response(client, response.body)?;

        for (name, value) in args {
            if !object.fields.contains(name) {
                tracing::debug!(
                    resource = R::NAME,
                    field = *name,
                    "Backfilling request argument as field"
                );
                object.fields.install_read(name, value.clone())?;
            }
        }

        Ok(object)
    }

    /// Returns the value of a field.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ObjectInvalidated`] after deletion and
    /// [`ResourceError::UnknownField`] if no such field is installed.
    pub fn get(&self, name: &str) -> Result<&Value, ResourceError> {
        self.ensure_live()?;
        self.fields
            .get(name)
            .ok_or_else(|| ResourceError::UnknownField {
                resource: R::NAME,
                field: name.to_string(),
            })
    }

    /// Returns the value of a field converted to `T`.
    ///
    /// # Errors
    ///
    /// As for [`get`](Self::get), plus [`ResourceError::FieldType`] if the
    /// value does not deserialize into `T`.
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> Result<T, ResourceError> {
        let value = self.get(name)?;
        serde_json::from_value(value.clone()).map_err(|source| ResourceError::FieldType {
            resource: R::NAME,
            field: name.to_string(),
            source,
        })
    }

    /// Returns the value of a field that payloads may omit, treating an
    /// absent field like `null`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ObjectInvalidated`] after deletion and
    /// [`ResourceError::FieldType`] on a type mismatch.
    pub fn get_optional<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, ResourceError> {
        if self.has_field(name)? {
            self.get_as(name)
        } else {
            Ok(None)
        }
    }

    /// Returns `true` if a field named `name` is installed.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ObjectInvalidated`] after deletion.
    pub fn has_field(&self, name: &str) -> Result<bool, ResourceError> {
        self.ensure_live()?;
        Ok(self.fields.contains(name))
    }

    /// Returns all fields as a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ObjectInvalidated`] after deletion.
    pub fn to_payload(&self) -> Result<Value, ResourceError> {
        self.ensure_live()?;
        Ok(Value::Object(self.fields.to_map()))
    }

    /// Returns the identity key.
    ///
    /// # Errors
    ///
    /// Returns the error of [`Resource::identity_key`], normally
    /// [`ResourceError::IdentityContractMissing`], when the payload did not
    /// carry the identity fields.
    pub fn identity_key(&self) -> Result<R::Key, ResourceError> {
        match &self.key {
            Some(key) => Ok(key.clone()),
            None => R::identity_key(&self.fields),
        }
    }

    /// Compares identities without panicking.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::IdentityContractMissing`] if either object
    /// has no identity.
    pub fn same_identity(&self, other: &Self) -> Result<bool, ResourceError> {
        Ok(self.identity_key()? == other.identity_key()?)
    }

    fn key_or_panic(&self) -> &R::Key {
        match &self.key {
            Some(key) => key,
            None => {
                let error = R::identity_key(&self.fields)
                    .err()
                    .unwrap_or_else(|| ResourceError::IdentityContractMissing {
                        resource: R::NAME,
                        field: "identity",
                    });
                panic!("{error}")
            }
        }
    }

    /// Returns the shared client this object was materialized with.
    #[must_use]
    pub const fn client(&self) -> &Arc<RestClient> {
        &self.client
    }

    /// Returns `true` once the object has been deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Marks the object as deleted. Every later field access fails.
    pub fn mark_deleted(&mut self) {
        self.deleted = true;
    }

    /// Deletes the object on the server, then marks it deleted.
    ///
    /// The object stays usable when the request fails.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ObjectInvalidated`] if already deleted,
    /// [`ResourceError::PathResolutionFailed`] if `R` has no delete path, and
    /// transport errors unchanged.
    pub async fn delete(&mut self) -> Result<(), ResourceError> {
        self.ensure_live()?;
        let args = R::path_args(self)?;
        let (_, path) = resolve_path(R::NAME, R::PATHS, ResourceOperation::Delete, &args)?;

        self.client.delete(&path).await?;
        tracing::debug!(resource = R::NAME, path = %path, "Deleted {} object", R::NAME);

        self.mark_deleted();
        Ok(())
    }

    pub(crate) const fn ensure_live(&self) -> Result<(), ResourceError> {
        if self.deleted {
            return Err(ResourceError::ObjectInvalidated { resource: R::NAME });
        }
        Ok(())
    }
}

/// Compares identity keys.
///
/// # Panics
///
/// Panics with [`ResourceError::IdentityContractMissing`] if either object has
/// no identity. Use [`ApiObject::same_identity`] to get an error instead.
impl<R: Resource> PartialEq for ApiObject<R> {
    fn eq(&self, other: &Self) -> bool {
        self.key_or_panic() == other.key_or_panic()
    }
}

impl<R: Resource> Eq for ApiObject<R> {}

/// Hashes the identity key.
///
/// # Panics
///
/// Panics with [`ResourceError::IdentityContractMissing`] if the object has
/// no identity.
impl<R: Resource> Hash for ApiObject<R> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key_or_panic().hash(state);
    }
}

impl<R: Resource> fmt::Debug for ApiObject<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(R::NAME)
            .field("key", &self.key)
            .field("fields", &self.fields)
            .field("dirty", &self.dirty)
            .field("deleted", &self.deleted)
            .finish_non_exhaustive()
    }
}

impl<R: Resource> fmt::Display for ApiObject<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.key {
            Some(key) => write!(f, "{} ({key:?})", R::NAME),
            None => write!(f, "{} (no identity)", R::NAME),
        }
    }
}
