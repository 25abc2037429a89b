//! User resource.
//!
//! Users are read-only: there is no [`MutableResource`](crate::rest::MutableResource)
//! implementation, so `set` and `commit` do not exist on `ApiObject<User>`.
//!
//! # Example
//!
//! ```rust,ignore
//! use gitea_api::rest::resources::User;
//!
//! let user = User::find(&client, "octo").await?;
//! println!("{} joined {:?}", user.login()?, user.created()?);
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::clients::RestClient;
use crate::rest::{
    parse_datetime, ApiObject, Descriptor, FieldParser, FieldTable, Resource, ResourceError,
    ResourceOperation, ResourcePath,
};
use crate::HttpMethod;

/// A Gitea user account.
///
/// # Fields
///
/// - `id` - The unique identifier (identity)
/// - `login` - The user name
/// - `full_name`, `email`, `avatar_url`, `is_admin`
/// - `created`, `last_login` - Timestamps, normalized to UTC
///
/// Fetching by name installs `username` as a field when the payload does
/// not carry it.
#[derive(Debug)]
pub enum User {}

impl Resource for User {
    type Key = u64;

    const NAME: &'static str = "User";
    const DESCRIPTOR: Descriptor = Descriptor::new(&[
        FieldParser::new("created", parse_datetime),
        FieldParser::new("last_login", parse_datetime),
    ]);
    const PATHS: &'static [ResourcePath] = &[ResourcePath::new(
        HttpMethod::Get,
        ResourceOperation::Find,
        &["username"],
        "users/{username}",
    )];

    fn identity_key(fields: &FieldTable) -> Result<Self::Key, ResourceError> {
        fields.identity("id")
    }
}

impl User {
    /// Fetches a user by login name.
    ///
    /// # Errors
    ///
    /// Returns transport errors unchanged and materialization errors.
    pub async fn find(
        client: &Arc<RestClient>,
        username: &str,
    ) -> Result<ApiObject<Self>, ResourceError> {
        ApiObject::request(client, &[("username", Value::from(username))]).await
    }
}

impl ApiObject<User> {
    /// The user id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ObjectInvalidated`] after deletion.
    pub fn id(&self) -> Result<u64, ResourceError> {
        self.get_as("id")
    }

    /// The login name.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ObjectInvalidated`] after deletion, or a
    /// field error if the payload had no login.
    pub fn login(&self) -> Result<String, ResourceError> {
        self.get_as("login")
    }

    /// The display name, if set.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ObjectInvalidated`] after deletion.
    pub fn full_name(&self) -> Result<Option<String>, ResourceError> {
        self.get_optional("full_name")
    }

    /// The e-mail address, if visible to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ObjectInvalidated`] after deletion.
    pub fn email(&self) -> Result<Option<String>, ResourceError> {
        self.get_optional("email")
    }

    /// When the account was created.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ObjectInvalidated`] after deletion.
    pub fn created(&self) -> Result<Option<DateTime<Utc>>, ResourceError> {
        self.get_as("created")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BaseUrl, GiteaConfig};
    use chrono::TimeZone;
    use serde_json::json;

    fn client() -> Arc<RestClient> {
        let config = GiteaConfig::builder()
            .base_url(BaseUrl::new("https://gitea.example.com").unwrap())
            .build()
            .unwrap();
        Arc::new(RestClient::new(&config).unwrap())
    }

    #[test]
    fn test_user_accessors() {
        let user = ApiObject::<User>::parse_response(
            &client(),
            json!({
                "id": 3,
                "login": "octo",
                "full_name": "",
                "created": "2023-05-01T12:00:00+02:00"
            }),
        )
        .unwrap();

        assert_eq!(user.id().unwrap(), 3);
        assert_eq!(user.login().unwrap(), "octo");
        assert_eq!(user.full_name().unwrap(), Some(String::new()));
        assert_eq!(user.email().unwrap(), None);
        assert_eq!(
            user.created().unwrap(),
            Some(Utc.with_ymd_and_hms(2023, 5, 1, 10, 0, 0).unwrap())
        );
        assert_eq!(user.get("last_login").unwrap(), &Value::Null);
    }

    #[test]
    fn test_user_display() {
        let user =
            ApiObject::<User>::parse_response(&client(), json!({"id": 3, "login": "octo"})).unwrap();
        assert_eq!(user.to_string(), "User (3)");
    }

    #[test]
    fn test_user_without_id_materializes_but_has_no_identity() {
        let user = ApiObject::<User>::parse_response(&client(), json!({"login": "octo"})).unwrap();

        assert_eq!(user.login().unwrap(), "octo");
        assert_eq!(user.get("created").unwrap(), &Value::Null);
        assert!(matches!(
            user.identity_key(),
            Err(ResourceError::IdentityContractMissing { resource: "User", field: "id" })
        ));
    }
}
