//! Repository resource.
//!
//! Repositories are addressed by `repos/{owner}/{repo}`. The URL arguments of
//! a materialized repository come from its read-only `full_name`, so a
//! pending rename still PATCHes the current URL. After a successful rename
//! `full_name` is updated to the new name.
//!
//! # Example
//!
//! ```rust,ignore
//! use gitea_api::rest::resources::Repository;
//!
//! let mut repo = Repository::find(&client, "octo", "hello").await?;
//! repo.set_description("Say hello")?;
//! repo.set("has_wiki", false)?;
//! repo.commit().await?; // PATCH repos/octo/hello {"description": ..., "has_wiki": false}
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::clients::RestClient;
use crate::rest::resources::User;
use crate::rest::{
    parse_datetime, parse_nested, ApiObject, Descriptor, FieldParser, FieldTable,
    MutableResource, Resource, ResourceError, ResourceOperation, ResourcePath,
};
use crate::HttpMethod;

/// A Gitea repository.
///
/// # Fields
///
/// ## Read-Only Fields
/// - `id` - The unique identifier (identity)
/// - `owner` - The owning user, materialized as a nested [`User`]
/// - `full_name` - `owner/name`
/// - `created_at`, `updated_at` - Timestamps, normalized to UTC
///
/// ## Writable Fields
/// - `name`, `description`, `website`, `private`, `default_branch`
/// - `archived`, `has_issues`, `has_wiki`, `template`
#[derive(Debug)]
pub enum Repository {}

impl Resource for Repository {
    type Key = u64;

    const NAME: &'static str = "Repository";
    const DESCRIPTOR: Descriptor = Descriptor::new(&[
        FieldParser::new("owner", parse_nested::<User>),
        FieldParser::new("created_at", parse_datetime),
        FieldParser::new("updated_at", parse_datetime),
    ])
    .with_patchable(&[
        "name",
        "description",
        "website",
        "private",
        "default_branch",
        "archived",
        "has_issues",
        "has_wiki",
        "template",
    ]);
    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Find,
            &["owner", "repo"],
            "repos/{owner}/{repo}",
        ),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Find,
            &["id"],
            "repositories/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Patch,
            ResourceOperation::Update,
            &["owner", "repo"],
            "repos/{owner}/{repo}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["owner", "repo"],
            "repos/{owner}/{repo}",
        ),
    ];

    fn identity_key(fields: &FieldTable) -> Result<Self::Key, ResourceError> {
        fields.identity("id")
    }

    fn path_args(object: &ApiObject<Self>) -> Result<Vec<(&'static str, Value)>, ResourceError> {
        let full_name: String = object.get_as("full_name")?;
        let Some((owner, repo)) = full_name.split_once('/') else {
            return Err(ResourceError::MissingPathArgument {
                resource: Self::NAME,
                argument: "owner".to_string(),
            });
        };

        Ok(vec![("owner", Value::from(owner)), ("repo", Value::from(repo))])
    }
}

impl MutableResource for Repository {
    async fn commit(object: &mut ApiObject<Self>) -> Result<(), ResourceError> {
        let renamed = object
            .collect_dirty()?
            .get("name")
            .and_then(Value::as_str)
            .map(ToString::to_string);
        let old_full_name: String = object.get_as("full_name")?;

        object.commit_patch().await?;

        if let Some(name) = renamed {
            if let Some((owner, _)) = old_full_name.split_once('/') {
                object
                    .fields
                    .store("full_name", Value::from(format!("{owner}/{name}")));
            }
        }
        Ok(())
    }
}

impl Repository {
    /// Fetches a repository by owner and name.
    ///
    /// # Errors
    ///
    /// Returns transport errors unchanged and materialization errors.
    pub async fn find(
        client: &Arc<RestClient>,
        owner: &str,
        repo: &str,
    ) -> Result<ApiObject<Self>, ResourceError> {
        ApiObject::request(
            client,
            &[("owner", Value::from(owner)), ("repo", Value::from(repo))],
        )
        .await
    }

    /// Fetches a repository by its numeric id.
    ///
    /// # Errors
    ///
    /// Returns transport errors unchanged and materialization errors.
    pub async fn find_by_id(
        client: &Arc<RestClient>,
        id: u64,
    ) -> Result<ApiObject<Self>, ResourceError> {
        ApiObject::request(client, &[("id", Value::from(id))]).await
    }
}

impl ApiObject<Repository> {
    /// The repository id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ObjectInvalidated`] after deletion.
    pub fn id(&self) -> Result<u64, ResourceError> {
        self.get_as("id")
    }

    /// The repository name.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ObjectInvalidated`] after deletion.
    pub fn name(&self) -> Result<String, ResourceError> {
        self.get_as("name")
    }

    /// `owner/name`.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ObjectInvalidated`] after deletion.
    pub fn full_name(&self) -> Result<String, ResourceError> {
        self.get_as("full_name")
    }

    /// The description, `None` when unset.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ObjectInvalidated`] after deletion.
    pub fn description(&self) -> Result<Option<String>, ResourceError> {
        self.get_optional("description")
    }

    /// Whether the repository is private.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ObjectInvalidated`] after deletion.
    pub fn private(&self) -> Result<bool, ResourceError> {
        Ok(self.get_optional("private")?.unwrap_or(false))
    }

    /// The owner, materialized as a user object. `None` when the payload
    /// carried no owner.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ObjectInvalidated`] after deletion.
    pub fn owner(&self) -> Result<Option<ApiObject<User>>, ResourceError> {
        match self.get("owner")? {
            Value::Null => Ok(None),
            payload => ApiObject::parse_response(self.client(), payload.clone()).map(Some),
        }
    }

    /// When the repository was last updated.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ObjectInvalidated`] after deletion.
    pub fn updated_at(&self) -> Result<Option<DateTime<Utc>>, ResourceError> {
        self.get_optional("updated_at")
    }

    /// Sets the description.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ObjectInvalidated`] after deletion.
    pub fn set_description(&mut self, description: &str) -> Result<(), ResourceError> {
        self.set("description", description)
    }

    /// Renames the repository on the next commit.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ObjectInvalidated`] after deletion.
    pub fn set_name(&mut self, name: &str) -> Result<(), ResourceError> {
        self.set("name", name)
    }
}
