//! Issue resource.
//!
//! Issues are fetched with `owner`, `repo` and `index` arguments. Gitea does
//! not echo `owner` and `repo` back in the issue payload, so they are
//! installed from the request arguments and used again to address commits.
//!
//! # Example
//!
//! ```rust,ignore
//! use gitea_api::rest::resources::{Issue, IssueState};
//!
//! let mut issue = Issue::find(&client, "octo", "hello", 7).await?;
//! issue.set_title("Crash on empty input")?;
//! issue.set_state(IssueState::Closed)?;
//! issue.commit().await?; // PATCH repos/octo/hello/issues/7
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::clients::RestClient;
use crate::rest::resources::User;
use crate::rest::{
    parse_datetime, parse_nested, ApiObject, Descriptor, FieldParser, FieldTable,
    MutableResource, Resource, ResourceError, ResourceOperation, ResourcePath,
};
use crate::HttpMethod;

/// The state of an issue.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    /// The issue is open.
    #[default]
    Open,
    /// The issue is closed.
    Closed,
}

/// A Gitea issue.
///
/// # Fields
///
/// ## Read-Only Fields
/// - `id` - The unique identifier (identity)
/// - `number` - The per-repository index
/// - `user` - The author, materialized as a nested [`User`]
/// - `repository` - `{id, name, owner, full_name}` of the containing repository
/// - `created_at`, `updated_at`, `closed_at` - Timestamps, normalized to UTC
///
/// ## Writable Fields
/// - `title`, `body`, `state`, `ref`
/// - `due_date` - Parsed like the other timestamps, then writable
/// - `milestone`, `assignees`
#[derive(Debug)]
pub enum Issue {}

impl Resource for Issue {
    type Key = u64;

    const NAME: &'static str = "Issue";
    const DESCRIPTOR: Descriptor = Descriptor::new(&[
        FieldParser::new("user", parse_nested::<User>),
        FieldParser::new("created_at", parse_datetime),
        FieldParser::new("updated_at", parse_datetime),
        FieldParser::new("closed_at", parse_datetime),
        FieldParser::new("due_date", parse_datetime),
    ])
    .with_patchable(&[
        "title",
        "body",
        "state",
        "ref",
        "due_date",
        "milestone",
        "assignees",
    ]);
    const PATHS: &'static [ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Find,
            &["owner", "repo", "index"],
            "repos/{owner}/{repo}/issues/{index}",
        ),
        ResourcePath::new(
            HttpMethod::Patch,
            ResourceOperation::Update,
            &["owner", "repo", "index"],
            "repos/{owner}/{repo}/issues/{index}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["owner", "repo", "index"],
            "repos/{owner}/{repo}/issues/{index}",
        ),
    ];

    fn identity_key(fields: &FieldTable) -> Result<Self::Key, ResourceError> {
        fields.identity("id")
    }

    fn path_args(object: &ApiObject<Self>) -> Result<Vec<(&'static str, Value)>, ResourceError> {
        let repository = object.get_optional::<Value>("repository")?.unwrap_or_default();
        let owner = match object.get_optional::<Value>("owner")? {
            Some(owner) => owner,
            None => repository.get("owner").cloned().unwrap_or_default(),
        };
        let repo = match object.get_optional::<Value>("repo")? {
            Some(repo) => repo,
            None => repository.get("name").cloned().unwrap_or_default(),
        };
        let index = object.get_optional::<Value>("number")?.unwrap_or_default();

        Ok(vec![("owner", owner), ("repo", repo), ("index", index)])
    }
}

impl MutableResource for Issue {
    async fn commit(object: &mut ApiObject<Self>) -> Result<(), ResourceError> {
        object.commit_patch().await
    }
}

impl Issue {
    /// Fetches an issue by repository and index.
    ///
    /// # Errors
    ///
    /// Returns transport errors unchanged and materialization errors.
    pub async fn find(
        client: &Arc<RestClient>,
        owner: &str,
        repo: &str,
        index: u64,
    ) -> Result<ApiObject<Self>, ResourceError> {
        ApiObject::request(
            client,
            &[
                ("owner", Value::from(owner)),
                ("repo", Value::from(repo)),
                ("index", Value::from(index)),
            ],
        )
        .await
    }
}

impl ApiObject<Issue> {
    /// The per-repository issue number.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ObjectInvalidated`] after deletion.
    pub fn number(&self) -> Result<u64, ResourceError> {
        self.get_as("number")
    }

    /// The title.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ObjectInvalidated`] after deletion.
    pub fn title(&self) -> Result<String, ResourceError> {
        self.get_as("title")
    }

    /// The state.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ObjectInvalidated`] after deletion and
    /// [`ResourceError::FieldType`] for an unknown state.
    pub fn state(&self) -> Result<IssueState, ResourceError> {
        Ok(self.get_optional("state")?.unwrap_or_default())
    }

    /// The author, materialized as a user object. `None` when the payload
    /// carried no author.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ObjectInvalidated`] after deletion.
    pub fn user(&self) -> Result<Option<ApiObject<User>>, ResourceError> {
        match self.get("user")? {
            Value::Null => Ok(None),
            payload => ApiObject::parse_response(self.client(), payload.clone()).map(Some),
        }
    }

    /// The due date, if set.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ObjectInvalidated`] after deletion.
    pub fn due_date(&self) -> Result<Option<DateTime<Utc>>, ResourceError> {
        self.get_optional("due_date")
    }

    /// Sets the title.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ObjectInvalidated`] after deletion.
    pub fn set_title(&mut self, title: &str) -> Result<(), ResourceError> {
        self.set("title", title)
    }

    /// Sets the body.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ObjectInvalidated`] after deletion.
    pub fn set_body(&mut self, body: &str) -> Result<(), ResourceError> {
        self.set("body", body)
    }

    /// Opens or closes the issue.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ObjectInvalidated`] after deletion.
    pub fn set_state(&mut self, state: IssueState) -> Result<(), ResourceError> {
        let value = serde_json::to_value(state).map_err(|source| ResourceError::FieldType {
            resource: Issue::NAME,
            field: "state".to_string(),
            source,
        })?;
        self.set("state", value)
    }

    /// Sets or clears the due date.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::ObjectInvalidated`] after deletion.
    pub fn set_due_date(&mut self, due: Option<DateTime<Utc>>) -> Result<(), ResourceError> {
        let value = due.map_or(Value::Null, |due| {
            Value::from(due.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
        });
        self.set("due_date", value)
    }
}
