//! Gitea resource types.
//!
//! - [`User`]: read-only
//! - [`Repository`]: mutable, committed with PATCH
//! - [`Issue`]: mutable, committed with PATCH
//!
//! Each type is an uninhabited marker; objects are `ApiObject<User>`,
//! `ApiObject<Repository>` and so on, with typed accessors next to the
//! generic `get` and `set`.
//!
//! ```rust,ignore
//! use gitea_api::rest::resources::{Issue, Repository, User};
//!
//! let user = User::find(&client, "octo").await?;
//! let repo = Repository::find(&client, "octo", "hello").await?;
//! let issue = Issue::find(&client, "octo", "hello", 7).await?;
//! assert_eq!(issue.user()?.as_ref(), Some(&user));
//! ```

mod issue;
mod repository;
mod user;

pub use issue::{Issue, IssueState};
pub use repository::Repository;
pub use user::User;
