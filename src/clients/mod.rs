//! HTTP transport for the Gitea API.
//!
//! The resource layer in [`crate::rest`] only ever sees this module through
//! [`RestClient`]: payloads come in via `get`, change-sets go out via `patch`,
//! and deletions via `delete`. Failures are returned unchanged.
//!
//! - [`HttpClient`]: the async HTTP client
//! - [`HttpRequest`]: a request to be sent to the API
//! - [`HttpResponse`]: a parsed response from the API
//! - [`HttpMethod`]: supported HTTP methods
//! - [`rest::RestClient`]: higher-level REST API client
//!
//! # Example
//!
//! ```rust,ignore
//! use gitea_api::{BaseUrl, GiteaConfig};
//! use gitea_api::clients::RestClient;
//!
//! let config = GiteaConfig::builder()
//!     .base_url(BaseUrl::new("https://gitea.example.com")?)
//!     .build()?;
//! let client = RestClient::new(&config)?;
//!
//! let response = client.get("users/octo", None).await?;
//! println!("{}", response.body);
//! ```

mod errors;
mod http_client;
mod http_request;
mod http_response;
pub mod rest;

pub use errors::{HttpError, HttpResponseError, InvalidHttpRequestError};
pub use http_client::{HttpClient, SDK_VERSION};
pub use http_request::{DataType, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;

pub use rest::{RestClient, RestError};
