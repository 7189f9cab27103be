//! Typed client for the GitLab REST v4 merge request endpoints.
//!
//! ```no_run
//! # async fn run(config: glmr::gitlab::GitlabConfig) -> glmr::Result<()> {
//! use glmr::gitlab::merge_request_query::MergeRequestsQuery;
//!
//! let client = glmr::Client::new(&config)?;
//! let opened = client
//!     .merge_requests()
//!     .list("group/project", MergeRequestsQuery::default())
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod error;
pub mod gitlab;

pub use error::{Error, Result};
pub use gitlab::Client;
