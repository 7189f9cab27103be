pub mod merge_request;
pub mod merge_request_query;
pub mod merge_requests;
pub mod project;

use crate::core::facade::{HttpFacade, DEFAULT_PER_PAGE};
use crate::error::Result;
use merge_requests::MergeRequests;
use project::Projects;
use serde::Deserialize;

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitlabConfig {
    pub client: crate::core::config::Config,
    /// Page size for list endpoints when a query does not pick one.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

/// Entry point to the GitLab resources, generic over the HTTP layer so that
/// tests can swap the network out.
pub struct Client<F> {
    pub http_client: F,
    per_page: u32,
}

impl<'a> Client<crate::core::client::Client<'a>> {
    pub fn new(config: &'a GitlabConfig) -> Result<Self> {
        Ok(Self {
            http_client: crate::core::client::Client::new(&config.client)?,
            per_page: config.per_page.clamp(1, DEFAULT_PER_PAGE),
        })
    }
}

impl<F: HttpFacade> Client<F> {
    pub fn with_facade(http_client: F) -> Self {
        Self {
            http_client,
            per_page: DEFAULT_PER_PAGE,
        }
    }

    pub fn merge_requests(&self) -> MergeRequests<'_, F> {
        MergeRequests::new(self)
    }

    pub fn projects(&self) -> Projects<'_, F> {
        Projects::new(self)
    }
}
