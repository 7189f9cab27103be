//! Merge request endpoints of the REST v4 API.
//!
//!   * GET    /projects/:id/merge_requests
//!   * GET    /merge_requests
//!   * GET    /projects/:id/merge_requests/:iid
//!   * POST   /projects/:id/merge_requests
//!   * PUT    /projects/:id/merge_requests/:iid
//!   * PUT    /projects/:id/merge_requests/:iid/merge
//!   * DELETE /projects/:id/merge_requests/:iid

use super::merge_request::{AcceptMergeRequest, CreateMergeRequest, MergeRequest, UpdateMergeRequest};
use super::merge_request_query::{MergeRequestsQuery, Scope};
use super::project::ProjectId;
use super::Client;
use crate::core::facade::{HttpFacade, DEFAULT_PER_PAGE};
use crate::core::query::build_query;
use crate::error::{Error, Result};
use tracing::debug;

pub struct MergeRequests<'c, F> {
    client: &'c Client<F>,
}

fn merge_request_path(project_id: &ProjectId, iid: u64) -> Result<String> {
    project_id.validate()?;

    if iid == 0 {
        return Err(Error::validation("merge request iid must be positive"));
    }

    Ok(format!("/projects/{project_id}/merge_requests/{iid}"))
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(format!("{field} is empty")));
    }

    Ok(())
}

impl<'c, F: HttpFacade> MergeRequests<'c, F> {
    pub(crate) fn new(client: &'c Client<F>) -> Self {
        Self { client }
    }

    async fn list_path(&self, base: &str, options: &MergeRequestsQuery) -> Result<Vec<MergeRequest>> {
        let per_page = options
            .per_page
            .unwrap_or(self.client.per_page)
            .clamp(1, DEFAULT_PER_PAGE);
        let path = build_query(base, options);

        self.client.http_client.get_paged_list(&path, per_page).await
    }

    /// Every merge request of a project matching `options`, all pages.
    pub async fn list(
        &self,
        project_id: impl Into<ProjectId>,
        options: MergeRequestsQuery,
    ) -> Result<Vec<MergeRequest>> {
        let project_id = project_id.into();
        project_id.validate()?;

        self.list_path(&format!("/projects/{project_id}/merge_requests"), &options)
            .await
    }

    /// Same as [`list`](Self::list) across every project visible to the
    /// token. Without an explicit scope GitLab would only return the
    /// caller's own merge requests, so `scope=all` is sent instead.
    pub async fn list_all(&self, options: MergeRequestsQuery) -> Result<Vec<MergeRequest>> {
        let options = options.with_default_scope(Scope::All);

        self.list_path("/merge_requests", &options).await
    }

    pub async fn get(&self, project_id: impl Into<ProjectId>, iid: u64) -> Result<MergeRequest> {
        let path = merge_request_path(&project_id.into(), iid)?;

        self.client.http_client.get(&path).await
    }

    pub async fn create(&self, request: &CreateMergeRequest) -> Result<MergeRequest> {
        request.project_id.validate()?;
        require("source branch", &request.source_branch)?;
        require("target branch", &request.target_branch)?;
        require("title", &request.title)?;

        let path = format!("/projects/{}/merge_requests", request.project_id);

        self.client.http_client.post(&path, request).await
    }

    pub async fn update(&self, request: &UpdateMergeRequest) -> Result<MergeRequest> {
        let path = merge_request_path(&request.project_id, request.merge_request_iid)?;

        if request.is_empty() {
            debug!("{path}: update without changes");
        }

        self.client.http_client.put(&path, request).await
    }

    /// Merges the merge request with the given commit message.
    pub async fn accept(
        &self,
        project_id: impl Into<ProjectId>,
        iid: u64,
        merge_commit_message: &str,
    ) -> Result<MergeRequest> {
        require("merge commit message", merge_commit_message)?;

        let path = format!("{}/merge", merge_request_path(&project_id.into(), iid)?);
        let body = AcceptMergeRequest { merge_commit_message };

        self.client.http_client.put(&path, &body).await
    }

    pub async fn delete(&self, project_id: impl Into<ProjectId>, iid: u64) -> Result<()> {
        let path = merge_request_path(&project_id.into(), iid)?;

        self.client.http_client.delete(&path).await
    }
}
