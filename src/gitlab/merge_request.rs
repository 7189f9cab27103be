use super::project::ProjectId;
use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize, Serializer};
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeRequestState {
    #[display(fmt = "opened")]
    Opened,

    #[display(fmt = "closed")]
    Closed,

    #[display(fmt = "locked")]
    Locked,

    #[display(fmt = "merged")]
    Merged,

    #[display(fmt = "unknown")]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub web_url: Option<Url>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: u64,
    pub iid: u64,
    pub title: String,
    #[serde(default)]
    pub state: Option<String>,
}

/// Server state of a merge request as of the response. Fields GitLab sends
/// that are not listed here are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeRequest {
    pub id: u64,
    pub iid: u64,
    pub project_id: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub state: MergeRequestState,
    pub author: UserRef,
    #[serde(default)]
    pub assignees: Vec<UserRef>,
    #[serde(default)]
    pub reviewers: Vec<UserRef>,
    pub source_branch: String,
    pub target_branch: String,
    #[serde(default)]
    pub source_project_id: Option<u64>,
    #[serde(default)]
    pub target_project_id: Option<u64>,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub milestone: Option<Milestone>,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub merge_status: Option<String>,
    #[serde(default)]
    pub detailed_merge_status: Option<String>,
    #[serde(default)]
    pub has_conflicts: bool,
    #[serde(default)]
    pub blocking_discussions_resolved: bool,
    #[serde(default)]
    pub user_notes_count: u32,
    #[serde(default)]
    pub squash: bool,
    #[serde(default)]
    pub force_remove_source_branch: Option<bool>,
    #[serde(default)]
    pub sha: Option<String>,
    #[serde(default)]
    pub merge_commit_sha: Option<String>,
    #[serde(default)]
    pub squash_commit_sha: Option<String>,
    #[serde(default)]
    pub merged_by: Option<UserRef>,
    pub web_url: Url,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub merged_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
}

impl MergeRequest {
    /// `!iid`, the way GitLab references merge requests in text.
    pub fn reference(&self) -> String {
        format!("!{}", self.iid)
    }
}

/// Labels are written as one comma separated string in request bodies.
fn comma_separated<S: Serializer>(labels: &Option<Vec<String>>, s: S) -> Result<S::Ok, S::Error> {
    match labels {
        Some(labels) => s.serialize_str(&labels.join(",")),
        None => s.serialize_none(),
    }
}

/// Body of `POST /projects/:id/merge_requests`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateMergeRequest {
    #[serde(skip)]
    pub project_id: ProjectId,
    pub source_branch: String,
    pub target_branch: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_ids: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewer_ids: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "comma_separated")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_project_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_source_branch: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub squash: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_collaboration: Option<bool>,
}

impl CreateMergeRequest {
    pub fn new(
        project_id: impl Into<ProjectId>,
        source_branch: impl Into<String>,
        target_branch: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            source_branch: source_branch.into(),
            target_branch: target_branch.into(),
            title: title.into(),
            description: None,
            assignee_ids: None,
            reviewer_ids: None,
            labels: None,
            milestone_id: None,
            target_project_id: None,
            remove_source_branch: None,
            squash: None,
            allow_collaboration: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StateEvent {
    #[display(fmt = "close")]
    Close,

    #[display(fmt = "reopen")]
    Reopen,
}

/// Body of `PUT /projects/:id/merge_requests/:iid`. Unset fields are left
/// as they are on the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateMergeRequest {
    #[serde(skip)]
    pub project_id: ProjectId,
    #[serde(skip)]
    pub merge_request_iid: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_event: Option<StateEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_ids: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewer_ids: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "comma_separated")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "comma_separated")]
    pub add_labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "comma_separated")]
    pub remove_labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_source_branch: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub squash: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discussion_locked: Option<bool>,
}

impl UpdateMergeRequest {
    pub fn new(project_id: impl Into<ProjectId>, merge_request_iid: u64) -> Self {
        Self {
            project_id: project_id.into(),
            merge_request_iid,
            title: None,
            description: None,
            target_branch: None,
            state_event: None,
            assignee_ids: None,
            reviewer_ids: None,
            labels: None,
            add_labels: None,
            remove_labels: None,
            milestone_id: None,
            remove_source_branch: None,
            squash: None,
            discussion_locked: None,
        }
    }

    /// No field to change is set, the body would be `{}`.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.target_branch.is_none()
            && self.state_event.is_none()
            && self.assignee_ids.is_none()
            && self.reviewer_ids.is_none()
            && self.labels.is_none()
            && self.add_labels.is_none()
            && self.remove_labels.is_none()
            && self.milestone_id.is_none()
            && self.remove_source_branch.is_none()
            && self.squash.is_none()
            && self.discussion_locked.is_none()
    }
}

/// Body of `PUT /projects/:id/merge_requests/:iid/merge`.
#[derive(Debug, Serialize)]
pub(crate) struct AcceptMergeRequest<'m> {
    pub merge_commit_message: &'m str,
}
