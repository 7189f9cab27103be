use crate::core::query::{QueryPairs, ToQuery};
use chrono::{DateTime, SecondsFormat, Utc};
use derive_builder::Builder;
use derive_more::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StateFilter {
    #[display(fmt = "opened")]
    Opened,

    #[display(fmt = "closed")]
    Closed,

    #[display(fmt = "locked")]
    Locked,

    #[display(fmt = "merged")]
    Merged,

    #[display(fmt = "all")]
    All,
}

/// Whose merge requests the global endpoint returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Scope {
    #[display(fmt = "created_by_me")]
    CreatedByMe,

    #[display(fmt = "assigned_to_me")]
    AssignedToMe,

    #[display(fmt = "reviews_for_me")]
    ReviewsForMe,

    #[display(fmt = "all")]
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum OrderBy {
    #[display(fmt = "created_at")]
    CreatedAt,

    #[display(fmt = "updated_at")]
    UpdatedAt,

    #[display(fmt = "title")]
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Sort {
    #[display(fmt = "asc")]
    Asc,

    #[display(fmt = "desc")]
    Desc,
}

/// Filters for the merge request list endpoints.
///
/// Only fields that are set end up in the query string. Built with
/// [`MergeRequestsQueryBuilder`]; unset builder fields keep the values of
/// [`MergeRequestsQuery::default`].
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(default, setter(into))]
pub struct MergeRequestsQuery {
    /// `opened` unless asked otherwise; `None` leaves the choice to GitLab.
    #[builder(setter(into, strip_option))]
    pub state: Option<StateFilter>,
    /// Only meaningful on `/merge_requests`, where an unset scope is sent as `all`.
    #[builder(setter(into, strip_option))]
    pub scope: Option<Scope>,
    #[builder(setter(into, strip_option))]
    pub author_id: Option<u64>,
    #[builder(setter(into, strip_option))]
    pub author_username: Option<String>,
    #[builder(setter(into, strip_option))]
    pub assignee_id: Option<u64>,
    #[builder(setter(into, strip_option))]
    pub reviewer_username: Option<String>,
    /// Merge requests carrying all of these labels.
    pub labels: Vec<String>,
    #[builder(setter(into, strip_option))]
    pub milestone: Option<String>,
    #[builder(setter(into, strip_option))]
    pub source_branch: Option<String>,
    #[builder(setter(into, strip_option))]
    pub target_branch: Option<String>,
    /// Matched against title and description.
    #[builder(setter(into, strip_option))]
    pub search: Option<String>,
    #[builder(setter(into, strip_option))]
    pub created_after: Option<DateTime<Utc>>,
    #[builder(setter(into, strip_option))]
    pub created_before: Option<DateTime<Utc>>,
    #[builder(setter(into, strip_option))]
    pub updated_after: Option<DateTime<Utc>>,
    #[builder(setter(into, strip_option))]
    pub updated_before: Option<DateTime<Utc>>,
    #[builder(setter(into, strip_option))]
    pub order_by: Option<OrderBy>,
    #[builder(setter(into, strip_option))]
    pub sort: Option<Sort>,
    /// `true` for drafts only, `false` to hide drafts.
    #[builder(setter(into, strip_option))]
    pub draft: Option<bool>,
    /// Page size used while walking the list; the client default when unset.
    #[builder(setter(into, strip_option))]
    pub per_page: Option<u32>,
}

impl Default for MergeRequestsQuery {
    fn default() -> Self {
        Self {
            state: Some(StateFilter::Opened),
            scope: None,
            author_id: None,
            author_username: None,
            assignee_id: None,
            reviewer_username: None,
            labels: Vec::new(),
            milestone: None,
            source_branch: None,
            target_branch: None,
            search: None,
            created_after: None,
            created_before: None,
            updated_after: None,
            updated_before: None,
            order_by: None,
            sort: None,
            draft: None,
            per_page: None,
        }
    }
}

impl MergeRequestsQuery {
    pub fn builder() -> MergeRequestsQueryBuilder {
        MergeRequestsQueryBuilder::default()
    }

    pub(crate) fn with_default_scope(mut self, scope: Scope) -> Self {
        self.scope.get_or_insert(scope);
        self
    }
}

fn timestamp(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Secs, true)
}

impl ToQuery for MergeRequestsQuery {
    fn to_query(&self, pairs: &mut QueryPairs) {
        pairs
            .push_opt("state", self.state)
            .push_opt("scope", self.scope)
            .push_opt("author_id", self.author_id)
            .push_opt("author_username", self.author_username.as_deref())
            .push_opt("assignee_id", self.assignee_id)
            .push_opt("reviewer_username", self.reviewer_username.as_deref())
            .push_list("labels", &self.labels)
            .push_opt("milestone", self.milestone.as_deref())
            .push_opt("source_branch", self.source_branch.as_deref())
            .push_opt("target_branch", self.target_branch.as_deref())
            .push_opt("search", self.search.as_deref())
            .push_opt("created_after", self.created_after.as_ref().map(timestamp))
            .push_opt("created_before", self.created_before.as_ref().map(timestamp))
            .push_opt("updated_after", self.updated_after.as_ref().map(timestamp))
            .push_opt("updated_before", self.updated_before.as_ref().map(timestamp))
            .push_opt("order_by", self.order_by)
            .push_opt("sort", self.sort)
            .push_opt("wip", self.draft.map(|d| if d { "yes" } else { "no" }));
    }
}
