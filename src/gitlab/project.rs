use super::Client;
use crate::core::facade::HttpFacade;
use crate::core::query::{build_query, QueryPairs, ToQuery};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::{form_urlencoded, Url};

/// A project as GitLab addresses it: numeric id or `namespace/path`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProjectId {
    Id(u64),
    Path(String),
}

/// `namespace/path` as it goes into the url, without surrounding blanks or slashes.
fn normalize_path(path: &str) -> &str {
    path.trim().trim_matches('/')
}

impl ProjectId {
    pub(crate) fn validate(&self) -> Result<()> {
        match self {
            ProjectId::Id(0) => Err(Error::validation("project id must be positive")),
            ProjectId::Path(p) if normalize_path(p).is_empty() => {
                Err(Error::validation("project path is empty"))
            }
            _ => Ok(()),
        }
    }
}

/// Path segment form, `group/project` becomes `group%2Fproject`.
impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectId::Id(id) => write!(f, "{id}"),
            ProjectId::Path(path) => {
                for chunk in form_urlencoded::byte_serialize(normalize_path(path).as_bytes()) {
                    f.write_str(chunk)?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for ProjectId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.parse::<u64>() {
            Ok(id) => ProjectId::Id(id),
            Err(_) => ProjectId::Path(s.to_owned()),
        })
    }
}

impl From<u64> for ProjectId {
    fn from(id: u64) -> Self {
        ProjectId::Id(id)
    }
}

impl From<&str> for ProjectId {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(id) => id,
            Err(never) => match never {},
        }
    }
}

impl From<String> for ProjectId {
    fn from(s: String) -> Self {
        ProjectId::from(s.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub name_with_namespace: String,
    pub path_with_namespace: String,
    #[serde(default)]
    pub default_branch: Option<String>,
    pub web_url: Url,
}

struct ProjectSearch<'s> {
    search: &'s str,
}

impl ToQuery for ProjectSearch<'_> {
    fn to_query(&self, pairs: &mut QueryPairs) {
        pairs.push("search", self.search);
    }
}

pub struct Projects<'c, F> {
    client: &'c Client<F>,
}

impl<'c, F: HttpFacade> Projects<'c, F> {
    pub(crate) fn new(client: &'c Client<F>) -> Self {
        Self { client }
    }

    pub async fn get(&self, project_id: impl Into<ProjectId>) -> Result<Project> {
        let project_id = project_id.into();
        project_id.validate()?;

        self.client
            .http_client
            .get(&format!("/projects/{project_id}"))
            .await
    }

    pub async fn search(&self, name: &str) -> Result<Vec<Project>> {
        if name.trim().is_empty() {
            return Err(Error::validation("project search term is empty"));
        }

        let path = build_query("/projects", &ProjectSearch { search: name });

        self.client
            .http_client
            .get_paged_list(&path, self.client.per_page)
            .await
    }
}
