use std::path::{Path, PathBuf};
use anyhow::{Context, Result};
use tracing::debug;

pub struct Repo {
    repo: git2::Repository
}

fn normalize_path(path: Option<&Path>) -> std::io::Result<PathBuf> {
    match path {
        Some(p) => p.canonicalize(),
        None => std::env::current_dir(),
    }
}

/// `namespace/project` out of any remote url GitLab hands out:
/// `git@host:group/project.git`, `ssh://git@host:2222/group/project.git`,
/// `https://host/group/sub/project`.
fn project_path_from_url(url: &str) -> Option<String> {
    let path = match url::Url::parse(url) {
        Ok(u) if u.has_host() => u.path().to_owned(),
        // scp-like syntax is not a url
        _ => url.split_once(':').map(|(_, path)| path.to_owned())?,
    };

    let path = path.trim_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);

    if path.is_empty() {
        None
    } else {
        Some(path.to_owned())
    }
}

impl Repo  {
    pub fn new(path: Option<&Path>) -> Result<Self> {
        let path = normalize_path(path)?;
        let repo = git2::Repository::discover(path)?;

        Ok(Self { repo })
    }

    pub fn project_path(&self, remote_name: Option<&str>) -> Result<String> {
        let remote = self.repo.find_remote(remote_name.unwrap_or("origin"))?;
        let url = remote.url().context("Remote url contains non-utf8 symbols")?;

        debug!("remote url: {url}");

        project_path_from_url(url).context("Cannot get project path from remote url")
    }

    /// Shorthand name of the checked out branch.
    pub fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;

        if !head.is_branch() {
            anyhow::bail!("HEAD is not a branch");
        }

        head.shorthand()
            .map(ToOwned::to_owned)
            .context("unable to get a branch name due to non-utf8 symbols")
    }

    /// Summary line of the HEAD commit.
    pub fn head_summary(&self) -> Result<String> {
        let commit = self.repo.head()?.peel_to_commit()?;

        commit.summary()
            .map(ToOwned::to_owned)
            .context("HEAD commit has no utf-8 summary")
    }
}

#[cfg(test)]
mod tests {
    use git2::{Repository, RepositoryInitOptions};
    use tempfile::TempDir;

    use super::{project_path_from_url, Repo};

    // https://github.com/rust-lang/git2-rs/blob/master/src/test.rs
    fn repo_init() -> (TempDir, Repository) {
        let td = TempDir::new().unwrap();
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = Repository::init_opts(td.path(), &opts).unwrap();
        {
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "name").unwrap();
            config.set_str("user.email", "email").unwrap();
            let mut index = repo.index().unwrap();
            let id = index.write_tree().unwrap();

            let tree = repo.find_tree(id).unwrap();
            let sig = repo.signature().unwrap();
            repo.commit(Some("HEAD"), &sig, &sig, "initial\n\nbody", &tree, &[])
                .unwrap();
        }
        (td, repo)
    }

    #[test]
    fn project_path_from_url_test() {
        assert_eq!(
            project_path_from_url("git@gitlab.com:group/project.git").as_deref(),
            Some("group/project")
        );
        assert_eq!(
            project_path_from_url("ssh://git@gitlab.example.com:2222/group/sub/project.git").as_deref(),
            Some("group/sub/project")
        );
        assert_eq!(
            project_path_from_url("https://gitlab.example.com/group/project").as_deref(),
            Some("group/project")
        );
        assert_eq!(project_path_from_url("https://gitlab.example.com/"), None);
        assert_eq!(project_path_from_url("project"), None);
    }

    #[test]
    fn new_repo() {
        let (path, _) = repo_init();
        let repo = Repo::new(Some(path.path()));

        assert!(repo.is_ok());
    }

    #[test]
    fn project_path_test() {
        let (path, repo) = repo_init();
        repo.remote("origin", "git@gitlab.com:username/project.git").unwrap();
        drop(repo);

        let repo = Repo::new(Some(path.path())).unwrap();
        assert_eq!(repo.project_path(None).unwrap(), "username/project");
        assert_eq!(repo.project_path(Some("origin")).unwrap(), "username/project");
        assert!(repo.project_path(Some("upstream")).is_err());
    }

    #[test]
    fn current_branch_and_summary_test() {
        let (path, _) = repo_init();
        let repo = Repo::new(Some(path.path())).unwrap();

        assert_eq!(repo.current_branch().unwrap(), "main");
        assert_eq!(repo.head_summary().unwrap(), "initial");
    }
}
