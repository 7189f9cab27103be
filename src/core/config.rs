use std::borrow::Cow;
use url::Url;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: Url,
    pub auth_token: String,
}

impl Config {
    pub fn host(&self) -> &Url {
        &self.host
    }

    pub fn auth_token(&self) -> Cow<str> {
        Cow::Borrowed(&self.auth_token)
    }

    /// Root of the REST v4 API, always with a trailing slash so that
    /// relative paths join under it.
    pub fn api_root(&self) -> Result<Url, url::ParseError> {
        let mut base = self.host.clone();

        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        base.join("api/v4/")
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    fn config(host: &str) -> Config {
        Config {
            host: host.parse().unwrap(),
            auth_token: "glpat-test".into(),
        }
    }

    #[test]
    fn api_root_test() {
        assert_eq!(
            config("https://gitlab.com").api_root().unwrap().as_str(),
            "https://gitlab.com/api/v4/"
        );
        assert_eq!(
            config("https://example.org/gitlab").api_root().unwrap().as_str(),
            "https://example.org/gitlab/api/v4/"
        );
        assert_eq!(
            config("https://example.org/gitlab/").api_root().unwrap().as_str(),
            "https://example.org/gitlab/api/v4/"
        );
    }
}
