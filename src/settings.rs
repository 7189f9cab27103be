use config::{Config, ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use glmr::gitlab::GitlabConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "GLMR";

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub gitlab: GitlabConfig,
}

impl Settings {
    /// `config.toml` from the platform config dir, then `GLMR_*` variables
    /// (`GLMR_GITLAB__CLIENT__AUTH_TOKEN=...`).
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_file(config_path().as_deref())
    }

    pub fn from_file(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load(path, environment())
    }

    fn load(path: Option<&Path>, environment: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        builder.add_source(environment).build()?.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "glmr").map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::{environment, Settings};
    use std::io::Write;
    use std::path::Path;

    const CONFIG: &str = r#"
[gitlab]
per_page = 50

[gitlab.client]
host = "https://gitlab.example.com"
auth_token = "glpat-test"
"#;

    fn config_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "{content}").unwrap();

        file
    }

    /// Loads `path` with `vars` standing in for the process environment.
    fn load(path: &Path, vars: &[(&str, &str)]) -> Settings {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<config::Map<String, String>>();

        Settings::load(Some(path), environment().source(Some(vars))).unwrap()
    }

    #[test]
    fn from_file_test() {
        let file = config_file(CONFIG);

        let settings = load(file.path(), &[]);

        assert_eq!(settings.gitlab.per_page, 50);
        assert_eq!(settings.gitlab.client.host.as_str(), "https://gitlab.example.com/");
        assert_eq!(settings.gitlab.client.auth_token, "glpat-test");
    }

    #[test]
    fn per_page_has_default() {
        let file = config_file(
            r#"
[gitlab.client]
host = "https://gitlab.example.com"
auth_token = "glpat-test"
"#,
        );

        let settings = load(file.path(), &[]);

        assert_eq!(settings.gitlab.per_page, 100);
    }

    #[test]
    fn environment_overrides_file() {
        let file = config_file(CONFIG);

        let settings = load(
            file.path(),
            &[
                ("GLMR_GITLAB__CLIENT__AUTH_TOKEN", "glpat-env"),
                ("OTHER_GITLAB__PER_PAGE", "10"),
            ],
        );

        assert_eq!(settings.gitlab.client.auth_token, "glpat-env");
        assert_eq!(settings.gitlab.per_page, 50);
    }
}
