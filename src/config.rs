// src/config.rs

use crate::output::GroupBy;
use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct SourcesConfig {
    #[serde(default = "default_enabled")]
    pub crtsh: bool,
    #[serde(default = "default_enabled")]
    pub certspotter: bool,
    #[serde(default = "default_crtsh_url")]
    pub crtsh_url: String,
    #[serde(default = "default_certspotter_url")]
    pub certspotter_url: String,
}

fn default_enabled() -> bool { true }
fn default_crtsh_url() -> String { "https://crt.sh".to_string() }
fn default_certspotter_url() -> String { "https://api.certspotter.com".to_string() }

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            crtsh: default_enabled(),
            certspotter: default_enabled(),
            crtsh_url: default_crtsh_url(),
            certspotter_url: default_certspotter_url(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    #[serde(default)]
    pub timeout_secs: Option<u64>,  // Unset means no timeout
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct BatchConfig {
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

fn default_concurrency() -> usize { 4 }

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_output_directory")]
    pub directory: String,
    #[serde(default)]
    pub group_by: GroupBy,
}

fn default_output_directory() -> String { "output".to_string() }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            group_by: GroupBy::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String { "info".to_string() }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(cfg)
    }

    /// Load from `path` if given, otherwise use built-in defaults
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_from_valid_toml() {
        let toml_content = r#"
[sources]
crtsh = true
certspotter = false
crtsh_url = "http://127.0.0.1:8080"

[http]
timeout_secs = 15
user_agent = "test-agent/1.0"

[batch]
concurrency = 8

[output]
directory = "results"
group_by = "label"

[logging]
level = "debug"
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = Config::from_file(temp_file.path()).unwrap();

        assert!(config.sources.crtsh);
        assert!(!config.sources.certspotter);
        assert_eq!(config.sources.crtsh_url, "http://127.0.0.1:8080");
        assert_eq!(config.sources.certspotter_url, "https://api.certspotter.com");
        assert_eq!(config.http.timeout_secs, Some(15));
        assert_eq!(config.http.user_agent, "test-agent/1.0");
        assert_eq!(config.batch.concurrency, 8);
        assert_eq!(config.output.directory, "results");
        assert_eq!(config.output.group_by, GroupBy::Label);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_config_empty_toml_uses_defaults() {
        let temp_file = NamedTempFile::new().unwrap();

        let config = Config::from_file(temp_file.path()).unwrap();

        assert!(config.sources.crtsh);
        assert!(config.sources.certspotter);
        assert_eq!(config.sources.crtsh_url, "https://crt.sh");
        assert_eq!(config.http.timeout_secs, None);
        assert!(config.http.user_agent.starts_with("cert-search/"));
        assert_eq!(config.batch.concurrency, 4);
        assert_eq!(config.output.directory, "output");
        assert_eq!(config.output.group_by, GroupBy::InputDomain);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_invalid_toml() {
        let toml_content = "invalid toml content {{{";

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let result = Config::from_file(temp_file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_config_unknown_group_by() {
        let toml_content = r#"
[output]
group_by = "tld"
        "#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        assert!(Config::from_file(temp_file.path()).is_err());
    }

    #[test]
    fn test_config_nonexistent_file() {
        let result = Config::from_file(Path::new("/nonexistent/path/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_without_path_is_default() {
        let config = Config::load(None).unwrap();
        assert_eq!(config.output.directory, "output");
        assert_eq!(config.batch.concurrency, 4);
    }
}
