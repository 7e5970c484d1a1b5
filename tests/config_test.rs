// Test configuration loading
use cert_search::config::Config;
use cert_search::output::{GroupBy, OutputTarget};
use cert_search::sources;
use std::path::{Path, PathBuf};

#[test]
fn test_load_test_config() {
    let config_path = Path::new("tests/test_config.toml");
    let config = Config::from_file(config_path).expect("Failed to load test config");

    // Verify sources config
    assert!(config.sources.crtsh);
    assert!(config.sources.certspotter);
    assert_eq!(config.sources.crtsh_url, "http://127.0.0.1:9/crtsh");
    assert_eq!(config.sources.certspotter_url, "http://127.0.0.1:9/certspotter");

    // Verify http config; user agent falls back to the default
    assert_eq!(config.http.timeout_secs, Some(10));
    assert!(config.http.user_agent.starts_with("cert-search/"));

    assert_eq!(config.batch.concurrency, 2);
    assert_eq!(config.output.directory, "subdomains");
    assert_eq!(config.output.group_by, GroupBy::Label);
    assert_eq!(config.logging.level, "warn");
}

#[test]
fn test_output_target_from_config() {
    let config = Config::from_file(Path::new("tests/test_config.toml")).unwrap();

    let target = OutputTarget::for_batch(None, &config.output.directory, config.output.group_by);
    assert_eq!(
        target,
        OutputTarget::Directory {
            path: PathBuf::from("subdomains"),
            group_by: GroupBy::Label,
        }
    );
}

#[test]
fn test_sources_from_config() {
    let config = Config::from_file(Path::new("tests/test_config.toml")).unwrap();

    let client = sources::build_http_client(&config.http).expect("Failed to build client");
    let sources = sources::from_config(&config.sources, client);

    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0].name(), "crt.sh");
    assert_eq!(sources[1].name(), "CertSpotter");
}
