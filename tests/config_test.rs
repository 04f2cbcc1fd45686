use clap::{CommandFactory, FromArgMatches, Parser};
use fcopt::config::{resolve_base_url, BaseUrl, BuildMode, ClientConfig, DEV_MODEL_BASE};
use fcopt::error::FcError;
use rstest::rstest;
use std::io::Write;
use std::str::FromStr;

#[rstest]
#[case(Some("/"), BuildMode::Development, BaseUrl::SameOrigin)]
#[case(Some("/"), BuildMode::Production, BaseUrl::SameOrigin)]
#[case(Some(""), BuildMode::Development, BaseUrl::Explicit(DEV_MODEL_BASE.into()))]
#[case(None, BuildMode::Development, BaseUrl::Explicit(DEV_MODEL_BASE.into()))]
#[case(Some(""), BuildMode::Production, BaseUrl::SameOrigin)]
#[case(None, BuildMode::Production, BaseUrl::SameOrigin)]
#[case(
    Some("https://api.example.com"),
    BuildMode::Production,
    BaseUrl::Explicit("https://api.example.com".into())
)]
#[case(
    Some("https://api.example.com"),
    BuildMode::Development,
    BaseUrl::Explicit("https://api.example.com".into())
)]
fn test_resolve_base_url(
    #[case] configured: Option<&str>,
    #[case] mode: BuildMode,
    #[case] expected: BaseUrl,
) {
    assert_eq!(resolve_base_url(configured, mode), expected);
}

#[test]
fn test_dev_default_is_localhost_5000() {
    assert_eq!(DEV_MODEL_BASE, "http://localhost:5000");
}

#[test]
fn test_join_explicit_base() {
    let base = BaseUrl::Explicit("https://api.example.com/".into());
    assert_eq!(
        base.join(None, "/optimize").unwrap(),
        "https://api.example.com/optimize"
    );
}

#[test]
fn test_join_same_origin() {
    let base = BaseUrl::SameOrigin;
    assert_eq!(
        base.join(Some("http://app.local:8080"), "/optimize").unwrap(),
        "http://app.local:8080/optimize"
    );
    assert!(matches!(
        base.join(None, "/optimize"),
        Err(FcError::Config(_))
    ));
}

#[test]
fn test_defaults() {
    let config = ClientConfig::default();
    assert_eq!(config.timeout_ms, 120_000);
    assert_eq!(config.mode, BuildMode::Production);
    assert_eq!(config.bounds.min_customers, 100);
    assert_eq!(config.bounds.max_customers, 1000);
    assert!(config.check().is_ok());
}

#[test]
fn test_build_mode_text() {
    assert_eq!(BuildMode::Development.to_string(), "development");
    assert_eq!(BuildMode::from_str("production").unwrap(), BuildMode::Production);
}

#[test]
fn test_load_from_file_partial() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "model_base": "https://api.example.com", "mode": "development", "bounds": {{ "max_customers": 4000 }} }}"#
    )
    .unwrap();

    let config = ClientConfig::load_from_file(file.path()).unwrap();
    assert_eq!(config.model_base.as_deref(), Some("https://api.example.com"));
    assert_eq!(config.mode, BuildMode::Development);
    assert_eq!(config.bounds.min_customers, 100);
    assert_eq!(config.bounds.max_customers, 4000);
    assert_eq!(config.timeout_ms, 120_000);
}

#[test]
fn test_load_from_file_rejects_bad_bounds() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "bounds": {{ "min_customers": 500, "max_customers": 100 }} }}"#
    )
    .unwrap();
    assert!(matches!(
        ClientConfig::load_from_file(file.path()),
        Err(FcError::Config(_))
    ));
}

#[test]
fn test_load_from_file_errors() {
    assert!(matches!(
        ClientConfig::load_from_file("/definitely/not/here.json"),
        Err(FcError::Io(_))
    ));

    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();
    assert!(matches!(
        ClientConfig::load_from_file(file.path()),
        Err(FcError::Json(_))
    ));
}

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    client: ClientConfig,
}

#[test]
fn test_merge_from_cli_only_overrides_explicit_flags() {
    let matches = TestCli::command()
        .try_get_matches_from(["fcopt", "--timeout-ms", "5000"])
        .unwrap();
    let cli = TestCli::from_arg_matches(&matches).unwrap();

    let mut file_config = ClientConfig {
        model_base: Some("https://from-file.example.com".into()),
        mode: BuildMode::Development,
        ..Default::default()
    };
    file_config.merge_from_cli(&cli.client, &matches);

    assert_eq!(file_config.timeout_ms, 5000);
    // Defaults from clap must not clobber file values
    assert_eq!(file_config.mode, BuildMode::Development);
    // FCOPT_MODEL_BASE may be set in the environment running the tests
    if std::env::var("FCOPT_MODEL_BASE").map_or(true, |v| v.is_empty()) {
        assert_eq!(
            file_config.model_base.as_deref(),
            Some("https://from-file.example.com")
        );
    }
}
