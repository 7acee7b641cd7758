// Tests for configuration loading.
use pubcheck::config::Config;
use pubcheck::context::{AppContext, TestContext};
use std::fs;
use std::path::PathBuf;

fn write_config(ctx: &TestContext, contents: &str) {
    let path = ctx.get_config_file_path().unwrap();
    fs::write(path, contents).unwrap();
}

#[test]
fn minimal_config_gets_defaults() {
    let ctx = TestContext::new();
    write_config(
        &ctx,
        "api_url = \"https://example.com/api/v2/items\"\narticles_dir = \"/srv/articles\"\n",
    );

    let config = Config::load(&ctx).unwrap();
    assert_eq!(config.api_url, "https://example.com/api/v2/items");
    assert_eq!(config.articles_dir, PathBuf::from("/srv/articles"));
    assert_eq!(config.request_timeout_secs, 30);
    assert!(config.block_drifted);
    assert!(!config.block_new);
}

#[test]
fn explicit_values_override_defaults() {
    let ctx = TestContext::new();
    write_config(
        &ctx,
        "api_url = \"https://example.com/items\"\n\
         articles_dir = \"articles\"\n\
         request_timeout_secs = 5\n\
         block_drifted = false\n\
         block_new = true\n",
    );

    let config = Config::load(&ctx).unwrap();
    assert_eq!(config.request_timeout_secs, 5);
    assert!(!config.block_drifted);
    assert!(config.block_new);
}

#[test]
fn missing_config_is_detectable() {
    let ctx = TestContext::new();
    let err = Config::load(&ctx).unwrap_err();
    assert!(Config::is_missing_config_error(&err));
}

#[test]
fn malformed_config_is_not_a_missing_config() {
    let ctx = TestContext::new();
    write_config(&ctx, "api_url = [this is not valid toml\n");

    let err = Config::load(&ctx).unwrap_err();
    assert!(!Config::is_missing_config_error(&err));
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn incomplete_config_is_an_error() {
    // articles_dir is required; serde must reject its absence rather than
    // silently defaulting.
    let ctx = TestContext::new();
    write_config(&ctx, "api_url = \"https://example.com/items\"\n");

    let err = Config::load(&ctx).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));
}

#[test]
fn config_path_points_at_the_context_config_dir() {
    let ctx = TestContext::new();
    let path = Config::get_path_string(&ctx).unwrap();
    assert!(path.ends_with("config.toml"));
    assert!(path.contains("config"));
}
