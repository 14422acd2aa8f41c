// SPDX-License-Identifier: MIT

use super::*;
use serial_test::serial;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_toml(contents: &str) -> NamedTempFile {
    let mut f = NamedTempFile::new().unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    f
}

#[test]
fn loads_nodes_and_defaults() {
    let f = write_toml(
        r#"
        default_node = "gpu-1"
        max_concurrent_ssh = 4

        [[nodes]]
        name = "local"

        [[nodes]]
        name = "gpu-1"
        alias = "gpu-1.internal"
        "#,
    );
    let config = load(Some(f.path())).unwrap();
    assert_eq!(config.nodes.len(), 2);
    assert_eq!(config.default_node, NodeName::new("gpu-1"));
    assert_eq!(config.max_concurrent_ssh, 4);
    assert_eq!(config.alias_for(&NodeName::new("gpu-1")), "gpu-1.internal");
}

#[test]
fn local_is_implicitly_present_even_when_omitted() {
    let f = write_toml(
        r#"
        [[nodes]]
        name = "gpu-1"
        "#,
    );
    let config = load(Some(f.path())).unwrap();
    assert!(config.contains(&NodeName::local()));
}

#[test]
fn missing_explicit_path_is_an_error() {
    let err = load(Some(std::path::Path::new("/nonexistent/fleet.toml")));
    assert!(matches!(err, Err(ConfigError::Read { .. })));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let f = write_toml("this is not valid toml = = =");
    let err = load(Some(f.path()));
    assert!(matches!(err, Err(ConfigError::Parse { .. })));
}

#[test]
#[serial]
fn default_cmd_expands_environment_variables() {
    std::env::set_var("NEXUS_TEST_SHELL", "/bin/zsh");
    let f = write_toml(
        r#"
        default_cmd = "$NEXUS_TEST_SHELL --login"
        [[nodes]]
        name = "local"
        "#,
    );
    let config = load(Some(f.path())).unwrap();
    assert_eq!(config.default_cmd, "/bin/zsh --login");
    std::env::remove_var("NEXUS_TEST_SHELL");
}

#[test]
#[serial]
fn unset_variable_expands_to_empty_string() {
    std::env::remove_var("NEXUS_TEST_UNSET");
    let f = write_toml(
        r#"
        default_cmd = "${NEXUS_TEST_UNSET}fallback"
        [[nodes]]
        name = "local"
        "#,
    );
    let config = load(Some(f.path())).unwrap();
    assert_eq!(config.default_cmd, "fallback");
}

#[test]
#[serial]
fn no_config_anywhere_is_not_found() {
    // An explicit path always wins, so exercise the fallback chain by
    // clearing the environment variable and running from a directory with
    // no fleet.toml. NEXUS_CONFIG is asserted absent up front so the test
    // doesn't depend on the ambient shell.
    assert!(std::env::var("NEXUS_CONFIG").is_err());
    let dir = tempfile::tempdir().unwrap();
    let original = std::env::current_dir().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();
    let result = resolve_path(None);
    std::env::set_current_dir(original).unwrap();
    assert!(matches!(result, Err(ConfigError::NotFound)));
}
