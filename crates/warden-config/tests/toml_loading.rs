//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use warden_config::WardenConfig;

#[test]
fn loads_vault_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[vault]
address = "https://vault.example.com:8200"
token = "hvs.toml"
namespace = "team-a"
timeout_secs = 30
"#,
        )?;

        let config: WardenConfig = Figment::from(Serialized::defaults(WardenConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.vault.address, "https://vault.example.com:8200");
        assert_eq!(config.vault.token, "hvs.toml");
        assert_eq!(config.vault.namespace(), Some("team-a"));
        assert_eq!(config.vault.timeout_secs, 30);
        assert!(config.vault.is_configured());
        Ok(())
    });
}

#[test]
fn project_config_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".warden")?;
        jail.create_file(
            ".warden/config.toml",
            r#"
[vault]
address = "http://127.0.0.1:8200"
token = "root"

[general]
default_mount = "ci"
"#,
        )?;

        let config = WardenConfig::load().expect("config loads");
        assert_eq!(config.vault.address, "http://127.0.0.1:8200");
        assert_eq!(config.general.default_mount, "ci");
        assert_eq!(config.general.state_path, ".warden/state.json");
        Ok(())
    });
}

#[test]
fn load_from_uses_explicit_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "custom.toml",
            r#"
[general]
state_path = "state/roles.json"
"#,
        )?;

        let config = WardenConfig::load_from(std::path::Path::new("custom.toml"))
            .expect("config loads");
        assert_eq!(config.general.state_path, "state/roles.json");
        Ok(())
    });
}

#[test]
fn load_from_missing_file_is_an_error() {
    Jail::expect_with(|_jail| {
        let result = WardenConfig::load_from(std::path::Path::new("missing.toml"));
        assert!(matches!(
            result,
            Err(warden_config::ConfigError::InvalidValue { .. })
        ));
        Ok(())
    });
}
