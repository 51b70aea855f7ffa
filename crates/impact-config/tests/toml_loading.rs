//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for sandboxed file and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use impact_config::ImpactConfig;
use pretty_assertions::assert_eq;

#[test]
fn loads_all_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[storage]
key_prefix = "brand_"
store_key = "impacts"
version = "2.0"
data_dir = "./state"

[limits]
max_changes = 50
max_analyses = 25
max_dismissed_notifications = 10

[notifications]
show_in_campaign_generator = false

[general]
log_filter = "impact_engine=debug"
event_capacity = 64
"#,
        )?;

        let figment = Figment::from(Serialized::defaults(ImpactConfig::default()))
            .merge(Toml::file("config.toml"));
        let config = ImpactConfig::from_figment(&figment).expect("valid config");

        assert_eq!(config.storage.namespaced_store_key(), "brand_impacts");
        assert_eq!(config.storage.version, "2.0");
        assert!(config.storage.is_persistent());
        assert_eq!(config.limits.max_changes, 50);
        assert_eq!(config.limits.max_analyses, 25);
        assert_eq!(config.limits.dismissed_cap(), Some(10));
        assert!(config.notifications.show_in_decision_status);
        assert!(!config.notifications.show_in_campaign_generator);
        assert_eq!(config.general.log_filter, "impact_engine=debug");
        assert_eq!(config.general.event_capacity, 64);
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[limits]
max_changes = 10
",
        )?;

        let figment = Figment::from(Serialized::defaults(ImpactConfig::default()))
            .merge(Toml::file("config.toml"));
        let config = ImpactConfig::from_figment(&figment).expect("valid config");

        assert_eq!(config.limits.max_changes, 10);
        assert_eq!(config.limits.max_analyses, 100);
        assert_eq!(config.storage.key_prefix, "research_app_");
        Ok(())
    });
}

#[test]
fn project_config_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".impact")?;
        jail.create_file(
            ".impact/config.toml",
            r#"
[storage]
data_dir = "/var/lib/impact"
"#,
        )?;

        let config = ImpactConfig::load().expect("config loads");
        assert_eq!(config.storage.data_dir, "/var/lib/impact");
        Ok(())
    });
}

#[test]
fn invalid_values_are_rejected() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r"
[general]
event_capacity = 0
",
        )?;

        let figment = Figment::from(Serialized::defaults(ImpactConfig::default()))
            .merge(Toml::file("config.toml"));
        let err = ImpactConfig::from_figment(&figment).unwrap_err();
        assert!(err.to_string().contains("general.event_capacity"));
        Ok(())
    });
}
