use figment::Jail;
use impact_config::ImpactConfig;

#[test]
fn env_vars_fill_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("IMPACT_STORAGE__DATA_DIR", "/tmp/impact");
        jail.set_env("IMPACT_LIMITS__MAX_CHANGES", "42");
        jail.set_env("IMPACT_NOTIFICATIONS__SHOW_IN_DECISION_STATUS", "false");

        let config = ImpactConfig::load().expect("config loads");
        assert_eq!(config.storage.data_dir, "/tmp/impact");
        assert_eq!(config.limits.max_changes, 42);
        assert!(!config.notifications.show_in_decision_status);
        Ok(())
    });
}

#[test]
fn env_beats_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".impact")?;
        jail.create_file(
            ".impact/config.toml",
            r#"
[general]
log_filter = "info"
"#,
        )?;
        jail.set_env("IMPACT_GENERAL__LOG_FILTER", "debug");

        let config = ImpactConfig::load().expect("config loads");
        assert_eq!(config.general.log_filter, "debug");
        Ok(())
    });
}

#[test]
fn dotenv_file_is_loaded() {
    Jail::expect_with(|jail| {
        jail.create_file(".env", "IMPACT_STORAGE__KEY_PREFIX=dotenv_\n")?;

        let config = ImpactConfig::load_with_dotenv().expect("config loads");
        assert_eq!(config.storage.key_prefix, "dotenv_");
        Ok(())
    });
}
