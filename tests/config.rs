#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use taskmaster::libs::config::{Config, CONFIG_FILE_NAME};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConfigTestContext {
        temp_dir: TempDir,
    }

    impl ConfigTestContext {
        fn config_path(&self) -> PathBuf {
            self.temp_dir.path().join(CONFIG_FILE_NAME)
        }
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            ConfigTestContext {
                temp_dir: tempfile::tempdir().unwrap(),
            }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_read_nonexistent_config(ctx: &mut ConfigTestContext) {
        let config = Config::read_from(&ctx.config_path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_config(ctx: &mut ConfigTestContext) {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 8080;
        config.database_path = Some(ctx.temp_dir.path().join("tasks.db"));
        config.auth.enabled = true;
        config.auth.username = Some("alice".to_string());
        config.auth.password = Some("s3cret".to_string());
        config.debug = true;

        config.save_to(&ctx.config_path()).unwrap();
        let loaded = Config::read_from(&ctx.config_path()).unwrap();

        assert_eq!(loaded.server, config.server);
        assert_eq!(loaded.database_path, config.database_path);
        assert!(loaded.auth.enabled);
        assert_eq!(loaded.auth.username.as_deref(), Some("alice"));
        assert_eq!(loaded.auth.password, None);
        assert!(loaded.debug);

        let raw = std::fs::read_to_string(ctx.config_path()).unwrap();
        assert!(!raw.contains("s3cret"));
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_invalid_config_file(ctx: &mut ConfigTestContext) {
        std::fs::write(ctx.config_path(), "{ not json").unwrap();
        assert!(Config::read_from(&ctx.config_path()).is_err());
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_environment_overrides_file(ctx: &mut ConfigTestContext) {
        std::fs::write(ctx.config_path(), r#"{"server": {"host": "10.0.0.1", "port": 7000}, "auth": {"username": "file-user"}}"#).unwrap();

        let config = Config::read_from(&ctx.config_path())
            .unwrap()
            .with_env(|key| match key {
                "PORT" => Some("7100".to_string()),
                "APP_AUTH" => Some("yes".to_string()),
                "APP_PASSWORD" => Some(" spaced ".to_string()),
                _ => None,
            })
            .unwrap();

        assert_eq!(config.server.address(), "10.0.0.1:7100");
        let credentials = config.credentials().unwrap().unwrap();
        assert_eq!(credentials.username, "file-user");
        assert_eq!(credentials.password, " spaced ");
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_config_in_data_directory(ctx: &mut ConfigTestContext) {
        // The only test in this file that relies on the data directory.
        std::env::set_var("HOME", ctx.temp_dir.path());
        std::env::set_var("LOCALAPPDATA", ctx.temp_dir.path());

        assert!(!Config::delete().unwrap());

        let mut config = Config::default();
        config.server.port = 6543;
        let path = config.save().unwrap();
        assert!(path.starts_with(ctx.temp_dir.path()));
        assert_eq!(Config::read().unwrap().server.port, 6543);
        assert!(config.database_path().unwrap().starts_with(ctx.temp_dir.path()));

        assert!(Config::delete().unwrap());
        assert_eq!(Config::read().unwrap(), Config::default());
    }
}
