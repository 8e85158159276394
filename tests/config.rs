#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use todo_guard::libs::config::{Config, DeletePolicy, CONFIG_FILE_NAME};
    use todo_guard::libs::data_storage::DataStorage;

    struct ConfigTestContext {
        _temp_dir: TempDir,
        config_path: PathBuf,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let config_path = DataStorage::with_base(temp_dir.path().join("todo-guard"))
                .get_path(CONFIG_FILE_NAME)
                .unwrap();
            ConfigTestContext {
                _temp_dir: temp_dir,
                config_path,
            }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_file_gives_defaults(ctx: &mut ConfigTestContext) {
        let config = Config::read_from(&ctx.config_path).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.delete_policy, DeletePolicy::Restrict);
        assert_eq!(config.busy_timeout_ms, 5_000);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read(ctx: &mut ConfigTestContext) {
        let config = Config {
            delete_policy: DeletePolicy::Cascade,
            busy_timeout_ms: 250,
        };
        config.save_to(&ctx.config_path).unwrap();

        let raw = std::fs::read_to_string(&ctx.config_path).unwrap();
        assert!(raw.contains("\"cascade\""));
        assert_eq!(Config::read_from(&ctx.config_path).unwrap(), config);
    }
}
