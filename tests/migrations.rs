#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use todo_guard::db::db::Db;
    use todo_guard::db::migrations::{get_db_version, init_with_migrations, needs_migration, MigrationManager};

    struct MigrationTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
    }

    impl TestContext for MigrationTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("todo-guard.db");
            MigrationTestContext {
                _temp_dir: temp_dir,
                db_path,
            }
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_fresh_database_needs_migration(ctx: &mut MigrationTestContext) {
        let conn = Db::open_without_migrations(&ctx.db_path).unwrap();

        assert_eq!(get_db_version(&conn).unwrap(), 0);
        assert!(needs_migration(&conn).unwrap());
        assert!(MigrationManager::new().get_migration_history(&conn).unwrap().is_empty());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_unreadable_version_is_an_error(ctx: &mut MigrationTestContext) {
        let mut conn = Db::open_without_migrations(&ctx.db_path).unwrap();
        conn.execute("CREATE TABLE migrations (id INTEGER PRIMARY KEY)", []).unwrap();

        assert!(get_db_version(&conn).is_err());
        assert!(needs_migration(&conn).is_err());
        assert!(init_with_migrations(&mut conn).is_err());
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_open_applies_all_migrations(ctx: &mut MigrationTestContext) {
        let db = Db::open(&ctx.db_path).unwrap();
        let manager = MigrationManager::new();

        assert_eq!(get_db_version(&db.conn).unwrap(), manager.latest_version());
        assert_eq!(manager.latest_version(), 3);
        assert!(!needs_migration(&db.conn).unwrap());

        let history = manager.get_migration_history(&db.conn).unwrap();
        let applied: Vec<_> = history.iter().map(|(version, name, _)| (*version, name.as_str())).collect();
        assert_eq!(applied, vec![(1, "create_tables"), (2, "add_indexes"), (3, "add_id_sequences")]);

        for version in 1..=3 {
            assert!(manager.is_migration_applied(&db.conn, version).unwrap());
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_tables_exist(ctx: &mut MigrationTestContext) {
        let db = Db::open(&ctx.db_path).unwrap();

        for table in ["users", "task_lists", "tasks", "labels", "sequences"] {
            let count: i64 = db
                .conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
                    [table],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "missing table {}", table);
        }
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_migrations_are_idempotent(ctx: &mut MigrationTestContext) {
        let mut conn = Db::open_without_migrations(&ctx.db_path).unwrap();
        init_with_migrations(&mut conn).unwrap();
        init_with_migrations(&mut conn).unwrap();
        drop(conn);

        let db = Db::open(&ctx.db_path).unwrap();
        let history = MigrationManager::new().get_migration_history(&db.conn).unwrap();
        assert_eq!(history.len(), 3);
    }

    #[test_context(MigrationTestContext)]
    #[test]
    fn test_foreign_keys_are_enforced(ctx: &mut MigrationTestContext) {
        let db = Db::open(&ctx.db_path).unwrap();

        let result = db.conn.execute(
            "INSERT INTO labels (id, name, user_id, created_at) VALUES ('l1', 'x', 'nobody', '2024-01-01T00:00:00Z')",
            [],
        );
        assert!(result.is_err());
    }
}
