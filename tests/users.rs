#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use todo_guard::db::db::Db;
    use todo_guard::db::error::StoreError;
    use todo_guard::db::users::Users;
    use todo_guard::libs::models::{User, UserPatch};
    use todo_guard::libs::schema::{Pattern, Rule, ValidationError};
    use uuid::Uuid;

    struct UsersTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
    }

    impl TestContext for UsersTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("todo-guard.db");
            UsersTestContext {
                _temp_dir: temp_dir,
                db_path,
            }
        }
    }

    impl UsersTestContext {
        fn users(&self) -> Users {
            Users::from_db(Db::open(&self.db_path).unwrap())
        }
    }

    #[test_context(UsersTestContext)]
    #[test]
    fn test_create_hashes_password(ctx: &mut UsersTestContext) {
        let mut users = ctx.users();
        let created = users.create(&User::new("alice", "a@example.com", "longenough1")).unwrap();

        assert_ne!(created.password, "longenough1");
        assert!(created.password.starts_with("$argon2"));

        let stored = users.get(created.id).unwrap().unwrap();
        assert_eq!(stored, created);
        assert!(users.verify_password("alice", "longenough1").unwrap());
        assert!(!users.verify_password("alice", "longenough2").unwrap());
        assert!(!users.verify_password("nobody", "longenough1").unwrap());
    }

    #[test_context(UsersTestContext)]
    #[test]
    fn test_duplicate_username_is_rejected(ctx: &mut UsersTestContext) {
        let mut users = ctx.users();
        users.create(&User::new("alice", "a@example.com", "longenough1")).unwrap();

        let err = users.create(&User::new("alice", "b@example.com", "longenough1")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::UniquenessViolation {
                field: "username".to_string(),
                value: "alice".to_string(),
            })
        );

        let err = users.create(&User::new("bob", "a@example.com", "longenough1")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ValidationError>(),
            Some(ValidationError::UniquenessViolation { field, .. }) if field == "email"
        ));

        assert_eq!(users.list().unwrap().len(), 1);
    }

    #[test_context(UsersTestContext)]
    #[test]
    fn test_invalid_user_is_not_stored(ctx: &mut UsersTestContext) {
        let mut users = ctx.users();

        let err = users.create(&User::new("ab!", "a@example.com", "longenough1")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::ConstraintViolation {
                field: "username".to_string(),
                rule: Rule::Pattern(Pattern::Username),
            })
        );

        let err = users.create(&User::new("alice", "a@example.com", "short")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ValidationError>(),
            Some(ValidationError::ConstraintViolation { field, rule: Rule::MinLength(8) }) if field == "password"
        ));

        assert!(users.list().unwrap().is_empty());
    }

    #[test_context(UsersTestContext)]
    #[test]
    fn test_update_keeps_hash_unless_password_changes(ctx: &mut UsersTestContext) {
        let mut users = ctx.users();
        let created = users.create(&User::new("alice", "a@example.com", "longenough1")).unwrap();

        let patch = UserPatch {
            email: Some("alice@example.org".to_string()),
            ..UserPatch::default()
        };
        let updated = users.update(created.id, &patch).unwrap();
        assert_eq!(updated.email, "alice@example.org");
        assert_eq!(updated.password, created.password);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at.unwrap() >= created.created_at);

        let patch = UserPatch {
            password: Some("evenlonger2".to_string()),
            ..UserPatch::default()
        };
        users.update(created.id, &patch).unwrap();
        assert!(users.verify_password("alice", "evenlonger2").unwrap());
        assert!(!users.verify_password("alice", "longenough1").unwrap());
    }

    #[test_context(UsersTestContext)]
    #[test]
    fn test_resaving_own_username_is_allowed(ctx: &mut UsersTestContext) {
        let mut users = ctx.users();
        let alice = users.create(&User::new("alice", "a@example.com", "longenough1")).unwrap();
        let bob = users.create(&User::new("bob", "b@example.com", "longenough1")).unwrap();

        let same = UserPatch {
            username: Some("alice".to_string()),
            email: Some("a@example.com".to_string()),
            ..UserPatch::default()
        };
        assert!(users.update(alice.id, &same).is_ok());

        let taken = UserPatch {
            username: Some("alice".to_string()),
            ..UserPatch::default()
        };
        let err = users.update(bob.id, &taken).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ValidationError>(),
            Some(ValidationError::UniquenessViolation { .. })
        ));
        assert_eq!(users.get(bob.id).unwrap().unwrap().username, "bob");
    }

    #[test_context(UsersTestContext)]
    #[test]
    fn test_renamed_user_frees_old_username_and_email(ctx: &mut UsersTestContext) {
        let mut users = ctx.users();
        let alice = users.create(&User::new("alice", "a@example.com", "longenough1")).unwrap();

        let patch = UserPatch {
            username: Some("alicia".to_string()),
            email: Some("alicia@example.com".to_string()),
            ..UserPatch::default()
        };
        let renamed = users.update(alice.id, &patch).unwrap();
        assert_eq!(renamed.username, "alicia");
        assert_eq!(users.get_by_username("alicia").unwrap().unwrap().id, alice.id);
        assert!(users.get_by_username("alice").unwrap().is_none());

        let newcomer = users.create(&User::new("alice", "a@example.com", "longenough1")).unwrap();
        assert_ne!(newcomer.id, alice.id);

        let err = users.create(&User::new("alicia", "c@example.com", "longenough1")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ValidationError>(),
            Some(ValidationError::UniquenessViolation { field, .. }) if field == "username"
        ));
    }

    #[test_context(UsersTestContext)]
    #[test]
    fn test_missing_user(ctx: &mut UsersTestContext) {
        let mut users = ctx.users();
        let id = Uuid::new_v4();

        assert!(users.get(id).unwrap().is_none());
        assert!(users.get_by_username("ghost").unwrap().is_none());

        let err = users.update(id, &UserPatch::default()).unwrap_err();
        assert!(matches!(err.downcast_ref::<StoreError>(), Some(StoreError::NotFound { .. })));
    }

    #[test_context(UsersTestContext)]
    #[test]
    fn test_list_is_ordered_by_username(ctx: &mut UsersTestContext) {
        let mut users = ctx.users();
        users.create(&User::new("carol", "c@example.com", "longenough1")).unwrap();
        users.create(&User::new("alice", "a@example.com", "longenough1")).unwrap();

        let names: Vec<_> = users.list().unwrap().into_iter().map(|u| u.username).collect();
        assert_eq!(names, vec!["alice", "carol"]);
    }
}
