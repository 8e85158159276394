#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use todo_guard::db::db::Db;
    use todo_guard::db::error::StoreError;
    use todo_guard::db::labels::Labels;
    use todo_guard::db::task_lists::TaskLists;
    use todo_guard::db::tasks::Tasks;
    use todo_guard::db::users::Users;
    use todo_guard::libs::config::DeletePolicy;
    use todo_guard::libs::models::{Label, NewTask, Task, TaskFilter, TaskList, User};

    /// Alice owns a list, a label and a task in that list. Bob owns a task in
    /// Alice's list.
    struct DeletePolicyTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
        alice: User,
        bob: User,
        list: TaskList,
        bobs_task: Task,
    }

    impl TestContext for DeletePolicyTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("todo-guard.db");

            let mut users = Users::from_db(Db::open(&db_path).unwrap());
            let alice = users.create(&User::new("alice", "a@example.com", "longenough1")).unwrap();
            let bob = users.create(&User::new("bob", "b@example.com", "longenough1")).unwrap();

            let list = TaskLists::from_db(Db::open(&db_path).unwrap())
                .create(&TaskList::new(alice.id, "Shared", None))
                .unwrap();
            Labels::from_db(Db::open(&db_path).unwrap())
                .create(&Label::new(alice.id, "urgent", None))
                .unwrap();

            let mut tasks = Tasks::from_db(Db::open(&db_path).unwrap());
            tasks.create(NewTask::new(alice.id, list.id, "alice's task")).unwrap();
            let bobs_task = tasks.create(NewTask::new(bob.id, list.id, "bob's task")).unwrap();

            DeletePolicyTestContext {
                _temp_dir: temp_dir,
                db_path,
                alice,
                bob,
                list,
                bobs_task,
            }
        }
    }

    impl DeletePolicyTestContext {
        fn db(&self) -> Db {
            Db::open(&self.db_path).unwrap()
        }
    }

    #[test_context(DeletePolicyTestContext)]
    #[test]
    fn test_restrict_refuses_user_with_dependents(ctx: &mut DeletePolicyTestContext) {
        let mut users = Users::from_db(ctx.db());

        let err = users.delete(ctx.alice.id, DeletePolicy::Restrict).unwrap_err();
        match err.downcast_ref::<StoreError>() {
            Some(StoreError::HasDependents { dependents, .. }) => assert_eq!(*dependents, 4),
            other => panic!("expected HasDependents, got {:?}", other),
        }
        assert!(users.get(ctx.alice.id).unwrap().is_some());
    }

    #[test_context(DeletePolicyTestContext)]
    #[test]
    fn test_restrict_refuses_list_with_tasks(ctx: &mut DeletePolicyTestContext) {
        let mut lists = TaskLists::from_db(ctx.db());

        let err = lists.delete(ctx.list.id, DeletePolicy::Restrict).unwrap_err();
        match err.downcast_ref::<StoreError>() {
            Some(StoreError::HasDependents { dependents, .. }) => assert_eq!(*dependents, 2),
            other => panic!("expected HasDependents, got {:?}", other),
        }
        assert!(lists.get(ctx.list.id).unwrap().is_some());
    }

    #[test_context(DeletePolicyTestContext)]
    #[test]
    fn test_cascade_removes_list_and_its_tasks(ctx: &mut DeletePolicyTestContext) {
        TaskLists::from_db(ctx.db()).delete(ctx.list.id, DeletePolicy::Cascade).unwrap();

        assert!(TaskLists::from_db(ctx.db()).get(ctx.list.id).unwrap().is_none());
        assert!(Tasks::from_db(ctx.db()).fetch(TaskFilter::All).unwrap().is_empty());
        assert_eq!(Labels::from_db(ctx.db()).list().unwrap().len(), 1);
    }

    #[test_context(DeletePolicyTestContext)]
    #[test]
    fn test_cascade_removes_everything_under_a_user(ctx: &mut DeletePolicyTestContext) {
        Users::from_db(ctx.db()).delete(ctx.alice.id, DeletePolicy::Cascade).unwrap();

        let users = Users::from_db(ctx.db());
        assert!(users.get(ctx.alice.id).unwrap().is_none());
        assert!(users.get(ctx.bob.id).unwrap().is_some());

        assert!(TaskLists::from_db(ctx.db()).list().unwrap().is_empty());
        assert!(Labels::from_db(ctx.db()).list().unwrap().is_empty());

        // Bob's task lived in Alice's list, so it goes with the list.
        let tasks = Tasks::from_db(ctx.db());
        assert!(tasks.get(ctx.bobs_task.id).unwrap().is_none());
        assert!(tasks.fetch(TaskFilter::All).unwrap().is_empty());
    }

    #[test_context(DeletePolicyTestContext)]
    #[test]
    fn test_user_without_dependents_deletes_under_restrict(ctx: &mut DeletePolicyTestContext) {
        Tasks::from_db(ctx.db()).delete(ctx.bobs_task.id).unwrap();

        let mut users = Users::from_db(ctx.db());
        users.delete(ctx.bob.id, DeletePolicy::Restrict).unwrap();
        assert!(users.get(ctx.bob.id).unwrap().is_none());

        let err = users.delete(ctx.bob.id, DeletePolicy::Restrict).unwrap_err();
        assert!(matches!(err.downcast_ref::<StoreError>(), Some(StoreError::NotFound { .. })));
    }

    #[test_context(DeletePolicyTestContext)]
    #[test]
    fn test_dependents_of_a_removed_list_are_rejected(ctx: &mut DeletePolicyTestContext) {
        TaskLists::from_db(ctx.db()).delete(ctx.list.id, DeletePolicy::Cascade).unwrap();

        let err = Tasks::from_db(ctx.db())
            .create(NewTask::new(ctx.alice.id, ctx.list.id, "late"))
            .unwrap_err();
        assert!(err.downcast_ref::<todo_guard::libs::schema::ValidationError>().is_some());
    }
}
