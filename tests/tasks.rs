#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use std::path::PathBuf;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};
    use todo_guard::db::db::Db;
    use todo_guard::db::error::StoreError;
    use todo_guard::db::task_lists::TaskLists;
    use todo_guard::db::tasks::Tasks;
    use todo_guard::db::users::Users;
    use todo_guard::libs::models::{NewTask, TaskFilter, TaskList, TaskPatch, User};
    use todo_guard::libs::schema::ValidationError;
    use uuid::Uuid;

    struct TasksTestContext {
        _temp_dir: TempDir,
        db_path: PathBuf,
        user: User,
        inbox: TaskList,
        errands: TaskList,
    }

    impl TestContext for TasksTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db_path = temp_dir.path().join("todo-guard.db");

            let user = Users::from_db(Db::open(&db_path).unwrap())
                .create(&User::new("alice", "a@example.com", "longenough1"))
                .unwrap();
            let mut lists = TaskLists::from_db(Db::open(&db_path).unwrap());
            let inbox = lists.create(&TaskList::new(user.id, "Inbox", None)).unwrap();
            let errands = lists.create(&TaskList::new(user.id, "Errands", None)).unwrap();

            TasksTestContext {
                _temp_dir: temp_dir,
                db_path,
                user,
                inbox,
                errands,
            }
        }
    }

    impl TasksTestContext {
        fn tasks(&self) -> Tasks {
            Tasks::from_db(Db::open(&self.db_path).unwrap())
        }

        fn new_task(&self, title: &str) -> NewTask {
            NewTask::new(self.user.id, self.inbox.id, title)
        }
    }

    #[test_context(TasksTestContext)]
    #[test]
    fn test_create_defaults(ctx: &mut TasksTestContext) {
        let mut tasks = ctx.tasks();
        let task = tasks.create(ctx.new_task("Buy milk")).unwrap();

        assert_eq!(task.id, 1);
        assert!(!task.completed);
        assert!(task.description.is_none());
        assert!(task.updated_at.is_none());
        assert_eq!(tasks.get(task.id).unwrap().unwrap(), task);
    }

    #[test_context(TasksTestContext)]
    #[test]
    fn test_due_date_round_trip(ctx: &mut TasksTestContext) {
        let mut tasks = ctx.tasks();
        let due = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let task = tasks
            .create(ctx.new_task("File taxes").description("before the deadline").due_on(due))
            .unwrap();

        let stored = tasks.get(task.id).unwrap().unwrap();
        assert_eq!(stored.due_date.unwrap().date_naive(), due);
        assert_eq!(stored.description.as_deref(), Some("before the deadline"));
    }

    #[test_context(TasksTestContext)]
    #[test]
    fn test_ids_are_never_reused(ctx: &mut TasksTestContext) {
        let mut tasks = ctx.tasks();
        let first = tasks.create(ctx.new_task("one")).unwrap();
        let second = tasks.create(ctx.new_task("two")).unwrap();
        assert_eq!((first.id, second.id), (1, 2));

        tasks.delete(second.id).unwrap();
        let third = tasks.create(ctx.new_task("three")).unwrap();
        assert_eq!(third.id, 3);
    }

    #[test_context(TasksTestContext)]
    #[test]
    fn test_rejected_task_does_not_consume_an_id(ctx: &mut TasksTestContext) {
        let mut tasks = ctx.tasks();
        let missing = Uuid::new_v4();

        let err = tasks.create(NewTask::new(ctx.user.id, missing, "orphan")).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::DanglingReference {
                field: "taskListId".to_string(),
                referenced_id: missing.to_string(),
            })
        );

        let task = tasks.create(ctx.new_task("kept")).unwrap();
        assert_eq!(task.id, 1);
        assert_eq!(tasks.fetch(TaskFilter::All).unwrap().len(), 1);
    }

    #[test_context(TasksTestContext)]
    #[test]
    fn test_unknown_owner_is_dangling(ctx: &mut TasksTestContext) {
        let mut tasks = ctx.tasks();
        let ghost = Uuid::new_v4();

        let err = tasks.create(NewTask::new(ghost, ctx.inbox.id, "x")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ValidationError>(),
            Some(ValidationError::DanglingReference { field, .. }) if field == "userId"
        ));
    }

    #[test_context(TasksTestContext)]
    #[test]
    fn test_complete(ctx: &mut TasksTestContext) {
        let mut tasks = ctx.tasks();
        let task = tasks.create(ctx.new_task("Buy milk")).unwrap();

        let done = tasks.complete(task.id).unwrap();
        assert!(done.completed);
        assert_eq!(done.title, task.title);
        assert!(done.updated_at.unwrap() >= task.created_at);
        assert!(tasks.get(task.id).unwrap().unwrap().completed);
    }

    #[test_context(TasksTestContext)]
    #[test]
    fn test_reassign_to_another_list(ctx: &mut TasksTestContext) {
        let mut tasks = ctx.tasks();
        let task = tasks.create(ctx.new_task("Buy milk")).unwrap();

        let missing = Uuid::new_v4();
        let err = tasks
            .update(task.id, &TaskPatch { task_list_id: Some(missing), ..TaskPatch::default() })
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ValidationError>(),
            Some(ValidationError::DanglingReference { field, .. }) if field == "taskListId"
        ));
        assert_eq!(tasks.get(task.id).unwrap().unwrap().task_list_id, ctx.inbox.id);

        let moved = tasks
            .update(task.id, &TaskPatch { task_list_id: Some(ctx.errands.id), ..TaskPatch::default() })
            .unwrap();
        assert_eq!(moved.task_list_id, ctx.errands.id);
    }

    #[test_context(TasksTestContext)]
    #[test]
    fn test_clear_due_date(ctx: &mut TasksTestContext) {
        let mut tasks = ctx.tasks();
        let due = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let task = tasks.create(ctx.new_task("x").due_on(due)).unwrap();

        let updated = tasks
            .update(task.id, &TaskPatch { due_date: Some(None), ..TaskPatch::default() })
            .unwrap();
        assert!(updated.due_date.is_none());
        assert!(tasks.get(task.id).unwrap().unwrap().due_date.is_none());
    }

    #[test_context(TasksTestContext)]
    #[test]
    fn test_fetch_filters(ctx: &mut TasksTestContext) {
        let bob = Users::from_db(Db::open(&ctx.db_path).unwrap())
            .create(&User::new("bob", "b@example.com", "longenough1"))
            .unwrap();

        let mut tasks = ctx.tasks();
        tasks.create(ctx.new_task("one")).unwrap();
        tasks.create(NewTask::new(ctx.user.id, ctx.errands.id, "two")).unwrap();
        tasks.create(NewTask::new(bob.id, ctx.inbox.id, "three")).unwrap();

        assert_eq!(tasks.fetch(TaskFilter::All).unwrap().len(), 3);
        assert_eq!(tasks.fetch(TaskFilter::ByList(ctx.inbox.id)).unwrap().len(), 2);
        assert_eq!(tasks.fetch(TaskFilter::ByUser(ctx.user.id)).unwrap().len(), 2);

        let bobs: Vec<_> = tasks.fetch(TaskFilter::ByUser(bob.id)).unwrap().into_iter().map(|t| t.title).collect();
        assert_eq!(bobs, vec!["three"]);
    }

    #[test_context(TasksTestContext)]
    #[test]
    fn test_missing_task(ctx: &mut TasksTestContext) {
        let mut tasks = ctx.tasks();

        assert!(tasks.get(42).unwrap().is_none());
        let err = tasks.delete(42).unwrap_err();
        assert!(matches!(err.downcast_ref::<StoreError>(), Some(StoreError::NotFound { .. })));
        let err = tasks.complete(42).unwrap_err();
        assert!(matches!(err.downcast_ref::<StoreError>(), Some(StoreError::NotFound { .. })));
    }
}
