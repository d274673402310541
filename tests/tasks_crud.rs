#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::thread;
    use taskdeck::db::tasks::Tasks;
    use taskdeck::libs::config::DatabaseLocation;
    use taskdeck::libs::error::TaskError;
    use taskdeck::libs::task::{NewTask, Priority, Status, TaskPatch};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct TaskTestContext {
        temp_dir: TempDir,
        tasks: Tasks,
    }

    impl TaskTestContext {
        fn location(&self) -> DatabaseLocation {
            DatabaseLocation::File(self.temp_dir.path().join("tasks.db"))
        }
    }

    impl TestContext for TaskTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let tasks = Tasks::open_at(&DatabaseLocation::File(temp_dir.path().join("tasks.db"))).unwrap();
            TaskTestContext { temp_dir, tasks }
        }
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_create_round_trip(ctx: &mut TaskTestContext) {
        let created = ctx
            .tasks
            .create(
                NewTask::new("Write report")
                    .description("Quarterly numbers")
                    .priority(Priority::High)
                    .status(Status::InProgress),
            )
            .unwrap();

        assert!(created.id > 0);
        assert_eq!(created.created_at, created.updated_at);

        let listed = ctx.tasks.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], created);
        assert_eq!(listed[0].title, "Write report");
        assert_eq!(listed[0].description.as_deref(), Some("Quarterly numbers"));
        assert_eq!(listed[0].priority, Priority::High);
        assert_eq!(listed[0].status, Status::InProgress);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_create_applies_defaults(ctx: &mut TaskTestContext) {
        let task = ctx.tasks.create(NewTask::new("Only a title")).unwrap();

        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.status, Status::Todo);
        assert_eq!(task.description, None);

        let stored = ctx.tasks.get(task.id).unwrap().unwrap();
        assert_eq!(stored.priority, Priority::Medium);
        assert_eq!(stored.status, Status::Todo);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_create_trims_and_rejects_blank_titles(ctx: &mut TaskTestContext) {
        let task = ctx.tasks.create(NewTask::new("  Padded title  ")).unwrap();
        assert_eq!(task.title, "Padded title");

        for blank in ["", "   ", "\t\n"] {
            let result = ctx.tasks.create(NewTask::new(blank));
            assert!(matches!(result, Err(TaskError::InvalidTitle)));
        }
        assert_eq!(ctx.tasks.list().unwrap().len(), 1);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_partial_update_preserves_untouched_fields(ctx: &mut TaskTestContext) {
        let original = ctx.tasks.create(NewTask::new("A").description("keep me").priority(Priority::Low)).unwrap();

        let updated = ctx.tasks.update(original.id, TaskPatch::status(Status::Done)).unwrap();

        assert_eq!(updated.title, "A");
        assert_eq!(updated.description.as_deref(), Some("keep me"));
        assert_eq!(updated.priority, Priority::Low);
        assert_eq!(updated.status, Status::Done);
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at > original.updated_at);

        let stored = ctx.tasks.get(original.id).unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_repeated_updates_keep_advancing_updated_at(ctx: &mut TaskTestContext) {
        let task = ctx.tasks.create(NewTask::new("Busy task")).unwrap();

        let mut previous = task.updated_at;
        for priority in [Priority::High, Priority::Low, Priority::Medium, Priority::High] {
            let patch = TaskPatch {
                priority: Some(priority),
                ..Default::default()
            };
            let updated = ctx.tasks.update(task.id, patch).unwrap();
            assert!(updated.updated_at > previous);
            previous = updated.updated_at;
        }
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_can_clear_description(ctx: &mut TaskTestContext) {
        let task = ctx.tasks.create(NewTask::new("Task").description("temporary")).unwrap();

        let patch = TaskPatch {
            description: Some(None),
            ..Default::default()
        };
        let updated = ctx.tasks.update(task.id, patch).unwrap();

        assert_eq!(updated.description, None);
        assert_eq!(ctx.tasks.get(task.id).unwrap().unwrap().description, None);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_rejects_blank_title(ctx: &mut TaskTestContext) {
        let task = ctx.tasks.create(NewTask::new("Keep")).unwrap();

        let patch = TaskPatch {
            title: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(matches!(ctx.tasks.update(task.id, patch), Err(TaskError::InvalidTitle)));
        assert_eq!(ctx.tasks.get(task.id).unwrap().unwrap().title, "Keep");
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_update_missing_task_is_not_found(ctx: &mut TaskTestContext) {
        let result = ctx.tasks.update(42, TaskPatch::status(Status::Done));
        assert!(matches!(result, Err(TaskError::NotFound(42))));
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_delete_removes_exactly_one(ctx: &mut TaskTestContext) {
        let ids: Vec<i64> = (1..=3).map(|i| ctx.tasks.create(NewTask::new(format!("Task {}", i))).unwrap().id).collect();
        let before = ctx.tasks.stats().unwrap().total;

        ctx.tasks.delete(ids[1]).unwrap();

        let remaining: Vec<i64> = ctx.tasks.list().unwrap().iter().map(|t| t.id).collect();
        assert_eq!(remaining, vec![ids[2], ids[0]]);
        assert_eq!(ctx.tasks.stats().unwrap().total, before - 1);

        let again = ctx.tasks.delete(ids[1]);
        assert!(matches!(again, Err(TaskError::NotFound(id)) if id == ids[1]));
        assert_eq!(ctx.tasks.stats().unwrap().total, before - 1);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_ids_are_not_reused(ctx: &mut TaskTestContext) {
        let first = ctx.tasks.create(NewTask::new("First")).unwrap();
        ctx.tasks.delete(first.id).unwrap();

        let second = ctx.tasks.create(NewTask::new("Second")).unwrap();
        assert!(second.id > first.id);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_list_is_newest_first(ctx: &mut TaskTestContext) {
        let t1 = ctx.tasks.create(NewTask::new("T1")).unwrap();
        let t2 = ctx.tasks.create(NewTask::new("T2")).unwrap();
        let t3 = ctx.tasks.create(NewTask::new("T3")).unwrap();

        let listed = ctx.tasks.list().unwrap();
        let ids: Vec<i64> = listed.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![t3.id, t2.id, t1.id]);

        for pair in listed.windows(2) {
            assert!(pair[0].created_at >= pair[1].created_at);
        }
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_updates_do_not_change_order(ctx: &mut TaskTestContext) {
        let t1 = ctx.tasks.create(NewTask::new("T1")).unwrap();
        let t2 = ctx.tasks.create(NewTask::new("T2")).unwrap();

        ctx.tasks.update(t1.id, TaskPatch::status(Status::Done)).unwrap();

        let ids: Vec<i64> = ctx.tasks.list().unwrap().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![t2.id, t1.id]);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_data_survives_reopen(ctx: &mut TaskTestContext) {
        let created = ctx.tasks.create(NewTask::new("Persistent").priority(Priority::High)).unwrap();

        let reopened = Tasks::open_at(&ctx.location()).unwrap();
        let listed = reopened.list().unwrap();
        assert_eq!(listed, vec![created]);
        reopened.close().unwrap();
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_shared_handle_across_threads(ctx: &mut TaskTestContext) {
        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let tasks = ctx.tasks.clone();
                thread::spawn(move || {
                    (0..5)
                        .map(|i| tasks.create(NewTask::new(format!("worker {} task {}", worker, i))).unwrap().id)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let ids: HashSet<i64> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
        assert_eq!(ids.len(), 20);
        assert_eq!(ctx.tasks.stats().unwrap().total, 20);
    }
}
