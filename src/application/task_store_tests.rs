#[cfg(test)]
mod tests {
    use super::super::{task_store::TaskStore, test_support::ReadOnlyStore};
    use crate::domain::{
        storage::{KeyValueStore, TASKS_KEY},
        task::{NewTask, Priority, Task, TaskId, TaskKind},
    };
    use crate::infrastructure::memory_kv::InMemoryKvStore;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate { s.parse().unwrap() }

    async fn empty_store() -> (InMemoryKvStore, TaskStore<InMemoryKvStore>) {
        let kv = InMemoryKvStore::default();
        let store = TaskStore::load(kv.clone()).await.unwrap();
        (kv, store)
    }

    #[tokio::test]
    async fn unit_blank_title_leaves_collection_and_storage_untouched() {
        let (kv, mut store) = empty_store().await;
        assert!(store.add_task(NewTask::titled("  \t ")).await.unwrap().is_none());
        assert!(store.list_tasks().is_empty());
        assert_eq!(kv.get(TASKS_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn unit_add_appends_one_incomplete_task_and_writes_through() {
        let (kv, mut store) = empty_store().await;
        store.add_task(NewTask::titled("First")).await.unwrap();
        let created = store
            .add_task(NewTask { priority: Priority::High, kind: TaskKind::Exam, ..NewTask::titled("Second") })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(store.list_tasks().len(), 2);
        assert_eq!(store.list_tasks()[1], created);
        assert!(!created.completed);

        let stored: Vec<Task> = serde_json::from_str(&kv.get(TASKS_KEY).await.unwrap().unwrap()).unwrap();
        assert_eq!(stored, store.list_tasks());
    }

    #[tokio::test]
    async fn unit_rapid_adds_get_unique_ids() {
        let (_, mut store) = empty_store().await;
        for i in 0..50 {
            store.add_task(NewTask::titled(format!("t{i}"))).await.unwrap();
        }
        let mut ids: Vec<i64> = store.list_tasks().iter().map(|t| t.id.0).collect();
        ids.dedup();
        assert_eq!(ids.len(), 50);
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn unit_toggle_twice_restores_and_unknown_is_noop() {
        let (_, mut store) = empty_store().await;
        let id = store.add_task(NewTask::titled("Read ch. 4")).await.unwrap().unwrap().id;

        assert!(store.toggle_task(id).await.unwrap());
        assert!(store.get(id).unwrap().completed);
        assert!(store.toggle_task(id).await.unwrap());
        assert!(!store.get(id).unwrap().completed);

        let before = store.list_tasks().to_vec();
        assert!(!store.toggle_task(TaskId(-1)).await.unwrap());
        assert_eq!(store.list_tasks(), before.as_slice());
    }

    #[tokio::test]
    async fn unit_delete_removes_only_the_match() {
        let (_, mut store) = empty_store().await;
        let a = store.add_task(NewTask::titled("a")).await.unwrap().unwrap().id;
        let b = store.add_task(NewTask::titled("b")).await.unwrap().unwrap().id;
        let c = store.add_task(NewTask::titled("c")).await.unwrap().unwrap().id;

        assert!(store.delete_task(b).await.unwrap());
        let ids: Vec<TaskId> = store.list_tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![a, c]);

        assert!(!store.delete_task(b).await.unwrap());
        assert_eq!(store.list_tasks().len(), 2);
    }

    #[tokio::test]
    async fn unit_upcoming_skips_completed_past_and_undated() {
        let (_, mut store) = empty_store().await;
        let due = |title: &str, d: Option<&str>| NewTask { due_date: d.map(date), ..NewTask::titled(title) };
        store.add_task(due("past", Some("2024-02-29"))).await.unwrap();
        store.add_task(due("undated", None)).await.unwrap();
        let done = store.add_task(due("done", Some("2024-03-02"))).await.unwrap().unwrap().id;
        store.toggle_task(done).await.unwrap();
        for (title, d) in [("f", "2024-03-09"), ("b", "2024-03-03"), ("a", "2024-03-01"), ("e", "2024-03-07"), ("c", "2024-03-04"), ("d", "2024-03-05")] {
            store.add_task(due(title, Some(d))).await.unwrap();
        }

        let titles: Vec<&str> = store.upcoming(5, date("2024-03-01")).iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(store.counts().total, 9);
        assert_eq!(store.counts().completed, 1);
    }

    #[tokio::test]
    async fn unit_failed_write_leaves_memory_unchanged() {
        let seed = r#"[{"id":1,"title":"kept","completed":false,"createdAt":"2024-03-01T08:00:00Z"}]"#;
        let kv = ReadOnlyStore { inner: InMemoryKvStore::with_entry(TASKS_KEY, seed) };
        let mut store = TaskStore::load(kv).await.unwrap();

        assert!(store.add_task(NewTask::titled("lost")).await.is_err());
        assert!(store.toggle_task(TaskId(1)).await.is_err());
        assert!(store.delete_task(TaskId(1)).await.is_err());

        assert_eq!(store.list_tasks().len(), 1);
        assert!(!store.list_tasks()[0].completed);
    }

    #[tokio::test]
    async fn unit_corrupt_blob_fails_load_naming_the_key() {
        let kv = InMemoryKvStore::with_entry(TASKS_KEY, "{not json");
        let err = TaskStore::load(kv).await.err().unwrap();
        assert!(err.to_string().contains(TASKS_KEY));
    }

    #[tokio::test]
    async fn unit_new_ids_continue_above_loaded_ones() {
        let far_future = 9_000_000_000_000_i64;
        let seed = format!(r#"[{{"id":{far_future},"title":"x","completed":false,"createdAt":"2024-03-01T08:00:00Z"}}]"#);
        let mut store = TaskStore::load(InMemoryKvStore::with_entry(TASKS_KEY, &seed)).await.unwrap();
        let created = store.add_task(NewTask::titled("y")).await.unwrap().unwrap();
        assert_eq!(created.id, TaskId(far_future + 1));
    }
}
