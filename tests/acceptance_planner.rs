use chrono::NaiveDate;
use planner::application::planner::Planner;
use planner::domain::{
    event::{EventKind, NewEvent},
    storage::{KeyValueStore, SCHEDULE_KEY, TASKS_KEY},
    task::{NewTask, Priority, TaskKind},
};
use planner::infrastructure::sqlite_kv::SqliteKvStore;
use planner::view::{DashboardView, TaskRow};

fn date(s: &str) -> NaiveDate { s.parse().unwrap() }

#[tokio::test]
async fn acceptance_collections_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("planner.db").display());

    let (tasks_before, events_before) = {
        let mut planner = Planner::open(SqliteKvStore::connect(&url).await.unwrap()).await.unwrap();
        for (title, due) in [("Essay", Some("2024-03-04")), ("Flashcards", None), ("Lab report", Some("2024-03-02"))] {
            let input = NewTask {
                subject: Some("Biology".into()),
                due_date: due.map(date),
                priority: Priority::High,
                kind: TaskKind::Project,
                ..NewTask::titled(title)
            };
            planner.tasks.add_task(input).await.unwrap().unwrap();
        }
        let second = planner.tasks.list_tasks()[1].id;
        planner.tasks.toggle_task(second).await.unwrap();

        planner.schedule.add_event(NewEvent::on("Lecture", date("2024-03-02")).at("09:00")).await.unwrap();
        planner
            .schedule
            .add_event(NewEvent { kind: EventKind::Study, end_time: Some("22:00".into()), ..NewEvent::on("Library", date("2024-03-01")).at("20:00") })
            .await
            .unwrap();

        (planner.tasks.list_tasks().to_vec(), planner.schedule.list_events().to_vec())
    };

    let planner = Planner::open(SqliteKvStore::connect(&url).await.unwrap()).await.unwrap();
    assert_eq!(planner.tasks.list_tasks(), tasks_before.as_slice());
    assert_eq!(planner.schedule.list_events(), events_before.as_slice());
}

#[tokio::test]
async fn acceptance_loads_blobs_written_by_the_browser_planner() {
    let kv = SqliteKvStore::connect("sqlite::memory:").await.unwrap();
    kv.init().await.unwrap();
    kv.set(
        TASKS_KEY,
        r#"[{"id":1709251200000,"title":"Read ch. 3","subject":"","dueDate":"2024-03-03","priority":"medium","type":"reading","completed":false,"createdAt":"2024-03-01T00:00:00.000Z"},
            {"id":1709251200001,"title":"Misc","subject":"","dueDate":"","priority":"low","type":"errand","completed":true,"createdAt":"2024-03-01T00:00:01.000Z"}]"#,
    )
    .await
    .unwrap();
    kv.set(
        SCHEDULE_KEY,
        r#"[{"id":1709251300000,"title":"Chem","date":"2024-03-01","startTime":"","endTime":"","type":"class"}]"#,
    )
    .await
    .unwrap();

    let mut planner = Planner::open(kv).await.unwrap();
    let dash = DashboardView::from(&planner.dashboard(date("2024-03-01")));
    assert_eq!((dash.total_tasks, dash.completed_tasks, dash.upcoming_events), (2, 1, 1));
    assert_eq!(dash.today.len(), 1);
    assert_eq!(dash.upcoming_tasks.len(), 1);
    assert_eq!(dash.upcoming_tasks[0].icon, "📖");

    let misc = TaskRow::from(&planner.tasks.list_tasks()[1]);
    assert_eq!(misc.icon, "📋");
    assert_eq!(misc.due, None);

    let added = planner.tasks.add_task(NewTask::titled("New")).await.unwrap().unwrap();
    assert!(added.id.0 > 1709251200001);
}

#[tokio::test]
async fn acceptance_dashboard_tracks_mutations() {
    let kv = SqliteKvStore::connect("sqlite::memory:").await.unwrap();
    let mut planner = Planner::open(kv).await.unwrap();
    let as_of = date("2024-03-01");

    let id = planner
        .tasks
        .add_task(NewTask { due_date: Some(as_of), ..NewTask::titled("Quiz prep") })
        .await
        .unwrap()
        .unwrap()
        .id;
    assert_eq!(planner.dashboard(as_of).upcoming_tasks.len(), 1);

    planner.tasks.toggle_task(id).await.unwrap();
    let dash = planner.dashboard(as_of);
    assert!(dash.upcoming_tasks.is_empty());
    assert_eq!((dash.tasks.total, dash.tasks.completed), (1, 1));

    planner.tasks.delete_task(id).await.unwrap();
    assert_eq!(planner.dashboard(as_of).tasks.total, 0);
}
