use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use vibeflow::models::{Category, Task, Theme, User};
use vibeflow::storage::{Preferences, RecordKind, RecordStore, StoreError, StoreResult};
use vibeflow::sync::{Snapshot, SnapshotSink, SyncBridge, SyncStatus};

/// Store wrapper whose task writes can be made to fail on demand.
struct FlakySink {
    inner: Arc<RecordStore>,
    fail_tasks: AtomicBool,
    task_writes: AtomicUsize,
}

impl FlakySink {
    fn new(inner: Arc<RecordStore>) -> Self {
        Self {
            inner,
            fail_tasks: AtomicBool::new(false),
            task_writes: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SnapshotSink for FlakySink {
    async fn save_user(&self, user: &User) -> StoreResult<()> {
        self.inner.save_user(user).await
    }

    async fn save_categories(&self, categories: &[Category]) -> StoreResult<()> {
        self.inner.save_categories(categories).await
    }

    async fn save_tasks(&self, tasks: &[Task]) -> StoreResult<()> {
        self.task_writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_tasks.load(Ordering::SeqCst) {
            return Err(StoreError::Write {
                kind: RecordKind::Task,
                message: "disk unplugged".to_string(),
            });
        }
        self.inner.save_tasks(tasks).await
    }
}

fn user(points: u64) -> User {
    User {
        id: "u-1".to_string(),
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        avatar: String::new(),
        streak: 1,
        total_points: points,
        last_active: "2026-10-19T08:00:00.000Z".to_string(),
    }
}

fn task(id: &str, dates: &[&str]) -> Task {
    Task {
        id: id.to_string(),
        category_id: "cat-1".to_string(),
        name: format!("Task {id}"),
        points: 50,
        icon: "Zap".to_string(),
        completed_dates: dates.iter().map(|d| d.to_string()).collect(),
        reminder: None,
    }
}

async fn open_store() -> Arc<RecordStore> {
    let store = Arc::new(RecordStore::in_memory());
    store.open().await.unwrap();
    store
}

#[tokio::test]
async fn test_snapshots_before_load_are_ignored() {
    let store = open_store().await;
    let preferences = Arc::new(Preferences::in_memory());
    let bridge = SyncBridge::new(store.clone(), preferences.clone(), Duration::ZERO);

    let snapshot = Snapshot {
        tasks: Some(Vec::new()),
        theme: Some(Theme::Light),
        ..Snapshot::default()
    };
    store.replace_all(&[task("t1", &[])]).await.unwrap();

    assert!(!bridge.is_loaded());
    assert!(bridge.schedule(snapshot.clone()).is_none());
    bridge.sync_now(&snapshot).await;

    assert_eq!(store.get_all::<Task>().await.unwrap().len(), 1);
    assert_eq!(preferences.theme(), None);
}

#[tokio::test]
async fn test_empty_snapshot_schedules_nothing() {
    let store = open_store().await;
    let bridge = SyncBridge::new(store, Arc::new(Preferences::in_memory()), Duration::ZERO);
    bridge.mark_loaded();

    assert!(bridge.schedule(Snapshot::default()).is_none());
    assert_eq!(bridge.status(), SyncStatus::Idle);
}

#[tokio::test]
async fn test_scheduled_cycle_persists_every_slice() {
    let store = open_store().await;
    let preferences = Arc::new(Preferences::in_memory());
    let bridge = SyncBridge::new(store.clone(), preferences.clone(), Duration::ZERO);
    bridge.mark_loaded();

    let snapshot = Snapshot {
        user: Some(user(50)),
        categories: Some(vibeflow::constants::default_categories()),
        tasks: Some(vec![task("t1", &["2026-10-19T09:00:00.000Z"])]),
        theme: Some(Theme::Light),
    };
    bridge.schedule(snapshot).unwrap().await.unwrap();

    assert_eq!(
        store.get::<User>("ada@example.com").await.unwrap().map(|u| u.total_points),
        Some(50)
    );
    assert_eq!(store.get_all::<Category>().await.unwrap().len(), 4);
    assert_eq!(store.get_all::<Task>().await.unwrap().len(), 1);
    assert_eq!(preferences.session_email().as_deref(), Some("ada@example.com"));
    assert_eq!(preferences.theme(), Some(Theme::Light));
}

#[tokio::test]
async fn test_untouched_slices_are_left_alone() {
    let store = open_store().await;
    let bridge = SyncBridge::new(store.clone(), Arc::new(Preferences::in_memory()), Duration::ZERO);
    bridge.mark_loaded();
    store.replace_all(&[task("t1", &[]), task("t2", &[])]).await.unwrap();

    let snapshot = Snapshot {
        categories: Some(Vec::new()),
        ..Snapshot::default()
    };
    bridge.sync_now(&snapshot).await;

    assert_eq!(store.get_all::<Task>().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_failed_write_converges_on_next_cycle() {
    let store = open_store().await;
    let sink = Arc::new(FlakySink::new(store.clone()));
    let bridge = SyncBridge::new(sink.clone(), Arc::new(Preferences::in_memory()), Duration::ZERO);
    bridge.mark_loaded();

    // Task written, points not yet credited.
    bridge
        .sync_now(&Snapshot {
            user: Some(user(0)),
            tasks: Some(vec![task("t1", &[])]),
            ..Snapshot::default()
        })
        .await;

    // Completion: the user write lands, the task write fails.
    sink.fail_tasks.store(true, Ordering::SeqCst);
    bridge
        .sync_now(&Snapshot {
            user: Some(user(50)),
            tasks: Some(vec![task("t1", &["2026-10-19T09:00:00.000Z"])]),
            ..Snapshot::default()
        })
        .await;

    let stored_user = store.get::<User>("ada@example.com").await.unwrap().unwrap();
    let stored_task = store.get::<Task>("t1").await.unwrap().unwrap();
    assert_eq!(stored_user.total_points, 50);
    assert!(stored_task.completed_dates.is_empty());
    assert!(!bridge.is_syncing());

    // Any later change re-persists the whole current state.
    sink.fail_tasks.store(false, Ordering::SeqCst);
    bridge
        .sync_now(&Snapshot {
            tasks: Some(vec![task("t1", &["2026-10-19T09:00:00.000Z"]), task("t2", &[])]),
            ..Snapshot::default()
        })
        .await;

    let tasks = store.get_all::<Task>().await.unwrap();
    assert_eq!(tasks.len(), 2);
    let t1 = tasks.iter().find(|t| t.id == "t1").unwrap();
    assert_eq!(t1.completed_dates.len(), 1);
    assert_eq!(sink.task_writes.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_failed_user_write_keeps_old_session_marker() {
    let store = Arc::new(RecordStore::in_memory());
    let preferences = Arc::new(Preferences::in_memory());
    preferences.set_session_email("old@example.com").unwrap();
    let bridge = SyncBridge::new(store.clone(), preferences.clone(), Duration::ZERO);
    bridge.mark_loaded();

    // Never opened, so every write fails.
    bridge
        .sync_now(&Snapshot {
            user: Some(user(10)),
            ..Snapshot::default()
        })
        .await;

    assert_eq!(preferences.session_email().as_deref(), Some("old@example.com"));
}

#[tokio::test]
async fn test_indicator_stays_on_for_hold() {
    let store = open_store().await;
    let bridge = SyncBridge::new(store, Arc::new(Preferences::in_memory()), Duration::from_millis(50));
    bridge.mark_loaded();

    let handle = bridge
        .schedule(Snapshot {
            theme: Some(Theme::Light),
            ..Snapshot::default()
        })
        .unwrap();

    assert!(bridge.is_syncing());
    assert_eq!(bridge.status(), SyncStatus::Syncing);

    handle.await.unwrap();

    assert!(!bridge.is_syncing());
    assert_eq!(bridge.status(), SyncStatus::Idle);
}

#[tokio::test]
async fn test_overlapping_cycles_each_run() {
    let store = open_store().await;
    let sink = Arc::new(FlakySink::new(store.clone()));
    let bridge = SyncBridge::new(sink.clone(), Arc::new(Preferences::in_memory()), Duration::from_millis(20));
    bridge.mark_loaded();

    let first = bridge
        .schedule(Snapshot {
            tasks: Some(vec![task("t1", &[])]),
            ..Snapshot::default()
        })
        .unwrap();
    let second = bridge
        .schedule(Snapshot {
            tasks: Some(vec![task("t1", &[]), task("t2", &[])]),
            ..Snapshot::default()
        })
        .unwrap();

    first.await.unwrap();
    second.await.unwrap();

    assert_eq!(sink.task_writes.load(Ordering::SeqCst), 2);
    assert!(!bridge.is_syncing());
}
