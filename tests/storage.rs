use tempfile::TempDir;
use vibeflow::models::{Category, Reminder, ReminderFrequency, Task, User};
use vibeflow::storage::{RecordKind, RecordStore, StoreError};

fn user(email: &str, points: u64) -> User {
    User {
        id: "u-1".to_string(),
        name: "Ada".to_string(),
        email: email.to_string(),
        avatar: format!("https://picsum.photos/seed/{email}/200"),
        streak: 3,
        total_points: points,
        last_active: "2026-10-19T08:00:00.000Z".to_string(),
    }
}

fn task(id: &str, category_id: &str, points: u32) -> Task {
    Task {
        id: id.to_string(),
        category_id: category_id.to_string(),
        name: format!("Task {id}"),
        points,
        icon: "Zap".to_string(),
        completed_dates: Vec::new(),
        reminder: None,
    }
}

fn category(id: &str, name: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        icon: "Book".to_string(),
        color: "#3B82F6".to_string(),
        enabled: true,
    }
}

fn sorted(mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.sort_by(|a, b| a.id.cmp(&b.id));
    tasks
}

async fn open_file_store(dir: &TempDir) -> RecordStore {
    let store = RecordStore::at_path(dir.path().join("vibeflow.db"));
    store.open().await.expect("store should open");
    store
}

#[tokio::test]
async fn test_open_in_memory() {
    let store = RecordStore::in_memory();
    assert!(!store.is_open());
    store.open().await.unwrap();
    assert!(store.is_open());
    assert!(store.get_all::<Task>().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_in_memory_connection_is_never_recycled() {
    let store = RecordStore::in_memory();
    store.open().await.unwrap();

    let pool = store.connection().unwrap().get_sqlite_connection_pool();
    assert_eq!(pool.options().get_idle_timeout(), None);
    assert_eq!(pool.options().get_max_lifetime(), None);
    assert_eq!(pool.options().get_max_connections(), 1);
}

#[tokio::test]
async fn test_open_twice_is_noop() {
    let dir = TempDir::new().unwrap();
    let store = open_file_store(&dir).await;
    store.put(&category("c1", "Study")).await.unwrap();

    store.open().await.unwrap();

    assert!(store.is_open());
    assert_eq!(store.get_all::<Category>().await.unwrap(), vec![category("c1", "Study")]);
}

#[tokio::test]
async fn test_open_failure_is_initialization_error() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "file in the way").unwrap();

    let store = RecordStore::at_path(blocker.join("nested").join("vibeflow.db"));
    let err = store.open().await.unwrap_err();

    assert!(matches!(err, StoreError::Initialization(_)), "got {err:?}");
    assert!(!store.is_open());
}

#[tokio::test]
async fn test_operations_before_open_fail() {
    let store = RecordStore::in_memory();

    let read = store.get::<User>("ada@example.com").await.unwrap_err();
    assert!(matches!(read, StoreError::Read { kind: RecordKind::User, .. }));

    let write = store.put(&task("t1", "c1", 10)).await.unwrap_err();
    assert!(matches!(write, StoreError::Write { kind: RecordKind::Task, .. }));

    let replace = store.replace_all::<Category>(&[]).await.unwrap_err();
    assert_eq!(replace.kind(), Some(RecordKind::Category));
}

#[tokio::test]
async fn test_user_round_trip_by_email() {
    let dir = TempDir::new().unwrap();
    let store = open_file_store(&dir).await;
    let original = user("ada@example.com", 120);

    store.put(&original).await.unwrap();

    let fetched = store.get::<User>("ada@example.com").await.unwrap();
    assert_eq!(fetched, Some(original));
    assert_eq!(store.get::<User>("nobody@example.com").await.unwrap(), None);
}

#[tokio::test]
async fn test_put_replaces_whole_record() {
    let dir = TempDir::new().unwrap();
    let store = open_file_store(&dir).await;

    let mut first = task("t1", "c1", 50);
    first.completed_dates = vec!["2026-10-18T09:00:00.000Z".to_string()];
    first.reminder = Some(Reminder {
        time: "07:30".to_string(),
        frequency: ReminderFrequency::Daily,
        enabled: true,
    });
    store.put(&first).await.unwrap();

    let second = task("t1", "c2", 20);
    store.put(&second).await.unwrap();

    let stored = store.get::<Task>("t1").await.unwrap().unwrap();
    assert_eq!(stored, second);
    assert!(stored.reminder.is_none());
    assert!(stored.completed_dates.is_empty());
    assert_eq!(store.get_all::<Task>().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_task_fields_survive_storage() {
    let dir = TempDir::new().unwrap();
    let store = open_file_store(&dir).await;

    let mut original = task("t1", "c1", 75);
    original.completed_dates = vec![
        "2026-10-17T12:00:00.000Z".to_string(),
        "2026-10-19T06:15:42.123Z".to_string(),
        "2026-10-19T18:00:00.000Z".to_string(),
    ];
    original.reminder = Some(Reminder {
        time: "21:00".to_string(),
        frequency: ReminderFrequency::Weekly,
        enabled: false,
    });
    store.put(&original).await.unwrap();

    assert_eq!(store.get::<Task>("t1").await.unwrap(), Some(original));
}

#[tokio::test]
async fn test_replace_all_leaves_no_residue() {
    let dir = TempDir::new().unwrap();
    let store = open_file_store(&dir).await;

    let first = vec![task("a", "c1", 10), task("b", "c1", 20), task("c", "c2", 30)];
    store.replace_all(&first).await.unwrap();
    assert_eq!(sorted(store.get_all::<Task>().await.unwrap()), first);

    let second = vec![task("b", "c3", 99), task("d", "c2", 5)];
    store.replace_all(&second).await.unwrap();
    assert_eq!(sorted(store.get_all::<Task>().await.unwrap()), second);

    store.replace_all::<Task>(&[]).await.unwrap();
    assert!(store.get_all::<Task>().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_replace_all_does_not_touch_other_kinds() {
    let dir = TempDir::new().unwrap();
    let store = open_file_store(&dir).await;

    store.put(&user("ada@example.com", 10)).await.unwrap();
    store.replace_all(&[category("c1", "Study")]).await.unwrap();
    store.replace_all(&[task("t1", "c1", 10)]).await.unwrap();

    store.replace_all::<Task>(&[]).await.unwrap();

    assert_eq!(store.get_all::<Category>().await.unwrap().len(), 1);
    assert!(store.get::<User>("ada@example.com").await.unwrap().is_some());
}

#[tokio::test]
async fn test_orphaned_tasks_are_tolerated() {
    let dir = TempDir::new().unwrap();
    let store = open_file_store(&dir).await;

    store.replace_all(&[category("c1", "Study")]).await.unwrap();
    store.replace_all(&[task("t1", "c1", 10), task("t2", "missing", 10)]).await.unwrap();

    assert!(store.delete::<Category>("c1").await.unwrap());
    assert!(!store.delete::<Category>("c1").await.unwrap());

    assert!(store.get_all::<Category>().await.unwrap().is_empty());
    assert_eq!(store.get_all::<Task>().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_records_survive_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let store = open_file_store(&dir).await;
        store.put(&user("ada@example.com", 300)).await.unwrap();
        store.replace_all(&[category("c1", "Study"), category("c2", "Fun")]).await.unwrap();
    }

    let store = open_file_store(&dir).await;
    assert_eq!(
        store.get::<User>("ada@example.com").await.unwrap().map(|u| u.total_points),
        Some(300)
    );
    assert_eq!(store.get_all::<Category>().await.unwrap().len(), 2);
}
