use pensum_core::{CompletionState, CourseId, ProgressRecord};
use sqlx::Row;
use storage::repository::ProgressRepository;
use storage::sqlite::SqliteRepository;

#[tokio::test]
async fn sqlite_roundtrip_persists_states() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let mut record = ProgressRecord::new();
    record.set(CourseId::new("MAT101"), CompletionState::Approved);
    record.set(CourseId::new("FIS100"), CompletionState::InProgress);
    repo.save(&record).await.expect("save");

    let loaded = repo.load().await.expect("load");
    assert_eq!(loaded, record);
    assert_eq!(
        loaded.get(&CourseId::new("MAT101")),
        CompletionState::Approved
    );
}

#[tokio::test]
async fn sqlite_load_without_saved_record_is_empty() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_absent?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let loaded = repo.load().await.expect("load");
    assert!(loaded.is_empty());
}

#[tokio::test]
async fn sqlite_save_keeps_a_single_row() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_single_row?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let mut first = ProgressRecord::new();
    first.set(CourseId::new("MAT101"), CompletionState::InProgress);
    repo.save(&first).await.expect("save first");

    let mut second = ProgressRecord::new();
    second.set(CourseId::new("MAT101"), CompletionState::Approved);
    repo.save(&second).await.expect("save second");

    let loaded = repo.load().await.expect("load");
    assert_eq!(loaded, second);

    let row = sqlx::query("SELECT COUNT(*) AS n FROM progress_records")
        .fetch_one(repo.pool())
        .await
        .expect("count");
    let count: i64 = row.try_get("n").expect("column");
    assert_eq!(count, 1);
}

#[tokio::test]
async fn sqlite_recovers_from_malformed_payload() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_malformed?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    sqlx::query("INSERT INTO progress_records (namespace, payload) VALUES (?1, ?2)")
        .bind("pensum_manager_states")
        .bind("{ not json")
        .execute(repo.pool())
        .await
        .expect("insert garbage");

    let loaded = repo.load().await.expect("load");
    assert!(loaded.is_empty());

    // A later save writes a clean payload over the garbage.
    let mut record = ProgressRecord::new();
    record.set(CourseId::new("MAT101"), CompletionState::Approved);
    repo.save(&record).await.expect("save");
    assert_eq!(repo.load().await.expect("reload"), record);
}

#[tokio::test]
async fn sqlite_migrate_is_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");

    let mut record = ProgressRecord::new();
    record.set(CourseId::new("MAT101"), CompletionState::InProgress);
    repo.save(&record).await.expect("save");
    assert_eq!(repo.load().await.expect("load"), record);
}
