use datapack_engine::SqliteDatabase;
use tempfile::TempDir;

/// Sets up logging and a scratch SQLite database in a temporary directory. The `TempDir` must be kept alive for
/// the duration of the test; dropping it deletes the database file.
pub async fn prepare_test_db() -> (TempDir, SqliteDatabase) {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    let dir = tempfile::tempdir().expect("Error creating temporary directory");
    let url = format!("sqlite://{}", dir.path().join("test_store.db").display());
    let db = SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating database");
    (dir, db)
}
