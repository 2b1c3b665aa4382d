use rusqlite::Connection;

#[test]
fn migrate_is_idempotent() {
    let dir = tempfile::tempdir().expect("temp dir");
    let db_path = dir.path().join("migrate.sqlite");

    let mut db = roll_db::Db::open(&db_path).expect("open db");
    db.migrate().expect("first migrate");
    db.migrate().expect("second migrate");

    assert_eq!(
        db.applied_migrations().expect("applied"),
        vec!["0001_init".to_string(), "0002_add_session_storage".to_string()]
    );
}

#[test]
fn migrate_upgrades_database_without_session_table() {
    let dir = tempfile::tempdir().expect("temp dir");
    let db_path = dir.path().join("upgrade.sqlite");
    {
        let conn = Connection::open(&db_path).expect("open conn");
        let migration = include_str!("../migrations/0001_init.sql");
        conn.execute_batch(migration).expect("migrate 0001");
        conn.execute(
            "INSERT INTO schema_migration (name, applied_at) VALUES ('0001_init', '2024-01-01T00:00:00.000Z')",
            [],
        )
        .expect("record 0001");
        conn.execute(
            "INSERT INTO local_storage (key, value, updated_at) VALUES ('rollUsageData', '[]', '2024-01-01T00:00:00.000Z')",
            [],
        )
        .expect("insert blob");
    }

    let mut db = roll_db::Db::open(&db_path).expect("open db");
    db.migrate().expect("migrate db");

    assert_eq!(db.get_item("rollUsageData").expect("item").as_deref(), Some("[]"));
    db.set_welcome_shown(true).expect("session table exists");
    assert!(db.welcome_shown().expect("flag"));
}
