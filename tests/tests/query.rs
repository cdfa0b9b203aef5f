use foodshare::{
    driver::{Connection, Driver},
    Db, Value,
};
use pretty_assertions::assert_eq;
use std::{borrow::Cow, sync::Arc};
use tests::FoodTest;

#[test]
fn query_preserves_column_and_row_order() {
    let test = FoodTest::scenario();

    let table = test
        .db
        .query(
            "SELECT name, provider_id FROM providers WHERE city = ?1 ORDER BY provider_id DESC",
            &["Chennai".into()],
        )
        .unwrap();

    assert_eq!(table.columns(), ["name", "provider_id"]);
    let rows: Vec<Vec<Value>> = table.rows().map(|row| row.values().to_vec()).collect();
    assert_eq!(
        rows,
        [
            vec![Value::from("Fresh Mart"), Value::from(2)],
            vec![Value::from("Anna's Kitchen"), Value::from(1)],
        ]
    );
}

#[test]
fn query_rejects_writes() {
    let test = FoodTest::scenario();

    let err = test.db.query("DELETE FROM claims", &[]).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(test.db.claims().all().unwrap().len(), 4);
}

#[test]
fn writes_invalidate_cached_results() {
    let test = FoodTest::scenario();
    let sql = "SELECT COUNT(*) AS n FROM receivers";
    let count = |db: &Db| -> i64 { db.query(sql, &[]).unwrap().first().unwrap().get("n").unwrap() };

    let first = test.db.query(sql, &[]).unwrap();
    assert!(Arc::ptr_eq(&first, &test.db.query(sql, &[]).unwrap()));
    assert_eq!(count(&test.db), 2);

    test.db
        .execute(
            "INSERT INTO receivers (name, city) VALUES (?1, ?2)",
            &["Food Bank".into(), "Madurai".into()],
        )
        .unwrap();
    assert_eq!(count(&test.db), 3);

    // Reloading is a write too
    test.load().unwrap();
    assert_eq!(count(&test.db), 2);
}

#[test]
fn execute_reports_storage_errors() {
    let test = FoodTest::new();

    let err = test.db.execute("INSERT INTO nowhere VALUES (1)", &[]).unwrap_err();
    assert!(err.is_storage());

    let err = test
        .db
        .execute("INSERT INTO providers (city) VALUES ('Pune')", &[])
        .unwrap_err();
    assert!(err.is_storage());
}

#[test]
fn transaction_rolls_back_on_error() {
    let test = FoodTest::scenario();

    let result: foodshare::Result<()> = test.db.transaction(|tx| {
        tx.execute("DELETE FROM claims", &[])?;
        let left = tx.query("SELECT * FROM claims", &[])?;
        assert!(left.is_empty());
        foodshare::bail!("changed my mind")
    });
    assert_eq!(result.unwrap_err().to_string(), "changed my mind");

    assert_eq!(test.db.claims().all().unwrap().len(), 4);
}

#[test]
fn table_exists_tracks_schema() {
    let db = Db::builder()
        .build(foodshare::Sqlite::in_memory())
        .unwrap();
    assert!(!db.table_exists("claims").unwrap());

    db.push_schema().unwrap();
    assert!(db.table_exists("claims").unwrap());
    assert!(!db.table_exists("volunteers").unwrap());
}

#[test]
fn file_database_without_pooling() {
    let test = FoodTest::new();
    let path = test.dir().join("food.db");

    let db = Db::builder()
        .max_idle_connections(0)
        .connect(&format!("sqlite:{}", path.display()))
        .unwrap();
    db.push_schema().unwrap();
    db.execute("INSERT INTO providers (name) VALUES ('Solo')", &[]).unwrap();

    // A second handle sees the committed row
    let other = Db::connect(&format!("sqlite:{}", path.display())).unwrap();
    assert_eq!(other.providers().all().unwrap()[0].name, "Solo");
}

#[test]
fn connection_urls_are_checked() {
    let err = Db::connect("postgres://localhost/food").unwrap_err();
    assert!(err.is_invalid_connection_url());
}

/// SQLite with foreign keys switched back on for every connection, so a
/// deferred violation makes `COMMIT` itself fail.
#[derive(Debug)]
struct EnforcingSqlite(foodshare::Sqlite);

impl Driver for EnforcingSqlite {
    fn url(&self) -> Cow<'_, str> {
        self.0.url()
    }

    fn connect(&self) -> foodshare::Result<Box<dyn Connection>> {
        let mut connection = self.0.connect()?;
        connection.execute("PRAGMA foreign_keys = ON", &[])?;
        Ok(connection)
    }

    fn max_connections(&self) -> Option<usize> {
        self.0.max_connections()
    }
}

#[test]
fn failed_commit_leaves_connection_usable() {
    let db = Db::builder()
        .build(EnforcingSqlite(foodshare::Sqlite::in_memory()))
        .unwrap();
    db.push_schema().unwrap();

    let err = db
        .transaction(|tx| {
            tx.execute("PRAGMA defer_foreign_keys = ON", &[])?;
            tx.execute(
                "INSERT INTO claims (food_id, receiver_id, status) VALUES (99, 99, 'Pending')",
                &[],
            )?;
            Ok(())
        })
        .unwrap_err();
    assert!(err.is_storage());

    db.execute(
        "INSERT INTO receivers (name, city) VALUES (?1, ?2)",
        &["Hope Shelter".into(), "Chennai".into()],
    )
    .unwrap();

    assert!(db.query("SELECT * FROM claims", &[]).unwrap().is_empty());
    assert_eq!(db.receivers().all().unwrap().len(), 1);
}
