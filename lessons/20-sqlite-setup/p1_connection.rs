//! Lesson 20: Database setup with SQLite
//!
//! Run with: cargo run --bin lesson_20_sqlite_setup [path]
//!
//! Without a path the lesson works in a scratch directory.

use std::path::PathBuf;

use anyhow::Context;
use lesson_course::api::SqliteUserRepository;
use lesson_course::{banner, done, key_points, section};
use rusqlite::{params, Connection};

#[derive(Debug)]
struct TestRow {
    id: i64,
    name: String,
    value: i64,
}

fn connection_test(conn: &Connection) -> rusqlite::Result<Vec<TestRow>> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS test_table (
             id    INTEGER PRIMARY KEY AUTOINCREMENT,
             name  TEXT NOT NULL,
             value INTEGER NOT NULL
         );",
    )?;
    done("table created");

    for (name, value) in [("first", 10), ("second", 20), ("third", 30)] {
        conn.execute(
            "INSERT INTO test_table (name, value) VALUES (?1, ?2)",
            params![name, value],
        )?;
    }
    done("data inserted");

    let mut stmt = conn.prepare("SELECT id, name, value FROM test_table ORDER BY id")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(TestRow {
                id: row.get(0)?,
                name: row.get(1)?,
                value: row.get(2)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    conn.execute_batch("DROP TABLE test_table;")?;
    done("table dropped");
    Ok(rows)
}

fn main() -> anyhow::Result<()> {
    banner("SQLite Connection Test");

    let scratch = tempfile::tempdir()?;
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| scratch.path().join("tutorial.db"));

    section("Raw connection");
    let conn = Connection::open(&path).with_context(|| format!("opening {}", path.display()))?;
    let version: String = conn.query_row("SELECT sqlite_version()", [], |row| row.get(0))?;
    done(&format!("connected to SQLite {} at {}", version, path.display()));
    for row in connection_test(&conn)? {
        println!("  {:?} (id {}, {} = {})", row, row.id, row.name, row.value);
    }
    drop(conn);

    println!();
    section("Migrations");
    let repo = SqliteUserRepository::open(&path)?;
    println!("schema version after open: {}", repo.schema_version()?);
    println!("migrations applied on a second run: {}", repo.migrate()?);
    println!("users in table: {}", repo.count()?);

    key_points(&[
        "rusqlite's bundled feature compiles SQLite in, no server needed",
        "Bind values with ?1 placeholders, never string formatting",
        "Record the schema version and apply only newer migrations",
        "Run each migration in a transaction",
    ]);
    Ok(())
}
