//! User storage behind one trait, with an in-memory map for the early REST
//! lessons and SQLite for the database lessons and the production service.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, RwLock};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use thiserror::Error;

use super::models::{NewPost, NewUser, Post, User, UserId, UserUpdate};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("user {0} not found")]
    NotFound(UserId),
    #[error("email {0} is already registered")]
    Conflict(String),
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("corrupt timestamp {0}")]
    BadTimestamp(i64),
}

pub type RepoResult<T> = Result<T, RepoError>;

pub trait UserRepository: Send + Sync {
    /// All users ordered by id.
    fn list(&self) -> RepoResult<Vec<User>>;
    fn get(&self, id: UserId) -> RepoResult<User>;
    fn create(&self, new: NewUser) -> RepoResult<User>;
    fn update(&self, id: UserId, changes: UserUpdate) -> RepoResult<User>;
    fn delete(&self, id: UserId) -> RepoResult<()>;
}

//==============================================================================
// In-memory
//==============================================================================

#[derive(Debug, Default)]
struct Store {
    users: BTreeMap<UserId, User>,
    next_id: UserId,
}

impl Store {
    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(email) && Some(u.id) != except)
    }
}

/// Map-backed repository. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: RwLock<Store>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated with Alice and Bob, like the REST lesson's demo data.
    pub fn seeded() -> Self {
        let repo = Self::new();
        for (name, email) in [("Alice", "alice@example.com"), ("Bob", "bob@example.com")] {
            // emails are distinct so this cannot conflict
            let _ = repo.create(NewUser::new(name, email));
        }
        repo
    }
}

impl UserRepository for InMemoryUserRepository {
    fn list(&self) -> RepoResult<Vec<User>> {
        let store = self.store.read().unwrap_or_else(|e| e.into_inner());
        Ok(store.users.values().cloned().collect())
    }

    fn get(&self, id: UserId) -> RepoResult<User> {
        let store = self.store.read().unwrap_or_else(|e| e.into_inner());
        store.users.get(&id).cloned().ok_or(RepoError::NotFound(id))
    }

    fn create(&self, new: NewUser) -> RepoResult<User> {
        let mut store = self.store.write().unwrap_or_else(|e| e.into_inner());
        if store.email_taken(&new.email, None) {
            return Err(RepoError::Conflict(new.email));
        }
        store.next_id += 1;
        let now = Utc::now();
        let user = User {
            id: store.next_id,
            name: new.name,
            email: new.email,
            created_at: now,
            updated_at: now,
            posts: Vec::new(),
        };
        store.users.insert(user.id, user.clone());
        Ok(user)
    }

    fn update(&self, id: UserId, changes: UserUpdate) -> RepoResult<User> {
        let mut store = self.store.write().unwrap_or_else(|e| e.into_inner());
        if let Some(email) = &changes.email {
            if store.email_taken(email, Some(id)) {
                return Err(RepoError::Conflict(email.clone()));
            }
        }
        let user = store.users.get_mut(&id).ok_or(RepoError::NotFound(id))?;
        changes.apply(user);
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    fn delete(&self, id: UserId) -> RepoResult<()> {
        let mut store = self.store.write().unwrap_or_else(|e| e.into_inner());
        store
            .users
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound(id))
    }
}

//==============================================================================
// SQLite
//==============================================================================

type Migration = fn(&Connection) -> rusqlite::Result<()>;

const MIGRATIONS: &[Migration] = &[create_users, create_posts];

fn create_users(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE users (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            name       TEXT NOT NULL CHECK (length(name) <= 100),
            email      TEXT NOT NULL UNIQUE COLLATE NOCASE CHECK (length(email) <= 100),
            created_ts INTEGER NOT NULL,
            updated_ts INTEGER NOT NULL
        );",
    )
}

fn create_posts(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE posts (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id    INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            title      TEXT NOT NULL CHECK (length(title) <= 200),
            content    TEXT NOT NULL DEFAULT '',
            published  INTEGER NOT NULL DEFAULT 0,
            created_ts INTEGER NOT NULL,
            updated_ts INTEGER NOT NULL
        );
        CREATE INDEX idx_posts_user_id ON posts(user_id);",
    )
}

fn timestamp(ms: i64) -> RepoResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms).ok_or(RepoError::BadTimestamp(ms))
}

fn is_constraint(err: &rusqlite::Error, extended_code: i32) -> bool {
    matches!(err, rusqlite::Error::SqliteFailure(e, _) if e.extended_code == extended_code)
}

const USER_COLUMNS: &str = "id, name, email, created_ts, updated_ts";
const POST_COLUMNS: &str = "id, user_id, title, content, published, created_ts, updated_ts";

struct UserRow {
    id: UserId,
    name: String,
    email: String,
    created_ts: i64,
    updated_ts: i64,
}

impl UserRow {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(UserRow {
            id: row.get(0)?,
            name: row.get(1)?,
            email: row.get(2)?,
            created_ts: row.get(3)?,
            updated_ts: row.get(4)?,
        })
    }

    fn into_user(self) -> RepoResult<User> {
        Ok(User {
            id: self.id,
            name: self.name,
            email: self.email,
            created_at: timestamp(self.created_ts)?,
            updated_at: timestamp(self.updated_ts)?,
            posts: Vec::new(),
        })
    }
}

struct PostRow {
    id: i64,
    user_id: UserId,
    title: String,
    content: String,
    published: bool,
    created_ts: i64,
    updated_ts: i64,
}

impl PostRow {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(PostRow {
            id: row.get(0)?,
            user_id: row.get(1)?,
            title: row.get(2)?,
            content: row.get(3)?,
            published: row.get::<_, i64>(4)? != 0,
            created_ts: row.get(5)?,
            updated_ts: row.get(6)?,
        })
    }

    fn into_post(self) -> RepoResult<Post> {
        Ok(Post {
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            content: self.content,
            published: self.published,
            created_at: timestamp(self.created_ts)?,
            updated_at: timestamp(self.updated_ts)?,
        })
    }
}

/// SQLite-backed repository. One connection guarded by a mutex; callers on
/// an async runtime should go through `spawn_blocking`.
pub struct SqliteUserRepository {
    conn: Mutex<Connection>,
}

impl SqliteUserRepository {
    /// Opens `path` (or an in-memory database for `:memory:`) and applies
    /// pending migrations.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        let path = path.as_ref();
        let conn = if path == Path::new(":memory:") {
            Connection::open_in_memory()?
        } else {
            Connection::open(path)?
        };
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> RepoResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> RepoResult<Self> {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let repo = SqliteUserRepository {
            conn: Mutex::new(conn),
        };
        repo.migrate()?;
        Ok(repo)
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Applies every migration newer than the recorded schema version.
    /// Returns how many ran.
    pub fn migrate(&self) -> RepoResult<usize> {
        let mut conn = self.conn();
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY);",
        )?;
        let current: usize = conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get::<_, i64>(0),
        )? as usize;

        let mut applied = 0;
        for (index, migration) in MIGRATIONS.iter().enumerate().skip(current) {
            let version = index as i64 + 1;
            let tx = conn.transaction()?;
            migration(&tx)?;
            tx.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
            tx.commit()?;
            tracing::debug!(version, "applied migration");
            applied += 1;
        }
        Ok(applied)
    }

    pub fn schema_version(&self) -> RepoResult<i64> {
        Ok(self.conn().query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )?)
    }

    fn fetch(conn: &Connection, id: UserId) -> RepoResult<User> {
        let sql = format!("SELECT {} FROM users WHERE id = ?1", USER_COLUMNS);
        conn.query_row(&sql, [id], UserRow::from_row)
            .optional()?
            .ok_or(RepoError::NotFound(id))?
            .into_user()
    }

    fn posts_of(conn: &Connection, user_id: UserId) -> RepoResult<Vec<Post>> {
        let sql = format!(
            "SELECT {} FROM posts WHERE user_id = ?1 ORDER BY id",
            POST_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([user_id], PostRow::from_row)?;

        let mut posts = Vec::new();
        for row in rows {
            posts.push(row?.into_post()?);
        }
        Ok(posts)
    }

    pub fn create_post(&self, new: NewPost) -> RepoResult<Post> {
        let conn = self.conn();
        let now = Utc::now().timestamp_millis();
        conn.execute(
            "INSERT INTO posts (user_id, title, content, published, created_ts, updated_ts)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![new.user_id, new.title, new.content, new.published as i64, now],
        )
        .map_err(|e| {
            if is_constraint(&e, rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY) {
                RepoError::NotFound(new.user_id)
            } else {
                RepoError::Database(e)
            }
        })?;

        let id = conn.last_insert_rowid();
        let sql = format!("SELECT {} FROM posts WHERE id = ?1", POST_COLUMNS);
        conn.query_row(&sql, [id], PostRow::from_row)?.into_post()
    }

    pub fn posts_for_user(&self, user_id: UserId) -> RepoResult<Vec<Post>> {
        Self::posts_of(&self.conn(), user_id)
    }

    /// The user with their posts filled in.
    pub fn get_with_posts(&self, id: UserId) -> RepoResult<User> {
        let conn = self.conn();
        let mut user = Self::fetch(&conn, id)?;
        user.posts = Self::posts_of(&conn, id)?;
        Ok(user)
    }

    pub fn count(&self) -> RepoResult<i64> {
        Ok(self
            .conn()
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?)
    }
}

fn map_unique(err: rusqlite::Error, email: &str) -> RepoError {
    if is_constraint(&err, rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE) {
        RepoError::Conflict(email.to_string())
    } else {
        RepoError::Database(err)
    }
}

impl UserRepository for SqliteUserRepository {
    fn list(&self) -> RepoResult<Vec<User>> {
        let conn = self.conn();
        let sql = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map([], UserRow::from_row)?;

        let mut users = Vec::new();
        for row in rows {
            users.push(row?.into_user()?);
        }
        Ok(users)
    }

    fn get(&self, id: UserId) -> RepoResult<User> {
        Self::fetch(&self.conn(), id)
    }

    fn create(&self, new: NewUser) -> RepoResult<User> {
        let conn = self.conn();
        let now = Utc::now().timestamp_millis();
        conn.execute(
            "INSERT INTO users (name, email, created_ts, updated_ts) VALUES (?1, ?2, ?3, ?3)",
            params![new.name, new.email, now],
        )
        .map_err(|e| map_unique(e, &new.email))?;
        Self::fetch(&conn, conn.last_insert_rowid())
    }

    fn update(&self, id: UserId, changes: UserUpdate) -> RepoResult<User> {
        let conn = self.conn();
        let mut user = Self::fetch(&conn, id)?;
        changes.apply(&mut user);
        let now = Utc::now().timestamp_millis();
        conn.execute(
            "UPDATE users SET name = ?1, email = ?2, updated_ts = ?3 WHERE id = ?4",
            params![user.name, user.email, now, id],
        )
        .map_err(|e| map_unique(e, &user.email))?;
        Self::fetch(&conn, id)
    }

    fn delete(&self, id: UserId) -> RepoResult<()> {
        let affected = self
            .conn()
            .execute("DELETE FROM users WHERE id = ?1", [id])?;
        if affected == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn repos() -> Vec<(&'static str, Box<dyn UserRepository>)> {
        vec![
            ("memory", Box::new(InMemoryUserRepository::new())),
            ("sqlite", Box::new(SqliteUserRepository::open_in_memory().unwrap())),
        ]
    }

    #[test]
    fn test_crud_round_trip() {
        for (kind, repo) in repos() {
            let alice = repo.create(NewUser::new("Alice", "alice@example.com")).unwrap();
            let bob = repo.create(NewUser::new("Bob", "bob@example.com")).unwrap();
            assert_eq!(alice.id, 1, "{kind}");
            assert_eq!(bob.id, 2, "{kind}");

            assert_eq!(repo.get(alice.id).unwrap(), alice, "{kind}");
            let names: Vec<_> = repo.list().unwrap().into_iter().map(|u| u.name).collect();
            assert_eq!(names, vec!["Alice", "Bob"], "{kind}");

            let changed = repo
                .update(
                    bob.id,
                    UserUpdate {
                        name: Some("Robert".to_string()),
                        email: None,
                    },
                )
                .unwrap();
            assert_eq!(changed.name, "Robert", "{kind}");
            assert_eq!(changed.email, "bob@example.com", "{kind}");
            assert!(changed.updated_at >= changed.created_at, "{kind}");

            repo.delete(alice.id).unwrap();
            assert!(matches!(repo.get(alice.id), Err(RepoError::NotFound(1))), "{kind}");
            assert!(matches!(repo.delete(alice.id), Err(RepoError::NotFound(1))), "{kind}");
        }
    }

    #[test]
    fn test_duplicate_email_conflicts() {
        for (kind, repo) in repos() {
            repo.create(NewUser::new("Alice", "alice@example.com")).unwrap();
            let bob = repo.create(NewUser::new("Bob", "bob@example.com")).unwrap();

            let err = repo
                .create(NewUser::new("Other", "ALICE@example.com"))
                .unwrap_err();
            assert!(matches!(err, RepoError::Conflict(_)), "{kind}: {err}");

            let err = repo
                .update(
                    bob.id,
                    UserUpdate {
                        name: None,
                        email: Some("alice@example.com".to_string()),
                    },
                )
                .unwrap_err();
            assert!(matches!(err, RepoError::Conflict(_)), "{kind}: {err}");
        }
    }

    #[test]
    fn test_update_missing_user() {
        for (kind, repo) in repos() {
            let err = repo.update(42, UserUpdate::default()).unwrap_err();
            assert!(matches!(err, RepoError::NotFound(42)), "{kind}");
        }
    }

    #[test]
    fn test_ids_are_not_reused() {
        for (kind, repo) in repos() {
            let first = repo.create(NewUser::new("Alice", "alice@example.com")).unwrap();
            repo.delete(first.id).unwrap();
            let second = repo.create(NewUser::new("Alice", "alice@example.com")).unwrap();
            assert!(second.id > first.id, "{kind}");
        }
    }

    #[test]
    fn test_seeded_memory_repo() {
        let repo = InMemoryUserRepository::seeded();
        assert_eq!(repo.list().unwrap().len(), 2);
    }

    #[test]
    fn test_migrations_run_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("test.db");

        let repo = SqliteUserRepository::open(&path).unwrap();
        assert_eq!(repo.schema_version().unwrap(), MIGRATIONS.len() as i64);
        repo.create(NewUser::new("Alice", "alice@example.com")).unwrap();
        assert_eq!(repo.migrate().unwrap(), 0);
        drop(repo);

        let reopened = SqliteUserRepository::open(&path).unwrap();
        assert_eq!(reopened.count().unwrap(), 1);
    }

    #[test]
    fn test_posts_follow_their_user() {
        let repo = SqliteUserRepository::open_in_memory().unwrap();
        let alice = repo.create(NewUser::new("Alice", "alice@example.com")).unwrap();

        let post = repo
            .create_post(NewPost {
                user_id: alice.id,
                title: "Hello".to_string(),
                content: "First post".to_string(),
                published: true,
            })
            .unwrap();
        assert!(post.published);

        let loaded = repo.get_with_posts(alice.id).unwrap();
        assert_eq!(loaded.posts, vec![post]);

        let orphan = repo.create_post(NewPost {
            user_id: 99,
            title: "Nobody".to_string(),
            content: String::new(),
            published: false,
        });
        assert!(matches!(orphan, Err(RepoError::NotFound(99))));

        repo.delete(alice.id).unwrap();
        assert!(repo.posts_for_user(alice.id).unwrap().is_empty());
    }
}
