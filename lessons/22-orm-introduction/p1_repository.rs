//! Lesson 22: Repository pattern over SQLite
//!
//! Row structs map to and from tables, relations are loaded explicitly,
//! and callers only see the `UserRepository` trait.
//!
//! Run with: cargo run --bin lesson_22_repository

use lesson_course::api::models::{NewPost, NewUser, UserUpdate};
use lesson_course::api::{RepoError, SqliteUserRepository, UserRepository};
use lesson_course::{banner, key_points, section};

fn main() -> anyhow::Result<()> {
    banner("Repository Pattern");

    let scratch = tempfile::tempdir()?;
    let repo = SqliteUserRepository::open(scratch.path().join("tutorial.db"))?;
    println!("schema version {}\n", repo.schema_version()?);

    section("Create");
    let alice = repo.create(NewUser::new("Alice", "alice@example.com"))?;
    let bob = repo.create(NewUser::new("Bob", "bob@example.com"))?;
    println!("created #{} {} and #{} {}", alice.id, alice.name, bob.id, bob.name);

    match repo.create(NewUser::new("Alice Again", "ALICE@example.com")) {
        Err(RepoError::Conflict(email)) => println!("duplicate email rejected: {}", email),
        other => println!("unexpected: {:?}", other),
    }

    println!();
    section("Read");
    for user in repo.list()? {
        println!("#{} {} <{}> created {}", user.id, user.name, user.email, user.created_at);
    }

    println!();
    section("Update");
    let updated = repo.update(
        alice.id,
        UserUpdate {
            name: Some("Alice Smith".to_string()),
            email: None,
        },
    )?;
    println!("{} (updated {})", updated.name, updated.updated_at);

    println!();
    section("Relations");
    for (title, published) in [("Hello, SQLite", true), ("Draft notes", false)] {
        repo.create_post(NewPost {
            user_id: alice.id,
            title: title.to_string(),
            content: format!("{} body", title),
            published,
        })?;
    }
    let with_posts = repo.get_with_posts(alice.id)?;
    println!("{} has {} post(s):", with_posts.name, with_posts.posts.len());
    for post in &with_posts.posts {
        println!("  [{}] {}", if post.published { "published" } else { "draft" }, post.title);
    }
    match repo.create_post(NewPost {
        user_id: 999,
        title: "orphan".to_string(),
        content: String::new(),
        published: false,
    }) {
        Err(RepoError::NotFound(id)) => println!("post for missing user {} rejected", id),
        other => println!("unexpected: {:?}", other),
    }

    println!();
    section("Delete");
    repo.delete(alice.id)?;
    println!("users left: {}", repo.count()?);
    println!("posts of deleted user: {}", repo.posts_for_user(alice.id)?.len());
    let lookup = repo
        .get(alice.id)
        .map(|_| "found".to_string())
        .unwrap_or_else(|e| e.to_string());
    println!("get deleted: {}", lookup);

    key_points(&[
        "Keep SQL behind a trait so handlers never see the driver",
        "Map constraint failures to domain errors like Conflict and NotFound",
        "Load relations explicitly instead of lazily",
        "Foreign keys with ON DELETE CASCADE keep child rows consistent",
    ]);
    Ok(())
}
