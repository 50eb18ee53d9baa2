//! Lesson 13: HTTP client with reqwest
//!
//! Run with: cargo run --bin lesson_13_http_client [base-url]
//!
//! Without a base URL the lesson starts its own users API on a free port.

use std::sync::Arc;
use std::time::Duration;

use lesson_course::api::models::{NewUser, UserUpdate};
use lesson_course::api::{AppState, InMemoryUserRepository, Server, UserClient};
use lesson_course::{banner, key_points, section};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    banner("Rust HTTP Client");

    let (base_url, local) = match std::env::args().nth(1) {
        Some(url) => (url, None),
        None => {
            let state = AppState::new(Arc::new(InMemoryUserRepository::seeded()));
            let server = Server::bind(([127, 0, 0, 1], 0).into(), state).await?.spawn()?;
            (server.url(""), Some(server))
        }
    };
    println!("Talking to {}\n", base_url);

    let client = UserClient::new(base_url.as_str(), Duration::from_secs(5))?;

    section("1. Simple GET");
    let info = client.index().await?;
    println!("{}", serde_json::to_string_pretty(&info)?);
    println!("health: {}", client.health().await?);

    println!();
    section("2. GET a JSON list");
    for user in client.list_users().await? {
        println!("#{} {} <{}>", user.id, user.name, user.email);
    }

    println!();
    section("3. POST JSON");
    let created = client
        .create_user(&NewUser::new("Charlie", "charlie@example.com"))
        .await?;
    println!("created #{} at {}", created.id, created.created_at);

    println!();
    section("4. PUT and DELETE");
    let update = UserUpdate {
        name: Some("Charles".to_string()),
        email: None,
    };
    let updated = client.update_user(created.id, &update).await?;
    println!("renamed to {}", updated.name);
    client.delete_user(created.id).await?;
    println!("deleted #{}", created.id);

    println!();
    section("5. Handling errors");
    match client.get_user(created.id).await {
        Ok(user) => println!("still there: {:?}", user),
        Err(err) => println!("{} (status {:?})", err, err.status()),
    }
    match client.create_user(&NewUser::new("X", "not-an-email")).await {
        Ok(_) => println!("unexpectedly accepted"),
        Err(err) => println!("{}", err),
    }

    if let Some(server) = local {
        server.stop().await?;
    }

    key_points(&[
        "Build one reqwest::Client and reuse it; it pools connections",
        "Set a timeout on the client so calls cannot hang forever",
        ".json() serialises request bodies and deserialises responses",
        "Check the status code before decoding the body",
    ]);
    Ok(())
}
