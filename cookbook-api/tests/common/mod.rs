//! Shared setup for API integration tests

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use cookbook_api::{create_router, SESSION_COOKIE};
use cookbook_app::infrastructure::db::run_migrations;
use cookbook_app::infrastructure::identity::FakeIdentityProvider;
use cookbook_app::infrastructure::image_host::FakeImageHost;
use cookbook_app::AppContext;
use sea_orm::{ConnectOptions, Database};
use serde_json::{json, Value};

pub struct TestApp {
    pub server: TestServer,
    pub images: Arc<FakeImageHost>,
}

/// Server over a fresh in-memory database with fake identity and image hosts
pub async fn create_test_app() -> TestApp {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await.expect("in-memory sqlite");
    run_migrations(&db).await.expect("schema");

    let images = Arc::new(FakeImageHost::new());
    let ctx = AppContext::new(db, Arc::new(FakeIdentityProvider::new()), images.clone());
    let server = TestServer::new(create_router(ctx, false)).expect("Failed to create test server");

    TestApp { server, images }
}

/// Registers a user and returns the session cookie value
pub async fn register(server: &TestServer, name: &str, email: &str) -> String {
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "name": name,
            "email": email,
            "password": "secret123",
        }))
        .await;
    assert_eq!(response.status_code(), 201);

    response
        .maybe_cookie(SESSION_COOKIE)
        .expect("No session cookie")
        .value()
        .to_string()
}

pub fn session(value: &str) -> cookie::Cookie<'static> {
    cookie::Cookie::new(SESSION_COOKIE, value.to_string())
}

pub fn recipe_json(title: &str, cooking_time: i64, difficulty: &str) -> Value {
    json!({
        "title": title,
        "description": "Family recipe",
        "category": "Dinner",
        "difficulty": difficulty,
        "cooking_time": cooking_time,
        "ingredients": "2 eggs\n\n1 cup flour\n",
        "steps": ["Mix", "Cook"],
    })
}

pub fn recipe_form(recipe: &Value) -> MultipartForm {
    MultipartForm::new().add_text("recipe", recipe.to_string())
}

pub fn recipe_form_with_image(recipe: &Value) -> MultipartForm {
    recipe_form(recipe).add_part(
        "image",
        Part::bytes(vec![0xFF, 0xD8, 0xFF])
            .file_name("dish.jpg")
            .mime_type("image/jpeg"),
    )
}

/// Creates a recipe as the given session and returns its id
pub async fn create_recipe(server: &TestServer, cookie: &str, recipe: &Value) -> String {
    let response = server
        .post("/api/recipes")
        .add_cookie(session(cookie))
        .multipart(recipe_form(recipe))
        .await;
    assert_eq!(response.status_code(), 201);
    response.json::<Value>()["id"]
        .as_str()
        .expect("id in response")
        .to_string()
}
