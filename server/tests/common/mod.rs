#![allow(dead_code)]

use axum_test::TestServer;
use emotion::SentimentClassifier;
use server::core::AppState;
use server::media::LocalMediaStore;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use std::sync::Arc;

pub const TEST_JWT_SECRET: &str = "ilmiobellissimosegretochevaassolutamentecambiato";

/// Limite delle immagini nei test, abbastanza piccolo da provare il 413
pub const TEST_MAX_IMAGE_BYTES: usize = 4 * 1024;

/// PNG 1x1 trasparente come data url
pub const PNG_DATA_URL: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

/// Crea un AppState per i test
///
/// # Arguments
/// * `pool` - Connection pool SQLite creato da `#[sqlx::test]`
///
/// # Returns
/// Arc<AppState> con il JWT secret di test, il lessico incorporato
/// e uno store media in una directory temporanea dedicata
pub fn create_test_state(pool: SqlitePool) -> Arc<AppState> {
    let media_dir = std::env::temp_dir().join(format!("chat-media-{}", uuid::Uuid::new_v4()));
    let media = LocalMediaStore::new(media_dir, "/media", TEST_MAX_IMAGE_BYTES);
    Arc::new(AppState::new(
        pool,
        TEST_JWT_SECRET.to_string(),
        SentimentClassifier::with_builtin_lexicon(),
        media,
    ))
}

/// Crea un TestServer per i test
pub fn create_test_server(state: Arc<AppState>) -> TestServer {
    let app = server::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// Genera un JWT token valido per 24 ore
pub fn create_test_jwt(user_id: i32, username: &str) -> String {
    server::auth::encode_jwt(username.to_string(), user_id, TEST_JWT_SECRET)
        .expect("Failed to create JWT token")
}

/// Token per gli utenti dei fixtures
pub fn alice_token() -> String {
    create_test_jwt(1, "alice")
}

pub fn bob_token() -> String {
    create_test_jwt(2, "bob")
}

/// Registra un utente e ritorna il body di risposta
pub async fn register(server: &TestServer, username: &str, password: &str) -> Value {
    let response = server
        .post("/auth/register")
        .json(&json!({ "username": username, "password": password }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}
