//! Auth services - Gestione autenticazione e registrazione utenti

use crate::core::auth::{TOKEN_COOKIE, TOKEN_TTL_HOURS};
use crate::core::{AppError, AppState, encode_jwt};
use crate::dtos::{CreateUserDTO, LoginDTO, UserDTO};
use crate::entities::User;
use crate::repositories::Create;
use axum::{
    Extension,
    extract::{Json, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

fn header_value(value: &str) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(value).map_err(|_| AppError::internal_server_error("Invalid header value"))
}

#[instrument(skip(state, body), fields(username = %body.username))]
pub async fn login_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginDTO>, // JSON body
) -> Result<impl IntoResponse, AppError> {
    debug!("Login attempt");
    // 1. Cercare l'utente nel database tramite username
    // 2. Se l'utente non esiste o la password non corrisponde, ritornare UNAUTHORIZED
    // 3. Generare un token JWT con userid, username e il segreto
    // 4. Costruire un cookie HttpOnly, Secure, SameSite=Lax con il token e durata 24 ore
    // 5. Ritornare il DTO dell'utente con gli headers Set-Cookie e Authorization

    let user = match state.user.find_by_username(&body.username).await? {
        Some(user) if user.verify_password(&body.password) => user,
        _ => {
            warn!("Invalid credentials");
            return Err(AppError::unauthorized("Invalid username or password"));
        }
    };

    let token = encode_jwt(user.username.clone(), user.user_id, &state.jwt_secret)?;

    let cookie_value = format!(
        "{}={}; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age={}",
        TOKEN_COOKIE,
        token,
        TOKEN_TTL_HOURS * 60 * 60
    );

    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, header_value(&cookie_value)?);
    headers.insert(
        header::AUTHORIZATION,
        header_value(&format!("Bearer {}", token))?,
    );

    info!(user_id = user.user_id, "User logged in");
    Ok((StatusCode::OK, headers, Json(UserDTO::from(user))))
}

#[instrument(skip(state, body), fields(username = %body.username))]
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateUserDTO>, // JSON body
) -> Result<(StatusCode, Json<UserDTO>), AppError> {
    debug!("Registering new user");
    // 1. Validare il DTO con validator (formato username, lunghezza e robustezza password)
    // 2. Se esiste già un utente con lo stesso username, ritornare CONFLICT
    // 3. Generare l'hash della password e salvare il nuovo utente
    // 4. Ritornare il DTO dell'utente creato

    body.validate()?;

    if state.user.find_by_username(&body.username).await?.is_some() {
        warn!("Username already taken");
        return Err(AppError::conflict("Username already exists"));
    }

    let password_hash = User::hash_password(&body.password)
        .map_err(|_| AppError::internal_server_error("Failed to hash password"))?;

    let new_user = CreateUserDTO {
        username: body.username,
        password: password_hash,
    };

    // due registrazioni concorrenti possono superare entrambe il controllo sopra:
    // decide il vincolo UNIQUE
    let created_user = state.user.create(&new_user).await.map_err(|e| match e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            warn!("Username taken by a concurrent registration");
            AppError::conflict("Username already exists")
        }
        other => AppError::from(other),
    })?;

    info!(user_id = created_user.user_id, "User registered");
    Ok((StatusCode::CREATED, Json(UserDTO::from(created_user))))
}

/// Cancella il cookie del token; il bearer lato client va semplicemente scartato
#[instrument]
pub async fn logout_user() -> Result<impl IntoResponse, AppError> {
    debug!("Logging out");
    let cookie_value = format!(
        "{}=; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age=0",
        TOKEN_COOKIE
    );
    let mut headers = HeaderMap::new();
    headers.insert(header::SET_COOKIE, header_value(&cookie_value)?);

    Ok((
        StatusCode::OK,
        headers,
        Json(json!({ "message": "Logged out successfully" })),
    ))
}

#[instrument(skip(current_user), fields(user_id = %current_user.user_id))]
pub async fn check_auth(Extension(current_user): Extension<User>) -> Json<UserDTO> {
    debug!("Auth check");
    Json(UserDTO::from(current_user))
}
