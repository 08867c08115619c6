//! WebSocket Module - Gestione WebSocket per comunicazione real-time
//!
//! Il canale WebSocket è solo in uscita: il server spinge al client
//! i nuovi messaggi ricevuti (`NewMessage`) e la lista degli utenti online
//! (`OnlineUsers`). L'invio dei messaggi passa sempre da `POST /messages/send/{id}`.

pub mod connection;
pub mod usermap;

// Re-exports pubblici
pub use connection::handle_socket;
pub use usermap::{InternalSignal, UserMap};

use crate::{AppState, entities::User};
use axum::{
    Extension,
    extract::{State, ws::WebSocketUpgrade},
    response::Response,
};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Secondi di inattività dopo i quali la connessione viene chiusa
pub const TIMEOUT_DURATION_SECONDS: u64 = 300;
/// Intervallo minimo tra due frame letti dallo stesso client
pub const RATE_LIMITER_MILLIS: u64 = 100;

/// Entry point per gestire richieste di upgrade WebSocket
/// Operazioni:
/// 1. Estrarre user_id dall'autenticazione JWT
/// 2. Eseguire upgrade HTTP -> WebSocket
/// 3. Passare la connessione ad handle_socket
#[instrument(skip(ws, state, current_user), fields(user_id = %current_user.user_id))]
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>, // ottenuto dall'autenticazione JWT
) -> Response {
    debug!("WebSocket upgrade requested");
    let user_id = current_user.user_id;

    ws.on_upgrade(move |socket| handle_socket(socket, state, user_id))
}
