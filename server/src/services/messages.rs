//! Message services - Sidebar, storico conversazione e invio messaggi

use crate::core::{AppError, AppState};
use crate::dtos::{CreateMessageDTO, MessageDTO, SendMessageDTO, UserDTO, WsEventDTO};
use crate::entities::User;
use crate::media::MediaUpload;
use crate::repositories::{Create, Read};
use crate::ws::InternalSignal;
use axum::{
    Extension,
    extract::{Json, Path, State},
    http::StatusCode,
};
use axum_macros::debug_handler;
use chrono::Utc;
use emotion::Classify;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id))]
pub async fn get_users_for_sidebar(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
) -> Result<Json<Vec<UserDTO>>, AppError> {
    debug!("Listing users for sidebar");
    let users: Vec<UserDTO> = state
        .user
        .find_all_except(&current_user.user_id)
        .await?
        .into_iter()
        .map(UserDTO::from)
        .collect();

    info!("Retrieved {} users", users.len());
    Ok(Json(users))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.user_id, peer_id = %user_id))]
pub async fn get_messages(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(user_id): Path<i32>,
) -> Result<Json<Vec<MessageDTO>>, AppError> {
    debug!("Loading conversation");
    // l'emozione è quella salvata all'invio, non viene ricalcolata
    let messages: Vec<MessageDTO> = state
        .msg
        .find_conversation(&current_user.user_id, &user_id)
        .await?
        .into_iter()
        .map(MessageDTO::from)
        .collect();

    info!("Retrieved {} messages", messages.len());
    Ok(Json(messages))
}

#[debug_handler]
#[instrument(skip(state, current_user, body), fields(user_id = %current_user.user_id, receiver_id = %receiver_id))]
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<User>,
    Path(receiver_id): Path<i32>,
    Json(body): Json<SendMessageDTO>,
) -> Result<(StatusCode, Json<MessageDTO>), AppError> {
    debug!("Sending message");
    // 1. Validare il body: testo o immagine obbligatori, lunghezza massima del testo
    // 2. Il destinatario deve esistere e non può essere il mittente
    // 3. Caricare l'immagine, se presente, ottenendo un url durevole
    // 4. Calcolare l'emozione sul testo (sempre, indipendentemente dal toggle del client)
    // 5. Salvare il messaggio
    // 6. Notificare il destinatario se online e ritornare 201 con il messaggio salvato

    body.validate()?;
    if !body.has_content() {
        return Err(AppError::bad_request("Message must contain text or an image"));
    }

    if receiver_id == current_user.user_id {
        return Err(AppError::bad_request("Cannot send a message to yourself"));
    }
    if state.user.read(&receiver_id).await?.is_none() {
        return Err(AppError::not_found("Receiver not found"));
    }

    let image = match body.image_payload() {
        Some(payload) => Some(state.media.upload(payload).await?),
        None => None,
    };

    let text = body.trimmed_text().map(str::to_string);
    let emotion = state.classifier.classify(text.as_deref());
    debug!(emotion = %emotion, "Message classified");

    let created = state
        .msg
        .create(&CreateMessageDTO {
            sender_id: current_user.user_id,
            receiver_id,
            text,
            image: image.clone(),
            emotion,
            created_at: Utc::now(),
        })
        .await;

    let message = match created {
        Ok(message) => message,
        Err(e) => {
            // il messaggio non esiste: l'immagine caricata resterebbe orfana
            if let Some(url) = &image {
                if let Err(err) = state.media.remove(url).await {
                    warn!("Failed to remove orphaned image {}: {}", url, err);
                }
            }
            return Err(e.into());
        }
    };

    let dto = MessageDTO::from(message);
    let delivered = state.users_online.send_server_message_if_online(
        &receiver_id,
        InternalSignal::Event(WsEventDTO::NewMessage(dto.clone())),
    );

    info!(message_id = dto.message_id, delivered, "Message sent");
    Ok((StatusCode::CREATED, Json(dto)))
}
