//! Message DTOs - Data Transfer Objects per messaggi

use crate::entities::{Emotion, Message};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Struct per gestire io col client (risposte REST ed eventi push)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MessageDTO {
    pub message_id: i32,
    pub sender_id: i32,
    pub receiver_id: i32,
    pub text: Option<String>,
    pub image: Option<String>,
    pub emotion: Emotion,
    pub created_at: DateTime<Utc>,
}

impl From<Message> for MessageDTO {
    fn from(value: Message) -> Self {
        Self {
            message_id: value.message_id,
            sender_id: value.sender_id,
            receiver_id: value.receiver_id,
            text: value.text,
            image: value.image,
            emotion: value.emotion,
            created_at: value.created_at,
        }
    }
}

/// Body di POST /messages/send/{user_id}
/// `image` è un data url (data:image/png;base64,...) da caricare sul media store
#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate)]
pub struct SendMessageDTO {
    #[validate(length(max = 5000, message = "Message text must be at most 5000 characters"))]
    pub text: Option<String>,
    pub image: Option<String>,
}

impl SendMessageDTO {
    /// Testo senza spazi iniziali/finali, `None` se vuoto
    pub fn trimmed_text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    pub fn image_payload(&self) -> Option<&str> {
        self.image.as_deref().filter(|i| !i.trim().is_empty())
    }

    /// Un messaggio deve avere testo o immagine
    pub fn has_content(&self) -> bool {
        self.trimmed_text().is_some() || self.image_payload().is_some()
    }
}

/// DTO per creare un nuovo messaggio (senza message_id)
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateMessageDTO {
    pub sender_id: i32,
    pub receiver_id: i32,
    pub text: Option<String>,
    pub image: Option<String>,
    pub emotion: Emotion,
    pub created_at: DateTime<Utc>,
}
