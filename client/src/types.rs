//! Tipi scambiati con il server

use chrono::{DateTime, Utc};
use emotion::Emotion;
use serde::{Deserialize, Serialize};

/// Messaggio persistito, come restituito dal server
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub message_id: i32,
    pub sender_id: i32,
    pub receiver_id: i32,
    pub text: Option<String>,
    pub image: Option<String>,
    #[serde(default)]
    pub emotion: Emotion,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserSummary {
    pub id: i32,
    pub username: String,
    pub profile_pic: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Eventi push: `{ "type": ..., "data": ... }`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum ServerEvent {
    NewMessage(ChatMessage),
    OnlineUsers(Vec<i32>),
    Error { code: u16, message: String },
}

/// Body di `POST /messages/send/{user_id}`
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SendMessageRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Data url `data:image/...;base64,...`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Serialize, Debug, Clone)]
pub(crate) struct Credentials<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_message_event_from_server() {
        let raw = json!({
            "type": "NewMessage",
            "data": {
                "message_id": 7,
                "sender_id": 2,
                "receiver_id": 1,
                "text": "yay",
                "image": null,
                "emotion": "excited",
                "created_at": "2025-01-02T09:00:00Z"
            }
        });
        match serde_json::from_value::<ServerEvent>(raw).unwrap() {
            ServerEvent::NewMessage(m) => {
                assert_eq!(m.message_id, 7);
                assert_eq!(m.emotion, Emotion::Excited);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn missing_emotion_defaults_to_neutral() {
        let raw = json!({
            "message_id": 1,
            "sender_id": 1,
            "receiver_id": 2,
            "text": "old message",
            "image": null,
            "created_at": "2025-01-02T09:00:00Z"
        });
        let message: ChatMessage = serde_json::from_value(raw).unwrap();
        assert_eq!(message.emotion, Emotion::Neutral);
    }

    #[test]
    fn send_request_omits_absent_fields() {
        let request = SendMessageRequest {
            text: Some("hi".to_string()),
            image: None,
        };
        assert_eq!(serde_json::to_value(&request).unwrap(), json!({ "text": "hi" }));
    }
}
