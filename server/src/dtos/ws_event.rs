//! WebSocket Event DTOs - Data Transfer Objects per eventi WebSocket

use crate::dtos::MessageDTO;
use serde::{Deserialize, Serialize};

/// Tagged union per eventi WebSocket
/// Serde serializza questo come:
/// { "type": "NewMessage", "data": { ... } }
/// oppure
/// { "type": "OnlineUsers", "data": [1, 2, 3] }
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum WsEventDTO {
    NewMessage(MessageDTO),
    OnlineUsers(Vec<i32>),
    Error { code: u16, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn online_users_wire_format() {
        let event = WsEventDTO::OnlineUsers(vec![1, 3]);
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({ "type": "OnlineUsers", "data": [1, 3] })
        );
    }

    #[test]
    fn error_wire_format() {
        let event = WsEventDTO::Error {
            code: 400,
            message: "nope".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({ "type": "Error", "data": { "code": 400, "message": "nope" } })
        );
    }
}
