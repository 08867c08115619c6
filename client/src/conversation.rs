//! Stato della conversazione aperta

use crate::types::{ChatMessage, ServerEvent};
use std::collections::HashSet;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default)]
pub struct Conversation {
    me: i32,
    peer: Option<i32>,
    messages: Vec<ChatMessage>,
    online: HashSet<i32>,
}

impl Conversation {
    pub fn new(me: i32) -> Self {
        Self {
            me,
            ..Default::default()
        }
    }

    pub fn me(&self) -> i32 {
        self.me
    }

    pub fn peer(&self) -> Option<i32> {
        self.peer
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_online(&self, user_id: i32) -> bool {
        self.online.contains(&user_id)
    }

    /// Apre la conversazione con `peer` usando lo storico già scaricato
    pub fn select_peer(&mut self, peer: i32, history: Vec<ChatMessage>) {
        self.peer = Some(peer);
        self.messages = history;
    }

    /// Messaggio appena inviato dall'utente corrente
    pub fn push_sent(&mut self, message: ChatMessage) {
        if self.peer == Some(message.receiver_id) && message.sender_id == self.me {
            self.messages.push(message);
        }
    }

    /// Applica un evento push; ritorna `true` se lo stato visibile è cambiato
    pub fn apply_event(&mut self, event: ServerEvent) -> bool {
        match event {
            ServerEvent::NewMessage(message) => {
                // solo i messaggi del peer selezionato entrano nella vista
                if self.peer == Some(message.sender_id) {
                    self.messages.push(message);
                    true
                } else {
                    debug!(sender_id = message.sender_id, "Message for another conversation");
                    false
                }
            }
            ServerEvent::OnlineUsers(ids) => {
                self.online = ids.into_iter().collect();
                true
            }
            ServerEvent::Error { code, message } => {
                warn!(code, "Server error event: {}", message);
                false
            }
        }
    }
}
