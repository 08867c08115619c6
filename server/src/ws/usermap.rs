use crate::dtos::WsEventDTO;
use dashmap::DashMap;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, instrument, warn};

pub enum InternalSignal {
    Shutdown,
    Event(WsEventDTO),
}

/// Utenti online: una sola connessione attiva per utente, l'ultima registrata vince
pub struct UserMap {
    users_online: DashMap<i32, UnboundedSender<InternalSignal>>,
}

impl Default for UserMap {
    fn default() -> Self {
        Self::new()
    }
}

impl UserMap {
    pub fn new() -> Self {
        UserMap {
            users_online: DashMap::new(),
        }
    }

    #[instrument(skip(self, tx), fields(user_id))]
    pub fn register_online(&self, user_id: i32, tx: UnboundedSender<InternalSignal>) {
        info!("Registering user {} as online", user_id);
        if let Some(previous) = self.users_online.insert(user_id, tx) {
            // la vecchia connessione non riceverà più eventi
            let _ = previous.send(InternalSignal::Shutdown);
        }
        info!("Total online users: {}", self.users_online.len());
    }

    /// Rimuove l'utente solo se la connessione registrata è ancora quella di `tx`
    #[instrument(skip(self, tx), fields(user_id))]
    pub fn remove_from_online(&self, user_id: &i32, tx: &UnboundedSender<InternalSignal>) -> bool {
        let removed = self
            .users_online
            .remove_if(user_id, |_, current| current.same_channel(tx))
            .is_some();
        if removed {
            info!("Removed user from online");
        } else {
            debug!("Connection already replaced, nothing to remove");
        }
        removed
    }

    #[instrument(skip(self, message), fields(user_id))]
    pub fn send_server_message_if_online(&self, user_id: &i32, message: InternalSignal) -> bool {
        let message_type = match &message {
            InternalSignal::Shutdown => "Shutdown",
            InternalSignal::Event(WsEventDTO::NewMessage(msg)) => {
                debug!("Sending NewMessage for message_id {}", msg.message_id);
                "NewMessage"
            }
            InternalSignal::Event(WsEventDTO::OnlineUsers(_)) => "OnlineUsers",
            InternalSignal::Event(WsEventDTO::Error { .. }) => "Error",
        };

        if let Some(entry) = self.users_online.get(user_id) {
            let tx = entry.value();
            if let Err(e) = tx.send(message) {
                warn!("Failed to send {} message to user: {:?}", message_type, e);
                false
            } else {
                debug!("{} message sent to online user", message_type);
                true
            }
        } else {
            debug!("User {} not online, {} message not sent", user_id, message_type);
            false
        }
    }

    /// Id degli utenti online in ordine crescente
    pub fn online_user_ids(&self) -> Vec<i32> {
        let mut ids: Vec<i32> = self.users_online.iter().map(|e| *e.key()).collect();
        ids.sort_unstable();
        ids
    }

    /// Invia a ogni connessione la lista aggiornata degli utenti online
    #[instrument(skip(self))]
    pub fn broadcast_online_users(&self) {
        let ids = self.online_user_ids();
        info!(online = ids.len(), "Broadcasting online users");
        for entry in self.users_online.iter() {
            let event = WsEventDTO::OnlineUsers(ids.clone());
            if entry.value().send(InternalSignal::Event(event)).is_err() {
                warn!("Failed to send OnlineUsers to user {}", entry.key());
            }
        }
    }

    /// Get the count of online users
    pub fn online_count(&self) -> usize {
        self.users_online.len()
    }

    /// Check if a specific user is online
    pub fn is_user_online(&self, user_id: &i32) -> bool {
        self.users_online.contains_key(user_id)
    }
}
