//! Message entity - Entità messaggio diretto tra due utenti

use chrono::{DateTime, Utc};
use emotion::Emotion;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Serialize, Deserialize, Debug, Clone, FromRow)]
pub struct Message {
    pub message_id: i32,
    pub sender_id: i32,
    pub receiver_id: i32,
    // almeno uno tra text e image è valorizzato (controllato in send_message)
    pub text: Option<String>,
    // url durevole restituito dal servizio di upload
    pub image: Option<String>,
    // calcolata una sola volta alla creazione, mai ricalcolata
    // la colonna è TEXT, un valore fuori dall'enumerazione è un errore di decodifica
    #[sqlx(try_from = "String")]
    pub emotion: Emotion,
    pub created_at: DateTime<Utc>,
}
