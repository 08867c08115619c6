//! Application State - Stato globale dell'applicazione
//!
//! Contiene tutti i repository, configurazioni e stato condiviso
//! necessario per gestire l'applicazione.

use crate::media::LocalMediaStore;
use crate::repositories::{MessageRepository, UserRepository};
use crate::ws::usermap::UserMap;
use emotion::{Lexicon, SentimentClassifier};
use sqlx::SqlitePool;

/// Stato globale dell'applicazione condiviso tra tutte le route e middleware
pub struct AppState {
    /// Repository per la gestione degli utenti
    pub user: UserRepository,

    /// Repository per la gestione dei messaggi
    pub msg: MessageRepository,

    /// Secret key per JWT token
    pub jwt_secret: String,

    /// Mappa concorrente degli utenti online con i loro canali WebSocket
    /// Key: user_id, Value: Sender per inviare eventi al WebSocket dell'utente
    pub users_online: UserMap,

    /// Classificatore autorevole dell'emozione, senza stato mutabile
    pub classifier: SentimentClassifier<Lexicon>,

    /// Servizio di upload delle immagini allegate
    pub media: LocalMediaStore,
}

impl AppState {
    /// Crea una nuova istanza di AppState inizializzando tutti i repository
    /// con il pool di connessioni fornito e la JWT secret.
    ///
    /// # Arguments
    /// * `pool` - Pool di connessioni SQLite condiviso
    /// * `jwt_secret` - Chiave segreta per la firma dei token JWT
    /// * `classifier` - Classificatore usato all'invio dei messaggi
    /// * `media` - Store delle immagini
    pub fn new(
        pool: SqlitePool,
        jwt_secret: String,
        classifier: SentimentClassifier<Lexicon>,
        media: LocalMediaStore,
    ) -> Self {
        Self {
            user: UserRepository::new(pool.clone()),
            msg: MessageRepository::new(pool),
            jwt_secret,
            users_online: UserMap::new(),
            classifier,
            media,
        }
    }
}
