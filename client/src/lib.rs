//! Client - Libreria lato utente per la chat
//!
//! - [`api::ApiClient`]: chiamate HTTP (auth, sidebar, storico, invio)
//! - [`realtime::RealtimeClient`]: eventi push dal WebSocket
//! - [`composer::Composer`]: bozza del messaggio con anteprima dell'emozione
//! - [`conversation::Conversation`]: stato della conversazione selezionata
//! - [`render`]: stile del messaggio in base all'emozione salvata
//! - [`settings::EmotionSettings`]: preferenza persistente di visualizzazione

pub mod api;
pub mod composer;
pub mod conversation;
pub mod error;
pub mod realtime;
pub mod render;
pub mod settings;
pub mod types;

pub use api::ApiClient;
pub use composer::Composer;
pub use conversation::Conversation;
pub use error::ClientError;
pub use realtime::RealtimeClient;
pub use render::{RenderedMessage, render_message};
pub use settings::{EmotionSettings, SettingsError};
pub use types::{ChatMessage, SendMessageRequest, ServerEvent, UserSummary};
