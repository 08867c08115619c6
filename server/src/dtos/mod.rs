//! DTOs module - Data Transfer Objects
//!
//! Questo modulo contiene tutti i DTOs usati per la comunicazione client-server.
//! I DTOs separano la rappresentazione esterna (API) dalla rappresentazione interna (entities).

pub mod message;
pub mod user;
pub mod ws_event;

// Re-exports per facilitare l'import
pub use message::{CreateMessageDTO, MessageDTO, SendMessageDTO};
pub use user::{CreateUserDTO, LoginDTO, UserDTO};
pub use ws_event::WsEventDTO;
