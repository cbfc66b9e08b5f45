//! Tutor module - vocabulary lookup and command/callback routing.

pub mod callback;
pub mod command;
pub mod router;
pub mod telegram;
pub mod vocabulary;


pub use callback::{CallbackPayload, PayloadError};
pub use command::Command;
pub use router::{CommandRouter, MenuButton, Reply};
pub use telegram::{deliver, ChatTransport, TelegramClient};
pub use vocabulary::{Category, VocabularySet};
