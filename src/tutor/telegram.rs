//! Telegram transport using teloxide.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, MessageId};
use tracing::{info, warn};

use crate::tutor::router::{MenuButton, Reply};

/// Buttons per keyboard row.
const BUTTONS_PER_ROW: usize = 2;

/// Outbound actions the router's replies are delivered through.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send a text message, returning its message ID.
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<i64, String>;

    /// Send a message with an inline keyboard, returning its message ID.
    async fn send_menu(&self, chat_id: i64, text: &str, buttons: &[MenuButton]) -> Result<i64, String>;

    /// Replace the text of an existing message.
    async fn edit_message(&self, chat_id: i64, message_id: i64, text: &str) -> Result<(), String>;
}

/// Perform a reply in `chat_id`.
///
/// `origin_message_id` is the message whose button was pressed. Edits fall
/// back to a new message when it is unknown (e.g. the message is too old to
/// be accessible).
pub async fn deliver<T: ChatTransport + ?Sized>(
    transport: &T,
    chat_id: i64,
    origin_message_id: Option<i64>,
    reply: Reply,
) -> Result<(), String> {
    match reply {
        Reply::Text(text) => transport.send_text(chat_id, &text).await.map(|_| ()),
        Reply::Menu { text, buttons } => {
            transport.send_menu(chat_id, &text, &buttons).await.map(|_| ())
        }
        Reply::Edit(text) => match origin_message_id {
            Some(message_id) => transport.edit_message(chat_id, message_id, &text).await,
            None => transport.send_text(chat_id, &text).await.map(|_| ()),
        },
        Reply::Silent => Ok(()),
    }
}

/// Lay menu buttons out as an inline keyboard.
pub fn keyboard(buttons: &[MenuButton]) -> InlineKeyboardMarkup {
    let rows: Vec<Vec<InlineKeyboardButton>> = buttons
        .chunks(BUTTONS_PER_ROW)
        .map(|row| {
            row.iter()
                .map(|b| InlineKeyboardButton::callback(b.label.clone(), b.payload.encode()))
                .collect()
        })
        .collect();
    InlineKeyboardMarkup::new(rows)
}

/// Telegram API client.
pub struct TelegramClient {
    bot: Bot,
}

impl TelegramClient {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    /// Stop the client-side loading spinner on a pressed button.
    pub async fn answer_callback(&self, query: &CallbackQuery) -> Result<(), String> {
        self.bot
            .answer_callback_query(query.id.clone())
            .await
            .map(|_| ())
            .map_err(|e| {
                let msg = format!("Failed to answer callback: {e}");
                warn!("{}", msg);
                msg
            })
    }
}

#[async_trait]
impl ChatTransport for TelegramClient {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<i64, String> {
        self.bot
            .send_message(ChatId(chat_id), text)
            .await
            .map(|msg| msg.id.0 as i64)
            .map_err(|e| {
                let msg = format!("Failed to send: {e}");
                warn!("{}", msg);
                msg
            })
    }

    async fn send_menu(&self, chat_id: i64, text: &str, buttons: &[MenuButton]) -> Result<i64, String> {
        info!("📋 Sending menu with {} buttons to chat {}", buttons.len(), chat_id);

        self.bot
            .send_message(ChatId(chat_id), text)
            .reply_markup(keyboard(buttons))
            .await
            .map(|msg| msg.id.0 as i64)
            .map_err(|e| {
                let msg = format!("Failed to send menu: {e}");
                warn!("{}", msg);
                msg
            })
    }

    async fn edit_message(&self, chat_id: i64, message_id: i64, text: &str) -> Result<(), String> {
        self.bot
            .edit_message_text(ChatId(chat_id), MessageId(message_id as i32), text)
            .await
            .map(|_| ())
            .map_err(|e| {
                let msg = format!("Failed to edit message: {e}");
                warn!("{}", msg);
                msg
            })
    }
}
