//! Command router.
//!
//! Maps commands and button payloads to [`Reply`] values using only the
//! shared [`VocabularySet`]. Nothing here does I/O or keeps state, so the
//! same input always produces the same reply.

use std::sync::Arc;

use tracing::warn;

use crate::tutor::callback::{CallbackPayload, PayloadError};
use crate::tutor::command::Command;
use crate::tutor::vocabulary::{Category, VocabularySet};

pub const VOCABULARY_MENU_TEXT: &str = "📚 Choose a vocabulary category:";
pub const QUIZ_MENU_TEXT: &str = "🎯 Choose a quiz category:";
pub const CATEGORY_NOT_FOUND: &str = "❓ Sorry, that category was not found. Use /vocabulary to see the available ones.";

const HELP_TEXT: &str = "🇮🇹 Italian Learning Bot - Help

Available commands:
/start - Start the bot and see welcome message
/vocabulary - Learn basic Italian vocabulary
/greetings - Learn Italian greetings
/numbers - Practice Italian numbers
/colors - Learn Italian colors
/quiz - Take a vocabulary quiz
/help - Show this help message

Choose a topic and start learning! 📖";

/// A button on an inline menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuButton {
    pub label: String,
    pub payload: CallbackPayload,
}

/// What the transport should do in response to an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Send a new text message.
    Text(String),
    /// Send a new message with an inline keyboard.
    Menu { text: String, buttons: Vec<MenuButton> },
    /// Replace the text of the message the button belonged to.
    Edit(String),
    /// Nothing to send.
    Silent,
}

impl Reply {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) | Self::Edit(text) | Self::Menu { text, .. } => Some(text.as_str()),
            Self::Silent => None,
        }
    }
}

pub struct CommandRouter {
    vocabulary: Arc<VocabularySet>,
}

impl CommandRouter {
    pub fn new(vocabulary: Arc<VocabularySet>) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &VocabularySet {
        &self.vocabulary
    }

    /// Route a parsed command sent by a user with the given display name.
    pub fn dispatch(&self, command: &Command, display_name: &str) -> Reply {
        match command {
            Command::Start => self.on_start(display_name),
            Command::Help => self.on_help(),
            Command::Vocabulary => self.on_vocabulary(),
            Command::Quiz => self.on_quiz(),
            Command::Greetings => self.on_category(Category::Greetings),
            Command::Numbers => self.on_category(Category::Numbers),
            Command::Colors => self.on_category(Category::Colors),
        }
    }

    pub fn on_start(&self, display_name: &str) -> Reply {
        Reply::Text(format!(
            "🇮🇹 Ciao {display_name}! Benvenuto al tuo tutor italiano!

I'm here to help you learn Italian! Here's what I can do:

📚 /vocabulary - Learn Italian vocabulary
👋 /greetings - Learn Italian greetings
🔢 /numbers - Practice Italian numbers
🎨 /colors - Learn Italian colors
🎯 /quiz - Take a vocabulary quiz
ℹ️ /help - Show this help message

Let's start your Italian learning journey! 🚀"
        ))
    }

    pub fn on_help(&self) -> Reply {
        Reply::Text(HELP_TEXT.to_string())
    }

    pub fn on_vocabulary(&self) -> Reply {
        menu(VOCABULARY_MENU_TEXT, |category| MenuButton {
            label: format!("{} {}", category.emoji(), category.title()),
            payload: CallbackPayload::Vocab(category),
        })
    }

    pub fn on_quiz(&self) -> Reply {
        menu(QUIZ_MENU_TEXT, |category| MenuButton {
            label: format!("{} {} Quiz", category.emoji(), category.title()),
            payload: CallbackPayload::Quiz(category),
        })
    }

    pub fn on_category(&self, category: Category) -> Reply {
        Reply::Text(self.listing(category))
    }

    /// Handle a raw button payload. The reply replaces the menu message.
    pub fn on_callback(&self, raw: &str) -> Reply {
        match raw.parse::<CallbackPayload>() {
            Ok(payload) => self.on_payload(payload),
            Err(PayloadError::UnknownCategory(category)) => {
                warn!("Callback for unknown category '{category}'");
                Reply::Edit(CATEGORY_NOT_FOUND.to_string())
            }
            Err(e) => {
                warn!("Ignoring callback: {e}");
                Reply::Silent
            }
        }
    }

    pub fn on_payload(&self, payload: CallbackPayload) -> Reply {
        match payload {
            CallbackPayload::Vocab(category) => Reply::Edit(self.listing(category)),
            CallbackPayload::Quiz(category) => match self.vocabulary.first_entry(category) {
                // Only the question is shown; answers are never checked.
                Some((term, _gloss)) => {
                    Reply::Edit(format!("Quiz: What does '{term}' mean in English?"))
                }
                None => Reply::Silent,
            },
        }
    }

    /// Title line, a blank line, then one `term = gloss` line per entry.
    fn listing(&self, category: Category) -> String {
        let mut text = format!("{} Italian {}:\n\n", category.emoji(), category.title());
        for (term, gloss) in self.vocabulary.entries(category) {
            text.push_str(term);
            text.push_str(" = ");
            text.push_str(gloss);
            text.push('\n');
        }
        text
    }
}

fn menu(text: &str, button: impl Fn(Category) -> MenuButton) -> Reply {
    Reply::Menu {
        text: text.to_string(),
        buttons: Category::ALL.into_iter().map(button).collect(),
    }
}
