//! Inline button payloads.
//!
//! On the wire a payload is `<action>_<category>`, split on the first
//! underscore. Everything past the transport boundary works with
//! [`CallbackPayload`] instead of the raw string.

use std::fmt;
use std::str::FromStr;

use crate::tutor::vocabulary::Category;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackPayload {
    /// Show the full listing of a category.
    Vocab(Category),
    /// Show the quiz question for a category.
    Quiz(Category),
}

impl CallbackPayload {
    pub fn category(self) -> Category {
        match self {
            Self::Vocab(c) | Self::Quiz(c) => c,
        }
    }

    fn action(self) -> &'static str {
        match self {
            Self::Vocab(_) => "vocab",
            Self::Quiz(_) => "quiz",
        }
    }

    /// Wire form carried in `callback_data`.
    pub fn encode(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CallbackPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.action(), self.category().key())
    }
}

/// Errors from decoding a raw payload string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    /// No underscore separating action and category.
    Malformed(String),
    UnknownAction(String),
    UnknownCategory(String),
}

impl fmt::Display for PayloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed(raw) => write!(f, "malformed callback payload '{}'", raw),
            Self::UnknownAction(action) => write!(f, "unknown callback action '{}'", action),
            Self::UnknownCategory(category) => write!(f, "unknown category '{}'", category),
        }
    }
}

impl std::error::Error for PayloadError {}

impl FromStr for CallbackPayload {
    type Err = PayloadError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (action, category) = raw
            .split_once('_')
            .ok_or_else(|| PayloadError::Malformed(raw.to_string()))?;

        // Validate the action first so "foo_bar" reports the action, not the category.
        let make: fn(Category) -> CallbackPayload = match action {
            "vocab" => CallbackPayload::Vocab,
            "quiz" => CallbackPayload::Quiz,
            other => return Err(PayloadError::UnknownAction(other.to_string())),
        };

        let category = category
            .parse::<Category>()
            .map_err(|e| PayloadError::UnknownCategory(e.0))?;
        Ok(make(category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_vocab_and_quiz() {
        assert_eq!(
            "vocab_numbers".parse::<CallbackPayload>(),
            Ok(CallbackPayload::Vocab(Category::Numbers))
        );
        assert_eq!(
            "quiz_colors".parse::<CallbackPayload>(),
            Ok(CallbackPayload::Quiz(Category::Colors))
        );
    }

    #[test]
    fn test_encode_matches_wire_format() {
        assert_eq!(CallbackPayload::Vocab(Category::Greetings).encode(), "vocab_greetings");
        assert_eq!(CallbackPayload::Quiz(Category::Numbers).to_string(), "quiz_numbers");
    }

    #[test]
    fn test_every_button_payload_decodes() {
        for category in Category::ALL {
            for payload in [CallbackPayload::Vocab(category), CallbackPayload::Quiz(category)] {
                assert_eq!(payload.encode().parse::<CallbackPayload>(), Ok(payload));
            }
        }
    }

    #[test]
    fn test_splits_on_first_underscore() {
        assert_eq!(
            "vocab_daily_words".parse::<CallbackPayload>(),
            Err(PayloadError::UnknownCategory("daily_words".to_string()))
        );
    }

    #[test]
    fn test_unknown_category() {
        assert_eq!(
            "vocab_unknown".parse::<CallbackPayload>(),
            Err(PayloadError::UnknownCategory("unknown".to_string()))
        );
    }

    #[test]
    fn test_unknown_action() {
        assert_eq!(
            "play_colors".parse::<CallbackPayload>(),
            Err(PayloadError::UnknownAction("play".to_string()))
        );
    }

    #[test]
    fn test_malformed() {
        assert_eq!(
            "vocabnumbers".parse::<CallbackPayload>(),
            Err(PayloadError::Malformed("vocabnumbers".to_string()))
        );
        assert!(matches!("".parse::<CallbackPayload>(), Err(PayloadError::Malformed(_))));
    }
}
