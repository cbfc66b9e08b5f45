//! Forwards log events to an operator chat.

use std::time::Duration;

use teloxide::prelude::*;
use teloxide::types::ChatId;
use tokio::sync::mpsc;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// Telegram rejects messages longer than 4096 chars.
const MAX_LOG_CHARS: usize = 4000;
const FLUSH_INTERVAL: Duration = Duration::from_secs(5);
const MAX_BUFFERED_LINES: usize = 50;

#[derive(Debug, PartialEq, Eq)]
enum LogLine {
    /// WARN/ERROR - sent as soon as it arrives.
    Urgent(String),
    /// INFO - batched.
    Routine(String),
}

impl LogLine {
    fn from_event(level: Level, message: String) -> Option<Self> {
        match level {
            Level::ERROR => Some(Self::Urgent(format!("❌ {message}"))),
            Level::WARN => Some(Self::Urgent(format!("⚠️ {message}"))),
            Level::INFO => Some(Self::Routine(message)),
            _ => None,
        }
    }
}

pub struct TelegramLogLayer {
    tx: mpsc::UnboundedSender<LogLine>,
}

impl TelegramLogLayer {
    /// Spawns the forwarding task; must be called inside a tokio runtime.
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<LogLine>();

        tokio::spawn(async move {
            let mut routine: Vec<String> = Vec::new();
            let mut interval = tokio::time::interval(FLUSH_INTERVAL);

            loop {
                tokio::select! {
                    line = rx.recv() => match line {
                        Some(LogLine::Urgent(text)) => send_log(&bot, chat_id, &text).await,
                        Some(LogLine::Routine(text)) => {
                            routine.push(text);
                            if routine.len() >= MAX_BUFFERED_LINES {
                                flush(&bot, chat_id, &mut routine).await;
                            }
                        }
                        None => {
                            flush(&bot, chat_id, &mut routine).await;
                            break;
                        }
                    },
                    _ = interval.tick() => flush(&bot, chat_id, &mut routine).await,
                }
            }
        });

        Self { tx }
    }
}

fn truncate_log(text: &str) -> String {
    if text.chars().count() > MAX_LOG_CHARS {
        let truncated: String = text.chars().take(MAX_LOG_CHARS).collect();
        format!("{truncated}...")
    } else {
        text.to_string()
    }
}

async fn send_log(bot: &Bot, chat_id: ChatId, text: &str) {
    // Logging from here would loop back into this layer.
    if let Err(e) = bot.send_message(chat_id, truncate_log(text)).await {
        eprintln!("Failed to forward log to Telegram: {e}");
    }
}

async fn flush(bot: &Bot, chat_id: ChatId, buffer: &mut Vec<String>) {
    if buffer.is_empty() {
        return;
    }
    let combined = buffer.join("\n");
    buffer.clear();
    send_log(bot, chat_id, &combined).await;
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else if self.message.is_empty() {
            self.message = format!("{} = {:?}", field.name(), value);
        } else {
            self.message
                .push_str(&format!(", {} = {:?}", field.name(), value));
        }
    }
}

impl<S: Subscriber> Layer<S> for TelegramLogLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level = *event.metadata().level();
        if level > Level::INFO {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        if let Some(line) = LogLine::from_event(level, visitor.message)
            && self.tx.send(line).is_err()
        {
            eprintln!("Log channel closed, message dropped");
        }
    }
}
