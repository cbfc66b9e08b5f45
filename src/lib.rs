//! Italian vocabulary tutor for Telegram.

pub mod config;
pub mod telegram_log;
pub mod tutor;
