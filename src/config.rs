use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use teloxide::types::ChatId;

/// Environment variable consulted when the config file has no token.
pub const TOKEN_ENV_VAR: &str = "BOT_TOKEN";

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read the config file.
    ReadFile { path: PathBuf, source: std::io::Error },
    /// Failed to parse JSON.
    ParseJson { path: PathBuf, source: serde_json::Error },
    /// Validation error.
    Validation(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadFile { path, source } => {
                write!(f, "failed to read config file '{}': {}", path.display(), source)
            }
            Self::ParseJson { path, source } => {
                write!(f, "failed to parse config file '{}': {}", path.display(), source)
            }
            Self::Validation(msg) => write!(f, "config validation error: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReadFile { source, .. } => Some(source),
            Self::ParseJson { source, .. } => Some(source),
            Self::Validation(_) => None,
        }
    }
}

#[derive(Deserialize)]
struct ConfigFile {
    /// Falls back to the BOT_TOKEN environment variable when empty.
    #[serde(default)]
    telegram_bot_token: String,
    /// JSON vocabulary replacing the built-in tables.
    vocabulary_path: Option<String>,
    log_chat_id: Option<i64>,
    /// Directory for log files. Defaults to current directory.
    data_dir: Option<String>,
    #[serde(default = "default_register_commands")]
    register_commands: bool,
}

fn default_register_commands() -> bool {
    true
}

#[derive(Debug)]
pub struct Config {
    pub telegram_bot_token: String,
    pub vocabulary_path: Option<PathBuf>,
    pub log_chat_id: Option<ChatId>,
    /// Directory for log files.
    pub data_dir: PathBuf,
    /// Publish the command list to Telegram at startup.
    pub register_commands: bool,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::load_with_token_fallback(path, std::env::var(TOKEN_ENV_VAR).ok())
    }

    /// Load the config, using `env_token` when the file carries no token.
    pub fn load_with_token_fallback<P: AsRef<Path>>(
        path: P,
        env_token: Option<String>,
    ) -> Result<Self, ConfigError> {
        let config_path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&config_path)
            .map_err(|e| ConfigError::ReadFile { path: config_path.clone(), source: e })?;
        let file: ConfigFile = serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseJson { path: config_path.clone(), source: e })?;

        let telegram_bot_token = if file.telegram_bot_token.is_empty() {
            env_token.unwrap_or_default()
        } else {
            file.telegram_bot_token
        };
        validate_token(&telegram_bot_token)?;

        let data_dir = file
            .data_dir
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self {
            telegram_bot_token,
            vocabulary_path: file.vocabulary_path.map(PathBuf::from),
            log_chat_id: file.log_chat_id.map(ChatId),
            data_dir,
            register_commands: file.register_commands,
        })
    }

    /// Token prefix safe to print in logs.
    pub fn masked_token(&self) -> String {
        mask_token(&self.telegram_bot_token)
    }
}

fn validate_token(token: &str) -> Result<(), ConfigError> {
    if token.is_empty() {
        return Err(ConfigError::Validation(format!(
            "telegram_bot_token is required (set it in the config file or {TOKEN_ENV_VAR})"
        )));
    }
    // Telegram tokens are formatted as {bot_id}:{secret} where bot_id is numeric
    match token.split_once(':') {
        Some((id, secret)) if id.parse::<u64>().is_ok() && !secret.is_empty() && !secret.contains(':') => Ok(()),
        _ => Err(ConfigError::Validation(
            "telegram_bot_token appears invalid (expected format: 123456789:ABCdefGHI...)".into(),
        )),
    }
}

fn mask_token(token: &str) -> String {
    let prefix: String = token.chars().take(10).collect();
    format!("{prefix}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    fn load(file: &NamedTempFile) -> Result<Config, ConfigError> {
        Config::load_with_token_fallback(file.path(), None)
    }

    fn assert_err<T>(result: Result<T, ConfigError>) -> ConfigError {
        match result {
            Ok(_) => panic!("expected error, got Ok"),
            Err(e) => e,
        }
    }

    #[test]
    fn test_valid_config() {
        let file = write_config(r#"{
            "telegram_bot_token": "123456789:ABCdefGHIjklMNOpqrsTUVwxyz"
        }"#);
        let config = load(&file).expect("should load valid config");
        assert_eq!(config.telegram_bot_token, "123456789:ABCdefGHIjklMNOpqrsTUVwxyz");
        assert_eq!(config.vocabulary_path, None);
        assert_eq!(config.log_chat_id, None);
        assert_eq!(config.data_dir, PathBuf::from("."));
        assert!(config.register_commands);
    }

    #[test]
    fn test_all_fields() {
        let file = write_config(r#"{
            "telegram_bot_token": "123456789:ABCdef",
            "vocabulary_path": "vocab.json",
            "log_chat_id": -100123,
            "data_dir": "/var/lib/tutor",
            "register_commands": false
        }"#);
        let config = load(&file).unwrap();
        assert_eq!(config.vocabulary_path, Some(PathBuf::from("vocab.json")));
        assert_eq!(config.log_chat_id, Some(ChatId(-100123)));
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/tutor"));
        assert!(!config.register_commands);
    }

    #[test]
    fn test_token_from_environment_fallback() {
        let file = write_config("{}");
        let config = Config::load_with_token_fallback(file.path(), Some("42:secret".to_string())).unwrap();
        assert_eq!(config.telegram_bot_token, "42:secret");
    }

    #[test]
    fn test_file_token_wins_over_environment() {
        let file = write_config(r#"{ "telegram_bot_token": "1:fromfile" }"#);
        let config = Config::load_with_token_fallback(file.path(), Some("2:fromenv".to_string())).unwrap();
        assert_eq!(config.telegram_bot_token, "1:fromfile");
    }

    #[test]
    fn test_missing_token() {
        let file = write_config("{}");
        let err = assert_err(load(&file));
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("telegram_bot_token"));
    }

    #[test]
    fn test_invalid_token_format_no_colon() {
        let file = write_config(r#"{ "telegram_bot_token": "invalid_token_no_colon" }"#);
        let err = assert_err(load(&file));
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("invalid"));
    }

    #[test]
    fn test_invalid_token_format_non_numeric_id() {
        let file = write_config(r#"{ "telegram_bot_token": "notanumber:ABCdef" }"#);
        assert!(matches!(assert_err(load(&file)), ConfigError::Validation(_)));
    }

    #[test]
    fn test_invalid_token_format_empty_secret() {
        let file = write_config(r#"{ "telegram_bot_token": "123456789:" }"#);
        assert!(matches!(assert_err(load(&file)), ConfigError::Validation(_)));
    }

    #[test]
    fn test_file_not_found() {
        let err = assert_err(Config::load_with_token_fallback("/nonexistent/path/config.json", None));
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }

    #[test]
    fn test_invalid_json() {
        let file = write_config("{ invalid json }");
        let err = assert_err(load(&file));
        assert!(matches!(err, ConfigError::ParseJson { .. }));
    }

    #[test]
    fn test_masked_token() {
        assert_eq!(mask_token("1234567890:ABCdefGHI"), "1234567890...");
        assert_eq!(mask_token("1:ab"), "1:ab...");
    }
}
