use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};
use tracing_subscriber::prelude::*;

use italian_tutor::config::Config;
use italian_tutor::telegram_log::TelegramLogLayer;
use italian_tutor::tutor::{deliver, Command, CommandRouter, TelegramClient, VocabularySet};

/// Used in the welcome message when Telegram sends no sender.
const FALLBACK_NAME: &str = "amico";

struct BotState {
    router: CommandRouter,
    telegram: TelegramClient,
}

#[tokio::main]
async fn main() {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tutor.json".to_string());
    let config = match Config::load(&config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let bot = Bot::new(&config.telegram_bot_token);

    // Setup logging
    let log_dir = config.data_dir.join("logs");
    std::fs::create_dir_all(&log_dir).ok();
    let log_file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("tutor.log"))
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("❌ failed to open log file in '{}': {e}", log_dir.display());
            std::process::exit(1);
        }
    };
    let (non_blocking, _guard) = tracing_appender::non_blocking(log_file);

    let registry = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stdout)
                .with_filter(
                    tracing_subscriber::EnvFilter::from_default_env()
                        .add_directive(tracing::Level::INFO.into()),
                ),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_filter(
                    tracing_subscriber::EnvFilter::from_default_env()
                        .add_directive(tracing::Level::INFO.into()),
                ),
        );

    if let Some(log_chat_id) = config.log_chat_id {
        let tg_layer = TelegramLogLayer::new(bot.clone(), log_chat_id);
        registry.with(tg_layer).init();
    } else {
        registry.init();
    }

    info!("🇮🇹 Italian Learning Bot is starting...");
    info!("Loaded config from {config_path}");
    info!("📡 Bot token: {}", config.masked_token());

    let vocabulary = match &config.vocabulary_path {
        Some(path) => match VocabularySet::load(path) {
            Ok(vocabulary) => {
                info!("📚 Loaded vocabulary from {}", path.display());
                vocabulary
            }
            Err(e) => {
                eprintln!("❌ {e}");
                std::process::exit(1);
            }
        },
        None => VocabularySet::builtin(),
    };
    if vocabulary.is_empty() {
        warn!("Vocabulary is empty; listings and quizzes will have no entries");
    }

    match bot.get_me().await {
        Ok(me) => info!("✅ Telegram API connected, bot username: @{}", me.username()),
        Err(e) => warn!("Telegram connection test failed: {e}"),
    }

    if config.register_commands {
        match bot.set_my_commands(Command::bot_commands()).await {
            Ok(_) => info!("Registered {} commands", Command::bot_commands().len()),
            Err(e) => warn!("Failed to register commands: {e}"),
        }
    }

    let state = Arc::new(BotState {
        router: CommandRouter::new(Arc::new(vocabulary)),
        telegram: TelegramClient::new(bot.clone()),
    });

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
        .branch(Update::filter_callback_query().endpoint(handle_callback));

    info!("✅ Bot is running! Press Ctrl+C to stop.");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("🛑 Bot stopped");
}

async fn handle_command(msg: Message, cmd: Command, state: Arc<BotState>) -> ResponseResult<()> {
    let display_name = msg
        .from
        .as_ref()
        .map(|u| u.first_name.as_str())
        .unwrap_or(FALLBACK_NAME);
    info!("📨 {:?} from {} in chat {}", cmd, display_name, msg.chat.id);

    let reply = state.router.dispatch(&cmd, display_name);
    // Delivery failures are already logged by the client.
    deliver(&state.telegram, msg.chat.id.0, None, reply).await.ok();
    Ok(())
}

async fn handle_callback(query: CallbackQuery, state: Arc<BotState>) -> ResponseResult<()> {
    state.telegram.answer_callback(&query).await.ok();

    let Some(data) = query.data.as_deref() else {
        return Ok(());
    };
    let Some(chat_id) = query.message.as_ref().map(|m| m.chat().id) else {
        warn!("Callback '{data}' has no originating message");
        return Ok(());
    };
    info!("🔘 Callback '{}' from {} in chat {}", data, query.from.first_name, chat_id);

    let origin = query.regular_message().map(|m| m.id.0 as i64);
    let reply = state.router.on_callback(data);
    deliver(&state.telegram, chat_id.0, origin, reply).await.ok();
    Ok(())
}
