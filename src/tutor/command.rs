use teloxide::utils::command::BotCommands;

use crate::tutor::vocabulary::Category;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Start the bot and see the welcome message")]
    Start,
    #[command(description = "Show this help message")]
    Help,
    #[command(description = "Learn basic Italian vocabulary")]
    Vocabulary,
    #[command(description = "Learn Italian greetings")]
    Greetings,
    #[command(description = "Practice Italian numbers")]
    Numbers,
    #[command(description = "Learn Italian colors")]
    Colors,
    #[command(description = "Take a vocabulary quiz")]
    Quiz,
}

impl Command {
    /// The category a listing command shows, if it is one.
    pub fn category(&self) -> Option<Category> {
        match self {
            Self::Greetings => Some(Category::Greetings),
            Self::Numbers => Some(Category::Numbers),
            Self::Colors => Some(Category::Colors),
            _ => None,
        }
    }
}
