//! Main entry: validate config, init logging, build components, then run the dispatcher.

use anyhow::{Context, Result};
use dialog::Command;
use handler_chain::HandlerChain;
use relay_core::{init_tracing, Bot};
use relay_telegram::run_dispatcher;
use std::path::Path;
use std::sync::Arc;
use teloxide::types::BotCommand;
use tracing::{info, instrument};

use crate::components::{build_bot_components, build_handler_chain};
use crate::config::BotConfig;

/// Bot menu, in the order the commands are listed to users.
fn bot_commands() -> Vec<BotCommand> {
    Command::ALL
        .iter()
        .map(|c| BotCommand::new(c.name(), c.description()))
        .collect()
}

#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    if let Some(dir) = Path::new(&config.base.log_file)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
    {
        std::fs::create_dir_all(dir).context("Failed to create logs directory")?;
    }
    init_tracing(Some(config.base.log_file.as_str()))?;

    info!(
        storage_type = %config.base.storage_type,
        database_url = %config.base.database_url,
        poll_min_answers = config.dialog.poll_min_answers,
        poll_max_answers = config.dialog.poll_max_answers,
        "Initializing bot"
    );

    let components = build_bot_components(&config, None).await?;
    let handler_chain = build_handler_chain(&components);
    let teloxide_bot = components.teloxide_bot.clone();

    info!("Bot started successfully");

    run_dispatcher(teloxide_bot, handler_chain, bot_commands()).await
}

/// Builds components and handler chain without connecting to Telegram. Used by integration
/// tests that inject a recording bot and drive the chain with fake events.
#[instrument(skip(config, bot_override))]
pub async fn build_only(config: BotConfig, bot_override: Arc<dyn Bot>) -> Result<HandlerChain> {
    config.validate()?;
    let components = build_bot_components(&config, Some(bot_override)).await?;
    Ok(build_handler_chain(&components))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_commands_follow_menu_order() {
        let names: Vec<String> = bot_commands().into_iter().map(|c| c.command).collect();
        assert_eq!(
            names,
            vec!["start", "help", "weather", "currencies", "funny", "poll", "cancel"]
        );
    }
}
