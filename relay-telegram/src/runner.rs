//! Update runner: converts teloxide updates to core events and passes them to HandlerChain.
//! Each update is processed in its own task; the dispatcher itself never waits on the chain.

use anyhow::Result;
use handler_chain::HandlerChain;
use relay_core::Event;
use teloxide::prelude::*;
use teloxide::types::{BotCommand, ChatMemberUpdated};
use tracing::{error, info, instrument, warn};

use super::adapters::{callback_event, membership_event, message_event};

fn spawn_chain(chain: HandlerChain, event: Event) {
    tokio::spawn(async move {
        if let Err(e) = chain.handle(&event).await {
            error!(
                error = %e,
                kind = event.kind(),
                user_id = event.user().id,
                "Handler chain failed"
            );
        }
    });
}

async fn on_message(msg: Message, chain: HandlerChain) -> ResponseResult<()> {
    spawn_chain(chain, message_event(&msg));
    Ok(())
}

async fn on_callback(bot: Bot, q: CallbackQuery, chain: HandlerChain) -> ResponseResult<()> {
    // Clears the button's loading state; the reply itself comes from the chain.
    if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
        warn!(error = %e, "Failed to answer callback query");
    }
    spawn_chain(chain, callback_event(&q));
    Ok(())
}

async fn on_my_chat_member(update: ChatMemberUpdated, chain: HandlerChain) -> ResponseResult<()> {
    spawn_chain(chain, membership_event(&update));
    Ok(())
}

/// Registers `commands` as the bot menu, then dispatches messages, callback queries and the
/// bot's own membership changes to `handler_chain` until Ctrl-C.
#[instrument(skip(bot, handler_chain, commands))]
pub async fn run_dispatcher(
    bot: Bot,
    handler_chain: HandlerChain,
    commands: Vec<BotCommand>,
) -> Result<()> {
    match bot.set_my_commands(commands).await {
        Ok(_) => info!("Bot commands registered"),
        Err(e) => warn!(error = %e, "Failed to register bot commands"),
    }

    if let Ok(me) = bot.get_me().await {
        if let Some(username) = &me.user.username {
            info!(username = %username, "Bot identity resolved");
        }
    }

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback))
        .branch(Update::filter_my_chat_member().endpoint(on_my_chat_member));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![handler_chain])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
