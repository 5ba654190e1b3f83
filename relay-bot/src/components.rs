//! Component factory: builds BotComponents from config. Isolates assembly logic from runner.

use anyhow::{Context, Result};
use dialog::engine::Engine;
use dialog::Dispatcher;
use handler_chain::HandlerChain;
use handlers::{DialogHandler, LoggingHandler, MembershipHandler};
use providers::{http_client, ExchangeRatesClient, GiphyClient, OpenWeatherClient};
use relay_core::Bot;
use relay_telegram::TelegramBotAdapter;
use std::path::Path;
use std::sync::Arc;
use storage::{
    GroupRegistry, InMemoryGroupRegistry, InMemorySessionStore, SessionStore,
    SqliteGroupRegistry, SqlitePoolManager, SqliteSessionStore,
};
use tracing::{error, info, instrument};

use crate::config::BotConfig;

/// Everything the handler chain needs; produced by the component factory.
#[derive(Clone)]
pub struct BotComponents {
    pub teloxide_bot: teloxide::Bot,
    /// Delivery used by the dialog handler (Telegram in production, a fake in tests).
    pub bot: Arc<dyn Bot>,
    pub sessions: Arc<dyn SessionStore>,
    pub registry: Arc<dyn GroupRegistry>,
    pub dispatcher: Arc<Dispatcher>,
}

/// Creates the session store and group registry for STORAGE_TYPE.
#[instrument(skip(config))]
pub async fn create_stores(
    config: &BotConfig,
) -> Result<(Arc<dyn SessionStore>, Arc<dyn GroupRegistry>)> {
    match config.base.storage_type.as_str() {
        "sqlite" => {
            let path = &config.base.database_url;
            if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            info!(db_path = %path, "Using SQLite session store and group registry");
            let pool = SqlitePoolManager::new(path).await.map_err(|e| {
                error!(error = %e, "Failed to open SQLite database");
                anyhow::anyhow!("Failed to open SQLite database: {}", e)
            })?;
            let sessions = SqliteSessionStore::new(pool.clone())
                .await
                .context("Failed to initialize session store")?;
            let registry = SqliteGroupRegistry::new(pool)
                .await
                .context("Failed to initialize group registry")?;
            Ok((Arc::new(sessions), Arc::new(registry)))
        }
        _ => {
            info!("Using in-memory session store and group registry");
            Ok((
                Arc::new(InMemorySessionStore::new()),
                Arc::new(InMemoryGroupRegistry::new()),
            ))
        }
    }
}

/// Provider clients share one HTTP client bounded by HTTP_TIMEOUT_SECS.
fn build_engine(config: &BotConfig, registry: Arc<dyn GroupRegistry>) -> Result<Engine> {
    let services = &config.services;
    let client =
        http_client(services.http_timeout()).context("Failed to build HTTP client")?;
    Ok(Engine::new(
        Arc::new(OpenWeatherClient::new(
            client.clone(),
            services.openweather_api_key.clone(),
        )),
        Arc::new(ExchangeRatesClient::new(
            client.clone(),
            services.exchangerates_api_key.clone(),
        )),
        Arc::new(GiphyClient::new(client, services.giphy_api_key.clone())),
        registry,
        config.dialog.clone(),
    ))
}

/// Builds stores, providers and the dispatcher. `bot_override` replaces the Telegram delivery
/// (integration tests pass a recording bot).
#[instrument(skip(config, bot_override))]
pub async fn build_bot_components(
    config: &BotConfig,
    bot_override: Option<Arc<dyn Bot>>,
) -> Result<BotComponents> {
    let teloxide_bot = config.base.telegram.build_bot()?;
    let bot = bot_override
        .unwrap_or_else(|| Arc::new(TelegramBotAdapter::new(teloxide_bot.clone())));
    let (sessions, registry) = create_stores(config).await?;
    let engine = build_engine(config, registry.clone())?;
    let dispatcher = Arc::new(Dispatcher::new(sessions.clone(), engine));

    Ok(BotComponents {
        teloxide_bot,
        bot,
        sessions,
        registry,
        dispatcher,
    })
}

/// Logging first, then membership tracking, then dialogs.
pub fn build_handler_chain(components: &BotComponents) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(MembershipHandler::new(components.registry.clone())))
        .add_handler(Arc::new(DialogHandler::new(
            components.dispatcher.clone(),
            components.bot.clone(),
        )))
}
