use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use std::time::Duration;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use tokio::time::sleep;

use cardflow::cli::{Cli, Commands};
use cardflow::core::{config, init_logger, log_chat_configuration, BotSettings};
use cardflow::storage::{create_pool, get_connection, settings};
use cardflow::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps, State};

/// Main entry point for the bot
///
/// Parses CLI arguments and dispatches to the chosen subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, database, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Log panics from dispatcher tasks instead of losing them on stderr
    std::panic::set_hook(Box::new(|panic_info| {
        log::error!("Panic caught: {:?}", panic_info);
        if let Some(location) = panic_info.location() {
            log::error!("Panic at {}:{}:{}", location.file(), location.line(), location.column());
        }
        if let Some(msg) = panic_info.payload().downcast_ref::<&str>() {
            log::error!("Panic message: {}", msg);
        }
    }));

    // .env goes first so LOG_FILE_PATH and the chat ids can come from it
    let _ = dotenv();

    init_logger(&config::LOG_FILE_PATH)?;

    match cli.command {
        Some(Commands::Run) | None => run_bot().await,
        Some(Commands::Migrate) => run_migrate(),
        Some(Commands::SetAdminPassword { password }) => run_set_admin_password(&password),
    }
}

fn run_migrate() -> Result<()> {
    create_pool(&config::DATABASE_PATH, &config::DEFAULT_ADMIN_PASSWORD)
        .map_err(|e| anyhow::anyhow!("Failed to create database pool: {}", e))?;
    log::info!("Database {} is up to date", config::DATABASE_PATH.as_str());
    Ok(())
}

fn run_set_admin_password(password: &str) -> Result<()> {
    let password = password.trim();
    if password.is_empty() {
        anyhow::bail!("Admin password must not be empty");
    }

    let pool = create_pool(&config::DATABASE_PATH, &config::DEFAULT_ADMIN_PASSWORD)
        .map_err(|e| anyhow::anyhow!("Failed to create database pool: {}", e))?;
    let conn = get_connection(&pool)?;
    settings::update_admin_password(&conn, password)?;
    log::info!("Admin password updated");
    Ok(())
}

/// Run the Telegram bot
async fn run_bot() -> Result<()> {
    let bot_init_start = std::time::Instant::now();
    log::info!("Starting bot...");

    let bot_settings = BotSettings::from_env();
    log_chat_configuration(&bot_settings);

    let db_pool = Arc::new(
        create_pool(&config::DATABASE_PATH, &bot_settings.default_admin_password)
            .map_err(|e| anyhow::anyhow!("Failed to create database pool: {}", e))?,
    );

    let bot = create_bot()?;

    let bot_info = bot
        .get_me()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to Bot API: {}", e))?;
    log::info!("Bot username: {:?}, Bot ID: {}", bot_info.username.as_deref(), bot_info.id);

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to register bot commands: {}", e);
    }

    let handler_deps = HandlerDeps::new(Arc::clone(&db_pool), bot_settings);
    let handler = schema();
    // Dialogue states must survive dispatcher restarts
    let storage = InMemStorage::<State>::new();

    log::info!("🎉 Bot initialization complete in {:.2}s", bot_init_start.elapsed().as_secs_f64());
    log::info!("📡 Ready to receive updates!");

    let mut retry_count = 0;
    let max_retries = config::retry::MAX_DISPATCHER_RETRIES;

    loop {
        let bot_clone = bot.clone();
        let handler_clone = handler.clone();
        let storage_clone = Arc::clone(&storage);
        let deps_clone = handler_deps.clone();

        // A separate task isolates dispatcher panics, caught via the JoinHandle
        let handle = tokio::spawn(async move {
            use teloxide::update_listeners::Polling;

            let listener = Polling::builder(bot_clone.clone()).drop_pending_updates().build();

            Dispatcher::builder(bot_clone, handler_clone)
                .dependencies(dptree::deps![storage_clone, deps_clone])
                .enable_ctrlc_handler()
                .build()
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the update listener"),
                )
                .await
        });

        match handle.await {
            Ok(()) => {
                log::info!("Dispatcher shutdown gracefully");
                break;
            }
            Err(join_err) if join_err.is_panic() => {
                log::error!("Dispatcher panicked: {}", join_err);
                if retry_count < max_retries {
                    retry_count += 1;
                    log::info!(
                        "Restarting dispatcher after panic (attempt {}/{})...",
                        retry_count,
                        max_retries
                    );
                    exponential_backoff(retry_count).await;
                } else {
                    log::error!("Max retries reached after panic. Exiting...");
                    break;
                }
            }
            Err(join_err) => {
                log::warn!("Dispatcher task was cancelled: {}", join_err);
                break;
            }
        }

        sleep(config::retry::dispatcher_delay()).await;
    }

    Ok(())
}

/// Exponential backoff delay for retries
async fn exponential_backoff(retry_count: u32) {
    let delay = Duration::from_secs(config::retry::EXPONENTIAL_BACKOFF_BASE.pow(retry_count));
    sleep(delay).await;
}
