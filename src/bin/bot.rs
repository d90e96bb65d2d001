use anyhow::{Context, Result};
use dotenvy::dotenv;
use log::info;
use std::sync::Arc;

use quinze::commands::{create_all_handlers, CommandContext, CommandRegistry};
use quinze::core::Config;
use quinze::features::{GameData, HttpSource, WebhookFollowups};
use quinze::interactions::{serve, AppState, Dispatcher, SignatureVerifier};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting Sober Quinze...");

    let data = GameData::load(&config.data_dir)?;

    let mut registry = CommandRegistry::new();
    for handler in create_all_handlers(&data) {
        registry.register(handler)?;
    }
    info!("✅ Registered {} commands", registry.len());

    // `bot commands` prints the declarations for uploading to Discord
    if std::env::args().nth(1).as_deref() == Some("commands") {
        println!("{}", serde_json::to_string_pretty(&registry.declarations_json())?);
        return Ok(());
    }

    let verifier = SignatureVerifier::from_hex(&config.public_key)
        .context("PUBLIC_KEY is not a valid Ed25519 key")?;

    let followups = WebhookFollowups::new(&config.discord_api_url, &config.client_id);
    let bind_addr = config.bind_addr;
    let ctx = CommandContext::new(
        config,
        data,
        Arc::new(HttpSource::new()),
        Arc::new(followups),
    );

    let dispatcher = Dispatcher::new(registry, ctx);
    serve(bind_addr, AppState::new(verifier, dispatcher)).await
}
