mod cli;
mod commands;
mod interactive;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use leftover_core::{
    load_config_or_default, validate_config, HttpRecipeClient, Navigator, RecipeService,
};

use cli::{Command, RootArgs, DEFAULT_CONFIG_PATH};

#[tokio::main]
async fn main() {
    let args = RootArgs::parse();
    init_logging(args.log_json);

    if let Err(e) = run(args).await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so they never interleave with rendered views.
fn init_logging(json: bool) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| fmt::layer().with_writer(std::io::stderr)))
        .init();
}

async fn run(args: RootArgs) -> Result<()> {
    let config_path = args
        .config
        .clone()
        .or_else(|| std::env::var("LEFTOVER_CONFIG").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    info!("Loading configuration from {:?}", config_path);
    let config = load_config_or_default(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;
    validate_config(&config).context("Configuration validation failed")?;

    let client = HttpRecipeClient::new(&config.service).context("Failed to create HTTP client")?;
    info!(base_url = client.base_url(), "Using recommendation service");

    let service: Arc<dyn RecipeService> = Arc::new(client);
    let mut navigator = Navigator::new(service, config.feedback.redirect_delay());
    let mut out = std::io::stdout();

    match args.command.unwrap_or(Command::Interactive) {
        Command::Search(search) => commands::search(&mut navigator, &search, &mut out).await,
        Command::Recipe(recipe) => commands::recipe(&mut navigator, &recipe, &mut out).await,
        Command::Feedback(feedback) => {
            commands::feedback(&mut navigator, &feedback, &mut out).await
        }
        Command::Top => commands::top(&mut navigator, &mut out).await,
        Command::Interactive => interactive::run(&mut navigator).await,
    }
}
