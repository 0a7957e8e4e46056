mod commands;
mod gateway;
mod i18n;

use anyhow::Context as _;
use camscout_backend::{ApiClient, SEARCH_RADIUS_METERS};
use camscout_channels::telegram::TelegramChannel;
use camscout_core::{
    config::{self, Config},
    geo::parse_coordinates,
    traits::{Backend, Channel},
};
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "camscout",
    version,
    about = "Telegram bot that finds traffic cameras near a location"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot.
    Start,
    /// Show the effective configuration and check the translation tables.
    Status,
    /// Look up cameras near a coordinate pair once and print the result.
    Cameras {
        /// Coordinates, e.g. "55.7558, 37.6173".
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,

        /// Reply language.
        #[arg(short, long, default_value = "ru")]
        lang: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config_found = Path::new(&cli.config).exists();
    let cfg = config::load(&cli.config)?;
    let _guard = init_tracing(&cfg)?;
    if !config_found {
        tracing::info!("Config file not found at {}, using defaults", cli.config);
    }

    if let Err(missing) = i18n::verify_tables() {
        anyhow::bail!(
            "translation keys missing from the default table: {}",
            missing.join(", ")
        );
    }

    match cli.command {
        Commands::Start => {
            cfg.validate()?;

            let backend: Arc<dyn Backend> = Arc::new(ApiClient::from_config(&cfg.api)?);

            let telegram = TelegramChannel::new(cfg.telegram.clone());
            tracing::info!("Telegram bot token: {}", telegram.token_hint());

            let mut channels: HashMap<String, Arc<dyn Channel>> = HashMap::new();
            channels.insert("telegram".to_string(), Arc::new(telegram));

            let gw = gateway::Gateway::new(backend, channels, cfg.bot.notify_failures);
            gw.run().await?;
        }
        Commands::Status => print_status(&cli.config, &cfg),
        Commands::Cameras { text, lang } => {
            if text.is_empty() {
                anyhow::bail!("no coordinates provided. Usage: camscout cameras <lat> <lng>");
            }
            if cfg.api.base_url.trim().is_empty() {
                anyhow::bail!("API base URL is not set (API_BASE_URL or [api].base_url)");
            }

            let point = parse_coordinates(&text.join(" "))?;
            let client = ApiClient::from_config(&cfg.api)?;
            let body = client
                .closest_cameras(point, SEARCH_RADIUS_METERS)
                .await
                .with_context(|| format!("camera lookup near {point} failed"))?;
            print!("{}", i18n::format_cameras(&body, &lang)?);
        }
    }

    Ok(())
}

/// Stdout logging, plus a daily-rolling file when `bot.log_dir` is set.
///
/// `RUST_LOG` wins over `bot.log_level`. The returned guard flushes the file
/// writer on drop, so it must live as long as `main`.
fn init_tracing(cfg: &Config) -> anyhow::Result<Option<WorkerGuard>> {
    use tracing_subscriber::{fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.bot.log_level))
        .with_context(|| format!("invalid log level '{}'", cfg.bot.log_level))?;

    let (file_layer, guard) = if cfg.bot.log_dir.trim().is_empty() {
        (None, None)
    } else {
        std::fs::create_dir_all(&cfg.bot.log_dir)
            .with_context(|| format!("failed to create log dir {}", cfg.bot.log_dir))?;
        let appender = tracing_appender::rolling::daily(&cfg.bot.log_dir, "camscout.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer().with_writer(writer).with_ansi(false);
        (Some(layer), Some(guard))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    Ok(guard)
}

fn print_status(path: &str, cfg: &Config) {
    let set = |v: &str| if v.trim().is_empty() { "missing" } else { "set" };

    println!("camscout status\n");
    println!("Config: {path}");
    println!("  log level:        {}", cfg.bot.log_level);
    println!(
        "  log dir:          {}",
        if cfg.bot.log_dir.is_empty() {
            "(stdout only)"
        } else {
            cfg.bot.log_dir.as_str()
        }
    );
    println!("  notify failures:  {}", cfg.bot.notify_failures);
    println!();
    println!("  telegram token:   {}", set(&cfg.telegram.bot_token));
    println!("  poll timeout:     {}s", cfg.telegram.poll_timeout_secs);
    println!(
        "  api base url:     {}",
        if cfg.api.base_url.is_empty() {
            "missing"
        } else {
            cfg.api.base_url.as_str()
        }
    );
    println!("  api secret key:   {}", set(&cfg.api.secret_key));
    println!("  api timeout:      {}s", cfg.api.timeout_secs);
    println!();
    match cfg.validate() {
        Ok(()) => println!("Ready to start."),
        Err(e) => println!("Not ready: {e}"),
    }
}
