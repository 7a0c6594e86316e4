mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use notification_settings::{
    Feedback, LogFormat, LoggingConfig, RestBackend, SettingKey, SettingValue, SettingsModel,
    form_fields, validate,
};
use tracing_subscriber::EnvFilter;

/// View and change the current user's notification settings
#[derive(Parser)]
#[command(name = "notifications")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every setting with its current value
    Show,
    /// Print the settings form, marking locked fields
    Fields,
    /// Change one setting
    Set {
        /// Setting name, e.g. `email` or `noNewsletters`
        key: String,
        /// New value; toggles take `true` or `false`
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::load(cli.config.as_deref())?;
    init_logging(&config.logging, cli.verbose);

    let backend = RestBackend::new(&config.backend)?;
    tracing::debug!(base_url = %backend.base_url(), "using backend");
    let model = SettingsModel::load(Arc::new(backend))
        .await
        .context("failed to load notification settings")?;

    match cli.command {
        Commands::Show => {
            show(&model);
            Ok(())
        }
        Commands::Fields => {
            fields(&model);
            Ok(())
        }
        Commands::Set { key, value } => set(&model, &key, &value).await,
    }
}

fn init_logging(logging: &LoggingConfig, verbose: u8) {
    let level = config::verbosity_level(verbose).unwrap_or(logging.level.as_str());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match logging.format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn show(model: &SettingsModel<RestBackend>) {
    for key in SettingKey::ALL {
        println!("{:<24} {}", key.as_str(), model.get(key));
    }
}

fn fields(model: &SettingsModel<RestBackend>) {
    for field in form_fields(model.settings()) {
        let marker = if field.disabled { " (disabled)" } else { "" };
        println!(
            "{:<40} [{}] {} = {}{marker}",
            field.label, field.kind, field.key, field.value
        );
    }
}

async fn set(model: &SettingsModel<RestBackend>, key: &str, raw: &str) -> Result<()> {
    let key: SettingKey = key.parse()?;
    let value = SettingValue::parse_for(key, raw)?;

    if let Err(reason) = validate(key, &value) {
        anyhow::bail!("{reason}: {raw}");
    }

    let outcome = model.set(key, value).await?;
    match outcome.feedback() {
        Some(Feedback::Success(message)) => {
            println!("{message}");
            Ok(())
        }
        Some(Feedback::Error(message)) => anyhow::bail!(message),
        None => anyhow::bail!("{key} was not updated"),
    }
}
