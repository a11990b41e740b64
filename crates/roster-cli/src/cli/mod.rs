//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use roster_core::config::{self, USERS_URL_ENV};
use roster_core::{Field, FilterCriteria, logging};

mod commands;

#[derive(Parser)]
#[command(name = "roster")]
#[command(version)]
#[command(about = "Browse and filter a remote user directory")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Users endpoint (overrides config)
    #[arg(long, global = true, value_name = "URL", env = USERS_URL_ENV)]
    url: Option<String>,

    /// Start the table viewer with copy on click enabled
    #[arg(long)]
    copy: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Fetch users once and print the filtered table
    List(ListArgs),
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Filters accepted by `roster list`; empty means no constraint.
#[derive(clap::Args, Debug, Clone, Default)]
struct ListArgs {
    /// Keep users whose name contains this text (case-insensitive)
    #[arg(long, value_name = "TEXT")]
    name: Option<String>,

    /// Keep users whose username contains this text (case-insensitive)
    #[arg(long, value_name = "TEXT")]
    username: Option<String>,

    /// Keep users whose email contains this text (case-insensitive)
    #[arg(long, value_name = "TEXT")]
    email: Option<String>,

    /// Keep users whose phone contains this text (case-sensitive)
    #[arg(long, value_name = "TEXT")]
    phone: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl From<&ListArgs> for FilterCriteria {
    fn from(args: &ListArgs) -> Self {
        [
            (Field::Name, &args.name),
            (Field::Username, &args.username),
            (Field::Email, &args.email),
            (Field::Phone, &args.phone),
        ]
        .into_iter()
        .fold(FilterCriteria::default(), |criteria, (field, value)| {
            criteria.with(field, value.as_deref().unwrap_or_default())
        })
    }
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let mut config = config::Config::load().context("load config")?;
    if let Some(url) = cli.url.as_deref() {
        config.apply_users_url(url);
    }

    let _log_guard = match logging::init(&config) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {e:#}");
            None
        }
    };
    tracing::debug!(url = %config.users_url, "config loaded");

    let Cli { command, copy, .. } = cli;

    // default to the table viewer
    let Some(command) = command else {
        return commands::view::run(&config, copy).await;
    };

    match command {
        Commands::List(args) => {
            let criteria = FilterCriteria::from(&args);
            commands::list::run(&config, criteria, args.json).await
        }
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
