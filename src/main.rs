mod cache;
mod commands;
mod config;
mod error;
mod logging;
mod slack;
#[cfg(test)]
mod testing;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::{eyre::eyre, Result};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::config::Config;
use crate::slack::{ListFetcher, ListRegistry, Options, SlackClient, Slacker};

#[derive(Parser, Debug)]
#[command(name = "slacker")]
#[command(about = "Slack workspace housekeeping. Run with your SLACK_TOKEN.")]
#[command(version)]
struct Args {
  /// Path to config file (default: ./slacker.yaml or $XDG_CONFIG_HOME/slacker/config.yaml)
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Log level (RUST_LOG overrides)
  #[arg(short, long, value_enum, default_value_t = LogLevel::Debug)]
  log_level: LogLevel,

  /// 1 prevents critical actions such as archiving channels, 0 performs them
  #[arg(long, value_parser = clap::value_parser!(u8).range(0..=1))]
  dry_run: Option<u8>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Archive channels with no real messages for the given number of days
  ArchiveDatedChannels {
    /// Days of silence before a channel is archived (default from config)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    days: Option<u32>,
  },
  /// Invite every workspace member into a channel
  InviteAllMembers {
    /// Channel name, without '#'
    #[arg(long)]
    channel: String,
  },
  /// Print the flattened list for a Slack method, e.g. users.list
  List {
    method: String,
    /// Request options as a JSON object
    #[arg(long)]
    options: Option<String>,
  },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
  Debug,
  Info,
  Warn,
  Error,
}

impl LogLevel {
  fn as_str(self) -> &'static str {
    match self {
      LogLevel::Debug => "debug",
      LogLevel::Info => "info",
      LogLevel::Warn => "warn",
      LogLevel::Error => "error",
    }
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  color_eyre::install()?;

  let args = Args::parse();

  let mut config = Config::load(args.config.as_deref())?;
  if let Some(dry_run) = args.dry_run {
    config.dry_run = dry_run != 0;
  }

  let _log_guard = logging::init(args.log_level.as_str(), config.log_dir.as_deref())?;
  if config.dry_run {
    info!("Dry Run...");
  }

  let token = Config::get_api_token()?;
  let client = SlackClient::new(&config, &token)?;
  let registry = ListRegistry::with_extra(config.list_attributes.clone());
  let slacker = Slacker::new(client, &token, registry);
  let admin = slacker.source();

  match args.command {
    Command::ArchiveDatedChannels { days } => {
      let days = days.unwrap_or(config.archive_after_days);
      let channels = commands::get_channels(&slacker, admin, None).await?;
      let results = commands::archive_channels(&slacker, admin, &channels, days).await?;
      let archived = results.iter().filter(|archived| **archived).count();
      println!("Archived {} of {} channels", archived, channels.len());
    }
    Command::InviteAllMembers { channel } => {
      let channels = commands::get_channels(&slacker, admin, None).await?;
      if !commands::invite_all_members(&slacker, admin, &channels, &channel).await? {
        return Err(eyre!("Failed on inviting users to {}", channel));
      }
    }
    Command::List { method, options } => {
      let options: Option<Options> = options
        .map(|raw| serde_json::from_str(&raw))
        .transpose()
        .map_err(|e| eyre!("--options must be a JSON object: {}", e))?;
      let list = slacker.get_list(&method, options.as_ref(), None).await?;
      println!("{}", serde_json::to_string_pretty(&list)?);
    }
  }

  for (key, fetched_at) in slacker.cache_timestamps() {
    debug!(%key, fetched_at, "cached");
  }

  Ok(())
}
