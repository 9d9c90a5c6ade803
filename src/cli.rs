use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "shopwatch")]
#[command(about = "Reports listings added to or removed from marketplace shops since the last run")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Fetch every configured shop once and report changes
    Sync(SyncArgs),

    /// Keep syncing on a fixed interval
    Watch(WatchArgs),

    /// Print the stored snapshot for a shop
    Show(ShowArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Path to config.toml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Shops to check instead of the configured list
    #[arg(long, value_delimiter = ',')]
    pub shops: Option<Vec<String>>,

    /// Output one JSON object per shop instead of text
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Debug logging on stderr
    #[arg(long, short = 'v', default_value_t = false)]
    pub verbose: bool,
}

#[derive(Parser)]
pub struct SyncArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Parser)]
pub struct WatchArgs {
    /// Time between passes, e.g. "30m", "1h", "1d"
    #[arg(long, default_value = "1h", value_parser = humantime::parse_duration)]
    pub every: Duration,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Parser)]
pub struct ShowArgs {
    /// Shop whose stored snapshot to print
    pub shop_id: String,

    /// Path to config.toml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the stored JSON as-is
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sync_with_shop_override() {
        let cli = Cli::try_parse_from(["shopwatch", "sync", "--shops", "1,2", "--json"]).unwrap();
        let Command::Sync(args) = cli.command else { panic!("expected sync") };
        assert_eq!(args.common.shops, Some(vec!["1".to_string(), "2".to_string()]));
        assert!(args.common.json);
    }

    #[test]
    fn watch_parses_humantime() {
        let cli = Cli::try_parse_from(["shopwatch", "watch", "--every", "30m"]).unwrap();
        let Command::Watch(args) = cli.command else { panic!("expected watch") };
        assert_eq!(args.every, Duration::from_secs(30 * 60));
    }

    #[test]
    fn watch_rejects_bad_interval() {
        assert!(Cli::try_parse_from(["shopwatch", "watch", "--every", "soon"]).is_err());
    }

    #[test]
    fn show_takes_a_shop() {
        let cli = Cli::try_parse_from(["shopwatch", "show", "1234"]).unwrap();
        let Command::Show(args) = cli.command else { panic!("expected show") };
        assert_eq!(args.shop_id, "1234");
    }
}
