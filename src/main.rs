use anyhow::Context;
use clap::Parser;
use shopwatch::cli::{Cli, Command, CommonArgs, ShowArgs};
use shopwatch::config::Config;
use shopwatch::engine::DiffEngine;
use shopwatch::fetch::MarketplaceClient;
use shopwatch::logging::setup_logging;
use shopwatch::report;
use shopwatch::runner;
use shopwatch::store::SnapshotStore;
use tracing::info;

fn build_engine(config: &Config) -> anyhow::Result<DiffEngine<MarketplaceClient>> {
    let client = MarketplaceClient::new(&config.api_base_url)
        .context("failed to create HTTP client")?;
    let store = SnapshotStore::new(&config.data_dir);
    Ok(DiffEngine::new(store, client, config.api_key.clone()))
}

fn load_run_config(common: &CommonArgs) -> anyhow::Result<Config> {
    let config = Config::load(common)?.validate()?;
    setup_logging(&config.log_level)?;
    info!(
        shops = config.shop_ids.len(),
        data_dir = %config.data_dir.display(),
        "shopwatch v{}",
        env!("CARGO_PKG_VERSION")
    );
    Ok(config)
}

fn show(args: &ShowArgs) -> anyhow::Result<()> {
    let common = CommonArgs {
        config: args.config.clone(),
        ..CommonArgs::default()
    };
    let config = Config::load(&common)?;
    setup_logging(&config.log_level)?;

    let store = SnapshotStore::new(&config.data_dir);
    if !store.exists(&args.shop_id)? {
        println!("No snapshot stored for shop {}. Run 'shopwatch sync' to create one.", args.shop_id);
        return Ok(());
    }

    let snapshot = store.load(&args.shop_id)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!("Shop ID {} ({} listings)", args.shop_id, snapshot.len());
    for (id, listing) in &snapshot {
        println!("  {id} \"{}\"", listing.title().unwrap_or(""));
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Sync(args) => {
            let config = load_run_config(&args.common)?;
            let engine = build_engine(&config)?;

            // per-shop failures are part of the report, not the exit status
            runner::run_pass(&engine, &config.shop_ids, |outcome| {
                report::print(outcome, config.json_output);
            });
        }
        Command::Watch(args) => {
            let config = load_run_config(&args.common)?;
            let engine = build_engine(&config)?;

            runner::watch(&engine, &config.shop_ids, args.every, |outcome| {
                report::print(outcome, config.json_output);
            });
        }
        Command::Show(args) => show(&args)?,
    }

    Ok(())
}
