//! modman - An interactive console manager for moving mods between active
//! and inactive folders.

use anyhow::Context;
use modman::app::App;
use modman::cli::Cli;
use modman::config::Config;
use modman::console::{Output, TerminalPrompter};
use modman::logging;
use modman::persistence::ProfileStore;
use tracing::info;

fn main() {
    // Initialize logging; the REPL owns the terminal, so logs go to a file.
    logging::init_file_logging();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };
    let config = Config::load_from_file(&config_path)?;
    info!("Loaded config from {}", config_path.display());

    let data_root = match cli.data_dir.clone().or_else(|| config.data_dir.clone()) {
        Some(root) => root,
        None => ProfileStore::default_root()?,
    };
    let store = ProfileStore::open(data_root).context("Failed to open profile store")?;

    println!("Loading profiles...");
    let profiles = store.load_all();
    if profiles.is_empty() {
        println!("No profiles found");
    } else {
        println!("Loaded {} profiles.", profiles.len());
    }

    let output = Output::new(config.color && !cli.no_color);
    let mut app = App::new(store, profiles, output, Box::new(TerminalPrompter::new()));

    let startup_profile = cli
        .profile
        .as_deref()
        .or(config.default_profile.as_deref());
    app.run(startup_profile)?;
    Ok(())
}
