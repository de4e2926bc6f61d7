use clap::Parser;
use colored::*;
use jsonkeep::commands::config::ConfigAction;
use jsonkeep::commands::{self, CmdMessage, CmdResult, MessageLevel};
use jsonkeep::config::{config_dir, StoreConfig};
use jsonkeep::error::{Result, StoreError};
use jsonkeep::store::{format, JsonStore};
use std::path::PathBuf;
use tracing::Level;

mod args;
use args::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(result) => {
            print_result(&result);
            if result.has_errors() {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<CmdResult> {
    let config_dir = config_dir();
    let store = init_store(&cli, config_dir.as_ref());

    match cli.command {
        Commands::Show { file } => commands::show::run(&store, &file),
        Commands::Get { file, key } => commands::get::run(&store, &file, &key),
        Commands::Set { file, key, value } => commands::set::run(&store, &file, &key, &value),
        Commands::Unset { file, key } => commands::set::unset(&store, &file, &key),
        Commands::Merge { file, patch } => commands::merge::run(&store, &file, &patch),
        Commands::Slug { text } => commands::slug::run(&text.join(" ")),
        Commands::Ip { address } => commands::ip::run(address.as_deref()),
        Commands::Config { key, value } => {
            let dir = config_dir
                .ok_or_else(|| StoreError::Command("Could not determine config dir".into()))?;
            let action = match (key, value) {
                (None, _) => ConfigAction::ShowAll,
                (Some(k), None) => ConfigAction::ShowKey(k),
                (Some(k), Some(v)) => ConfigAction::Set(k, v),
            };
            commands::config::run(&store, &dir, action)
        }
    }
}

/// Config file settings, overridden by command-line flags.
fn init_store(cli: &Cli, config_dir: Option<&PathBuf>) -> JsonStore {
    let mut config = match config_dir {
        Some(dir) => StoreConfig::load(&JsonStore::new(), dir),
        None => StoreConfig::default(),
    };
    if cli.create_dirs {
        config.create_dirs = true;
    }
    if cli.no_sync {
        config.sync = false;
    }
    JsonStore::with_config(config)
}

fn print_result(result: &CmdResult) {
    if let Some(doc) = &result.document {
        match format::to_canonical_string(doc) {
            Ok(text) => println!("{}", text),
            Err(e) => eprintln!("Error: {}", e),
        }
    }
    for line in &result.output {
        println!("{}", line);
    }
    if let Some(config) = &result.config {
        for key in StoreConfig::keys() {
            if let Some(val) = config.get(key) {
                println!("{} = {}", key, val);
            }
        }
    }
    print_messages(&result.messages);
}

fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => eprintln!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => eprintln!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}
