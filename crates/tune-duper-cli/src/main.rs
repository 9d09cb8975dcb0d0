mod commands;
mod logging;
mod progress;
mod server;

use std::io::{self, Write};
use std::path::Path;
use std::process;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands};
use dotenv::dotenv;
use progress::CliReporter;
use tracing::{error, info};
use tune_duper_core::{delete_files, AppConfig, DeleteStatus, FileStore, ResultStore, ScanEngine};

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match tune_duper_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    match args.command {
        Some(Commands::Serve) => {
            if let Err(err) = run_serve(config) {
                error!("Error: {:#}", err);
                process::exit(1);
            }
        }
        Some(Commands::Scan {
            directory,
            no_cache,
            json,
        }) => {
            if let Err(err) = run_scan(config, &directory, !no_cache, json) {
                error!("Error: {:#}", err);
                process::exit(1);
            }
        }
        Some(Commands::Delete { files }) => run_delete(&files),
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
        }
        Some(Commands::ClearCache) => {
            match prompt_confirm(
                &format!("Are you SURE you want to delete the cached result at {}?", config.cache_path),
                Some(false),
            ) {
                Ok(true) => match FileStore::new(&config.cache_path).clear() {
                    Ok(()) => println!("Cache cleared"),
                    Err(e) => error!("Error clearing cache: {}", e),
                },
                _ => {
                    process::exit(0);
                }
            }
        }
        None => {
            let _ = Cli::command().print_long_help();
        }
    }

    Ok(())
}

fn run_serve(config: AppConfig) -> anyhow::Result<()> {
    let bind_address = config.bind_address.clone();
    let engine = ScanEngine::with_file_store(config).context("building scan engine")?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;
    runtime.block_on(server::serve(server::AppState::new(engine), &bind_address))
}

fn run_scan(config: AppConfig, directory: &Path, use_cache: bool, json: bool) -> anyhow::Result<()> {
    let engine = ScanEngine::with_file_store(config).context("building scan engine")?;
    let reporter = CliReporter::new();
    let result = engine.scan(directory, use_cache, &reporter)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!();
    info!(
        "{} files with metadata, {} groups of similar names",
        format!("{}", result.files.len()).green(),
        format!("{}", result.group_count()).red(),
    );
    for file in &result.files {
        println!(
            "  {} {} - {} ({}s)",
            file.name,
            file.artist.dimmed(),
            file.title.dimmed(),
            file.duration_seconds
        );
    }
    // Member indices point into the directory listing, not into `files`.
    for (group_id, members) in &result.similar_files {
        println!("{} {}: {:?}", "Group".cyan(), group_id, members);
    }

    Ok(())
}

fn run_delete(files: &[String]) {
    let report = delete_files(files);
    for path in &report.deleted_files {
        println!("{} {}", "deleted".green(), path);
    }
    for message in &report.errors {
        println!("{} {}", "error".red(), message);
    }
    if report.status == DeleteStatus::PartialSuccess {
        process::exit(1);
    }
}

fn prompt_confirm(prompt: &str, default: Option<bool>) -> io::Result<bool> {
    let mut input = String::new();

    loop {
        input.clear();

        match default {
            Some(true) => print!("{} (Y/n): ", prompt),
            Some(false) | None => print!("{} (y/N): ", prompt),
        }
        io::stdout().flush()?;

        io::stdin().read_line(&mut input)?;

        match input.trim().to_uppercase().as_str() {
            "Y" => return Ok(true),
            "N" => return Ok(false),
            "" => match default {
                Some(default) => return Ok(default),
                None => continue,
            },
            _ => continue,
        }
    }
}
