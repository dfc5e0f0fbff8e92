mod cli;
mod commands;
mod config;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use picon_logging::{picon_error, LogDestination};

use cli::{CliArgs, Command};
use commands::DownloadRequest;
use config::AppConfig;

fn main() {
    if let Err(err) = run() {
        picon_error!("picons failed: {:#}", err);
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let (destination, level) = if args.verbose {
        (LogDestination::Both, LevelFilter::Debug)
    } else {
        (LogDestination::File, LevelFilter::Info)
    };
    picon_logging::initialize(destination, level, args.log_file.as_deref());

    let config = AppConfig::load(args.config.as_deref()).context("loading configuration")?;

    match args.command {
        Command::Providers { url, json } => commands::providers(&config, &url, json),
        Command::Download {
            url,
            providers,
            all,
            dest,
            platform,
            lookup,
        } => commands::download(
            &config,
            DownloadRequest {
                url,
                providers,
                all,
                dest,
                platform,
                lookup,
            },
        ),
        Command::Convert { src, dest } => commands::convert(&config, &src, &dest),
    }
}
