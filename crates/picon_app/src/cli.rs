use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::PlatformArg;

/// Picon downloader for satellite receivers.
#[derive(Debug, Parser)]
#[command(
    name = "picons",
    version,
    about = "Download channel picons from satellite listing pages",
    long_about = "Reads a satellite page, lists its providers and downloads the\n\
                  picons of the selected ones under the file names expected by\n\
                  Enigma2 or Neutrino receivers. Enigma2 picon folders can be\n\
                  converted to Neutrino names with the convert command."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (default: ./picons.ron)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging on the terminal
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log file (default: ./picons.log)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the providers of a satellite page
    Providers {
        /// Satellite page URL
        url: String,

        /// Print providers as JSON
        #[arg(long)]
        json: bool,
    },

    /// Download picons of the selected providers of a satellite page
    Download {
        /// Satellite page URL
        url: String,

        /// Provider name to download; repeat for several
        #[arg(short, long = "provider", value_name = "NAME")]
        providers: Vec<String>,

        /// Download every provider of the page
        #[arg(long, conflicts_with = "providers")]
        all: bool,

        /// Destination directory for the picons
        #[arg(short, long)]
        dest: Option<PathBuf>,

        /// Receiver naming scheme
        #[arg(long, value_enum)]
        platform: Option<PlatformArg>,

        /// RON map of Enigma2 service keys to picon file names
        #[arg(long)]
        lookup: Option<PathBuf>,
    },

    /// Copy Enigma2 picons to a directory under Neutrino names
    Convert {
        /// Directory holding `*_0_0_0.png` picons
        src: PathBuf,

        /// Target directory
        dest: PathBuf,
    },
}
