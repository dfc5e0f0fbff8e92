use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use clap::ValueEnum;
use picon_core::Platform;
use picon_engine::{FetchSettings, DEFAULT_BASE_URL, DEFAULT_PROGRESS_CAPACITY};
use picon_logging::{picon_info, picon_warn};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "picons.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PlatformArg {
    #[default]
    Enigma2,
    Neutrino,
    Plain,
}

impl From<PlatformArg> for Platform {
    fn from(value: PlatformArg) -> Self {
        match value {
            PlatformArg::Enigma2 => Platform::Enigma2,
            PlatformArg::Neutrino => Platform::Neutrino,
            PlatformArg::Plain => Platform::Plain,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub picons_dir: PathBuf,
    pub platform: PlatformArg,
    pub lookup_file: Option<PathBuf>,
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
    pub progress_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            picons_dir: PathBuf::from("picons"),
            platform: PlatformArg::default(),
            lookup_file: None,
            connect_timeout_secs: fetch.connect_timeout.as_secs(),
            read_timeout_secs: fetch.read_timeout.as_secs(),
            progress_capacity: DEFAULT_PROGRESS_CAPACITY,
        }
    }
}

impl AppConfig {
    /// Read `explicit`, or `picons.ron` when no path is given.
    ///
    /// Only the default file may be absent; a named file must exist.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = explicit.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_FILE));
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound && explicit.is_none() => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("reading config {}", path.display()))
            }
        };

        let config: Self = ron::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        picon_info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            read_timeout: Duration::from_secs(self.read_timeout_secs),
            ..FetchSettings::default()
        }
    }
}

/// Enigma2 service key to picon file name, as kept next to the receiver settings.
pub fn load_lookup(path: &Path) -> anyhow::Result<HashMap<String, String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading lookup table {}", path.display()))?;
    let table: HashMap<String, String> = ron::from_str(&content)
        .with_context(|| format!("parsing lookup table {}", path.display()))?;
    if table.is_empty() {
        picon_warn!("Lookup table {:?} is empty; Enigma2 picons keep their logo names", path);
    }
    Ok(table)
}
