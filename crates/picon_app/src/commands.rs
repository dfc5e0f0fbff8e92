use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use picon_core::{LookupTable, Platform, Provider};
use picon_engine::{
    ensure_output_dir, BatchHandle, DownloadItem, Fetcher, ListingClient, ReqwestFetcher,
};
use picon_logging::{picon_info, picon_warn};
use serde::Serialize;

use crate::config::{load_lookup, AppConfig, PlatformArg};

/// Provider as printed by `picons providers --json`.
#[derive(Debug, Serialize)]
struct ProviderView<'a> {
    name: &'a str,
    position: &'a str,
    network_id: &'a str,
    url: &'a str,
    single_channel: bool,
    selected: bool,
    has_logo: bool,
}

impl<'a> From<&'a Provider> for ProviderView<'a> {
    fn from(provider: &'a Provider) -> Self {
        Self {
            name: &provider.name,
            position: &provider.position,
            network_id: &provider.network_id,
            url: &provider.url,
            single_channel: provider.single_channel,
            selected: provider.selected,
            has_logo: provider.has_logo(),
        }
    }
}

pub struct DownloadRequest {
    pub url: String,
    pub providers: Vec<String>,
    pub all: bool,
    pub dest: Option<PathBuf>,
    pub platform: Option<PlatformArg>,
    pub lookup: Option<PathBuf>,
}

pub fn providers(config: &AppConfig, url: &str, json: bool) -> anyhow::Result<()> {
    let (runtime, client) = listing_client(config)?;
    let providers = runtime
        .block_on(client.providers(url))
        .with_context(|| format!("loading providers from {url}"))?;

    if json {
        let views: Vec<ProviderView<'_>> = providers.iter().map(ProviderView::from).collect();
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }

    for provider in &providers {
        let mark = if provider.selected { "x" } else { " " };
        println!(
            "[{mark}] {} ({}, {}) {}",
            provider.name, provider.position, provider.network_id, provider.url
        );
    }
    Ok(())
}

pub fn download(config: &AppConfig, request: DownloadRequest) -> anyhow::Result<()> {
    let platform: Platform = request.platform.unwrap_or(config.platform).into();
    let picons_dir = request.dest.unwrap_or_else(|| config.picons_dir.clone());
    let lookup_file = request.lookup.or_else(|| config.lookup_file.clone());
    let lookup: HashMap<String, String> = match lookup_file {
        Some(path) => load_lookup(&path)?,
        None => HashMap::new(),
    };
    if platform == Platform::Enigma2 && lookup.is_empty() {
        picon_warn!("No Enigma2 lookup table; picons keep their logo file names");
    }

    let (runtime, client) = listing_client(config)?;
    let providers = runtime
        .block_on(client.providers(&request.url))
        .with_context(|| format!("loading providers from {}", request.url))?;
    let chosen = select_providers(&providers, &request.providers, request.all);
    if chosen.is_empty() {
        bail!("no provider selected on {}", request.url);
    }

    ensure_output_dir(&picons_dir)
        .with_context(|| format!("preparing {}", picons_dir.display()))?;
    let items = runtime.block_on(collect_targets(
        &client,
        &chosen,
        &picons_dir,
        &lookup,
        platform,
    ));
    drop(runtime);

    picon_info!(
        "{} picons from {} providers go to {:?}",
        items.len(),
        chosen.len(),
        picons_dir
    );
    let fetcher: Arc<dyn Fetcher> = Arc::new(ReqwestFetcher::new(config.fetch_settings()));
    print_batch(BatchHandle::spawn_download(fetcher, items, config.progress_capacity));
    Ok(())
}

pub fn convert(config: &AppConfig, src: &Path, dest: &Path) -> anyhow::Result<()> {
    if !src.is_dir() {
        bail!("{} is not a directory", src.display());
    }
    print_batch(BatchHandle::spawn_convert(
        src.to_path_buf(),
        dest.to_path_buf(),
        config.progress_capacity,
    ));
    Ok(())
}

/// Download items of every chosen provider; a provider whose page fails is logged and skipped.
async fn collect_targets(
    client: &ListingClient,
    chosen: &[&Provider],
    picons_dir: &Path,
    lookup: &dyn LookupTable,
    platform: Platform,
) -> Vec<DownloadItem> {
    let mut items = Vec::new();
    for provider in chosen {
        match client.picon_targets(provider, picons_dir, lookup, platform).await {
            Ok(found) => items.extend(found),
            Err(err) => picon_warn!("Skipping provider {}: {}", provider.name, err),
        }
    }
    items
}

/// Providers named on the command line, every provider, or the preselected ones.
fn select_providers<'a>(
    providers: &'a [Provider],
    names: &[String],
    all: bool,
) -> Vec<&'a Provider> {
    if all {
        return providers.iter().collect();
    }
    if names.is_empty() {
        return providers.iter().filter(|p| p.selected).collect();
    }

    for name in names {
        if !providers.iter().any(|p| p.name.eq_ignore_ascii_case(name)) {
            picon_warn!("Provider {:?} is not listed on this page", name);
        }
    }
    providers
        .iter()
        .filter(|p| names.iter().any(|name| p.name.eq_ignore_ascii_case(name)))
        .collect()
}

fn listing_client(config: &AppConfig) -> anyhow::Result<(tokio::runtime::Runtime, ListingClient)> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting runtime")?;
    let fetcher: Arc<dyn Fetcher> = Arc::new(ReqwestFetcher::new(config.fetch_settings()));
    let client = ListingClient::new(fetcher, &config.base_url)
        .with_context(|| format!("invalid base url {}", config.base_url))?;
    Ok((runtime, client))
}

fn print_batch(handle: BatchHandle) {
    for line in handle {
        println!("{line}");
    }
}
