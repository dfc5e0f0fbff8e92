use std::path::Path;
use std::sync::Arc;

use picon_core::{
    sort_by_logo, synthesize_name, LookupTable, NamingError, PackageListingParser, Picon,
    PiconIdentity, Platform, Provider, ProviderListingParser,
};
use picon_logging::{picon_debug, picon_info, picon_warn};
use url::Url;

use crate::decode::decode_html;
use crate::fetch::Fetcher;
use crate::{DownloadItem, FailureKind, FetchError};

pub const DEFAULT_BASE_URL: &str = "https://www.lyngsat.com";

/// Fetches listing pages and turns them into providers and download items.
pub struct ListingClient {
    fetcher: Arc<dyn Fetcher>,
    base_url: Url,
}

impl ListingClient {
    pub fn new(fetcher: Arc<dyn Fetcher>, base_url: &str) -> Result<Self, FetchError> {
        let base_url = Url::parse(base_url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        Ok(Self { fetcher, base_url })
    }

    /// Providers of a satellite page, logo-carrying ones first.
    ///
    /// Only an unreachable page is an error; logo failures leave the logo empty.
    pub async fn providers(&self, page_url: &str) -> Result<Vec<Provider>, FetchError> {
        let html = self.fetch_html(page_url).await.map_err(|err| {
            picon_warn!("Parse providers error [{}]: {}", page_url, err);
            err
        })?;

        let mut providers = ProviderListingParser::new().parse_html(&html);
        for provider in providers.iter_mut() {
            let Some(logo_ref) = provider.logo_ref.as_deref() else {
                continue;
            };
            let Some(logo_url) = self.resolve(logo_ref) else {
                continue;
            };
            match self.fetcher.fetch(logo_url.as_str()).await {
                Ok(output) => provider.logo = Some(output.bytes),
                Err(err) => picon_warn!("Downloading provider logo error: {} [{}]", logo_url, err),
            }
        }
        sort_by_logo(&mut providers);

        picon_info!("{} providers found on {}", providers.len(), page_url);
        Ok(providers)
    }

    /// Source URL and destination path of every picon listed for `provider`.
    ///
    /// Records whose identifiers do not convert are logged and skipped.
    pub async fn picon_targets(
        &self,
        provider: &Provider,
        picons_dir: &Path,
        lookup: &dyn LookupTable,
        platform: Platform,
    ) -> Result<Vec<DownloadItem>, FetchError> {
        let html = self.fetch_html(&provider.url).await.map_err(|err| {
            picon_warn!("Provider picons downloading error: {} {}", provider.url, err);
            err
        })?;

        let picons = PackageListingParser::new(provider.single_channel).parse_html(&html);
        let mut items = Vec::with_capacity(picons.len());
        for picon in &picons {
            let name = match target_name(provider, picon, lookup, platform) {
                Ok(name) => name,
                Err(err) => {
                    picon_warn!("Picons format parse error: {:?}: {}", picon, err);
                    continue;
                }
            };
            let Some(source_url) = self.resolve(&picon.logo_ref) else {
                continue;
            };
            let file_name = name.unwrap_or_else(|| basename(&picon.logo_ref).to_string());
            items.push(DownloadItem {
                source_url,
                dest: picons_dir.join(file_name),
            });
        }

        picon_debug!(
            "{} of {} picons of {} resolved",
            items.len(),
            picons.len(),
            provider.name
        );
        Ok(items)
    }

    async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let output = self.fetcher.fetch(url).await?;
        if output.metadata.redirect_count > 0 {
            picon_debug!(
                "{} redirected {} times to {}",
                url,
                output.metadata.redirect_count,
                output.metadata.final_url
            );
        }
        let decoded = decode_html(&output.bytes, output.metadata.content_type.as_deref());
        Ok(decoded.html)
    }

    fn resolve(&self, reference: &str) -> Option<Url> {
        match self.base_url.join(reference.trim()) {
            Ok(url) => Some(url),
            Err(err) => {
                picon_warn!("Cannot resolve {:?} against {}: {}", reference, self.base_url, err);
                None
            }
        }
    }
}

fn target_name(
    provider: &Provider,
    picon: &Picon,
    lookup: &dyn LookupTable,
    platform: Platform,
) -> Result<Option<String>, NamingError> {
    // Single-channel pages list the channel logo only; the id comes from the satellite page.
    let service_id = match (&provider.service_id, provider.single_channel) {
        (Some(service_id), true) => service_id.as_str(),
        _ => picon.service_id.as_str(),
    };
    let identity = PiconIdentity {
        service_id,
        network_id: &provider.network_id,
        position: &provider.position,
        single_channel: provider.single_channel,
    };
    synthesize_name(&identity, platform, lookup)
}

fn basename(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}
