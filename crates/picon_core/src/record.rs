/// A satellite-page entry: either a provider package or a standalone channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    pub logo: Option<Vec<u8>>,
    /// Page-relative path the logo is fetched from, when the row registered one.
    pub logo_ref: Option<String>,
    pub name: String,
    /// Orbital position as resolved from the page, e.g. `192E`.
    pub position: String,
    pub url: String,
    /// Plain network id for packages, `<onid>::<frequency>` for single channels.
    pub network_id: String,
    pub service_id: Option<String>,
    pub single_channel: bool,
    pub selected: bool,
}

impl Provider {
    pub fn has_logo(&self) -> bool {
        self.logo.as_ref().is_some_and(|bytes| !bytes.is_empty())
    }
}

/// A channel logo listed on a package page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picon {
    pub logo_ref: String,
    pub service_id: String,
}

impl Picon {
    pub fn new(logo_ref: impl Into<String>, service_id: impl Into<String>) -> Self {
        Self {
            logo_ref: logo_ref.into(),
            service_id: service_id.into(),
        }
    }
}

/// Stable sort: providers with a logo first, encounter order otherwise.
pub fn sort_by_logo(providers: &mut [Provider]) {
    providers.sort_by_key(|p| !p.has_logo());
}
