//! Satellite page: one row per transponder, provider package or channel.
use std::collections::HashSet;
use std::sync::LazyLock;

use picon_logging::picon_trace;
use regex::Regex;

use crate::markup::{HtmlSource, TagEventSource};
use crate::record::{sort_by_logo, Provider};
use crate::row::{AccumulatorConfig, LabelElement, RowAccumulator, RowHandler};

pub const LOGO_PREFIX: &str = "/logo/";
pub const LINK_MARKERS: [&str; 4] = ["/tvchannels/", "/radiochannels/", "/packages/", "/logo/"];
const LABEL_COLOR: &str = "darkgreen";

const PROVIDER_ROW_LEN: usize = 14;
const LOGO_CELL: usize = 3;
const URL_CELL: usize = 5;
const NAME_CELL: usize = 6;
const ID_CELL: usize = 9;
const DEFAULT_NETWORK_ID: &str = "1";

// Literal patterns; they are compiled once on first use.
static POSITION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"at\s\d+\..*[EW]$").expect("position pattern"));
static ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+-\d+").expect("id pattern"));
static FREQUENCY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+ [HVLR]+").expect("frequency pattern"));

pub struct ProviderListingParser {
    position: Option<String>,
    label_network_id: Option<String>,
    frequency: Option<String>,
    seen_ids: HashSet<String>,
    providers: Vec<Provider>,
}

impl Default for ProviderListingParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderListingParser {
    pub fn new() -> Self {
        Self {
            position: None,
            label_network_id: None,
            frequency: None,
            seen_ids: HashSet::new(),
            providers: Vec::new(),
        }
    }

    pub fn accumulator_config() -> AccumulatorConfig {
        AccumulatorConfig {
            image_prefixes: Some(vec![LOGO_PREFIX.to_string()]),
            anchor_markers: LINK_MARKERS.iter().map(|m| m.to_string()).collect(),
            label: Some(LabelElement {
                tag: "font".to_string(),
                attr_value: LABEL_COLOR.to_string(),
            }),
            ..AccumulatorConfig::default()
        }
    }

    /// Providers in page order, logo-carrying ones first.
    pub fn parse<S: TagEventSource + ?Sized>(mut self, source: &S) -> Vec<Provider> {
        let mut accumulator = RowAccumulator::new(Self::accumulator_config());
        accumulator.feed(source.tag_events(), &mut self);
        let mut providers = self.providers;
        sort_by_logo(&mut providers);
        providers
    }

    pub fn parse_html(self, html: &str) -> Vec<Provider> {
        self.parse(&HtmlSource::new(html))
    }

    fn provider_row(&mut self, row: &[String]) {
        let Some(found) = ID_PATTERN.find(&row[ID_CELL]) else {
            picon_trace!("provider row without network id: {:?}", row[ID_CELL]);
            return;
        };
        let Some((network_id, _transport_id)) = found.as_str().split_once('-') else {
            return;
        };
        if !self.seen_ids.insert(network_id.to_string()) {
            picon_trace!("network id {} already listed", network_id);
            return;
        }

        let logo_ref = Some(row[LOGO_CELL].clone()).filter(|r| !r.is_empty());
        self.providers.push(Provider {
            logo: None,
            logo_ref,
            name: row[NAME_CELL].clone(),
            position: self.current_position(),
            url: row[URL_CELL].clone(),
            network_id: network_id.to_string(),
            service_id: None,
            single_channel: false,
            selected: true,
        });
    }

    fn single_channel_row(&mut self, row: &[String]) {
        let (name, url, service_id) = if is_http(&row[0]) {
            (&row[1], &row[0], &row[0])
        } else if is_http(&row[1]) {
            (&row[2], &row[1], &row[0])
        } else {
            return;
        };

        let network_id = format!(
            "{}::{}",
            self.label_network_id.as_deref().unwrap_or(DEFAULT_NETWORK_ID),
            self.frequency.as_deref().unwrap_or_default()
        );
        self.providers.push(Provider {
            logo: None,
            logo_ref: None,
            name: name.clone(),
            position: self.current_position(),
            url: url.clone(),
            network_id,
            service_id: Some(service_id.clone()),
            single_channel: true,
            selected: false,
        });
    }

    fn current_position(&self) -> String {
        self.position.clone().unwrap_or_default()
    }
}

impl RowHandler for ProviderListingParser {
    fn on_row(&mut self, row: Vec<String>) {
        if self.position.is_none() {
            self.position = find_position(&row);
        }

        if row.len() > 2 {
            if let Some(found) = FREQUENCY_PATTERN.find(&row[1]) {
                self.frequency = found.as_str().split_whitespace().next().map(str::to_string);
            }
        }

        match row.len() {
            PROVIDER_ROW_LEN => self.provider_row(&row),
            7..=13 => self.single_channel_row(&row),
            len => picon_trace!("skipping row with {} cells", len),
        }
    }

    fn on_label(&mut self, text: &str) {
        if let Some(found) = ID_PATTERN.find(text.trim()) {
            if let Some((network_id, _)) = found.as_str().split_once('-') {
                self.label_network_id = Some(network_id.to_string());
            }
        }
    }
}

/// `"Astra 1KR at 19.2°E"` becomes `"192E"`.
fn find_position(row: &[String]) -> Option<String> {
    row.iter().find_map(|cell| {
        let found = POSITION_PATTERN.find(cell)?.as_str();
        let hemisphere = found.chars().last()?;
        let mut position: String = found.chars().filter(char::is_ascii_digit).collect();
        position.push(hemisphere);
        Some(position)
    })
}

fn is_http(cell: &str) -> bool {
    cell.starts_with("http")
}
