//! Provider package page: one row per channel, logo first.
use picon_logging::picon_trace;

use crate::markup::{HtmlSource, TagEventSource};
use crate::provider::LOGO_PREFIX;
use crate::record::Picon;
use crate::row::{AccumulatorConfig, RowAccumulator, RowHandler};

const SINGLE_ROW_LEN: usize = 4;
const PACKAGE_ROW_LEN: usize = 9;
const SINGLE_SERVICE_ID: &str = "0";

#[derive(Debug, Default)]
pub struct PackageListingParser {
    single_channel: bool,
    picons: Vec<Picon>,
}

impl PackageListingParser {
    pub fn new(single_channel: bool) -> Self {
        Self {
            single_channel,
            picons: Vec::new(),
        }
    }

    pub fn parse<S: TagEventSource + ?Sized>(mut self, source: &S) -> Vec<Picon> {
        let mut accumulator = RowAccumulator::new(AccumulatorConfig::default());
        accumulator.feed(source.tag_events(), &mut self);
        self.picons
    }

    pub fn parse_html(self, html: &str) -> Vec<Picon> {
        self.parse(&HtmlSource::new(html))
    }
}

impl RowHandler for PackageListingParser {
    fn on_row(&mut self, row: Vec<String>) {
        if self.single_channel && row.len() == SINGLE_ROW_LEN && is_logo(&row[0]) {
            self.picons.push(Picon::new(row[0].trim(), SINGLE_SERVICE_ID));
            return;
        }
        if row.len() != PACKAGE_ROW_LEN {
            return;
        }

        let logo = row[..2].iter().find(|cell| is_logo(cell));
        let service_id = &row[row.len() - 3];
        match logo {
            Some(logo) if is_all_digits(service_id) => {
                self.picons.push(Picon::new(logo.clone(), service_id.clone()));
            }
            _ => picon_trace!("package row without logo or service id: {:?}", row),
        }
    }
}

fn is_logo(cell: &str) -> bool {
    cell.starts_with(LOGO_PREFIX)
}

fn is_all_digits(cell: &str) -> bool {
    !cell.is_empty() && cell.chars().all(|c| c.is_ascii_digit())
}
