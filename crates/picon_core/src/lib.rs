//! Picon core: listing-page parsers and picon naming.
mod markup;
mod naming;
mod package;
mod position;
mod provider;
mod record;
mod row;

pub use markup::{tag_events, HtmlSource, TagEvent, TagEventSource};
pub use naming::{
    enigma2_key, namespace, network_number, neutrino_file_name, synthesize_name, EmptyLookup,
    LookupTable, NamingError, PiconIdentity, Platform,
};
pub use package::PackageListingParser;
pub use position::{normalize_position, FULL_CIRCLE};
pub use provider::{ProviderListingParser, LINK_MARKERS, LOGO_PREFIX};
pub use record::{sort_by_logo, Picon, Provider};
pub use row::{AccumulatorConfig, LabelElement, RowAccumulator, RowHandler};
