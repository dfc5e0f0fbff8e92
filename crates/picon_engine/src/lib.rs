//! Picon engine: page fetching, picon downloads and background batches.
mod convert;
mod decode;
mod engine;
mod fetch;
mod listing;
mod persist;
mod pipeline;
mod types;

pub use convert::{
    convert_dir, enigma2_picons, neutrino_name_from_enigma2, ConvertError, ENIGMA2_PICON_SUFFIX,
};
pub use decode::{decode_html, DecodedHtml};
pub use engine::{BatchHandle, DEFAULT_PROGRESS_CAPACITY};
pub use fetch::{
    ChannelProgressSink, DownloadError, FetchSettings, Fetcher, ProgressSink, ReqwestFetcher,
    DEFAULT_USER_AGENT,
};
pub use listing::{ListingClient, DEFAULT_BASE_URL};
pub use persist::{ensure_output_dir, AtomicFileWriter, PartialFile, PersistError};
pub use pipeline::run_downloads;
pub use types::{
    BatchEvent, BatchSummary, DownloadItem, FailureKind, FetchError, FetchMetadata, FetchOutput,
};
