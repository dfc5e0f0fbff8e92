use picon_logging::{picon_error, picon_info};

use crate::fetch::{DownloadError, Fetcher, ProgressSink};
use crate::{BatchSummary, DownloadItem};

/// Download `items` one after another, reporting each through `sink`.
///
/// A failed item is reported and skipped; the batch itself cannot fail.
pub async fn run_downloads(
    fetcher: &dyn Fetcher,
    items: &[DownloadItem],
    sink: &dyn ProgressSink,
) -> BatchSummary {
    picon_info!("Picon download batch started: {} items", items.len());
    let mut summary = BatchSummary::default();

    for item in items {
        let file_name = item
            .dest
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        sink.message(format!("Downloading: {file_name}."));

        match fetcher.download(item.source_url.as_str(), &item.dest).await {
            Ok(_) => summary.succeeded += 1,
            Err(DownloadError::Fetch(err)) => {
                picon_error!("Picon download error: {} [{}]", item.source_url, err);
                sink.message(format!("Picon download error: {}  [{}]", item.source_url, err));
                summary.failed += 1;
            }
            Err(DownloadError::Persist(err)) => {
                picon_error!("Saving picon [{}] error: {}", item.dest.display(), err);
                sink.message(format!(
                    "Saving picon [{}] error: {}",
                    item.dest.display(),
                    err
                ));
                summary.failed += 1;
            }
        }
    }

    summary
}
