use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use picon_logging::{picon_debug, picon_error, picon_info};

use crate::convert::convert_dir;
use crate::fetch::{ChannelProgressSink, Fetcher, ProgressSink};
use crate::pipeline::run_downloads;
use crate::{BatchEvent, DownloadItem};

pub const DEFAULT_PROGRESS_CAPACITY: usize = 64;

/// Receiving end of one background batch.
///
/// Every batch ends with exactly one [`BatchEvent::Done`], even when the
/// worker fails to start or panics.
pub struct BatchHandle {
    event_rx: mpsc::Receiver<BatchEvent>,
}

impl BatchHandle {
    pub fn spawn_download(
        fetcher: Arc<dyn Fetcher>,
        items: Vec<DownloadItem>,
        capacity: usize,
    ) -> Self {
        Self::spawn("picon-download", capacity, move |sink| {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build();
            match runtime {
                Ok(runtime) => {
                    let summary = runtime.block_on(run_downloads(fetcher.as_ref(), &items, sink));
                    picon_info!(
                        "Picon download batch finished: {} saved, {} failed",
                        summary.succeeded,
                        summary.failed
                    );
                }
                Err(err) => {
                    picon_error!("Cannot start download runtime: {}", err);
                    sink.message(format!("Picon download error: {err}"));
                }
            }
        })
    }

    pub fn spawn_convert(src: PathBuf, dest: PathBuf, capacity: usize) -> Self {
        Self::spawn("picon-convert", capacity, move |sink| {
            let summary = convert_dir(&src, &dest, sink);
            picon_info!(
                "Picon convert batch finished: {} converted, {} failed",
                summary.succeeded,
                summary.failed
            );
        })
    }

    fn spawn<F>(name: &str, capacity: usize, work: F) -> Self
    where
        F: FnOnce(&dyn ProgressSink) + Send + 'static,
    {
        let (event_tx, event_rx) = mpsc::sync_channel(capacity.max(1));

        let spawned = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                let sink = ChannelProgressSink::new(event_tx.clone());
                if panic::catch_unwind(AssertUnwindSafe(|| work(&sink))).is_err() {
                    picon_error!("Background batch panicked");
                    sink.message("Batch aborted unexpectedly".to_string());
                }
                let _ = event_tx.send(BatchEvent::Done);
            });

        match spawned {
            Ok(_) => picon_debug!("Batch {} started", name),
            Err(err) => {
                picon_error!("Cannot start batch thread: {}", err);
                let (event_tx, event_rx) = mpsc::sync_channel(2);
                let _ = event_tx.send(BatchEvent::Message(format!("Cannot start batch: {err}")));
                let _ = event_tx.send(BatchEvent::Done);
                return Self { event_rx };
            }
        }

        Self { event_rx }
    }

    /// Next event if one is ready, for callers that poll between other work.
    pub fn try_recv(&self) -> Option<BatchEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Block until the next event; `None` once the worker is gone.
    pub fn recv(&self) -> Option<BatchEvent> {
        self.event_rx.recv().ok()
    }

    /// Block until `Done`, returning all messages in order.
    pub fn wait(self) -> Vec<String> {
        self.collect()
    }
}

impl Iterator for BatchHandle {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        match self.recv()? {
            BatchEvent::Message(text) => Some(text),
            BatchEvent::Done => None,
        }
    }
}
