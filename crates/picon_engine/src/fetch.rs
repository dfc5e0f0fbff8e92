use std::path::Path;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    mpsc, Arc,
};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;

use crate::persist::{AtomicFileWriter, PersistError};
use crate::{BatchEvent, FailureKind, FetchError, FetchMetadata, FetchOutput};

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:120.0) Gecko/20100101 Firefox/120.0";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    /// Longest wait between two reads of the body.
    pub read_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(3),
            read_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: BatchEvent);

    fn message(&self, text: String) {
        self.emit(BatchEvent::Message(text));
    }
}

/// Forwards events over a bounded channel; blocks while the channel is full.
pub struct ChannelProgressSink {
    tx: mpsc::SyncSender<BatchEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: mpsc::SyncSender<BatchEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: BatchEvent) {
        let _ = self.tx.send(event);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    /// GET `url` into memory.
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError>;

    /// GET `url` and stream the body to `dest`, replacing any existing file.
    async fn download(&self, url: &str, dest: &Path) -> Result<u64, DownloadError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Self {
        Self { settings }
    }

    fn build_client(
        &self,
        redirect_counter: Arc<AtomicUsize>,
    ) -> Result<reqwest::Client, FetchError> {
        let redirect_limit = self.settings.redirect_limit;
        let policy = reqwest::redirect::Policy::custom(move |attempt| {
            let count = attempt.previous().len();
            redirect_counter.store(count, Ordering::Relaxed);
            if count >= redirect_limit {
                attempt.error("redirect limit exceeded")
            } else {
                attempt.follow()
            }
        });

        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .read_timeout(self.settings.read_timeout)
            .timeout(self.settings.request_timeout)
            .user_agent(self.settings.user_agent.clone())
            .redirect(policy)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    async fn get(
        &self,
        url: &str,
        redirect_counter: Arc<AtomicUsize>,
    ) -> Result<reqwest::Response, FetchError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let client = self.build_client(redirect_counter)?;

        let response = client.get(parsed).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(content_len));
            }
        }
        Ok(response)
    }

    fn too_large(&self, actual: u64) -> FetchError {
        FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        let redirect_counter = Arc::new(AtomicUsize::new(0));
        let response = self.get(url, redirect_counter.clone()).await?;

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        let metadata = FetchMetadata {
            original_url: url.to_string(),
            final_url,
            redirect_count: redirect_counter.load(Ordering::Relaxed),
            content_type,
            byte_len: bytes.len() as u64,
        };

        Ok(FetchOutput { bytes, metadata })
    }

    async fn download(&self, url: &str, dest: &Path) -> Result<u64, DownloadError> {
        let response = self.get(url, Arc::new(AtomicUsize::new(0))).await?;

        let (writer, filename) = AtomicFileWriter::for_target(dest)?;
        let mut file = writer.begin(&filename)?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            if file.written() + chunk.len() as u64 > self.settings.max_bytes {
                return Err(self.too_large(file.written() + chunk.len() as u64).into());
            }
            file.write_chunk(&chunk)?;
        }

        let written = file.written();
        file.commit()?;
        Ok(written)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
