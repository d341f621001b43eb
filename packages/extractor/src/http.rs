//! Transport for retrieving documents over the network.
//!
//! The extractor never applies a timeout or retry policy itself; those live
//! in the transport implementation.

use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::{HTTP_TIMEOUT_SECS, USER_AGENT};
use crate::error::{ExtractorError, Result};

/// Maximum number of retry attempts for transient failures.
const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff (milliseconds).
const RETRY_BASE_DELAY_MS: u64 = 500;

/// Retrieves document markup for a URL.
///
/// Implementations report failures as [`ExtractorError::DocumentFetch`] or
/// [`ExtractorError::RetriesExhausted`].
pub trait Transport {
    /// Fetch the document at `url` and return its markup.
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Blocking HTTP transport with retry on transient failures.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with the default client.
    ///
    /// # Errors
    /// Returns `Http` if the client can't be built.
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: create_client()?,
        })
    }

    /// Create a transport around an existing client.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, url: &str) -> Result<String> {
        let bytes = download_bytes(&self.client, url)?;
        Ok(bytes_to_string(&bytes, url))
    }
}

/// Create a configured HTTP client.
///
/// # Returns
/// A `reqwest::blocking::Client` configured with appropriate timeout and user agent.
pub fn create_client() -> Result<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Download content from a URL with retry logic.
///
/// Uses exponential backoff for transient failures (network errors, 5xx responses).
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `url` - URL to download from
///
/// # Returns
/// Raw bytes of the response body
pub fn download_bytes(client: &Client, url: &str) -> Result<Vec<u8>> {
    let mut last_error: Option<String> = None;

    for attempt in 0..MAX_RETRIES {
        if attempt > 0 {
            // Exponential backoff: 500ms, 1000ms
            let delay = RETRY_BASE_DELAY_MS * (1 << (attempt - 1));
            tracing::debug!(attempt, delay_ms = delay, "Retrying after delay");
            thread::sleep(Duration::from_millis(delay));
        }

        match client.get(url).send() {
            Ok(response) => {
                let status = response.status();

                if status.is_server_error() {
                    tracing::warn!(
                        url,
                        status = %status,
                        attempt = attempt + 1,
                        max_retries = MAX_RETRIES,
                        "Server error, will retry"
                    );
                    last_error = Some(format!("Server error: {status}"));
                    continue;
                }

                // Client errors (4xx) won't succeed on retry
                let response = response
                    .error_for_status()
                    .map_err(|e| ExtractorError::fetch(url, e))?;
                let bytes = response.bytes().map_err(|e| ExtractorError::fetch(url, e))?;
                return Ok(bytes.to_vec());
            }
            Err(e) => {
                if e.is_connect() || e.is_timeout() {
                    tracing::warn!(
                        url,
                        error = %e,
                        attempt = attempt + 1,
                        max_retries = MAX_RETRIES,
                        "Connection error, will retry"
                    );
                    last_error = Some(e.to_string());
                    continue;
                }
                return Err(ExtractorError::fetch(url, e));
            }
        }
    }

    Err(ExtractorError::RetriesExhausted {
        url: url.to_string(),
        attempts: MAX_RETRIES,
        message: last_error.unwrap_or_else(|| "Unknown error".to_string()),
    })
}

/// Decode bytes as UTF-8, replacing invalid sequences.
///
/// # Arguments
/// * `bytes` - Raw content
/// * `origin` - Where the bytes came from, for the warning
pub fn bytes_to_string(bytes: &[u8], origin: &str) -> String {
    match String::from_utf8(bytes.to_vec()) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(origin, error = %e, "Content is not valid UTF-8, decoding lossily");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}
