//! Document loading.
//!
//! Every source converges on a parsed [`Html`] document before extraction.

use std::fs;
use std::path::Path;

use scraper::Html;

use crate::error::{ExtractorError, Result};
use crate::http::{bytes_to_string, Transport};

/// Parse markup held in memory.
///
/// HTML parsing is error-tolerant, so this never fails.
#[must_use]
pub fn parse_from_string(markup: &str) -> Html {
    Html::parse_document(markup)
}

/// Read and parse a local file.
///
/// # Errors
/// Returns `DocumentLoad` if the file can't be read.
pub fn parse_from_file(path: impl AsRef<Path>) -> Result<Html> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| ExtractorError::DocumentLoad {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Loaded document");
    Ok(parse_from_string(&bytes_to_string(
        &bytes,
        &path.display().to_string(),
    )))
}

/// Retrieve and parse a document through a transport.
///
/// # Errors
/// Propagates the transport's fetch error.
pub fn parse_from_transport(url: &str, transport: &dyn Transport) -> Result<Html> {
    let markup = transport.fetch(url)?;
    tracing::debug!(url, bytes = markup.len(), "Fetched document");
    Ok(parse_from_string(&markup))
}
