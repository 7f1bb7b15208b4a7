//! Document loading: URL fetch, format detection, and text extraction.

pub mod docx;
pub mod pdf;

use std::time::Duration;

use futures_util::StreamExt;
use url::Url;

use crate::config::Config;
use crate::error::PipelineError;

/// Declared document format, inferred from the URL path extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

/// Detect the format from the URL path. The query string is ignored, so
/// presigned URLs like `.../policy.pdf?X-Amz-Signature=...` detect correctly.
pub fn detect_format(url: &Url) -> Result<DocumentFormat, PipelineError> {
    let path = url.path().to_lowercase();
    if path.ends_with(".pdf") {
        Ok(DocumentFormat::Pdf)
    } else if path.ends_with(".docx") {
        Ok(DocumentFormat::Docx)
    } else {
        Err(PipelineError::UnsupportedFormat(url.path().to_string()))
    }
}

/// Fetch the document, detect its format, and extract plain text.
/// This is the whole build-phase input: the returned text is immutable.
pub async fn load_document(
    client: &reqwest::Client,
    raw_url: &str,
    config: &Config,
) -> Result<String, PipelineError> {
    let url = Url::parse(raw_url)
        .map_err(|e| PipelineError::Fetch(format!("invalid document URL: {e}")))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(PipelineError::Fetch(format!(
            "unsupported URL scheme: {}",
            url.scheme()
        )));
    }

    let format = detect_format(&url)?;
    let bytes = fetch(client, &url, config).await?;
    tracing::info!(
        "Downloaded {} bytes from {} ({:?})",
        bytes.len(),
        url,
        format
    );

    // pdf-extract and the zip reader are CPU-bound; keep them off the runtime
    let text = tokio::task::spawn_blocking(move || extract_text(format, &bytes))
        .await
        .map_err(|e| PipelineError::Parse(format!("extraction task failed: {e}")))??;

    if text.trim().is_empty() {
        return Err(PipelineError::EmptyDocument);
    }

    Ok(text)
}

async fn fetch(
    client: &reqwest::Client,
    url: &Url,
    config: &Config,
) -> Result<Vec<u8>, PipelineError> {
    let max_bytes = config.max_document_bytes();

    let resp = client
        .get(url.clone())
        .timeout(Duration::from_secs(config.fetch_timeout_secs))
        .send()
        .await
        .map_err(|e| PipelineError::Fetch(format!("request to {url} failed: {e}")))?;

    if !resp.status().is_success() {
        return Err(PipelineError::Fetch(format!(
            "{url} returned HTTP {}",
            resp.status()
        )));
    }

    if let Some(len) = resp.content_length() {
        if len > max_bytes {
            return Err(PipelineError::Fetch(format!(
                "document is {len} bytes (limit {max_bytes})"
            )));
        }
    }

    // Servers may omit Content-Length, so the cap is enforced while the body
    // streams in: an oversized chunked response aborts without being buffered.
    let mut stream = resp.bytes_stream();
    let mut body: Vec<u8> = Vec::new();
    while let Some(piece) = stream.next().await {
        let piece = piece
            .map_err(|e| PipelineError::Fetch(format!("failed to read response body: {e}")))?;
        if body.len() as u64 + piece.len() as u64 > max_bytes {
            return Err(PipelineError::Fetch(format!(
                "document exceeds the {max_bytes} byte limit"
            )));
        }
        body.extend_from_slice(&piece);
    }

    Ok(body)
}

/// Dispatch extraction by format. Runs on a blocking thread.
pub fn extract_text(format: DocumentFormat, bytes: &[u8]) -> Result<String, PipelineError> {
    match format {
        DocumentFormat::Pdf => pdf::extract(bytes),
        DocumentFormat::Docx => docx::extract(bytes),
    }
}
