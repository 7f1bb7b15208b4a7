//! PDF text extraction via `pdf-extract`.

use crate::error::PipelineError;

/// Extract plain text from an in-memory PDF. CPU-bound; callers run this
/// under `spawn_blocking`.
pub fn extract(bytes: &[u8]) -> Result<String, PipelineError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| PipelineError::Parse(format!("PDF extraction failed: {e}")))
}
