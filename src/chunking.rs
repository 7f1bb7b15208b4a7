//! Sliding-window text chunker.
//!
//! Splits document text into overlapping fixed-size chunks: the first chunk
//! covers `[0, max_size)`, each later chunk starts `overlap` characters before
//! the previous chunk's end, and the last chunk ends at the text length.
//! Offsets count characters, so a chunk boundary never splits a UTF-8 scalar.

use crate::error::PipelineError;

/// A contiguous slice of document text. Produced once per document, never
/// mutated. `start`/`end` are character offsets into the extracted text.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// Insertion order, used for stable tie-breaking in retrieval.
    pub index: usize,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Chunk `text` into overlapping windows of at most `max_size` characters.
///
/// Returns exactly one chunk when the text fits in a single window, and an
/// empty vec for empty text. `overlap >= max_size` would make the window
/// crawl backwards or stall, so it is a configuration error.
///
/// Invariant: concatenating the chunks with each later chunk's first
/// `overlap` characters dropped reconstructs the text exactly.
pub fn chunk_text(
    text: &str,
    max_size: usize,
    overlap: usize,
) -> Result<Vec<Chunk>, PipelineError> {
    if max_size == 0 {
        return Err(PipelineError::Config(
            "chunk size must be greater than zero".to_string(),
        ));
    }
    if overlap >= max_size {
        return Err(PipelineError::Config(format!(
            "chunk overlap ({overlap}) must be smaller than chunk size ({max_size})"
        )));
    }

    // Byte offset of every character boundary, plus the end of the text, so
    // chunks can be sliced by character position without re-scanning.
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let total_chars = boundaries.len() - 1;

    if total_chars == 0 {
        return Ok(Vec::new());
    }

    let mut chunks = Vec::new();
    let mut start = 0usize;
    loop {
        let end = usize::min(start + max_size, total_chars);
        chunks.push(Chunk {
            index: chunks.len(),
            text: text[boundaries[start]..boundaries[end]].to_string(),
            start,
            end,
        });
        if end == total_chars {
            break;
        }
        start = end - overlap;
    }

    Ok(chunks)
}
