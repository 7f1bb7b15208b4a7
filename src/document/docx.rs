//! DOCX text extraction.
//!
//! A .docx file is a zip archive; the body text lives in
//! `word/document.xml` as `<w:t>` runs grouped into `<w:p>` paragraphs.
//! We pull the run text out with a streaming XML reader, emitting one line
//! per paragraph, honoring explicit tabs and line breaks.

use std::io::Read;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::PipelineError;

/// Extract plain text from an in-memory DOCX. CPU-bound; callers run this
/// under `spawn_blocking`.
pub fn extract(bytes: &[u8]) -> Result<String, PipelineError> {
    let cursor = std::io::Cursor::new(bytes);
    let mut archive = zip::ZipArchive::new(cursor)
        .map_err(|e| PipelineError::Parse(format!("DOCX is not a valid zip archive: {e}")))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| PipelineError::Parse(format!("DOCX has no word/document.xml: {e}")))?
        .read_to_string(&mut xml)
        .map_err(|e| PipelineError::Parse(format!("failed to read DOCX document body: {e}")))?;

    extract_from_document_xml(&xml)
}

fn extract_from_document_xml(xml: &str) -> Result<String, PipelineError> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    // Text events outside <w:t> are insignificant whitespace between tags
    let mut in_run_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if e.local_name().as_ref() == b"t" {
                    in_run_text = true;
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_run_text = false,
                b"p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"tab" => out.push('\t'),
                b"br" | b"cr" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Text(t)) => {
                if in_run_text {
                    let text = t
                        .unescape()
                        .map_err(|e| PipelineError::Parse(format!("bad DOCX text run: {e}")))?;
                    out.push_str(&text);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(PipelineError::Parse(format!(
                    "malformed DOCX document XML: {e}"
                )))
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn docx_with_body(body_xml: &str) -> Vec<u8> {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
<w:body>{body_xml}</w:body>
</w:document>"#
        );
        let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default();
        writer.start_file("word/document.xml", options).unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_one_line_per_paragraph() {
        let bytes = docx_with_body(
            "<w:p><w:r><w:t>Hello</w:t></w:r></w:p>\
             <w:p><w:r><w:t>World</w:t></w:r></w:p>",
        );
        assert_eq!(extract(&bytes).unwrap(), "Hello\nWorld\n");
    }

    #[test]
    fn test_runs_within_paragraph_concatenate() {
        let bytes = docx_with_body(
            "<w:p><w:r><w:t>The waiting period is </w:t></w:r>\
             <w:r><w:t>30 days.</w:t></w:r></w:p>",
        );
        assert_eq!(extract(&bytes).unwrap(), "The waiting period is 30 days.\n");
    }

    #[test]
    fn test_tabs_and_breaks_preserved() {
        let bytes = docx_with_body(
            "<w:p><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t></w:r></w:p>",
        );
        assert_eq!(extract(&bytes).unwrap(), "a\tb\nc\n");
    }

    #[test]
    fn test_entities_unescaped() {
        let bytes = docx_with_body("<w:p><w:r><w:t>A &amp; B &lt; C</w:t></w:r></w:p>");
        assert_eq!(extract(&bytes).unwrap(), "A & B < C\n");
    }

    #[test]
    fn test_text_between_tags_is_ignored() {
        // Whitespace and text outside <w:t> must not leak into the output
        let bytes = docx_with_body("<w:p>\n  <w:r>\n    <w:t>only this</w:t>\n  </w:r>\n</w:p>");
        assert_eq!(extract(&bytes).unwrap(), "only this\n");
    }

    #[test]
    fn test_not_a_zip_is_a_parse_error() {
        let err = extract(b"plain text, not a zip").unwrap_err();
        assert!(matches!(err, PipelineError::Parse(_)));
    }

    #[test]
    fn test_zip_without_document_xml_is_a_parse_error() {
        let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default();
        writer.start_file("something_else.txt", options).unwrap();
        writer.write_all(b"hi").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let err = extract(&bytes).unwrap_err();
        assert!(matches!(err, PipelineError::Parse(_)));
    }
}
