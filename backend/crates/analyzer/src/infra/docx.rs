//! `.docx` Text Extraction
//!
//! Reads `word/document.xml` from the OOXML zip container and flattens its
//! paragraphs into plain text.

use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::application::config::AnalyzerConfig;
use crate::domain::repository::DocumentTextExtractor;
use crate::error::{AnalyzerError, AnalyzerResult};

const MAIN_DOCUMENT_PART: &str = "word/document.xml";
const PARAGRAPH_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone, Copy)]
pub struct DocxExtractor {
    /// Cap on the uncompressed size of `word/document.xml`
    max_document_bytes: u64,
}

impl DocxExtractor {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self::with_limit(config.max_document_bytes)
    }

    pub fn with_limit(max_document_bytes: u64) -> Self {
        Self { max_document_bytes }
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new(&AnalyzerConfig::default())
    }
}

impl DocumentTextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> AnalyzerResult<String> {
        let xml = read_main_part(bytes, self.max_document_bytes)?;
        let paragraphs = collect_paragraphs(&xml)?;
        Ok(paragraphs.join(PARAGRAPH_SEPARATOR).trim().to_string())
    }
}

/// Inflates the main part, never buffering more than `max_bytes + 1` bytes.
/// The declared size comes from the archive and is not trusted alone.
fn read_main_part(bytes: &[u8], max_bytes: u64) -> AnalyzerResult<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| AnalyzerError::MalformedDocument(format!("Not a zip archive: {e}")))?;

    let part = archive
        .by_name(MAIN_DOCUMENT_PART)
        .map_err(|e| AnalyzerError::MalformedDocument(format!("{MAIN_DOCUMENT_PART}: {e}")))?;

    if part.size() > max_bytes {
        tracing::warn!(declared = part.size(), max_bytes, "Document part exceeds size cap");
        return Err(AnalyzerError::UploadTooLarge);
    }

    let mut buffer = Vec::new();
    part.take(max_bytes.saturating_add(1))
        .read_to_end(&mut buffer)
        .map_err(|e| AnalyzerError::MalformedDocument(format!("{MAIN_DOCUMENT_PART}: {e}")))?;

    if buffer.len() as u64 > max_bytes {
        tracing::warn!(max_bytes, "Document part inflated past size cap");
        return Err(AnalyzerError::UploadTooLarge);
    }

    String::from_utf8(buffer)
        .map_err(|e| AnalyzerError::MalformedDocument(format!("{MAIN_DOCUMENT_PART}: {e}")))
}

/// Text of every `w:p` in document order
fn collect_paragraphs(xml: &str) -> AnalyzerResult<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    // w:p can nest (text boxes); the outermost one owns the text
    let mut paragraph_depth = 0usize;
    let mut in_text = false;

    loop {
        let event = reader.read_event().map_err(|e| {
            AnalyzerError::MalformedDocument(format!(
                "XML error at position {}: {e}",
                reader.error_position()
            ))
        })?;

        match event {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => paragraph_depth += 1,
                b"w:t" => in_text = paragraph_depth > 0,
                b"w:tab" if paragraph_depth > 0 => current.push('\t'),
                b"w:br" | b"w:cr" if paragraph_depth > 0 => current.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:p" if paragraph_depth == 0 => paragraphs.push(String::new()),
                b"w:tab" if paragraph_depth > 0 => current.push('\t'),
                b"w:br" | b"w:cr" if paragraph_depth > 0 => current.push('\n'),
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" if paragraph_depth > 0 => {
                    paragraph_depth -= 1;
                    if paragraph_depth == 0 {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                }
                _ => {}
            },
            Event::Text(t) if in_text => {
                let text = t
                    .unescape()
                    .map_err(|e| AnalyzerError::MalformedDocument(e.to_string()))?;
                current.push_str(&text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}
