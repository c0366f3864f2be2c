//! Extract Document Use Case
//!
//! Turns an uploaded `.docx` into plain text for pre-filling the essay input.

use crate::domain::repository::DocumentTextExtractor;
use crate::error::{AnalyzerError, AnalyzerResult};

pub struct ExtractDocumentUseCase<E>
where
    E: DocumentTextExtractor,
{
    extractor: E,
}

impl<E> ExtractDocumentUseCase<E>
where
    E: DocumentTextExtractor,
{
    pub fn new(extractor: E) -> Self {
        Self { extractor }
    }

    pub fn execute(&self, file_name: &str, bytes: &[u8]) -> AnalyzerResult<String> {
        if !has_docx_extension(file_name) {
            return Err(AnalyzerError::UnsupportedFile);
        }

        let text = self.extractor.extract(bytes)?;
        tracing::debug!(file_name = %file_name, chars = text.chars().count(), "Document text extracted");
        Ok(text)
    }
}

fn has_docx_extension(file_name: &str) -> bool {
    file_name.to_ascii_lowercase().ends_with(".docx")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_check_is_case_insensitive() {
        assert!(has_docx_extension("essay.docx"));
        assert!(has_docx_extension("ESSAY.DOCX"));
        assert!(!has_docx_extension("essay.doc"));
        assert!(!has_docx_extension("essay.docx.pdf"));
        assert!(!has_docx_extension(""));
    }
}
