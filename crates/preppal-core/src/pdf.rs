use regex::Regex;
use std::error::Error;
use std::sync::LazyLock;
use thiserror::Error;

static NEWLINE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").expect("invalid newline regex"));
static SPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").expect("invalid space regex"));

#[derive(Debug, Error)]
pub enum PdfError {
    #[error(transparent)]
    Extract(#[from] pdf_extract::OutputError),

    #[error("Document contains no extractable text")]
    EmptyDocument,
}

/// Extracts plain text from PDF bytes. Scanned documents without a text
/// layer come back empty and are rejected.
pub fn extract_text(bytes: &[u8]) -> Result<String, PdfError> {
    let text = pdf_extract::extract_text_from_mem(bytes).inspect_err(|error| {
        tracing::error!(error = error as &dyn Error, "pdf text extraction failed");
    })?;

    let normalized = normalize_whitespace(&text);
    if normalized.is_empty() {
        return Err(PdfError::EmptyDocument);
    }
    Ok(normalized)
}

fn normalize_whitespace(text: &str) -> String {
    let collapsed = SPACE_RUNS.replace_all(text, " ");
    NEWLINE_RUNS.replace_all(&collapsed, "\n\n").trim().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_runs() {
        let text = "A  heading\t here\n\n\n\nnext   paragraph\n";
        assert_eq!(normalize_whitespace(text), "A heading here\n\nnext paragraph");
    }

    #[test]
    fn test_whitespace_only_normalizes_to_empty() {
        assert_eq!(normalize_whitespace(" \n\t \n"), "");
    }

    #[test]
    fn test_invalid_bytes_are_an_error() {
        assert!(extract_text(b"not a pdf at all").is_err());
    }

    #[test]
    fn test_extracts_text_from_document() {
        let pdf = preppal_test_helpers::minimal_pdf("Photosynthesis basics.");
        let text = extract_text(&pdf).unwrap();
        assert!(text.contains("Photosynthesis"));
    }
}
