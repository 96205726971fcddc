//! PDF text extraction for uploaded resumes.

use pdf_extract::OutputError;

/// Extracts the text of every page and cleans up its whitespace.
pub fn extract_text_from_pdf(data: &[u8]) -> Result<String, OutputError> {
    let raw = pdf_extract::extract_text_from_mem(data)?;
    Ok(clean_whitespace(&raw))
}

/// Treats `\r` as a line break, trims every line and drops empty ones.
pub fn clean_whitespace(text: &str) -> String {
    text.replace('\r', "\n")
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
