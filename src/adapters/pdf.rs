use crate::utils::error::{DirectoryError, Result};
use lopdf::Document;

/// Open the (usually encrypted) directory PDF and return its text, pages
/// joined by newlines. Unencrypted documents are read as they are.
pub fn decrypt_text(bytes: &[u8], password: &str) -> Result<String> {
    let mut doc = Document::load_mem(bytes)
        .map_err(|e| DirectoryError::decrypt(format!("cannot load PDF: {}", e)))?;

    if doc.is_encrypted() {
        doc.decrypt(password)
            .map_err(|e| DirectoryError::decrypt(e.to_string()))?;
        tracing::debug!("PDF decrypted");
    } else {
        tracing::debug!("PDF is not encrypted");
    }

    let pages: Vec<u32> = doc.get_pages().keys().copied().collect();
    let mut text = Vec::with_capacity(pages.len());
    for page in &pages {
        text.push(doc.extract_text(&[*page])?);
    }

    tracing::debug!("Extracted text from {} pages", pages.len());
    Ok(text.join("\n"))
}
