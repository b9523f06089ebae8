use crate::extraction::ExtractionError;

/// Extracts the text of every page, in order.
///
/// A document that parses but yields only whitespace is an error: there is nothing to score.
pub fn extract_pdf_text(data: &[u8]) -> Result<String, ExtractionError> {
    if data.is_empty() {
        return Err(ExtractionError::EmptyDocument);
    }

    // pdf-extract panics on some malformed documents instead of returning an error
    let text = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(data))
        .map_err(|_| ExtractionError::Pdf("parser panicked on malformed document".to_string()))?
        .map_err(|e| ExtractionError::Pdf(e.to_string()))?;

    if text.trim().is_empty() {
        return Err(ExtractionError::EmptyDocument);
    }
    Ok(text)
}

/// Cheap check on the `%PDF-` magic header before handing bytes to the parser.
pub fn looks_like_pdf(data: &[u8]) -> bool {
    data.starts_with(b"%PDF-")
}
