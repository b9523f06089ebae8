use axum::extract::Multipart;
use bytes::Bytes;
use tracing::warn;

use crate::errors::AppError;
use crate::extraction::pdf::looks_like_pdf;
use crate::extraction::{extract_resume, ExtractedResume};
use crate::storage::ObjectStore;

const FILE_FIELD: &str = "file";
const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Reads the `file` part of a multipart body. Other parts are skipped.
pub async fn read_file_field(multipart: &mut Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(String::from);
        let data = field.bytes().await?;
        return Ok(UploadedFile {
            filename,
            content_type,
            data,
        });
    }
    Err(AppError::Validation(format!(
        "Missing multipart field '{FILE_FIELD}'"
    )))
}

/// Only non-empty PDFs are accepted: `.pdf` name or `application/pdf` type, and the magic header.
pub fn validate_pdf(file: &UploadedFile) -> Result<(), AppError> {
    if file.data.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    let declared_pdf = file.filename.to_lowercase().ends_with(".pdf")
        || file.content_type.as_deref() == Some(PDF_CONTENT_TYPE);
    if !declared_pdf || !looks_like_pdf(&file.data) {
        return Err(AppError::Validation(
            "Only PDF files are supported".to_string(),
        ));
    }
    Ok(())
}

/// Stores the file under `key`, then extracts it.
///
/// If extraction fails the stored file is removed again and nothing is left behind.
pub async fn store_and_extract(
    storage: &dyn ObjectStore,
    key: &str,
    data: Bytes,
) -> Result<ExtractedResume, AppError> {
    storage.put(key, data.clone(), PDF_CONTENT_TYPE).await?;

    // PDF parsing is CPU-bound
    let extracted = tokio::task::spawn_blocking(move || extract_resume(&data))
        .await
        .map_err(|e| AppError::Internal(e.into()));

    match extracted {
        Ok(Ok(resume)) => Ok(resume),
        Ok(Err(e)) => {
            discard(storage, key).await;
            Err(e.into())
        }
        Err(e) => {
            discard(storage, key).await;
            Err(e)
        }
    }
}

/// Best-effort removal of a stored file whose upload did not complete.
pub async fn discard(storage: &dyn ObjectStore, key: &str) {
    if let Err(e) = storage.delete(key).await {
        warn!("Failed to remove {key} from {} storage: {e}", storage.backend());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::ExtractionError;
    use crate::storage::LocalStore;

    fn upload(filename: &str, content_type: Option<&str>, data: &'static [u8]) -> UploadedFile {
        UploadedFile {
            filename: filename.to_string(),
            content_type: content_type.map(String::from),
            data: Bytes::from_static(data),
        }
    }

    #[test]
    fn test_accepts_pdf_by_name_or_content_type() {
        assert!(validate_pdf(&upload("cv.PDF", None, b"%PDF-1.4 ...")).is_ok());
        assert!(validate_pdf(&upload("cv", Some("application/pdf"), b"%PDF-1.7")).is_ok());
    }

    #[test]
    fn test_rejects_other_documents() {
        let cases = [
            upload("cv.docx", Some("application/msword"), b"PK\x03\x04"),
            upload("cv.txt", Some("text/plain"), b"%PDF-1.4"),
            // Right name, wrong bytes
            upload("cv.pdf", Some("application/pdf"), b"hello"),
            upload("cv.pdf", Some("application/pdf"), b""),
        ];
        for file in cases {
            assert!(
                matches!(validate_pdf(&file), Err(AppError::Validation(_))),
                "{file:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_failed_extraction_removes_stored_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());

        let err = store_and_extract(
            &store,
            "resumes/broken.pdf",
            Bytes::from_static(b"%PDF-1.4\nthis is not a real document"),
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            AppError::ExtractionFailed(ExtractionError::Pdf(_) | ExtractionError::EmptyDocument)
        ));
        assert!(!dir.path().join("resumes/broken.pdf").exists());
    }

    #[tokio::test]
    async fn test_discard_tolerates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());
        discard(&store, "resumes/never-written.pdf").await;
    }
}
