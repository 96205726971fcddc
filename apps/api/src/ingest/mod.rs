//! Document ingestion: turns uploaded resume files into scoring documents.

pub mod pdf;

use bytes::Bytes;

use crate::errors::AppError;
use crate::screening::scoring::Document;

/// PDF readers accept the `%PDF` marker anywhere in this leading window.
const PDF_HEADER_WINDOW: usize = 1024;

/// A file received through the upload endpoint.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl UploadedFile {
    fn looks_like_pdf(&self) -> bool {
        let named_pdf = self.name.to_lowercase().ends_with(".pdf");
        let typed_pdf = self.content_type.as_deref() == Some("application/pdf");
        (named_pdf || typed_pdf) && has_pdf_header(&self.data)
    }
}

fn has_pdf_header(data: &[u8]) -> bool {
    let window = &data[..data.len().min(PDF_HEADER_WINDOW)];
    window.windows(4).any(|w| w == b"%PDF")
}

/// Extracts text from every upload, preserving upload order.
///
/// Extraction runs on the blocking pool: it is CPU-bound and `pdf-extract`
/// can panic on malformed input.
pub async fn extract_documents(uploads: Vec<UploadedFile>) -> Result<Vec<Document>, AppError> {
    let mut documents = Vec::with_capacity(uploads.len());

    for upload in uploads {
        if !upload.looks_like_pdf() {
            return Err(AppError::Validation(format!(
                "'{}' is not a PDF file",
                upload.name
            )));
        }

        let UploadedFile { name, data, .. } = upload;
        let extracted = tokio::task::spawn_blocking(move || pdf::extract_text_from_pdf(&data))
            .await
            .map_err(|e| {
                AppError::UnprocessableEntity(format!("Could not read PDF '{name}': {e}"))
            })?;
        let text = extracted.map_err(|e| {
            AppError::UnprocessableEntity(format!("Could not read PDF '{name}': {e}"))
        })?;

        tracing::debug!(file = %name, chars = text.len(), "extracted resume text");
        documents.push(Document::new(name, text));
    }

    Ok(documents)
}
