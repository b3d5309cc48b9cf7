//! Multipart form decoding for the analyze endpoint.
//!
//! Drains the multipart stream into a completed field mapping; file content
//! is fully buffered (payloads are single images, bounded by the configured
//! body limit on the router).

use std::collections::HashMap;

use axum::extract::Multipart;
use bytes::Bytes;
use ppeguard_core::AnalyzeError;

/// A file field: filename, declared MIME type, and buffered content.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub filename: Option<String>,
    pub mime_type: String,
    pub bytes: Bytes,
}

/// Completed mapping of one multipart request body.
#[derive(Debug, Default)]
pub struct FormData {
    pub texts: HashMap<String, String>,
    pub files: HashMap<String, FilePart>,
}

impl FormData {
    /// The required `image` file field.
    pub fn image(&self) -> Result<&FilePart, AnalyzeError> {
        let part = self
            .files
            .get("image")
            .ok_or_else(|| AnalyzeError::InvalidRequest("missing 'image' file field".into()))?;
        if !part.mime_type.starts_with("image/") {
            return Err(AnalyzeError::InvalidRequest(format!(
                "field 'image' has non-image content type '{}'",
                part.mime_type
            )));
        }
        Ok(part)
    }
}

/// Decode the whole multipart stream into a [`FormData`] mapping.
///
/// A field is treated as a file when it carries a filename or a content
/// type; everything else is read as text.
pub async fn decode_form(mut multipart: Multipart) -> Result<FormData, AnalyzeError> {
    let mut form = FormData::default();
    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().map(|s| s.to_string());
        let content_type = field.content_type().map(|s| s.to_string());

        if filename.is_some() || content_type.is_some() {
            let bytes = field.bytes().await.map_err(bad_multipart)?;
            form.files.insert(
                name,
                FilePart {
                    filename,
                    mime_type: content_type.unwrap_or_else(|| "application/octet-stream".into()),
                    bytes,
                },
            );
        } else {
            let value = field.text().await.map_err(bad_multipart)?;
            form.texts.insert(name, value);
        }
    }
    Ok(form)
}

fn bad_multipart(err: axum::extract::multipart::MultipartError) -> AnalyzeError {
    AnalyzeError::InvalidRequest(format!("malformed multipart body: {err}"))
}
