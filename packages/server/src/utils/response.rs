use axum::body::Body;
use axum::http::{StatusCode, header};
use axum::response::Response;
use folio_common::AssetRef;
use folio_common::storage::AssetStore;
use tokio_util::io::ReaderStream;

use crate::error::AppError;

/// How the client should treat a served file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Disposition {
    Inline,
    Attachment,
}

/// Stream a stored asset back to the client.
pub async fn asset_response(
    store: &dyn AssetStore,
    asset: &AssetRef,
    disposition: Disposition,
) -> Result<Response, AppError> {
    let path = asset.storage_path();
    let size = store.size(&path).await?;
    let reader = store.get_stream(&path).await?;
    let body = Body::from_stream(ReaderStream::new(reader));

    let mime = mime_guess::from_path(&asset.path).first_or_octet_stream();

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, mime.as_ref())
        .header(header::CONTENT_LENGTH, size.to_string())
        .header(header::CACHE_CONTROL, "public, max-age=3600");

    if disposition == Disposition::Attachment {
        builder = builder.header(
            header::CONTENT_DISPOSITION,
            content_disposition_value("attachment", asset.file_name()),
        );
    }

    builder
        .body(body)
        .map_err(|e| AppError::Internal(format!("Failed to build response: {e}")))
}

/// Build a safe `Content-Disposition` header value.
fn content_disposition_value(kind: &str, filename: &str) -> String {
    let ascii_safe: String = filename
        .chars()
        .filter(|c| c.is_ascii_graphic() && !matches!(c, '"' | ';' | '\\'))
        .collect();
    let ascii_name = if ascii_safe.is_empty() {
        "download".to_string()
    } else {
        ascii_safe
    };

    // RFC 5987 percent-encoding for filename*.
    let encoded: String = filename
        .bytes()
        .map(|b| match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                String::from(b as char)
            }
            _ => format!("%{b:02X}"),
        })
        .collect();

    format!("{kind}; filename=\"{ascii_name}\"; filename*=UTF-8''{encoded}")
}
