use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::Multipart;
use folio_common::filename::{extension_of, secure_filename};
use folio_common::page::has_allowed_extension;
use serde::Serialize;

use crate::error::AppError;
use crate::guard::OwnerState;

/// Envelope shared by every rendered page.
#[derive(Serialize)]
pub struct PageView<T: Serialize> {
    /// Navigation entry to highlight: `home`, `about` or `blog`.
    pub nav_active: &'static str,
    pub is_owner: bool,
    #[serde(flatten)]
    pub view: T,
}

impl<T: Serialize> PageView<T> {
    pub fn new(nav_active: &'static str, viewer: OwnerState, view: T) -> Self {
        Self {
            nav_active,
            is_owner: viewer.is_owner(),
            view,
        }
    }
}

/// A file part of a multipart form.
#[derive(Debug)]
pub struct UploadedFile {
    /// Client-declared filename, unsanitized.
    pub file_name: String,
    pub data: Bytes,
}

impl UploadedFile {
    /// Browsers send an empty part with no filename when nothing was chosen.
    pub fn is_selected(&self) -> bool {
        !self.file_name.trim().is_empty()
    }

    /// Sanitized filename, or `None` when nothing usable remains.
    pub fn secure_name(&self) -> Option<String> {
        let name = secure_filename(&self.file_name);
        (!name.is_empty()).then_some(name)
    }

    /// Lowercase extension of the sanitized filename when it is in `allowed`
    /// and the body is non-empty.
    pub fn accepted_extension(&self, allowed: &[&str]) -> Option<String> {
        if self.data.is_empty() {
            return None;
        }
        let name = self.secure_name()?;
        if !has_allowed_extension(&name, allowed) {
            return None;
        }
        extension_of(&name)
    }
}

/// Text and file parts of a multipart form, keyed by field name.
#[derive(Debug, Default)]
pub struct MultipartForm {
    texts: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl MultipartForm {
    pub async fn collect(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = MultipartForm::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let data = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::Validation(format!("Upload read error: {e}")))?;
                    form.files.insert(name, UploadedFile { file_name, data });
                }
                None => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::Validation(format!("Failed to read field: {e}")))?;
                    form.texts.insert(name, text);
                }
            }
        }

        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.texts.get(name).map(String::as_str)
    }

    /// Owned text of a field, empty when absent.
    pub fn text_or_empty(&self, name: &str) -> String {
        self.text(name).unwrap_or_default().to_string()
    }

    /// Remove and return a selected file part.
    pub fn take_file(&mut self, name: &str) -> Option<UploadedFile> {
        self.files.remove(name).filter(UploadedFile::is_selected)
    }
}
