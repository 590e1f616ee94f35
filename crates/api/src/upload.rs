use std::collections::HashMap;
use std::path::Path;

use axum::extract::Multipart;
use chrono::Utc;
use rand::Rng;

use crate::error::{AppError, FieldError};

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
const ALLOWED_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif"];

/// A multipart submission split into its text fields and the URL of the
/// stored file, when one was attached.
pub struct SubmittedForm {
    pub fields: HashMap<String, String>,
    pub file_url: Option<String>,
}

/// Drains a multipart body. The part named `file_field` is persisted under
/// `upload_dir` with a unique server-assigned name; every other part is
/// collected as a text field.
pub async fn collect(
    mut multipart: Multipart,
    file_field: &str,
    upload_dir: &Path,
) -> Result<SubmittedForm, AppError> {
    let mut fields = HashMap::new();
    let mut file_url = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("malformed multipart body: {e}")))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        let is_file = name == file_field && field.file_name().is_some_and(|f| !f.is_empty());
        if is_file {
            let original = field.file_name().unwrap_or_default().to_owned();
            let content_type = field.content_type().unwrap_or_default().to_owned();
            if !ALLOWED_TYPES.contains(&content_type.as_str()) {
                return Err(AppError::Validation(vec![FieldError::new(
                    name,
                    "only JPEG, PNG and GIF images are allowed",
                )]));
            }
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("failed to read upload: {e}")))?;
            if data.len() > MAX_IMAGE_BYTES {
                return Err(AppError::Validation(vec![FieldError::new(
                    name,
                    "file exceeds the 5 MB limit",
                )]));
            }
            file_url = Some(store(upload_dir, &name, &original, &data).await?);
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("malformed multipart body: {e}")))?;
            fields.insert(name, value);
        }
    }

    Ok(SubmittedForm { fields, file_url })
}

async fn store(
    upload_dir: &Path,
    field_name: &str,
    original_name: &str,
    data: &[u8],
) -> Result<String, AppError> {
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{e}"))
        .unwrap_or_default();
    let filename = format!(
        "{field_name}-{}-{}{ext}",
        Utc::now().timestamp_millis(),
        rand::rng().random_range(0..1_000_000_000u32),
    );

    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| AppError::Internal(format!("failed to create upload directory: {e}")))?;
    tokio::fs::write(upload_dir.join(&filename), data)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store upload: {e}")))?;

    Ok(format!("/uploads/{filename}"))
}
