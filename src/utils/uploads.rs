use std::path::Path;

use log::warn;
use rocket::fs::TempFile;
use tokio::fs;
use uuid::Uuid;

use crate::models::UploadedFile;

/// The form promises "PDF, JPG or PNG (Max 5MB)"; enforce it before the
/// bytes ever leave the portal.
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

fn extension_from_filename(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

fn extension_from_content_type(content_type: &str) -> Option<String> {
    match content_type {
        "image/jpeg" | "image/jpg" => Some("jpg".to_string()),
        "image/png" => Some("png".to_string()),
        "image/webp" => Some("webp".to_string()),
        "application/pdf" => Some("pdf".to_string()),
        _ => None,
    }
}

pub fn is_valid_image_extension(ext: &str) -> bool {
    matches!(ext, "jpg" | "jpeg" | "png" | "webp")
}

pub fn is_valid_document_extension(ext: &str) -> bool {
    matches!(ext, "pdf" | "jpg" | "jpeg" | "png")
}

pub fn is_attached(file: &Option<TempFile<'_>>) -> bool {
    file.as_ref().map(|f| f.len() > 0).unwrap_or(false)
}

/// Extension of the uploaded file, from its content type first (browsers
/// reliably send one), falling back to the raw filename.
pub fn extension_of(file: &TempFile<'_>) -> Option<String> {
    if let Some(ct) = file.content_type() {
        if let Some(ext) = extension_from_content_type(&ct.to_string()) {
            return Some(ext);
        }
        if let Some(ext) = ct.extension() {
            return Some(ext.as_str().to_lowercase());
        }
    }
    file.raw_name()
        .and_then(|n| extension_from_filename(n.dangerous_unsafe_unsanitized_raw().as_str()))
}

/// Reads an uploaded file into memory for the onward multipart request to
/// the backend. The temp file is persisted to a spool path first because a
/// small upload may only exist in Rocket's in-memory buffer.
pub async fn spool(file: &mut TempFile<'_>, default_stem: &str) -> std::io::Result<UploadedFile> {
    let extension = extension_of(file).unwrap_or_else(|| "bin".to_string());
    let content_type = file
        .content_type()
        .map(|ct| ct.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());
    let file_name = format!("{}.{}", default_stem, extension);

    let spool_path = std::env::temp_dir().join(format!("gs_upload_{}", Uuid::new_v4()));
    file.persist_to(&spool_path).await?;
    let bytes = fs::read(&spool_path).await?;
    if let Err(e) = fs::remove_file(&spool_path).await {
        warn!("failed to remove spool file {:?}: {}", spool_path, e);
    }

    Ok(UploadedFile { file_name, content_type, bytes })
}
