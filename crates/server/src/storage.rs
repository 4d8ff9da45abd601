//! # Attachment Storage
//!
//! Filesystem storage for report attachments. Uploaded files are validated
//! against an extension allow-list and a size cap, renamed to a random
//! filename under a per-report directory, and hashed with SHA-256. The
//! database row is the source of truth; on a failed insert the written
//! file is removed again.

use std::path::{Path, PathBuf};

use entity::report_attachments::AttachmentType;
use error::AppError;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::ServerResult;

/// Maximum accepted attachment size in bytes (10 MiB).
pub const MAX_ATTACHMENT_BYTES: usize = 10 * 1024 * 1024;

/// Extensions accepted for upload.
pub const ALLOWED_EXTENSIONS: [&str; 10] = [
    "pdf", "docx", "xlsx", "pptx", "jpg", "jpeg", "png", "gif", "txt", "zip",
];

/// Validated upload metadata, ready for the database row.
#[derive(Debug, Clone)]
pub struct PreparedUpload {
    /// Lowercased file extension
    pub extension:       String,
    /// Randomized on-disk filename
    pub stored_filename: String,
    /// Classification derived from the extension
    pub attachment_type: AttachmentType,
    /// MIME type derived from the extension
    pub mime_type:       String,
    /// SHA-256 hex digest of the content
    pub file_hash:       String,
    /// Content length in bytes
    pub file_size:       i64,
}

/// Extracts the lowercased extension from an uploaded filename.
fn extension_of(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
}

/// Validates an uploaded filename against the allow-list.
///
/// # Errors
///
/// Returns a validation error when the extension is missing or not allowed.
pub fn validate_extension(filename: &str) -> ServerResult<String> {
    let ext = extension_of(filename)
        .ok_or_else(|| AppError::validation(format!("File '{filename}' has no extension")))?;

    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(AppError::validation(format!("File type '{ext}' is not allowed")));
    }

    Ok(ext)
}

/// Classifies an extension into a coarse attachment type.
#[must_use]
pub fn classify_extension(ext: &str) -> AttachmentType {
    match ext {
        "jpg" | "jpeg" | "png" | "gif" => AttachmentType::Image,
        "pdf" | "docx" | "txt" => AttachmentType::Document,
        "xlsx" => AttachmentType::Spreadsheet,
        "pptx" => AttachmentType::Presentation,
        "zip" => AttachmentType::Archive,
        _ => AttachmentType::Other,
    }
}

/// MIME type for an allowed extension.
#[must_use]
pub fn mime_for_extension(ext: &str) -> &'static str {
    match ext {
        "pdf" => "application/pdf",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "txt" => "text/plain",
        "zip" => "application/zip",
        _ => "application/octet-stream",
    }
}

/// SHA-256 hex digest of a byte slice.
#[must_use]
pub fn hash_bytes(data: &[u8]) -> String {
    let digest = Sha256::digest(data);
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    out
}

/// Validates an upload and derives its storage metadata.
///
/// # Errors
///
/// Returns a validation error when the extension is not allowed, the
/// content is empty, or the content exceeds [`MAX_ATTACHMENT_BYTES`].
pub fn prepare_upload(original_filename: &str, data: &[u8]) -> ServerResult<PreparedUpload> {
    let extension = validate_extension(original_filename)?;

    if data.is_empty() {
        return Err(AppError::validation("Uploaded file is empty"));
    }
    if data.len() > MAX_ATTACHMENT_BYTES {
        return Err(AppError::validation(format!(
            "File exceeds the maximum size of {} bytes",
            MAX_ATTACHMENT_BYTES
        )));
    }

    let stored_filename = format!("{}.{extension}", Uuid::new_v4());
    let attachment_type = classify_extension(&extension);
    let mime_type = mime_for_extension(&extension).to_string();
    let file_hash = hash_bytes(data);
    let file_size = data.len() as i64;

    Ok(PreparedUpload {
        extension,
        stored_filename,
        attachment_type,
        mime_type,
        file_hash,
        file_size,
    })
}

/// Filesystem layout for attachment storage under a root directory.
#[derive(Debug, Clone)]
pub struct AttachmentStorage {
    root: PathBuf,
}

impl AttachmentStorage {
    /// Creates a storage handle rooted at the given directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
        }
    }

    /// Directory holding all attachments of one report.
    #[must_use]
    pub fn report_dir(&self, report_id: Uuid) -> PathBuf { self.root.join(format!("report_{report_id}")) }

    /// Full on-disk path for a stored filename within a report.
    #[must_use]
    pub fn file_path(&self, report_id: Uuid, stored_filename: &str) -> PathBuf {
        self.report_dir(report_id).join(stored_filename)
    }

    /// Writes attachment content to disk, creating the report directory as
    /// needed. Returns the written path.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the directory or file cannot be written.
    pub async fn save(&self, report_id: Uuid, stored_filename: &str, data: &[u8]) -> ServerResult<PathBuf> {
        let dir = self.report_dir(report_id);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| AppError::storage(format!("Creating {}: {e}", dir.display())))?;

        let path = dir.join(stored_filename);
        tokio::fs::write(&path, data)
            .await
            .map_err(|e| AppError::storage(format!("Writing {}: {e}", path.display())))?;

        Ok(path)
    }

    /// Removes a single stored file. Missing files are not an error.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file exists but cannot be removed.
    pub async fn remove_file(&self, report_id: Uuid, stored_filename: &str) -> ServerResult<()> {
        let path = self.file_path(report_id, stored_filename);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::storage(format!("Removing {}: {e}", path.display()))),
        }
    }

    /// Removes a report's whole attachment directory. Missing directories
    /// are not an error.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the directory exists but cannot be removed.
    pub async fn remove_report_dir(&self, report_id: Uuid) -> ServerResult<()> {
        let dir = self.report_dir(report_id);
        match tokio::fs::remove_dir_all(&dir).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::storage(format!("Removing {}: {e}", dir.display()))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_extension_allowed() {
        assert_eq!(validate_extension("trip-report.PDF").unwrap(), "pdf");
        assert_eq!(validate_extension("photo.jpeg").unwrap(), "jpeg");
    }

    #[test]
    fn test_validate_extension_rejected() {
        assert!(validate_extension("malware.exe").is_err());
        assert!(validate_extension("no_extension").is_err());
        assert!(validate_extension("script.sh").is_err());
    }

    #[test]
    fn test_classify_extension() {
        assert_eq!(classify_extension("png"), AttachmentType::Image);
        assert_eq!(classify_extension("pdf"), AttachmentType::Document);
        assert_eq!(classify_extension("xlsx"), AttachmentType::Spreadsheet);
        assert_eq!(classify_extension("pptx"), AttachmentType::Presentation);
        assert_eq!(classify_extension("zip"), AttachmentType::Archive);
    }

    #[test]
    fn test_mime_for_extension() {
        assert_eq!(mime_for_extension("pdf"), "application/pdf");
        assert_eq!(mime_for_extension("jpg"), "image/jpeg");
        assert_eq!(mime_for_extension("jpeg"), "image/jpeg");
        assert_eq!(mime_for_extension("unknown"), "application/octet-stream");
    }

    #[test]
    fn test_hash_bytes_known_digest() {
        // SHA-256 of the empty string
        assert_eq!(
            hash_bytes(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_prepare_upload_rejects_oversize() {
        let data = vec![0u8; MAX_ATTACHMENT_BYTES + 1];
        let result = prepare_upload("big.pdf", &data);
        assert!(result.is_err());
    }

    #[test]
    fn test_prepare_upload_rejects_empty() {
        assert!(prepare_upload("empty.txt", &[]).is_err());
    }

    #[test]
    fn test_prepare_upload_metadata() {
        let upload = prepare_upload("Notes.TXT", b"mission notes").unwrap();
        assert_eq!(upload.extension, "txt");
        assert_eq!(upload.attachment_type, AttachmentType::Document);
        assert_eq!(upload.mime_type, "text/plain");
        assert_eq!(upload.file_size, 13);
        assert!(upload.stored_filename.ends_with(".txt"));
    }

    #[tokio::test]
    async fn test_save_and_remove_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = AttachmentStorage::new(dir.path());
        let report_id = Uuid::new_v4();

        let path = storage.save(report_id, "file.txt", b"contents").await.unwrap();
        assert!(path.exists());

        storage.remove_file(report_id, "file.txt").await.unwrap();
        assert!(!path.exists());

        // Removing again is not an error.
        storage.remove_file(report_id, "file.txt").await.unwrap();
    }

    #[tokio::test]
    async fn test_remove_report_dir() {
        let dir = tempfile::tempdir().unwrap();
        let storage = AttachmentStorage::new(dir.path());
        let report_id = Uuid::new_v4();

        storage.save(report_id, "a.txt", b"a").await.unwrap();
        storage.save(report_id, "b.txt", b"b").await.unwrap();

        storage.remove_report_dir(report_id).await.unwrap();
        assert!(!storage.report_dir(report_id).exists());
    }
}
