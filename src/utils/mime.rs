//! MIME Type Detection Utilities
//!
//! Content-type guessing for multipart parts: magic numbers via `infer`,
//! file extensions via `mime_guess`.

use crate::defaults::content::OCTET_STREAM;

/// Guess MIME by inspecting bytes (magic numbers)
pub fn guess_mime_from_bytes(bytes: &[u8]) -> Option<String> {
    infer::get(bytes).map(|k| k.mime_type().to_string())
}

/// Guess MIME from a file name or path (extension-based)
pub fn guess_mime_from_filename(filename: &str) -> Option<String> {
    mime_guess::from_path(filename)
        .first()
        .map(|m| m.essence_str().to_string())
}

/// Combined guess: prefer bytes, fall back to file name, otherwise octet-stream
pub fn guess_mime(bytes: Option<&[u8]>, filename: Option<&str>) -> String {
    if let Some(b) = bytes
        && let Some(m) = guess_mime_from_bytes(b)
    {
        return m;
    }
    if let Some(f) = filename
        && let Some(m) = guess_mime_from_filename(f)
    {
        return m;
    }
    OCTET_STREAM.to_string()
}
