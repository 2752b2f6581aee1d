//! Upload validation and storage.
//!
//! Everything between "a browser sent us bytes" and "a path the parser can
//! read": extension allow-listing, filename sanitization, and collision-free
//! placement inside the configured uploads directory.

use std::path::PathBuf;

use presenza_core::error::{PresenzaError, Result};
use tracing::debug;
use uuid::Uuid;

// ── UploadConfig ──────────────────────────────────────────────────────────────

/// Start-up configuration for the upload boundary.
///
/// Built once when the server starts and passed explicitly wherever it is
/// needed; there is no ambient global state.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Directory uploaded chat exports are written into.
    pub upload_dir: PathBuf,
    /// File extensions accepted for upload, compared case-insensitively.
    pub allowed_extensions: Vec<String>,
}

impl UploadConfig {
    /// Config accepting only `.txt` files into `upload_dir`.
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            allowed_extensions: vec!["txt".to_string()],
        }
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

/// Check whether `filename` carries an allowed extension.
///
/// The extension is everything after the last `.`; a name without a dot has
/// no extension and is never allowed.
pub fn allowed_file(filename: &str, config: &UploadConfig) -> bool {
    match filename.rsplit_once('.') {
        Some((_, ext)) => config
            .allowed_extensions
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ext)),
        None => false,
    }
}

/// Reduce an uploaded filename to a safe basename.
///
/// Takes only the final path component (either separator style counts),
/// then maps every character outside `[A-Za-z0-9._-]` to `_`. A name with
/// nothing usable left (only dots, dashes and underscores) is rejected.
pub fn sanitize_filename(filename: &str) -> Result<String> {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let safe: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if safe.chars().all(|c| matches!(c, '.' | '_' | '-')) {
        return Err(PresenzaError::UnsafeFilename(filename.to_string()));
    }
    Ok(safe)
}

// ── Storage ───────────────────────────────────────────────────────────────────

/// Write an uploaded file into the configured uploads directory.
///
/// The stored name is prefixed with a fresh UUID, so concurrent uploads of
/// identically named exports land on distinct paths and no cross-request
/// locking is needed.
pub fn store_upload(config: &UploadConfig, filename: &str, contents: &[u8]) -> Result<PathBuf> {
    let safe = sanitize_filename(filename)?;
    std::fs::create_dir_all(&config.upload_dir)?;

    let stored = config
        .upload_dir
        .join(format!("{}_{}", Uuid::new_v4(), safe));
    std::fs::write(&stored, contents)?;

    debug!("Stored upload {:?} as {}", filename, stored.display());
    Ok(stored)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
