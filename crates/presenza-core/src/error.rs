use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by presenza.
#[derive(Error, Debug)]
pub enum PresenzaError {
    /// A chat export could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The upload request carried no file part.
    #[error("No file part in the request")]
    MissingFilePart,

    /// The upload carried a file part with an empty filename.
    #[error("No file selected for uploading")]
    EmptyFilename,

    /// The uploaded file's extension is not on the allow-list.
    #[error("File type not allowed: {0}")]
    DisallowedExtension(String),

    /// Nothing usable was left of the uploaded filename after sanitization.
    #[error("Unusable filename: {0}")]
    UnsafeFilename(String),

    /// The multipart request body could not be decoded.
    #[error("Malformed upload: {0}")]
    Multipart(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the presenza crates.
pub type Result<T> = std::result::Result<T, PresenzaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = PresenzaError::FileRead {
            path: PathBuf::from("/some/chat.txt"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/some/chat.txt"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_missing_file_part() {
        let err = PresenzaError::MissingFilePart;
        assert_eq!(err.to_string(), "No file part in the request");
    }

    #[test]
    fn test_error_display_empty_filename() {
        let err = PresenzaError::EmptyFilename;
        assert_eq!(err.to_string(), "No file selected for uploading");
    }

    #[test]
    fn test_error_display_disallowed_extension() {
        let err = PresenzaError::DisallowedExtension("chat.pdf".to_string());
        assert_eq!(err.to_string(), "File type not allowed: chat.pdf");
    }

    #[test]
    fn test_error_display_unsafe_filename() {
        let err = PresenzaError::UnsafeFilename("../..".to_string());
        assert_eq!(err.to_string(), "Unusable filename: ../..");
    }

    #[test]
    fn test_error_display_multipart() {
        let err = PresenzaError::Multipart("truncated body".to_string());
        assert_eq!(err.to_string(), "Malformed upload: truncated body");
    }

    #[test]
    fn test_error_display_config() {
        let err = PresenzaError::Config("missing uploads dir".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing uploads dir");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: PresenzaError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }
}
