//! Upload validation: size, content type, and empty-file checks.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("File too large: {size} bytes exceeds max {max} bytes")]
    FileTooLarge { size: usize, max: usize },

    #[error("Invalid content type '{content_type}', expected {expected}")]
    InvalidContentType {
        content_type: String,
        expected: &'static str,
    },

    #[error("File is empty")]
    EmptyFile,
}

/// Limits for one upload kind.
#[derive(Debug, Clone, Copy)]
pub struct UploadLimits {
    pub max_size_bytes: usize,
    /// Required content-type prefix, e.g. "video/" or "image/".
    pub content_type_prefix: &'static str,
}

/// Validate an uploaded file against the limits for its kind.
pub fn validate_upload(
    data: &[u8],
    content_type: &str,
    limits: &UploadLimits,
) -> Result<(), ValidationError> {
    if data.is_empty() {
        return Err(ValidationError::EmptyFile);
    }
    if data.len() > limits.max_size_bytes {
        return Err(ValidationError::FileTooLarge {
            size: data.len(),
            max: limits.max_size_bytes,
        });
    }
    if !content_type.starts_with(limits.content_type_prefix) {
        return Err(ValidationError::InvalidContentType {
            content_type: content_type.to_string(),
            expected: limits.content_type_prefix,
        });
    }
    Ok(())
}
