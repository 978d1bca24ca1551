//! Linktrend Processing Library
//!
//! Media inspection (ffprobe duration extraction) and upload validation.

pub mod probe;
pub mod validator;

pub use probe::{format_duration, VideoProbe, FALLBACK_DURATION};
pub use validator::{validate_upload, UploadLimits, ValidationError};
