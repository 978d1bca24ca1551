//! Video duration extraction via ffprobe.
//!
//! The uploaded bytes are written to a temporary file and probed with the
//! external `ffprobe` binary. Probe failures of any kind degrade to the
//! `00:00` fallback; an upload never fails because the probe did.

use anyhow::{anyhow, Context, Result};
use std::path::Path;
use tokio::process::Command;

/// Duration reported when the probe fails or yields nothing usable.
pub const FALLBACK_DURATION: &str = "00:00";

/// Render whole seconds as `MM:SS`.
pub fn format_duration(total_seconds: u64) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}", minutes, seconds)
}

pub struct VideoProbe {
    ffprobe_path: String,
}

impl VideoProbe {
    pub fn new(ffprobe_path: String) -> Result<Self> {
        if ffprobe_path.is_empty()
            || !ffprobe_path.chars().all(|c| {
                c.is_alphanumeric() || c == '/' || c == '-' || c == '_' || c == '.' || c == '\\'
            })
        {
            return Err(anyhow!("Invalid ffprobe path: contains unsafe characters"));
        }

        Ok(Self { ffprobe_path })
    }

    /// Probe uploaded bytes and return the playback duration as `MM:SS`,
    /// falling back to [`FALLBACK_DURATION`] on any failure.
    pub async fn duration_or_fallback(&self, data: &[u8]) -> String {
        match self.extract_duration(data).await {
            Ok(duration) => duration,
            Err(e) => {
                tracing::warn!(error = %e, "ffprobe failed, falling back to zero duration");
                FALLBACK_DURATION.to_string()
            }
        }
    }

    async fn extract_duration(&self, data: &[u8]) -> Result<String> {
        let temp_file = tempfile::NamedTempFile::new().context("Failed to create temp file")?;
        tokio::fs::write(temp_file.path(), data)
            .await
            .context("Failed to write temp file")?;

        self.extract_duration_from_path(temp_file.path()).await
    }

    async fn extract_duration_from_path(&self, video_path: &Path) -> Result<String> {
        let output = Command::new(&self.ffprobe_path)
            .args([
                "-v",
                "error",
                "-show_entries",
                "format=duration",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
            ])
            .arg(video_path)
            .output()
            .await
            .context("Failed to run ffprobe")?;

        if !output.status.success() {
            return Err(anyhow!(
                "ffprobe exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let seconds: f64 = stdout
            .trim()
            .parse()
            .context("ffprobe produced a non-numeric duration")?;
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(anyhow!("ffprobe produced an unusable duration: {}", seconds));
        }

        Ok(format_duration(seconds.floor() as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "00:00");
        assert_eq!(format_duration(5), "00:05");
        assert_eq!(format_duration(65), "01:05");
        assert_eq!(format_duration(600), "10:00");
        assert_eq!(format_duration(3725), "62:05");
    }

    #[test]
    fn test_rejects_unsafe_ffprobe_path() {
        assert!(VideoProbe::new("ffprobe; rm -rf /".to_string()).is_err());
        assert!(VideoProbe::new("".to_string()).is_err());
        assert!(VideoProbe::new("/usr/bin/ffprobe".to_string()).is_ok());
    }

    #[tokio::test]
    async fn test_probe_failure_falls_back() {
        // A path that passes the character check but names no real binary.
        let probe = VideoProbe::new("/nonexistent/ffprobe".to_string()).unwrap();
        let duration = probe.duration_or_fallback(b"not a video").await;
        assert_eq!(duration, FALLBACK_DURATION);
    }
}
