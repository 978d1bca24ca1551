//! Shared key generation for storage backends.
//!
//! Key format: `videos/{timestamp}_{filename}` and
//! `thumbnails/{timestamp}_{filename}`. The timestamp keeps keys unique
//! across re-uploads of the same filename; sanitization keeps keys safe for
//! URL paths and local filesystems.

/// Make an uploaded filename safe for use inside a storage key.
///
/// Whitespace becomes `_`; path separators and any character outside
/// `[A-Za-z0-9._-]` are dropped; `..` runs collapse so the result always
/// passes the backends' traversal checks. An empty result falls back to
/// `"file"`.
pub fn sanitize_filename(filename: &str) -> String {
    let mut sanitized: String = filename
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    while sanitized.contains("..") {
        sanitized = sanitized.replace("..", ".");
    }

    if sanitized.trim_matches('.').is_empty() {
        "file".to_string()
    } else {
        sanitized
    }
}

/// Storage key for an uploaded video file.
pub fn video_key(timestamp_millis: i64, filename: &str) -> String {
    format!("videos/{}_{}", timestamp_millis, sanitize_filename(filename))
}

/// Storage key for an uploaded thumbnail file.
pub fn thumbnail_key(timestamp_millis: i64, filename: &str) -> String {
    format!(
        "thumbnails/{}_{}",
        timestamp_millis,
        sanitize_filename(filename)
    )
}

/// Extract the object key from a public URL produced by a backend, if the URL
/// points at one of the known key prefixes. Used for best-effort deletion of
/// backing media when a catalog entry is removed.
pub fn key_from_url(url: &str) -> Option<String> {
    for prefix in ["videos/", "thumbnails/"] {
        if let Some(idx) = url.find(prefix) {
            let key = &url[idx..];
            if !key[prefix.len()..].is_empty() {
                return Some(key.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("my clip.mp4"), "my_clip.mp4");
        assert_eq!(sanitize_filename("../../etc/passwd"), ".etcpasswd");
        assert_eq!(sanitize_filename("a..b.mp4"), "a.b.mp4");
        assert_eq!(sanitize_filename("clip (1).mp4"), "clip_1.mp4");
        assert_eq!(sanitize_filename("///"), "file");
        assert_eq!(sanitize_filename(""), "file");
        assert!(!sanitize_filename("......clip").contains(".."));
    }

    #[test]
    fn test_key_shapes() {
        assert_eq!(
            video_key(1722500000000, "my clip.mp4"),
            "videos/1722500000000_my_clip.mp4"
        );
        assert_eq!(
            thumbnail_key(1722500000000, "cover.jpg"),
            "thumbnails/1722500000000_cover.jpg"
        );
    }

    #[test]
    fn test_key_from_url() {
        assert_eq!(
            key_from_url("https://cdn.example/videos/17_clip.mp4").as_deref(),
            Some("videos/17_clip.mp4")
        );
        assert_eq!(
            key_from_url("https://cdn.example/thumbnails/17_c.jpg").as_deref(),
            Some("thumbnails/17_c.jpg")
        );
        assert_eq!(key_from_url("https://cdn.example/other/17_c.jpg"), None);
        assert_eq!(key_from_url("https://cdn.example/videos/"), None);
    }
}
