//! Content type detection for served files.

use std::collections::HashMap;
use std::path::Path;

/// Fallback for anything unrecognised.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Maps file extensions and leading magic bytes to MIME types.
#[derive(Debug, Clone)]
pub struct ContentTypeMap {
    by_extension: HashMap<String, &'static str>,
}

impl Default for ContentTypeMap {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentTypeMap {
    pub fn new() -> Self {
        let entries: &[(&str, &'static str)] = &[
            ("html", "text/html; charset=utf-8"),
            ("htm", "text/html; charset=utf-8"),
            ("css", "text/css; charset=utf-8"),
            ("js", "text/javascript; charset=utf-8"),
            ("mjs", "text/javascript; charset=utf-8"),
            ("json", "application/json"),
            ("map", "application/json"),
            ("txt", "text/plain; charset=utf-8"),
            ("xml", "application/xml"),
            ("svg", "image/svg+xml"),
            ("png", "image/png"),
            ("jpg", "image/jpeg"),
            ("jpeg", "image/jpeg"),
            ("gif", "image/gif"),
            ("bmp", "image/bmp"),
            ("webp", "image/webp"),
            ("ico", "image/x-icon"),
            ("woff", "font/woff"),
            ("woff2", "font/woff2"),
            ("ttf", "font/ttf"),
            ("mp3", "audio/mpeg"),
            ("flac", "audio/flac"),
            ("ogg", "audio/ogg"),
            ("wav", "audio/wav"),
        ];

        Self {
            by_extension: entries.iter().map(|(ext, ty)| (ext.to_string(), *ty)).collect(),
        }
    }

    /// Register or replace the type for `extension` (without the dot).
    pub fn insert(&mut self, extension: &str, content_type: &'static str) {
        self.by_extension.insert(extension.to_ascii_lowercase(), content_type);
    }

    /// Look up by file extension, ignoring case.
    pub fn by_path(&self, path: &Path) -> &'static str {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.by_extension.get(&ext.to_ascii_lowercase()).copied())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
    }

    /// Sniff common image formats from their magic numbers.
    pub fn by_content(&self, data: &[u8]) -> &'static str {
        if data.starts_with(b"\x89PNG\r\n\x1a\n") {
            "image/png"
        } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            "image/jpeg"
        } else if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            "image/gif"
        } else if data.starts_with(b"BM") {
            "image/bmp"
        } else if data.len() >= 12 && &data[..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            "image/webp"
        } else {
            DEFAULT_CONTENT_TYPE
        }
    }

    /// Extension first, then content sniffing for unknown extensions.
    pub fn detect(&self, path: &Path, data: &[u8]) -> &'static str {
        match self.by_path(path) {
            DEFAULT_CONTENT_TYPE => self.by_content(data),
            known => known,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn test_by_extension_ignores_case() {
        let map = ContentTypeMap::new();
        assert_eq!(map.by_path(Path::new("index.HTML")), "text/html; charset=utf-8");
        assert_eq!(map.by_path(Path::new("a/b/cover.jpg")), "image/jpeg");
        assert_eq!(map.by_path(Path::new("noext")), DEFAULT_CONTENT_TYPE);
    }

    #[test]
    fn test_by_content() {
        let map = ContentTypeMap::new();
        assert_eq!(map.by_content(b"\x89PNG\r\n\x1a\n...."), "image/png");
        assert_eq!(map.by_content(&[0xFF, 0xD8, 0xFF, 0xE0]), "image/jpeg");
        assert_eq!(map.by_content(b"GIF89a"), "image/gif");
        assert_eq!(map.by_content(b"RIFF\0\0\0\0WEBPVP8 "), "image/webp");
        assert_eq!(map.by_content(b"hello"), DEFAULT_CONTENT_TYPE);
    }

    #[test]
    fn test_detect_falls_back_to_sniffing() {
        let mut map = ContentTypeMap::new();
        assert_eq!(map.detect(Path::new("cover"), b"GIF87a"), "image/gif");
        assert_eq!(map.detect(Path::new("cover.png"), b"GIF87a"), "image/png");

        map.insert("CUE", "application/x-cue");
        assert_eq!(map.by_path(Path::new("album.cue")), "application/x-cue");
    }
}
