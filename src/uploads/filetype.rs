//! Accepted image formats - extension, MIME, and signature checks
//!
//! An upload is only trusted once all three agree: the filename
//! extension, the declared content type, and the file's leading bytes.

/// Image formats accepted by the upload endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Gif,
    Jpeg,
    Png,
    Webp,
}

/// Extensions accepted on upload, in the order shown to clients.
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["gif", "jpeg", "jpg", "png", "webp"];

impl ImageFormat {
    /// Derive the format from a lowercased filename extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "gif" => Some(Self::Gif),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "webp" => Some(Self::Webp),
            _ => None,
        }
    }

    /// Whether a client-declared MIME type matches this format.
    pub fn matches_mime(self, mime: &str) -> bool {
        let mime = mime.to_ascii_lowercase();
        match self {
            Self::Gif => mime == "image/gif",
            Self::Jpeg => mime == "image/jpeg",
            Self::Png => mime == "image/png",
            Self::Webp => mime == "image/webp",
        }
    }

    /// Whether the file's leading bytes carry this format's signature.
    ///
    /// GIF: `GIF87a` or `GIF89a`. JPEG: `FF D8 FF` then one of
    /// E0-E3/EE/DB. PNG: `89 50 4E 47`. WEBP: `RIFF` then `WEBP` at
    /// offset 8.
    pub fn matches_signature(self, bytes: &[u8]) -> bool {
        match self {
            Self::Gif => bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a"),
            Self::Jpeg => {
                bytes.len() >= 4
                    && bytes.starts_with(&[0xFF, 0xD8, 0xFF])
                    && matches!(bytes[3], 0xE0..=0xE3 | 0xEE | 0xDB)
            }
            Self::Png => bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]),
            Self::Webp => {
                bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP"
            }
        }
    }

    /// Content type served back for a stored file of this format.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Gif => "image/gif",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
        }
    }
}

/// Extension of a submitted filename: substring after the last `.`,
/// lowercased. Empty when there is no dot.
pub fn file_extension(name: &str) -> String {
    match name.rfind('.') {
        Some(idx) => name[idx + 1..].to_ascii_lowercase(),
        None => String::new(),
    }
}
