//! Image intake: turns a picked file into a self-describing `data:` URL and
//! splits such a URL back into the media type and base64 payload the vision
//! service expects.

use std::path::Path;

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use thiserror::Error;

const BASE64_MARKER: &str = ";base64,";

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("invalid image data")]
    InvalidDataUrl,

    #[error("unsupported image format: {0}")]
    UnsupportedImage(String),

    #[error("failed to read image {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A data URL split into its parts. Borrows from the source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineImage<'a> {
    pub mime_type: &'a str,
    pub payload: &'a str,
}

pub fn to_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{mime_type}{BASE64_MARKER}{}", B64.encode(bytes))
}

/// Sniffs the media type from the file content rather than the extension.
pub fn sniff_mime_type(bytes: &[u8]) -> Result<&'static str, MediaError> {
    image::guess_format(bytes)
        .map(|format| format.to_mime_type())
        .map_err(|err| MediaError::UnsupportedImage(err.to_string()))
}

pub async fn read_as_data_url(path: &Path) -> Result<String, MediaError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| MediaError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mime_type = sniff_mime_type(&bytes)?;
    Ok(to_data_url(mime_type, &bytes))
}

/// Splits `data:<mime>;base64,<payload>`. Both parts must be non-empty and the
/// payload must be valid base64.
pub fn parse_data_url(url: &str) -> Result<InlineImage<'_>, MediaError> {
    let rest = url.strip_prefix("data:").ok_or(MediaError::InvalidDataUrl)?;
    let split_at = rest.rfind(BASE64_MARKER).ok_or(MediaError::InvalidDataUrl)?;
    let mime_type = &rest[..split_at];
    let payload = &rest[split_at + BASE64_MARKER.len()..];

    if mime_type.is_empty() || payload.is_empty() {
        return Err(MediaError::InvalidDataUrl);
    }
    if B64.decode(payload).is_err() {
        return Err(MediaError::InvalidDataUrl);
    }

    Ok(InlineImage { mime_type, payload })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Smallest PNG signature plus IHDR prefix; enough for format sniffing.
    const PNG_HEADER: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];

    #[test]
    fn parses_well_formed_data_url() {
        let url = "data:image/jpeg;base64,/9j/4AAQ";
        let inline = parse_data_url(url).unwrap();
        assert_eq!(inline.mime_type, "image/jpeg");
        assert_eq!(inline.payload, "/9j/4AAQ");
    }

    #[test]
    fn rejects_missing_prefix_and_marker() {
        assert!(matches!(parse_data_url("image/jpeg;base64,AAAA"), Err(MediaError::InvalidDataUrl)));
        assert!(matches!(parse_data_url("data:image/jpeg,AAAA"), Err(MediaError::InvalidDataUrl)));
        assert!(matches!(parse_data_url("data:;base64,AAAA"), Err(MediaError::InvalidDataUrl)));
        assert!(matches!(parse_data_url("data:image/png;base64,"), Err(MediaError::InvalidDataUrl)));
    }

    #[test]
    fn rejects_non_base64_payload() {
        let result = parse_data_url("data:image/png;base64,not base64!!");
        assert!(matches!(result, Err(MediaError::InvalidDataUrl)));
    }

    #[test]
    fn sniffs_png() {
        assert_eq!(sniff_mime_type(PNG_HEADER).unwrap(), "image/png");
        assert!(sniff_mime_type(b"plain text").is_err());
    }

    #[tokio::test]
    async fn reads_file_into_data_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dog.png");
        std::fs::write(&path, PNG_HEADER).unwrap();

        let url = read_as_data_url(&path).await.unwrap();
        let inline = parse_data_url(&url).unwrap();
        assert_eq!(inline.mime_type, "image/png");
        assert_eq!(B64.decode(inline.payload).unwrap(), PNG_HEADER);
    }

    #[tokio::test]
    async fn missing_file_is_io_error() {
        let result = read_as_data_url(Path::new("/definitely/not/here.jpg")).await;
        assert!(matches!(result, Err(MediaError::Io { .. })));
    }
}
