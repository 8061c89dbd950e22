use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{FixtureError, Result};

pub const PNG_MIME_TYPE: &str = "image/png";

fn prefix(mime_type: &str) -> String {
    format!("data:{};base64,", mime_type)
}

/// Build a `data:<mime>;base64,<payload>` URL from raw bytes.
pub fn to_data_url(bytes: &[u8], mime_type: &str) -> String {
    let mut url = prefix(mime_type);
    STANDARD.encode_string(bytes, &mut url);
    url
}

/// Length of the URL `to_data_url` would produce for `byte_len` bytes.
pub fn data_url_len(byte_len: usize, mime_type: &str) -> usize {
    prefix(mime_type).len() + byte_len.div_ceil(3) * 4
}

/// Split a base64 data URL into its MIME type and decoded payload.
pub fn parse_data_url(url: &str) -> Result<(String, Vec<u8>)> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| FixtureError::DataUrl("missing `data:` scheme".to_string()))?;
    let (mime_type, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| FixtureError::DataUrl("missing `;base64,` marker".to_string()))?;

    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| FixtureError::DataUrl(e.to_string()))?;

    Ok((mime_type.to_string(), bytes))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_known_payload() {
        assert_eq!(to_data_url(b"Man", PNG_MIME_TYPE), "data:image/png;base64,TWFu");
        assert_eq!(to_data_url(b"Ma", PNG_MIME_TYPE), "data:image/png;base64,TWE=");
        assert_eq!(to_data_url(b"M", PNG_MIME_TYPE), "data:image/png;base64,TQ==");
    }

    #[test]
    fn test_empty_payload() {
        assert_eq!(to_data_url(&[], PNG_MIME_TYPE), "data:image/png;base64,");
        assert_eq!(data_url_len(0, PNG_MIME_TYPE), 22);
    }

    #[test]
    fn test_length_formula() {
        let bytes: Vec<u8> = (0..=255).collect();
        for n in 0..bytes.len() {
            let url = to_data_url(&bytes[..n], PNG_MIME_TYPE);
            assert_eq!(url.len(), data_url_len(n, PNG_MIME_TYPE), "n = {}", n);
        }
    }

    #[test]
    fn test_deterministic() {
        let bytes = b"\x89PNG\r\n\x1a\n";
        assert_eq!(to_data_url(bytes, PNG_MIME_TYPE), to_data_url(bytes, PNG_MIME_TYPE));
    }

    #[test]
    fn test_parse_data_url() {
        let url = to_data_url(b"\x00\xffbytes", "application/octet-stream");
        let (mime, bytes) = parse_data_url(&url).unwrap();
        assert_eq!(mime, "application/octet-stream");
        assert_eq!(bytes, b"\x00\xffbytes");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(parse_data_url("image/png;base64,TWFu").is_err());
        assert!(parse_data_url("data:image/png,TWFu").is_err());
        assert!(parse_data_url("data:image/png;base64,!!!").is_err());
    }
}
