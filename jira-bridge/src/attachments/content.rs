//! Inline content encoding for attachment payloads
//!
//! Tool responses carry attachment bytes inline. Images and other binary
//! media travel base64-encoded; text travels verbatim when it decodes as
//! UTF-8 and falls back to base64 when it does not. Decoding ambiguity never
//! surfaces as an error.

use base64::Engine;

/// How the `content` string of a response is encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportEncoding {
    /// Standard base64
    Base64,
    /// Verbatim UTF-8 text
    Text,
}

impl TransportEncoding {
    /// Wire name of the encoding
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportEncoding::Base64 => "base64",
            TransportEncoding::Text => "text",
        }
    }
}

/// Encoded attachment content ready for a JSON response
#[derive(Debug, Clone)]
pub struct EncodedContent {
    /// The encoded payload
    pub content: String,
    /// Which encoding was applied
    pub encoding: TransportEncoding,
}

/// Encode attachment bytes for transport based on their media type
pub fn encode_for_transport(mime_type: Option<&str>, data: &[u8]) -> EncodedContent {
    let mime = mime_type.unwrap_or("application/octet-stream");

    if mime.starts_with("text/") {
        match std::str::from_utf8(data) {
            Ok(text) => {
                return EncodedContent {
                    content: text.to_string(),
                    encoding: TransportEncoding::Text,
                }
            }
            Err(_) => {
                return EncodedContent {
                    content: base64_encode(data),
                    encoding: TransportEncoding::Base64,
                }
            }
        }
    }

    // Images and everything else travel base64-encoded
    EncodedContent {
        content: base64_encode(data),
        encoding: TransportEncoding::Base64,
    }
}

fn base64_encode(data: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_is_base64() {
        let encoded = encode_for_transport(Some("image/png"), b"\x89PNG\r\n");
        assert_eq!(encoded.encoding, TransportEncoding::Base64);
        assert_eq!(
            encoded.content,
            base64::engine::general_purpose::STANDARD.encode(b"\x89PNG\r\n")
        );
    }

    #[test]
    fn test_utf8_text_is_verbatim() {
        let encoded = encode_for_transport(Some("text/plain"), "hello".as_bytes());
        assert_eq!(encoded.encoding, TransportEncoding::Text);
        assert_eq!(encoded.content, "hello");
    }

    #[test]
    fn test_invalid_utf8_text_falls_back_to_base64() {
        let encoded = encode_for_transport(Some("text/plain"), &[0xff, 0xfe, 0x01]);
        assert_eq!(encoded.encoding, TransportEncoding::Base64);
    }

    #[test]
    fn test_unknown_media_type_is_base64() {
        let encoded = encode_for_transport(Some("application/pdf"), b"%PDF-1.4");
        assert_eq!(encoded.encoding, TransportEncoding::Base64);
    }

    #[test]
    fn test_missing_media_type_is_base64() {
        let encoded = encode_for_transport(None, b"anything");
        assert_eq!(encoded.encoding, TransportEncoding::Base64);
    }
}
