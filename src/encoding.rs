use std::{borrow::Cow, fmt};

use encoding_rs::{Encoding, REPLACEMENT, UTF_8, UTF_16BE, UTF_16LE, mem};

use crate::error::ConvertError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A character encoding used to decode input bytes or encode output text.
///
/// Most encodings are resolved through the WHATWG label table provided by
/// `encoding_rs`. Strict 7-bit ASCII, ISO-8859-1 and the three UTF-16 flavours
/// are handled here directly: WHATWG maps `ascii` and `iso-8859-1` onto
/// windows-1252, and `encoding_rs` only decodes UTF-16.
///
/// Conversions are always strict. Decoding never inserts U+FFFD and encoding
/// never falls back to numeric character references; both fail with
/// [`ConvertError::Encoding`] instead.
///
/// # Examples
///
/// ```
/// use outputty::encoding::TextEncoding;
///
/// let latin1 = TextEncoding::for_label("ISO-8859-1").unwrap();
/// assert_eq!(&*latin1.encode("álvaro").unwrap(), &b"\xe1lvaro"[..]);
///
/// let ascii = TextEncoding::for_label("ascii").unwrap();
/// assert!(ascii.encode("álvaro").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// 7-bit US-ASCII.
    Ascii,
    /// ISO-8859-1, one byte per code point up to U+00FF.
    Latin1,
    /// UTF-16 with byte-order mark detection on input and a little-endian BOM on output.
    Utf16,
    /// UTF-16 little-endian, no BOM handling.
    Utf16Le,
    /// UTF-16 big-endian, no BOM handling.
    Utf16Be,
    /// Any other encoding known to `encoding_rs`.
    Whatwg(&'static Encoding),
}

impl Default for TextEncoding {
    fn default() -> Self {
        TextEncoding::Whatwg(UTF_8)
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TextEncoding {
    /// Resolves an encoding from a user supplied name such as `utf8`, `utf16` or `iso-8859-1`.
    pub fn for_label(label: &str) -> Result<Self, ConvertError> {
        let normalized = label.trim().to_ascii_lowercase();
        let canonical = match normalized.as_str() {
            "utf8" => "utf-8",
            "utf16" => "utf-16",
            "utf16le" => "utf-16le",
            "utf16be" => "utf-16be",
            "latin1" | "latin-1" | "iso8859-1" | "iso_8859-1" => "iso-8859-1",
            other => other,
        };

        match canonical {
            "ascii" | "us-ascii" => Ok(TextEncoding::Ascii),
            "iso-8859-1" => Ok(TextEncoding::Latin1),
            "utf-16" => Ok(TextEncoding::Utf16),
            "utf-16le" => Ok(TextEncoding::Utf16Le),
            "utf-16be" => Ok(TextEncoding::Utf16Be),
            _ => match Encoding::for_label(canonical.as_bytes()) {
                Some(encoding) if encoding == UTF_16LE => Ok(TextEncoding::Utf16Le),
                Some(encoding) if encoding == UTF_16BE => Ok(TextEncoding::Utf16Be),
                // the replacement encoding decodes everything to U+FFFD
                Some(encoding) if encoding == REPLACEMENT => {
                    Err(ConvertError::UnknownEncoding(label.to_string()))
                }
                Some(encoding) => Ok(TextEncoding::Whatwg(encoding)),
                None => Err(ConvertError::UnknownEncoding(label.to_string())),
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::Ascii => "ascii",
            TextEncoding::Latin1 => "iso-8859-1",
            TextEncoding::Utf16 => "utf-16",
            TextEncoding::Utf16Le => "utf-16le",
            TextEncoding::Utf16Be => "utf-16be",
            TextEncoding::Whatwg(encoding) => encoding.name(),
        }
    }

    /// Decodes `bytes` into text.
    ///
    /// A leading UTF-8 BOM is dropped for UTF-8. For [`TextEncoding::Utf16`]
    /// the BOM selects the byte order and is dropped; without one the input
    /// is read as little-endian.
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Result<Cow<'a, str>, ConvertError> {
        match self {
            TextEncoding::Ascii => match bytes.iter().position(|byte| !byte.is_ascii()) {
                Some(offset) => Err(self.error(format!(
                    "byte 0x{:02x} at offset {} is not valid",
                    bytes[offset], offset
                ))),
                None => self.decode_strict(UTF_8, bytes),
            },
            TextEncoding::Latin1 => Ok(mem::decode_latin1(bytes)),
            TextEncoding::Utf16 => {
                let (encoding, body) = match bytes {
                    [0xFF, 0xFE, rest @ ..] => (UTF_16LE, rest),
                    [0xFE, 0xFF, rest @ ..] => (UTF_16BE, rest),
                    _ => (UTF_16LE, bytes),
                };
                self.decode_strict(encoding, body)
            }
            TextEncoding::Utf16Le => self.decode_strict(UTF_16LE, bytes),
            TextEncoding::Utf16Be => self.decode_strict(UTF_16BE, bytes),
            TextEncoding::Whatwg(encoding) if *encoding == UTF_8 => {
                self.decode_strict(UTF_8, bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes))
            }
            TextEncoding::Whatwg(encoding) => self.decode_strict(*encoding, bytes),
        }
    }

    /// Encodes `text` into bytes, failing on the first character the encoding cannot represent.
    pub fn encode<'a>(&self, text: &'a str) -> Result<Cow<'a, [u8]>, ConvertError> {
        match self {
            TextEncoding::Ascii => match text.chars().find(|c| !c.is_ascii()) {
                Some(c) => Err(self.unrepresentable(c)),
                None => Ok(Cow::Borrowed(text.as_bytes())),
            },
            TextEncoding::Latin1 => match text.chars().find(|&c| u32::from(c) > 0xFF) {
                Some(c) => Err(self.unrepresentable(c)),
                None => Ok(mem::encode_latin1_lossy(text)),
            },
            TextEncoding::Utf16 => Ok(Cow::Owned(encode_utf16(text, false, true))),
            TextEncoding::Utf16Le => Ok(Cow::Owned(encode_utf16(text, false, false))),
            TextEncoding::Utf16Be => Ok(Cow::Owned(encode_utf16(text, true, false))),
            TextEncoding::Whatwg(encoding) if *encoding == UTF_8 => {
                Ok(Cow::Borrowed(text.as_bytes()))
            }
            TextEncoding::Whatwg(encoding) => {
                let (bytes, used, had_errors) = encoding.encode(text);
                if used != *encoding {
                    return Err(self.error(format!(
                        "output is not supported, {} would be used",
                        used.name()
                    )));
                }
                if had_errors {
                    let mut buf = [0u8; 4];
                    let offending = text
                        .chars()
                        .find(|c| encoding.encode(c.encode_utf8(&mut buf)).2);
                    return Err(match offending {
                        Some(c) => self.unrepresentable(c),
                        None => self.error("text is not representable"),
                    });
                }
                Ok(bytes)
            }
        }
    }

    fn decode_strict<'a>(
        &self,
        encoding: &'static Encoding,
        bytes: &'a [u8],
    ) -> Result<Cow<'a, str>, ConvertError> {
        encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .ok_or_else(|| self.error("input contains malformed byte sequences"))
    }

    fn unrepresentable(&self, c: char) -> ConvertError {
        self.error(format!(
            "character {:?} (U+{:04X}) is not representable",
            c, c as u32
        ))
    }

    fn error(&self, reason: impl Into<String>) -> ConvertError {
        ConvertError::Encoding {
            encoding: self.name().to_string(),
            reason: reason.into(),
        }
    }
}

fn encode_utf16(text: &str, big_endian: bool, bom: bool) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 2 + 2);
    let units = bom.then_some(0xFEFF_u16).into_iter().chain(text.encode_utf16());
    for unit in units {
        let bytes = if big_endian {
            unit.to_be_bytes()
        } else {
            unit.to_le_bytes()
        };
        out.extend_from_slice(&bytes);
    }
    out
}

#[cfg(test)]
mod tests {
    use encoding_rs::{UTF_8, WINDOWS_1252};

    use super::TextEncoding;
    use crate::error::ConvertError;

    fn utf16_with_bom(text: &str) -> Vec<u8> {
        let mut bytes = vec![0xFF, 0xFE];
        text.encode_utf16()
            .for_each(|unit| bytes.extend_from_slice(&unit.to_le_bytes()));
        bytes
    }

    #[test]
    fn labels_should_accept_common_spellings() {
        assert_eq!(TextEncoding::for_label("utf8").unwrap(), TextEncoding::Whatwg(UTF_8));
        assert_eq!(TextEncoding::for_label(" UTF-8 ").unwrap(), TextEncoding::Whatwg(UTF_8));
        assert_eq!(TextEncoding::for_label("utf16").unwrap(), TextEncoding::Utf16);
        assert_eq!(TextEncoding::for_label("UTF-16BE").unwrap(), TextEncoding::Utf16Be);
        assert_eq!(TextEncoding::for_label("latin1").unwrap(), TextEncoding::Latin1);
        assert_eq!(TextEncoding::for_label("ISO-8859-1").unwrap(), TextEncoding::Latin1);
        assert_eq!(TextEncoding::for_label("windows-1252").unwrap(), TextEncoding::Whatwg(WINDOWS_1252));
        assert_eq!(TextEncoding::for_label("US-ASCII").unwrap(), TextEncoding::Ascii);
        assert_eq!(TextEncoding::default(), TextEncoding::Whatwg(UTF_8));
    }

    #[test]
    fn unknown_label_should_fail() {
        let result = TextEncoding::for_label("klingon");
        assert!(matches!(result, Err(ConvertError::UnknownEncoding(name)) if name == "klingon"));

        // iso-2022-kr is mapped to the replacement encoding by WHATWG
        assert!(TextEncoding::for_label("iso-2022-kr").is_err());
    }

    #[test]
    fn utf16_should_decode_using_bom() {
        let bytes = utf16_with_bom("álvaro\ntesting");
        let text = TextEncoding::Utf16.decode(&bytes).unwrap();
        assert_eq!(text, "álvaro\ntesting");

        let mut big_endian = vec![0xFE, 0xFF];
        "ab".encode_utf16()
            .for_each(|unit| big_endian.extend_from_slice(&unit.to_be_bytes()));
        assert_eq!(TextEncoding::Utf16.decode(&big_endian).unwrap(), "ab");
    }

    #[test]
    fn utf16_without_bom_should_default_to_little_endian() {
        assert_eq!(TextEncoding::Utf16.decode(b"a\0b\0").unwrap(), "ab");
    }

    #[test]
    fn truncated_utf16_should_fail() {
        let result = TextEncoding::Utf16Le.decode(b"a\0b");
        assert!(matches!(result, Err(ConvertError::Encoding { encoding, .. }) if encoding == "utf-16le"));
    }

    #[test]
    fn invalid_utf8_should_fail() {
        let result = TextEncoding::default().decode(b"caf\xe9");
        assert!(matches!(result, Err(ConvertError::Encoding { .. })));
    }

    #[test]
    fn utf8_bom_should_be_dropped() {
        let text = TextEncoding::default().decode(b"\xEF\xBB\xBFa,b").unwrap();
        assert_eq!(text, "a,b");
    }

    #[test]
    fn ascii_should_reject_high_bytes() {
        let err = TextEncoding::Ascii.decode(b"ok\xe1").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Encoding error (ascii): byte 0xe1 at offset 2 is not valid"
        );
    }

    #[test]
    fn latin1_should_encode_representable_text() {
        let latin1 = TextEncoding::for_label("iso-8859-1").unwrap();
        let bytes = latin1.encode("<th>álvaro</th>").unwrap();
        assert_eq!(&*bytes, &b"<th>\xe1lvaro</th>"[..]);
    }

    #[test]
    fn latin1_should_reject_unrepresentable_text() {
        let latin1 = TextEncoding::for_label("latin1").unwrap();
        let err = latin1.encode("price: ₹10").unwrap_err();
        assert!(err.to_string().contains("U+20B9"));
    }

    #[test]
    fn latin1_should_reject_euro_sign() {
        let err = TextEncoding::Latin1.encode("€5").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Encoding error (iso-8859-1): character '€' (U+20AC) is not representable"
        );
    }

    #[test]
    fn latin1_should_encode_c1_controls_as_single_bytes() {
        let bytes = TextEncoding::Latin1.encode("\u{80}\u{9f}ÿ").unwrap();
        assert_eq!(&*bytes, &[0x80_u8, 0x9F, 0xFF][..]);
    }

    #[test]
    fn latin1_should_decode_every_byte_to_same_code_point() {
        let text = TextEncoding::Latin1.decode(b"\x80\xe1\xff").unwrap();
        assert_eq!(text, "\u{80}áÿ");
    }

    #[test]
    fn windows_1252_should_stay_distinct_from_latin1() {
        let cp1252 = TextEncoding::for_label("windows-1252").unwrap();
        assert_eq!(&*cp1252.encode("€").unwrap(), &[0x80_u8][..]);
        assert_eq!(cp1252.decode(b"\x80").unwrap(), "€");
    }

    #[test]
    fn ascii_should_reject_accented_text() {
        let err = TextEncoding::Ascii.encode("álvaro").unwrap_err();
        assert!(err.to_string().contains("'á'"));
    }

    #[test]
    fn utf16_encoding_should_write_bom() {
        let bytes = TextEncoding::Utf16.encode("á").unwrap();
        assert_eq!(&*bytes, &[0xFF_u8, 0xFE, 0xE1, 0x00][..]);

        let bytes = TextEncoding::Utf16Be.encode("á").unwrap();
        assert_eq!(&*bytes, &[0x00_u8, 0xE1][..]);
    }

    #[test]
    fn utf16_round_trip_should_preserve_text() {
        let text = "álvaro, 東京, 🦀";
        let bytes = TextEncoding::Utf16.encode(text).unwrap();
        assert_eq!(TextEncoding::Utf16.decode(&bytes).unwrap(), text);
    }
}
