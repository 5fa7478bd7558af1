//! Character encodings for `.strings` file I/O.

use crate::error::Error;

/// Text encoding used when reading or writing a `.strings` file.
///
/// UTF-16 is the historical default for the format; UTF-8 is an explicit
/// opt-in. The encoding is selected per call, never auto-detected, though
/// UTF-16 decoding honors a byte order mark for endianness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Encoding {
    #[default]
    Utf16,
    Utf8,
}

impl Encoding {
    /// Decodes `bytes` into text, honoring a leading BOM.
    ///
    /// Without a BOM, UTF-16 input is assumed little-endian. Malformed
    /// sequences under the selected encoding fail with [`Error::Decode`].
    pub fn decode(self, bytes: &[u8]) -> Result<String, Error> {
        let (text, had_errors) = match self {
            Encoding::Utf16 => {
                let (text, _, had_errors) = encoding_rs::UTF_16LE.decode(bytes);
                (text, had_errors)
            }
            Encoding::Utf8 => encoding_rs::UTF_8.decode_with_bom_removal(bytes),
        };
        if had_errors {
            return Err(Error::Decode(self.name()));
        }
        Ok(text.into_owned())
    }

    /// Encodes `text` into bytes.
    ///
    /// UTF-16 output carries a BOM followed by little-endian code units,
    /// matching what `decode` accepts and what Apple tooling produces.
    /// UTF-8 output is the text verbatim, no BOM.
    pub fn encode(self, text: &str) -> Vec<u8> {
        match self {
            Encoding::Utf16 => {
                let mut bytes = Vec::with_capacity(2 + text.len() * 2);
                for unit in std::iter::once(0xFEFF_u16).chain(text.encode_utf16()) {
                    bytes.extend_from_slice(&unit.to_le_bytes());
                }
                bytes
            }
            Encoding::Utf8 => text.as_bytes().to_vec(),
        }
    }

    /// Lowercase IANA-style name, used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Utf16 => "utf-16",
            Encoding::Utf8 => "utf-8",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_utf16() {
        assert_eq!(Encoding::default(), Encoding::Utf16);
    }

    #[test]
    fn test_utf16_encode_decode_round_trip() {
        let text = "\"%@ は %2$@\" = \"沒有註解\";";
        let bytes = Encoding::Utf16.encode(text);
        assert_eq!(&bytes[..2], &[0xFF, 0xFE]);
        assert_eq!(Encoding::Utf16.decode(&bytes).unwrap(), text);
    }

    #[test]
    fn test_utf16_decode_accepts_big_endian_bom() {
        // "hi" in UTF-16BE with BOM.
        let bytes = [0xFE, 0xFF, 0x00, b'h', 0x00, b'i'];
        assert_eq!(Encoding::Utf16.decode(&bytes).unwrap(), "hi");
    }

    #[test]
    fn test_utf8_round_trip_has_no_bom() {
        let text = "Café crème";
        let bytes = Encoding::Utf8.encode(text);
        assert_eq!(bytes, text.as_bytes());
        assert_eq!(Encoding::Utf8.decode(&bytes).unwrap(), text);
    }

    #[test]
    fn test_utf8_decode_rejects_invalid_bytes() {
        assert!(matches!(
            Encoding::Utf8.decode(&[0xFF, 0xFE, 0xFF]),
            Err(Error::Decode("utf-8"))
        ));
    }

    #[test]
    fn test_utf16_decode_rejects_unpaired_surrogate() {
        // Lone high surrogate D800, little-endian, no BOM.
        assert!(matches!(
            Encoding::Utf16.decode(&[0x00, 0xD8]),
            Err(Error::Decode("utf-16"))
        ));
    }
}
