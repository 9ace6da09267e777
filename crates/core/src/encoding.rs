use crate::ConfigurationError;
use base64::{
    Engine,
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
};
use serde::Deserialize;
use std::{fmt, str::FromStr};

/// Text encodings that a robots.txt file can be read with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum TextEncoding {
    /// UTF-8, invalid sequences are replaced with U+FFFD.
    #[default]
    Utf8,
    /// Little-endian UTF-16. A trailing odd byte is ignored.
    Utf16Le,
    /// Every byte is the code point of the same value.
    Latin1,
    /// Like [`TextEncoding::Latin1`] with the high bit of every byte cleared.
    Ascii,
    /// The bytes rendered as standard, padded base64.
    Base64,
    /// The bytes rendered as URL-safe base64 without padding.
    Base64Url,
    /// The bytes rendered as lowercase hexadecimal.
    Hex,
}

impl TextEncoding {
    /// Decode raw file contents into text using this encoding.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Self::Utf16Le => char::decode_utf16(
                bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]])),
            )
            .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect(),
            Self::Latin1 => bytes.iter().map(|&b| char::from(b)).collect(),
            Self::Ascii => bytes.iter().map(|&b| char::from(b & 0x7f)).collect(),
            Self::Base64 => STANDARD.encode(bytes),
            Self::Base64Url => URL_SAFE_NO_PAD.encode(bytes),
            Self::Hex => {
                const DIGITS: &[u8; 16] = b"0123456789abcdef";
                let mut out = String::with_capacity(bytes.len() * 2);
                for &b in bytes {
                    out.push(char::from(DIGITS[usize::from(b >> 4)]));
                    out.push(char::from(DIGITS[usize::from(b & 0x0f)]));
                }
                out
            }
        }
    }

    /// The canonical name of this encoding.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Utf16Le => "utf16le",
            Self::Latin1 => "latin1",
            Self::Ascii => "ascii",
            Self::Base64 => "base64",
            Self::Base64Url => "base64url",
            Self::Hex => "hex",
        }
    }
}

impl FromStr for TextEncoding {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Self::Utf8),
            "utf16le" | "utf-16le" | "ucs2" | "ucs-2" => Ok(Self::Utf16Le),
            "latin1" | "binary" => Ok(Self::Latin1),
            "ascii" => Ok(Self::Ascii),
            "base64" => Ok(Self::Base64),
            "base64url" => Ok(Self::Base64Url),
            "hex" => Ok(Self::Hex),
            _ => Err(ConfigurationError::UnsupportedEncoding(s.to_owned())),
        }
    }
}

impl TryFrom<String> for TextEncoding {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::TextEncoding;
    use crate::ConfigurationError;
    use std::str::FromStr;

    #[test]
    fn test_parse_names() {
        assert_eq!(TextEncoding::from_str("utf8").unwrap(), TextEncoding::Utf8);
        assert_eq!(TextEncoding::from_str("UTF-8").unwrap(), TextEncoding::Utf8);
        assert_eq!(TextEncoding::from_str("ucs2").unwrap(), TextEncoding::Utf16Le);
        assert_eq!(TextEncoding::from_str("binary").unwrap(), TextEncoding::Latin1);
        assert_eq!(TextEncoding::from_str("base64").unwrap(), TextEncoding::Base64);
        assert_eq!(
            TextEncoding::from_str("base64url").unwrap(),
            TextEncoding::Base64Url
        );
        assert_eq!(TextEncoding::from_str("hex").unwrap(), TextEncoding::Hex);

        // Names that are printed must parse back to the same encoding.
        for encoding in [
            TextEncoding::Utf8,
            TextEncoding::Utf16Le,
            TextEncoding::Latin1,
            TextEncoding::Ascii,
            TextEncoding::Base64,
            TextEncoding::Base64Url,
            TextEncoding::Hex,
        ] {
            assert_eq!(encoding.to_string().parse::<TextEncoding>().unwrap(), encoding);
        }
    }

    #[test]
    fn test_parse_unknown() {
        let err = TextEncoding::from_str("ebcdic").unwrap_err();
        assert!(matches!(err, ConfigurationError::UnsupportedEncoding(ref name) if name == "ebcdic"));
        assert_eq!(err.to_string(), "unsupported text encoding 'ebcdic'");
    }

    #[test]
    fn test_default_is_utf8() {
        assert_eq!(TextEncoding::default(), TextEncoding::Utf8);
    }

    #[test]
    fn test_decode() {
        let text = "User-agent: *\nDisallow: /privado/\n";

        assert_eq!(TextEncoding::Utf8.decode(text.as_bytes()), text);
        assert_eq!(
            TextEncoding::Base64.decode(text.as_bytes()),
            "VXNlci1hZ2VudDogKgpEaXNhbGxvdzogL3ByaXZhZG8vCg=="
        );
        assert_eq!(TextEncoding::Base64Url.decode(&[0xfb, 0xff]), "-_8");
        assert_eq!(TextEncoding::Hex.decode(&[0x00, 0xab, 0x7f]), "00ab7f");
        assert_eq!(TextEncoding::Latin1.decode(&[0x41, 0xe9]), "Aé");
        assert_eq!(TextEncoding::Ascii.decode(&[0x41, 0xc1]), "AA");

        // "Hi" followed by a dangling byte that is dropped.
        assert_eq!(TextEncoding::Utf16Le.decode(&[0x48, 0x00, 0x69, 0x00, 0x21]), "Hi");

        // Invalid UTF-8 does not fail, it is replaced.
        assert_eq!(TextEncoding::Utf8.decode(&[0x41, 0xff]), "A\u{fffd}");
    }

    #[test]
    fn test_decode_empty() {
        assert!(TextEncoding::Utf8.decode(&[]).is_empty());
        assert!(TextEncoding::Base64.decode(&[]).is_empty());
        assert!(TextEncoding::Utf16Le.decode(&[0x41]).is_empty());
    }
}
