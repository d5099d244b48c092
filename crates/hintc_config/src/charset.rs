//! Output charsets for the generated artifact.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A charset the artifact can be written in.
///
/// Parsed case-insensitively from the usual names and aliases (`UTF-8`,
/// `utf8`, `ASCII`, `latin1`, ...). Displays the canonical name.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Charset {
    /// UTF-8, the default.
    #[default]
    Utf8,
    /// 7-bit US-ASCII.
    UsAscii,
    /// ISO-8859-1 (Latin-1).
    Iso8859_1,
    /// UTF-16, big endian, no byte order mark.
    Utf16Be,
    /// UTF-16, little endian, no byte order mark.
    Utf16Le,
}

/// A character that the selected charset cannot represent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeError {
    /// The charset that was being encoded to.
    pub charset: Charset,
    /// The offending character.
    pub ch: char,
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "character {:?} (U+{:04X}) cannot be encoded in {}",
            self.ch, self.ch as u32, self.charset
        )
    }
}

impl std::error::Error for EncodeError {}

impl Charset {
    /// Returns the canonical name of this charset.
    pub fn name(self) -> &'static str {
        match self {
            Charset::Utf8 => "UTF-8",
            Charset::UsAscii => "US-ASCII",
            Charset::Iso8859_1 => "ISO-8859-1",
            Charset::Utf16Be => "UTF-16BE",
            Charset::Utf16Le => "UTF-16LE",
        }
    }

    /// Encodes `text` into bytes, failing on the first unrepresentable character.
    pub fn encode(self, text: &str) -> Result<Vec<u8>, EncodeError> {
        match self {
            Charset::Utf8 => Ok(text.as_bytes().to_vec()),
            Charset::UsAscii => self.encode_single_byte(text, 0x7f),
            Charset::Iso8859_1 => self.encode_single_byte(text, 0xff),
            Charset::Utf16Be => Ok(text.encode_utf16().flat_map(u16::to_be_bytes).collect()),
            Charset::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
        }
    }

    fn encode_single_byte(self, text: &str, max: u32) -> Result<Vec<u8>, EncodeError> {
        text.chars()
            .map(|ch| {
                let code = ch as u32;
                if code <= max {
                    Ok(code as u8)
                } else {
                    Err(EncodeError { charset: self, ch })
                }
            })
            .collect()
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Charset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        let charset = match normalized.as_str() {
            "utf-8" | "utf8" => Charset::Utf8,
            "us-ascii" | "ascii" => Charset::UsAscii,
            "iso-8859-1" | "iso8859-1" | "latin1" | "latin-1" => Charset::Iso8859_1,
            "utf-16be" => Charset::Utf16Be,
            "utf-16le" => Charset::Utf16Le,
            _ => return Err(ConfigError::UnsupportedCharset(s.to_string())),
        };
        Ok(charset)
    }
}

impl TryFrom<String> for Charset {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Charset> for String {
    fn from(charset: Charset) -> Self {
        charset.name().to_string()
    }
}
