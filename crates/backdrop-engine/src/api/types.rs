use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 8-bit RGB color, serialized as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::from_hex(&value).ok_or_else(|| format!("invalid color `{}`, expected #RRGGBB", value))
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_string()
    }
}

/// What a single animation-frame callback did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Rate-limited: nothing was mutated.
    Skipped,
    /// Exactly one update-and-draw pass ran.
    Rendered,
    /// The backdrop was torn down; the callback must not reschedule.
    Stopped,
}

/// Errors surfaced to the host. Everything per-frame is best effort and never errors.
#[derive(Debug, Error)]
pub enum BackdropError {
    #[error("malformed backdrop config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid backdrop config field `{field}`: {reason}")]
    InvalidConfig { field: String, reason: String },
}

impl BackdropError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        BackdropError::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
