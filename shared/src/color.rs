// Sampled pixel colors and their `#RRGGBB` form

use crate::error::CaptureError;
use std::fmt;
use std::str::FromStr;

/// A single RGB pixel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from raw capture channels in R, G, B order.
    /// Alpha or any further channel is dropped.
    pub fn from_channels(channels: &[u8]) -> Result<Self, CaptureError> {
        match channels {
            [r, g, b, ..] => Ok(Self::new(*r, *g, *b)),
            _ => Err(CaptureError::MissingChannels(channels.len())),
        }
    }

    /// Uppercase `#RRGGBB`
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Packed as `0x00RRGGBB`, small enough for a window message parameter.
    pub const fn to_bits(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    pub const fn from_bits(bits: u32) -> Self {
        Self::new((bits >> 16) as u8, (bits >> 8) as u8, bits as u8)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = String;

    /// Accepts `#RRGGBB` or `RRGGBB`, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("not a #RRGGBB color: {s:?}"));
        }
        let bits = u32::from_str_radix(digits, 16).map_err(|e| e.to_string())?;
        Ok(Self::from_bits(bits))
    }
}
