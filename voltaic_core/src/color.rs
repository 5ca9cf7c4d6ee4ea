//! Hex color parsing for configuration values.
//!
//! Config files carry colors as hex strings (`#rgb`, `#rrggbb`, `#rrggbbaa`)
//! so a bad value fails at load time instead of producing garbage mid-frame.

use crate::error::{CoreError, CoreResult};

/// A straight-alpha RGBA color with components in [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(value: &str) -> CoreResult<Self> {
        let digits = value
            .strip_prefix('#')
            .ok_or_else(|| CoreError::Color(value.to_string()))?;

        let channel = |hi: u8, lo: u8| -> CoreResult<f32> {
            let pair = [hi, lo];
            let text = std::str::from_utf8(&pair).map_err(|_| CoreError::Color(value.to_string()))?;
            let byte =
                u8::from_str_radix(text, 16).map_err(|_| CoreError::Color(value.to_string()))?;
            Ok(byte as f32 / 255.0)
        };

        let bytes = digits.as_bytes();
        match bytes.len() {
            3 => Ok(Self {
                r: channel(bytes[0], bytes[0])?,
                g: channel(bytes[1], bytes[1])?,
                b: channel(bytes[2], bytes[2])?,
                a: 1.0,
            }),
            6 => Ok(Self {
                r: channel(bytes[0], bytes[1])?,
                g: channel(bytes[2], bytes[3])?,
                b: channel(bytes[4], bytes[5])?,
                a: 1.0,
            }),
            8 => Ok(Self {
                r: channel(bytes[0], bytes[1])?,
                g: channel(bytes[2], bytes[3])?,
                b: channel(bytes[4], bytes[5])?,
                a: channel(bytes[6], bytes[7])?,
            }),
            _ => Err(CoreError::Color(value.to_string())),
        }
    }
}
