use crate::float_types::Real;
use crate::io::{ConvertError, Result};

/// An RGB color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: Real,
    pub g: Real,
    pub b: Real,
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };

    pub const fn new(r: Real, g: Real, b: Real) -> Self {
        Color { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb` (any case). Each channel becomes `byte / 255`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ConvertError::InvalidConfiguration(format!(
                "color {hex:?} is not of the form #rrggbb"
            )));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map(|v| v as Real / 255.0)
                .map_err(|e| ConvertError::InvalidConfiguration(format!("color {hex:?}: {e}")))
        };
        Ok(Color::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Lowercase `#rrggbb`, each channel rounded to the nearest byte.
    pub fn to_hex(&self) -> String {
        let byte = |c: Real| (c * 255.0).round().clamp(0.0, 255.0) as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }

    pub fn to_array(&self) -> [Real; 3] {
        [self.r, self.g, self.b]
    }

    pub fn validate(&self) -> Result<()> {
        for (name, c) in [("red", self.r), ("green", self.g), ("blue", self.b)] {
            if !c.is_finite() || !(0.0..=1.0).contains(&c) {
                return Err(ConvertError::InvalidConfiguration(format!(
                    "color {name} channel {c} is outside [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

impl std::str::FromStr for Color {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        Color::from_hex(s)
    }
}
