use std::fmt;
use std::str::FromStr;

use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Color – an sRGB colour exchanged as `#RRGGBB`
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid hex colour '{0}'")]
pub struct ColorParseError(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(Srgb<u8>);

impl Color {
    pub fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Color(Srgb::new(red, green, blue))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0.red, self.0.green, self.0.blue)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim();
        if hex.len() != 7 || !hex.starts_with('#') {
            return Err(ColorParseError(s.to_string()));
        }
        Srgb::<u8>::from_str(hex)
            .map(Color)
            .map_err(|_| ColorParseError(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color(rgb.into_format::<u8>())
        })
        .collect()
}

// ---------------------------------------------------------------------------
// ColorSpec – what a chart series is painted with
// ---------------------------------------------------------------------------

/// Either one colour for the whole series, or one per label (index-aligned).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Single(Color),
    PerLabel(Vec<Color>),
}

impl ColorSpec {
    /// One colour per label: `base` first, then generated hues for any
    /// labels beyond it. Extra base colours are dropped.
    pub fn per_label(base: &[Color], n: usize) -> Self {
        let mut colors: Vec<Color> = base.iter().copied().take(n).collect();
        if colors.len() < n {
            colors.extend(generate_palette(n - colors.len()));
        }
        ColorSpec::PerLabel(colors)
    }

    /// Border colour: the colour itself, or the first of a list.
    pub fn primary(&self) -> Option<Color> {
        match self {
            ColorSpec::Single(c) => Some(*c),
            ColorSpec::PerLabel(cs) => cs.first().copied(),
        }
    }
}
