use std::str::FromStr;

use thiserror::Error;

use crate::constants::DEFAULT_ARC_COLORS;

/// Linear RGB color with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseColorError {
    #[error("color must be `#rgb` or `#rrggbb`, got {0:?}")]
    BadFormat(String),
    #[error("invalid hex digit in {0:?}")]
    BadDigit(String),
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse `#rrggbb` or the `#rgb` shorthand (each digit doubled). The
    /// leading `#` is optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.is_ascii() {
            return Err(ParseColorError::BadFormat(s.to_string()));
        }
        let expanded: String = match hex.len() {
            3 => hex.chars().flat_map(|c| [c, c]).collect(),
            6 => hex.to_string(),
            _ => return Err(ParseColorError::BadFormat(s.to_string())),
        };
        let channel = |i: usize| {
            u8::from_str_radix(&expanded[i..i + 2], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| ParseColorError::BadDigit(s.to_string()))
        };
        Ok(Rgb {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }
}

/// Ordered color list cycled by route index.
#[derive(Clone, Debug)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Default for Palette {
    fn default() -> Self {
        // The built-in hex table is well-formed by construction.
        let colors = DEFAULT_ARC_COLORS
            .iter()
            .map(|s| s.parse().unwrap_or(Rgb::WHITE))
            .collect();
        Self { colors }
    }
}

impl Palette {
    /// An empty list falls back to the built-in palette so `color_for` is
    /// total.
    pub fn new(colors: Vec<Rgb>) -> Self {
        if colors.is_empty() {
            Self::default()
        } else {
            Self { colors }
        }
    }

    /// Parse hex color strings. Malformed entries are dropped with a warning
    /// rather than failing the whole palette.
    pub fn from_hex<'a, I>(hex: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let colors = hex
            .into_iter()
            .filter_map(|s| match s.parse() {
                Ok(color) => Some(color),
                Err(e) => {
                    log::warn!("skipping arc color {s:?}: {e}");
                    None
                }
            })
            .collect();
        Self::new(colors)
    }

    pub fn color_for(&self, index: usize) -> Rgb {
        self.colors[index % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
