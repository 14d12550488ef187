use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::error::SgrError;
use crate::table::STANDARD_COLORS;

#[derive(
    Debug, Eq, PartialEq, Copy, Clone, Default, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Color with all three channels set to `value`.
    #[inline]
    pub const fn gray(value: u8) -> Self {
        Self::new(value, value, value)
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = SgrError;

    fn from_str(s: &str) -> Result<Self, SgrError> {
        let invalid = || SgrError::InvalidRgb(s.to_owned());

        let chars = match (s.strip_prefix("0x"), s.strip_prefix('#')) {
            (Some(hex), _) | (None, Some(hex)) if hex.len() == 6 => hex,
            _ => return Err(invalid()),
        };

        let channel = |range: std::ops::Range<usize>| {
            chars
                .get(range)
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
                .ok_or_else(invalid)
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

impl TryFrom<String> for Rgb {
    type Error = SgrError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

/// Foreground and background pair rendered for a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Color {
    pub front: Rgb,
    pub back: Rgb,
}

impl Color {
    #[inline]
    pub const fn new(front: Rgb, back: Rgb) -> Self {
        Self { front, back }
    }
}

impl Default for Color {
    /// White text on black, taken from the standard palette.
    fn default() -> Self {
        Self {
            front: STANDARD_COLORS[7],
            back: STANDARD_COLORS[0],
        }
    }
}

/// Tells whether an attribute was set by an SGR sequence or is still the
/// inherited default.
///
/// A run of text without any escape sequence only needs an explicit color
/// when its attribute is [`AttrState::Custom`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AttrState {
    #[default]
    Default,
    Custom,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(default)]
pub struct TextAttribute {
    pub state: AttrState,
    pub color: Color,
}

impl TextAttribute {
    #[inline]
    pub const fn new(state: AttrState, color: Color) -> Self {
        Self { state, color }
    }

    /// Attribute carrying `color` in the [`AttrState::Default`] state.
    #[inline]
    pub const fn with_default(color: Color) -> Self {
        Self::new(AttrState::Default, color)
    }

    /// Attribute carrying `color` in the [`AttrState::Custom`] state.
    #[inline]
    pub const fn with_custom(color: Color) -> Self {
        Self::new(AttrState::Custom, color)
    }

    #[inline]
    pub fn is_custom(&self) -> bool {
        self.state == AttrState::Custom
    }
}
