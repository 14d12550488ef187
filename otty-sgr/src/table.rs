//! Lookup table for SGR parameters that resolve in a single field.
//!
//! Every code ECMA-48 defines for color selection and reset maps to an
//! [`Entry`]. The table is a `static` built at compile time and never
//! mutated, so it can be read from any thread without synchronization.
//! Codes outside the defined set map to [`Entry::Unsupported`].

use crate::color::Rgb;
use crate::machine::{ParseResult, ParseState};

/// Reference palette for codes `30..=37` / `40..=47`.
pub(crate) const STANDARD_COLORS: [Rgb; 8] = [
    Rgb::new(1, 1, 1),
    Rgb::new(222, 56, 43),
    Rgb::new(57, 181, 74),
    Rgb::new(255, 199, 6),
    Rgb::new(0, 111, 184),
    Rgb::new(118, 38, 113),
    Rgb::new(44, 181, 233),
    Rgb::new(204, 204, 204),
];

/// Reference palette for codes `90..=97` / `100..=107`.
pub(crate) const BRIGHT_COLORS: [Rgb; 8] = [
    Rgb::new(128, 128, 128),
    Rgb::new(255, 0, 0),
    Rgb::new(0, 255, 0),
    Rgb::new(255, 255, 0),
    Rgb::new(0, 0, 255),
    Rgb::new(255, 0, 255),
    Rgb::new(0, 255, 255),
    Rgb::new(255, 255, 255),
];

/// Numeric SGR parameter.
///
/// Any `u8` is a valid `ColorIndex`; only the codes with a named constant
/// are [defined](ColorIndex::is_defined).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ColorIndex(pub u8);

impl ColorIndex {
    pub const RESET_DEFAULT: Self = Self(0);

    pub const F_BLACK: Self = Self(30);
    pub const F_RED: Self = Self(31);
    pub const F_GREEN: Self = Self(32);
    pub const F_YELLOW: Self = Self(33);
    pub const F_BLUE: Self = Self(34);
    pub const F_MAGENTA: Self = Self(35);
    pub const F_CYAN: Self = Self(36);
    pub const F_WHITE: Self = Self(37);
    pub const F_CUSTOM_COLOR: Self = Self(38);
    pub const F_DEFAULT_COLOR: Self = Self(39);

    pub const B_BLACK: Self = Self(40);
    pub const B_RED: Self = Self(41);
    pub const B_GREEN: Self = Self(42);
    pub const B_YELLOW: Self = Self(43);
    pub const B_BLUE: Self = Self(44);
    pub const B_MAGENTA: Self = Self(45);
    pub const B_CYAN: Self = Self(46);
    pub const B_WHITE: Self = Self(47);
    pub const B_CUSTOM_COLOR: Self = Self(48);
    pub const B_DEFAULT_COLOR: Self = Self(49);

    pub const F_BRIGHT_BLACK: Self = Self(90);
    pub const F_BRIGHT_RED: Self = Self(91);
    pub const F_BRIGHT_GREEN: Self = Self(92);
    pub const F_BRIGHT_YELLOW: Self = Self(93);
    pub const F_BRIGHT_BLUE: Self = Self(94);
    pub const F_BRIGHT_MAGENTA: Self = Self(95);
    pub const F_BRIGHT_CYAN: Self = Self(96);
    pub const F_BRIGHT_WHITE: Self = Self(97);

    pub const B_BRIGHT_BLACK: Self = Self(100);
    pub const B_BRIGHT_RED: Self = Self(101);
    pub const B_BRIGHT_GREEN: Self = Self(102);
    pub const B_BRIGHT_YELLOW: Self = Self(103);
    pub const B_BRIGHT_BLUE: Self = Self(104);
    pub const B_BRIGHT_MAGENTA: Self = Self(105);
    pub const B_BRIGHT_CYAN: Self = Self(106);
    pub const B_BRIGHT_WHITE: Self = Self(107);

    #[inline]
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Whether ECMA-48 assigns a color meaning to this code.
    #[inline]
    pub const fn is_defined(self) -> bool {
        matches!(self.0, 0 | 30..=49 | 90..=97 | 100..=107)
    }
}

impl From<u8> for ColorIndex {
    #[inline]
    fn from(value: u8) -> Self {
        Self(value)
    }
}

/// Which half of a [`Color`](crate::Color) a code targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Front,
    Back,
}

/// Decode outcome stored for a single [`ColorIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entry {
    /// Literal foreground color.
    Front(Rgb),
    /// Literal background color.
    Back(Rgb),
    /// `38` / `48`: the color follows in the next fields.
    Custom(Layer),
    /// `39`
    DefaultFront,
    /// `49`
    DefaultBack,
    /// `0`: reset the whole attribute.
    DefaultAll,
    Unsupported,
}

impl Entry {
    pub const fn result(self) -> ParseResult {
        match self {
            Self::Front(_) | Self::Custom(Layer::Front) => {
                ParseResult::FrontColor
            },
            Self::Back(_) | Self::Custom(Layer::Back) => ParseResult::BackColor,
            Self::DefaultFront => ParseResult::DefaultFrontColor,
            Self::DefaultBack => ParseResult::DefaultBackColor,
            Self::DefaultAll => ParseResult::DefaultTextAttr,
            Self::Unsupported => ParseResult::UnsupportedAttr,
        }
    }

    pub const fn rgb(self) -> Option<Rgb> {
        match self {
            Self::Front(rgb) | Self::Back(rgb) => Some(rgb),
            _ => None,
        }
    }

    /// State the parser resumes in once this entry has been adopted.
    pub const fn resume_state(self) -> ParseState {
        match self {
            Self::Custom(_) => ParseState::WaitVersion,
            _ => ParseState::WaitFirstParameter,
        }
    }
}

static TABLE: [Entry; 256] = build_table();

const fn build_table() -> [Entry; 256] {
    let mut table = [Entry::Unsupported; 256];
    table[ColorIndex::RESET_DEFAULT.0 as usize] = Entry::DefaultAll;

    let mut idx = 0;
    while idx < 8 {
        let standard = STANDARD_COLORS[idx];
        let bright = BRIGHT_COLORS[idx];
        table[ColorIndex::F_BLACK.0 as usize + idx] = Entry::Front(standard);
        table[ColorIndex::B_BLACK.0 as usize + idx] = Entry::Back(standard);
        table[ColorIndex::F_BRIGHT_BLACK.0 as usize + idx] = Entry::Front(bright);
        table[ColorIndex::B_BRIGHT_BLACK.0 as usize + idx] = Entry::Back(bright);
        idx += 1;
    }

    table[ColorIndex::F_CUSTOM_COLOR.0 as usize] = Entry::Custom(Layer::Front);
    table[ColorIndex::F_DEFAULT_COLOR.0 as usize] = Entry::DefaultFront;
    table[ColorIndex::B_CUSTOM_COLOR.0 as usize] = Entry::Custom(Layer::Back);
    table[ColorIndex::B_DEFAULT_COLOR.0 as usize] = Entry::DefaultBack;

    table
}

/// Read-only view over the static color table.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorTable;

impl ColorTable {
    /// Looks up the outcome for `code`. Total over the whole `u8` range.
    #[inline]
    pub fn index(code: ColorIndex) -> Entry {
        TABLE[code.0 as usize]
    }

    /// Every defined code together with its entry, in ascending order.
    pub fn entries() -> impl Iterator<Item = (ColorIndex, Entry)> {
        TABLE
            .iter()
            .enumerate()
            .filter_map(|(code, entry)| {
                let code = ColorIndex(u8::try_from(code).ok()?);
                code.is_defined().then_some((code, *entry))
            })
    }
}
