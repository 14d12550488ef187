//! Field-by-field state machine for the parameters of one SGR sequence.
//!
//! The machine consumes the `;`/`:` separated fields of a sequence body one
//! at a time. Single-field codes are resolved through the
//! [`ColorTable`](crate::ColorTable); the `38`/`48` introducers switch into
//! the 8-bit (`5;N`) or 24-bit (`2;R;G;B`) sub-protocols which need more
//! fields.
//!
//! Each step is a pure transition from one [`SgrMachine`] value to the next,
//! so the machine owns nothing but a handful of scalars.

use log::{debug, trace};

use crate::color::Rgb;
use crate::table::{BRIGHT_COLORS, ColorIndex, ColorTable, STANDARD_COLORS};

/// Break points of the 6x6x6 color cube in the 256-color palette.
const CUBE_STEPS: [u8; 6] = [0, 95, 135, 175, 215, 255];

/// First palette index of the grayscale ramp.
const GRAYSCALE_START: u8 = 232;

/// Kind of change requested by the field(s) consumed so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseResult {
    FrontColor,
    BackColor,
    DefaultFrontColor,
    DefaultBackColor,
    DefaultTextAttr,
    /// Keep the attribute that was active before this step.
    CurrentTextAttr,
    UnsupportedAttr,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseState {
    #[default]
    WaitFirstParameter,
    WaitVersion,
    WaitBit8Args,
    WaitBit24ArgsR,
    WaitBit24ArgsG,
    WaitBit24ArgsB,
}

/// Second field after a `38`/`48` introducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorVersion {
    Bit8 = 5,
    Bit24 = 2,
}

impl ColorVersion {
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            5 => Some(Self::Bit8),
            2 => Some(Self::Bit24),
            _ => None,
        }
    }
}

/// Reason a field could not be turned into a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamError {
    NotNumber,
    OutOfRange,
}

/// What the caller should do after feeding a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// A complete result is ready.
    SuccessBreak,
    /// Partial progress, feed the next field.
    SuccessContinue,
    /// The field is malformed; the whole sequence must be discarded.
    ErrorBreak(ParamError),
    /// The field was skipped; decoding resumes with the next field.
    ErrorContinue,
}

impl Control {
    #[inline]
    pub fn is_break(self) -> bool {
        matches!(self, Self::SuccessBreak | Self::ErrorBreak(_))
    }
}

/// Converts one field to a parameter value in `0..=255`.
///
/// The empty field is handled by the caller since its meaning depends on the
/// current state.
pub(crate) fn parse_param(field: &[u8]) -> Result<u8, ParamError> {
    if field.is_empty() || !field.iter().all(u8::is_ascii_digit) {
        return Err(ParamError::NotNumber);
    }

    field.iter().try_fold(0u8, |acc, &b| {
        acc.checked_mul(10)
            .and_then(|acc| acc.checked_add(b - b'0'))
            .ok_or(ParamError::OutOfRange)
    })
}

/// Resolves an index of the 256-color palette.
pub fn palette_color(index: u8) -> Rgb {
    match index {
        0..=7 => STANDARD_COLORS[index as usize],
        8..=15 => BRIGHT_COLORS[index as usize - 8],
        GRAYSCALE_START..=u8::MAX => {
            Rgb::gray((index - GRAYSCALE_START) * 10 + 8)
        },
        _ => {
            let cube = index - 16;
            let rest = cube % 36;
            Rgb::new(
                CUBE_STEPS[(cube / 36) as usize],
                CUBE_STEPS[(rest / 6) as usize],
                CUBE_STEPS[(rest % 6) as usize],
            )
        },
    }
}

/// Decoder state for a single attribute slot of an SGR sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SgrMachine {
    state: ParseState,
    result: ParseResult,
    color: Rgb,
    bit24_valid: bool,
}

impl Default for SgrMachine {
    fn default() -> Self {
        Self {
            state: ParseState::WaitFirstParameter,
            result: ParseResult::CurrentTextAttr,
            color: Rgb::default(),
            bit24_valid: true,
        }
    }
}

impl SgrMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Outcome produced by the last consumed field.
    #[inline]
    pub fn result(&self) -> ParseResult {
        self.result
    }

    /// Color accumulated so far.
    ///
    /// Only meaningful once [`Self::result`] is a color kind and the state
    /// is back at [`ParseState::WaitFirstParameter`].
    #[inline]
    pub fn color(&self) -> Rgb {
        self.color
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Feed the next field and update the machine in place.
    pub fn consume(&mut self, field: &[u8]) -> Control {
        let (next, control) = self.transition(field);
        trace!(
            "sgr field {:?}: {:?} -> {:?}, {:?}",
            String::from_utf8_lossy(field),
            self.state,
            next.state,
            control
        );
        *self = next;
        control
    }

    /// Compute the machine that results from feeding `field` to `self`.
    #[must_use]
    pub fn transition(self, field: &[u8]) -> (Self, Control) {
        match self.state {
            ParseState::WaitFirstParameter => self.first_parameter(field),
            ParseState::WaitVersion => self.color_version(field),
            ParseState::WaitBit8Args => self.bit8_color(field),
            ParseState::WaitBit24ArgsR
            | ParseState::WaitBit24ArgsG
            | ParseState::WaitBit24ArgsB => self.bit24_color(field),
        }
    }

    fn first_parameter(self, field: &[u8]) -> (Self, Control) {
        // An omitted parameter means `0`.
        if field.is_empty() {
            let next = Self {
                result: ParseResult::DefaultTextAttr,
                ..Self::default()
            };
            return (next, Control::SuccessBreak);
        }

        let code = match parse_param(field) {
            Ok(code) => code,
            Err(err) => return self.abort(err),
        };

        let entry = ColorTable::index(ColorIndex(code));
        let next = Self {
            state: entry.resume_state(),
            result: entry.result(),
            color: entry.rgb().unwrap_or_default(),
            bit24_valid: true,
        };

        if next.result == ParseResult::UnsupportedAttr {
            debug!("skipping unsupported sgr parameter {code}");
        }

        match next.state {
            ParseState::WaitFirstParameter => (next, Control::SuccessBreak),
            _ => (next, Control::SuccessContinue),
        }
    }

    fn color_version(self, field: &[u8]) -> (Self, Control) {
        if field.is_empty() {
            debug!("custom color abandoned: empty version field");
            return self.skip();
        }

        let version = match parse_param(field) {
            Ok(value) => value,
            Err(err) => return self.abort(err),
        };

        let state = match ColorVersion::from_code(version) {
            Some(ColorVersion::Bit8) => ParseState::WaitBit8Args,
            Some(ColorVersion::Bit24) => ParseState::WaitBit24ArgsR,
            None => {
                debug!("custom color abandoned: unknown version {version}");
                return self.skip();
            },
        };

        (Self { state, ..self }, Control::SuccessContinue)
    }

    fn bit8_color(self, field: &[u8]) -> (Self, Control) {
        if field.is_empty() {
            debug!("8-bit color abandoned: empty palette index");
            return self.skip();
        }

        let index = match parse_param(field) {
            Ok(value) => value,
            Err(err) => return self.abort(err),
        };

        // Only the RGB is taken from the palette; the front/back kind of the
        // introducer is kept.
        let next = Self {
            state: ParseState::WaitFirstParameter,
            color: palette_color(index),
            ..self
        };
        (next, Control::SuccessBreak)
    }

    fn bit24_color(self, field: &[u8]) -> (Self, Control) {
        let mut next = self;
        if field.is_empty() {
            // One missing channel invalidates the whole 24-bit color.
            next.bit24_valid = false;
        }

        let value = if next.bit24_valid {
            match parse_param(field) {
                Ok(value) => value,
                Err(err) => return self.abort(err),
            }
        } else {
            0
        };

        match next.state {
            ParseState::WaitBit24ArgsR => {
                next.color.r = value;
                next.state = ParseState::WaitBit24ArgsG;
            },
            ParseState::WaitBit24ArgsG => {
                next.color.g = value;
                next.state = ParseState::WaitBit24ArgsB;
            },
            _ => {
                next.color.b = value;
                next.state = ParseState::WaitFirstParameter;
            },
        }

        let done = next.state == ParseState::WaitFirstParameter;
        match (next.bit24_valid, done) {
            (true, true) => (next, Control::SuccessBreak),
            (true, false) => (next, Control::SuccessContinue),
            (false, done) => {
                next.result = ParseResult::CurrentTextAttr;
                if done {
                    debug!("24-bit color dropped: missing channel");
                    next.bit24_valid = true;
                }
                (next, Control::ErrorContinue)
            },
        }
    }

    /// Abandon the pending request and start over with the next field.
    fn skip(self) -> (Self, Control) {
        (Self::default(), Control::ErrorContinue)
    }

    /// Stop on a malformed field, keeping the current attribute.
    fn abort(self, err: ParamError) -> (Self, Control) {
        let next = Self {
            result: ParseResult::CurrentTextAttr,
            ..Self::default()
        };
        (next, Control::ErrorBreak(err))
    }
}
