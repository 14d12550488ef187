//! Decoding of complete `ESC [ ... m` sequences into a [`TextAttribute`].

use log::{debug, warn};

use crate::color::{AttrState, TextAttribute};
use crate::config::SgrConfig;
use crate::error::{Result, SgrError};
use crate::machine::{Control, ParseResult, ParseState, SgrMachine};

/// Escape byte starting every sequence.
pub const ESC: u8 = 0x1B;

/// Second byte of a Control Sequence Introducer.
pub const CSI: u8 = b'[';

/// Final byte of an SGR sequence.
pub const SGR_FINAL: u8 = b'm';

/// Number of bytes in the `ESC [` introducer.
const HEAD_LEN: usize = 2;

/// Field separators accepted inside the sequence body.
const SEPARATORS: [u8; 2] = [b';', b':'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStatus {
    Success,
    Error,
}

/// Applies SGR sequences to a caller supplied attribute.
///
/// The decoder keeps no session state: the attribute active before a
/// sequence is passed in and the updated one is returned, so callers thread
/// it through successive sequences themselves.
#[derive(Debug, Clone, Default)]
pub struct SgrDecoder {
    default_attr: TextAttribute,
}

impl SgrDecoder {
    /// Creates a decoder that resets to `default_attr`.
    ///
    /// The attribute is stored in the [`AttrState::Default`] state whatever
    /// state it was given in.
    pub fn new(default_attr: TextAttribute) -> Self {
        Self {
            default_attr: TextAttribute::new(
                AttrState::Default,
                default_attr.color,
            ),
        }
    }

    pub fn from_config(config: &SgrConfig) -> Self {
        Self::new(config.default_attr)
    }

    #[inline]
    pub fn default_attr(&self) -> &TextAttribute {
        &self.default_attr
    }

    /// Decode `sequence` on top of `current`.
    ///
    /// On error `current` is left as it was; no partially applied field is
    /// visible to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error when the envelope is not `ESC [ ... m` or when a
    /// field is non-numeric or larger than 255.
    pub fn parse_sequence(
        &self,
        current: &TextAttribute,
        sequence: impl AsRef<[u8]>,
    ) -> Result<TextAttribute> {
        let body = Self::body(sequence.as_ref())?;

        let mut attr = *current;
        let mut machine = SgrMachine::new();

        for field in body.split(|byte| SEPARATORS.contains(byte)) {
            match machine.consume(field) {
                Control::SuccessBreak => {
                    self.apply(&machine, &mut attr);
                    machine.reset();
                },
                Control::ErrorBreak(err) => {
                    return Err(SgrError::from_param(err, field));
                },
                Control::SuccessContinue | Control::ErrorContinue => {},
            }
        }

        if machine.state() != ParseState::WaitFirstParameter {
            debug!(
                "sgr sequence ended in {:?}, pending color dropped",
                machine.state()
            );
        }

        Ok(attr)
    }

    /// Decode `sequence` and report the outcome as a status pair.
    ///
    /// The returned attribute equals `current` whenever the status is
    /// [`DecodeStatus::Error`].
    pub fn decode(
        &self,
        current: &TextAttribute,
        sequence: impl AsRef<[u8]>,
    ) -> (DecodeStatus, TextAttribute) {
        let sequence = sequence.as_ref();
        match self.parse_sequence(current, sequence) {
            Ok(attr) => (DecodeStatus::Success, attr),
            Err(err) => {
                warn!(
                    "dropping sgr sequence {:?}: {err}",
                    String::from_utf8_lossy(sequence)
                );
                (DecodeStatus::Error, *current)
            },
        }
    }

    /// Strip the envelope and return the parameter bytes.
    fn body(sequence: &[u8]) -> Result<&[u8]> {
        if sequence.len() < HEAD_LEN + 1 {
            return Err(SgrError::TooShort {
                len: sequence.len(),
            });
        }

        if sequence[..HEAD_LEN] != [ESC, CSI] {
            return Err(SgrError::InvalidIntroducer);
        }

        match sequence.split_last() {
            Some((&SGR_FINAL, rest)) => Ok(&rest[HEAD_LEN..]),
            Some((&byte, _)) => Err(SgrError::InvalidFinalByte(byte)),
            None => Err(SgrError::TooShort { len: 0 }),
        }
    }

    /// Merge a completed machine result into `attr`.
    fn apply(&self, machine: &SgrMachine, attr: &mut TextAttribute) {
        match machine.result() {
            ParseResult::FrontColor => {
                attr.state = AttrState::Custom;
                attr.color.front = machine.color();
            },
            ParseResult::BackColor => {
                attr.state = AttrState::Custom;
                attr.color.back = machine.color();
            },
            ParseResult::DefaultFrontColor => {
                attr.color.front = self.default_attr.color.front;
            },
            ParseResult::DefaultBackColor => {
                attr.color.back = self.default_attr.color.back;
            },
            ParseResult::DefaultTextAttr => *attr = self.default_attr,
            ParseResult::CurrentTextAttr | ParseResult::UnsupportedAttr => {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{Color, Rgb};

    fn decoder() -> SgrDecoder {
        SgrDecoder::new(TextAttribute::default())
    }

    fn custom(front: Rgb, back: Rgb) -> TextAttribute {
        TextAttribute::with_custom(Color::new(front, back))
    }

    #[test]
    fn rejects_short_sequence() {
        let current = custom(Rgb::gray(3), Rgb::gray(4));
        let err = decoder().parse_sequence(&current, b"\x1b[").unwrap_err();

        assert!(matches!(err, SgrError::TooShort { len: 2 }));
    }

    #[test]
    fn rejects_missing_csi() {
        let err = decoder()
            .parse_sequence(&TextAttribute::default(), b"\x1b]31m")
            .unwrap_err();

        assert!(matches!(err, SgrError::InvalidIntroducer));
    }

    #[test]
    fn rejects_erase_line_final_byte() {
        let current = custom(Rgb::gray(3), Rgb::gray(4));
        let (status, attr) = decoder().decode(&current, b"\x1b[K");

        assert_eq!(status, DecodeStatus::Error);
        assert_eq!(attr, current);
    }

    #[test]
    fn empty_body_resets_to_default() {
        let current = custom(Rgb::gray(3), Rgb::gray(4));
        let attr = decoder().parse_sequence(&current, b"\x1b[m").unwrap();

        assert_eq!(attr, TextAttribute::default());
    }

    #[test]
    fn combined_front_and_back() {
        let attr = decoder()
            .parse_sequence(&TextAttribute::default(), b"\x1b[31;42m")
            .unwrap();

        assert_eq!(attr.state, AttrState::Custom);
        assert_eq!(attr.color.front, Rgb::new(222, 56, 43));
        assert_eq!(attr.color.back, Rgb::new(57, 181, 74));
    }

    #[test]
    fn default_front_keeps_back_and_state() {
        let current = custom(Rgb::gray(3), Rgb::gray(4));
        let attr = decoder().parse_sequence(&current, b"\x1b[39m").unwrap();

        assert_eq!(attr.state, AttrState::Custom);
        assert_eq!(attr.color.front, Color::default().front);
        assert_eq!(attr.color.back, Rgb::gray(4));
    }

    #[test]
    fn default_back_keeps_front() {
        let current = custom(Rgb::gray(3), Rgb::gray(4));
        let attr = decoder().parse_sequence(&current, b"\x1b[49m").unwrap();

        assert_eq!(attr.color.front, Rgb::gray(3));
        assert_eq!(attr.color.back, Color::default().back);
    }

    #[test]
    fn colon_separated_truecolor() {
        let attr = decoder()
            .parse_sequence(&TextAttribute::default(), b"\x1b[48:2:1:2:3m")
            .unwrap();

        assert_eq!(attr.color.back, Rgb::new(1, 2, 3));
    }

    #[test]
    fn error_discards_earlier_fields() {
        let current = TextAttribute::default();
        let err = decoder()
            .parse_sequence(&current, b"\x1b[31;42;4x4m")
            .unwrap_err();

        assert!(matches!(
            err,
            SgrError::InvalidParameter { ref field } if field == "4x4"
        ));
        assert_eq!(
            decoder().decode(&current, b"\x1b[31;42;4x4m"),
            (DecodeStatus::Error, current)
        );
    }

    #[test]
    fn abandoned_custom_color_resumes_with_next_field() {
        // `38;;` is dropped, `32` still applies.
        let attr = decoder()
            .parse_sequence(&TextAttribute::default(), b"\x1b[38;;32m")
            .unwrap();

        assert_eq!(attr.color.front, Rgb::new(57, 181, 74));
    }

    #[test]
    fn default_attr_is_normalised() {
        let colors = Color::new(Rgb::gray(9), Rgb::gray(10));
        let decoder = SgrDecoder::new(TextAttribute::with_custom(colors));

        assert_eq!(decoder.default_attr().state, AttrState::Default);
        assert_eq!(decoder.default_attr().color, colors);
    }
}
