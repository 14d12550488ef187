use log::debug;
use otty_sgr::{Color, DecodeStatus, SgrConfig, SgrDecoder, TextAttribute};

use crate::scan::{SgrSequence, scan};

/// Which runs of text get a [`ColorSpan`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Only runs whose attribute was set by a sequence.
    MarkedText,
    /// Every run, so the spans cover the whole text.
    #[default]
    AllText,
}

/// Run of `len` bytes starting at `start` rendered with `color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorSpan {
    pub color: Color,
    pub start: usize,
    pub len: usize,
}

impl ColorSpan {
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Visible text of one input together with its color spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorfulText {
    pub text: String,
    pub spans: Vec<ColorSpan>,
}

/// Splits colored terminal text into plain text and color spans.
///
/// The current attribute carries over from one call to the next, so the
/// lines of a stream can be fed one by one.
#[derive(Debug, Clone)]
pub struct ColorfulTextParser {
    current: TextAttribute,
    decoder: SgrDecoder,
}

impl ColorfulTextParser {
    pub fn new(default_attr: TextAttribute, current_attr: TextAttribute) -> Self {
        Self {
            current: current_attr,
            decoder: SgrDecoder::new(default_attr),
        }
    }

    pub fn from_config(config: &SgrConfig) -> Self {
        Self::new(config.default_attr, config.initial_attr)
    }

    /// Attribute in effect at the end of the last parsed text.
    #[inline]
    pub fn current_attr(&self) -> &TextAttribute {
        &self.current
    }

    pub fn parse(&mut self, input: &str, mode: Mode) -> ColorfulText {
        let (text, sequences) = scan(input);
        let spans = self.spans(&sequences, text.len(), mode);
        ColorfulText { text, spans }
    }

    pub fn parse_lines<S: AsRef<str>>(
        &mut self,
        lines: &[S],
        mode: Mode,
    ) -> Vec<ColorfulText> {
        lines
            .iter()
            .map(|line| self.parse(line.as_ref(), mode))
            .collect()
    }

    fn spans(
        &mut self,
        sequences: &[SgrSequence],
        text_len: usize,
        mode: Mode,
    ) -> Vec<ColorSpan> {
        let mut spans = Vec::with_capacity(sequences.len() + 1);
        let mut pos = 0;

        for sequence in sequences {
            self.push_run(&mut spans, pos, sequence.offset, mode);

            let (status, attr) =
                self.decoder.decode(&self.current, &sequence.text);
            if status == DecodeStatus::Error {
                debug!(
                    "keeping current attribute at byte {}",
                    sequence.offset
                );
            }
            self.current = attr;
            pos = sequence.offset;
        }

        self.push_run(&mut spans, pos, text_len, mode);
        spans
    }

    fn push_run(
        &self,
        spans: &mut Vec<ColorSpan>,
        start: usize,
        end: usize,
        mode: Mode,
    ) {
        if end <= start {
            return;
        }

        if mode == Mode::MarkedText && !self.current.is_custom() {
            return;
        }

        spans.push(ColorSpan {
            color: self.current.color,
            start,
            len: end - start,
        });
    }
}

impl Default for ColorfulTextParser {
    fn default() -> Self {
        Self::from_config(&SgrConfig::default())
    }
}
