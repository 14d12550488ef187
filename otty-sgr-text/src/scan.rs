//! Extraction of SGR sequences from a text buffer.
//!
//! A candidate sequence matches
//! `ESC '[' ([0-9]{0,4} ([;:] [0-9]{1,3})*)? [mK]`. Matching sequences are
//! removed from the text; every other byte, including escapes that do not
//! match, stays visible.

use log::trace;
use otty_sgr::{CSI, ESC};

/// Maximum digits in the first field of a sequence.
const MAX_FIRST_DIGITS: usize = 4;

/// Maximum digits in every following field.
const MAX_FIELD_DIGITS: usize = 3;

/// SGR sequence found in a text buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SgrSequence {
    /// Byte offset in the text with all sequences removed.
    pub offset: usize,
    /// The raw sequence including `ESC [` and the final byte.
    pub text: String,
}

/// Remove every SGR sequence from `text`.
///
/// Returns the visible text together with the sequences in order of
/// appearance.
pub fn scan(text: &str) -> (String, Vec<SgrSequence>) {
    let bytes = text.as_bytes();
    let mut visible = String::with_capacity(text.len());
    let mut sequences = Vec::new();
    let mut copied = 0;

    for start in memchr::memchr_iter(ESC, bytes) {
        // Escapes inside an already consumed sequence cannot occur since a
        // match only spans ASCII digits and separators.
        if start < copied {
            continue;
        }

        let Some(len) = match_sequence(&bytes[start..]) else {
            trace!("escape at {start} is not an sgr sequence");
            continue;
        };

        // `start` and `start + len` sit on ASCII bytes, so both are char
        // boundaries.
        visible.push_str(&text[copied..start]);
        sequences.push(SgrSequence {
            offset: visible.len(),
            text: text[start..start + len].to_owned(),
        });
        copied = start + len;
    }

    visible.push_str(&text[copied..]);
    (visible, sequences)
}

/// Length of the sequence at the start of `bytes`, if it matches.
fn match_sequence(bytes: &[u8]) -> Option<usize> {
    if bytes.len() < 3 || bytes[0] != ESC || bytes[1] != CSI {
        return None;
    }

    let mut pos = 2;
    pos += count_digits(&bytes[pos..], MAX_FIRST_DIGITS);

    loop {
        match bytes.get(pos)? {
            b'm' | b'K' => return Some(pos + 1),
            b';' | b':' => {
                let digits = count_digits(&bytes[pos + 1..], MAX_FIELD_DIGITS);
                if digits == 0 {
                    return None;
                }
                pos += 1 + digits;
            },
            _ => return None,
        }
    }
}

fn count_digits(bytes: &[u8], max: usize) -> usize {
    bytes
        .iter()
        .take(max)
        .take_while(|byte| byte.is_ascii_digit())
        .count()
}
