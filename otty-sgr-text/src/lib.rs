//! Plain text plus color spans from terminal output containing SGR
//! sequences.
//!
//! [`scan`] strips the sequences and records where each one was, and
//! [`ColorfulTextParser`] decodes them with [`otty_sgr::SgrDecoder`] while
//! threading the current attribute from run to run.

mod colorful;
mod scan;

pub use colorful::{ColorSpan, ColorfulText, ColorfulTextParser, Mode};
pub use scan::{SgrSequence, scan};
