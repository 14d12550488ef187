//! Decoder for SGR (Select Graphic Rendition) color sequences.
//!
//! [`SgrDecoder`] validates an `ESC [ ... m` sequence, splits its body on
//! `;`/`:` and feeds each field to an [`SgrMachine`]. Completed results are
//! merged into a [`TextAttribute`]: 3/4-bit colors come from the static
//! [`ColorTable`], `38;5;N`/`48;5;N` from the 256-color palette and
//! `38;2;R;G;B`/`48;2;R;G;B` are taken verbatim.

mod color;
mod config;
mod decoder;
mod error;
mod machine;
mod table;

pub use color::{AttrState, Color, Rgb, TextAttribute};
pub use config::SgrConfig;
pub use decoder::{CSI, DecodeStatus, ESC, SGR_FINAL, SgrDecoder};
pub use error::{Result, SgrError};
pub use machine::{
    ColorVersion, Control, ParamError, ParseResult, ParseState, SgrMachine,
    palette_color,
};
pub use table::{ColorIndex, ColorTable, Entry, Layer};
