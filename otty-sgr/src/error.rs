use thiserror::Error;

use crate::machine::ParamError;

/// Errors reported while decoding an SGR sequence or loading configuration.
#[derive(Debug, Error)]
pub enum SgrError {
    #[error("sequence too short: {len} bytes")]
    TooShort { len: usize },

    #[error("sequence does not start with ESC [")]
    InvalidIntroducer,

    #[error("unsupported final byte {0:#04x}")]
    InvalidFinalByte(u8),

    #[error("non-numeric parameter {field:?}")]
    InvalidParameter { field: String },

    #[error("parameter {field:?} does not fit in 0..=255")]
    ParameterOutOfRange { field: String },

    #[error("invalid color value {0:?}, expected #rrggbb or 0xrrggbb")]
    InvalidRgb(String),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl SgrError {
    pub(crate) fn from_param(err: ParamError, field: &[u8]) -> Self {
        let field = String::from_utf8_lossy(field).into_owned();
        match err {
            ParamError::NotNumber => Self::InvalidParameter { field },
            ParamError::OutOfRange => Self::ParameterOutOfRange { field },
        }
    }
}

pub type Result<T> = std::result::Result<T, SgrError>;
