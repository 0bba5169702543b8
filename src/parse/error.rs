use std::{error::Error as StdError, fmt, io::Error as IoError, num::ParseFloatError};

use super::GameMode;

/// `Result<_, ParseError>`
pub type ParseResult<T> = Result<T, ParseError>;

/// Anything that could go wrong while parsing a [`Beatmap`](crate::Beatmap).
#[derive(Debug)]
pub enum ParseError {
    /// Some IO operation failed.
    IoError(IoError),
    /// The initial data of an `.osu` file was incorrect.
    IncorrectFileHeader,
    /// A difficulty value could not be parsed into a decimal number.
    InvalidDecimalNumber(ParseFloatError),
    /// The rounded circle size is no valid amount of keys.
    InvalidKeyCount(f64),
    /// The mode could not be recognized.
    InvalidMode,
    /// A required field is missing.
    MissingField(&'static str),
    /// The map belongs to a mode other than osu!mania.
    UnsupportedMode(GameMode),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IoError(_) => f.write_str("IO error"),
            Self::IncorrectFileHeader => {
                write!(f, "expected `osu file format v` at file begin")
            }
            Self::InvalidDecimalNumber(_) => f.write_str("invalid float number"),
            Self::InvalidKeyCount(keys) => {
                write!(f, "invalid key count {keys}, must be between 1 and 18")
            }
            Self::InvalidMode => f.write_str("invalid mode"),
            Self::MissingField(field) => write!(f, "missing field `{field}`"),
            Self::UnsupportedMode(mode) => {
                write!(f, "can only handle osu!mania maps, got {mode:?}")
            }
        }
    }
}

impl StdError for ParseError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::IoError(inner) => Some(inner),
            Self::InvalidDecimalNumber(inner) => Some(inner),
            Self::IncorrectFileHeader
            | Self::InvalidKeyCount(_)
            | Self::InvalidMode
            | Self::MissingField(_)
            | Self::UnsupportedMode(_) => None,
        }
    }
}

impl From<IoError> for ParseError {
    fn from(other: IoError) -> Self {
        Self::IoError(other)
    }
}

impl From<ParseFloatError> for ParseError {
    fn from(other: ParseFloatError) -> Self {
        Self::InvalidDecimalNumber(other)
    }
}
