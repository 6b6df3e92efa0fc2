//! Console error types
//!
//! Every variant is recoverable: the offending command is skipped and one
//! error line is printed. Tokens are borrowed from the input line, so no
//! allocation is needed to report them.

use core::fmt;

use crate::config::LINE_MAX_LEN;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CliError<'a> {
    /// E01: Command needs a connected host
    NotConnected,
    /// E02: Button name not recognised
    InvalidButton(&'a str),
    /// E03: Token is not a base-10 integer
    InvalidNumber(&'a str),
    /// E04: No command or alias matches
    UnknownCommand(&'a str),
    /// E05: Input line exceeded the buffer and was discarded
    LineTooLong { max: usize },
}

impl CliError<'_> {
    /// Overflow error for the configured line limit.
    pub const fn line_too_long() -> CliError<'static> {
        CliError::LineTooLong { max: LINE_MAX_LEN }
    }

    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotConnected => "E01",
            Self::InvalidButton(_) => "E02",
            Self::InvalidNumber(_) => "E03",
            Self::UnknownCommand(_) => "E04",
            Self::LineTooLong { .. } => "E05",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::NotConnected => "not connected to host",
            Self::InvalidButton(_) => "invalid button",
            Self::InvalidNumber(_) => "invalid number",
            Self::UnknownCommand(_) => "unknown command",
            Self::LineTooLong { .. } => "input line too long",
        }
    }
}

impl fmt::Display for CliError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error {}: {}", self.code(), self.message())?;
        match self {
            Self::NotConnected => Ok(()),
            Self::InvalidButton(token) => write!(
                f,
                " '{}'. Use: left, right, middle, back, forward",
                token
            ),
            Self::InvalidNumber(token) => write!(f, " '{}'", token),
            Self::UnknownCommand(token) => write!(f, " '{}'", token),
            Self::LineTooLong { max } => write!(f, " (max {} chars), discarded", max),
        }
    }
}
