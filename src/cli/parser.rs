//! Command line tokenizing and argument parsing
//!
//! Split at the first space into command name and argument tail, then
//! parse the tail per command. Numbers are base-10 and clamped by the
//! caller; a token that is not a number is an error, never zero.

use core::num::IntErrorKind;

use super::CliError;

/// Split a trimmed line into `(command, argument tail)`.
///
/// The tail is everything after the first space, untouched.
pub fn split_command(line: &str) -> (&str, &str) {
    match line.find(' ') {
        Some(idx) => (&line[..idx], &line[idx + 1..]),
        None => (line, ""),
    }
}

/// Parse a base-10 integer, or `default` if the token is empty.
///
/// Values beyond `i32` saturate; anything non-numeric is
/// [`CliError::InvalidNumber`].
pub fn parse_number(token: &str, default: i32) -> Result<i32, CliError<'_>> {
    let token = token.trim();
    if token.is_empty() {
        return Ok(default);
    }
    match token.parse::<i32>() {
        Ok(value) => Ok(value),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(i32::MAX),
            IntErrorKind::NegOverflow => Ok(i32::MIN),
            _ => Err(CliError::InvalidNumber(token)),
        },
    }
}

/// Clamp into `[min, max]`. Never fails.
pub fn clamp(value: i32, min: i32, max: i32) -> i32 {
    value.clamp(min, max)
}

/// Parse up to `N` whitespace-separated numbers. Missing tokens take
/// `default`; extra tokens are ignored.
pub fn parse_numbers<const N: usize>(args: &str, default: i32) -> Result<[i32; N], CliError<'_>> {
    let mut values = [default; N];
    for (slot, token) in values.iter_mut().zip(args.split_whitespace()) {
        *slot = parse_number(token, default)?;
    }
    Ok(values)
}

/// Argument of the `echo` command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EchoArg {
    On,
    Off,
    /// Anything else, including no argument: report current state.
    Query,
}

impl EchoArg {
    pub fn parse(arg: &str) -> Self {
        let arg = arg.trim();
        if ["on", "1", "true"].iter().any(|w| arg.eq_ignore_ascii_case(w)) {
            EchoArg::On
        } else if ["off", "0", "false"].iter().any(|w| arg.eq_ignore_ascii_case(w)) {
            EchoArg::Off
        } else {
            EchoArg::Query
        }
    }
}
