//! Command table and argument schemas
//!
//! Each entry maps a name and its aliases to a [`Command`]. Parsing an
//! argument tail turns a `Command` into a fully clamped [`Action`]; the
//! dispatcher runs actions against the peripheral.

use core::fmt::Write;

use super::parser::{clamp, parse_numbers, EchoArg};
use super::CliError;
use crate::config::{AXIS_MAX, AXIS_MIN, BATTERY_MAX, BATTERY_MIN, DEFAULT_BATTERY_LEVEL};
use crate::hid::MouseButton;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    Help,
    Status,
    Click,
    Press,
    Release,
    Move,
    Scroll,
    HScroll,
    MoveFull,
    Battery,
    Echo,
}

/// Command descriptor
pub struct CommandSpec {
    pub command: Command,
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub usage: &'static str,
    pub brief: &'static str,
}

/// All available commands
pub static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        command: Command::Help,
        name: "help",
        aliases: &["h", "?"],
        usage: "help",
        brief: "Show this help message",
    },
    CommandSpec {
        command: Command::Status,
        name: "status",
        aliases: &["stat"],
        usage: "status",
        brief: "Show connection status",
    },
    CommandSpec {
        command: Command::Click,
        name: "click",
        aliases: &[],
        usage: "click [button]",
        brief: "Click mouse button",
    },
    CommandSpec {
        command: Command::Press,
        name: "press",
        aliases: &[],
        usage: "press [button]",
        brief: "Press and hold button",
    },
    CommandSpec {
        command: Command::Release,
        name: "release",
        aliases: &[],
        usage: "release [button]",
        brief: "Release button",
    },
    CommandSpec {
        command: Command::Move,
        name: "move",
        aliases: &[],
        usage: "move <x> <y>",
        brief: "Move mouse pointer (relative)",
    },
    CommandSpec {
        command: Command::Scroll,
        name: "scroll",
        aliases: &[],
        usage: "scroll <amount>",
        brief: "Scroll vertically (positive=up, negative=down)",
    },
    CommandSpec {
        command: Command::HScroll,
        name: "hscroll",
        aliases: &["hs"],
        usage: "hscroll <amount>",
        brief: "Scroll horizontally (positive=right, negative=left)",
    },
    CommandSpec {
        command: Command::MoveFull,
        name: "movefull",
        aliases: &[],
        usage: "movefull <x> <y> <v> <h>",
        brief: "Move with all parameters (x, y, vscroll, hscroll)",
    },
    CommandSpec {
        command: Command::Battery,
        name: "battery",
        aliases: &[],
        usage: "battery <level>",
        brief: "Set battery level (0-100)",
    },
    CommandSpec {
        command: Command::Echo,
        name: "echo",
        aliases: &[],
        usage: "echo [on|off]",
        brief: "Enable/disable command echo",
    },
];

const HELP_EXAMPLES: &[&str] = &[
    "click left",
    "move 10 20",
    "scroll -5",
    "hs 3",
    "movefull 5 5 0 0",
    "battery 75",
];

/// Find a command by name or alias, ignoring case.
pub fn lookup(token: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| {
        spec.name.eq_ignore_ascii_case(token)
            || spec.aliases.iter().any(|a| a.eq_ignore_ascii_case(token))
    })
}

/// Every name and alias in the table.
pub fn command_names() -> impl Iterator<Item = &'static str> {
    COMMANDS
        .iter()
        .flat_map(|spec| core::iter::once(spec.name).chain(spec.aliases.iter().copied()))
}

/// A command with its arguments resolved and clamped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    Help,
    Status,
    Click(MouseButton),
    Press(MouseButton),
    Release(MouseButton),
    Move { x: i8, y: i8 },
    Scroll(i8),
    HScroll(i8),
    MoveFull { x: i8, y: i8, wheel: i8, pan: i8 },
    Battery(u8),
    Echo(EchoArg),
}

impl Command {
    /// Commands that act on the host and so need a live connection.
    pub fn requires_connection(self) -> bool {
        matches!(
            self,
            Command::Click
                | Command::Press
                | Command::Release
                | Command::Move
                | Command::Scroll
                | Command::HScroll
                | Command::MoveFull
        )
    }

    /// Parse the argument tail for this command.
    pub fn parse(self, args: &str) -> Result<Action, CliError<'_>> {
        let action = match self {
            Command::Help => Action::Help,
            Command::Status => Action::Status,
            Command::Click => Action::Click(parse_button(args)?),
            Command::Press => Action::Press(parse_button(args)?),
            Command::Release => Action::Release(parse_button(args)?),
            Command::Move => {
                let [x, y] = parse_numbers::<2>(args, 0)?;
                Action::Move {
                    x: axis(x),
                    y: axis(y),
                }
            }
            Command::Scroll => {
                let [amount] = parse_numbers::<1>(args, 0)?;
                Action::Scroll(axis(amount))
            }
            Command::HScroll => {
                let [amount] = parse_numbers::<1>(args, 0)?;
                Action::HScroll(axis(amount))
            }
            Command::MoveFull => {
                let [x, y, wheel, pan] = parse_numbers::<4>(args, 0)?;
                Action::MoveFull {
                    x: axis(x),
                    y: axis(y),
                    wheel: axis(wheel),
                    pan: axis(pan),
                }
            }
            Command::Battery => {
                let [level] = parse_numbers::<1>(args, i32::from(DEFAULT_BATTERY_LEVEL))?;
                Action::Battery(clamp(level, BATTERY_MIN, BATTERY_MAX) as u8)
            }
            Command::Echo => Action::Echo(EchoArg::parse(args)),
        };
        Ok(action)
    }
}

fn parse_button(args: &str) -> Result<MouseButton, CliError<'_>> {
    MouseButton::resolve(args).ok_or(CliError::InvalidButton(args.trim()))
}

fn axis(value: i32) -> i8 {
    clamp(value, AXIS_MIN, AXIS_MAX) as i8
}

/// Write the command reference.
pub fn write_help(out: &mut dyn Write) {
    let _ = writeln!(out);
    let _ = writeln!(out, "=== Available Commands ===");
    for spec in COMMANDS {
        let _ = write!(out, "  {:<26}- {}", spec.usage, spec.brief);
        if !spec.aliases.is_empty() {
            let _ = write!(out, " (alias:");
            for alias in spec.aliases {
                let _ = write!(out, " {}", alias);
            }
            let _ = write!(out, ")");
        }
        let _ = writeln!(out);
        if matches!(spec.command, Command::Click) {
            let _ = writeln!(
                out,
                "  {:<26}- Options: left, right, middle, back, forward",
                ""
            );
        }
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Examples:");
    for example in HELP_EXAMPLES {
        let _ = writeln!(out, "  {}", example);
    }
    let _ = writeln!(out);
}
