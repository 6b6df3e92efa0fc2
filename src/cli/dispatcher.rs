//! Command dispatcher
//!
//! One call per assembled line: normalize, look up, check the link,
//! parse, act, report. Nothing is retained between lines except the
//! echo flag.

use core::fmt::Write;

use super::commands::{self, Action};
use super::parser::{split_command, EchoArg};
use super::CliError;
use crate::hid::HidMouse;

pub struct Dispatcher {
    echo: bool,
}

impl Dispatcher {
    pub const fn new(echo: bool) -> Self {
        Self { echo }
    }

    pub fn echo(&self) -> bool {
        self.echo
    }

    pub fn set_echo(&mut self, enabled: bool) {
        self.echo = enabled;
    }

    /// Run one command line against `mouse`, writing feedback to `out`.
    pub fn dispatch<M: HidMouse + ?Sized>(&mut self, line: &str, mouse: &mut M, out: &mut dyn Write) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        if self.echo {
            let _ = writeln!(out, "> {}", line);
        }

        if let Err(e) = self.execute(line, mouse, out) {
            #[cfg(feature = "defmt")]
            defmt::debug!("command rejected: {}", e);
            let _ = writeln!(out, "{}", e);
            if matches!(e, CliError::UnknownCommand(_)) {
                let _ = writeln!(out, "Type 'help' for available commands");
            }
        }
    }

    fn execute<'a, M: HidMouse + ?Sized>(
        &mut self,
        line: &'a str,
        mouse: &mut M,
        out: &mut dyn Write,
    ) -> Result<(), CliError<'a>> {
        let (name, args) = split_command(line);
        let spec = commands::lookup(name).ok_or(CliError::UnknownCommand(name))?;

        if spec.command.requires_connection() && !mouse.is_connected() {
            return Err(CliError::NotConnected);
        }

        let action = spec.command.parse(args)?;
        self.run(action, mouse, out);
        Ok(())
    }

    fn run<M: HidMouse + ?Sized>(&mut self, action: Action, mouse: &mut M, out: &mut dyn Write) {
        match action {
            Action::Help => commands::write_help(out),
            Action::Status => write_status(mouse, out),
            Action::Click(button) => {
                mouse.click(button);
                let _ = writeln!(out, "{} click executed", Capitalized(button.name()));
            }
            Action::Press(button) => {
                mouse.press(button);
                let _ = writeln!(out, "Button pressed: {}", button.name());
            }
            Action::Release(button) => {
                mouse.release(button);
                let _ = writeln!(out, "Button released: {}", button.name());
            }
            Action::Move { x, y } => {
                mouse.move_by(x, y, 0, 0);
                let _ = writeln!(out, "Mouse moved: x={}, y={}", x, y);
            }
            Action::Scroll(amount) => {
                mouse.move_by(0, 0, amount, 0);
                let _ = writeln!(out, "Scrolled: {}", amount);
            }
            Action::HScroll(amount) => {
                mouse.move_by(0, 0, 0, amount);
                let _ = writeln!(out, "Horizontal scroll: {}", amount);
            }
            Action::MoveFull { x, y, wheel, pan } => {
                mouse.move_by(x, y, wheel, pan);
                let _ = writeln!(
                    out,
                    "Move full: x={}, y={}, vscroll={}, hscroll={}",
                    x, y, wheel, pan
                );
            }
            Action::Battery(level) => {
                mouse.set_battery_level(level);
                let _ = writeln!(out, "Battery level set to: {}%", level);
            }
            Action::Echo(arg) => match arg {
                EchoArg::On => {
                    self.echo = true;
                    let _ = writeln!(out, "Echo enabled");
                }
                EchoArg::Off => {
                    self.echo = false;
                    let _ = writeln!(out, "Echo disabled");
                }
                EchoArg::Query => {
                    let state = if self.echo { "on" } else { "off" };
                    let _ = writeln!(out, "Echo is currently: {}", state);
                }
            },
        }
    }
}

fn write_status<M: HidMouse + ?Sized>(mouse: &M, out: &mut dyn Write) {
    let connected = if mouse.is_connected() { "Yes" } else { "No" };
    let _ = writeln!(out);
    let _ = writeln!(out, "=== Status ===");
    let _ = writeln!(out, "BLE Connected: {}", connected);
    let _ = writeln!(out, "Device Name: {}", mouse.device_name());
    let _ = writeln!(out, "Manufacturer: {}", mouse.manufacturer());
    let _ = writeln!(out, "Battery Level: {}%", mouse.battery_level());
    let _ = writeln!(out);
}

/// Formats an ASCII word with its first letter upper-cased.
struct Capitalized(&'static str);

impl core::fmt::Display for Capitalized {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => {
                write!(f, "{}", first.to_ascii_uppercase())?;
                f.write_str(chars.as_str())
            }
            None => Ok(()),
        }
    }
}
