//! Serial command interpreter for the BLE mouse.
//!
//! ## Components
//!
//! - **Line assembler**: bytes → bounded line buffer → complete lines
//! - **Dispatcher**: line → command table lookup → [`HidMouse`] action
//!   + one line of feedback
//!
//! [`Cli`] wires the two together around a peripheral handle. It never
//! blocks: [`Cli::poll`] handles exactly the bytes it is given.

pub mod commands;
pub mod dispatcher;
pub mod error;
pub mod line_buffer;
pub mod output;
pub mod parser;


use core::fmt::Write;

pub use commands::{lookup, Action, Command, CommandSpec, COMMANDS};
pub use dispatcher::Dispatcher;
pub use error::CliError;
pub use line_buffer::{LineAssembler, LineEvent};
pub use output::OutputBuffer;
pub use parser::{parse_number, split_command, EchoArg};

use crate::config::CliConfig;
use crate::hid::HidMouse;

/// Console state: peripheral handle, input line, echo flag.
pub struct Cli<M: HidMouse> {
    mouse: M,
    line: LineAssembler,
    dispatcher: Dispatcher,
}

impl<M: HidMouse> Cli<M> {
    pub fn new(mouse: M, config: &CliConfig) -> Self {
        Self {
            mouse,
            line: LineAssembler::new(),
            dispatcher: Dispatcher::new(config.echo),
        }
    }

    /// Print welcome banner
    pub fn begin(&self, out: &mut dyn Write) {
        let _ = writeln!(out);
        let _ = writeln!(out, "=== BLE Mouse CLI ===");
        let _ = writeln!(out, "Type 'help' for available commands");
        let _ = writeln!(out, "Waiting for commands...");
        let _ = writeln!(out);
    }

    /// Process every byte currently available, dispatching each complete
    /// line inline.
    pub fn poll<I>(&mut self, bytes: I, out: &mut dyn Write)
    where
        I: IntoIterator<Item = u8>,
    {
        for byte in bytes {
            self.feed(byte, out);
        }
    }

    /// Process bytes until one line has been dispatched.
    ///
    /// Returns how many bytes were consumed, so the caller can wait for
    /// the peripheral to drain before handing over the rest.
    pub fn poll_line(&mut self, bytes: &[u8], out: &mut dyn Write) -> usize {
        for (i, &byte) in bytes.iter().enumerate() {
            if self.feed(byte, out) {
                return i + 1;
            }
        }
        bytes.len()
    }

    /// Feed one byte; `true` if it completed and dispatched a line.
    fn feed(&mut self, byte: u8, out: &mut dyn Write) -> bool {
        match self.line.push(byte) {
            LineEvent::Complete => {
                self.dispatcher
                    .dispatch(self.line.line(), &mut self.mouse, out);
                self.line.clear();
                true
            }
            LineEvent::Overflow => {
                #[cfg(feature = "defmt")]
                defmt::warn!("CLI input line exceeded {} chars", self.line.capacity());
                let _ = writeln!(out, "{}", CliError::line_too_long());
                false
            }
            LineEvent::Pending | LineEvent::Ignored => false,
        }
    }

    pub fn echo(&self) -> bool {
        self.dispatcher.echo()
    }

    /// Change echo mode without going through the `echo` command.
    pub fn set_echo(&mut self, enabled: bool) {
        self.dispatcher.set_echo(enabled);
    }

    pub fn mouse(&self) -> &M {
        &self.mouse
    }

    pub fn mouse_mut(&mut self) -> &mut M {
        &mut self.mouse
    }

    /// The partially assembled input line.
    pub fn pending_input(&self) -> &str {
        self.line.line()
    }
}
