//! Host-testable core of ble-mouse-cli.
//!
//! Everything here is `no_std` and hardware-free: the line assembler,
//! the command dispatcher, and the HID mouse report model. The firmware
//! in `main.rs` supplies the UART and a SoftDevice-backed [`hid::HidMouse`].
//!
//! Usage: `cargo test --lib --tests`
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! and is only built with `--features embedded`.

#![cfg_attr(not(test), no_std)]

pub mod cli;
pub mod config;
pub mod hid;

pub use cli::{Cli, CliError};
pub use config::CliConfig;
pub use hid::{HidMouse, MouseButton, MouseReport};
