//! HID mouse types shared by the command dispatcher and the BLE peripheral.
//!
//! - [`mouse::MouseButton`] - the five buttons and their CLI names
//! - [`mouse::MouseReport`] - one input report on the wire
//! - [`mouse::MouseState`] - held-button tracking, action → report
//! - [`link::LinkStatus`] - connection, subscription and battery flags
//! - [`HidMouse`] - the peripheral the CLI drives

pub mod link;
pub mod mouse;

#[cfg(test)]
mod tests;

pub use link::LinkStatus;
pub use mouse::{MouseButton, MouseReport, MouseState};

/// A HID mouse peripheral as seen by the command dispatcher.
///
/// Actions are fire-and-forget: the dispatcher checks
/// [`is_connected`](HidMouse::is_connected) first and reports the outcome
/// itself, so none of these return errors.
pub trait HidMouse {
    /// `true` while a host is connected and subscribed.
    fn is_connected(&self) -> bool;

    fn click(&mut self, button: MouseButton);

    fn press(&mut self, button: MouseButton);

    fn release(&mut self, button: MouseButton);

    /// Relative move with vertical and horizontal scroll.
    fn move_by(&mut self, x: i8, y: i8, wheel: i8, pan: i8);

    /// Update the level reported by the Battery Service (0-100).
    fn set_battery_level(&mut self, percent: u8);

    fn battery_level(&self) -> u8;

    fn device_name(&self) -> &str;

    fn manufacturer(&self) -> &str;
}
