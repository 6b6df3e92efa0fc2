//! Bluetooth Low Energy subsystem.
//!
//! This module drives the Nordic SoftDevice S140 in **Peripheral** role:
//!
//! 1. **Server** - registers the Device Information, Battery and
//!    HID-over-GATT services.
//! 2. **Advertiser** - advertises as a HID mouse, accepts one host at a
//!    time, and forwards queued reports as notifications.
//! 3. **Mouse** - the [`HidMouse`](ble_mouse_cli::hid::HidMouse) handle the
//!    CLI task drives.
//!
//! The CLI and BLE tasks share only [`LinkState`] and the report channel
//! defined in `main.rs`.

pub mod advertiser;
pub mod mouse;
pub mod server;

use ble_mouse_cli::config::REPORT_QUEUE_DEPTH;
use ble_mouse_cli::hid::{LinkStatus, MouseReport};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

/// Reports queued by the CLI for the BLE task to notify.
pub type ReportChannel = Channel<CriticalSectionRawMutex, MouseReport, REPORT_QUEUE_DEPTH>;

/// Link flags plus a battery-changed wakeup for the BLE task.
pub struct LinkState {
    status: LinkStatus,
    battery_changed: Signal<CriticalSectionRawMutex, u8>,
}

impl LinkState {
    pub const fn new() -> Self {
        Self {
            status: LinkStatus::new(),
            battery_changed: Signal::new(),
        }
    }

    pub fn status(&self) -> &LinkStatus {
        &self.status
    }

    /// Store a new level and wake the BLE task to notify it.
    pub fn set_battery(&self, percent: u8) {
        self.status.set_battery(percent);
        self.battery_changed.signal(percent);
    }

    /// Wait for the next battery level change.
    pub async fn battery_changed(&self) -> u8 {
        self.battery_changed.wait().await
    }
}
