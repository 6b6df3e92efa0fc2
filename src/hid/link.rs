//! Link flags shared between the BLE task and the CLI.
//!
//! A host counts as connected for mouse actions only once it has
//! subscribed to input-report notifications; before that, reports would
//! go nowhere.

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use crate::config::DEFAULT_BATTERY_LEVEL;

pub struct LinkStatus {
    connected: AtomicBool,
    subscribed: AtomicBool,
    battery: AtomicU8,
}

impl LinkStatus {
    pub const fn new() -> Self {
        Self {
            connected: AtomicBool::new(false),
            subscribed: AtomicBool::new(false),
            battery: AtomicU8::new(DEFAULT_BATTERY_LEVEL),
        }
    }

    /// `true` while a host is connected and subscribed to reports.
    pub fn is_ready(&self) -> bool {
        self.connected.load(Ordering::Relaxed) && self.subscribed.load(Ordering::Relaxed)
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }

    pub fn on_connect(&self) {
        self.subscribed.store(false, Ordering::Relaxed);
        self.connected.store(true, Ordering::Relaxed);
    }

    /// Drops the subscription along with the connection.
    pub fn on_disconnect(&self) {
        self.connected.store(false, Ordering::Relaxed);
        self.subscribed.store(false, Ordering::Relaxed);
    }

    /// Input-report CCCD written by the host.
    pub fn set_subscribed(&self, enabled: bool) {
        self.subscribed.store(enabled, Ordering::Relaxed);
    }

    pub fn battery(&self) -> u8 {
        self.battery.load(Ordering::Relaxed)
    }

    pub fn set_battery(&self, percent: u8) {
        self.battery.store(percent, Ordering::Relaxed);
    }
}

impl Default for LinkStatus {
    fn default() -> Self {
        Self::new()
    }
}
