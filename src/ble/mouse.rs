//! [`HidMouse`] implementation backed by the BLE link.
//!
//! Reports are queued on a bounded channel and sent as notifications by
//! the BLE task. The console waits on [`BleMouse::ready`] between lines,
//! so one command always finds room for its reports.

use ble_mouse_cli::config::{DEVICE_MANUFACTURER, DEVICE_NAME, REPORTS_PER_COMMAND};
use ble_mouse_cli::hid::{HidMouse, MouseButton, MouseReport, MouseState};
use defmt::warn;
use embassy_time::{Duration, Timer};

use crate::ble::{LinkState, ReportChannel};

/// Poll interval while the report queue drains.
const DRAIN_POLL: Duration = Duration::from_millis(1);

pub struct BleMouse {
    state: MouseState,
    link: &'static LinkState,
    reports: &'static ReportChannel,
}

impl BleMouse {
    pub fn new(link: &'static LinkState, reports: &'static ReportChannel) -> Self {
        Self {
            state: MouseState::new(),
            link,
            reports,
        }
    }

    /// Wait until the queue can take the reports of one more command.
    pub async fn ready(&self) {
        while self.reports.free_capacity() < REPORTS_PER_COMMAND {
            Timer::after(DRAIN_POLL).await;
        }
    }

    fn send(&self, report: MouseReport) {
        if self.reports.try_send(report).is_err() {
            warn!("Report queue full, dropping {}", report);
        }
    }
}

impl HidMouse for BleMouse {
    fn is_connected(&self) -> bool {
        self.link.status().is_ready()
    }

    fn click(&mut self, button: MouseButton) {
        for report in self.state.click(button) {
            self.send(report);
        }
    }

    fn press(&mut self, button: MouseButton) {
        let report = self.state.press(button);
        self.send(report);
    }

    fn release(&mut self, button: MouseButton) {
        let report = self.state.release(button);
        self.send(report);
    }

    fn move_by(&mut self, x: i8, y: i8, wheel: i8, pan: i8) {
        let report = self.state.motion(x, y, wheel, pan);
        self.send(report);
    }

    fn set_battery_level(&mut self, percent: u8) {
        self.link.set_battery(percent);
    }

    fn battery_level(&self) -> u8 {
        self.link.status().battery()
    }

    fn device_name(&self) -> &str {
        DEVICE_NAME
    }

    fn manufacturer(&self) -> &str {
        DEVICE_MANUFACTURER
    }
}
