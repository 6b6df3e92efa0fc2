//! Integration tests for ble-mouse-cli host-testable logic.
//!
//! Drives the public `Cli` with raw serial bytes against a mouse double
//! that turns actions into HID reports the same way the firmware does.

use ble_mouse_cli::cli::OutputBuffer;
use ble_mouse_cli::config::REPORTS_PER_COMMAND;
use ble_mouse_cli::hid::{HidMouse, MouseButton, MouseReport, MouseState};
use ble_mouse_cli::{Cli, CliConfig};

/// Mouse double producing the report stream a host would receive.
struct ReportingMouse {
    connected: bool,
    battery: u8,
    state: MouseState,
    reports: Vec<MouseReport>,
}

impl ReportingMouse {
    fn new(connected: bool) -> Self {
        Self {
            connected,
            battery: 100,
            state: MouseState::new(),
            reports: Vec::new(),
        }
    }
}

impl HidMouse for ReportingMouse {
    fn is_connected(&self) -> bool {
        self.connected
    }
    fn click(&mut self, button: MouseButton) {
        let reports = self.state.click(button);
        self.reports.extend_from_slice(&reports);
    }
    fn press(&mut self, button: MouseButton) {
        let report = self.state.press(button);
        self.reports.push(report);
    }
    fn release(&mut self, button: MouseButton) {
        let report = self.state.release(button);
        self.reports.push(report);
    }
    fn move_by(&mut self, x: i8, y: i8, wheel: i8, pan: i8) {
        let report = self.state.motion(x, y, wheel, pan);
        self.reports.push(report);
    }
    fn set_battery_level(&mut self, percent: u8) {
        self.battery = percent;
    }
    fn battery_level(&self) -> u8 {
        self.battery
    }
    fn device_name(&self) -> &str {
        "Integration Mouse"
    }
    fn manufacturer(&self) -> &str {
        "ble-mouse-cli"
    }
}

fn output_text<const N: usize>(out: &OutputBuffer<N>) -> String {
    String::from_utf8(out.as_bytes().to_vec()).expect("output is ASCII")
}

#[test]
fn drag_session_produces_expected_reports() {
    let config = CliConfig::new().with_echo(false);
    let mut cli = Cli::new(ReportingMouse::new(true), &config);
    let mut out: OutputBuffer<512> = OutputBuffer::new();

    cli.poll(
        b"press\r\nmove 10 -5\r\nrelease l\r\n".iter().copied(),
        &mut out,
    );

    let bytes: Vec<[u8; 5]> = cli.mouse().reports.iter().map(|r| r.to_bytes()).collect();
    assert_eq!(
        bytes,
        [
            [0x01, 0x00, 0x00, 0x00, 0x00],
            [0x01, 0x0A, 0xFB, 0x00, 0x00],
            [0x00, 0x00, 0x00, 0x00, 0x00],
        ]
    );

    let text = output_text(&out);
    assert!(text.contains("Button pressed: left\r\n"));
    assert!(text.contains("Mouse moved: x=10, y=-5\r\n"));
    assert!(text.contains("Button released: left\r\n"));
}

#[test]
fn click_on_held_button_leaves_it_released_on_host() {
    let config = CliConfig::new().with_echo(false);
    let mut cli = Cli::new(ReportingMouse::new(true), &config);
    let mut out: OutputBuffer<512> = OutputBuffer::new();

    cli.poll(b"press m\nclick m\nmove 1 1\n".iter().copied(), &mut out);

    let bytes: Vec<[u8; 5]> = cli.mouse().reports.iter().map(|r| r.to_bytes()).collect();
    assert_eq!(
        bytes,
        [
            [0x04, 0x00, 0x00, 0x00, 0x00],
            [0x04, 0x00, 0x00, 0x00, 0x00],
            [0x00, 0x00, 0x00, 0x00, 0x00],
            [0x00, 0x01, 0x01, 0x00, 0x00],
        ]
    );
}

#[test]
fn pasted_commands_dispatch_one_line_per_poll_line() {
    let config = CliConfig::new().with_echo(false);
    let mut cli = Cli::new(ReportingMouse::new(true), &config);
    let mut out: OutputBuffer<1024> = OutputBuffer::new();
    let paste = b"move 1 1\nclick\nclick\nclick\nclick\n";

    let mut offset = 0;
    let mut per_line = Vec::new();
    while offset < paste.len() {
        let before = cli.mouse().reports.len();
        offset += cli.poll_line(&paste[offset..], &mut out);
        per_line.push(cli.mouse().reports.len() - before);
    }

    assert_eq!(per_line, [1, 2, 2, 2, 2]);
    assert!(per_line.iter().all(|&n| n <= REPORTS_PER_COMMAND));
    // Every click ends released.
    assert_eq!(cli.mouse().reports.last().map(|r| r.buttons), Some(0));
}

#[test]
fn bytes_split_across_polls_form_one_command() {
    let config = CliConfig::new().with_echo(false);
    let mut cli = Cli::new(ReportingMouse::new(true), &config);
    let mut out: OutputBuffer<256> = OutputBuffer::new();

    for &byte in b"movefull 5 5\r\n" {
        cli.poll([byte], &mut out);
    }

    assert_eq!(cli.mouse().reports.len(), 1);
    assert_eq!(cli.mouse().reports[0].to_bytes(), [0, 5, 5, 0, 0]);
}

#[test]
fn disconnected_session_only_changes_battery() {
    let mut cli = Cli::new(ReportingMouse::new(false), &CliConfig::new());
    let mut out: OutputBuffer<1024> = OutputBuffer::new();

    cli.poll(b"click right\nscroll 3\nbattery 42\nstatus\n".iter().copied(), &mut out);

    assert!(cli.mouse().reports.is_empty());
    assert_eq!(cli.mouse().battery_level(), 42);

    let text = output_text(&out);
    assert_eq!(text.matches("not connected").count(), 2);
    assert!(text.contains("> click right\r\n"));
    assert!(text.contains("Battery Level: 42%"));
    assert!(text.contains("BLE Connected: No"));
}

#[test]
fn unknown_command_leaves_state_untouched() {
    let mut cli = Cli::new(ReportingMouse::new(true), &CliConfig::new());
    let mut out: OutputBuffer<256> = OutputBuffer::new();

    cli.poll(b"foo\r\n".iter().copied(), &mut out);

    assert!(cli.mouse().reports.is_empty());
    assert!(cli.echo());
    assert!(output_text(&out).contains("foo"));
}
