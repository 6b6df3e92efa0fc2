//! Unit tests for button resolution and mouse report generation.
//!
//! These tests run on the host (not embedded) and verify the pure
//! logic of report layout and held-button tracking.

use super::link::LinkStatus;
use super::mouse::{MouseButton, MouseReport, MouseState, MOUSE_REPORT_DESCRIPTOR, MOUSE_REPORT_SIZE};

// ═══════════════════════════════════════════════════════════════════════════
// Button Resolution Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn button_resolves_names_and_aliases_case_insensitively() {
    let cases = [
        (MouseButton::Left, ["left", "LEFT", "l", "L"]),
        (MouseButton::Right, ["right", "RIGHT", "r", "R"]),
        (MouseButton::Middle, ["middle", "Middle", "m", "M"]),
        (MouseButton::Back, ["back", "BaCk", "b", "B"]),
        (MouseButton::Forward, ["forward", "FORWARD", "f", "F"]),
    ];
    for (expected, spellings) in cases {
        for spelling in spellings {
            assert_eq!(MouseButton::resolve(spelling), Some(expected), "{}", spelling);
        }
    }
}

#[test]
fn button_empty_argument_defaults_to_left() {
    assert_eq!(MouseButton::resolve(""), Some(MouseButton::Left));
    assert_eq!(MouseButton::resolve("   "), Some(MouseButton::Left));
}

#[test]
fn button_argument_is_trimmed() {
    assert_eq!(MouseButton::resolve("  right \t"), Some(MouseButton::Right));
}

#[test]
fn button_unknown_name_is_rejected() {
    assert_eq!(MouseButton::resolve("top"), None);
    assert_eq!(MouseButton::resolve("lef"), None);
    assert_eq!(MouseButton::resolve("x"), None);
}

#[test]
fn button_masks_are_distinct_bits() {
    let mut seen = 0u8;
    for button in MouseButton::ALL {
        assert_eq!(button.mask().count_ones(), 1);
        assert_eq!(seen & button.mask(), 0);
        seen |= button.mask();
    }
    assert_eq!(seen, 0x1F);
}

// ═══════════════════════════════════════════════════════════════════════════
// Mouse Report Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn mouse_report_empty() {
    let report = MouseReport::empty();
    assert!(report.is_idle());
    assert_eq!(report.to_bytes(), [0; MOUSE_REPORT_SIZE]);
}

#[test]
fn mouse_report_serialize_signed_fields() {
    let report = MouseReport {
        buttons: 0x11,
        x: -127,
        y: 127,
        wheel: -5,
        pan: 3,
    };
    assert_eq!(report.to_bytes(), [0x11, 0x81, 0x7F, 0xFB, 0x03]);
}

#[test]
fn mouse_report_serialize_buffer_too_small() {
    let report = MouseReport::empty();
    let mut buf = [0u8; 4];
    assert_eq!(report.serialize(&mut buf), 0);
}

#[test]
fn mouse_report_descriptor_is_balanced() {
    let opens = MOUSE_REPORT_DESCRIPTOR.iter().filter(|&&b| b == 0xA1).count();
    let closes = MOUSE_REPORT_DESCRIPTOR.iter().filter(|&&b| b == 0xC0).count();
    assert_eq!(opens, 2);
    assert_eq!(closes, 2);
    assert_eq!(MOUSE_REPORT_DESCRIPTOR.last(), Some(&0xC0));
}

// ═══════════════════════════════════════════════════════════════════════════
// Mouse State Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn state_click_is_press_then_release() {
    let mut state = MouseState::new();
    let [down, up] = state.click(MouseButton::Right);
    assert_eq!(down.buttons, 0x02);
    assert_eq!(up.buttons, 0x00);
    assert!(up.is_idle());
    assert_eq!(state.buttons(), 0);
}

#[test]
fn state_held_button_carries_into_motion() {
    let mut state = MouseState::new();
    state.press(MouseButton::Left);
    let report = state.motion(10, -4, 0, 0);
    assert_eq!(report.buttons, 0x01);
    assert_eq!((report.x, report.y), (10, -4));

    let report = state.release(MouseButton::Left);
    assert_eq!(report.buttons, 0);
    assert!(!state.is_pressed(MouseButton::Left));
}

#[test]
fn state_click_keeps_other_held_buttons() {
    let mut state = MouseState::new();
    state.press(MouseButton::Back);
    let [down, up] = state.click(MouseButton::Left);
    assert_eq!(down.buttons, 0x09);
    assert_eq!(up.buttons, 0x08);
    assert!(state.is_pressed(MouseButton::Back));
}

#[test]
fn state_click_on_held_button_releases_it() {
    let mut state = MouseState::new();
    let held = state.press(MouseButton::Middle);
    let [down, up] = state.click(MouseButton::Middle);
    let moved = state.motion(1, 1, 0, 0);

    assert_eq!(held.to_bytes(), [0x04, 0, 0, 0, 0]);
    assert_eq!(down.to_bytes(), [0x04, 0, 0, 0, 0]);
    assert_eq!(up.to_bytes(), [0x00, 0, 0, 0, 0]);
    // No phantom re-press after the click released the button.
    assert_eq!(moved.to_bytes(), [0x00, 0x01, 0x01, 0x00, 0x00]);
    assert!(!state.is_pressed(MouseButton::Middle));
}

// ═══════════════════════════════════════════════════════════════════════════
// Link Status Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn link_needs_subscription_before_ready() {
    let link = LinkStatus::new();
    assert!(!link.is_ready());

    link.on_connect();
    assert!(link.is_connected());
    assert!(!link.is_ready());

    link.set_subscribed(true);
    assert!(link.is_ready());

    link.set_subscribed(false);
    assert!(!link.is_ready());
}

#[test]
fn link_disconnect_drops_subscription() {
    let link = LinkStatus::new();
    link.on_connect();
    link.set_subscribed(true);
    link.on_disconnect();
    assert!(!link.is_ready());

    // A new connection starts unsubscribed.
    link.on_connect();
    assert!(!link.is_ready());
}

#[test]
fn link_battery_defaults_and_updates() {
    let link = LinkStatus::new();
    assert_eq!(link.battery(), crate::config::DEFAULT_BATTERY_LEVEL);
    link.set_battery(42);
    assert_eq!(link.battery(), 42);
}
