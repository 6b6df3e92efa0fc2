//! BLE HID mouse report (report protocol, Report ID 1).
//!
//! Layout (5 bytes, Report ID not included in GATT notifications):
//! ```text
//! Byte 0: Button bitfield
//!         Bit 0 = Left, Bit 1 = Right, Bit 2 = Middle,
//!         Bit 3 = Back, Bit 4 = Forward, Bits 5-7 = padding
//! Byte 1: X displacement (signed, -127..127)
//! Byte 2: Y displacement (signed, -127..127)
//! Byte 3: Vertical wheel (signed, -127..127)
//! Byte 4: Horizontal pan  (signed, -127..127)
//! ```

/// Mouse report size in bytes.
pub const MOUSE_REPORT_SIZE: usize = 5;

/// Report ID used in the report map and the Report Reference descriptor.
pub const MOUSE_REPORT_ID: u8 = 1;

/// The five buttons a HID mouse can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
}

impl MouseButton {
    pub const ALL: [MouseButton; 5] = [
        MouseButton::Left,
        MouseButton::Right,
        MouseButton::Middle,
        MouseButton::Back,
        MouseButton::Forward,
    ];

    /// Resolve a button from its name or one-letter alias, ignoring case.
    ///
    /// An empty (or all-whitespace) argument means `Left`.
    pub fn resolve(arg: &str) -> Option<Self> {
        let arg = arg.trim();
        if arg.is_empty() {
            return Some(MouseButton::Left);
        }
        Self::ALL.into_iter().find(|b| {
            arg.eq_ignore_ascii_case(b.name()) || arg.eq_ignore_ascii_case(b.alias())
        })
    }

    /// Bit in the report's button field.
    pub const fn mask(self) -> u8 {
        match self {
            MouseButton::Left => 0x01,
            MouseButton::Right => 0x02,
            MouseButton::Middle => 0x04,
            MouseButton::Back => 0x08,
            MouseButton::Forward => 0x10,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            MouseButton::Left => "left",
            MouseButton::Right => "right",
            MouseButton::Middle => "middle",
            MouseButton::Back => "back",
            MouseButton::Forward => "forward",
        }
    }

    pub const fn alias(self) -> &'static str {
        match self {
            MouseButton::Left => "l",
            MouseButton::Right => "r",
            MouseButton::Middle => "m",
            MouseButton::Back => "b",
            MouseButton::Forward => "f",
        }
    }
}

/// One input report as sent to the host.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseReport {
    /// Button bitfield (see [`MouseButton::mask`]).
    pub buttons: u8,
    /// Relative X movement (signed).
    pub x: i8,
    /// Relative Y movement (signed).
    pub y: i8,
    /// Vertical scroll delta (signed, positive = up).
    pub wheel: i8,
    /// Horizontal scroll delta (signed, positive = right).
    pub pan: i8,
}

impl MouseReport {
    /// Create an idle (no movement, no buttons) report.
    pub const fn empty() -> Self {
        Self {
            buttons: 0,
            x: 0,
            y: 0,
            wheel: 0,
            pan: 0,
        }
    }

    /// Serialise into a byte slice for a GATT notification.
    /// Returns the number of bytes written (0 if `buf` is too small).
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < MOUSE_REPORT_SIZE {
            return 0;
        }
        buf[0] = self.buttons;
        buf[1] = self.x as u8;
        buf[2] = self.y as u8;
        buf[3] = self.wheel as u8;
        buf[4] = self.pan as u8;
        MOUSE_REPORT_SIZE
    }

    pub fn to_bytes(&self) -> [u8; MOUSE_REPORT_SIZE] {
        let mut buf = [0u8; MOUSE_REPORT_SIZE];
        self.serialize(&mut buf);
        buf
    }

    /// Returns `true` when no buttons are pressed and there is no movement.
    pub fn is_idle(&self) -> bool {
        *self == Self::empty()
    }
}

/// Tracks held buttons and turns mouse actions into reports.
///
/// Every report carries the buttons currently held, so a `press`
/// followed by `move` drags.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct MouseState {
    buttons: u8,
}

impl MouseState {
    pub const fn new() -> Self {
        Self { buttons: 0 }
    }

    /// Bitfield of the buttons currently held.
    pub fn buttons(&self) -> u8 {
        self.buttons
    }

    pub fn is_pressed(&self, button: MouseButton) -> bool {
        self.buttons & button.mask() != 0
    }

    pub fn press(&mut self, button: MouseButton) -> MouseReport {
        self.buttons |= button.mask();
        self.motion(0, 0, 0, 0)
    }

    pub fn release(&mut self, button: MouseButton) -> MouseReport {
        self.buttons &= !button.mask();
        self.motion(0, 0, 0, 0)
    }

    /// Press then release `button`. Other held buttons stay held; `button`
    /// itself is released even if it was held before.
    pub fn click(&mut self, button: MouseButton) -> [MouseReport; 2] {
        let down = self.press(button);
        let up = self.release(button);
        [down, up]
    }

    pub fn motion(&self, x: i8, y: i8, wheel: i8, pan: i8) -> MouseReport {
        MouseReport {
            buttons: self.buttons,
            x,
            y,
            wheel,
            pan,
        }
    }
}

// HID report map for a five-button mouse with wheel and horizontal pan

/// HID Report Map served by the BLE HID service.
pub const MOUSE_REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x02, // Usage (Mouse)
    0xA1, 0x01, // Collection (Application)
    0x85, MOUSE_REPORT_ID, //   Report ID (1)
    0x09, 0x01, //   Usage (Pointer)
    0xA1, 0x00, //   Collection (Physical)
    //
    //   - Buttons (5 bits + 3 padding) -
    0x05, 0x09, //     Usage Page (Buttons)
    0x19, 0x01, //     Usage Minimum (Button 1)
    0x29, 0x05, //     Usage Maximum (Button 5)
    0x15, 0x00, //     Logical Minimum (0)
    0x25, 0x01, //     Logical Maximum (1)
    0x95, 0x05, //     Report Count (5)
    0x75, 0x01, //     Report Size (1)
    0x81, 0x02, //     Input (Data, Variable, Absolute)
    0x95, 0x01, //     Report Count (1)
    0x75, 0x03, //     Report Size (3)
    0x81, 0x03, //     Input (Constant) - padding
    //
    //   - X, Y displacement, vertical wheel -
    0x05, 0x01, //     Usage Page (Generic Desktop)
    0x09, 0x30, //     Usage (X)
    0x09, 0x31, //     Usage (Y)
    0x09, 0x38, //     Usage (Wheel)
    0x15, 0x81, //     Logical Minimum (-127)
    0x25, 0x7F, //     Logical Maximum (127)
    0x75, 0x08, //     Report Size (8)
    0x95, 0x03, //     Report Count (3)
    0x81, 0x06, //     Input (Data, Variable, Relative)
    //
    //   - Horizontal pan -
    0x05, 0x0C, //     Usage Page (Consumer)
    0x0A, 0x38, 0x02, //     Usage (AC Pan)
    0x15, 0x81, //     Logical Minimum (-127)
    0x25, 0x7F, //     Logical Maximum (127)
    0x75, 0x08, //     Report Size (8)
    0x95, 0x01, //     Report Count (1)
    0x81, 0x06, //     Input (Data, Variable, Relative)
    //
    0xC0, //   End Collection (Physical)
    0xC0, // End Collection (Application)
];
