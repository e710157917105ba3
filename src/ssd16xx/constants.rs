//! Waveforms and update modes of the SSD16xx panels

use super::command::DisplayUpdateControl2;
use crate::lut::Lut;

/// Full refresh waveform of the 1.54", 2.13" and 2.9" type A panels (30 bytes)
pub(crate) const LUT_FULL_UPDATE: [u8; 30] = [
    0x02, 0x02, 0x01, 0x11, 0x12, 0x12, 0x22, 0x22, 0x66, 0x69, 0x69, 0x59, 0x58, 0x99, 0x99,
    0x88, 0x00, 0x00, 0x00, 0x00, 0xF8, 0xB4, 0x13, 0x51, 0x35, 0x51, 0x51, 0x19, 0x01, 0x00,
];

/// Partial refresh waveform of the type A panels
pub(crate) const LUT_PARTIAL_UPDATE: [u8; 30] = [
    0x10, 0x18, 0x18, 0x08, 0x18, 0x18, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x13, 0x14, 0x44, 0x12, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Full refresh waveform of the LilyGo T5 2.13"
///
/// Each voltage byte holds four 2 bit source levels, e.g. 0x22 = 0b00_10_00_10.
pub(crate) const LUT_FULL_UPDATE_TTGO: [u8; 30] = [
    0x22, 0x55, 0xAA, 0x55, 0xAA, 0x55, 0xAA, 0x11, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x1E, 0x1E, 0x1E, 0x1E, 0x1E, 0x1E, 0x1E, 0x1E, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Partial refresh waveform of the LilyGo T5 2.13"
pub(crate) const LUT_PARTIAL_UPDATE_TTGO: [u8; 30] = [
    0x18, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x0F, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Full refresh waveform of the 2.9" V2 (vendor table WS_20_30)
pub const LUT_FULL_2IN9_V2: Lut = Lut::from_bytes([
    0x80, 0x66, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x40, 0x00, 0x00, 0x00,
    0x10, 0x66, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x20, 0x00, 0x00, 0x00,
    0x80, 0x66, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x40, 0x00, 0x00, 0x00,
    0x10, 0x66, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x20, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x14, 0x08, 0x00, 0x00, 0x00, 0x00, 0x01, 0x0A, 0x0A, 0x00, 0x0A, 0x0A,
    0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x14, 0x08, 0x00, 0x01,
    0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x44, 0x44, 0x44, 0x44, 0x44, 0x44, 0x00, 0x00, 0x00, 0x22, 0x17, 0x41,
    0x00, 0x32, 0x36,
]);

/// Partial refresh waveform of the 2.9" V2
pub const LUT_PARTIAL_2IN9_V2: Lut = Lut::from_bytes([
    0x00, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x80, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x40, 0x40, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x80, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x0A, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x22, 0x22, 0x22, 0x22, 0x22, 0x22, 0x00, 0x00, 0x00, 0x22, 0x17, 0x41,
    0xB0, 0x32, 0x36,
]);

/// Data entry: x increment, y increment, address counter updated in x direction
pub(crate) const DATA_ENTRY_INCR_X_INCR_Y: u8 = 0x03;

/// Type A panels: waveform from register, no OTP loading
pub(crate) const UPDATE_TYPE_A: u8 = DisplayUpdateControl2::new()
    .enable_clock()
    .enable_analog()
    .display()
    .0;
/// Load temperature and waveform from OTP, display, power down
pub(crate) const UPDATE_FULL_OTP: u8 = DisplayUpdateControl2::new()
    .enable_clock()
    .enable_analog()
    .load_temp()
    .load_lut()
    .display()
    .disable_analog()
    .disable_clock()
    .0;
/// Display with the waveform already in the LUT register, power down
pub(crate) const UPDATE_FULL_REGISTER: u8 = DisplayUpdateControl2::new()
    .enable_clock()
    .enable_analog()
    .display()
    .disable_analog()
    .disable_clock()
    .0;
/// Display mode 2, the partial waveform of the OTP
pub(crate) const UPDATE_PARTIAL_OTP: u8 = DisplayUpdateControl2::new()
    .enable_clock()
    .enable_analog()
    .load_temp()
    .load_lut()
    .display()
    .mode_2()
    .disable_analog()
    .disable_clock()
    .0;
/// Only power the analog part up
pub(crate) const UPDATE_POWER_UP: u8 = DisplayUpdateControl2::new()
    .enable_clock()
    .enable_analog()
    .0;
/// Load temperature and waveform from OTP without displaying
pub(crate) const UPDATE_LOAD_TEMP: u8 = DisplayUpdateControl2::new()
    .enable_analog()
    .load_temp()
    .load_lut()
    .disable_clock()
    .0;
/// Display mode 2 with the waveform already in the register
pub(crate) const UPDATE_PARTIAL_REGISTER: u8 = DisplayUpdateControl2::new()
    .display()
    .mode_2()
    .disable_analog()
    .disable_clock()
    .0;
/// Partial refresh of the SSD1680 tri-color panels, old frame in the red RAM
pub(crate) const UPDATE_PARTIAL_RED_RAM: u8 = DisplayUpdateControl2::new()
    .display()
    .mode_2()
    .load_lut()
    .0;

/// Display option for the 2.9" V2 partial refresh, ping-pong off
pub(crate) const DISPLAY_OPTION_PARTIAL: [u8; 10] =
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x40, 0x00, 0x00, 0x00, 0x00];
