//! Register waveforms of the UC81xx panels
//!
//! Each table is sent as-is after its LUT command (0x20 - 0x24). A VCOM table
//! carries two more bytes than the transition tables.

pub(crate) const LUT_VCOM_DC_2IN7: [u8; 44] = [
    0x00, 0x00, //
    0x00, 0x08, 0x00, 0x00, 0x00, 0x02, //
    0x60, 0x28, 0x28, 0x00, 0x00, 0x01, //
    0x00, 0x14, 0x00, 0x00, 0x00, 0x01, //
    0x00, 0x12, 0x12, 0x00, 0x00, 0x01, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

pub(crate) const LUT_WW_2IN7: [u8; 42] = [
    0x40, 0x08, 0x00, 0x00, 0x00, 0x02, //
    0x90, 0x28, 0x28, 0x00, 0x00, 0x01, //
    0x40, 0x14, 0x00, 0x00, 0x00, 0x01, //
    0xA0, 0x12, 0x12, 0x00, 0x00, 0x01, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Black to white shares the white to white waveform
pub(crate) const LUT_BW_2IN7: [u8; 42] = LUT_WW_2IN7;

pub(crate) const LUT_BB_2IN7: [u8; 42] = [
    0x80, 0x08, 0x00, 0x00, 0x00, 0x02, //
    0x90, 0x28, 0x28, 0x00, 0x00, 0x01, //
    0x80, 0x14, 0x00, 0x00, 0x00, 0x01, //
    0x50, 0x12, 0x12, 0x00, 0x00, 0x01, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

pub(crate) const LUT_WB_2IN7: [u8; 42] = LUT_BB_2IN7;

pub(crate) const LUT_VCOM_DC_4IN2: [u8; 44] = [
    0x00, 0x17, 0x00, 0x00, 0x00, 0x02, //
    0x00, 0x17, 0x17, 0x00, 0x00, 0x02, //
    0x00, 0x0A, 0x01, 0x00, 0x00, 0x01, //
    0x00, 0x0E, 0x0E, 0x00, 0x00, 0x02, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00,
];

pub(crate) const LUT_WW_4IN2: [u8; 42] = [
    0x40, 0x17, 0x00, 0x00, 0x00, 0x02, //
    0x90, 0x17, 0x17, 0x00, 0x00, 0x02, //
    0x40, 0x0A, 0x01, 0x00, 0x00, 0x01, //
    0xA0, 0x0E, 0x0E, 0x00, 0x00, 0x02, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

pub(crate) const LUT_BW_4IN2: [u8; 42] = LUT_WW_4IN2;

pub(crate) const LUT_BB_4IN2: [u8; 42] = [
    0x80, 0x17, 0x00, 0x00, 0x00, 0x02, //
    0x90, 0x17, 0x17, 0x00, 0x00, 0x02, //
    0x80, 0x0A, 0x01, 0x00, 0x00, 0x01, //
    0x50, 0x0E, 0x0E, 0x00, 0x00, 0x02, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

pub(crate) const LUT_WB_4IN2: [u8; 42] = LUT_BB_4IN2;

/// Check code of the deep sleep command
pub(crate) const DEEP_SLEEP_CHECK: u8 = 0xA5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_tables_differ_in_the_voltage_selects() {
        for (ww, bb) in [(LUT_WW_2IN7, LUT_BB_2IN7), (LUT_WW_4IN2, LUT_BB_4IN2)] {
            // timing bytes are shared, only the first byte of each group changes
            for (group, (w, b)) in ww.chunks(6).zip(bb.chunks(6)).enumerate() {
                assert_eq!(w[1..], b[1..], "group {}", group);
            }
        }
        assert_eq!(LUT_VCOM_DC_2IN7[..2], [0x00, 0x00]);
        assert_eq!(LUT_VCOM_DC_4IN2[42..], [0x00, 0x00]);
    }
}
