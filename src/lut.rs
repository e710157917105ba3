//! Waveform lookup table of the SSD1680/SSD1681 controllers
//!
//! The table is 159 bytes long and loaded through several registers, see
//! [`Epd::load_lut`](crate::epd::Epd::load_lut):
//!
//! | bytes     | content                                                  |
//! |-----------|----------------------------------------------------------|
//! | 0..60     | `VS[state][group]`, four 2 bit phase codes A B C D       |
//! | 60..144   | 12 timing records `TPA TPB SRAB TPC TPD SRCD RP`         |
//! | 144..150  | frame rate, one nibble per group, even groups high       |
//! | 150..153  | XON, one bit per group and phase pair, MSB first         |
//! | 153..159  | `EOPT VGH VSH1 VSH2 VSL VCOM`                            |
//!
//! All accessors pack and unpack with explicit shifts, the byte layout is the
//! controller's and never depends on how the compiler lays out a struct.

use bit_field::BitField;

pub use crate::ssd16xx::constants::{LUT_FULL_2IN9_V2, LUT_PARTIAL_2IN9_V2};

/// Length of the whole table
pub const LUT_LEN: usize = 159;
/// Bytes written to the waveform register 0x32
pub const WAVEFORM_LEN: usize = 153;

/// Voltage source states (VS0 to VS4)
pub const STATES: usize = 5;
/// Groups of the waveform
pub const GROUPS: usize = 12;
/// Phases in a group (A to D)
pub const PHASES: usize = 4;

const VS_OFFSET: usize = 0;
const TIMING_OFFSET: usize = VS_OFFSET + STATES * GROUPS;
const FRAME_RATE_OFFSET: usize = TIMING_OFFSET + GROUPS * 7;
const XON_OFFSET: usize = FRAME_RATE_OFFSET + GROUPS / 2;
const EOPT: usize = XON_OFFSET + GROUPS * 2 / 8;
const VGH: usize = EOPT + 1;
const VSH1: usize = EOPT + 2;
const VSH2: usize = EOPT + 3;
const VSL: usize = EOPT + 4;
const VCOM: usize = EOPT + 5;

/// Phase pair an XON flag belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhasePair {
    /// Phases A and B
    Ab,
    /// Phases C and D
    Cd,
}

/// Timing record of one group, durations in frames
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupTiming {
    pub tp_a: u8,
    pub tp_b: u8,
    /// state repeat of phase A and B
    pub sr_ab: u8,
    pub tp_c: u8,
    pub tp_d: u8,
    /// state repeat of phase C and D
    pub sr_cd: u8,
    /// repeat count of the whole group
    pub rp: u8,
}

/// A complete waveform
#[derive(Clone, PartialEq, Eq)]
pub struct Lut([u8; LUT_LEN]);

impl Default for Lut {
    fn default() -> Self {
        Lut([0; LUT_LEN])
    }
}

impl core::fmt::Debug for Lut {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Lut")
            .field("eopt", &self.eopt())
            .field("vgh", &self.vgh())
            .field("vsh1", &self.vsh1())
            .field("vsh2", &self.vsh2())
            .field("vsl", &self.vsl())
            .field("vcom", &self.vcom())
            .finish_non_exhaustive()
    }
}

impl Lut {
    /// Takes a vendor table as is
    pub const fn from_bytes(bytes: [u8; LUT_LEN]) -> Self {
        Lut(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; LUT_LEN] {
        &self.0
    }

    /// The part written to the waveform register
    pub fn waveform(&self) -> &[u8] {
        &self.0[..WAVEFORM_LEN]
    }

    fn vs_index(state: usize, group: usize) -> usize {
        assert!(state < STATES && group < GROUPS);
        VS_OFFSET + state * GROUPS + group
    }

    fn phase_bits(phase: usize) -> core::ops::Range<usize> {
        assert!(phase < PHASES);
        // phase A sits in the two most significant bits
        let low = 6 - 2 * phase;
        low..low + 2
    }

    /// 2 bit drive code of `phase` in `group` for voltage source `state`
    pub fn phase(&self, state: usize, group: usize, phase: usize) -> u8 {
        self.0[Self::vs_index(state, group)].get_bits(Self::phase_bits(phase))
    }

    pub fn set_phase(&mut self, state: usize, group: usize, phase: usize, code: u8) {
        let index = Self::vs_index(state, group);
        self.0[index].set_bits(Self::phase_bits(phase), code & 0b11);
    }

    /// Timing record of `group`
    pub fn timing(&self, group: usize) -> GroupTiming {
        assert!(group < GROUPS);
        let r = &self.0[TIMING_OFFSET + group * 7..][..7];
        GroupTiming {
            tp_a: r[0],
            tp_b: r[1],
            sr_ab: r[2],
            tp_c: r[3],
            tp_d: r[4],
            sr_cd: r[5],
            rp: r[6],
        }
    }

    pub fn set_timing(&mut self, group: usize, timing: GroupTiming) {
        assert!(group < GROUPS);
        let r = &mut self.0[TIMING_OFFSET + group * 7..][..7];
        r.copy_from_slice(&[
            timing.tp_a,
            timing.tp_b,
            timing.sr_ab,
            timing.tp_c,
            timing.tp_d,
            timing.sr_cd,
            timing.rp,
        ]);
    }

    fn frame_rate_slot(group: usize) -> (usize, core::ops::Range<usize>) {
        assert!(group < GROUPS);
        let bits = if group % 2 == 0 { 4..8 } else { 0..4 };
        (FRAME_RATE_OFFSET + group / 2, bits)
    }

    /// 4 bit frame rate setting of `group`
    pub fn frame_rate(&self, group: usize) -> u8 {
        let (index, bits) = Self::frame_rate_slot(group);
        self.0[index].get_bits(bits)
    }

    pub fn set_frame_rate(&mut self, group: usize, rate: u8) {
        let (index, bits) = Self::frame_rate_slot(group);
        self.0[index].set_bits(bits, rate & 0x0F);
    }

    fn xon_slot(group: usize, pair: PhasePair) -> (usize, usize) {
        assert!(group < GROUPS);
        let flag = group * 2
            + match pair {
                PhasePair::Ab => 0,
                PhasePair::Cd => 1,
            };
        (XON_OFFSET + flag / 8, 7 - flag % 8)
    }

    /// Whether all gates are switched on during the phase pair
    pub fn xon(&self, group: usize, pair: PhasePair) -> bool {
        let (index, bit) = Self::xon_slot(group, pair);
        self.0[index].get_bit(bit)
    }

    pub fn set_xon(&mut self, group: usize, pair: PhasePair, on: bool) {
        let (index, bit) = Self::xon_slot(group, pair);
        self.0[index].set_bit(bit, on);
    }

    /// End option, written to 0x3F
    pub fn eopt(&self) -> u8 {
        self.0[EOPT]
    }

    pub fn set_eopt(&mut self, value: u8) {
        self.0[EOPT] = value;
    }

    /// Gate driving voltage, written to 0x03
    pub fn vgh(&self) -> u8 {
        self.0[VGH]
    }

    pub fn set_vgh(&mut self, value: u8) {
        self.0[VGH] = value;
    }

    /// Source driving voltages, written to 0x04 as `VSH1 VSH2 VSL`
    pub fn vsh1(&self) -> u8 {
        self.0[VSH1]
    }

    pub fn set_vsh1(&mut self, value: u8) {
        self.0[VSH1] = value;
    }

    pub fn vsh2(&self) -> u8 {
        self.0[VSH2]
    }

    pub fn set_vsh2(&mut self, value: u8) {
        self.0[VSH2] = value;
    }

    pub fn vsl(&self) -> u8 {
        self.0[VSL]
    }

    pub fn set_vsl(&mut self, value: u8) {
        self.0[VSL] = value;
    }

    pub(crate) fn source_voltages(&self) -> &[u8] {
        &self.0[VSH1..=VSL]
    }

    /// VCOM, written to 0x2C
    pub fn vcom(&self) -> u8 {
        self.0[VCOM]
    }

    pub fn set_vcom(&mut self, value: u8) {
        self.0[VCOM] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ssd16xx::constants::{LUT_FULL_2IN9_V2, LUT_PARTIAL_2IN9_V2};

    #[test]
    fn layout_adds_up() {
        assert_eq!(TIMING_OFFSET, 60);
        assert_eq!(FRAME_RATE_OFFSET, 144);
        assert_eq!(XON_OFFSET, 150);
        assert_eq!(EOPT, WAVEFORM_LEN);
        assert_eq!(VCOM, LUT_LEN - 1);
    }

    #[test]
    fn fields_read_back() {
        let mut lut = Lut::default();
        for state in 0..STATES {
            for group in 0..GROUPS {
                for phase in 0..PHASES {
                    lut.set_phase(state, group, phase, ((state + group + phase) % 4) as u8);
                }
            }
        }
        for group in 0..GROUPS {
            let g = group as u8;
            lut.set_timing(
                group,
                GroupTiming {
                    tp_a: g,
                    tp_b: g + 1,
                    sr_ab: g + 2,
                    tp_c: g + 3,
                    tp_d: g + 4,
                    sr_cd: g + 5,
                    rp: g + 6,
                },
            );
            lut.set_frame_rate(group, 15 - g);
            lut.set_xon(group, PhasePair::Ab, group % 3 == 0);
            lut.set_xon(group, PhasePair::Cd, group % 2 == 1);
        }
        lut.set_eopt(0x22);
        lut.set_vgh(0x17);
        lut.set_vsh1(0x41);
        lut.set_vsh2(0xB0);
        lut.set_vsl(0x32);
        lut.set_vcom(0x36);

        for state in 0..STATES {
            for group in 0..GROUPS {
                for phase in 0..PHASES {
                    assert_eq!(
                        lut.phase(state, group, phase),
                        ((state + group + phase) % 4) as u8
                    );
                }
            }
        }
        for group in 0..GROUPS {
            let g = group as u8;
            assert_eq!(lut.timing(group).tp_a, g);
            assert_eq!(lut.timing(group).rp, g + 6);
            assert_eq!(lut.frame_rate(group), 15 - g);
            assert_eq!(lut.xon(group, PhasePair::Ab), group % 3 == 0);
            assert_eq!(lut.xon(group, PhasePair::Cd), group % 2 == 1);
        }
        assert_eq!(lut.source_voltages(), &[0x41, 0xB0, 0x32]);
        assert_eq!(lut.vcom(), 0x36);
    }

    #[test]
    fn setters_do_not_touch_neighbours() {
        let mut lut = Lut::from_bytes([0xFF; LUT_LEN]);
        lut.set_phase(0, 0, 1, 0);
        assert_eq!(lut.as_bytes()[0], 0b1100_1111);
        lut.set_frame_rate(1, 0);
        assert_eq!(lut.as_bytes()[144], 0xF0);
        lut.set_xon(0, PhasePair::Cd, false);
        assert_eq!(lut.as_bytes()[150], 0b1011_1111);
        assert_eq!(lut.as_bytes()[1], 0xFF);
        assert_eq!(lut.as_bytes()[151], 0xFF);
    }

    #[test]
    fn vendor_full_waveform() {
        let lut = &LUT_FULL_2IN9_V2;
        // VS0 group 0 = 0x80, phase A drives code 2
        assert_eq!(lut.phase(0, 0, 0), 0b10);
        assert_eq!(lut.phase(0, 0, 1), 0);
        // VS0 group 1 = 0x66
        assert_eq!(lut.phase(0, 1, 0), 0b01);
        assert_eq!(lut.phase(0, 1, 1), 0b10);
        assert_eq!(
            lut.timing(0),
            GroupTiming {
                tp_a: 0x14,
                tp_b: 0x08,
                sr_ab: 0,
                tp_c: 0,
                tp_d: 0,
                sr_cd: 0,
                rp: 0x01,
            }
        );
        assert_eq!(lut.frame_rate(0), 4);
        assert_eq!(lut.frame_rate(11), 4);
        assert!(!lut.xon(0, PhasePair::Ab));
        assert_eq!(
            (lut.eopt(), lut.vgh(), lut.vsh1(), lut.vsh2(), lut.vsl(), lut.vcom()),
            (0x22, 0x17, 0x41, 0x00, 0x32, 0x36)
        );
    }

    #[test]
    fn vendor_partial_waveform() {
        let lut = &LUT_PARTIAL_2IN9_V2;
        assert_eq!(lut.phase(0, 1, 0), 0b01);
        assert_eq!(lut.phase(0, 1, 1), 0);
        assert_eq!(lut.phase(1, 0, 0), 0b10);
        assert_eq!(lut.timing(0).tp_a, 0x0A);
        assert_eq!(lut.timing(0).rp, 0);
        assert_eq!(lut.timing(1).tp_a, 0x01);
        assert_eq!(lut.frame_rate(0), 2);
        assert_eq!(lut.vsh2(), 0xB0);
    }
}
