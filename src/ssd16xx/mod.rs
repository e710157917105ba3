//! Panels driven by SSD16xx controllers
//!
//! These write the frame to RAM with 0x24 (and 0x26) and start the refresh with
//! master activation (0x20). The busy line is high while the controller works.
//!
//! The older "type A" parts (SSD1608, SSD1675) take a 30 byte waveform and get
//! it rewritten whenever the refresh kind changes. The SSD1680 and SSD1681 parts
//! carry their waveforms in OTP or take a 159 byte [`Lut`](crate::lut::Lut).

pub(crate) mod command;
pub mod constants;

use self::command::Command as C;
use self::constants::*;
use crate::color::ColorRule;
use crate::framebuffer::{AccentPolarity, BitPolarity};
use crate::interface::{BusyPolarity, ResetPulse};
use crate::model::PanelDescriptor;
use crate::sequence::{Phase, Plane, Protocol, Step};

const TYPE_A_INIT: &[Step] = &[
    Step::DriverOutput(0x00),
    Step::CmdData(C::BoosterSoftStartControl as u8, &[0xD7, 0xD6, 0x9D]),
    Step::CmdData(C::WriteVcomRegister as u8, &[0xA8]),
    Step::CmdData(C::SetDummyLinePeriod as u8, &[0x1A]),
    Step::CmdData(C::SetGateLineWidth as u8, &[0x08]),
    Step::CmdData(C::DataEntryModeSetting as u8, &[DATA_ENTRY_INCR_X_INCR_Y]),
];

const TYPE_A_TRANSFER: &[Step] = &[
    Step::WaitIdle,
    Step::RamWindow,
    Step::RamCursor,
    Step::WaitIdle,
    Step::WritePlane(C::WriteRam as u8, Plane::Black),
    Step::CmdData(C::DisplayUpdateControl2 as u8, &[UPDATE_TYPE_A]),
    Step::Cmd(C::MasterActivation as u8),
    Step::Cmd(C::Nop as u8),
    Step::WaitIdle,
];

const TYPE_A: Protocol = Protocol {
    init: TYPE_A_INIT,
    full: Phase {
        prelude: &[Step::CmdData(C::WriteLutRegister as u8, &LUT_FULL_UPDATE)],
        transfer: TYPE_A_TRANSFER,
    },
    partial: Some(Phase {
        prelude: &[Step::CmdData(C::WriteLutRegister as u8, &LUT_PARTIAL_UPDATE)],
        transfer: TYPE_A_TRANSFER,
    }),
    deep_sleep: &[Step::Cmd(C::DeepSleepMode as u8), Step::WaitIdle],
    prelude_on_change_only: true,
};

const TYPE_A_RESET: ResetPulse = ResetPulse::new(200, 200);

pub(crate) const WAVESHARE_1IN54: PanelDescriptor = PanelDescriptor {
    name: "Waveshare 1.54in",
    width: 200,
    height: 200,
    controller_width: 200,
    bw_polarity: BitPolarity::SetIsWhite,
    accent: None,
    color_rule: ColorRule::Monochrome,
    busy: BusyPolarity::ActiveHigh,
    busy_probe: None,
    idle_timeout_ms: 2_500,
    no_busy_delay_ms: 2_000,
    reset: TYPE_A_RESET,
    custom_lut: false,
    protocol: Protocol {
        deep_sleep: &[
            Step::CmdData(C::DeepSleepMode as u8, &[0x01]),
            Step::WaitIdle,
        ],
        ..TYPE_A
    },
};

pub(crate) const WAVESHARE_2IN13: PanelDescriptor = PanelDescriptor {
    name: "Waveshare 2.13in",
    width: 122,
    height: 250,
    controller_width: 128,
    bw_polarity: BitPolarity::SetIsWhite,
    accent: None,
    color_rule: ColorRule::Monochrome,
    busy: BusyPolarity::ActiveHigh,
    busy_probe: None,
    idle_timeout_ms: 1_000,
    no_busy_delay_ms: 2_000,
    reset: TYPE_A_RESET,
    custom_lut: false,
    protocol: TYPE_A,
};

pub(crate) const TTGO_EPAPER_2IN13: PanelDescriptor = PanelDescriptor {
    name: "TTGO 2.13in",
    protocol: Protocol {
        full: Phase {
            prelude: &[Step::CmdData(
                C::WriteLutRegister as u8,
                &LUT_FULL_UPDATE_TTGO,
            )],
            transfer: TYPE_A_TRANSFER,
        },
        partial: Some(Phase {
            prelude: &[Step::CmdData(
                C::WriteLutRegister as u8,
                &LUT_PARTIAL_UPDATE_TTGO,
            )],
            transfer: TYPE_A_TRANSFER,
        }),
        ..TYPE_A
    },
    ..WAVESHARE_2IN13
};

pub(crate) const WAVESHARE_2IN9: PanelDescriptor = PanelDescriptor {
    name: "Waveshare 2.9in",
    width: 128,
    height: 296,
    controller_width: 128,
    ..WAVESHARE_2IN13
};

const V2_RESET_AND_INIT: &[Step] = &[Step::Reset, Step::Initialize];

pub(crate) const WAVESHARE_1IN54_V2: PanelDescriptor = PanelDescriptor {
    name: "Waveshare 1.54in V2",
    width: 200,
    height: 200,
    controller_width: 200,
    bw_polarity: BitPolarity::SetIsWhite,
    accent: None,
    color_rule: ColorRule::Monochrome,
    busy: BusyPolarity::ActiveHigh,
    busy_probe: None,
    idle_timeout_ms: 2_500,
    no_busy_delay_ms: 2_000,
    reset: ResetPulse::framed(10, 10, 200),
    custom_lut: false,
    protocol: Protocol {
        init: &[
            Step::WaitIdle,
            Step::Cmd(C::SwReset as u8),
            Step::WaitIdle,
            Step::DriverOutput(0x00),
            Step::CmdData(C::DataEntryModeSetting as u8, &[DATA_ENTRY_INCR_X_INCR_Y]),
            Step::RamWindow,
            Step::CmdData(C::BorderWaveformControl as u8, &[0x01]),
            Step::CmdData(C::TemperatureSensorSelection as u8, &[0x80]),
            Step::CmdData(C::DisplayUpdateControl2 as u8, &[UPDATE_LOAD_TEMP]),
            Step::Cmd(C::MasterActivation as u8),
            Step::WaitIdle,
            Step::RamCursor,
            Step::WaitIdle,
        ],
        full: Phase {
            prelude: &[],
            transfer: &[
                Step::RamCursor,
                Step::WritePlane(C::WriteRam as u8, Plane::Black),
                Step::RamCursor,
                Step::WritePlane(C::WriteRam2 as u8, Plane::Black),
                Step::CmdData(C::DisplayUpdateControl2 as u8, &[UPDATE_FULL_OTP]),
                Step::Cmd(C::MasterActivation as u8),
                Step::WaitIdle,
            ],
        },
        partial: Some(Phase {
            prelude: &[],
            transfer: &[
                Step::RamCursor,
                Step::WritePlane(C::WriteRam as u8, Plane::Black),
                Step::CmdData(C::DisplayUpdateControl2 as u8, &[UPDATE_PARTIAL_OTP]),
                Step::Cmd(C::MasterActivation as u8),
                Step::WaitIdle,
            ],
        }),
        deep_sleep: &[
            Step::CmdData(C::DeepSleepMode as u8, &[0x01]),
            Step::WaitIdle,
        ],
        prelude_on_change_only: false,
    },
};

pub(crate) const WAVESHARE_2IN9_V2: PanelDescriptor = PanelDescriptor {
    name: "Waveshare 2.9in V2",
    width: 128,
    height: 296,
    controller_width: 128,
    bw_polarity: BitPolarity::SetIsWhite,
    accent: None,
    color_rule: ColorRule::Monochrome,
    busy: BusyPolarity::ActiveHigh,
    busy_probe: None,
    idle_timeout_ms: 3_000,
    no_busy_delay_ms: 2_000,
    reset: ResetPulse::framed(10, 2, 200),
    custom_lut: true,
    protocol: Protocol {
        init: &[
            Step::WaitIdle,
            Step::Cmd(C::SwReset as u8),
            Step::WaitIdle,
            Step::DriverOutput(0x00),
            Step::CmdData(C::DataEntryModeSetting as u8, &[DATA_ENTRY_INCR_X_INCR_Y]),
            Step::RamWindow,
            Step::CmdData(C::DisplayUpdateControl1 as u8, &[0x00, 0x80]),
            Step::RamCursor,
            Step::WaitIdle,
            Step::LoadLut(&LUT_FULL_2IN9_V2),
        ],
        full: Phase {
            prelude: V2_RESET_AND_INIT,
            transfer: &[
                Step::RamCursor,
                Step::WritePlane(C::WriteRam as u8, Plane::Black),
                Step::RamCursor,
                Step::WritePlane(C::WriteRam2 as u8, Plane::Black),
                Step::CmdData(C::DisplayUpdateControl2 as u8, &[UPDATE_FULL_REGISTER]),
                Step::Cmd(C::MasterActivation as u8),
                Step::WaitIdle,
            ],
        },
        partial: Some(Phase {
            prelude: &[],
            transfer: &[
                Step::WaitIdle,
                Step::Reset,
                Step::LoadLut(&LUT_PARTIAL_2IN9_V2),
                Step::CmdData(C::WriteOtpSelection as u8, &DISPLAY_OPTION_PARTIAL),
                Step::CmdData(C::BorderWaveformControl as u8, &[0x80]),
                Step::CmdData(C::DisplayUpdateControl2 as u8, &[UPDATE_POWER_UP]),
                Step::Cmd(C::MasterActivation as u8),
                Step::WaitIdle,
                Step::RamWindow,
                Step::RamCursor,
                Step::WritePlane(C::WriteRam as u8, Plane::Black),
                Step::CmdData(
                    C::DisplayUpdateControl2 as u8,
                    &[UPDATE_PARTIAL_REGISTER],
                ),
                Step::Cmd(C::MasterActivation as u8),
                Step::WaitIdle,
            ],
        }),
        deep_sleep: &[
            Step::CmdData(C::DeepSleepMode as u8, &[0x01]),
            Step::WaitIdle,
        ],
        prelude_on_change_only: false,
    },
};

pub(crate) const WAVESHARE_2IN9B_V4: PanelDescriptor = PanelDescriptor {
    name: "Waveshare 2.9in B V4",
    width: 128,
    height: 296,
    controller_width: 128,
    bw_polarity: BitPolarity::SetIsWhite,
    accent: Some(AccentPolarity::SetIsAccent),
    color_rule: ColorRule::RedAccent,
    busy: BusyPolarity::ActiveHigh,
    busy_probe: None,
    idle_timeout_ms: 30_000,
    no_busy_delay_ms: 20_000,
    reset: ResetPulse::framed(200, 2, 200),
    custom_lut: true,
    protocol: Protocol {
        init: &[
            Step::WaitIdle,
            Step::Cmd(C::SwReset as u8),
            Step::WaitIdle,
            Step::DriverOutput(0x00),
            Step::CmdData(C::DataEntryModeSetting as u8, &[DATA_ENTRY_INCR_X_INCR_Y]),
            Step::RamWindow,
            Step::CmdData(C::BorderWaveformControl as u8, &[0x05]),
            Step::CmdData(C::DisplayUpdateControl1 as u8, &[0x00, 0x80]),
            Step::CmdData(C::TemperatureSensorSelection as u8, &[0x80]),
            Step::RamCursor,
            Step::WaitIdle,
        ],
        full: Phase {
            prelude: V2_RESET_AND_INIT,
            transfer: &[
                Step::RamCursor,
                Step::WritePlane(C::WriteRam as u8, Plane::Black),
                Step::RamCursor,
                Step::WritePlane(C::WriteRam2 as u8, Plane::Accent),
                Step::CmdData(C::DisplayUpdateControl2 as u8, &[UPDATE_FULL_OTP]),
                Step::Cmd(C::MasterActivation as u8),
                Step::WaitIdle,
            ],
        },
        partial: Some(Phase {
            prelude: &[],
            transfer: &[
                Step::RamCursor,
                Step::WritePlane(C::WriteRam as u8, Plane::Black),
                Step::CmdData(C::DisplayUpdateControl2 as u8, &[UPDATE_PARTIAL_RED_RAM]),
                Step::Cmd(C::MasterActivation as u8),
                Step::WaitIdle,
            ],
        }),
        // the controller stops answering, no wait
        deep_sleep: &[
            Step::CmdData(C::DeepSleepMode as u8, &[0x01]),
            Step::Delay(100),
        ],
        prelude_on_change_only: false,
    },
};

pub(crate) const WAVESHARE_1IN54B_V2: PanelDescriptor = PanelDescriptor {
    name: "Waveshare 1.54in B V2",
    width: 200,
    height: 200,
    controller_width: 200,
    bw_polarity: BitPolarity::SetIsWhite,
    accent: Some(AccentPolarity::SetIsAccent),
    color_rule: ColorRule::RedAccent,
    busy: BusyPolarity::ActiveHigh,
    busy_probe: None,
    idle_timeout_ms: 10_000,
    no_busy_delay_ms: 20_000,
    reset: ResetPulse::framed(10, 200, 10),
    custom_lut: true,
    protocol: Protocol {
        init: &[
            Step::WaitIdle,
            Step::Cmd(C::SwReset as u8),
            Step::WaitIdleFor(1_000),
            Step::DriverOutput(0x00),
            Step::CmdData(C::DataEntryModeSetting as u8, &[DATA_ENTRY_INCR_X_INCR_Y]),
            Step::RamWindow,
            Step::CmdData(C::BorderWaveformControl as u8, &[0x05]),
            Step::CmdData(C::TemperatureSensorSelection as u8, &[0x80]),
            Step::RamCursor,
            Step::WaitIdle,
        ],
        full: Phase {
            prelude: V2_RESET_AND_INIT,
            transfer: &[
                Step::WritePlane(C::WriteRam as u8, Plane::Black),
                Step::WritePlane(C::WriteRam2 as u8, Plane::Accent),
                Step::CmdData(C::DisplayUpdateControl2 as u8, &[UPDATE_FULL_OTP]),
                Step::Cmd(C::MasterActivation as u8),
                Step::WaitIdle,
            ],
        },
        partial: Some(Phase {
            prelude: &[],
            transfer: &[
                Step::WritePlane(C::WriteRam as u8, Plane::Black),
                Step::CmdData(C::DisplayUpdateControl2 as u8, &[UPDATE_FULL_REGISTER]),
                Step::Cmd(C::MasterActivation as u8),
                Step::WaitIdle,
            ],
        }),
        deep_sleep: &[
            Step::CmdData(C::DeepSleepMode as u8, &[0x01]),
            Step::Delay(10),
        ],
        prelude_on_change_only: false,
    },
};
