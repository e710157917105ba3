//! Panels driven by UC81xx style controllers
//!
//! These are powered on explicitly (0x04), take the frame through the data
//! start transmission commands (0x10, 0x13) and refresh with 0x12. The busy
//! line is low while the controller works. None of them has a partial
//! refresh here, every update redraws the whole panel.

pub(crate) mod command;
pub(crate) mod constants;

use self::command::Command as C;
use self::constants::*;
use crate::color::ColorRule;
use crate::framebuffer::{AccentPolarity, BitPolarity};
use crate::interface::{BusyPolarity, ResetPulse};
use crate::model::PanelDescriptor;
use crate::sequence::{Phase, Plane, Protocol, ResolutionFormat, Step};

const DEEP_SLEEP: Step = Step::CmdData(C::DeepSleep as u8, &[DEEP_SLEEP_CHECK]);

/// Power off, wait for it, then sleep
const POWER_OFF_AND_SLEEP: &[Step] = &[
    Step::Cmd(C::PowerOff as u8),
    Step::WaitIdle,
    DEEP_SLEEP,
];

const BASE_RESET: ResetPulse = ResetPulse::new(200, 200);

pub(crate) const WAVESHARE_2IN7: PanelDescriptor = PanelDescriptor {
    name: "Waveshare 2.7in",
    width: 176,
    height: 264,
    controller_width: 176,
    bw_polarity: BitPolarity::SetIsWhite,
    accent: None,
    color_rule: ColorRule::Monochrome,
    busy: BusyPolarity::ActiveLow,
    busy_probe: None,
    idle_timeout_ms: 10_000,
    no_busy_delay_ms: 6_000,
    reset: BASE_RESET,
    custom_lut: false,
    protocol: Protocol {
        init: &[
            Step::CmdData(C::PowerSetting as u8, &[0x03, 0x00, 0x2B, 0x2B, 0x09]),
            Step::CmdData(C::BoosterSoftStart as u8, &[0x07, 0x07, 0x17]),
            // vendor register patches
            Step::CmdData(C::Il91874RegisterPatch as u8, &[0x60, 0xA5]),
            Step::CmdData(C::Il91874RegisterPatch as u8, &[0x89, 0xA5]),
            Step::CmdData(C::Il91874RegisterPatch as u8, &[0x90, 0x00]),
            Step::CmdData(C::Il91874RegisterPatch as u8, &[0x93, 0x2A]),
            Step::CmdData(C::Il91874RegisterPatch as u8, &[0xA0, 0xA5]),
            Step::CmdData(C::Il91874RegisterPatch as u8, &[0xA1, 0x00]),
            Step::CmdData(C::Il91874RegisterPatch as u8, &[0x73, 0x41]),
            Step::CmdData(C::PartialDisplayRefresh as u8, &[0x00]),
            Step::Cmd(C::PowerOn as u8),
            Step::WaitIdle,
            Step::CmdData(C::PanelSetting as u8, &[0xAF]),
            Step::CmdData(C::PllControl as u8, &[0x3A]),
            Step::CmdData(C::VcmDcSetting as u8, &[0x12]),
            Step::CmdData(C::LutForVcom as u8, &LUT_VCOM_DC_2IN7),
            Step::CmdData(C::LutWhiteToWhite as u8, &LUT_WW_2IN7),
            Step::CmdData(C::LutBlackToWhite as u8, &LUT_BW_2IN7),
            Step::CmdData(C::LutWhiteToBlack as u8, &LUT_WB_2IN7),
            Step::CmdData(C::LutBlackToBlack as u8, &LUT_BB_2IN7),
        ],
        full: Phase {
            prelude: &[],
            transfer: &[
                Step::WritePlane(C::DataStartTransmission1 as u8, Plane::Fill(0xFF)),
                Step::Delay(2),
                Step::WritePlane(C::DataStartTransmission2 as u8, Plane::Black),
                Step::Delay(2),
                Step::Cmd(C::DisplayRefresh as u8),
                Step::WaitIdle,
            ],
        },
        partial: None,
        deep_sleep: &[DEEP_SLEEP],
        prelude_on_change_only: false,
    },
};

pub(crate) const WAVESHARE_2IN9B: PanelDescriptor = PanelDescriptor {
    name: "Waveshare 2.9in B",
    width: 128,
    height: 296,
    controller_width: 128,
    bw_polarity: BitPolarity::SetIsWhite,
    accent: Some(AccentPolarity::ClearIsAccent),
    color_rule: ColorRule::RedAccent,
    busy: BusyPolarity::ActiveLow,
    busy_probe: None,
    idle_timeout_ms: 20_000,
    no_busy_delay_ms: 20_000,
    reset: BASE_RESET,
    custom_lut: false,
    protocol: Protocol {
        init: &[
            Step::CmdData(C::BoosterSoftStart as u8, &[0x17, 0x17, 0x17]),
            Step::Cmd(C::PowerOn as u8),
            Step::Delay(5),
            Step::WaitIdle,
            Step::CmdData(C::PanelSetting as u8, &[0x8F]),
            Step::CmdData(C::VcomAndDataIntervalSetting as u8, &[0x77]),
            Step::Resolution(ResolutionFormat::Narrow),
            Step::CmdData(C::VcmDcSetting as u8, &[0x0A]),
            Step::WaitIdle,
        ],
        full: Phase {
            prelude: &[],
            transfer: &[
                Step::WritePlane(C::DataStartTransmission1 as u8, Plane::Black),
                Step::Delay(2),
                Step::WritePlane(C::DataStartTransmission2 as u8, Plane::Accent),
                Step::Delay(2),
                Step::Cmd(C::DisplayRefresh as u8),
                Step::Delay(2),
                Step::WaitIdle,
                Step::Cmd(C::PowerOff as u8),
            ],
        },
        partial: None,
        deep_sleep: &[DEEP_SLEEP],
        prelude_on_change_only: false,
    },
};

pub(crate) const WAVESHARE_4IN2: PanelDescriptor = PanelDescriptor {
    name: "Waveshare 4.2in",
    width: 400,
    height: 300,
    controller_width: 400,
    bw_polarity: BitPolarity::SetIsWhite,
    accent: None,
    color_rule: ColorRule::Monochrome,
    busy: BusyPolarity::ActiveLow,
    busy_probe: None,
    idle_timeout_ms: 10_000,
    no_busy_delay_ms: 5_000,
    reset: BASE_RESET,
    custom_lut: false,
    protocol: Protocol {
        init: &[
            Step::CmdData(C::PowerSetting as u8, &[0x03, 0x00, 0x2B, 0x2B, 0xFF]),
            Step::CmdData(C::BoosterSoftStart as u8, &[0x17, 0x17, 0x17]),
            Step::Cmd(C::PowerOn as u8),
            Step::WaitIdle,
            Step::Delay(10),
            // 400x300, LUT from register
            Step::CmdData(C::PanelSetting as u8, &[0xBF, 0x0B]),
            Step::CmdData(C::PllControl as u8, &[0x3C]),
            Step::Delay(2),
            Step::CmdData(C::LutForVcom as u8, &LUT_VCOM_DC_4IN2),
            Step::CmdData(C::LutWhiteToWhite as u8, &LUT_WW_4IN2),
            Step::CmdData(C::LutBlackToWhite as u8, &LUT_BW_4IN2),
            Step::CmdData(C::LutWhiteToBlack as u8, &LUT_WB_4IN2),
            Step::CmdData(C::LutBlackToBlack as u8, &LUT_BB_4IN2),
        ],
        full: Phase {
            prelude: &[],
            transfer: &[
                Step::Resolution(ResolutionFormat::Wide),
                Step::CmdData(C::VcmDcSetting as u8, &[0x12]),
                Step::CmdData(C::VcomAndDataIntervalSetting as u8, &[0x97]),
                Step::WritePlane(C::DataStartTransmission1 as u8, Plane::Fill(0xFF)),
                Step::Delay(2),
                Step::WritePlane(C::DataStartTransmission2 as u8, Plane::Black),
                Step::Delay(2),
                Step::Cmd(C::DisplayRefresh as u8),
                Step::Delay(15),
                Step::WaitIdle,
            ],
        },
        partial: None,
        deep_sleep: &[
            // border floating
            Step::CmdData(C::VcomAndDataIntervalSetting as u8, &[0x17]),
            Step::Cmd(C::VcmDcSetting as u8),
            Step::Cmd(C::PanelSetting as u8),
            Step::Delay(100),
            Step::CmdData(C::PowerSetting as u8, &[0x00; 5]),
            Step::Delay(100),
            Step::Cmd(C::PowerOff as u8),
            Step::WaitIdle,
            DEEP_SLEEP,
        ],
        prelude_on_change_only: false,
    },
};

const UC8159_INIT: &[Step] = &[
    Step::CmdData(C::PowerSetting as u8, &[0x37, 0x00]),
    Step::CmdData(C::PanelSetting as u8, &[0xCF, 0x08]),
    Step::CmdData(C::BoosterSoftStart as u8, &[0xC7, 0xCC, 0x28]),
    Step::Cmd(C::PowerOn as u8),
    Step::WaitIdle,
    Step::CmdData(C::PllControl as u8, &[0x3C]),
    Step::CmdData(C::TemperatureSensorSelection as u8, &[0x00]),
    Step::CmdData(C::VcomAndDataIntervalSetting as u8, &[0x77]),
    Step::CmdData(C::TconSetting as u8, &[0x22]),
    Step::Resolution(ResolutionFormat::Wide),
    Step::CmdData(C::VcmDcSetting as u8, &[0x1E]),
    Step::CmdData(C::FlashMode as u8, &[0x03]),
];

const UC8159: Protocol = Protocol {
    init: UC8159_INIT,
    full: Phase {
        prelude: &[],
        transfer: &[
            Step::WritePlane(C::DataStartTransmission1 as u8, Plane::BlackNibbles),
            Step::Cmd(C::DisplayRefresh as u8),
            Step::WaitIdle,
        ],
    },
    partial: None,
    deep_sleep: POWER_OFF_AND_SLEEP,
    prelude_on_change_only: false,
};

pub(crate) const WAVESHARE_5IN83: PanelDescriptor = PanelDescriptor {
    name: "Waveshare 5.83in",
    width: 600,
    height: 448,
    controller_width: 600,
    bw_polarity: BitPolarity::SetIsWhite,
    accent: None,
    color_rule: ColorRule::Monochrome,
    busy: BusyPolarity::ActiveLow,
    busy_probe: None,
    idle_timeout_ms: 10_000,
    no_busy_delay_ms: 10_000,
    reset: BASE_RESET,
    custom_lut: false,
    protocol: UC8159,
};

pub(crate) const WAVESHARE_7IN5: PanelDescriptor = PanelDescriptor {
    name: "Waveshare 7.5in",
    width: 640,
    height: 384,
    controller_width: 640,
    ..WAVESHARE_5IN83
};

pub(crate) const WAVESHARE_7IN5_V2: PanelDescriptor = PanelDescriptor {
    name: "Waveshare 7.5in V2",
    width: 800,
    height: 480,
    controller_width: 800,
    bw_polarity: BitPolarity::SetIsBlack,
    accent: None,
    color_rule: ColorRule::Monochrome,
    busy: BusyPolarity::ActiveLow,
    busy_probe: Some(C::GetStatus as u8),
    idle_timeout_ms: 10_000,
    no_busy_delay_ms: 10_000,
    reset: ResetPulse::framed(200, 2, 20),
    custom_lut: false,
    protocol: Protocol {
        init: &[
            Step::CmdData(C::BoosterSoftStart as u8, &[0x17, 0x17, 0x27, 0x17]),
            Step::CmdData(C::PowerSetting as u8, &[0x07, 0x17, 0x3F, 0x3F]),
            Step::Cmd(C::PowerOn as u8),
            Step::Delay(100),
            Step::WaitIdle,
            // KW mode, LUT from OTP
            Step::CmdData(C::PanelSetting as u8, &[0x1F]),
            Step::CmdData(C::PllControl as u8, &[0x06]),
            Step::Resolution(ResolutionFormat::Wide),
            Step::CmdData(C::DualSpi as u8, &[0x00]),
            Step::CmdData(C::TconSetting as u8, &[0x22]),
            Step::CmdData(C::VcomAndDataIntervalSetting as u8, &[0x10, 0x07]),
        ],
        full: Phase {
            prelude: &[],
            transfer: &[
                Step::WritePlane(C::DataStartTransmission2 as u8, Plane::Black),
                Step::Cmd(C::DisplayRefresh as u8),
                Step::Delay(100),
                Step::WaitIdle,
            ],
        },
        partial: None,
        deep_sleep: POWER_OFF_AND_SLEEP,
        prelude_on_change_only: false,
    },
};

pub(crate) const WAVESHARE_7IN5B_V2: PanelDescriptor = PanelDescriptor {
    name: "Waveshare 7.5in B V2",
    width: 800,
    height: 480,
    controller_width: 800,
    bw_polarity: BitPolarity::SetIsWhite,
    accent: Some(AccentPolarity::SetIsAccent),
    color_rule: ColorRule::RedAccent,
    busy: BusyPolarity::ActiveLow,
    busy_probe: None,
    idle_timeout_ms: 30_000,
    no_busy_delay_ms: 30_000,
    reset: ResetPulse::framed(200, 2, 200),
    custom_lut: false,
    protocol: Protocol {
        init: &[
            Step::CmdData(C::PowerSetting as u8, &[0x07, 0x07, 0x3F, 0x3F]),
            Step::Cmd(C::PowerOn as u8),
            Step::WaitIdle,
            Step::CmdData(C::PanelSetting as u8, &[0x0F]),
            Step::Resolution(ResolutionFormat::Wide),
            Step::CmdData(C::DualSpi as u8, &[0x00]),
            Step::CmdData(C::VcomAndDataIntervalSetting as u8, &[0x11, 0x07]),
            Step::CmdData(C::TconSetting as u8, &[0x22]),
            Step::CmdData(C::SpiFlashControl as u8, &[0x00, 0x00, 0x00, 0x00]),
            Step::WaitIdle,
        ],
        full: Phase {
            prelude: &[],
            transfer: &[
                Step::WritePlane(C::DataStartTransmission1 as u8, Plane::Black),
                Step::WritePlane(C::DataStartTransmission2 as u8, Plane::Accent),
                Step::Cmd(C::DisplayRefresh as u8),
                Step::WaitIdle,
            ],
        },
        partial: None,
        deep_sleep: POWER_OFF_AND_SLEEP,
        prelude_on_change_only: false,
    },
};

/// Good Display 1.54" with the JD79653A
///
/// Every update starts from a hardware reset and ends with the controller's
/// auto sequence, which powers on, refreshes, powers off and sleeps. The old
/// frame goes to DTM1 so the controller can drive only the changed pixels.
pub(crate) const GDEW0154M09: PanelDescriptor = PanelDescriptor {
    name: "Good Display GDEW0154M09",
    width: 200,
    height: 200,
    controller_width: 200,
    bw_polarity: BitPolarity::SetIsWhite,
    accent: None,
    color_rule: ColorRule::Monochrome,
    busy: BusyPolarity::ActiveLow,
    busy_probe: None,
    idle_timeout_ms: 10_000,
    no_busy_delay_ms: 5_000,
    reset: ResetPulse::framed(10, 10, 10),
    custom_lut: false,
    protocol: Protocol {
        init: &[
            Step::CmdData(C::PanelSetting as u8, &[0xDF, 0x0E]),
            Step::CmdData(C::Jd79653Unknown4d as u8, &[0x55]),
            Step::CmdData(C::Jd79653UnknownAa as u8, &[0x0F]),
            Step::CmdData(C::Jd79653UnknownE9 as u8, &[0x02]),
            Step::CmdData(C::Jd79653UnknownB6 as u8, &[0x11]),
            Step::CmdData(C::Jd79653UnknownF3 as u8, &[0x0A]),
            Step::Resolution(ResolutionFormat::Narrow),
            Step::CmdData(C::TconSetting as u8, &[0x00]),
            Step::CmdData(C::VcomAndDataIntervalSetting as u8, &[0xD7]),
            Step::CmdData(C::PowerSaving as u8, &[0x00]),
            Step::Cmd(C::PowerOn as u8),
            Step::WaitIdle,
            Step::Delay(100),
        ],
        full: Phase {
            prelude: &[Step::Reset, Step::Initialize],
            transfer: &[
                Step::WritePlane(C::DataStartTransmission1 as u8, Plane::Previous),
                Step::WritePlane(C::DataStartTransmission2 as u8, Plane::Black),
                Step::RememberFrame,
                // power on, refresh, power off, deep sleep
                Step::CmdData(C::AutoSequence as u8, &[0xA7]),
                Step::WaitIdle,
                Step::Asleep,
            ],
        },
        partial: None,
        deep_sleep: POWER_OFF_AND_SLEEP,
        prelude_on_change_only: false,
    },
};
