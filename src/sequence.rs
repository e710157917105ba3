//! Declarative protocol steps
//!
//! Every panel is described by lists of [`Step`]s which [`Epd`](crate::epd::Epd)
//! runs in order. Payloads that depend on the panel size are computed from the
//! descriptor when the step runs.

use crate::lut::Lut;

/// Source of the bytes following a RAM write command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Plane {
    /// The black/white plane
    Black,
    /// The accent plane, skipped on black/white panels
    Accent,
    /// The black/white plane as transferred on the previous update
    Previous,
    /// One plane worth of a constant byte
    Fill(u8),
    /// The black/white plane with every pixel widened to a nibble, set bits become 0x3
    BlackNibbles,
}

/// Layout of the resolution command of the UC81xx controllers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ResolutionFormat {
    /// `[width, height >> 8, height]`, width below 256
    Narrow,
    /// `[width >> 8, width, height >> 8, height]`
    Wide,
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Step {
    /// Command without data
    Cmd(u8),
    /// Command and its data
    CmdData(u8, &'static [u8]),
    /// Blocking delay in ms
    Delay(u32),
    /// Wait for the busy line with the panel's idle timeout
    WaitIdle,
    /// Wait for the busy line with a timeout of its own
    WaitIdleFor(u32),
    /// Hardware reset pulse
    Reset,
    /// The panel's initialisation sequence
    Initialize,
    /// Driver output control (0x01): `[height - 1, (height - 1) >> 8, scan]`
    DriverOutput(u8),
    /// RAM window (0x44, 0x45) spanning the whole panel
    RamWindow,
    /// RAM address counter (0x4E, 0x4F) to the origin
    RamCursor,
    /// Resolution setting (0x61)
    Resolution(ResolutionFormat),
    /// A RAM write command followed by a plane
    WritePlane(u8, Plane),
    /// Waveform through the SSD1680/SSD1681 LUT registers
    LoadLut(&'static Lut),
    /// Keep the black/white plane for the next [`Plane::Previous`]
    RememberFrame,
    /// The controller has put itself into deep sleep
    Asleep,
}

/// Steps around the transfer of one refresh kind
#[derive(Debug, Clone, Copy)]
pub(crate) struct Phase {
    /// Run before the transfer, e.g. to switch the waveform
    pub prelude: &'static [Step],
    /// Transfer, refresh trigger and the wait for its end
    pub transfer: &'static [Step],
}

/// Everything a panel needs besides its dimensions and timing
#[derive(Debug, Clone, Copy)]
pub(crate) struct Protocol {
    pub init: &'static [Step],
    pub full: Phase,
    /// Panels without one always refresh fully
    pub partial: Option<Phase>,
    pub deep_sleep: &'static [Step],
    /// Only run a prelude if the refresh kind changed since the last update
    pub prelude_on_change_only: bool,
}

impl Protocol {
    /// Whether any step of the panel uses [`Plane::Previous`]
    pub(crate) fn keeps_previous_frame(&self) -> bool {
        let phases = core::iter::once(&self.full).chain(self.partial.as_ref());
        phases
            .flat_map(|phase| phase.prelude.iter().chain(phase.transfer.iter()))
            .any(|step| matches!(step, Step::WritePlane(_, Plane::Previous)))
    }

    /// Whether every update starts from a hardware reset
    pub(crate) fn resets_on_update(&self) -> bool {
        self.partial.is_none() && matches!(self.full.prelude.first(), Some(Step::Reset))
    }
}
