//! Supported panels and their descriptors

use crate::color::ColorRule;
use crate::framebuffer::{buffer_len, line_bytes, AccentPolarity, BitPolarity};
use crate::interface::{BusyPolarity, ResetPulse};
use crate::sequence::Protocol;
use crate::{ssd16xx, uc81xx};

/// How a panel picks the kind of each refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPolicy {
    /// Partial refreshes with a full one every `full_update_every` updates
    Counter,
    /// Every update is a full refresh
    AlwaysFull,
}

/// Everything that differs between two panels
///
/// Descriptors are `'static` and never change, see [`Model::descriptor`].
#[derive(Debug, Clone, Copy)]
pub struct PanelDescriptor {
    pub name: &'static str,
    /// Visible width in pixels
    pub width: u32,
    /// Visible height in pixels
    pub height: u32,
    /// Row width of the controller RAM, at least `width`
    pub controller_width: u32,
    pub bw_polarity: BitPolarity,
    /// Accent plane, if the panel has one
    pub accent: Option<AccentPolarity>,
    pub color_rule: ColorRule,
    pub busy: BusyPolarity,
    /// Command sent before each sample of the busy line
    pub busy_probe: Option<u8>,
    pub idle_timeout_ms: u32,
    /// Fixed wait replacing every busy wait if no busy line is connected
    pub no_busy_delay_ms: u32,
    pub reset: ResetPulse,
    /// The controller takes a 159 byte waveform through [`Epd::load_lut`](crate::epd::Epd::load_lut)
    pub custom_lut: bool,
    pub(crate) protocol: Protocol,
}

impl PanelDescriptor {
    pub fn refresh_policy(&self) -> RefreshPolicy {
        match self.protocol.partial {
            Some(_) => RefreshPolicy::Counter,
            None => RefreshPolicy::AlwaysFull,
        }
    }

    pub fn plane_count(&self) -> usize {
        if self.accent.is_some() {
            2
        } else {
            1
        }
    }

    /// Size of all planes of the framebuffer in bytes
    pub fn buffer_len(&self) -> usize {
        buffer_len(
            self.controller_width as usize,
            self.height as usize,
            self.plane_count(),
        )
    }

    /// Bytes of one row in controller RAM
    pub(crate) fn row_bytes(&self) -> usize {
        line_bytes(self.controller_width, 1)
    }
}

/// All supported panels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Model {
    /// Waveshare 1.54" (SSD1608)
    Waveshare1in54,
    /// Waveshare 1.54" V2 (SSD1681)
    Waveshare1in54V2,
    /// Waveshare 2.13" (SSD1675), 122 visible columns of 128
    Waveshare2in13,
    /// LilyGo T5 2.13" (SSD1608 compatible)
    TtgoEpaper2in13,
    /// Waveshare 2.9" (SSD1608)
    Waveshare2in9,
    /// Waveshare 2.9" V2 (SSD1680)
    Waveshare2in9V2,
    /// Waveshare 2.9" black/white/red V4 (SSD1680)
    Waveshare2in9BV4,
    /// Waveshare 1.54" black/white/red V2 (SSD1681)
    Waveshare1in54BV2,
    /// Waveshare 2.7" (IL91874)
    Waveshare2in7,
    /// Waveshare 2.9" black/white/red (IL0373)
    Waveshare2in9B,
    /// Waveshare 4.2" (UC8176)
    Waveshare4in2,
    /// Waveshare 5.83" (UC8159)
    Waveshare5in83,
    /// Waveshare 7.5" (UC8159)
    Waveshare7in5,
    /// Waveshare 7.5" V2 (UC8179)
    Waveshare7in5V2,
    /// Waveshare 7.5" black/white/red V2 (UC8179)
    Waveshare7in5BV2,
    /// Good Display 1.54" (JD79653A)
    Gdew0154m09,
}

impl Model {
    /// Every variant, in declaration order
    pub const ALL: [Model; 16] = [
        Model::Waveshare1in54,
        Model::Waveshare1in54V2,
        Model::Waveshare2in13,
        Model::TtgoEpaper2in13,
        Model::Waveshare2in9,
        Model::Waveshare2in9V2,
        Model::Waveshare2in9BV4,
        Model::Waveshare1in54BV2,
        Model::Waveshare2in7,
        Model::Waveshare2in9B,
        Model::Waveshare4in2,
        Model::Waveshare5in83,
        Model::Waveshare7in5,
        Model::Waveshare7in5V2,
        Model::Waveshare7in5BV2,
        Model::Gdew0154m09,
    ];

    pub fn descriptor(self) -> &'static PanelDescriptor {
        match self {
            Model::Waveshare1in54 => &ssd16xx::WAVESHARE_1IN54,
            Model::Waveshare1in54V2 => &ssd16xx::WAVESHARE_1IN54_V2,
            Model::Waveshare2in13 => &ssd16xx::WAVESHARE_2IN13,
            Model::TtgoEpaper2in13 => &ssd16xx::TTGO_EPAPER_2IN13,
            Model::Waveshare2in9 => &ssd16xx::WAVESHARE_2IN9,
            Model::Waveshare2in9V2 => &ssd16xx::WAVESHARE_2IN9_V2,
            Model::Waveshare2in9BV4 => &ssd16xx::WAVESHARE_2IN9B_V4,
            Model::Waveshare1in54BV2 => &ssd16xx::WAVESHARE_1IN54B_V2,
            Model::Waveshare2in7 => &uc81xx::WAVESHARE_2IN7,
            Model::Waveshare2in9B => &uc81xx::WAVESHARE_2IN9B,
            Model::Waveshare4in2 => &uc81xx::WAVESHARE_4IN2,
            Model::Waveshare5in83 => &uc81xx::WAVESHARE_5IN83,
            Model::Waveshare7in5 => &uc81xx::WAVESHARE_7IN5,
            Model::Waveshare7in5V2 => &uc81xx::WAVESHARE_7IN5_V2,
            Model::Waveshare7in5BV2 => &uc81xx::WAVESHARE_7IN5B_V2,
            Model::Gdew0154m09 => &uc81xx::GDEW0154M09,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::{Plane, Step};

    #[test]
    fn buffer_len_per_model() {
        let expected = [
            (Model::Waveshare1in54, 5_000),
            (Model::Waveshare1in54V2, 5_000),
            (Model::Waveshare2in13, 16 * 250),
            (Model::TtgoEpaper2in13, 16 * 250),
            (Model::Waveshare2in9, 4_736),
            (Model::Waveshare2in9V2, 4_736),
            (Model::Waveshare2in9BV4, 2 * 4_736),
            (Model::Waveshare1in54BV2, 2 * 5_000),
            (Model::Waveshare2in7, 22 * 264),
            (Model::Waveshare2in9B, 2 * 4_736),
            (Model::Waveshare4in2, 15_000),
            (Model::Waveshare5in83, 75 * 448),
            (Model::Waveshare7in5, 80 * 384),
            (Model::Waveshare7in5V2, 48_000),
            (Model::Waveshare7in5BV2, 2 * 48_000),
            (Model::Gdew0154m09, 5_000),
        ];
        for (model, len) in expected {
            let d = model.descriptor();
            assert_eq!(d.buffer_len(), len, "{}", d.name);
            assert_eq!(
                d.buffer_len(),
                (d.controller_width as usize + 7) / 8 * d.height as usize * d.plane_count()
            );
        }
        assert_eq!(expected.len(), Model::ALL.len());
    }

    #[test]
    fn controller_width_covers_visible_width() {
        for model in Model::ALL {
            let d = model.descriptor();
            assert!(d.controller_width >= d.width, "{}", d.name);
            assert_eq!(d.row_bytes(), (d.controller_width as usize + 7) / 8);
        }
        let d = Model::Waveshare2in13.descriptor();
        assert_eq!((d.width, d.controller_width), (122, 128));
    }

    #[test]
    fn refresh_policies() {
        let counter = [
            Model::Waveshare1in54,
            Model::Waveshare1in54V2,
            Model::Waveshare2in13,
            Model::TtgoEpaper2in13,
            Model::Waveshare2in9,
            Model::Waveshare2in9V2,
            Model::Waveshare2in9BV4,
            Model::Waveshare1in54BV2,
        ];
        for model in Model::ALL {
            let expected = if counter.contains(&model) {
                RefreshPolicy::Counter
            } else {
                RefreshPolicy::AlwaysFull
            };
            assert_eq!(model.descriptor().refresh_policy(), expected, "{:?}", model);
        }
    }

    #[test]
    fn accent_steps_only_on_tricolor_panels() {
        for model in Model::ALL {
            let d = model.descriptor();
            let p = &d.protocol;
            let phases = core::iter::once(&p.full).chain(p.partial.as_ref());
            let writes_accent = phases
                .flat_map(|phase| phase.prelude.iter().chain(phase.transfer.iter()))
                .any(|step| matches!(step, Step::WritePlane(_, Plane::Accent)));
            assert_eq!(writes_accent, d.accent.is_some(), "{}", d.name);
        }
    }

    #[test]
    fn only_gdew_keeps_previous_frame() {
        for model in Model::ALL {
            let keeps = model.descriptor().protocol.keeps_previous_frame();
            assert_eq!(keeps, model == Model::Gdew0154m09, "{:?}", model);
        }
    }

    #[test]
    fn status_probe_on_uc8179_only() {
        for model in Model::ALL {
            let probe = model.descriptor().busy_probe;
            if model == Model::Waveshare7in5V2 {
                assert_eq!(probe, Some(0x71));
            } else {
                assert_eq!(probe, None, "{:?}", model);
            }
        }
    }
}
