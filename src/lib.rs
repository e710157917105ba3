//! A driver for Waveshare and Good Display e-paper panels via SPI
//!
//! This driver was built using [`embedded-hal`] traits.
//!
//! Every supported panel is a variant of [`Model`](model::Model). They all share
//! one driver, [`Epd`](epd::Epd), which owns the bus, the control lines and a
//! framebuffer sized for the panel. Drawing goes into the framebuffer,
//! [`update`](epd::Epd::update) sends it and refreshes the panel.
//!
//! Panels with a partial refresh do a full one every
//! [`full_update_every`](epd::Config::full_update_every) updates to clear the
//! ghosting partial refreshes leave behind.
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal/1.0
//!
//! # Requirements
//!
//! ### SPI
//!
//! - MISO is not connected/available
//! - SPI_MODE_0 is used (CPHL = 0, CPOL = 0)
//! - 8 bits per word, MSB first
//! - Chip select is handled by the [`SpiDevice`](embedded_hal::spi::SpiDevice)
//!
//! ### Other....
//!
//! - The busy line is optional. Without it every wait for the panel is a fixed
//!   delay per model, see [`PanelDescriptor`](model::PanelDescriptor).
//!
//! # Example
//!
//!```rust, no_run
//!# use embedded_hal_mock::eh1::*;
//!# fn main() -> Result<(), Box<dyn std::error::Error>> {
//!use embedded_graphics::{
//!    prelude::*,
//!    primitives::{Circle, PrimitiveStyle},
//!};
//!use epd_panels::prelude::*;
//!
//!# let spi = spi::Mock::new(&[]);
//!# let busy = digital::Mock::new(&[]);
//!# let dc = digital::Mock::new(&[]);
//!# let rst = digital::Mock::new(&[]);
//!# let delay = delay::NoopDelay::new();
//!let mut epd = Epd::new(
//!    spi,
//!    Some(busy),
//!    dc,
//!    rst,
//!    delay,
//!    Model::Waveshare2in9BV4,
//!    Config::default().with_rotation(DisplayRotation::Rotate90),
//!);
//!epd.setup().ok();
//!
//!// Draw a red circle
//!let _ = Circle::new(Point::new(10, 10), 40)
//!    .into_styled(PrimitiveStyle::with_fill(Color::RED))
//!    .draw(&mut epd);
//!
//!let refresh = epd.update().ok();
//!
//!// Going to sleep
//!epd.on_safe_shutdown().ok();
//!# Ok(())
//!# }
//!```
#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[cfg(feature = "graphics")]
pub mod graphics;

pub mod color;
pub mod epd;
pub mod error;
pub mod framebuffer;
pub mod lut;
pub mod model;
pub mod traits;

/// Interface for the physical connection between display and the controlling device
mod interface;
mod sequence;

pub(crate) mod ssd16xx;
pub(crate) mod uc81xx;

#[cfg(test)]
mod test_support;

pub use interface::{BusyPolarity, ResetPulse};

/// Includes everything important besides the chosen panel
pub mod prelude {
    pub use crate::color::Color;
    pub use crate::epd::{Config, Epd, PowerState};
    pub use crate::error::ErrorKind;
    pub use crate::framebuffer::{DisplayRotation, DisplayType, Framebuffer};
    pub use crate::lut::Lut;
    pub use crate::model::{Model, PanelDescriptor, RefreshPolicy};
    pub use crate::traits::{EpaperDisplay, Refresh, RefreshKind};
    pub use crate::SPI_MODE;
}

use embedded_hal::spi::{Mode, Phase, Polarity};

/// SPI mode -
/// For more infos see [Requirements: SPI](index.html#spi)
pub const SPI_MODE: Mode = Mode {
    phase: Phase::CaptureOnFirstTransition,
    polarity: Polarity::IdleLow,
};
