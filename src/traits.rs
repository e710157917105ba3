use crate::color::Color;
use crate::framebuffer::DisplayType;

/// All commands need to have this trait which gives the address of the command
/// which needs to be send via SPI with activated CommandsPin (Data/Command Pin in CommandMode)
pub(crate) trait Command: Copy {
    fn address(self) -> u8;
}

/// Raw opcodes, as used by the declarative sequences
impl Command for u8 {
    fn address(self) -> u8 {
        self
    }
}

/// Seperates the different refresh sequences of a panel
#[derive(Debug, Clone, PartialEq, Eq, Copy, Default)]
pub enum RefreshKind {
    /// The "normal" full refresh, reloading waveform and voltages
    #[default]
    Full,
    /// The quick refresh where only the changed plane is transferred.
    /// Repeating it leaves ghosting behind, which the next full refresh clears.
    Partial,
}

/// Outcome of one [`update`](EpaperDisplay::update)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Refresh {
    /// Which sequence was run
    pub kind: RefreshKind,
    /// True if at least one busy wait ran into its timeout.
    ///
    /// The sequence was completed anyway, the panel may show a stale frame.
    pub timed_out: bool,
}

/// The call surface a host framework uses to drive a panel
///
/// # Example
///
///```rust, no_run
///# use embedded_hal_mock::eh1::*;
///# fn main() -> Result<(), Box<dyn std::error::Error>> {
///use epd_panels::prelude::*;
///
///# let mut spi = spi::Mock::new(&[]);
///# let busy = digital::Mock::new(&[]);
///# let dc = digital::Mock::new(&[]);
///# let rst = digital::Mock::new(&[]);
///# let delay = delay::NoopDelay::new();
///let mut epd = Epd::new(
///    spi.clone(),
///    Some(busy),
///    dc,
///    rst,
///    delay,
///    Model::Waveshare2in9V2,
///    Config::default().with_full_update_every(10),
///);
///epd.setup().ok();
///
///epd.fill(Color::WHITE);
///epd.set_pixel(10, 20, Color::BLACK);
///let refresh = epd.update().ok();
///
///// Set the panel to sleep before cutting power
///epd.on_safe_shutdown().ok();
///# spi.done();
///# Ok(())
///# }
///```
pub trait EpaperDisplay {
    /// Error returned by the bus and the control lines
    type Error;

    /// Resets and initialises the panel
    fn setup(&mut self) -> Result<(), Self::Error>;

    /// Transfers the framebuffer and refreshes the panel
    ///
    /// Whether this is a full or a partial refresh is decided by the update counter,
    /// see [`set_full_update_every`](EpaperDisplay::set_full_update_every).
    fn update(&mut self) -> Result<Refresh, Self::Error>;

    /// Sets every pixel of the framebuffer to `color`
    fn fill(&mut self, color: Color);

    /// Sets a single pixel, out of range coordinates are ignored
    fn set_pixel(&mut self, x: i32, y: i32, color: Color);

    /// Resets the framebuffer to paper color
    fn clear(&mut self);

    /// Puts the panel into deep sleep before power is lost
    fn on_safe_shutdown(&mut self) -> Result<(), Self::Error>;

    /// Every `n`th update is a full refresh, `1` means every update is one
    fn set_full_update_every(&mut self, n: u32);

    /// Whether the panel can show an accent color
    fn display_type(&self) -> DisplayType;

    /// Get the width of the display
    fn width(&self) -> u32;

    /// Get the height of the display
    fn height(&self) -> u32;
}
