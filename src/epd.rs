//! The driver shared by all panels
//!
//! [`Epd`] owns the bus, the control lines and a [`Framebuffer`] sized for the
//! selected [`Model`]. Everything panel specific comes from the model's
//! [`PanelDescriptor`], whose step lists the driver runs in order.

use alloc::vec::Vec;

use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiDevice,
};

use crate::color::Color;
use crate::error::ErrorKind;
use crate::framebuffer::{DisplayRotation, DisplayType, Framebuffer};
use crate::interface::{DisplayInterface, ResetPulse};
use crate::lut::Lut;
use crate::model::{Model, PanelDescriptor, RefreshPolicy};
use crate::sequence::{Plane, ResolutionFormat, Step};
use crate::ssd16xx::command::Command as Ssd16xx;
use crate::traits::{EpaperDisplay, Refresh, RefreshKind};
use crate::uc81xx::command::Command as Uc81xx;

/// Default number of updates between two full refreshes
pub const DEFAULT_FULL_UPDATE_EVERY: u32 = 30;

/// Settings chosen when the driver is created
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Replaces the low time of the model's reset pulse
    pub reset_duration_ms: Option<u32>,
    /// Every `n`th update is a full refresh
    pub full_update_every: u32,
    /// Reset and initialise before every update, deep sleep after it
    pub deep_sleep_between_updates: bool,
    /// One bus transaction per data byte
    pub single_byte_write: bool,
    pub rotation: DisplayRotation,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            reset_duration_ms: None,
            full_update_every: DEFAULT_FULL_UPDATE_EVERY,
            deep_sleep_between_updates: false,
            single_byte_write: false,
            rotation: DisplayRotation::default(),
        }
    }
}

impl Config {
    pub fn with_reset_duration(mut self, ms: u32) -> Self {
        self.reset_duration_ms = Some(ms);
        self
    }

    pub fn with_full_update_every(mut self, n: u32) -> Self {
        self.full_update_every = n;
        self
    }

    pub fn with_deep_sleep_between_updates(mut self, enabled: bool) -> Self {
        self.deep_sleep_between_updates = enabled;
        self
    }

    pub fn with_single_byte_write(mut self, enabled: bool) -> Self {
        self.single_byte_write = enabled;
        self
    }

    pub fn with_rotation(mut self, rotation: DisplayRotation) -> Self {
        self.rotation = rotation;
        self
    }
}

/// What the driver believes the controller is doing
///
/// Nothing stops a caller from updating a sleeping panel, the controller
/// simply won't answer until it is reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerState {
    /// Not reset since the driver was created
    Uninitialized,
    Active,
    /// Needs a reset, see [`Epd::wake_up`]
    DeepSleep,
}

fn clamp_threshold(n: u32) -> u32 {
    if n == 0 {
        log::warn!("full_update_every must be at least 1, using 1");
        1
    } else {
        n
    }
}

/// Driver for one e-paper panel
pub struct Epd<SPI, BUSY, DC, RST, DELAY> {
    interface: DisplayInterface<SPI, BUSY, DC, RST, DELAY>,
    model: Model,
    descriptor: &'static PanelDescriptor,
    /// Model pulse with the configured override applied
    reset: ResetPulse,
    framebuffer: Framebuffer,
    full_update_every: u32,
    /// Updates since the last full refresh, always below `full_update_every`
    at_update: u32,
    /// Kind of the last refresh since the controller was initialised
    last_kind: Option<RefreshKind>,
    /// Black/white plane as last sent, only for panels refreshing differentially
    last_frame: Option<Vec<u8>>,
    deep_sleep_between_updates: bool,
    power_state: PowerState,
    /// A busy wait ran into its timeout during the current update
    timed_out: bool,
}

impl<SPI, BUSY, DC, RST, DELAY> Epd<SPI, BUSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Creates the driver and allocates the framebuffer
    ///
    /// Nothing is sent to the panel before [`setup`](Epd::setup).
    pub fn new(
        spi: SPI,
        busy: Option<BUSY>,
        dc: DC,
        rst: RST,
        delay: DELAY,
        model: Model,
        config: Config,
    ) -> Self {
        let descriptor = model.descriptor();

        let mut reset = descriptor.reset;
        if let Some(ms) = config.reset_duration_ms {
            reset.low_ms = ms;
        }

        let mut framebuffer = Framebuffer::new(
            descriptor.width,
            descriptor.height,
            descriptor.controller_width,
            descriptor.bw_polarity,
            descriptor.accent,
            descriptor.color_rule,
        );
        framebuffer.set_rotation(config.rotation);

        let last_frame = if descriptor.protocol.keeps_previous_frame() {
            Some(framebuffer.bw_plane().to_vec())
        } else {
            None
        };

        Epd {
            interface: DisplayInterface::new(
                spi,
                busy,
                dc,
                rst,
                delay,
                config.single_byte_write,
            ),
            model,
            descriptor,
            reset,
            framebuffer,
            full_update_every: clamp_threshold(config.full_update_every),
            at_update: 0,
            last_kind: None,
            last_frame,
            deep_sleep_between_updates: config.deep_sleep_between_updates,
            power_state: PowerState::Uninitialized,
            timed_out: false,
        }
    }

    /// Resets and initialises the panel
    pub fn setup(&mut self) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        log::debug!("{}: setup", self.descriptor.name);
        self.reset_and_init()
    }

    /// Brings a panel back from deep sleep
    pub fn wake_up(&mut self) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        log::debug!("{}: wake up from {:?}", self.descriptor.name, self.power_state);
        self.reset_and_init()
    }

    fn reset_and_init(&mut self) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        self.interface.reset(self.reset)?;
        self.run(self.descriptor.protocol.init)?;
        self.power_state = PowerState::Active;
        self.last_kind = None;
        Ok(())
    }

    /// Transfers the framebuffer and refreshes the panel
    ///
    /// Busy waits that run into their timeout don't stop the sequence, they are
    /// reported in [`Refresh::timed_out`].
    pub fn update(&mut self) -> Result<Refresh, ErrorKind<SPI, BUSY, DC, RST>> {
        let protocol = self.descriptor.protocol;
        if self.power_state == PowerState::DeepSleep
            && !self.deep_sleep_between_updates
            && !protocol.resets_on_update()
        {
            log::debug!(
                "{}: update while in deep sleep, call wake_up first",
                self.descriptor.name
            );
        }

        self.timed_out = false;
        let kind = self.next_refresh_kind();
        log::debug!(
            "{}: {:?} refresh, counter now {}/{}",
            self.descriptor.name,
            kind,
            self.at_update,
            self.full_update_every
        );

        if self.deep_sleep_between_updates {
            self.reset_and_init()?;
        }

        let phase = match (kind, protocol.partial) {
            (RefreshKind::Partial, Some(partial)) => partial,
            _ => protocol.full,
        };

        if !protocol.prelude_on_change_only || self.last_kind != Some(kind) {
            if self.deep_sleep_between_updates {
                // the controller was just reset and initialised
                for step in phase.prelude {
                    if !matches!(step, Step::Reset | Step::Initialize) {
                        self.step(step)?;
                    }
                }
            } else {
                self.run(phase.prelude)?;
            }
        }
        self.run(phase.transfer)?;
        self.last_kind = Some(kind);

        if self.deep_sleep_between_updates && self.power_state != PowerState::DeepSleep {
            self.enter_deep_sleep()?;
        }

        Ok(Refresh {
            kind,
            timed_out: self.timed_out,
        })
    }

    /// Picks the kind of the next refresh and advances the counter
    fn next_refresh_kind(&mut self) -> RefreshKind {
        match self.descriptor.refresh_policy() {
            RefreshPolicy::AlwaysFull => RefreshKind::Full,
            RefreshPolicy::Counter => {
                let kind = if self.at_update == 0 {
                    RefreshKind::Full
                } else {
                    RefreshKind::Partial
                };
                self.at_update = (self.at_update + 1) % self.full_update_every;
                kind
            }
        }
    }

    /// Puts the panel into deep sleep, e.g. before power is cut
    ///
    /// A panel already asleep gets nothing sent.
    pub fn on_safe_shutdown(&mut self) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        if self.power_state == PowerState::DeepSleep {
            log::debug!("{}: shutdown, already asleep", self.descriptor.name);
            return Ok(());
        }
        log::debug!("{}: shutdown", self.descriptor.name);
        self.enter_deep_sleep()
    }

    fn enter_deep_sleep(&mut self) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        self.run(self.descriptor.protocol.deep_sleep)?;
        self.power_state = PowerState::DeepSleep;
        self.last_kind = None;
        Ok(())
    }

    /// Loads a waveform into the LUT registers (0x32, 0x3F, 0x03, 0x04, 0x2C)
    ///
    /// Only SSD1680/SSD1681 panels have these registers, on every other panel
    /// this logs a warning and sends nothing.
    pub fn load_lut(&mut self, lut: &Lut) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        if !self.descriptor.custom_lut {
            log::warn!("{}: no LUT registers, waveform ignored", self.descriptor.name);
            return Ok(());
        }
        self.write_lut(lut)
    }

    fn write_lut(&mut self, lut: &Lut) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        self.wait(self.descriptor.idle_timeout_ms)?;
        self.interface
            .cmd_with_data(Ssd16xx::WriteLutRegister, lut.waveform())?;
        self.wait(self.descriptor.idle_timeout_ms)?;
        self.interface
            .cmd_with_data(Ssd16xx::WriteLutRegisterEnd, &[lut.eopt()])?;
        self.interface
            .cmd_with_data(Ssd16xx::GateDrivingVoltage, &[lut.vgh()])?;
        self.interface
            .cmd_with_data(Ssd16xx::SourceDrivingVoltage, lut.source_voltages())?;
        self.interface
            .cmd_with_data(Ssd16xx::WriteVcomRegister, &[lut.vcom()])
    }

    fn wait(&mut self, timeout_ms: u32) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        let d = self.descriptor;
        let idle =
            self.interface
                .wait_until_idle(d.busy, timeout_ms, d.no_busy_delay_ms, d.busy_probe)?;
        if !idle {
            self.timed_out = true;
        }
        Ok(())
    }

    /// Runs a list of steps against the panel
    fn run(&mut self, steps: &'static [Step]) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        for step in steps {
            self.step(step)?;
        }
        Ok(())
    }

    fn step(&mut self, step: &Step) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        let d = self.descriptor;
        log::trace!("{}: {:?}", d.name, step);
        match *step {
            Step::Cmd(cmd) => self.interface.cmd(cmd)?,
            Step::CmdData(cmd, data) => self.interface.cmd_with_data(cmd, data)?,
            Step::Delay(ms) => self.interface.delay_ms(ms),
            Step::WaitIdle => self.wait(d.idle_timeout_ms)?,
            Step::WaitIdleFor(ms) => self.wait(ms)?,
            Step::Reset => self.interface.reset(self.reset)?,
            Step::Initialize => {
                self.run(d.protocol.init)?;
                self.power_state = PowerState::Active;
            }
            Step::DriverOutput(scan) => {
                let last = d.height - 1;
                self.interface.cmd_with_data(
                    Ssd16xx::DriverOutputControl,
                    &[last as u8, (last >> 8) as u8, scan],
                )?
            }
            Step::RamWindow => {
                let last_column = (d.controller_width - 1) >> 3;
                let last_row = d.height - 1;
                self.interface.cmd_with_data(
                    Ssd16xx::SetRamXAddressStartEndPosition,
                    &[0x00, last_column as u8],
                )?;
                self.interface.cmd_with_data(
                    Ssd16xx::SetRamYAddressStartEndPosition,
                    &[0x00, 0x00, last_row as u8, (last_row >> 8) as u8],
                )?
            }
            Step::RamCursor => {
                self.interface
                    .cmd_with_data(Ssd16xx::SetRamXAddressCounter, &[0x00])?;
                self.interface
                    .cmd_with_data(Ssd16xx::SetRamYAddressCounter, &[0x00, 0x00])?
            }
            Step::Resolution(format) => self.send_resolution(format)?,
            Step::WritePlane(cmd, plane) => self.write_plane(cmd, plane)?,
            Step::LoadLut(lut) => self.write_lut(lut)?,
            Step::RememberFrame => {
                if let Some(last) = self.last_frame.as_mut() {
                    last.copy_from_slice(self.framebuffer.bw_plane());
                }
            }
            Step::Asleep => {
                self.power_state = PowerState::DeepSleep;
                self.last_kind = None;
            }
        }
        Ok(())
    }

    fn send_resolution(
        &mut self,
        format: ResolutionFormat,
    ) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        let (w, h) = (self.descriptor.width, self.descriptor.height);
        match format {
            ResolutionFormat::Narrow => self.interface.cmd_with_data(
                Uc81xx::ResolutionSetting,
                &[w as u8, (h >> 8) as u8, h as u8],
            ),
            ResolutionFormat::Wide => self.interface.cmd_with_data(
                Uc81xx::ResolutionSetting,
                &[(w >> 8) as u8, w as u8, (h >> 8) as u8, h as u8],
            ),
        }
    }

    fn write_plane(&mut self, cmd: u8, plane: Plane) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        match plane {
            Plane::Black => {
                self.interface.cmd(cmd)?;
                self.interface.data_block(self.framebuffer.bw_plane())
            }
            Plane::Accent => match self.framebuffer.accent_plane() {
                Some(accent) => {
                    self.interface.cmd(cmd)?;
                    self.interface.data_block(accent)
                }
                None => Ok(()),
            },
            Plane::Previous => {
                let previous = match self.last_frame.as_deref() {
                    Some(previous) => previous,
                    None => self.framebuffer.bw_plane(),
                };
                self.interface.cmd(cmd)?;
                self.interface.data_block(previous)
            }
            Plane::Fill(byte) => {
                self.interface.cmd(cmd)?;
                let len = self.descriptor.row_bytes() * self.descriptor.height as usize;
                self.interface.data_x_times(byte, len as u32)
            }
            Plane::BlackNibbles => {
                self.interface.cmd(cmd)?;
                // every source byte widens to four
                let mut chunk = [0u8; 64];
                for src in self.framebuffer.bw_plane().chunks(chunk.len() / 4) {
                    let out = &mut chunk[..src.len() * 4];
                    for (byte, wide) in src.iter().zip(out.chunks_mut(4)) {
                        for (i, pair) in wide.iter_mut().enumerate() {
                            let first = (byte >> (7 - 2 * i)) & 0x01;
                            let second = (byte >> (6 - 2 * i)) & 0x01;
                            *pair = (first * 0x03) << 4 | second * 0x03;
                        }
                    }
                    self.interface.data_block(out)?;
                }
                Ok(())
            }
        }
    }

    /// Every `n`th update is a full refresh, `0` is treated as `1`
    ///
    /// The running count is kept, wrapped into the new range.
    pub fn set_full_update_every(&mut self, n: u32) {
        self.full_update_every = clamp_threshold(n);
        self.at_update %= self.full_update_every;
    }

    /// Updates since the last full refresh
    pub fn update_counter(&self) -> u32 {
        self.at_update
    }

    pub fn model(&self) -> Model {
        self.model
    }

    pub fn descriptor(&self) -> &'static PanelDescriptor {
        self.descriptor
    }

    pub fn power_state(&self) -> PowerState {
        self.power_state
    }

    /// Hands back the bus, the control lines and the delay
    pub fn release(self) -> (SPI, Option<BUSY>, DC, RST, DELAY) {
        self.interface.release()
    }
}

impl<SPI, BUSY, DC, RST, DELAY> Epd<SPI, BUSY, DC, RST, DELAY> {
    pub fn fill(&mut self, color: Color) {
        self.framebuffer.fill(color);
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        self.framebuffer.set_pixel(x, y, color);
    }

    /// Resets the framebuffer to paper color
    pub fn clear(&mut self) {
        self.framebuffer.clear();
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    pub fn display_type(&self) -> DisplayType {
        self.framebuffer.display_type()
    }

    /// Width after rotation
    pub fn width(&self) -> u32 {
        self.framebuffer.width()
    }

    /// Height after rotation
    pub fn height(&self) -> u32 {
        self.framebuffer.height()
    }
}

impl<SPI, BUSY, DC, RST, DELAY> EpaperDisplay for Epd<SPI, BUSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    type Error = ErrorKind<SPI, BUSY, DC, RST>;

    fn setup(&mut self) -> Result<(), Self::Error> {
        Epd::setup(self)
    }

    fn update(&mut self) -> Result<Refresh, Self::Error> {
        Epd::update(self)
    }

    fn fill(&mut self, color: Color) {
        Epd::fill(self, color)
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        Epd::set_pixel(self, x, y, color)
    }

    fn clear(&mut self) {
        Epd::clear(self)
    }

    fn on_safe_shutdown(&mut self) -> Result<(), Self::Error> {
        Epd::on_safe_shutdown(self)
    }

    fn set_full_update_every(&mut self, n: u32) {
        Epd::set_full_update_every(self, n)
    }

    fn display_type(&self) -> DisplayType {
        Epd::display_type(self)
    }

    fn width(&self) -> u32 {
        Epd::width(self)
    }

    fn height(&self) -> u32 {
        Epd::height(self)
    }
}
