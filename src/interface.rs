use crate::error::ErrorKind;
use crate::traits::Command;
use embedded_hal::{
    delay::DelayNs,
    digital::{InputPin, OutputPin},
    spi::SpiDevice,
};

/// Interval in which a busy line is sampled
pub(crate) const POLL_INTERVAL_MS: u32 = 1;

/// Linux spidev refuses transfers above this size
const MAX_TRANSFER: usize = 4096;

/// Level of the busy line while the controller is working
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusyPolarity {
    /// High while busy (SSD16xx)
    ActiveHigh,
    /// Low while busy (UC81xx)
    ActiveLow,
}

/// Timing of the hardware reset pulse, all values in ms
///
/// The reset line is optionally held high for `lead_high_ms`, pulled low for `low_ms`
/// and then held high again for `settle_ms` before the next command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetPulse {
    /// Time the line is driven high before the pulse, if at all
    pub lead_high_ms: Option<u32>,
    /// Width of the low pulse
    pub low_ms: u32,
    /// Time the controller gets after the pulse
    pub settle_ms: u32,
}

impl ResetPulse {
    /// Plain low pulse followed by a settle time
    pub const fn new(low_ms: u32, settle_ms: u32) -> Self {
        ResetPulse {
            lead_high_ms: None,
            low_ms,
            settle_ms,
        }
    }

    /// High, low, high
    pub const fn framed(lead_high_ms: u32, low_ms: u32, settle_ms: u32) -> Self {
        ResetPulse {
            lead_high_ms: Some(lead_high_ms),
            low_ms,
            settle_ms,
        }
    }
}

/// The Connection Interface of all e-paper panels
///
/// Owns the bus, the control lines and the delay. The busy line is optional,
/// without one every wait is a fixed delay.
pub(crate) struct DisplayInterface<SPI, BUSY, DC, RST, DELAY> {
    spi: SPI,
    /// Busy line, polarity depends on the controller
    busy: Option<BUSY>,
    /// Data/Command Control Pin (High for data, Low for command)
    dc: DC,
    /// Pin for Resetting
    rst: RST,
    delay: DELAY,
    /// Write data blocks one byte per bus transaction
    single_byte_write: bool,
}

impl<SPI, BUSY, DC, RST, DELAY> DisplayInterface<SPI, BUSY, DC, RST, DELAY>
where
    SPI: SpiDevice,
    BUSY: InputPin,
    DC: OutputPin,
    RST: OutputPin,
    DELAY: DelayNs,
{
    /// Creates a new `DisplayInterface` struct
    pub fn new(
        spi: SPI,
        busy: Option<BUSY>,
        dc: DC,
        rst: RST,
        delay: DELAY,
        single_byte_write: bool,
    ) -> Self {
        DisplayInterface {
            spi,
            busy,
            dc,
            rst,
            delay,
            single_byte_write,
        }
    }

    /// Hands back all peripherals
    pub fn release(self) -> (SPI, Option<BUSY>, DC, RST, DELAY) {
        (self.spi, self.busy, self.dc, self.rst, self.delay)
    }

    /// Basic function for sending [Commands](Command).
    ///
    /// Enables direct interaction with the device with the help of [data()](DisplayInterface::data())
    pub fn cmd<T: Command>(&mut self, command: T) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        // low for commands
        self.dc.set_low().map_err(ErrorKind::DcError)?;

        // Transfer the command over spi
        self.write(&[command.address()])
    }

    /// Sends a single data byte
    pub fn data(&mut self, val: u8) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        self.data_block(&[val])
    }

    /// Basic function for sending an array of u8-values of data over spi
    pub fn data_block(&mut self, data: &[u8]) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        // high for data
        self.dc.set_high().map_err(ErrorKind::DcError)?;

        if self.single_byte_write {
            for val in data.iter().copied() {
                // Transfer data one u8 at a time over spi
                self.write(&[val])?;
            }
        } else {
            self.write(data)?;
        }

        Ok(())
    }

    /// Basic function for sending [Commands](Command) and the data belonging to it.
    pub fn cmd_with_data<T: Command>(
        &mut self,
        command: T,
        data: &[u8],
    ) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        self.cmd(command)?;
        self.data_block(data)
    }

    /// Basic function for sending the same byte of data (one u8) multiple times over spi
    pub fn data_x_times(
        &mut self,
        val: u8,
        repetitions: u32,
    ) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        let chunk = [val; 64];
        let mut left = repetitions as usize;
        while left > 0 {
            let n = left.min(chunk.len());
            self.data_block(&chunk[..n])?;
            left -= n;
        }
        Ok(())
    }

    // spi write helper/abstraction function
    fn write(&mut self, data: &[u8]) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        for data_chunk in data.chunks(MAX_TRANSFER) {
            self.spi.write(data_chunk).map_err(ErrorKind::SpiError)?;
        }
        Ok(())
    }

    pub fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms)
    }

    /// Checks if device is still busy
    ///
    /// Without a busy line the device is never considered busy.
    pub fn is_busy(&mut self, polarity: BusyPolarity) -> Result<bool, ErrorKind<SPI, BUSY, DC, RST>> {
        match self.busy.as_mut() {
            None => Ok(false),
            Some(busy) => match polarity {
                BusyPolarity::ActiveHigh => busy.is_high().map_err(ErrorKind::BusyError),
                BusyPolarity::ActiveLow => busy.is_low().map_err(ErrorKind::BusyError),
            },
        }
    }

    /// Waits until device isn't busy anymore
    ///
    /// Returns `false` once `timeout_ms` passed with the line still signalling busy.
    /// Without a busy line this is a single delay of `no_busy_delay_ms` and always
    /// succeeds.
    ///
    /// Some controllers only update their busy line after being asked for their
    /// status, `status_cmd` is sent before each sample.
    pub fn wait_until_idle(
        &mut self,
        polarity: BusyPolarity,
        timeout_ms: u32,
        no_busy_delay_ms: u32,
        status_cmd: Option<u8>,
    ) -> Result<bool, ErrorKind<SPI, BUSY, DC, RST>> {
        if self.busy.is_none() {
            self.delay.delay_ms(no_busy_delay_ms);
            return Ok(true);
        }

        let mut waited = 0;
        loop {
            if let Some(status) = status_cmd {
                self.cmd(status)?;
            }
            if !self.is_busy(polarity)? {
                return Ok(true);
            }
            if waited >= timeout_ms {
                log::warn!("panel still busy after {} ms", waited);
                return Ok(false);
            }
            self.delay.delay_ms(POLL_INTERVAL_MS);
            waited += POLL_INTERVAL_MS;
        }
    }

    /// Resets the device.
    ///
    /// Often used to awake the module from deep sleep.
    ///
    /// The timing of keeping the reset pin low seems to be important and different per device.
    /// Most displays seem to require keeping it low for 10ms, but the 7in5_v2 only seems to reset
    /// properly with 2ms
    pub fn reset(&mut self, pulse: ResetPulse) -> Result<(), ErrorKind<SPI, BUSY, DC, RST>> {
        if let Some(lead) = pulse.lead_high_ms {
            self.rst.set_high().map_err(ErrorKind::RstError)?;
            self.delay.delay_ms(lead);
        }

        self.rst.set_low().map_err(ErrorKind::RstError)?;
        self.delay.delay_ms(pulse.low_ms);
        self.rst.set_high().map_err(ErrorKind::RstError)?;
        self.delay.delay_ms(pulse.settle_ms);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Bus, Event};
    use embedded_hal_mock::eh1::{
        delay::NoopDelay,
        digital::{Mock as PinMock, State, Transaction as PinTransaction},
        spi::{Mock as SpiMock, Transaction as SpiTransaction},
        MockError,
    };
    use std::vec;

    #[test]
    fn cmd_and_data_frame_the_dc_line() {
        let spi_expectations = [
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0x22]),
            SpiTransaction::transaction_end(),
            SpiTransaction::transaction_start(),
            SpiTransaction::write_vec(vec![0xC7]),
            SpiTransaction::transaction_end(),
        ];
        let dc_expectations = [
            PinTransaction::set(State::Low),
            PinTransaction::set(State::High),
        ];
        let mut spi = SpiMock::new(&spi_expectations);
        let mut dc = PinMock::new(&dc_expectations);
        let mut rst = PinMock::new(&[]);

        let mut interface = DisplayInterface::new(
            spi.clone(),
            None::<PinMock>,
            dc.clone(),
            rst.clone(),
            NoopDelay::new(),
            false,
        );
        interface.cmd(0x22u8).unwrap();
        interface.data(0xC7).unwrap();

        spi.done();
        dc.done();
        rst.done();
    }

    #[test]
    fn single_byte_write_splits_blocks() {
        let bus = Bus::new();
        let mut interface = bus.interface(true);
        interface.cmd_with_data(0x44u8, &[0x00, 0x0F]).unwrap();

        let writes: std::vec::Vec<_> = bus
            .events()
            .into_iter()
            .filter(|e| matches!(e, Event::Command(_) | Event::Data(_)))
            .collect();
        assert_eq!(
            writes,
            vec![
                Event::Command(0x44),
                Event::Data(vec![0x00]),
                Event::Data(vec![0x0F]),
            ]
        );
    }

    #[test]
    fn block_write_is_one_transaction() {
        let bus = Bus::new();
        let mut interface = bus.interface(false);
        interface.data_x_times(0xFF, 100).unwrap();

        // 100 bytes go out as one chunk of 64 and one of 36
        assert_eq!(
            bus.events(),
            vec![Event::Data(vec![0xFF; 64]), Event::Data(vec![0xFF; 36])]
        );
    }

    #[test]
    fn reset_pulse_levels_and_timing() {
        let bus = Bus::new();
        let mut interface = bus.interface(false);
        interface.reset(ResetPulse::framed(200, 2, 20)).unwrap();

        assert_eq!(
            bus.events(),
            vec![
                Event::RstHigh,
                Event::DelayMs(200),
                Event::RstLow,
                Event::DelayMs(2),
                Event::RstHigh,
                Event::DelayMs(20),
            ]
        );
        assert_eq!(bus.now_ms(), 222);
    }

    #[test]
    fn wait_returns_once_line_releases() {
        let bus = Bus::new();
        bus.busy_for(40);
        let mut interface = bus.interface(false);

        let idle = interface
            .wait_until_idle(BusyPolarity::ActiveHigh, 1000, 0, None)
            .unwrap();
        assert!(idle);
        assert_eq!(bus.now_ms(), 40);
    }

    #[test]
    fn wait_gives_up_only_after_timeout() {
        let bus = Bus::new();
        bus.busy_for(u32::MAX);
        let mut interface = bus.interface(false);

        let idle = interface
            .wait_until_idle(BusyPolarity::ActiveHigh, 250, 0, None)
            .unwrap();
        assert!(!idle);
        assert_eq!(bus.now_ms(), 250);
    }

    #[test]
    fn wait_respects_polarity() {
        let bus = Bus::new();
        bus.busy_for(10);
        let mut interface = bus.interface(false);

        // fake drives the line high while busy, an active low panel reads that as idle
        let idle = interface
            .wait_until_idle(BusyPolarity::ActiveLow, 1000, 0, None)
            .unwrap();
        assert!(idle);
        assert_eq!(bus.now_ms(), 0);
    }

    #[test]
    fn wait_without_busy_pin_is_fixed_delay() {
        let bus = Bus::new();
        let mut interface = bus.interface_without_busy(false);

        let idle = interface
            .wait_until_idle(BusyPolarity::ActiveHigh, 1000, 3500, None)
            .unwrap();
        assert!(idle);
        assert_eq!(bus.events(), vec![Event::DelayMs(3500)]);
    }

    #[test]
    fn wait_probes_status() {
        let bus = Bus::new();
        bus.busy_for(2);
        let mut interface = bus.interface(false);

        interface
            .wait_until_idle(BusyPolarity::ActiveHigh, 1000, 0, Some(0x71))
            .unwrap();
        let probes = bus
            .events()
            .iter()
            .filter(|e| **e == Event::Command(0x71))
            .count();
        assert_eq!(probes, 3);
    }

    #[test]
    fn busy_pin_error_propagates() {
        let busy_expectations = [PinTransaction::get(State::High)
            .with_error(MockError::Io(std::io::ErrorKind::Other))];
        let mut busy = PinMock::new(&busy_expectations);
        let mut spi = SpiMock::new(&[]);
        let mut dc = PinMock::new(&[]);
        let mut rst = PinMock::new(&[]);

        let mut interface = DisplayInterface::new(
            spi.clone(),
            Some(busy.clone()),
            dc.clone(),
            rst.clone(),
            NoopDelay::new(),
            false,
        );
        let res = interface.wait_until_idle(BusyPolarity::ActiveHigh, 10, 0, None);
        assert!(matches!(res, Err(ErrorKind::BusyError(_))));

        busy.done();
        spi.done();
        dc.done();
        rst.done();
    }
}
