//! Recording fakes for the bus, the control lines and the clock
//!
//! All fakes share one [`Bus`] that keeps a transcript of what the driver did and a
//! fake clock that only moves when the driver delays.

use core::cell::RefCell;
use core::convert::Infallible;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::{delay::DelayNs, digital, spi};

use crate::epd::{Config, Epd};
use crate::interface::{BusyPolarity, DisplayInterface};
use crate::model::Model;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Command(u8),
    Data(Vec<u8>),
    RstHigh,
    RstLow,
    DelayMs(u32),
}

#[derive(Default)]
struct State {
    events: Vec<Event>,
    dc_high: bool,
    now_ms: u32,
    busy_until: u32,
    /// Line reads low while busy
    busy_active_low: bool,
}

#[derive(Clone, Default)]
pub(crate) struct Bus {
    state: Rc<RefCell<State>>,
}

pub(crate) struct FakeSpi(Bus);
pub(crate) struct FakeBusy(Bus);
pub(crate) struct FakeDc(Bus);
pub(crate) struct FakeRst(Bus);
pub(crate) struct FakeDelay(Bus);

pub(crate) type FakeEpd = Epd<FakeSpi, FakeBusy, FakeDc, FakeRst, FakeDelay>;

impl Bus {
    pub fn new() -> Self {
        Bus::default()
    }

    pub fn interface(
        &self,
        single_byte_write: bool,
    ) -> DisplayInterface<FakeSpi, FakeBusy, FakeDc, FakeRst, FakeDelay> {
        DisplayInterface::new(
            FakeSpi(self.clone()),
            Some(FakeBusy(self.clone())),
            FakeDc(self.clone()),
            FakeRst(self.clone()),
            FakeDelay(self.clone()),
            single_byte_write,
        )
    }

    pub fn interface_without_busy(
        &self,
        single_byte_write: bool,
    ) -> DisplayInterface<FakeSpi, FakeBusy, FakeDc, FakeRst, FakeDelay> {
        DisplayInterface::new(
            FakeSpi(self.clone()),
            None,
            FakeDc(self.clone()),
            FakeRst(self.clone()),
            FakeDelay(self.clone()),
            single_byte_write,
        )
    }

    pub fn epd(&self, model: Model, config: Config) -> FakeEpd {
        self.follow_polarity(model);
        Epd::new(
            FakeSpi(self.clone()),
            Some(FakeBusy(self.clone())),
            FakeDc(self.clone()),
            FakeRst(self.clone()),
            FakeDelay(self.clone()),
            model,
            config,
        )
    }

    pub fn epd_without_busy(&self, model: Model, config: Config) -> FakeEpd {
        self.follow_polarity(model);
        Epd::new(
            FakeSpi(self.clone()),
            None,
            FakeDc(self.clone()),
            FakeRst(self.clone()),
            FakeDelay(self.clone()),
            model,
            config,
        )
    }

    // drive the busy line the way the panel's controller does
    fn follow_polarity(&self, model: Model) {
        self.state.borrow_mut().busy_active_low =
            model.descriptor().busy == BusyPolarity::ActiveLow;
    }

    /// Busy line reads busy for the next `ms` of fake time
    pub fn busy_for(&self, ms: u32) {
        let mut state = self.state.borrow_mut();
        state.busy_until = state.now_ms.saturating_add(ms);
    }

    pub fn now_ms(&self) -> u32 {
        self.state.borrow().now_ms
    }

    pub fn events(&self) -> Vec<Event> {
        self.state.borrow().events.clone()
    }

    /// Only the bytes that went over the bus
    pub fn wire(&self) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|e| matches!(e, Event::Command(_) | Event::Data(_)))
            .collect()
    }

    pub fn commands(&self) -> Vec<u8> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Command(c) => Some(c),
                _ => None,
            })
            .collect()
    }

    /// Concatenated data following each occurrence of `cmd`
    pub fn payloads(&self, cmd: u8) -> Vec<Vec<u8>> {
        let mut out = Vec::new();
        let mut current: Option<Vec<u8>> = None;
        for event in self.events() {
            match event {
                Event::Command(c) => {
                    if let Some(done) = current.take() {
                        out.push(done);
                    }
                    if c == cmd {
                        current = Some(Vec::new());
                    }
                }
                Event::Data(bytes) => {
                    if let Some(payload) = current.as_mut() {
                        payload.extend_from_slice(&bytes);
                    }
                }
                _ => {}
            }
        }
        if let Some(done) = current {
            out.push(done);
        }
        out
    }

    pub fn clear(&self) {
        self.state.borrow_mut().events.clear();
    }

    fn push(&self, event: Event) {
        self.state.borrow_mut().events.push(event);
    }
}

impl spi::ErrorType for FakeSpi {
    type Error = Infallible;
}

impl spi::SpiDevice for FakeSpi {
    fn transaction(&mut self, operations: &mut [spi::Operation<'_, u8>]) -> Result<(), Infallible> {
        for op in operations {
            if let spi::Operation::Write(bytes) = op {
                let dc_high = self.0.state.borrow().dc_high;
                if dc_high {
                    self.0.push(Event::Data(bytes.to_vec()));
                } else {
                    for b in bytes.iter() {
                        self.0.push(Event::Command(*b));
                    }
                }
            }
        }
        Ok(())
    }
}

impl digital::ErrorType for FakeBusy {
    type Error = Infallible;
}

impl digital::InputPin for FakeBusy {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        let state = self.0.state.borrow();
        let busy = state.now_ms < state.busy_until;
        Ok(busy != state.busy_active_low)
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        self.is_high().map(|high| !high)
    }
}

impl digital::ErrorType for FakeDc {
    type Error = Infallible;
}

impl digital::OutputPin for FakeDc {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.state.borrow_mut().dc_high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.state.borrow_mut().dc_high = true;
        Ok(())
    }
}

impl digital::ErrorType for FakeRst {
    type Error = Infallible;
}

impl digital::OutputPin for FakeRst {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.push(Event::RstLow);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.push(Event::RstHigh);
        Ok(())
    }
}

impl DelayNs for FakeDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delay_ms(ns / 1_000_000);
    }

    fn delay_us(&mut self, us: u32) {
        self.delay_ms(us / 1_000);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.0.push(Event::DelayMs(ms));
        let mut state = self.0.state.borrow_mut();
        state.now_ms = state.now_ms.saturating_add(ms);
    }
}
