//! Recording bus / pins / delay for tests.
//! Everything the driver does ends up, in order, in one shared event log.

use core::cell::RefCell;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::{blocking::delay::DelayUs, digital::v2::OutputPin};

use crate::{bus::SerialBus, config::BusConfig};


#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Pin {
    WClk,
    FqUd,
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    High(Pin),
    Low(Pin),
    Delay(u16),
    Begin(BusConfig),
    Write(Vec<u8>),
    End,
}

#[derive(Debug, Clone, Default)]
pub struct Log(Rc<RefCell<Vec<Event>>>);

impl Log {
    fn push(&self, e: Event) {
        self.0.borrow_mut().push(e);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Payload of every bus write, in order
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.0
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Write(bytes) => Some(bytes.clone()),
                _ => None,
            })
            .collect()
    }

    /// Number of high-low strobes seen on `pin`
    pub fn pulses(&self, pin: Pin) -> usize {
        self.0.borrow().iter().filter(|e| **e == Event::High(pin)).count()
    }
}


pub struct MockBus {
    log: Log,
    pub fail_writes: bool,
}

impl SerialBus for MockBus {
    type Error = ();

    fn begin_transaction(&mut self, config: &BusConfig) -> Result<(), ()> {
        self.log.push(Event::Begin(*config));
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), ()> {
        if self.fail_writes {
            return Err(());
        }
        self.log.push(Event::Write(bytes.to_vec()));
        Ok(())
    }

    fn end_transaction(&mut self) -> Result<(), ()> {
        self.log.push(Event::End);
        Ok(())
    }
}


pub struct MockPin {
    pin: Pin,
    log: Log,
    pub fail: bool,
}

impl OutputPin for MockPin {
    type Error = ();

    fn set_high(&mut self) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        self.log.push(Event::High(self.pin));
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        self.log.push(Event::Low(self.pin));
        Ok(())
    }
}


pub struct MockDelay {
    log: Log,
}

impl DelayUs<u16> for MockDelay {
    fn delay_us(&mut self, us: u16) {
        self.log.push(Event::Delay(us));
    }
}


/// Bus, delay and the three pins sharing one log
pub struct Rig {
    pub log: Log,
    pub bus: MockBus,
    pub delay: MockDelay,
    pub w_clk: MockPin,
    pub fq_ud: MockPin,
    pub reset: MockPin,
}

impl Rig {
    pub fn new() -> Self {
        let log = Log::default();
        let pin = |pin| MockPin { pin, log: log.clone(), fail: false };
        Rig {
            bus: MockBus { log: log.clone(), fail_writes: false },
            delay: MockDelay { log: log.clone() },
            w_clk: pin(Pin::WClk),
            fq_ud: pin(Pin::FqUd),
            reset: pin(Pin::Reset),
            log,
        }
    }
}
