#![cfg_attr(not(test), no_std)]

//! [AD9850](https://www.analog.com/en/products/ad9850.html) /
//! [AD9851](https://www.analog.com/en/products/ad9851.html) DDS driver.
//!
//! The chip is loaded through its serial interface: a 40-bit word
//! (32-bit tuning word, low byte first, then a control byte) is shifted
//! in LSB first on W_CLK and moved to the DDS core by a FQ_UD pulse.
//! The shifting is done by an SPI peripheral, see [`bus`].
//!
//! ```ignore
//! let bus = BlockingSpi::new(spi, BitOrder::MsbFirst);
//! let mut dds = Ad985x::new(Variant::Ad9850, bus, delay);
//! dds.begin(w_clk, fq_ud, reset)?;   // reset, serial mode, 1 Hz
//! dds.calibrate(124_999_250.0);      // measured crystal frequency
//! dds.set_frequency(10_000_000.0)?;
//! dds.power_down()?;
//! dds.power_up()?;
//! ```

#[macro_use]
mod fmt;

pub mod constants;
pub mod register;
pub mod errors;
pub mod frequency;
pub mod config;
pub mod bus;
pub mod device;

#[cfg(test)]
mod mock;

pub use crate::{
    bus::{BlockingSpi, FullDuplexSpi, SerialBus},
    config::{BitOrder, BusConfig, Config, SpiClock, Variant},
    device::{Ad985x, Pins, State},
    errors::Error,
    frequency::DeltaPhase,
};
