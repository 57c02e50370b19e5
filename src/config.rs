//! Chip variants / bus and driver configuration

use core::fmt;

use embedded_hal::spi::{Mode, Phase as ClockPhase, Polarity, MODE_0};

use crate::{constants::*, register::*};


/// Supported chips
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Variant {
    /// AD9850, 125 MHz reference used as the system clock
    Ad9850,
    /// AD9851, 30 MHz reference with the 6x multiplier, 180 MHz system clock
    Ad9851,
}

impl Variant {
    /// Nominal system clock, the default calibration frequency
    pub fn system_clock_hz(self: &Self) -> f64 {
        match self {
            Variant::Ad9850 => AD9850_SYSTEM_CLOCK_HZ,
            Variant::Ad9851 => AD9851_SYSTEM_CLOCK_HZ,
        }
    }

    /// Control byte right after initialization.
    /// The AD9851 needs W32 set to run its REFCLK multiplier,
    /// the AD9850 needs it cleared.
    pub fn control_byte(self: &Self) -> ControlByte {
        let multiplier = match self {
            Variant::Ad9850 => RefMultiplier::Disabled,
            Variant::Ad9851 => RefMultiplier::Enabled,
        };
        ControlByte::default().set(multiplier)
    }
}


/// Serial clock rates the chip is known to work with
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiClock {
    Mhz2,
    Mhz4,
    Mhz8,
}

impl SpiClock {
    /// Clock rate in Hz
    pub fn hz(self: &Self) -> u32 {
        match self {
            SpiClock::Mhz2 => 2_000_000,
            SpiClock::Mhz4 => 4_000_000,
            SpiClock::Mhz8 => 8_000_000,
        }
    }
}

impl Default for SpiClock {
    fn default() -> Self { SpiClock::Mhz8 }
}


/// Bit order on the wire
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitOrder {
    LsbFirst,
    MsbFirst,
}


/// Settings of a single bus transaction
#[derive(Copy,Clone,PartialEq,Eq)]
pub struct BusConfig {
    pub clock: SpiClock,
    /// AD985x loads the shift register W0 first, so this is always LSB first
    pub bit_order: BitOrder,
    /// Clock idles low, data is sampled on the rising W_CLK edge
    pub mode: Mode,
}

impl Default for BusConfig {
    fn default() -> Self {
        BusConfig {
            clock: SpiClock::default(),
            bit_order: BitOrder::LsbFirst,
            mode: MODE_0,
        }
    }
}

// embedded-hal 0.2 `Mode` has no `Debug`
impl fmt::Debug for BusConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match (self.mode.polarity, self.mode.phase) {
            (Polarity::IdleLow, ClockPhase::CaptureOnFirstTransition) => "MODE_0",
            (Polarity::IdleLow, ClockPhase::CaptureOnSecondTransition) => "MODE_1",
            (Polarity::IdleHigh, ClockPhase::CaptureOnFirstTransition) => "MODE_2",
            (Polarity::IdleHigh, ClockPhase::CaptureOnSecondTransition) => "MODE_3",
        };
        f.debug_struct("BusConfig")
            .field("clock", &self.clock)
            .field("bit_order", &self.bit_order)
            .field("mode", &format_args!("{}", mode))
            .finish()
    }
}

impl BusConfig {
    /// Default transaction settings at a different clock rate
    pub fn with_clock(clock: SpiClock) -> Self {
        BusConfig { clock, ..Default::default() }
    }
}


/// Driver configuration
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct Config {
    pub bus: BusConfig,
    /// High time of the RESET / W_CLK / FQ_UD strobes.
    /// 0 skips the delay, pulse width then depends on how fast pins toggle.
    pub pulse_width_us: u16,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bus: BusConfig::default(),
            pulse_width_us: DEFAULT_PULSE_WIDTH_US,
        }
    }
}
