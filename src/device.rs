//! AD9850 / AD9851 device

use embedded_hal::{
    digital::v2::OutputPin,
    blocking::delay::DelayUs,
};

use crate::{
    bus::SerialBus,
    config::*,
    constants::*,
    errors::*,
    frequency::DeltaPhase,
    register::*,
};


/// Driver state
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Constructed, `begin` hasn't run, no pins yet
    Uninitialized,
    /// Reset strobes sent, first control word not latched yet
    Resetting,
    /// Chip runs the last latched control word
    Active,
    /// Power-down word latched, output disabled
    PoweredDown,
}


/// Device pins
pub struct Pins<WCLK, FQUD, RST> {
    /// W_CLK, serial word load clock
    pub w_clk: WCLK,
    /// FQ_UD, frequency update (latch) strobe
    pub fq_ud: FQUD,
    /// RESET, master reset
    pub reset: RST,
}


/// AD9850 / AD9851 device
pub struct Ad985x<SPI, DELAY, WCLK, FQUD, RST> {
    variant: Variant,
    config: Config,
    spi: SPI,
    delay: DELAY,
    pins: Option<Pins<WCLK, FQUD, RST>>,
    calibration_hz: f64,
    delta_phase: DeltaPhase,
    control: ControlByte,
    state: State,
}


impl<SPI, DELAY, WCLK, FQUD, RST> Ad985x<SPI, DELAY, WCLK, FQUD, RST>
where SPI: SerialBus,
      DELAY: DelayUs<u16>,
      WCLK: OutputPin,
      FQUD: OutputPin,
      RST: OutputPin,
{
    /// Creates the device (no pins yet, nothing is sent).
    ///
    /// `variant` - chip model
    /// `spi` - serial bus (`MOSI` => `DATA`, `SCK` => `W_CLK`)
    /// `delay` - used for strobe pulse widths
    pub fn new(variant: Variant, spi: SPI, delay: DELAY) -> Self {
        Self::with_config(variant, spi, delay, Config::default())
    }

    /// Same as [`new`](Ad985x::new) with a non-default bus clock / pulse width.
    pub fn with_config(variant: Variant, spi: SPI, delay: DELAY, config: Config) -> Self {
        Ad985x {
            variant,
            config,
            spi,
            delay,
            pins: None,
            calibration_hz: variant.system_clock_hz(),
            delta_phase: DeltaPhase::default(),
            control: variant.control_byte(),
            state: State::Uninitialized,
        }
    }

    /// Takes the pins, restores nominal calibration and control bits
    /// and resets the chip into serial load mode.
    ///
    /// `w_clk` - word load clock pin
    /// `fq_ud` - frequency update pin
    /// `reset` - reset pin
    ///
    /// Calling it again re-initializes the device with the new pins.
    pub fn begin(&mut self, w_clk: WCLK, fq_ud: FQUD, reset: RST) -> Result<(), Error> {
        self.calibration_hz = self.variant.system_clock_hz();
        self.control = self.variant.control_byte();
        self.delta_phase = DeltaPhase::default();

        let mut pins = Pins { w_clk, fq_ud, reset };
        pins.w_clk.set_low().map_err(|_| Error::Pin)?;
        pins.fq_ud.set_low().map_err(|_| Error::Pin)?;
        pins.reset.set_low().map_err(|_| Error::Pin)?;
        self.pins = Some(pins);

        debug!("begin, system clock {} Hz", self.calibration_hz);
        self.reset()
    }

    /// Master reset.
    /// RESET pulse, then a W_CLK and a FQ_UD pulse select serial load mode.
    /// A 1 Hz word is loaded right away so the chip doesn't run
    /// on whatever its registers powered up with.
    pub fn reset(&mut self) -> Result<(), Error> {
        let width = self.config.pulse_width_us;
        let pins = self.pins.as_mut().ok_or(Error::NotInitialized)?;
        self.state = State::Resetting;

        pulse(&mut pins.reset, &mut self.delay, width)?;
        pulse(&mut pins.w_clk, &mut self.delay, width)?;
        pulse(&mut pins.fq_ud, &mut self.delay, width)?;

        debug!("reset");
        self.set_frequency(RESET_FREQUENCY_HZ)
    }

    /// Sets output frequency, Hz.
    ///
    /// No range checks, this is the fast path: frequencies at or above
    /// the calibration frequency (or negative) wrap around.
    /// See [`try_set_frequency`](Ad985x::try_set_frequency).
    pub fn set_frequency(&mut self, f_out_hz: f64) -> Result<(), Error> {
        self.delta_phase = DeltaPhase::from_hz(f_out_hz, self.calibration_hz);
        self.update()
    }

    /// Sets output frequency, Hz, rejecting values outside of `[0, calibration)`.
    /// Nothing is sent on error.
    pub fn try_set_frequency(&mut self, f_out_hz: f64) -> Result<(), Error> {
        self.delta_phase = DeltaPhase::checked_from_hz(f_out_hz, self.calibration_hz)
            .map_err(|e| {
                warn!("rejected {} Hz, calibration {} Hz", f_out_hz, self.calibration_hz);
                e
            })?;
        self.update()
    }

    /// Sets the 5-bit output phase offset (11.25 degree steps) and sends the word.
    pub fn set_phase(&mut self, steps: u8) -> Result<(), Error> {
        let phase = Phase::new(steps).ok_or(Error::InvalidPhase)?;
        self.control = self.control.set(phase);
        self.update()
    }

    /// Replaces the calibration frequency with the measured system clock.
    /// Takes effect with the next frequency update, nothing is sent.
    pub fn calibrate(&mut self, trim_hz: f64) {
        debug!("calibration {} Hz -> {} Hz", self.calibration_hz, trim_hz);
        self.calibration_hz = trim_hz;
    }

    /// Shifts the 40-bit word out and latches it.
    ///
    /// Data is clocked into the 40-bit shift register on each rising
    /// edge of W_CLK, W0 (delta phase LSB) first. The rising edge of
    /// FQ_UD moves the shift register into the active registers.
    ///
    /// The bus transaction is always closed, the first error wins.
    pub fn update(&mut self) -> Result<(), Error> {
        if self.pins.is_none() {
            return Err(Error::NotInitialized);
        }
        let bytes = self.control_word().to_bytes();
        trace!("update {}", bytes);

        self.spi.begin_transaction(&self.config.bus).map_err(|_| Error::Bus)?;
        let sent = self.spi.write(&bytes)
            .map_err(|_| Error::Bus)
            .and_then(|_| self.load_pulse());
        let ended = self.spi.end_transaction().map_err(|_| Error::Bus);
        sent.and(ended)?;

        self.state = State::Active;
        Ok(())
    }

    /// Power-down.
    /// A short write of the power-down control bits, framed by FQ_UD pulses.
    /// Stored frequency and phase are kept for [`power_up`](Ad985x::power_up).
    pub fn power_down(&mut self) -> Result<(), Error> {
        self.load_pulse()?;

        self.spi.begin_transaction(&self.config.bus).map_err(|_| Error::Bus)?;
        let sent = self.spi.write(&[POWER_DOWN_WORD]).map_err(|_| Error::Bus);
        let ended = self.spi.end_transaction().map_err(|_| Error::Bus);
        sent.and(ended)?;

        self.load_pulse()?;

        debug!("power down");
        self.state = State::PoweredDown;
        Ok(())
    }

    /// Power-up. Any full 40-bit word with the power-down bit clear wakes
    /// the chip, so this just sends the stored one again.
    pub fn power_up(&mut self) -> Result<(), Error> {
        debug!("power up");
        self.update()
    }

    /// Chip model
    pub fn variant(self: &Self) -> Variant {
        self.variant
    }

    /// Driver configuration
    pub fn config(self: &Self) -> &Config {
        &self.config
    }

    /// Driver state
    pub fn state(self: &Self) -> State {
        self.state
    }

    /// System clock frequency used for delta phase calculation
    pub fn calibration_hz(self: &Self) -> f64 {
        self.calibration_hz
    }

    /// Last computed tuning word
    pub fn delta_phase(self: &Self) -> DeltaPhase {
        self.delta_phase
    }

    /// Control byte sent after the tuning word
    pub fn control_byte(self: &Self) -> ControlByte {
        self.control
    }

    /// Word [`update`](Ad985x::update) sends
    pub fn control_word(self: &Self) -> ControlWord {
        ControlWord {
            delta_phase: self.delta_phase,
            control: self.control,
        }
    }

    /// Output frequency of the stored tuning word, Hz.
    /// Differs from the requested one by less than the tuning resolution.
    pub fn frequency_hz(self: &Self) -> f64 {
        self.delta_phase.f_out_hz(self.calibration_hz)
    }

    /// Releases the bus, the delay and the pins (if `begin` was called)
    pub fn release(self) -> (SPI, DELAY, Option<Pins<WCLK, FQUD, RST>>) {
        (self.spi, self.delay, self.pins)
    }

    /// FQ_UD strobe
    fn load_pulse(self: &mut Self) -> Result<(), Error> {
        let pins = self.pins.as_mut().ok_or(Error::NotInitialized)?;
        pulse(&mut pins.fq_ud, &mut self.delay, self.config.pulse_width_us)
    }
}


/// High for `width_us`, then low.
#[inline(always)]
fn pulse<P, D>(pin: &mut P, delay: &mut D, width_us: u16) -> Result<(), Error>
where P: OutputPin,
      D: DelayUs<u16>,
{
    pin.set_high().map_err(|_| Error::Pin)?;
    if width_us > 0 {
        delay.delay_us(width_us);
    }
    pin.set_low().map_err(|_| Error::Pin)
}
