//! Constants

/// AD9850 system clock: 125 MHz reference oscillator, used directly.
pub const AD9850_SYSTEM_CLOCK_HZ: f64 = 125_000_000.0;

/// AD9851 system clock: 30 MHz reference multiplied by the internal 6x REFCLK multiplier.
pub const AD9851_SYSTEM_CLOCK_HZ: f64 = 180_000_000.0;

/// Number of states of the 32-bit phase accumulator (2^32).
pub const PHASE_ACCUMULATOR_STATES: f64 = 4_294_967_296.0;

/// Phase accumulator width in bits
pub const PHASE_ACCUMULATOR_BITS: u32 = 32;

/// Length of the serial frequency/control word frame, bytes.
/// 32 bits of delta phase followed by 8 control bits.
pub const FRAME_LEN: usize = 5;

/// Single control byte with only the power-down bit (W34) set.
/// The chip accepts this short write for power management.
pub const POWER_DOWN_WORD: u8 = 0x04;

/// Frequency pushed right after reset so the chip never runs
/// with whatever garbage was in its registers.
pub const RESET_FREQUENCY_HZ: f64 = 1.0;

/// Default strobe pulse width (RESET, W_CLK, FQ_UD).
/// The datasheets ask for a few ns (RESET: 5 system clock cycles),
/// 1 us is the smallest delay most HALs can do.
pub const DEFAULT_PULSE_WIDTH_US: u16 = 1;

/// Largest value of the 5-bit phase offset field (11.25 degree steps).
pub const PHASE_MAX: u8 = 0x1F;

/// Phase offset resolution, degrees per step
pub const PHASE_STEP_DEGREES: f32 = 11.25;
