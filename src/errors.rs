//! Errors

/// Driver errors.
///
/// Bus and pin errors of the underlying HAL are collapsed into
/// [`Error::Bus`] and [`Error::Pin`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Serial bus transaction failed
    Bus,

    /// Setting one of the W_CLK / FQ_UD / RESET pins failed
    Pin,

    /// Pins were not assigned yet, call `begin` first
    NotInitialized,

    /// Requested output frequency is negative, not finite or not below the calibration frequency
    InvalidOutputFrequency,

    /// Phase offset doesn't fit the 5-bit phase field
    InvalidPhase,
}
