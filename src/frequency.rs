//! Frequency calculations

use crate::{constants::*, errors::*};


/// Frequency tuning word ("delta phase"), added to the 32-bit
/// phase accumulator on every system clock tick.
/// f OUT = ΔPhase × CLKIN / 2^32
#[derive(Debug,Copy,Clone,Default,PartialEq,Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeltaPhase(pub u32);

impl DeltaPhase {

    /// ΔPhase = f OUT × 2^32 / CLKIN, rounded down.
    ///
    /// No range checks: f OUT at or above CLKIN (or negative)
    /// silently wraps modulo 2^32, as the chip would see it.
    /// The quotient is computed exactly from the `f64` mantissas,
    /// plain `f64` maths is only used when it can't be
    /// (non-finite inputs, CLKIN <= 0, absurdly large quotients).
    pub fn from_hz(f_out_hz: f64, calibration_hz: f64) -> Self {
        if f_out_hz.is_finite() && calibration_hz.is_finite() && calibration_hz > 0.0 {
            if let Some(dp) = exact_quotient(f_out_hz.abs(), calibration_hz) {
                // truncated toward zero, two's complement for negatives
                return DeltaPhase(if f_out_hz < 0.0 { dp.wrapping_neg() } else { dp });
            }
        }
        // i64 first: f64 -> u32 saturates, we want the low 32 bits
        let dp = f_out_hz * PHASE_ACCUMULATOR_STATES / calibration_hz;
        DeltaPhase(dp as i64 as u32)
    }

    /// Same as [`from_hz`](DeltaPhase::from_hz) but rejects frequencies
    /// outside of `[0, CLKIN)` instead of wrapping.
    pub fn checked_from_hz(f_out_hz: f64, calibration_hz: f64) -> Result<Self, Error> {
        let valid_clk = calibration_hz.is_finite() && calibration_hz > 0.0;
        let valid_f = f_out_hz.is_finite() && f_out_hz >= 0.0 && f_out_hz < calibration_hz;
        if valid_clk && valid_f {
            Ok(Self::from_hz(f_out_hz, calibration_hz))
        } else {
            Err(Error::InvalidOutputFrequency)
        }
    }

    /// Output frequency this tuning word produces with the given system clock.
    /// f OUT = ΔPhase × CLKIN / 2^32
    pub fn f_out_hz(self: &Self, calibration_hz: f64) -> f64 {
        self.0 as f64 * calibration_hz / PHASE_ACCUMULATOR_STATES
    }

    /// Output frequency resolution (one ΔPhase step), Hz
    pub fn resolution_hz(calibration_hz: f64) -> f64 {
        calibration_hz / PHASE_ACCUMULATOR_STATES
    }
}


/// Finite, non-negative `x` as `m * 2^e`
#[inline]
fn decompose(x: f64) -> (u64, i32) {
    let bits = x.to_bits();
    let exp = ((bits >> 52) & 0x7ff) as i32;
    let frac = bits & ((1u64 << 52) - 1);
    if exp == 0 {
        (frac, -1074)
    } else {
        (frac | (1u64 << 52), exp - 1075)
    }
}

/// Low 32 bits of floor(f * 2^32 / clk) for finite f >= 0, clk > 0.
/// Both mantissas are below 2^53, shifting either by up to 74 bits stays in u128.
/// `None` if the quotient doesn't fit.
fn exact_quotient(f: f64, clk: f64) -> Option<u32> {
    const MAX_SHIFT: i32 = 74;

    let (mf, ef) = decompose(f);
    let (mc, ec) = decompose(clk);
    let shift = ef + PHASE_ACCUMULATOR_BITS as i32 - ec;

    let q = if shift >= 0 {
        if shift > MAX_SHIFT {
            return None;
        }
        ((mf as u128) << shift) / mc as u128
    } else if -shift > MAX_SHIFT {
        // mf < 2^53 <= mc * 2^-shift
        0
    } else {
        mf as u128 / ((mc as u128) << -shift)
    };
    Some(q as u32)
}
