//! AD9850 / AD9851 serial control word

use crate::{constants::*, frequency::DeltaPhase};


/// Bit operations on the control byte (bits W32..W39 of the 40-bit word)
pub trait BitField {
    /// Number of bits in the bit field
    fn num_bits() -> u8;

    /// Offset from W32
    fn offset() -> u8;

    #[inline]
    fn mask() -> u8 {
        !(0xFFu8 << Self::num_bits())
    }
}

/// Generate BitField implementation
macro_rules! gen_bitfield_impl {
    ($n:ident, $nb:tt, $off:tt) => {
        impl BitField for $n {
            #[inline] fn num_bits() -> u8 { $nb }
            #[inline] fn offset() -> u8 { $off }
        }
    }
}

/// Single bit on/off switch
macro_rules! gen_bitfield_flag {
    ($(#[$meta:meta])*, $n:ident, $off:tt) => {
        $(#[$meta])*
        #[derive(Debug,Copy,Clone,PartialEq,Eq)]
        pub enum $n {
            Disabled,
            Enabled,
        }

        gen_bitfield_impl!($n, 1, $off);

        impl From<u8> for $n {
            #[inline]
            fn from(x: u8) -> Self { if x & 1 == 0 { $n::Disabled } else { $n::Enabled } }
        }
        impl From<$n> for u8 { #[inline] fn from(x: $n) -> u8 { x as u8 } }
    }
}


gen_bitfield_flag!(
    /// W32. On the AD9851 this enables the 6x REFCLK multiplier
    /// (30 MHz crystal -> 180 MHz system clock).
    /// On the AD9850 it is a factory test control bit and must stay 0.
    , RefMultiplier, 0
);


gen_bitfield_flag!(
    /// W34, power-down. Output and most of the chip are shut down,
    /// dissipation drops from ~380mW to ~30mW @5V.
    , PowerDown, 2
);


/// W35..W39, output phase offset in 11.25 degree steps (0..=31).
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub struct Phase(pub u8);

gen_bitfield_impl!(Phase, 5, 3);

impl From<u8> for Phase { #[inline] fn from(x: u8) -> Self { Phase(x) } }
impl From<Phase> for u8 { #[inline] fn from(x: Phase) -> u8 { x.0 } }

impl Phase {
    /// Phase offset, checked against the 5-bit field width.
    pub fn new(steps: u8) -> Option<Self> {
        if steps > PHASE_MAX { None } else { Some(Phase(steps)) }
    }

    /// Phase offset in degrees
    pub fn degrees(self: &Self) -> f32 {
        self.0 as f32 * PHASE_STEP_DEGREES
    }
}


/// Last byte of the serial frame: multiplier / power-down / phase bits.
/// Bit 0 of the byte is W32, the first control bit shifted in.
#[derive(Debug,Copy,Clone,Default,PartialEq,Eq)]
pub struct ControlByte(pub u8);

impl ControlByte {
    #[inline]
    pub fn get<F>(self: &Self) -> F
    where F: Sized + BitField + From<u8>
    {
        F::from(
            (self.0 >> F::offset()) & F::mask()
        )
    }

    #[inline]
    pub fn set<F>(mut self: Self, f: F) -> Self
    where F: Sized + BitField + Into<u8>
    {
        let fbits = (f.into() & F::mask()) << F::offset();
        let rbits = self.0 & (! ( F::mask() << F::offset() ));
        self.0 = rbits | fbits;
        self
    }
}


/// Full 40-bit frequency/control/phase word.
#[derive(Debug,Copy,Clone,Default,PartialEq,Eq)]
pub struct ControlWord {
    pub delta_phase: DeltaPhase,
    pub control: ControlByte,
}

impl ControlWord {

    /// Word in wire order: delta phase low byte first, control byte last.
    /// The bus shifts each byte LSB first, so W0 is the first bit out.
    #[inline]
    pub fn to_bytes(self: &Self) -> [u8; FRAME_LEN] {
        let dp = self.delta_phase.0.to_le_bytes();
        [dp[0], dp[1], dp[2], dp[3], self.control.0]
    }

    /// Parse a frame as seen on the wire.
    pub fn from_bytes(bytes: &[u8; FRAME_LEN]) -> Self {
        ControlWord {
            delta_phase: DeltaPhase(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])),
            control: ControlByte(bytes[4]),
        }
    }
}
