//! Serial bus the control words are shifted out on.
//!
//! The driver only needs to push bytes inside a transaction bracket.
//! [`SerialBus`] is that capability, [`BlockingSpi`] and [`FullDuplexSpi`]
//! implement it on top of `embedded-hal` SPI peripherals.

use embedded_hal::{
    blocking::spi::Write,
    spi::FullDuplex,
};

use crate::config::*;


/// Byte oriented synchronous serial bus.
///
/// Writes happen only between `begin_transaction` and `end_transaction`,
/// nothing else should touch the bus in between.
pub trait SerialBus {
    type Error;

    /// Acquire the bus and apply `config`.
    ///
    /// The `embedded-hal` adapters only apply `config.bit_order`:
    /// clock rate and mode are fixed when the SPI peripheral is built
    /// (use [`SpiClock::hz`]), a [`SpiClock::Mhz2`] here won't slow
    /// an 8 MHz peripheral down.
    fn begin_transaction(&mut self, config: &BusConfig) -> Result<(), Self::Error>;

    /// Shift `bytes` out, first byte first. Bit order is the one passed to `begin_transaction`.
    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Release the bus
    fn end_transaction(&mut self) -> Result<(), Self::Error>;
}


/// `embedded-hal` SPI peripherals are configured once, when constructed.
/// Clock rate and mode must already match [`BusConfig`] (see [`SpiClock::hz`]);
/// bit order is fixed up in software if the peripheral can't do LSB first.
#[inline]
fn wire_byte(b: u8, native: BitOrder, requested: BitOrder) -> u8 {
    if native == requested { b } else { b.reverse_bits() }
}


/// Adapter for blocking `embedded-hal` SPI writers.
pub struct BlockingSpi<SPI> {
    spi: SPI,
    native: BitOrder,
    requested: BitOrder,
}

impl<SPI> BlockingSpi<SPI>
where SPI: Write<u8>,
{
    /// `spi` - SPI peripheral (`MOSI` => `DATA`, `SCK` => `W_CLK`, mode 0)
    /// `native` - bit order the peripheral shifts bytes out in
    pub fn new(spi: SPI, native: BitOrder) -> Self {
        BlockingSpi { spi, native, requested: native }
    }

    /// Give the peripheral back
    pub fn free(self) -> SPI {
        self.spi
    }
}

impl<SPI> SerialBus for BlockingSpi<SPI>
where SPI: Write<u8>,
{
    type Error = SPI::Error;

    fn begin_transaction(&mut self, config: &BusConfig) -> Result<(), Self::Error> {
        self.requested = config.bit_order;
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        if self.native == self.requested {
            self.spi.write(bytes)
        } else {
            for b in bytes {
                self.spi.write(&[wire_byte(*b, self.native, self.requested)])?;
            }
            Ok(())
        }
    }

    fn end_transaction(&mut self) -> Result<(), Self::Error> {
        self.requested = self.native;
        Ok(())
    }
}


/// Adapter for non-blocking full duplex `embedded-hal` SPI peripherals.
/// Received words are read back and dropped, the chip has no MISO.
pub struct FullDuplexSpi<SPI> {
    spi: SPI,
    native: BitOrder,
    requested: BitOrder,
}

impl<SPI> FullDuplexSpi<SPI>
where SPI: FullDuplex<u8>,
{
    /// `spi` - SPI peripheral (`MOSI` => `DATA`, `SCK` => `W_CLK`, mode 0)
    /// `native` - bit order the peripheral shifts bytes out in
    pub fn new(spi: SPI, native: BitOrder) -> Self {
        FullDuplexSpi { spi, native, requested: native }
    }

    /// Give the peripheral back
    pub fn free(self) -> SPI {
        self.spi
    }
}

impl<SPI> SerialBus for FullDuplexSpi<SPI>
where SPI: FullDuplex<u8>,
{
    type Error = SPI::Error;

    fn begin_transaction(&mut self, config: &BusConfig) -> Result<(), Self::Error> {
        self.requested = config.bit_order;
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        for b in bytes {
            nb::block!(self.spi.send(wire_byte(*b, self.native, self.requested)))?;
            nb::block!(self.spi.read())?;
        }
        Ok(())
    }

    fn end_transaction(&mut self) -> Result<(), Self::Error> {
        self.requested = self.native;
        Ok(())
    }
}
