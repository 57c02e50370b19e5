#![deny(unsafe_code)]
#![no_main]
#![no_std]

extern crate panic_halt; // panic handler

use cortex_m;
use cortex_m_rt::entry;
use stm32f4xx_hal as hal;

use cortex_m_semihosting::hprintln;

use crate::hal::{
    prelude::*,
    stm32,
    spi::Spi,
    time::Hertz,
};

use embedded_hal::spi::MODE_0;

use ad985x::{Ad985x, BitOrder, BlockingSpi, Config, Variant};


#[entry]
fn main() -> ! {
    let dp = stm32::Peripherals::take().unwrap();
    let cp = cortex_m::peripheral::Peripherals::take().unwrap();

    let rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.use_hse(8.mhz()).sysclk(168.mhz()).pclk1(42.mhz()).pclk2(84.mhz()).freeze();

    let gpioa = dp.GPIOA.split();
    let mut led1 = gpioa.pa6.into_push_pull_output();

    let delay = hal::delay::Delay::new(cp.SYST, clocks);

    // W_CLK strobe joins SCK through a 1k resistor, SCK idles low in mode 0
    let gpiob = dp.GPIOB.split();
    let w_clk = gpiob.pb12.into_push_pull_output();
    let fq_ud = gpiob.pb10.into_push_pull_output();
    let reset = gpiob.pb11.into_push_pull_output();

    let sck = gpiob.pb13.into_alternate_af5();
    let mosi = gpiob.pb15.into_alternate_af5();

    let config = Config::default();

    let spi = Spi::spi2(
        dp.SPI2,
        (sck, hal::spi::NoMiso , mosi),
        MODE_0,
        Hertz(config.bus.clock.hz()),
        clocks,
    );

    // the HAL only shifts MSB first, the adapter flips the bits
    let bus = BlockingSpi::new(spi, BitOrder::MsbFirst);

    let mut dds = Ad985x::with_config(Variant::Ad9850, bus, delay, config);
    dds.begin(w_clk, fq_ud, reset).unwrap();

    // measured on this board's crystal
    dds.calibrate(124_999_250.0);

    let f = 7_040_000.0;
    dds.set_frequency(f).unwrap();

    let word = dds.control_word();
    hprintln!("{:?} {:#04x?}", word, word.to_bytes()).unwrap();
    hprintln!("f {} <-> f_out {}", f, dds.frequency_hz()).unwrap();

    let (_spi, mut delay, _pins) = {
        let mut on = true;
        for _ in 0..10 {
            if on {
                dds.power_down().unwrap();
                led1.set_low().unwrap();
            } else {
                dds.power_up().unwrap();
                led1.set_high().unwrap();
            }
            on = !on;
            cortex_m::asm::delay(168_000_000);
        }
        dds.release()
    };

    loop {
        led1.set_high().unwrap();
        delay.delay_ms(1000_u32);
        led1.set_low().unwrap();
        delay.delay_ms(1000_u32);
    }
}
