use avr_device::atmega128a::PORTB;
use core::marker::PhantomData;

/// Push-pull output on bit `PIN` of `PORT`
#[derive(Debug)]
pub struct OutputPin<PORT, const PIN: u8> {
    _port: PhantomData<PORT>,
}

macro_rules! impl_output {
    ($PORT:ident, $ddr:ident, $port:ident) => {
        impl<const P: u8> OutputPin<$PORT, P> {
            /// Set the DDR bit; the pin starts driven low
            pub fn new() -> Self {
                unsafe {
                    let p = $PORT::ptr();
                    (*p).$port.modify(|r, w| w.bits(r.bits() & !(1 << P)));
                    (*p).$ddr.modify(|r, w| w.bits(r.bits() | (1 << P)));
                }
                Self { _port: PhantomData }
            }

            #[inline]
            pub fn toggle(&mut self) {
                unsafe {
                    (*$PORT::ptr()).$port.modify(|r, w| w.bits(r.bits() ^ (1 << P)));
                }
            }
        }
    };
}

impl_output!(PORTB, ddrb, portb);

pub mod board {
    use super::*;

    /// Alarm LED blinked by the fatal handler
    pub type StatusLed = OutputPin<PORTB, 4>;
}
