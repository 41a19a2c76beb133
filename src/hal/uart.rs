use crate::config::{BAUD_RATE, CPU_FREQ_HZ};
use avr_device::atmega128a::USART0;
use core::convert::Infallible;
use embedded_hal::serial::Write;

// UCSR0A
const UDRE0: u8 = 1 << 5;
const TXC0: u8 = 1 << 6;
const U2X0: u8 = 1 << 1;
// UCSR0B
const TXEN0: u8 = 1 << 3;
// UCSR0C: asynchronous 8N1
const FRAME_8N1: u8 = 0x06;

/// Double-speed divisor, rounded to nearest
const fn ubrr(baud: u32) -> u16 {
    ((CPU_FREQ_HZ + 4 * baud) / (8 * baud) - 1) as u16
}

/// Transmit-only, polled USART0
pub struct Usart0 {
    _private: (),
}

impl Usart0 {
    pub fn new() -> Self {
        let divisor = ubrr(BAUD_RATE);
        unsafe {
            let p = USART0::ptr();
            (*p).ubrr0h.write(|w| w.bits((divisor >> 8) as u8));
            (*p).ubrr0l.write(|w| w.bits(divisor as u8));
            (*p).ucsr0a.write(|w| w.bits(U2X0));
            (*p).ucsr0c.write(|w| w.bits(FRAME_8N1));
            (*p).ucsr0b.write(|w| w.bits(TXEN0));
        }
        Self { _private: () }
    }
}

impl Write<u8> for Usart0 {
    type Error = Infallible;

    fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
        unsafe {
            let p = USART0::ptr();
            if (*p).ucsr0a.read().bits() & UDRE0 == 0 {
                return Err(nb::Error::WouldBlock);
            }
            // Writing TXC0 as one clears it so flush can wait for this byte
            (*p).ucsr0a.modify(|r, w| w.bits(r.bits() | TXC0));
            (*p).udr0.write(|w| w.bits(word));
        }
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        unsafe {
            let status = (*USART0::ptr()).ucsr0a.read().bits();
            if status & UDRE0 != 0 && status & TXC0 != 0 {
                Ok(())
            } else {
                Err(nb::Error::WouldBlock)
            }
        }
    }
}

impl Default for Usart0 {
    fn default() -> Self {
        Self::new()
    }
}
