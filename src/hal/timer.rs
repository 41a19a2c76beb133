use crate::clock;
use crate::config::CPU_FREQ_HZ;
use avr_device::atmega128a::{TC0, TC1};

/// Timer0 clock select values (CS02:0) used by the tick table. Timer0 on the
/// ATmega128A has its own prescaler table, different from Timer1/2.
#[derive(Clone, Copy)]
#[repr(u8)]
enum Prescaler {
    Div64 = 4,
    Div128 = 5,
    Div256 = 6,
    Div1024 = 7,
}

/// Prescaler and compare value for a `2^exponent` ms period at 16MHz
const fn tick_setting(exponent: u8) -> (Prescaler, u8) {
    match exponent {
        0 => (Prescaler::Div64, 249),   // 1ms
        1 => (Prescaler::Div128, 249),  // 2ms
        2 => (Prescaler::Div256, 249),  // 4ms
        3 => (Prescaler::Div1024, 124), // 8ms
        _ => (Prescaler::Div1024, 249), // 16ms
    }
}

const _: () = assert!(CPU_FREQ_HZ == 16_000_000, "tick settings assume a 16MHz clock");

const TCCR0_WGM01: u8 = 1 << 3;
const TIMSK_OCIE0: u8 = 1 << 1;

/// Timer0 in CTC mode raising `TIMER0_COMP` every `2^exponent` ms
pub struct TickTimer {
    _private: (),
}

impl TickTimer {
    pub fn new() -> Self {
        unsafe {
            let p = TC0::ptr();
            (*p).tccr0.write(|w| w.bits(0));
            (*p).tcnt0.write(|w| w.bits(0));
        }
        Self { _private: () }
    }

    pub fn start(&mut self, exponent: u8) {
        let (prescaler, top) = tick_setting(exponent);
        unsafe {
            let p = TC0::ptr();
            (*p).ocr0.write(|w| w.bits(top));
            (*p).tccr0.write(|w| w.bits(TCCR0_WGM01 | prescaler as u8));
            (*p).timsk.modify(|r, w| w.bits(r.bits() | TIMSK_OCIE0));
        }
    }
}

impl Default for TickTimer {
    fn default() -> Self {
        Self::new()
    }
}

#[avr_device::interrupt(atmega128a)]
fn TIMER0_COMP() {
    clock::on_timer_interrupt();
}

/// Busy-wait using Timer1; works with interrupts disabled
pub fn delay_ms(ms: u16) {
    unsafe {
        let p = TC1::ptr();
        // Normal mode, clk/64: 250 counts per ms
        (*p).tccr1a.write(|w| w.bits(0));
        (*p).tccr1b.write(|w| w.bits(0x03));

        for _ in 0..ms {
            (*p).tcnt1.write(|w| w.bits(0));
            while (*p).tcnt1.read().bits() < 250 {}
        }

        (*p).tccr1b.write(|w| w.bits(0));
    }
}
