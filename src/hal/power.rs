use avr_device::atmega128a::CPU;
use avr_device::interrupt;

// MCUCR: SE is bit 5, SM1:0 bits 4:3, SM2 bit 2; all SM bits clear is Idle
const MCUCR_SE: u8 = 1 << 5;
const MCUCR_SM_MASK: u8 = 0x1C;

pub struct Power {
    _private: (),
}

impl Power {
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Select Idle and set SE; timers and the USART keep running
    #[inline]
    fn enable_idle(&mut self) {
        unsafe {
            (*CPU::ptr())
                .mcucr
                .modify(|r, w| w.bits((r.bits() & !MCUCR_SM_MASK) | MCUCR_SE));
        }
    }

    #[inline]
    fn disable_sleep(&mut self) {
        unsafe {
            (*CPU::ptr()).mcucr.modify(|r, w| w.bits(r.bits() & !MCUCR_SE));
        }
    }

    /// Idle until the next interrupt unless `pending` already reports work.
    ///
    /// `pending` is checked with interrupts masked; `sei` always executes the
    /// following `sleep` before any interrupt is serviced, so a wake-up
    /// arriving between the check and the sleep is not lost.
    pub fn idle_unless(&mut self, pending: impl FnOnce() -> bool) {
        interrupt::disable();
        if pending() {
            unsafe { interrupt::enable() };
            return;
        }
        self.enable_idle();
        unsafe { interrupt::enable() };
        avr_device::asm::sleep();
        self.disable_sleep();
    }
}

impl Default for Power {
    fn default() -> Self {
        Self::new()
    }
}
