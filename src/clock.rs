//! Sampling cadence driven by the periodic timer interrupt

use core::cell::Cell;

/// Tick counter and "sample due" flag shared with the timer interrupt.
///
/// The interrupt handler calls [`SamplingClock::tick`]; the main loop drains
/// the flag with [`SamplingClock::take_due`]. On target both sides go through
/// `SAMPLING_CLOCK` inside a critical section, so multi-byte fields are
/// never read torn.
pub struct SamplingClock {
    ticks: Cell<u32>,
    until_due: Cell<u16>,
    due: Cell<bool>,
    interrupts_per_sample: u16,
}

impl SamplingClock {
    pub const fn new(interrupts_per_sample: u16) -> Self {
        let interrupts_per_sample = if interrupts_per_sample == 0 {
            1
        } else {
            interrupts_per_sample
        };
        Self {
            ticks: Cell::new(0),
            until_due: Cell::new(interrupts_per_sample),
            due: Cell::new(false),
            interrupts_per_sample,
        }
    }

    /// Advance by one interrupt period. O(1), safe to call from the handler.
    #[inline]
    pub fn tick(&self) {
        self.ticks.set(self.ticks.get().wrapping_add(1));

        let remaining = self.until_due.get() - 1;
        if remaining == 0 {
            // An undrained flag just stays set: late samples merge, never queue
            self.due.set(true);
            self.until_due.set(self.interrupts_per_sample);
        } else {
            self.until_due.set(remaining);
        }
    }

    /// Read and clear the due flag
    #[inline]
    pub fn take_due(&self) -> bool {
        self.due.replace(false)
    }

    /// Peek at the due flag without consuming it
    #[inline]
    pub fn is_due(&self) -> bool {
        self.due.get()
    }

    /// Interrupts seen since startup, wrapping
    #[inline]
    pub fn ticks(&self) -> u32 {
        self.ticks.get()
    }

    #[inline]
    pub fn interrupts_per_sample(&self) -> u16 {
        self.interrupts_per_sample
    }
}

#[cfg(target_arch = "avr")]
pub use shared::*;

#[cfg(target_arch = "avr")]
mod shared {
    use super::SamplingClock;
    use crate::config::INTERRUPTS_PER_SAMPLE;
    use avr_device::interrupt::{self, Mutex};

    /// Process-wide clock, written by `TIMER0_COMP` and drained by the main loop
    pub static SAMPLING_CLOCK: Mutex<SamplingClock> =
        Mutex::new(SamplingClock::new(INTERRUPTS_PER_SAMPLE as u16));

    /// Called from the timer compare-match handler
    #[inline]
    pub fn on_timer_interrupt() {
        interrupt::free(|cs| SAMPLING_CLOCK.borrow(cs).tick());
    }

    /// Consume a pending sample request
    #[inline]
    pub fn take_sample_due() -> bool {
        interrupt::free(|cs| SAMPLING_CLOCK.borrow(cs).take_due())
    }

    /// Check for a pending request without consuming it
    #[inline]
    pub fn sample_pending() -> bool {
        interrupt::free(|cs| SAMPLING_CLOCK.borrow(cs).is_due())
    }
}
