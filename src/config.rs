//! Configuration constants for the potentiometer reporter firmware
//!
//! Everything here is fixed at compile time. Derived thresholds are computed
//! by `const fn`s and checked with `const` assertions so a bad combination
//! fails the build instead of misbehaving on the board.

/// CPU frequency in Hz
pub const CPU_FREQ_HZ: u32 = 16_000_000;

/// Number of potentiometer channels
pub const CHANNEL_COUNT: usize = 5;

/// ADC multiplexer input for each channel, in channel order
pub const ANALOG_INPUTS: [u8; CHANNEL_COUNT] = [0, 1, 2, 3, 4];

/// UART baud rate
pub const BAUD_RATE: u32 = 9600;

/// Full-scale ADC reading (10-bit converter)
pub const ADC_MAX: u16 = 1023;

/// Readings this close to `ADC_MAX` snap to 100%
pub const TOP_SNAP_RANGE: u16 = 0;

/// Readings at or below this value snap to 0%
pub const BOTTOM_SNAP_RANGE: u16 = 0;

/// Requested time between two samples in milliseconds
pub const SAMPLE_INTERVAL_MS: u32 = 10;

/// Timer interrupt period is `2^INTERRUPT_INTERVAL_EXPONENT` milliseconds
pub const INTERRUPT_INTERVAL_EXPONENT: u8 = 0;

/// Longest the serial line stays quiet before values are resent
pub const MAX_SILENCE_MS: u32 = 10_000;

/// Inactivity after which the display is switched off
pub const DISPLAY_TIMEOUT_MS: u32 = 5_000;

/// TWI address of the status display
pub const DISPLAY_I2C_ADDRESS: u8 = 0x3C;

/// Timer interrupt period in milliseconds
pub const fn interrupt_interval_ms(exponent: u8) -> u32 {
    1 << exponent
}

/// Timer interrupts between two samples, never less than one
pub const fn interrupts_per_sample(sample_interval_ms: u32, exponent: u8) -> u32 {
    let ticks = sample_interval_ms / interrupt_interval_ms(exponent);
    if ticks == 0 {
        1
    } else {
        ticks
    }
}

/// Number of sample periods covering `duration_ms`, never less than one
pub const fn samples_in(duration_ms: u32, sample_period_ms: u32) -> u32 {
    let samples = duration_ms / sample_period_ms;
    if samples == 0 {
        1
    } else {
        samples
    }
}

pub const INTERRUPT_INTERVAL_MS: u32 = interrupt_interval_ms(INTERRUPT_INTERVAL_EXPONENT);

pub const INTERRUPTS_PER_SAMPLE: u32 =
    interrupts_per_sample(SAMPLE_INTERVAL_MS, INTERRUPT_INTERVAL_EXPONENT);

/// Actual sampling period, which may differ from the requested interval
/// after rounding to whole timer ticks
pub const SAMPLE_PERIOD_MS: u32 = INTERRUPTS_PER_SAMPLE * INTERRUPT_INTERVAL_MS;

pub const MAX_UNCHANGED_SAMPLES_BEFORE_TRANSMISSION: u32 =
    samples_in(MAX_SILENCE_MS, SAMPLE_PERIOD_MS);

pub const MAX_UNCHANGED_SAMPLES_BEFORE_DISPLAY_TIMEOUT: u32 =
    samples_in(DISPLAY_TIMEOUT_MS, SAMPLE_PERIOD_MS);

const _: () = assert!(INTERRUPT_INTERVAL_EXPONENT <= 4);
// Channels are labelled `#1`..`#N` with a u8 on the display
const _: () = assert!(CHANNEL_COUNT > 0 && CHANNEL_COUNT < u8::MAX as usize);
const _: () = assert!(INTERRUPTS_PER_SAMPLE >= 1 && INTERRUPTS_PER_SAMPLE <= u16::MAX as u32);
const _: () = assert!(TOP_SNAP_RANGE < ADC_MAX && BOTTOM_SNAP_RANGE < ADC_MAX);
const _: () = assert!(MAX_UNCHANGED_SAMPLES_BEFORE_TRANSMISSION >= 1);
const _: () = assert!(MAX_UNCHANGED_SAMPLES_BEFORE_DISPLAY_TIMEOUT >= 1);

/// Cycle-count thresholds shared by the report and display policies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub transmission: u32,
    pub display_timeout: u32,
}

impl Thresholds {
    pub const fn new(transmission: u32, display_timeout: u32) -> Self {
        Self {
            transmission: if transmission == 0 { 1 } else { transmission },
            display_timeout: if display_timeout == 0 { 1 } else { display_timeout },
        }
    }
}

pub const THRESHOLDS: Thresholds = Thresholds::new(
    MAX_UNCHANGED_SAMPLES_BEFORE_TRANSMISSION,
    MAX_UNCHANGED_SAMPLES_BEFORE_DISPLAY_TIMEOUT,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cadence_resends_every_ten_seconds() {
        assert_eq!(INTERRUPT_INTERVAL_MS, 1);
        assert_eq!(INTERRUPTS_PER_SAMPLE, 10);
        assert_eq!(SAMPLE_PERIOD_MS, 10);
        assert_eq!(MAX_UNCHANGED_SAMPLES_BEFORE_TRANSMISSION, 1000);
        assert_eq!(MAX_UNCHANGED_SAMPLES_BEFORE_DISPLAY_TIMEOUT, 500);
    }

    #[test]
    fn interrupts_per_sample_never_drops_below_one() {
        assert_eq!(interrupts_per_sample(10, 4), 1);
        assert_eq!(interrupts_per_sample(0, 0), 1);
        assert_eq!(interrupts_per_sample(100, 2), 25);
    }

    #[test]
    fn slow_interrupts_stretch_the_sample_period() {
        // 10 ms requested with 8 ms ticks gives one tick per sample
        let ips = interrupts_per_sample(10, 3);
        let period = ips * interrupt_interval_ms(3);
        assert_eq!(period, 8);
        assert_eq!(samples_in(10_000, period), 1250);
    }

    #[test]
    fn zero_thresholds_are_raised_to_one() {
        assert_eq!(Thresholds::new(0, 0), Thresholds::new(1, 1));
        assert_eq!(samples_in(5, 10), 1);
    }
}
