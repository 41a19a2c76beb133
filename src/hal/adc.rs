use crate::sampler::AnalogInput;
use avr_device::atmega128a::ADC;

// ADMUX: REFS1:0 = 01 selects AVCC with external cap at AREF
const ADMUX_REFS_AVCC: u8 = 0x40;
const ADMUX_MUX_MASK: u8 = 0x07;
// ADCSRA
const ADEN: u8 = 0x80;
const ADSC: u8 = 0x40;
// 125kHz @ 16MHz, inside the 50-200kHz window for full resolution
const ADPS_DIV128: u8 = 0x07;

/// Single-conversion driver for the 10-bit ADC
pub struct Adc {
    _private: (),
}

impl Adc {
    pub fn new() -> Self {
        unsafe {
            let p = ADC::ptr();
            // No auto-trigger, no interrupt
            (*p).adcsra.write(|w| w.bits(ADEN | ADPS_DIV128));
            (*p).admux.write(|w| w.bits(ADMUX_REFS_AVCC));
        }
        Self { _private: () }
    }

    /// Blocking conversion on single-ended input `input` (0..=7)
    pub fn read_channel(&mut self, input: u8) -> u16 {
        unsafe {
            let p = ADC::ptr();

            (*p).admux
                .write(|w| w.bits(ADMUX_REFS_AVCC | (input & ADMUX_MUX_MASK)));

            // Start conversion, ADSC clears itself when done
            (*p).adcsra.modify(|r, w| w.bits(r.bits() | ADSC));
            while (*p).adcsra.read().bits() & ADSC != 0 {}

            // 16-bit access, ADCL is read before ADCH
            (*p).adc.read().bits()
        }
    }
}

impl AnalogInput for Adc {
    #[inline]
    fn read_raw(&mut self, input: u8) -> u16 {
        self.read_channel(input)
    }
}

impl Default for Adc {
    fn default() -> Self {
        Self::new()
    }
}
