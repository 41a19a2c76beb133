//! Raw sampling pass over all analog inputs

/// Anything able to produce a single raw conversion for a mux input
pub trait AnalogInput {
    fn read_raw(&mut self, input: u8) -> u16;
}

/// Reads one raw value per channel, in channel order
pub struct RawSampler<const N: usize> {
    inputs: [u8; N],
}

impl<const N: usize> RawSampler<N> {
    pub const fn new(inputs: [u8; N]) -> Self {
        Self { inputs }
    }

    pub fn sample<A: AnalogInput>(&self, adc: &mut A, raw: &mut [u16; N]) {
        for (slot, &input) in raw.iter_mut().zip(self.inputs.iter()) {
            *slot = adc.read_raw(input);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeAdc;

    #[test]
    fn fills_buffer_in_channel_order() {
        let mut adc = FakeAdc::new([10, 20, 30, 40, 50, 60, 70, 80]);
        let sampler = RawSampler::new([6, 0, 3]);
        let mut raw = [0u16; 3];

        sampler.sample(&mut adc, &mut raw);

        assert_eq!(raw, [70, 10, 40]);
        assert_eq!(adc.conversions, vec![6, 0, 3]);
    }
}
