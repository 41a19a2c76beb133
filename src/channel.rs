//! Per-channel percentage conversion with edge snapping and a dead band
//!
//! Percentages are tracked as fixed-point values scaled by `adc_max` so the
//! hysteresis test can compare against raw readings without floating point.

/// Parameters of the raw-to-percentage conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hysteresis {
    adc_max: u16,
    top_snap: u16,
    bottom_snap: u16,
}

impl Hysteresis {
    pub const fn new(adc_max: u16, top_snap: u16, bottom_snap: u16) -> Self {
        Self {
            adc_max,
            top_snap,
            bottom_snap,
        }
    }

    #[inline]
    pub const fn adc_max(&self) -> u16 {
        self.adc_max
    }

    /// Percentage a channel settles on after seeing `raw`.
    ///
    /// Readings above `adc_max` are clamped first. Outside the snap ranges
    /// the percentage is only recomputed once `raw` is a full percentage
    /// point away from `scaled`; anything closer is treated as noise and
    /// `percentage` is returned unchanged.
    pub fn convert(&self, percentage: u8, scaled: u32, raw: u16) -> u8 {
        let max = u32::from(self.adc_max);
        let raw = u32::from(raw.min(self.adc_max));

        if raw + u32::from(self.top_snap) >= max {
            100
        } else if raw <= u32::from(self.bottom_snap) {
            0
        } else if scaled.abs_diff(100 * raw) >= max {
            ((100 * raw + max / 2) / max) as u8
        } else {
            percentage
        }
    }
}

/// One potentiometer input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Channel {
    percentage: u8,
    scaled: u32,
}

impl Channel {
    pub const fn new() -> Self {
        Self {
            percentage: 0,
            scaled: 0,
        }
    }

    #[inline]
    pub fn percentage(&self) -> u8 {
        self.percentage
    }

    /// Fixed-point value, always `percentage * adc_max`
    #[inline]
    pub fn scaled(&self) -> u32 {
        self.scaled
    }

    /// Raw-equivalent value reconstructed from the stored percentage
    #[inline]
    pub fn reported_value(&self) -> u16 {
        (self.scaled / 100) as u16
    }

    /// Feed one raw reading, returns true if the percentage moved
    pub fn update(&mut self, raw: u16, hysteresis: &Hysteresis) -> bool {
        let next = hysteresis.convert(self.percentage, self.scaled, raw);
        if next == self.percentage {
            return false;
        }
        self.percentage = next;
        // Rebuilt from the percentage rather than the reading so it never drifts
        self.scaled = u32::from(next) * u32::from(hysteresis.adc_max());
        true
    }
}

/// All channels plus the bookkeeping of which one moved last
pub struct ChannelBank<const N: usize> {
    channels: [Channel; N],
    hysteresis: Hysteresis,
    last_changed: usize,
}

impl<const N: usize> ChannelBank<N> {
    pub const fn new(hysteresis: Hysteresis) -> Self {
        Self {
            channels: [Channel::new(); N],
            hysteresis,
            last_changed: 0,
        }
    }

    /// Run the conversion over every channel in index order.
    ///
    /// Returns true if any channel changed. The most recently changed index
    /// ends up as the highest index that changed during this pass.
    pub fn update(&mut self, raw: &[u16; N]) -> bool {
        let mut any_changed = false;
        for (index, (channel, &reading)) in self.channels.iter_mut().zip(raw.iter()).enumerate() {
            if channel.update(reading, &self.hysteresis) {
                any_changed = true;
                self.last_changed = index;
            }
        }
        any_changed
    }

    #[inline]
    pub fn channels(&self) -> &[Channel; N] {
        &self.channels
    }

    #[inline]
    pub fn last_changed(&self) -> usize {
        self.last_changed
    }

    pub fn last_changed_channel(&self) -> &Channel {
        &self.channels[self.last_changed]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HYST: Hysteresis = Hysteresis::new(1023, 0, 0);

    fn settled(raw: u16) -> Channel {
        let mut channel = Channel::new();
        channel.update(raw, &HYST);
        channel
    }

    #[test]
    fn rounding_matches_nearest_percent() {
        assert_eq!(HYST.convert(0, 0, 511), 50);
        assert_eq!(HYST.convert(0, 0, 512), 50);
        assert_eq!(HYST.convert(0, 0, 10), 0);
        assert_eq!(HYST.convert(0, 0, 11), 1);
        assert_eq!(HYST.convert(0, 0, 1017), 99);
        assert_eq!(HYST.convert(0, 0, 1018), 100);
    }

    #[test]
    fn rounding_boundaries_split_at_half_a_percent() {
        for raw in 11..1013u16 {
            let exact = u32::from(raw) * 100;
            let floor = exact / 1023;
            let remainder = exact % 1023;
            let expected = if remainder * 2 >= 1023 { floor + 1 } else { floor };
            assert_eq!(u32::from(HYST.convert(0, 0, raw)), expected, "raw {}", raw);
        }
    }

    #[test]
    fn full_scale_and_zero_snap() {
        assert_eq!(HYST.convert(37, 37 * 1023, 1023), 100);
        assert_eq!(HYST.convert(37, 37 * 1023, 0), 0);
    }

    #[test]
    fn snap_ranges_widen_the_edges() {
        let wide = Hysteresis::new(1023, 20, 15);
        assert_eq!(wide.convert(50, 50 * 1023, 1003), 100);
        assert_eq!(wide.convert(50, 50 * 1023, 1002), 98);
        assert_eq!(wide.convert(50, 50 * 1023, 15), 0);
        assert_eq!(wide.convert(50, 50 * 1023, 16), 2);
    }

    #[test]
    fn readings_above_full_scale_are_clamped() {
        assert_eq!(HYST.convert(0, 0, 4000), 100);
        assert_eq!(HYST.convert(0, 0, u16::MAX), 100);
    }

    #[test]
    fn noise_inside_the_dead_band_is_ignored() {
        let mut channel = settled(511);
        assert_eq!(channel.percentage(), 50);
        let scaled = channel.scaled();
        for raw in 501..=521u16 {
            if scaled.abs_diff(u32::from(raw) * 100) < 1023 {
                assert!(!channel.update(raw, &HYST), "raw {}", raw);
            }
        }
        assert_eq!(channel.percentage(), 50);
        assert_eq!(channel.scaled(), 50 * 1023);
    }

    #[test]
    fn steady_reading_never_flips_over_many_cycles() {
        let mut channel = settled(700);
        let before = channel;
        for _ in 0..10_000 {
            assert!(!channel.update(700, &HYST));
        }
        assert_eq!(channel, before);
    }

    #[test]
    fn small_steps_from_the_reported_value_hold() {
        let mut channel = settled(300);
        let centre = channel.reported_value();
        for delta in 0..=5u16 {
            assert!(!channel.update(centre + delta, &HYST));
            assert!(!channel.update(centre - delta, &HYST));
        }
    }

    #[test]
    fn a_full_percent_of_travel_is_reported() {
        let mut channel = settled(511);
        assert!(!channel.update(521, &HYST));
        assert!(channel.update(522, &HYST));
        assert_eq!(channel.percentage(), 51);
        assert_eq!(channel.scaled(), 51 * 1023);
        assert_eq!(channel.reported_value(), 521);
    }

    #[test]
    fn reported_value_spans_the_adc_range() {
        assert_eq!(settled(0).reported_value(), 0);
        assert_eq!(settled(1023).reported_value(), 1023);
        assert_eq!(settled(512).reported_value(), 511);
    }

    #[test]
    fn bank_reports_any_change_and_highest_changed_index() {
        let mut bank = ChannelBank::<5>::new(HYST);
        assert!(!bank.update(&[0; 5]));
        assert_eq!(bank.last_changed(), 0);

        assert!(bank.update(&[0, 1023, 0, 512, 0]));
        assert_eq!(bank.last_changed(), 3);
        assert_eq!(bank.last_changed_channel().percentage(), 50);

        assert!(!bank.update(&[0, 1023, 0, 512, 0]));
        assert_eq!(bank.last_changed(), 3);

        assert!(bank.update(&[0, 0, 0, 512, 0]));
        assert_eq!(bank.last_changed(), 1);
        let percentages: Vec<u8> = bank.channels().iter().map(Channel::percentage).collect();
        assert_eq!(percentages, vec![0, 0, 0, 50, 0]);
    }
}
