//! Status display refresh and inactivity shutoff

/// Sink for the "channel + percentage" status view
pub trait StatusDisplay {
    type Error;

    fn set_power(&mut self, on: bool) -> Result<(), Self::Error>;

    /// Render `#channel` and `percentage%`; `channel` is 1-based
    fn show(&mut self, channel: u8, percentage: u8) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayCommand {
    /// Power on and render; `channel` is the 0-based index
    Show { channel: usize, percentage: u8 },
    Off,
}

impl DisplayCommand {
    pub fn apply<D: StatusDisplay>(self, display: &mut D) -> Result<(), D::Error> {
        match self {
            DisplayCommand::Show { channel, percentage } => {
                display.set_power(true)?;
                let label = u8::try_from(channel + 1).unwrap_or(u8::MAX);
                display.show(label, percentage)
            }
            DisplayCommand::Off => display.set_power(false),
        }
    }
}

/// Refreshes on change, switches off once after `timeout` quiet cycles.
///
/// The startup render happens on a cycle that already counts as unchanged,
/// so a timeout of one cycle turns the display off on the following cycle.
pub struct DisplayTimeoutPolicy {
    timeout: u32,
    startup_pending: bool,
    lit: bool,
}

impl DisplayTimeoutPolicy {
    pub const fn new(timeout: u32) -> Self {
        Self {
            timeout: if timeout == 0 { 1 } else { timeout },
            startup_pending: true,
            lit: false,
        }
    }

    /// `unchanged_cycles` is the count after this cycle was recorded
    pub fn evaluate(
        &mut self,
        changed: bool,
        unchanged_cycles: u32,
        channel: usize,
        percentage: u8,
    ) -> Option<DisplayCommand> {
        let startup = core::mem::replace(&mut self.startup_pending, false);

        if changed || startup {
            self.lit = true;
            Some(DisplayCommand::Show { channel, percentage })
        } else if self.lit && unchanged_cycles >= self.timeout {
            self.lit = false;
            Some(DisplayCommand::Off)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{DisplayCall, FakeDisplay};

    #[test]
    fn startup_renders_the_initial_channel() {
        let mut policy = DisplayTimeoutPolicy::new(10);
        assert_eq!(
            policy.evaluate(false, 1, 0, 0),
            Some(DisplayCommand::Show { channel: 0, percentage: 0 })
        );
        assert_eq!(policy.evaluate(false, 2, 0, 0), None);
    }

    #[test]
    fn turns_off_exactly_once_after_timeout() {
        let mut policy = DisplayTimeoutPolicy::new(3);
        policy.evaluate(true, 0, 2, 40);

        let offs = (1..=20)
            .filter_map(|cycles| policy.evaluate(false, cycles, 2, 40))
            .collect::<Vec<_>>();
        assert_eq!(offs, vec![DisplayCommand::Off]);
    }

    #[test]
    fn change_before_timeout_suppresses_off() {
        let mut policy = DisplayTimeoutPolicy::new(3);
        policy.evaluate(true, 0, 0, 10);
        assert_eq!(policy.evaluate(false, 1, 0, 10), None);
        assert_eq!(policy.evaluate(false, 2, 0, 10), None);
        assert_eq!(
            policy.evaluate(true, 0, 4, 90),
            Some(DisplayCommand::Show { channel: 4, percentage: 90 })
        );
        assert_eq!(policy.evaluate(false, 1, 4, 90), None);
        assert_eq!(policy.evaluate(false, 2, 4, 90), None);
        assert_eq!(policy.evaluate(false, 3, 4, 90), Some(DisplayCommand::Off));
    }

    #[test]
    fn one_cycle_timeout_still_turns_off_after_startup() {
        let mut policy = DisplayTimeoutPolicy::new(1);
        assert_eq!(
            policy.evaluate(false, 1, 0, 0),
            Some(DisplayCommand::Show { channel: 0, percentage: 0 })
        );

        let offs = (2..=20)
            .filter_map(|cycles| policy.evaluate(false, cycles, 0, 0))
            .collect::<Vec<_>>();
        assert_eq!(offs, vec![DisplayCommand::Off]);
    }

    #[test]
    fn stays_off_through_counter_wraparound() {
        let mut policy = DisplayTimeoutPolicy::new(2);
        policy.evaluate(true, 0, 1, 5);
        assert_eq!(policy.evaluate(false, 1, 1, 5), None);
        assert_eq!(policy.evaluate(false, 2, 1, 5), Some(DisplayCommand::Off));
        assert_eq!(policy.evaluate(false, u32::MAX, 1, 5), None);
        assert_eq!(policy.evaluate(false, 0, 1, 5), None);
        assert_eq!(policy.evaluate(false, 2, 1, 5), None);
    }

    #[test]
    fn label_saturates_for_out_of_range_channel() {
        let mut display = FakeDisplay::default();
        DisplayCommand::Show { channel: 300, percentage: 12 }
            .apply(&mut display)
            .unwrap();
        assert_eq!(display.commands.last(), Some(&DisplayCall::Show(u8::MAX, 12)));
    }

    #[test]
    fn show_powers_on_before_rendering_one_based_channel() {
        let mut display = FakeDisplay::default();
        DisplayCommand::Show { channel: 2, percentage: 100 }
            .apply(&mut display)
            .unwrap();
        DisplayCommand::Off.apply(&mut display).unwrap();
        assert_eq!(
            display.commands,
            vec![DisplayCall::Power(true), DisplayCall::Show(3, 100), DisplayCall::Power(false)]
        );
    }
}
