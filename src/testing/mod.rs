//! Host-side fakes shared by the unit tests

use crate::sampler::AnalogInput;
use core::convert::Infallible;

/// Collects everything written through `ufmt`
#[derive(Default)]
pub struct TextSink {
    text: String,
}

impl TextSink {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn lines(&self) -> Vec<&str> {
        self.text.lines().collect()
    }
}

impl ufmt::uWrite for TextSink {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.text.push_str(s);
        Ok(())
    }
}

/// ADC stand-in returning a fixed reading per mux input
pub struct FakeAdc {
    pub readings: [u16; 8],
    pub conversions: Vec<u8>,
}

impl FakeAdc {
    pub fn new(readings: [u16; 8]) -> Self {
        Self {
            readings,
            conversions: Vec::new(),
        }
    }
}

impl AnalogInput for FakeAdc {
    fn read_raw(&mut self, input: u8) -> u16 {
        self.conversions.push(input);
        self.readings[usize::from(input)]
    }
}

/// Display stand-in recording every command it receives
#[cfg(feature = "display")]
#[derive(Default)]
pub struct FakeDisplay {
    pub commands: Vec<DisplayCall>,
}

#[cfg(feature = "display")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayCall {
    Power(bool),
    Show(u8, u8),
}

#[cfg(feature = "display")]
impl crate::display::StatusDisplay for FakeDisplay {
    type Error = Infallible;

    fn set_power(&mut self, on: bool) -> Result<(), Self::Error> {
        self.commands.push(DisplayCall::Power(on));
        Ok(())
    }

    fn show(&mut self, channel: u8, percentage: u8) -> Result<(), Self::Error> {
        self.commands.push(DisplayCall::Show(channel, percentage));
        Ok(())
    }
}
