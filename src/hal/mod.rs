//! Register-level drivers for the ATmega128A, compiled for AVR targets only

pub mod adc;
pub mod gpio;
pub mod power;
pub mod timer;
#[cfg(feature = "display")]
pub mod twi;
pub mod uart;

pub use adc::Adc;
pub use gpio::OutputPin;
pub use power::Power;
pub use timer::{delay_ms, TickTimer};
#[cfg(feature = "display")]
pub use twi::Twi;
pub use uart::Usart0;
