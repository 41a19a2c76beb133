//! Potentiometer sampling and change reporting for ATmega128A boards
//!
//! The sampling, hysteresis and reporting logic is plain `no_std` Rust and
//! runs on the host under `cargo test`. Register access lives in `hal`,
//! which only exists when building for AVR.
#![cfg_attr(not(test), no_std)]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]

pub mod application;
pub mod channel;
pub mod clock;
pub mod config;
#[cfg(feature = "display")]
pub mod display;
pub mod drivers;
pub mod error;
#[cfg(target_arch = "avr")]
pub mod hal;
pub mod logger;
pub mod report;
pub mod sampler;

#[cfg(test)]
mod testing;

pub use application::{Application, Cycle};
pub use channel::{Channel, ChannelBank, Hysteresis};
pub use clock::SamplingClock;
pub use error::{BusError, Error};
