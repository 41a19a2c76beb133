//! TWI (I2C) master, write direction only
use crate::error::BusError;
use avr_device::atmega128a::TWI;
use embedded_hal::blocking::i2c::Write;

/// TWI status codes
#[derive(Clone, Copy, PartialEq)]
#[repr(u8)]
enum TwiStatus {
    StartTransmitted = 0x08,
    RepStartTransmitted = 0x10,
    AddrWriteAck = 0x18,
    AddrWriteNack = 0x20,
    DataWriteAck = 0x28,
    DataWriteNack = 0x30,
    ArbitrationLost = 0x38,
}

// TWBR for 400kHz @ 16MHz with a /1 status prescaler
const TWBR_FAST: u8 = 12;

// TWCR
const TWINT: u8 = 0x80;
const TWSTA: u8 = 0x20;
const TWSTO: u8 = 0x10;
const TWEN: u8 = 0x04;

pub struct Twi {
    _private: (),
}

impl Twi {
    /// Fast-mode (400kHz) master
    pub fn new() -> Self {
        unsafe {
            let p = TWI::ptr();
            (*p).twbr.write(|w| w.bits(TWBR_FAST));
            (*p).twsr.write(|w| w.bits(0));
            (*p).twcr.write(|w| w.bits(TWEN));
        }
        Self { _private: () }
    }

    fn wait(&mut self) -> u8 {
        unsafe {
            let p = TWI::ptr();
            while (*p).twcr.read().bits() & TWINT == 0 {}
            (*p).twsr.read().bits() & 0xF8
        }
    }

    fn start(&mut self) -> Result<(), BusError> {
        unsafe {
            (*TWI::ptr()).twcr.write(|w| w.bits(TWINT | TWSTA | TWEN));
        }
        match self.wait() {
            s if s == TwiStatus::StartTransmitted as u8
                || s == TwiStatus::RepStartTransmitted as u8 => Ok(()),
            s if s == TwiStatus::ArbitrationLost as u8 => Err(BusError::ArbitrationLost),
            _ => Err(BusError::StartFailed),
        }
    }

    fn stop(&mut self) {
        unsafe {
            let p = TWI::ptr();
            (*p).twcr.write(|w| w.bits(TWINT | TWSTO | TWEN));
            while (*p).twcr.read().bits() & TWSTO != 0 {}
        }
    }

    fn send(&mut self, byte: u8) -> u8 {
        unsafe {
            let p = TWI::ptr();
            (*p).twdr.write(|w| w.bits(byte));
            (*p).twcr.write(|w| w.bits(TWINT | TWEN));
        }
        self.wait()
    }

    fn transfer(&mut self, address: u8, bytes: &[u8]) -> Result<(), BusError> {
        self.start()?;

        match self.send(address << 1) {
            s if s == TwiStatus::AddrWriteAck as u8 => {}
            s if s == TwiStatus::AddrWriteNack as u8 => return Err(BusError::AddressNack),
            _ => return Err(BusError::ArbitrationLost),
        }

        for &byte in bytes {
            match self.send(byte) {
                s if s == TwiStatus::DataWriteAck as u8 => {}
                s if s == TwiStatus::DataWriteNack as u8 => return Err(BusError::DataNack),
                _ => return Err(BusError::ArbitrationLost),
            }
        }
        Ok(())
    }
}

impl Default for Twi {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for Twi {
    type Error = BusError;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), BusError> {
        let result = self.transfer(address, bytes);
        // Release the bus on failure too
        self.stop();
        result
    }
}
