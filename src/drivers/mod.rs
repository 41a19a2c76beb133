#[cfg(feature = "display")]
pub mod oled;
pub mod serial_console;

#[cfg(feature = "display")]
pub use oled::Ssd1306;
pub use serial_console::SerialConsole;
