//! Firmware entry point
//!
//! Main loop per cycle: sleep until the timer marks a sample due, read every
//! potentiometer, run the conversion, then report and refresh the display.
#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]

#[cfg(target_arch = "avr")]
use panic_halt as _;

#[cfg(target_arch = "avr")]
#[avr_device::entry]
fn main() -> ! {
    use pot_reporter::config::{
        ADC_MAX, ANALOG_INPUTS, BOTTOM_SNAP_RANGE, CHANNEL_COUNT, INTERRUPT_INTERVAL_EXPONENT,
        THRESHOLDS, TOP_SNAP_RANGE,
    };
    use pot_reporter::drivers::SerialConsole;
    use pot_reporter::hal::{Adc, Power, TickTimer, Usart0};
    use pot_reporter::logger::Logger;
    use pot_reporter::sampler::RawSampler;
    use pot_reporter::{clock, Application, Hysteresis};

    let mut console = SerialConsole::new(Usart0::new());
    let mut adc = Adc::new();
    let mut power = Power::new();
    let mut timer = TickTimer::new();

    let logger = Logger::from_features();
    logger.log_system(&mut console, "pot reporter v0.1.0").ok();

    #[cfg(feature = "display")]
    let mut oled = {
        use pot_reporter::config::DISPLAY_I2C_ADDRESS;
        use pot_reporter::drivers::Ssd1306;
        use pot_reporter::hal::Twi;

        let mut oled = Ssd1306::new(Twi::new(), DISPLAY_I2C_ADDRESS);
        if let Err(err) = oled.init() {
            pot_reporter::error::halt(&mut console, err);
        }
        oled
    };

    let sampler = RawSampler::new(ANALOG_INPUTS);
    let mut app = Application::<CHANNEL_COUNT>::new(
        Hysteresis::new(ADC_MAX, TOP_SNAP_RANGE, BOTTOM_SNAP_RANGE),
        THRESHOLDS,
        logger,
    );
    let mut raw = [0u16; CHANNEL_COUNT];

    timer.start(INTERRUPT_INTERVAL_EXPONENT);
    unsafe { avr_device::interrupt::enable() };

    loop {
        if !clock::take_sample_due() {
            power.idle_unless(clock::sample_pending);
            continue;
        }

        sampler.sample(&mut adc, &mut raw);

        let cycle = match app.run_cycle(&raw, &mut console) {
            Ok(cycle) => cycle,
            Err(never) => match never {},
        };

        #[cfg(feature = "display")]
        if let Err(err) = app.refresh_display(&cycle, &mut oled) {
            // A dropped refresh is retried on the next change
            app.logger().log_error(&mut console, &err).ok();
        }
        #[cfg(not(feature = "display"))]
        let _ = cycle;
    }
}

#[cfg(not(target_arch = "avr"))]
fn main() {
    eprintln!("pot_reporter is firmware for AVR targets; run `cargo test` for the host test suite");
}
