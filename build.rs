use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    // Host builds only run the unit tests; everything else is for the board
    let target = env::var("TARGET").unwrap_or_default();
    if target.contains("avr") {
        println!("cargo:rustc-link-arg=-mmcu=atmega128a");
        println!("cargo:warning=Building for ATmega128A at 16MHz");
    }
}
