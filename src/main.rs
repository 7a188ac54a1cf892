//! # Gotope
//!
//! Runs a tape program from a file, or from stdin when no file is given.
//!

use log::LevelFilter;
use simple_logger::SimpleLogger;

mod term;

fn main() {
    if let Err(error) = SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .env()
        .init()
    {
        eprintln!("logger: {}", error);
    }
    let path = std::env::args().nth(1);
    std::process::exit(term::main(path.as_deref()));
}
