//! # Gotope
//!
//! A language written straight onto a tape of cells, evaluated over and
//! over until nothing changes.
//!
//! Install [Rust](https://www.rust-lang.org/tools/install) then run a
//! program with `gotope program.tape`, or pipe the source to stdin.
//! ```text
//! x: 2
//! y: 3
//! z: *(x, y)
//! "product:" | out
//! z | out
//! ```
//! The terminal redraws the streams while the tape settles and leaves the
//! final values on screen.
//! ```text
//! CONVERGED  12:00:01  2 scans
//! product:
//! 6
//! ```

#[path = "doc/language.rs"]
#[allow(non_snake_case)]
pub mod _Language;

#[path = "doc/errors.rs"]
#[allow(non_snake_case)]
pub mod __Errors;

pub mod config;
pub mod lang;
pub mod mach;
