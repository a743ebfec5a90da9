//! # Overview
//! This crate provides `Location`, a geographic point stored as two 32 bit
//! fixed-point integers, along with a decimal text codec which converts
//! between those integers and decimal degrees without using floating point.
//! Coordinates are scaled by `COORDINATE_PRECISION` (10,000,000), which is
//! the scheme used by the main OSM database.
//!
//! # Usage
//! 1. Put this dependency in your Cargo.toml:
//!     ```toml
//!     [dependencies]
//!     fixloc = "0.1"
//!     ```
//!     Enable the `json` feature to encode locations as `serde_json`
//!     values.
//! 1. Parse, inspect and format locations:
//!     ```rust
//!     use fixloc::Location;
//!
//!     fn main() -> Result<(), fixloc::Error> {
//!         let mut location: Location = "13.3731,52.51630".parse()?;
//!         assert_eq!(location.x(), 133_731_000);
//!         assert_eq!(location.lat()?, 52.5163);
//!
//!         location.set_lat_str("-33.8688")?;
//!         let mut s = String::new();
//!         location.as_string(&mut s, ' ')?;
//!         assert_eq!(s, "13.3731 -33.8688");
//!
//!         println!("{}", location); // (13.3731,-33.8688)
//!         Ok(())
//!     }
//!     ```
//!
//! Parsing functions which take a `&mut &str` advance it past the text
//! they consumed, so several coordinates can be read from one field:
//! ```rust
//! use fixloc::parse_coordinate;
//! let mut field = "1.5 2.5";
//! let x = parse_coordinate(&mut field).unwrap();
//! field = field.trim_start();
//! let y = parse_coordinate(&mut field).unwrap();
//! assert_eq!((x, y), (15_000_000, 25_000_000));
//! ```

mod err;
mod fixed;
mod format;
#[cfg(feature = "json")]
mod json;
mod location;
mod parse;

pub use err::{Error, FormatError, FormatErrorKind, InvalidLocation};
pub use fixed::{
    double_to_fix, fix_to_double, COORDINATE_PRECISION, UNDEFINED_COORDINATE,
};
pub use format::{append_coordinate, coordinate_to_string};
#[cfg(feature = "json")]
pub use json::FromJsonError;
pub use location::Location;
pub use parse::{parse_coordinate, parse_full_coordinate};
