//! # Fixed-point coordinates
//! Constants and conversions shared by the parser, the formatter and
//! `Location`.

/// The factor between a coordinate in degrees and its scaled integer
/// representation. Seven decimal places give an accuracy of roughly a
/// centimeter, which is the same scheme the main OSM database uses.
pub const COORDINATE_PRECISION: i32 = 10_000_000;

/// The scaled value used to mark a coordinate as undefined.
pub const UNDEFINED_COORDINATE: i32 = i32::MAX;

pub(crate) const MAX_LON: i32 = 180 * COORDINATE_PRECISION;
pub(crate) const MIN_LON: i32 = -MAX_LON;
pub(crate) const MAX_LAT: i32 = 90 * COORDINATE_PRECISION;
pub(crate) const MIN_LAT: i32 = -MAX_LAT;

/// Convert a coordinate in degrees into its scaled integer representation,
/// rounding half away from zero.
///
/// There is no range check. Values which do not fit into 32 bits are
/// truncated, so call `Location::is_valid` on the result if the input is
/// untrusted.
///
/// # Example
/// ```rust
/// use fixloc::double_to_fix;
/// assert_eq!(double_to_fix(1.5), 15_000_000);
/// assert_eq!(double_to_fix(-0.00000005), -1);
/// ```
pub fn double_to_fix(c: f64) -> i32 {
    (c * f64::from(COORDINATE_PRECISION)).round() as i64 as i32
}

/// Convert a scaled integer coordinate back into degrees.
pub fn fix_to_double(c: i32) -> f64 {
    f64::from(c) / f64::from(COORDINATE_PRECISION)
}
