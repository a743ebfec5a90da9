//! # Coordinate formatting
//! Conversion of scaled integer coordinates into canonical decimal text.

use crate::fixed::COORDINATE_PRECISION;
use std::fmt::Write;

const FRACTION_DIGITS: usize = 7;

/// Append the canonical decimal text for the scaled coordinate `value` to
/// `out`. The text has at most seven fractional digits, no trailing zeros
/// and no exponent, and parses back to the same `value`.
///
/// The value is not range checked.
///
/// # Example
/// ```rust
/// use fixloc::append_coordinate;
/// let mut s = String::new();
/// append_coordinate(&mut s, -1_234_500_000).unwrap();
/// assert_eq!(s, "-123.45");
/// ```
pub fn append_coordinate<W>(out: &mut W, value: i32) -> std::fmt::Result
where
    W: Write,
{
    if value < 0 {
        out.write_char('-')?;
    }
    let value = value.unsigned_abs();
    let precision = COORDINATE_PRECISION as u32;

    // Digits, least significant first. Ten is enough for any u32.
    let mut temp = [b'0'; 10];
    let mut len = 0;
    let mut v = value;
    loop {
        temp[len] = b'0' + (v % 10) as u8;
        len += 1;
        v /= 10;
        if v == 0 {
            break;
        }
    }
    // The buffer is already zero filled.
    len = len.max(FRACTION_DIGITS);

    // Any u32 is below 1000 * precision, so there are at most three
    // digits before the decimal point.
    if value >= precision {
        while len > FRACTION_DIGITS {
            len -= 1;
            out.write_char(char::from(temp[len]))?;
        }
    } else {
        out.write_char('0')?;
    }

    let trailing_zeros =
        temp[..len].iter().take_while(|&&b| b == b'0').count();
    if trailing_zeros < len {
        out.write_char('.')?;
        for &digit in temp[trailing_zeros..len].iter().rev() {
            out.write_char(char::from(digit))?;
        }
    }

    Ok(())
}

/// Return the canonical decimal text for the scaled coordinate `value`.
/// The value is not range checked.
pub fn coordinate_to_string(value: i32) -> String {
    let mut s = String::with_capacity(12);
    append_coordinate(&mut s, value)
        .expect("writing to a String should never fail");
    s
}
