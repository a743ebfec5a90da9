//! # Coordinate parsing
//! Conversion of decimal degree text into scaled integer coordinates,
//! without going through floating point.

use crate::err::FormatError;
use std::convert::TryFrom;

/// Number of significant fractional digits, which is the number of zeros
/// in `COORDINATE_PRECISION`.
const SIGNIFICANT_DIGITS: i64 = 7;
/// Maximum number of digits before the decimal point.
const MAX_INTEGER_DIGITS: usize = 10;
/// Maximum number of non-significant fractional digits which are skipped.
const MAX_IGNORED_DIGITS: usize = 20;
/// Maximum number of digits in an exponent.
const MAX_EXPONENT_DIGITS: usize = 5;

/// Parse a coordinate in decimal degrees from the start of `input`,
/// returning it scaled by `COORDINATE_PRECISION`.
///
/// On success, `input` is advanced past the number and left pointing at
/// the first unconsumed character, which is not checked. On failure,
/// `input` is not modified.
///
/// Accepted are an optional `-`, digits with an optional decimal point,
/// and an optional exponent (`1.5e1`). The result is rounded half away
/// from zero at the seventh fractional digit.
///
/// # Example
/// ```rust
/// use fixloc::parse_coordinate;
/// let mut input = "13.4050,52.52";
/// let lon = parse_coordinate(&mut input).unwrap();
/// assert_eq!(lon, 134_050_000);
/// assert_eq!(input, ",52.52");
/// ```
pub fn parse_coordinate(input: &mut &str) -> Result<i32, FormatError> {
    let full = *input;
    let mut cursor = Cursor::new(full.as_bytes());
    let value = cursor
        .parse_scaled()
        .ok_or_else(|| FormatError::malformed(full))?;
    // The cursor only ever consumes ASCII, so this is a char boundary.
    *input = &full[cursor.pos..];
    Ok(value)
}

/// Parse a coordinate in decimal degrees which must take up all of `s`.
///
/// # Example
/// ```rust
/// use fixloc::parse_full_coordinate;
/// assert_eq!(parse_full_coordinate("-0.5").unwrap(), -5_000_000);
/// assert!(parse_full_coordinate("0.5 ").is_err());
/// ```
pub fn parse_full_coordinate(s: &str) -> Result<i32, FormatError> {
    let mut rest = s;
    let value = parse_coordinate(&mut rest)?;
    if rest.is_empty() {
        Ok(value)
    } else {
        Err(FormatError::trailing_characters(rest))
    }
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn peek_digit(&self) -> Option<i64> {
        self.peek()
            .filter(u8::is_ascii_digit)
            .map(|b| i64::from(b - b'0'))
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Read at least one and at most `max_digits` digits as an integer.
    /// Returns `None` if there is no digit, or if there are more than
    /// `max_digits` of them.
    fn digits(&mut self, max_digits: usize) -> Option<i64> {
        let mut acc = self.peek_digit()?;
        self.pos += 1;
        let mut count = 1;
        while let Some(digit) = self.peek_digit() {
            if count == max_digits {
                return None;
            }
            acc = acc * 10 + digit;
            self.pos += 1;
            count += 1;
        }
        Some(acc)
    }

    fn parse_scaled(&mut self) -> Option<i32> {
        let sign = if self.eat(b'-') { -1 } else { 1 };

        // One more than the significant digits, to allow rounding.
        let mut scale = SIGNIFICANT_DIGITS + 1;
        let mut result = 0;

        if self.peek() == Some(b'.') {
            // There has to be a digit after the point if there was none
            // before it.
            if !self.peek_at(1).map_or(false, |b| b.is_ascii_digit()) {
                return None;
            }
        } else {
            result = self.digits(MAX_INTEGER_DIGITS)?;
        }

        if self.eat(b'.') {
            while scale > 0 {
                match self.peek_digit() {
                    Some(digit) => {
                        result = result * 10 + digit;
                        self.pos += 1;
                        scale -= 1;
                    }
                    None => break,
                }
            }

            let mut ignored = 0;
            while self.peek_digit().is_some() {
                ignored += 1;
                if ignored == MAX_IGNORED_DIGITS {
                    return None;
                }
                self.pos += 1;
            }
        }

        if self.eat(b'e') || self.eat(b'E') {
            let esign = if self.eat(b'-') {
                -1
            } else {
                self.eat(b'+');
                1
            };
            let exponent = self.digits(MAX_EXPONENT_DIGITS)?;
            scale += exponent * esign;
        }

        if scale < 0 {
            while scale < 0 && result > 0 {
                result /= 10;
                scale += 1;
            }
        } else {
            while scale > 0 && result > 0 {
                result = result.checked_mul(10)?;
                scale -= 1;
            }
        }

        let rounded = (result + 5) / 10 * sign;
        i32::try_from(rounded).ok()
    }
}
