use crate::err::{Error, FormatError, InvalidLocation};
use crate::fixed::{
    double_to_fix, fix_to_double, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON,
    UNDEFINED_COORDINATE,
};
use crate::format::append_coordinate;
use crate::parse::{parse_coordinate, parse_full_coordinate};
use std::cmp::Ordering;
use std::fmt::Write;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A place on earth, stored as two 32 bit integers which are
/// `COORDINATE_PRECISION` times larger than the longitude (`x`) and
/// latitude (`y`) in degrees. This gives an accuracy of a few centimeters.
///
/// An undefined `Location` is created by `Location::default()`. Coordinates
/// are never checked on whether they are inside bounds, call `is_valid` to
/// check this.
///
/// # Ordering
/// Locations are ordered by `x` and then by `y`. If either location is
/// undefined the ordering is still total, but it has no meaning and should
/// not be relied on.
///
/// # Hashing
/// Hash values are derived from both coordinates and are consistent with
/// equality. They are not guaranteed to be stable across versions of this
/// crate or across platforms.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Location {
    x: i32,
    y: i32,
}

impl Location {
    /// Create an undefined `Location`.
    pub const fn undefined() -> Self {
        Self {
            x: UNDEFINED_COORDINATE,
            y: UNDEFINED_COORDINATE,
        }
    }

    /// Create a new `Location` from scaled coordinates.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Create a new `Location` from scaled coordinates, keeping only the
    /// lower 32 bits of each.
    pub const fn from_i64(x: i64, y: i64) -> Self {
        Self::new(x as i32, y as i32)
    }

    /// Create a new `Location` from a longitude and latitude in degrees.
    ///
    /// # Example
    /// ```rust
    /// use fixloc::Location;
    /// let location = Location::from_lon_lat(13.4, 52.5);
    /// assert_eq!(location.x(), 134_000_000);
    /// assert_eq!(location.y(), 525_000_000);
    /// ```
    pub fn from_lon_lat(lon: f64, lat: f64) -> Self {
        Self::new(double_to_fix(lon), double_to_fix(lat))
    }

    /// Create a new `Location` from a longitude and latitude in decimal
    /// degree text. Each string must contain a number and nothing else.
    pub fn from_lon_lat_str(
        lon: &str,
        lat: &str,
    ) -> Result<Self, FormatError> {
        let x = parse_full_coordinate(lon)?;
        let y = parse_full_coordinate(lat)?;
        Ok(Self::new(x, y))
    }

    /// Parse a longitude, the `separator` and a latitude from the start of
    /// `input`, and advance `input` past them. Anything after the latitude
    /// is left for the caller. If the longitude is not followed by
    /// `separator`, the error is a `TrailingCharacters` error carrying the
    /// text after the longitude.
    ///
    /// # Example
    /// ```rust
    /// use fixloc::Location;
    /// let mut input = "8.5 47.25;";
    /// let location = Location::parse_partial(&mut input, ' ').unwrap();
    /// assert_eq!(location, Location::from_lon_lat(8.5, 47.25));
    /// assert_eq!(input, ";");
    /// ```
    pub fn parse_partial(
        input: &mut &str,
        separator: char,
    ) -> Result<Self, FormatError> {
        let mut rest = *input;
        let mut location = Self::undefined();
        location.set_lon_partial(&mut rest)?;
        rest = match rest.strip_prefix(separator) {
            Some(rest) => rest,
            None => return Err(FormatError::trailing_characters(rest)),
        };
        location.set_lat_partial(&mut rest)?;
        *input = rest;
        Ok(location)
    }

    /// Return true if neither coordinate is undefined.
    pub fn is_defined(&self) -> bool {
        self.x != UNDEFINED_COORDINATE && self.y != UNDEFINED_COORDINATE
    }

    /// Return true if the coordinates are inside the usual bounds
    /// (-180 <= lon <= 180, -90 <= lat <= 90). Undefined locations are
    /// never valid.
    pub fn is_valid(&self) -> bool {
        (MIN_LON..=MAX_LON).contains(&self.x)
            && (MIN_LAT..=MAX_LAT).contains(&self.y)
    }

    /// Return the scaled longitude, without any checks.
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Return the scaled latitude, without any checks.
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Set the scaled longitude. There is no range check.
    pub fn set_x(&mut self, x: i32) -> &mut Self {
        self.x = x;
        self
    }

    /// Set the scaled latitude. There is no range check.
    pub fn set_y(&mut self, y: i32) -> &mut Self {
        self.y = y;
        self
    }

    /// Return the longitude in degrees, or an error if this location is
    /// not valid.
    pub fn lon(&self) -> Result<f64, InvalidLocation> {
        self.check()?;
        Ok(self.lon_without_check())
    }

    /// Return the latitude in degrees, or an error if this location is
    /// not valid.
    pub fn lat(&self) -> Result<f64, InvalidLocation> {
        self.check()?;
        Ok(self.lat_without_check())
    }

    /// Return the longitude in degrees, whether this location is valid or
    /// not.
    pub fn lon_without_check(&self) -> f64 {
        fix_to_double(self.x)
    }

    /// Return the latitude in degrees, whether this location is valid or
    /// not.
    pub fn lat_without_check(&self) -> f64 {
        fix_to_double(self.y)
    }

    /// Set the longitude in degrees. This never fails and there is no range
    /// check, call `is_valid` afterwards if the value is untrusted.
    pub fn set_lon(&mut self, lon: f64) -> &mut Self {
        self.x = double_to_fix(lon);
        self
    }

    /// Set the latitude in degrees. This never fails and there is no range
    /// check, call `is_valid` afterwards if the value is untrusted.
    pub fn set_lat(&mut self, lat: f64) -> &mut Self {
        self.y = double_to_fix(lat);
        self
    }

    /// Set the longitude from decimal degree text, which must contain a
    /// number and nothing else. On error the location is not modified.
    pub fn set_lon_str(&mut self, lon: &str) -> Result<&mut Self, FormatError> {
        self.x = parse_full_coordinate(lon)?;
        Ok(self)
    }

    /// Set the latitude from decimal degree text, which must contain a
    /// number and nothing else. On error the location is not modified.
    pub fn set_lat_str(&mut self, lat: &str) -> Result<&mut Self, FormatError> {
        self.y = parse_full_coordinate(lat)?;
        Ok(self)
    }

    /// Set the longitude from the number at the start of `input`, and
    /// advance `input` past it.
    pub fn set_lon_partial(
        &mut self,
        input: &mut &str,
    ) -> Result<&mut Self, FormatError> {
        self.x = parse_coordinate(input)?;
        Ok(self)
    }

    /// Set the latitude from the number at the start of `input`, and
    /// advance `input` past it.
    pub fn set_lat_partial(
        &mut self,
        input: &mut &str,
    ) -> Result<&mut Self, FormatError> {
        self.y = parse_coordinate(input)?;
        Ok(self)
    }

    /// Write the longitude, `separator` and latitude to `out`, or return an
    /// error without writing anything if this location is not valid.
    ///
    /// # Example
    /// ```rust
    /// use fixloc::Location;
    /// let mut s = String::new();
    /// Location::from_lon_lat(-3.25, 40.0).as_string(&mut s, ' ').unwrap();
    /// assert_eq!(s, "-3.25 40");
    ///
    /// assert!(Location::default().as_string(&mut s, ',').is_err());
    /// ```
    pub fn as_string<W>(&self, out: &mut W, separator: char) -> Result<(), Error>
    where
        W: Write,
    {
        self.check()?;
        self.as_string_without_check(out, separator)?;
        Ok(())
    }

    /// Write the longitude, `separator` and latitude to `out`, whether this
    /// location is valid or not.
    pub fn as_string_without_check<W>(
        &self,
        out: &mut W,
        separator: char,
    ) -> std::fmt::Result
    where
        W: Write,
    {
        append_coordinate(out, self.x)?;
        out.write_char(separator)?;
        append_coordinate(out, self.y)
    }

    /// Return the longitude, `separator` and latitude as a new string, or
    /// an error if this location is not valid.
    pub fn to_canonical_string(
        &self,
        separator: char,
    ) -> Result<String, InvalidLocation> {
        self.check()?;
        let mut s = String::with_capacity(25);
        self.as_string_without_check(&mut s, separator)
            .expect("writing to a String should never fail");
        Ok(s)
    }

    /// Return a hash value made up of both coordinates. Equal locations
    /// have equal hash values.
    pub fn hash_value(&self) -> u64 {
        let x = u64::from(self.x as u32);
        let y = u64::from(self.y as u32);
        (x << 32) ^ y
    }

    fn check(&self) -> Result<(), InvalidLocation> {
        if self.is_valid() {
            Ok(())
        } else {
            log::trace!("invalid location {:?}", self);
            Err(InvalidLocation)
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::undefined()
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> Ordering {
        self.x.cmp(&other.x).then(self.y.cmp(&other.y))
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_value());
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_defined() {
            f.write_char('(')?;
            self.as_string_without_check(f, ',')?;
            f.write_char(')')
        } else {
            write!(f, "(undefined,undefined)")
        }
    }
}

/// Parses text in the form `lon,lat`, such as `13.4,52.5`.
impl FromStr for Location {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rest = s;
        let location = Self::parse_partial(&mut rest, ',')?;
        if rest.is_empty() {
            Ok(location)
        } else {
            Err(FormatError::trailing_characters(rest))
        }
    }
}

#[cfg(test)]
mod test {
    use super::Location;
    use crate::err::{Error, FormatErrorKind};
    use crate::fixed::{COORDINATE_PRECISION as P, UNDEFINED_COORDINATE};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::{BTreeSet, HashSet};
    use std::hash::{Hash, Hasher};

    fn std_hash(location: &Location) -> u64 {
        let mut hasher = DefaultHasher::new();
        location.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn default_is_undefined() {
        let location = Location::default();
        assert_eq!(location.x(), UNDEFINED_COORDINATE);
        assert_eq!(location.y(), UNDEFINED_COORDINATE);
        assert!(!location.is_defined());
        assert!(!location.is_valid());
        assert_eq!(location, Location::undefined());
    }

    #[test]
    fn validity() {
        assert!(Location::from_lon_lat(0.0, 0.0).is_valid());
        assert!(Location::from_lon_lat(180.0, 90.0).is_valid());
        assert!(Location::from_lon_lat(-180.0, -90.0).is_valid());
        assert!(!Location::from_lon_lat(200.0, 0.0).is_valid());
        assert!(!Location::from_lon_lat(0.0, 90.0000001).is_valid());
        assert!(!Location::new(-180 * P - 1, 0).is_valid());

        let half_defined = Location::new(0, UNDEFINED_COORDINATE);
        assert!(!half_defined.is_defined());
        assert!(!half_defined.is_valid());

        let defined_but_invalid = Location::from_lon_lat(200.0, 0.0);
        assert!(defined_but_invalid.is_defined());
    }

    #[test]
    fn from_i64_truncates() {
        let location = Location::from_i64(1 << 32 | 5, -7);
        assert_eq!(location, Location::new(5, -7));
    }

    #[test]
    fn checked_accessors() {
        let location = Location::from_lon_lat(9.5, -33.25);
        assert_eq!(location.lon().unwrap(), 9.5);
        assert_eq!(location.lat().unwrap(), -33.25);

        let location = Location::from_lon_lat(181.0, 0.0);
        assert!(location.lon().is_err());
        assert!(location.lat().is_err());
        assert_eq!(location.lon_without_check(), 181.0);
        assert_eq!(location.lat_without_check(), 0.0);

        assert!(Location::default().lon().is_err());
    }

    #[test]
    fn numeric_setters() {
        let mut location = Location::default();
        location.set_lon(1.5).set_lat(-2.5);
        assert_eq!(location, Location::new(15_000_000, -25_000_000));

        location.set_x(1).set_y(2);
        assert_eq!(location, Location::new(1, 2));
    }

    #[test]
    fn text_setters() {
        let mut location = Location::default();
        location.set_lon_str("13.3731").unwrap();
        location.set_lat_str("-0.00000004").unwrap();
        assert_eq!(location, Location::new(133_731_000, 0));

        let err = location.set_lat_str("1.5 ").unwrap_err();
        assert_eq!(err.kind(), FormatErrorKind::TrailingCharacters);
        assert_eq!(err.text(), " ");

        let err = location.set_lon_str("abc").unwrap_err();
        assert_eq!(err.kind(), FormatErrorKind::Malformed);
        assert_eq!(err.text(), "abc");

        assert_eq!(location, Location::new(133_731_000, 0));
    }

    #[test]
    fn partial_setters() {
        let mut input = "3.5,-4.25 rest";
        let mut location = Location::default();
        location.set_lon_partial(&mut input).unwrap();
        assert_eq!(input, ",-4.25 rest");
        input = &input[1..];
        location.set_lat_partial(&mut input).unwrap();
        assert_eq!(input, " rest");
        assert_eq!(location, Location::from_lon_lat(3.5, -4.25));
    }

    #[test]
    fn from_lon_lat_str() {
        let location = Location::from_lon_lat_str("1e1", "-2.5").unwrap();
        assert_eq!(location, Location::new(10 * P, -25_000_000));
        assert!(Location::from_lon_lat_str("1", "").is_err());
    }

    #[test]
    fn parse_partial_requires_separator() {
        let mut input = "1.5;2";
        let err = Location::parse_partial(&mut input, ',').unwrap_err();
        assert_eq!(err.kind(), FormatErrorKind::TrailingCharacters);
        assert_eq!(err.text(), ";2");
        assert_eq!(err.to_string(), "characters after coordinate: ';2'");
        assert_eq!(input, "1.5;2");

        let mut input = "1.5";
        let err = Location::parse_partial(&mut input, ',').unwrap_err();
        assert_eq!(err.kind(), FormatErrorKind::TrailingCharacters);
        assert_eq!(err.text(), "");
    }

    #[test]
    fn from_str() {
        let location: Location = "13.4,52.5".parse().unwrap();
        assert_eq!(location, Location::from_lon_lat(13.4, 52.5));

        let err = "13.4,52.5,".parse::<Location>().unwrap_err();
        assert_eq!(err.kind(), FormatErrorKind::TrailingCharacters);
        assert!("13.4".parse::<Location>().is_err());
        assert!("13.4,".parse::<Location>().is_err());
    }

    #[test]
    fn as_string() {
        let location = Location::from_lon_lat(1.5, 0.05);
        let mut s = String::new();
        location.as_string(&mut s, ',').unwrap();
        assert_eq!(s, "1.5,0.05");

        let mut s = String::new();
        let err = Location::from_lon_lat(0.0, 91.0)
            .as_string(&mut s, ',')
            .unwrap_err();
        assert!(matches!(err, Error::InvalidLocation(_)));
        assert_eq!(s, "");
    }

    #[test]
    fn as_string_without_check() {
        let mut s = String::new();
        Location::from_lon_lat(200.0, -100.0)
            .as_string_without_check(&mut s, '|')
            .unwrap();
        assert_eq!(s, "200|-100");
    }

    #[test]
    fn to_canonical_string() {
        let location = Location::from_lon_lat(-0.1234567, 45.0);
        assert_eq!(location.to_canonical_string(',').unwrap(), "-0.1234567,45");
        assert!(Location::default().to_canonical_string(',').is_err());
    }

    #[test]
    fn text_round_trip() {
        let location = Location::new(-1_799_999_999, 899_999_999);
        let text = location.to_canonical_string(',').unwrap();
        assert_eq!(text.parse::<Location>().unwrap(), location);
    }

    #[test]
    fn display() {
        assert_eq!(Location::from_lon_lat(13.0, 52.0).to_string(), "(13,52)");
        assert_eq!(
            Location::from_lon_lat(-0.5, 1.25).to_string(),
            "(-0.5,1.25)"
        );
        assert_eq!(Location::default().to_string(), "(undefined,undefined)");
        assert_eq!(
            Location::new(UNDEFINED_COORDINATE, 0).to_string(),
            "(undefined,undefined)"
        );
        assert_eq!(Location::from_lon_lat(190.0, 0.0).to_string(), "(190,0)");
    }

    #[test]
    fn equality() {
        assert_eq!(Location::new(1, 2), Location::new(1, 2));
        assert_ne!(Location::new(1, 2), Location::new(2, 1));
        assert_eq!(Location::default(), Location::default());
    }

    #[test]
    fn ordering() {
        assert!(Location::new(1, 5) < Location::new(2, 0));
        assert!(Location::new(1, 1) < Location::new(1, 2));
        assert!(Location::new(-1, 9) < Location::new(0, -9));
        assert!(Location::new(3, 3) <= Location::new(3, 3));
        assert!(Location::new(3, 4) > Location::new(3, 3));

        let mut locations = vec![
            Location::new(2, 1),
            Location::new(1, 2),
            Location::new(1, 1),
        ];
        locations.sort();
        assert_eq!(
            locations,
            vec![Location::new(1, 1), Location::new(1, 2), Location::new(2, 1)]
        );
    }

    #[test]
    fn undefined_locations_still_sort() {
        let set: BTreeSet<_> = vec![
            Location::default(),
            Location::new(0, 0),
            Location::default(),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn hash_is_consistent_with_equality() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut samples = vec![Location::default(), Location::default()];
        for _ in 0..1000 {
            // A small range so that equal pairs actually occur.
            let x = rng.gen_range(-3..=3);
            let y = rng.gen_range(-3..=3);
            samples.push(Location::new(x, y));
        }

        for a in &samples {
            for b in samples.iter().take(50) {
                if a == b {
                    assert_eq!(a.hash_value(), b.hash_value());
                    assert_eq!(std_hash(a), std_hash(b));
                }
            }
        }
    }

    #[test]
    fn hash_value_mixes_both_coordinates() {
        assert_ne!(
            Location::new(1, 2).hash_value(),
            Location::new(2, 1).hash_value()
        );
        assert_eq!(Location::new(0, -1).hash_value(), 0xffff_ffff);
        assert_eq!(Location::new(1, 0).hash_value(), 1 << 32);
    }

    #[test]
    fn usable_in_hash_set() {
        let set: HashSet<_> = vec![
            Location::from_lon_lat(1.0, 2.0),
            "1,2".parse().unwrap(),
            Location::default(),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
    }
}
