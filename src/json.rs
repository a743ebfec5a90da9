//! # JSON
//! Encoding of `Location`s as JSON values, enabled by the `json` feature.
//!
//! A defined location is encoded as
//! `{"_kind": "coord", "lon": 13.4, "lat": 52.5}`, and an undefined one as
//! `null`. Numbers are written from, and read back through, the decimal
//! text codec, so encoding and decoding never changes a location.

use crate::format::coordinate_to_string;
use crate::location::Location;
use crate::parse::parse_full_coordinate;
use serde_json::{json, Value};
use std::convert::TryFrom;

const KIND: &str = "_kind";
const COORD_KIND: &str = "coord";

impl Location {
    /// Encode this location as a JSON value.
    ///
    /// # Example
    /// ```rust
    /// use fixloc::Location;
    /// use serde_json::json;
    /// let location = Location::from_lon_lat(13.4, 52.5);
    /// assert_eq!(
    ///     location.to_json(),
    ///     json!({"_kind": "coord", "lon": 13.4, "lat": 52.5})
    /// );
    /// assert_eq!(Location::from_json(&location.to_json()).unwrap(), location);
    /// ```
    pub fn to_json(&self) -> Value {
        if self.is_defined() {
            json!({
                KIND: COORD_KIND,
                "lon": coordinate_to_json(self.x()),
                "lat": coordinate_to_json(self.y()),
            })
        } else {
            Value::Null
        }
    }

    /// Decode a location which was encoded with `to_json`.
    pub fn from_json(value: &Value) -> Result<Self, FromJsonError> {
        match value {
            Value::Null => Ok(Location::undefined()),
            Value::Object(obj) => {
                match obj.get(KIND).and_then(Value::as_str) {
                    Some(COORD_KIND) => (),
                    Some(kind) => {
                        return Err(FromJsonError::new(format!(
                            "Expected '{}' = {} but found {}",
                            KIND, COORD_KIND, kind
                        )))
                    }
                    None => {
                        return Err(FromJsonError::new(format!(
                            "Missing '{}' string",
                            KIND
                        )))
                    }
                }
                let x = coordinate_from_json(obj.get("lon"), "lon")?;
                let y = coordinate_from_json(obj.get("lat"), "lat")?;
                Ok(Location::new(x, y))
            }
            _ => Err(FromJsonError::new(format!(
                "Expected a JSON object or null for a location but found {}",
                value
            ))),
        }
    }
}

impl From<Location> for Value {
    fn from(location: Location) -> Self {
        location.to_json()
    }
}

impl TryFrom<&Value> for Location {
    type Error = FromJsonError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Location::from_json(value)
    }
}

fn coordinate_to_json(value: i32) -> Value {
    serde_json::from_str(&coordinate_to_string(value))
        .expect("canonical coordinate text should be a valid JSON number")
}

fn coordinate_from_json(
    value: Option<&Value>,
    name: &str,
) -> Result<i32, FromJsonError> {
    match value {
        Some(Value::Number(number)) => {
            parse_full_coordinate(&number.to_string()).map_err(|err| {
                FromJsonError::new(format!("Could not parse {}: {}", name, err))
            })
        }
        Some(other) => Err(FromJsonError::new(format!(
            "Expected a JSON number for '{}' but found {}",
            name, other
        ))),
        None => Err(FromJsonError::new(format!("Missing '{}' number", name))),
    }
}

/// Error denoting that a JSON value could not be decoded into a
/// `Location`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FromJsonError {
    msg: String,
}

impl FromJsonError {
    fn new(msg: String) -> Self {
        FromJsonError { msg }
    }
}

impl std::error::Error for FromJsonError {}

impl std::fmt::Display for FromJsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.msg)
    }
}
