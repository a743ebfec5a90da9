use thiserror::Error;

/// Encapsulates all errors that can occur in this crate.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// Text could not be parsed as a coordinate.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// A location was outside of the valid longitude and latitude bounds.
    #[error(transparent)]
    InvalidLocation(#[from] InvalidLocation),
    /// The sink a location was being written to returned an error.
    #[error("Could not write location: {0}")]
    Write(#[from] std::fmt::Error),
}

/// An error indicating that a coordinate could not be parsed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FormatError {
    kind: FormatErrorKind,
    text: String,
}

impl FormatError {
    /// Return the `FormatErrorKind` for this error.
    pub fn kind(&self) -> FormatErrorKind {
        self.kind
    }

    /// Return the text which caused this error.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub(crate) fn malformed(text: &str) -> Self {
        log::trace!("wrong format for coordinate: '{}'", text);
        Self {
            kind: FormatErrorKind::Malformed,
            text: text.to_owned(),
        }
    }

    pub(crate) fn trailing_characters(rest: &str) -> Self {
        log::trace!("characters after coordinate: '{}'", rest);
        Self {
            kind: FormatErrorKind::TrailingCharacters,
            text: rest.to_owned(),
        }
    }
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind() {
            FormatErrorKind::Malformed => {
                write!(f, "wrong format for coordinate: '{}'", self.text)
            }
            FormatErrorKind::TrailingCharacters => {
                write!(f, "characters after coordinate: '{}'", self.text)
            }
        }
    }
}

impl std::error::Error for FormatError {}

/// Describes the ways in which coordinate text can be malformed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FormatErrorKind {
    /// The text does not start with a number in the accepted format, or
    /// the number does not fit into a scaled coordinate. The error text is
    /// everything from the start of the attempted parse.
    Malformed,
    /// A number was parsed, but the field contained more text after it.
    /// The error text is the leftover text.
    TrailingCharacters,
}

/// An error indicating that a location is outside of the -180 to 180 and
/// -90 to 90 degree range (this includes undefined locations).
#[derive(Clone, Copy, Debug, Default, Eq, Error, PartialEq)]
#[error("invalid location")]
pub struct InvalidLocation;
