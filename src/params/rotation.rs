//! The rotation parameter: degrees clockwise, with optional mirroring.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::params::{InvalidParameterError, ParseError, format_magnitude, parse_magnitude};

/// Rotation in degrees (0–360) plus a mirror-before-rotate flag.
///
/// The angle is stored exactly as given — `360` is not folded onto `0` —
/// but rendering trims a trailing `.0` so `93.0` prints as `93`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    pub degrees: f64,
    pub mirrored: bool,
}

impl Rotation {
    /// A rotation of `degrees` in `[0, 360]`.
    pub fn new(degrees: f64, mirrored: bool) -> Result<Self, InvalidParameterError> {
        if !degrees.is_finite() || !(0.0..=360.0).contains(&degrees) {
            return Err(InvalidParameterError::Rotation(degrees));
        }
        Ok(Self { degrees, mirrored })
    }

    /// Rotation has no dimension-dependent canonical form; this is the
    /// identity, present for symmetry with region and size.
    pub fn canonicalized(&self) -> Rotation {
        *self
    }

    /// Structural projection for inspection and testing.
    pub fn parts(&self) -> RotationParts {
        RotationParts {
            degrees: self.degrees,
            mirrored: self.mirrored,
        }
    }
}

impl FromStr for Rotation {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, ParseError> {
        let err = || ParseError::Rotation(s.to_string());
        let (body, mirrored) = match s.strip_prefix('!') {
            Some(rest) => (rest, true),
            None => (s, false),
        };
        let degrees = parse_magnitude(body)
            .filter(|d| (0.0..=360.0).contains(d))
            .ok_or_else(err)?;
        Ok(Rotation { degrees, mirrored })
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mirrored {
            f.write_str("!")?;
        }
        f.write_str(&format_magnitude(self.degrees))
    }
}

/// Flat view of a [`Rotation`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RotationParts {
    pub degrees: f64,
    pub mirrored: bool,
}
