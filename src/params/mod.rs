//! The four IIIF Image API request parameters.
//!
//! | Parameter | Type | Grammar |
//! |---|---|---|
//! | **Region** | [`Region`] | `full`, `square`, `x,y,w,h`, `pct:x,y,w,h` |
//! | **Size** | [`Size`] | `full`, `max`, `pct:n`, `w,`, `,h`, `w,h`, `!w,h` |
//! | **Rotation** | [`Rotation`] | `n`, `!n` (degrees in 0–360) |
//! | **Quality / Format** | [`Quality`], [`Format`] | closed string sets |
//!
//! Every type is an immutable value object: parsing (`FromStr`) and
//! rendering (`Display`) round-trip, and canonicalization returns a new
//! value rather than mutating in place. Region and size canonicalization
//! may need the source image's pixel dimensions; they take an
//! `Option<ImageDimensions>` and fail with
//! [`DimensionsRequiredError`](crate::dimensions::DimensionsRequiredError)
//! when a dimension-dependent form is canonicalized without one.

use thiserror::Error;

pub mod format;
pub mod quality;
pub mod region;
pub mod rotation;
pub mod size;

pub use format::Format;
pub use quality::Quality;
pub use region::{Region, RegionParts};
pub use rotation::{Rotation, RotationParts};
pub use size::{Size, SizeParts};

/// A string that does not match the grammar it was parsed against.
///
/// Always carries the offending raw input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed region {0:?}")]
    Region(String),
    #[error("malformed size {0:?}")]
    Size(String),
    #[error("malformed rotation {0:?}")]
    Rotation(String),
    #[error("malformed IIIF image URL {0:?}")]
    Url(String),
}

/// A structurally well-formed but semantically invalid parameter.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidParameterError {
    #[error("unknown quality {0:?} (allowed: default, color, gray, bitonal)")]
    Quality(String),
    #[error("unknown format {0:?} (allowed: jpg, png, gif, jp2, tif, pdf, webp)")]
    Format(String),
    #[error("region values must be finite and non-negative: {x},{y},{width},{height}")]
    Region {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    #[error("size requires at least one of width or height")]
    EmptySize,
    #[error("size percentage must be finite and greater than zero: {0}")]
    Percentage(f64),
    #[error("rotation must be between 0 and 360 degrees: {0}")]
    Rotation(f64),
}

/// Render a magnitude the way the IIIF canonical form spells numbers:
/// integral values without a fractional part (`93.0` → `"93"`), everything
/// else with a leading digit before the decimal point (`0.05`, never `.05`).
pub(crate) fn format_magnitude(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Parse one numeric token of a parameter string. The grammars only admit
/// plain non-negative decimal numbers, so exponents, signs, and the bare
/// `nan`/`inf` spellings `f64::from_str` would otherwise accept are out.
pub(crate) fn parse_magnitude(token: &str) -> Option<f64> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return None;
    }
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_magnitude_trims_integral_values() {
        assert_eq!(format_magnitude(93.0), "93");
        assert_eq!(format_magnitude(0.0), "0");
        assert_eq!(format_magnitude(256.0), "256");
    }

    #[test]
    fn format_magnitude_keeps_fractional_values() {
        assert_eq!(format_magnitude(50.5), "50.5");
        assert_eq!(format_magnitude(100.76), "100.76");
    }

    #[test]
    fn format_magnitude_keeps_leading_zero() {
        assert_eq!(format_magnitude(0.05), "0.05");
    }

    #[test]
    fn parse_magnitude_accepts_plain_decimals() {
        assert_eq!(parse_magnitude("5"), Some(5.0));
        assert_eq!(parse_magnitude("75.3"), Some(75.3));
        assert_eq!(parse_magnitude("0.05"), Some(0.05));
    }

    #[test]
    fn parse_magnitude_rejects_non_grammar_spellings() {
        assert_eq!(parse_magnitude(""), None);
        assert_eq!(parse_magnitude("-5"), None);
        assert_eq!(parse_magnitude("1e3"), None);
        assert_eq!(parse_magnitude("inf"), None);
        assert_eq!(parse_magnitude("two"), None);
        assert_eq!(parse_magnitude("1.2.3"), None);
    }
}
