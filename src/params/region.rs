//! The region parameter: which rectangle of the source image to serve.
//!
//! Canonicalization is where the real rules live. The Image API prescribes
//! one normative spelling per logical region, and two of the forms cannot
//! be normalized without knowing the image's pixel dimensions:
//!
//! - `pct:` regions convert to absolute pixels, **truncated** to integers
//!   (the canonical form uses whole pixels; truncation, not rounding, is
//!   the contract here — see DESIGN.md).
//! - `square` becomes `full` on a square image, otherwise an explicit
//!   centered crop on the long axis.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::dimensions::{DimensionsRequiredError, ImageDimensions};
use crate::params::{InvalidParameterError, ParseError, format_magnitude, parse_magnitude};

/// The requested crop of the source image.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Region {
    /// The complete image, no cropping.
    #[default]
    Full,
    /// The largest centered square the image contains.
    Square,
    /// An explicit rectangle, in pixels or (when `percent`) in percentages
    /// of the image's width and height.
    Area {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        percent: bool,
    },
}

impl Region {
    /// An explicit pixel rectangle. All magnitudes must be finite and
    /// non-negative.
    pub fn area(x: f64, y: f64, width: f64, height: f64) -> Result<Self, InvalidParameterError> {
        Self::checked(x, y, width, height, false)
    }

    /// An explicit rectangle expressed as percentages of the image
    /// dimensions.
    pub fn percent(x: f64, y: f64, width: f64, height: f64) -> Result<Self, InvalidParameterError> {
        Self::checked(x, y, width, height, true)
    }

    fn checked(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        percent: bool,
    ) -> Result<Self, InvalidParameterError> {
        let valid = |v: f64| v.is_finite() && v >= 0.0;
        if !(valid(x) && valid(y) && valid(width) && valid(height)) {
            return Err(InvalidParameterError::Region {
                x,
                y,
                width,
                height,
            });
        }
        Ok(Region::Area {
            x,
            y,
            width,
            height,
            percent,
        })
    }

    /// Whether canonicalizing this region needs the image's pixel
    /// dimensions.
    pub fn needs_dimensions(&self) -> bool {
        matches!(
            self,
            Region::Square | Region::Area { percent: true, .. }
        )
    }

    /// The canonical form of this region against an image of the given
    /// dimensions.
    ///
    /// `full` and explicit pixel rectangles pass through unchanged and
    /// never consult `dimensions`; `square` and `pct:` forms fail with
    /// [`DimensionsRequiredError`] when `dimensions` is `None`.
    pub fn canonicalized(
        &self,
        dimensions: Option<ImageDimensions>,
    ) -> Result<Region, DimensionsRequiredError> {
        match *self {
            Region::Full => Ok(Region::Full),
            Region::Area { percent: false, .. } => Ok(*self),
            Region::Area {
                x,
                y,
                width,
                height,
                percent: true,
            } => {
                let dims = self.require(dimensions)?;
                let img_w = f64::from(dims.width);
                let img_h = f64::from(dims.height);
                Ok(Region::Area {
                    x: (x / 100.0 * img_w).trunc(),
                    y: (y / 100.0 * img_h).trunc(),
                    width: (width / 100.0 * img_w).trunc(),
                    height: (height / 100.0 * img_h).trunc(),
                    percent: false,
                })
            }
            Region::Square => {
                let dims = self.require(dimensions)?;
                if dims.width == dims.height {
                    return Ok(Region::Full);
                }
                let side = dims.width.min(dims.height);
                let offset = (dims.width.max(dims.height) - side) / 2;
                let (x, y) = if dims.width > dims.height {
                    (offset, 0)
                } else {
                    (0, offset)
                };
                Ok(Region::Area {
                    x: f64::from(x),
                    y: f64::from(y),
                    width: f64::from(side),
                    height: f64::from(side),
                    percent: false,
                })
            }
        }
    }

    fn require(
        &self,
        dimensions: Option<ImageDimensions>,
    ) -> Result<ImageDimensions, DimensionsRequiredError> {
        dimensions.ok_or_else(|| DimensionsRequiredError {
            parameter: "region",
            value: self.to_string(),
        })
    }

    /// Structural projection for inspection and testing.
    pub fn parts(&self) -> RegionParts {
        match *self {
            Region::Full => RegionParts {
                full: true,
                ..RegionParts::default()
            },
            Region::Square => RegionParts {
                square: true,
                ..RegionParts::default()
            },
            Region::Area {
                x,
                y,
                width,
                height,
                percent,
            } => RegionParts {
                full: false,
                square: false,
                percent,
                x: Some(x),
                y: Some(y),
                width: Some(width),
                height: Some(height),
            },
        }
    }
}

impl FromStr for Region {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, ParseError> {
        match s {
            "full" => return Ok(Region::Full),
            "square" => return Ok(Region::Square),
            _ => {}
        }
        let err = || ParseError::Region(s.to_string());
        let (body, percent) = match s.strip_prefix("pct:") {
            Some(rest) => (rest, true),
            None => (s, false),
        };
        let tokens: Vec<&str> = body.split(',').collect();
        if tokens.len() != 4 {
            return Err(err());
        }
        Ok(Region::Area {
            x: parse_magnitude(tokens[0]).ok_or_else(err)?,
            y: parse_magnitude(tokens[1]).ok_or_else(err)?,
            width: parse_magnitude(tokens[2]).ok_or_else(err)?,
            height: parse_magnitude(tokens[3]).ok_or_else(err)?,
            percent,
        })
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Region::Full => f.write_str("full"),
            Region::Square => f.write_str("square"),
            Region::Area {
                x,
                y,
                width,
                height,
                percent,
            } => {
                if percent {
                    f.write_str("pct:")?;
                }
                write!(
                    f,
                    "{},{},{},{}",
                    format_magnitude(x),
                    format_magnitude(y),
                    format_magnitude(width),
                    format_magnitude(height)
                )
            }
        }
    }
}

/// Flat view of a [`Region`] with every field made explicit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct RegionParts {
    pub full: bool,
    pub square: bool,
    pub percent: bool,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}
