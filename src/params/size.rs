//! The size parameter: how to scale the cropped region.
//!
//! The canonical form resolves every indirect spelling into a concrete
//! width/height pair: percentages and one-sided sizes compute the missing
//! numbers from the image dimensions (rounded, unlike region
//! canonicalization which truncates), and a `!w,h` best-fit box collapses
//! to the plain pair that fits inside it. `full` and `max` are already
//! canonical.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::dimensions::{DimensionsRequiredError, ImageDimensions};
use crate::params::{InvalidParameterError, ParseError, format_magnitude, parse_magnitude};

/// The requested output scaling.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Size {
    /// The region at its native size.
    #[default]
    Full,
    /// The largest size the server supports for the region.
    Max,
    /// Scaled to a percentage of the region's native size.
    Percent(f64),
    /// Scaled to explicit dimensions. A missing side preserves the aspect
    /// ratio; `exact` requests a best fit *inside* `width`×`height` and is
    /// only meaningful when both sides are present.
    Scaled {
        width: Option<u32>,
        height: Option<u32>,
        exact: bool,
    },
}

impl Size {
    /// Scale to a width, preserving aspect ratio.
    pub fn width(width: u32) -> Self {
        Size::Scaled {
            width: Some(width),
            height: None,
            exact: false,
        }
    }

    /// Scale to a height, preserving aspect ratio.
    pub fn height(height: u32) -> Self {
        Size::Scaled {
            width: None,
            height: Some(height),
            exact: false,
        }
    }

    /// Scale to a percentage of the native size.
    pub fn percent(value: f64) -> Result<Self, InvalidParameterError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(InvalidParameterError::Percentage(value));
        }
        Ok(Size::Percent(value))
    }

    /// Scale to explicit dimensions; at least one side must be present.
    pub fn scaled(
        width: Option<u32>,
        height: Option<u32>,
        exact: bool,
    ) -> Result<Self, InvalidParameterError> {
        if width.is_none() && height.is_none() {
            return Err(InvalidParameterError::EmptySize);
        }
        Ok(Size::Scaled {
            width,
            height,
            exact,
        })
    }

    /// Whether canonicalizing this size needs the image's pixel dimensions.
    pub fn needs_dimensions(&self) -> bool {
        match *self {
            Size::Full | Size::Max => false,
            Size::Percent(_) => true,
            Size::Scaled {
                width,
                height,
                exact,
            } => exact || width.is_none() || height.is_none(),
        }
    }

    /// The canonical form of this size against an image of the given
    /// dimensions.
    pub fn canonicalized(
        &self,
        dimensions: Option<ImageDimensions>,
    ) -> Result<Size, DimensionsRequiredError> {
        match *self {
            Size::Full => Ok(Size::Full),
            Size::Max => Ok(Size::Max),
            Size::Scaled {
                width: Some(_),
                height: Some(_),
                exact: false,
            } => Ok(*self),
            Size::Percent(pct) => {
                let dims = self.require(dimensions)?;
                Ok(Size::Scaled {
                    width: Some(scale(dims.width, pct / 100.0)),
                    height: Some(scale(dims.height, pct / 100.0)),
                    exact: false,
                })
            }
            Size::Scaled {
                width: Some(w),
                height: Some(h),
                exact: true,
            } => {
                // Best fit inside the box: one factor for both axes, so the
                // result keeps the image's aspect ratio and never exceeds
                // either bound. Exactness is resolved away once concrete.
                let dims = self.require(dimensions)?;
                let factor = (f64::from(w) / f64::from(dims.width))
                    .min(f64::from(h) / f64::from(dims.height));
                Ok(Size::Scaled {
                    width: Some(scale(dims.width, factor)),
                    height: Some(scale(dims.height, factor)),
                    exact: false,
                })
            }
            Size::Scaled {
                width: Some(w),
                height: None,
                ..
            } => {
                let dims = self.require(dimensions)?;
                let h = f64::from(w) * f64::from(dims.height) / f64::from(dims.width);
                Ok(Size::Scaled {
                    width: Some(w),
                    height: Some(h.round() as u32),
                    exact: false,
                })
            }
            Size::Scaled {
                width: None,
                height: Some(h),
                ..
            } => {
                let dims = self.require(dimensions)?;
                let w = f64::from(h) * f64::from(dims.width) / f64::from(dims.height);
                Ok(Size::Scaled {
                    width: Some(w.round() as u32),
                    height: Some(h),
                    exact: false,
                })
            }
            // A hand-assembled empty pair can only stand for the full size.
            Size::Scaled {
                width: None,
                height: None,
                ..
            } => Ok(Size::Full),
        }
    }

    fn require(
        &self,
        dimensions: Option<ImageDimensions>,
    ) -> Result<ImageDimensions, DimensionsRequiredError> {
        dimensions.ok_or_else(|| DimensionsRequiredError {
            parameter: "size",
            value: self.to_string(),
        })
    }

    /// Structural projection for inspection and testing.
    pub fn parts(&self) -> SizeParts {
        match *self {
            Size::Full => SizeParts {
                full: true,
                ..SizeParts::default()
            },
            Size::Max => SizeParts {
                max: true,
                ..SizeParts::default()
            },
            Size::Percent(value) => SizeParts {
                percent: Some(value),
                ..SizeParts::default()
            },
            Size::Scaled {
                width,
                height,
                exact,
            } => SizeParts {
                width,
                height,
                exact,
                ..SizeParts::default()
            },
        }
    }
}

fn scale(dim: u32, factor: f64) -> u32 {
    (f64::from(dim) * factor).round() as u32
}

impl FromStr for Size {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, ParseError> {
        match s {
            "full" => return Ok(Size::Full),
            "max" => return Ok(Size::Max),
            _ => {}
        }
        let err = || ParseError::Size(s.to_string());
        let (body, exact) = match s.strip_prefix('!') {
            Some(rest) => (rest, true),
            None => (s, false),
        };
        if let Some(pct) = body.strip_prefix("pct:") {
            // the "!" prefix only applies to width/height forms
            if exact {
                return Err(err());
            }
            let value = parse_magnitude(pct).filter(|v| *v > 0.0).ok_or_else(err)?;
            return Ok(Size::Percent(value));
        }
        let (w, h) = body.split_once(',').ok_or_else(err)?;
        let width = match w {
            "" => None,
            _ => Some(w.parse::<u32>().map_err(|_| err())?),
        };
        let height = match h {
            "" => None,
            _ => Some(h.parse::<u32>().map_err(|_| err())?),
        };
        if width.is_none() && height.is_none() {
            return Err(err());
        }
        Ok(Size::Scaled {
            width,
            height,
            exact,
        })
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Size::Full => f.write_str("full"),
            Size::Max => f.write_str("max"),
            Size::Percent(value) => write!(f, "pct:{}", format_magnitude(value)),
            Size::Scaled {
                width,
                height,
                exact,
            } => {
                if exact {
                    f.write_str("!")?;
                }
                if let Some(w) = width {
                    write!(f, "{w}")?;
                }
                f.write_str(",")?;
                if let Some(h) = height {
                    write!(f, "{h}")?;
                }
                Ok(())
            }
        }
    }
}

/// Flat view of a [`Size`] with every field made explicit.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SizeParts {
    pub full: bool,
    pub max: bool,
    pub exact: bool,
    pub percent: Option<f64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims(width: u32, height: u32) -> Option<ImageDimensions> {
        Some(ImageDimensions::new(width, height))
    }

    #[test]
    fn parse_keywords() {
        assert_eq!("full".parse::<Size>().unwrap(), Size::Full);
        assert_eq!("max".parse::<Size>().unwrap(), Size::Max);
    }

    #[test]
    fn parse_renders_back_unchanged() {
        for s in [
            "full", "max", "pct:50", "pct:12.5", "100,", ",105", "100,105", "!256,256", "!100,",
            ",50",
        ] {
            assert_eq!(s.parse::<Size>().unwrap().to_string(), s);
        }
    }

    #[test]
    fn parse_exact_sets_flag() {
        let size = "!256,256".parse::<Size>().unwrap();
        assert!(size.parts().exact);
    }

    #[test]
    fn parse_rejects_malformed_strings() {
        for s in ["pct:", "one,two", "a,", ",", "100", "!pct:50", "50.5,", "1,2,3", "-100,"] {
            assert_eq!(
                s.parse::<Size>().unwrap_err(),
                ParseError::Size(s.to_string())
            );
        }
    }

    #[test]
    fn constructors_validate() {
        assert!(Size::percent(0.0).is_err());
        assert!(Size::percent(f64::NAN).is_err());
        assert!(matches!(
            Size::scaled(None, None, false),
            Err(InvalidParameterError::EmptySize)
        ));
        assert_eq!(Size::width(100).to_string(), "100,");
        assert_eq!(Size::height(105).to_string(), ",105");
    }

    #[test]
    fn canonical_full_and_max_are_trivial() {
        assert_eq!(Size::Full.canonicalized(None).unwrap(), Size::Full);
        assert_eq!(Size::Max.canonicalized(None).unwrap(), Size::Max);
    }

    #[test]
    fn canonical_plain_pair_is_unchanged() {
        let size = "100,105".parse::<Size>().unwrap();
        assert_eq!(size.canonicalized(None).unwrap(), size);
    }

    #[test]
    fn canonical_percent_rounds_both_axes() {
        let size = "pct:25".parse::<Size>().unwrap();
        let canonical = size.canonicalized(dims(100, 100)).unwrap();
        assert_eq!(canonical.to_string(), "25,25");

        // 33% of 150 = 49.5, rounds up
        let size = "pct:33".parse::<Size>().unwrap();
        let canonical = size.canonicalized(dims(100, 150)).unwrap();
        assert_eq!(canonical.to_string(), "33,50");
    }

    #[test]
    fn canonical_one_sided_completes_the_pair() {
        let size = ",50".parse::<Size>().unwrap();
        let canonical = size.canonicalized(dims(100, 100)).unwrap();
        assert_eq!(canonical.to_string(), "50,50");

        // 80 wide against a 200x300 image: height = 80 * 300/200 = 120
        let size = "80,".parse::<Size>().unwrap();
        let canonical = size.canonicalized(dims(200, 300)).unwrap();
        assert_eq!(canonical.to_string(), "80,120");
    }

    #[test]
    fn canonical_exact_fits_inside_the_box() {
        let size = "!50,50".parse::<Size>().unwrap();
        let canonical = size.canonicalized(dims(50, 100)).unwrap();
        assert_eq!(canonical.to_string(), "25,50");

        let canonical = size.canonicalized(dims(100, 100)).unwrap();
        assert_eq!(canonical.to_string(), "50,50");
    }

    #[test]
    fn canonical_exact_resolves_exactness_away() {
        let size = "!50,50".parse::<Size>().unwrap();
        let canonical = size.canonicalized(dims(50, 100)).unwrap();
        assert!(!canonical.parts().exact);
    }

    #[test]
    fn canonical_exact_upscales_when_the_box_is_larger() {
        // No clamp at original dimensions; see DESIGN.md
        let size = "!200,200".parse::<Size>().unwrap();
        let canonical = size.canonicalized(dims(50, 100)).unwrap();
        assert_eq!(canonical.to_string(), "100,200");
    }

    #[test]
    fn canonicalize_without_dimensions_fails_for_dependent_forms() {
        let size = ",5".parse::<Size>().unwrap();
        let err = size.canonicalized(None).unwrap_err();
        assert_eq!(err.parameter, "size");
        assert_eq!(err.value, ",5");

        assert!("pct:25".parse::<Size>().unwrap().canonicalized(None).is_err());
        assert!("!50,50".parse::<Size>().unwrap().canonicalized(None).is_err());
    }

    #[test]
    fn canonicalization_is_idempotent() {
        let d = dims(100, 150);
        for s in ["full", "max", "pct:25", "50,", ",50", "!50,50", "100,105"] {
            let once = s.parse::<Size>().unwrap().canonicalized(d).unwrap();
            assert_eq!(once.canonicalized(d).unwrap(), once);
        }
    }

    #[test]
    fn parts_projection() {
        let parts = "256,".parse::<Size>().unwrap().parts();
        assert!(!parts.full);
        assert!(!parts.max);
        assert!(!parts.exact);
        assert_eq!(parts.percent, None);
        assert_eq!(parts.width, Some(256));
        assert_eq!(parts.height, None);
    }
}
