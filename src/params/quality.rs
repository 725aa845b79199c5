//! The quality parameter: a closed set of tonal renderings.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::params::InvalidParameterError;

/// Requested image quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    /// Whatever the server considers the image's native rendering.
    #[default]
    Default,
    Color,
    Gray,
    Bitonal,
}

impl Quality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Default => "default",
            Quality::Color => "color",
            Quality::Gray => "gray",
            Quality::Bitonal => "bitonal",
        }
    }
}

impl FromStr for Quality {
    type Err = InvalidParameterError;

    fn from_str(s: &str) -> Result<Self, InvalidParameterError> {
        match s {
            "default" => Ok(Quality::Default),
            "color" => Ok(Quality::Color),
            "gray" => Ok(Quality::Gray),
            "bitonal" => Ok(Quality::Bitonal),
            other => Err(InvalidParameterError::Quality(other.to_string())),
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
