//! The format parameter, doubling as the URL's file extension.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::params::InvalidParameterError;

/// Requested output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Jpg,
    Png,
    Gif,
    Jp2,
    Tif,
    Pdf,
    Webp,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Jpg => "jpg",
            Format::Png => "png",
            Format::Gif => "gif",
            Format::Jp2 => "jp2",
            Format::Tif => "tif",
            Format::Pdf => "pdf",
            Format::Webp => "webp",
        }
    }
}

impl FromStr for Format {
    type Err = InvalidParameterError;

    fn from_str(s: &str) -> Result<Self, InvalidParameterError> {
        match s {
            "jpg" => Ok(Format::Jpg),
            "png" => Ok(Format::Png),
            "gif" => Ok(Format::Gif),
            "jp2" => Ok(Format::Jp2),
            "tif" => Ok(Format::Tif),
            "pdf" => Ok(Format::Pdf),
            "webp" => Ok(Format::Webp),
            other => Err(InvalidParameterError::Format(other.to_string())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_member() {
        for s in ["jpg", "png", "gif", "jp2", "tif", "pdf", "webp"] {
            assert_eq!(s.parse::<Format>().unwrap().to_string(), s);
        }
    }

    #[test]
    fn unknown_format_is_rejected_with_the_value() {
        assert_eq!(
            "jpeg".parse::<Format>().unwrap_err(),
            InvalidParameterError::Format("jpeg".to_string())
        );
    }
}
