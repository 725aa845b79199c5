//! Image pixel dimensions and the capability to obtain them.
//!
//! Canonicalizing a `square` region or a `pct:` size needs the source
//! image's width and height, which live in the image's `info.json` — not
//! in the request. [`ImageDimensionsProvider`] is the seam: the request
//! layer asks it for dimensions and never cares whether they came from a
//! network GET, a file, or a value the caller already had. Implementing
//! the trait for [`ImageDimensions`] itself covers that last case — a
//! known pair of numbers is a provider that never fetches.

use thiserror::Error;

use crate::fetch::FetchError;
use crate::info::ImageInfo;

/// A source image's pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Canonicalization was attempted on a dimension-dependent form without a
/// dimensions source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("image dimensions are required to canonicalize the {parameter} {value:?}")]
pub struct DimensionsRequiredError {
    /// Which parameter needed dimensions (`"region"` or `"size"`).
    pub parameter: &'static str,
    /// The rendered form that could not be canonicalized.
    pub value: String,
}

/// The capability to resolve an image's pixel dimensions.
///
/// `info_url` is the request's `info.json` URL; implementations may use
/// it, or ignore it when they already know the answer.
pub trait ImageDimensionsProvider {
    fn fetch(&self, info_url: &str) -> Result<ImageDimensions, FetchError>;
}

/// The expected realization: load the `info.json` document from the given
/// URL (or file path) and read its `width`/`height`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InfoJsonProvider;

impl ImageDimensionsProvider for InfoJsonProvider {
    fn fetch(&self, info_url: &str) -> Result<ImageDimensions, FetchError> {
        Ok(ImageInfo::load(info_url)?.dimensions())
    }
}

/// A known dimensions value is a provider that skips the fetch entirely.
impl ImageDimensionsProvider for ImageDimensions {
    fn fetch(&self, _info_url: &str) -> Result<ImageDimensions, FetchError> {
        Ok(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn known_dimensions_are_their_own_provider() {
        let dims = ImageDimensions::new(2113, 3039);
        assert_eq!(dims.fetch("ignored").unwrap(), dims);
    }

    #[test]
    fn info_json_provider_reads_width_and_height() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("info.json");
        fs::write(
            &path,
            r#"{"@context": "http://iiif.io/api/image/2/context.json",
                "@id": "http://imgserver.co/img1",
                "width": 2113, "height": 3039}"#,
        )
        .unwrap();

        let dims = InfoJsonProvider.fetch(path.to_str().unwrap()).unwrap();
        assert_eq!(dims, ImageDimensions::new(2113, 3039));
    }

    #[test]
    fn dimensions_required_error_names_the_parameter() {
        let err = DimensionsRequiredError {
            parameter: "region",
            value: "square".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("region"));
        assert!(message.contains("square"));
    }
}
