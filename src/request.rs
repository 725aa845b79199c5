//! A complete IIIF Image API request and its URL forms.
//!
//! [`ImageRequest`] composes one of each parameter with the endpoint and
//! image identifier. It is immutable: the `with_*` builders return a
//! derived request and never touch the receiver, so a request can be
//! shared and specialized freely:
//!
//! ```
//! use iiif_url::{Format, ImageRequest, Size};
//!
//! let base = ImageRequest::new("http://imgserver.co", "img1");
//! let thumb = base.with_size(Size::width(300)).with_format(Format::Png);
//! assert_eq!(thumb.to_string(), "http://imgserver.co/img1/full/300,/0/default.png");
//! // the base request is unchanged
//! assert_eq!(base.to_string(), "http://imgserver.co/img1/full/full/0/default.jpg");
//! ```
//!
//! The endpoint and identifier are opaque path segments: nothing between
//! them is interpreted, which is what lets one endpoint string carry a
//! multi-segment API base like `http://imgserver.co/loris`.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use url::{Position, Url};

use crate::dimensions::{DimensionsRequiredError, ImageDimensionsProvider};
use crate::fetch::FetchError;
use crate::params::{
    Format, ParseError, Quality, Region, RegionParts, Rotation, RotationParts, Size, SizeParts,
};

/// One IIIF Image API request: where, which image, and the five
/// parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRequest {
    endpoint: String,
    identifier: String,
    region: Region,
    size: Size,
    rotation: Rotation,
    quality: Quality,
    format: Format,
}

/// [`ImageRequest::canonicalize`] failure: either a dimension-dependent
/// form had no dimensions source, or the provider's fetch failed.
#[derive(Error, Debug)]
pub enum CanonicalizeError {
    #[error(transparent)]
    DimensionsRequired(#[from] DimensionsRequiredError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl ImageRequest {
    /// A request for the unmodified image: `full/full/0/default.jpg`.
    ///
    /// A trailing slash on the endpoint is dropped so rendering never
    /// doubles the separator.
    pub fn new(endpoint: impl Into<String>, identifier: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            identifier: identifier.into(),
            region: Region::default(),
            size: Size::default(),
            rotation: Rotation::default(),
            quality: Quality::default(),
            format: Format::default(),
        }
    }

    /// Parse a request from one of the two URL shapes:
    /// `{endpoint}/{identifier}/info.json` or
    /// `{endpoint}/{identifier}/{region}/{size}/{rotation}/{quality}.{format}`.
    ///
    /// The identifier is the segment immediately before `info.json` or the
    /// four-parameter suffix; every leading segment belongs to the
    /// endpoint. A missing scheme or host, a wrong segment count, and any
    /// parameter that fails its own grammar all produce a [`ParseError`]
    /// carrying the full URL.
    pub fn from_url(url: &str) -> Result<Self, ParseError> {
        let err = || ParseError::Url(url.to_string());
        let parsed = Url::parse(url).map_err(|_| err())?;
        if parsed.host_str().is_none() {
            return Err(err());
        }
        let segments: Vec<&str> = match parsed.path_segments() {
            Some(split) => split.collect(),
            None => return Err(err()),
        };
        let base = &parsed[..Position::BeforePath];

        if segments.last() == Some(&"info.json") {
            let [leading @ .., identifier, _] = &segments[..] else {
                return Err(err());
            };
            if identifier.is_empty() {
                return Err(err());
            }
            return Ok(Self::new(join_endpoint(base, leading), *identifier));
        }

        let [leading @ .., identifier, region, size, rotation, quality_format] = &segments[..]
        else {
            return Err(err());
        };
        if identifier.is_empty() {
            return Err(err());
        }
        let (quality, format) = quality_format.rsplit_once('.').ok_or_else(err)?;

        let mut request = Self::new(join_endpoint(base, leading), *identifier);
        request.region = region.parse().map_err(|_| err())?;
        request.size = size.parse().map_err(|_| err())?;
        request.rotation = rotation.parse().map_err(|_| err())?;
        request.quality = quality.parse().map_err(|_| err())?;
        request.format = format.parse().map_err(|_| err())?;
        Ok(request)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn format(&self) -> Format {
        self.format
    }

    /// The metadata URL: `{endpoint}/{identifier}/info.json`.
    pub fn info_url(&self) -> String {
        format!("{}/{}/info.json", self.endpoint, self.identifier)
    }

    /// A derived request with a different region.
    pub fn with_region(&self, region: Region) -> Self {
        Self {
            region,
            ..self.clone()
        }
    }

    /// A derived request with a different size.
    pub fn with_size(&self, size: Size) -> Self {
        Self {
            size,
            ..self.clone()
        }
    }

    /// A derived request with a different rotation.
    pub fn with_rotation(&self, rotation: Rotation) -> Self {
        Self {
            rotation,
            ..self.clone()
        }
    }

    /// A derived request with a different quality.
    pub fn with_quality(&self, quality: Quality) -> Self {
        Self {
            quality,
            ..self.clone()
        }
    }

    /// A derived request with a different format.
    pub fn with_format(&self, format: Format) -> Self {
        Self {
            format,
            ..self.clone()
        }
    }

    /// The canonical form of this request.
    ///
    /// Dimensions are obtained through `provider` at most once per call,
    /// and only when the region or size actually depends on them — a
    /// request that is already dimension-free never fetches. Pass a known
    /// [`ImageDimensions`](crate::dimensions::ImageDimensions) value as
    /// the provider to skip I/O entirely.
    pub fn canonicalize<P>(&self, provider: &P) -> Result<Self, CanonicalizeError>
    where
        P: ImageDimensionsProvider + ?Sized,
    {
        let dimensions = if self.region.needs_dimensions() || self.size.needs_dimensions() {
            Some(provider.fetch(&self.info_url())?)
        } else {
            None
        };
        Ok(Self {
            region: self.region.canonicalized(dimensions)?,
            size: self.size.canonicalized(dimensions)?,
            rotation: self.rotation.canonicalized(),
            ..self.clone()
        })
    }

    /// Structural projection of the five parameters, for inspection and
    /// testing. Pure; no side effects.
    pub fn as_parts(&self) -> RequestParts {
        RequestParts {
            region: self.region.parts(),
            size: self.size.parts(),
            rotation: self.rotation.parts(),
            quality: self.quality,
            format: self.format,
        }
    }
}

impl fmt::Display for ImageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}/{}/{}.{}",
            self.endpoint,
            self.identifier,
            self.region,
            self.size,
            self.rotation,
            self.quality,
            self.format
        )
    }
}

fn join_endpoint(base: &str, segments: &[&str]) -> String {
    let mut endpoint = base.to_string();
    for segment in segments {
        endpoint.push('/');
        endpoint.push_str(segment);
    }
    endpoint
}

/// Flat view of a request's five parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RequestParts {
    pub region: RegionParts,
    pub size: SizeParts,
    pub rotation: RotationParts,
    pub quality: Quality,
    pub format: Format,
}
