//! # iiif-url
//!
//! Build, parse, and canonicalize [IIIF Image API](https://iiif.io/api/image/)
//! request URLs.
//!
//! A IIIF image URL packs five parameters between the image identifier and
//! the file extension:
//!
//! ```text
//! {endpoint}/{identifier}/{region}/{size}/{rotation}/{quality}.{format}
//! http://imgserver.co/img1/2560,2560,256,256/256,/!90/default.jpg
//! ```
//!
//! This crate models that grammar as typed, immutable values: parse a URL
//! (or a single parameter string) into a structure, derive variants
//! without mutating anything, render back to a URL, and — when you need
//! the one normative spelling the Image API prescribes — canonicalize,
//! fetching the image's pixel dimensions on demand from its `info.json`.
//!
//! ```no_run
//! use iiif_url::{ImageRequest, InfoJsonProvider, Size};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let req = ImageRequest::from_url("http://imgserver.co/img1/square/pct:25/0/default.jpg")?;
//! let thumb = req.with_size(Size::width(300));
//!
//! // "square" and "pct:" need the image's real dimensions; the provider
//! // fetches info.json once and the result is a fully explicit URL.
//! let canonical = req.canonicalize(&InfoJsonProvider)?;
//! println!("{canonical}");
//! # Ok(())
//! # }
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`params`] | The four parameter grammars — region, size, rotation, quality/format — each with `FromStr`/`Display` and canonicalization |
//! | [`request`] | [`ImageRequest`] — composition, URL parsing/rendering, builders, canonicalization |
//! | [`dimensions`] | [`ImageDimensions`] and the [`ImageDimensionsProvider`] seam canonicalization fetches through |
//! | [`info`] | The `info.json` document model, unknown fields preserved in an `extra` map |
//! | [`fetch`] | Synchronous JSON retrieval over HTTP (ureq) or from a file |
//!
//! # Design Decisions
//!
//! ## Immutable values, builder derivation
//!
//! Every type here is a value: `with_size` and friends return a new
//! request and leave the receiver alone. That makes sharing a base
//! request across threads safe by construction — there is no interior
//! mutability anywhere in the crate — and keeps "the URL I parsed" and
//! "the URL I derived" from aliasing each other.
//!
//! ## Canonicalization is explicit, and so is its I/O
//!
//! Only [`ImageRequest::canonicalize`] ever touches the network, only
//! when a parameter actually needs dimensions, and at most once per call.
//! The dimensions source is a trait, so tests (and callers that already
//! know the image size) substitute a plain [`ImageDimensions`] value and
//! no I/O happens at all.
//!
//! ## Typed errors, no logging
//!
//! Parsing, validation, and canonicalization fail fast with a typed error
//! carrying the offending input. The crate never logs and never swallows
//! a failure; error values are the whole diagnostic story.

pub mod dimensions;
pub mod fetch;
pub mod info;
pub mod params;
pub mod request;

pub use dimensions::{
    DimensionsRequiredError, ImageDimensions, ImageDimensionsProvider, InfoJsonProvider,
};
pub use fetch::FetchError;
pub use info::ImageInfo;
pub use params::{
    Format, InvalidParameterError, ParseError, Quality, Region, RegionParts, Rotation,
    RotationParts, Size, SizeParts,
};
pub use request::{CanonicalizeError, ImageRequest, RequestParts};
