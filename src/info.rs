//! The `info.json` document: an image's dimensions and capabilities.
//!
//! Only `width` and `height` matter to canonicalization, but servers send
//! much more — profiles, tile descriptions, rights statements, arbitrary
//! extensions. Rather than modeling every published field (or silently
//! dropping them), the known handful get typed fields and everything else
//! lands in an explicit [`extra`](ImageInfo::extra) map. Both the
//! `@`-prefixed Image API 2 spellings and the bare Image API 3 ones are
//! accepted for `id`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dimensions::ImageDimensions;
use crate::fetch::{self, FetchError};

/// A parsed `info.json` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageInfo {
    #[serde(rename = "@context", default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,
    #[serde(
        rename = "@id",
        alias = "id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Value>,
    /// Every field the document carried that has no typed counterpart.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ImageInfo {
    /// Load an `info.json` document from a URL or a file path.
    pub fn load(source: &str) -> Result<Self, FetchError> {
        let value = fetch::load_json_source(source)?;
        serde_json::from_value(value).map_err(|err| FetchError::Json {
            origin: source.to_string(),
            source: err,
        })
    }

    /// The document's pixel dimensions.
    pub fn dimensions(&self) -> ImageDimensions {
        ImageDimensions::new(self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn parse(json: &str) -> ImageInfo {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn v2_document_with_at_spellings() {
        let info = parse(
            r#"{"@context": "http://iiif.io/api/image/2/context.json",
                "@id": "http://imgserver.co/img1",
                "protocol": "http://iiif.io/api/image",
                "width": 2113, "height": 3039,
                "profile": ["http://iiif.io/api/image/2/level2.json"]}"#,
        );
        assert_eq!(info.id.as_deref(), Some("http://imgserver.co/img1"));
        assert_eq!(info.dimensions(), ImageDimensions::new(2113, 3039));
        assert!(info.extra.is_empty());
    }

    #[test]
    fn v3_document_with_bare_id() {
        let info = parse(
            r#"{"@context": "http://iiif.io/api/image/3/context.json",
                "id": "https://imgserver.co/img1",
                "type": "ImageService3",
                "width": 6000, "height": 4000}"#,
        );
        assert_eq!(info.id.as_deref(), Some("https://imgserver.co/img1"));
        // "type" has no typed field and lands in extra
        assert_eq!(info.extra["type"], "ImageService3");
    }

    #[test]
    fn unrecognized_fields_are_kept_in_extra() {
        let info = parse(
            r#"{"width": 100, "height": 200,
                "sizes": [{"width": 50, "height": 100}],
                "tiles": [{"width": 512, "scaleFactors": [1, 2, 4]}]}"#,
        );
        assert_eq!(info.extra.len(), 2);
        assert!(info.extra.contains_key("sizes"));
        assert!(info.extra.contains_key("tiles"));
    }

    #[test]
    fn missing_dimensions_fail_deserialization() {
        let result: Result<ImageInfo, _> =
            serde_json::from_str(r#"{"@id": "http://imgserver.co/img1", "width": 100}"#);
        assert!(result.is_err());
    }

    #[test]
    fn load_reads_a_file_source() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("info.json");
        fs::write(&path, r#"{"width": 100, "height": 150, "custom": true}"#).unwrap();

        let info = ImageInfo::load(path.to_str().unwrap()).unwrap();
        assert_eq!(info.dimensions(), ImageDimensions::new(100, 150));
        assert_eq!(info.extra["custom"], true);
    }

    #[test]
    fn load_reports_schema_mismatch_with_the_source() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("info.json");
        fs::write(&path, r#"{"width": "wide", "height": 100}"#).unwrap();

        let err = ImageInfo::load(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, FetchError::Json { .. }));
    }
}
