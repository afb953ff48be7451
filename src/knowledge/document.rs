//! Document model for the knowledge corpus
//!
//! A document is one unit of knowledge: a text blob plus structured
//! metadata. Coordinates are stored as a `"<lng>,<lat>"` string in metadata
//! (the corpus on-disk format) and parsed on demand; a malformed value is
//! downgraded to "no geographic data" by callers, never treated as fatal.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors::{AssistantError, Result};

/// Marker token opening a legacy map-markup fragment inside `content`
pub const MAP_MARKUP_MARKER: &str = "<iframe";

/// Structured attributes attached to a document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Display title, used for exact/substring matching
    pub title: String,
    /// Coarse grouping, e.g. "campus-navigation", "dining"
    #[serde(default)]
    pub category: String,
    /// Finer grouping, e.g. "building", "faq"
    #[serde(rename = "type", default)]
    pub doc_type: String,
    /// `"<lng>,<lat>"`, both parseable as finite floats
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<String>,
    /// Pre-rendered map embed: either a bare URL or iframe markup
    #[serde(rename = "mapEmbed", skip_serializing_if = "Option::is_none")]
    pub map_embed: Option<String>,
    /// Free-form auxiliary fields (working hours, contact info).
    /// Carried through but never scored.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl DocumentMetadata {
    /// Metadata with just a title, for tests and minimal corpora
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            category: String::new(),
            doc_type: String::new(),
            coordinates: None,
            map_embed: None,
            extra: BTreeMap::new(),
        }
    }

    /// Parsed coordinates, if present and well formed
    pub fn parsed_coordinates(&self) -> Option<Coordinates> {
        self.coordinates
            .as_deref()
            .and_then(|raw| Coordinates::parse(raw).ok())
    }

    /// True when the document can back a map response
    pub fn has_geo_data(&self) -> bool {
        self.parsed_coordinates().is_some() || self.map_embed.is_some()
    }

    /// An auxiliary field rendered as a plain string, if present
    pub fn extra_str(&self, key: &str) -> Option<String> {
        self.extra.get(key).map(|value| match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

/// One knowledge-base entry held by the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique opaque id, assigned on insertion, never reused
    pub id: String,
    /// Non-empty text; may still carry legacy iframe markup
    pub content: String,
    pub metadata: DocumentMetadata,
}

impl Document {
    /// True when the document can back a map response: parsed coordinates,
    /// a first-class embed, or legacy markup inside the content
    pub fn has_geo_data(&self) -> bool {
        self.metadata.has_geo_data() || self.content.contains(MAP_MARKUP_MARKER)
    }
}

/// A document as it enters the store, before an id is assigned
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDocument {
    pub content: String,
    pub metadata: DocumentMetadata,
}

/// A geographic point parsed from the corpus `"<lng>,<lat>"` format
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lng: f64,
    pub lat: f64,
}

impl Coordinates {
    /// Parse the corpus storage format: longitude first, then latitude.
    ///
    /// Both halves must be finite and inside valid ranges
    /// (lng in [-180, 180], lat in [-90, 90]).
    pub fn parse(raw: &str) -> Result<Self> {
        let err = |reason: &str| AssistantError::CoordinateParse {
            raw: raw.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = raw.split(',');
        let lng_raw = parts.next().ok_or_else(|| err("missing longitude"))?;
        let lat_raw = parts.next().ok_or_else(|| err("missing latitude"))?;
        if parts.next().is_some() {
            return Err(err("expected exactly two comma-separated values"));
        }

        let lng: f64 = lng_raw
            .trim()
            .parse()
            .map_err(|_| err("longitude is not a number"))?;
        let lat: f64 = lat_raw
            .trim()
            .parse()
            .map_err(|_| err("latitude is not a number"))?;

        if !lng.is_finite() || !lat.is_finite() {
            return Err(err("coordinates must be finite"));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(err("longitude out of range [-180, 180]"));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(err("latitude out of range [-90, 90]"));
        }

        Ok(Self { lng, lat })
    }

    /// Render back to the storage format
    pub fn to_storage_string(&self) -> String {
        format!("{},{}", self.lng, self.lat)
    }
}
