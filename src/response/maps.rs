//! Map URL construction and legacy markup handling
//!
//! Newer corpus generations carry the embed URL as a first-class metadata
//! field; older records still inline a full `<iframe …>` fragment in the
//! content. Both shapes are recognized here, and the fragment is stripped
//! before content is shown to a user or handed to the provider.

use crate::knowledge::document::MAP_MARKUP_MARKER;
use crate::knowledge::Coordinates;

/// Marker token opening a legacy map-markup fragment
const IFRAME_OPEN: &str = MAP_MARKUP_MARKER;
/// Closing token of a legacy map-markup fragment
const IFRAME_CLOSE: &str = "</iframe>";

/// Half-width of the embeddable bounding box, in degrees
const BBOX_OFFSET: f64 = 0.0008;

/// Deep link to a map search at the exact point (lat,lng order)
pub fn maps_search_url(coords: Coordinates) -> String {
    format!(
        "https://www.google.com/maps/search/?api=1&query={},{}",
        coords.lat, coords.lng
    )
}

/// Deep link to a map search by place name, for embed-only records
pub fn maps_search_url_for_title(title: &str) -> String {
    format!(
        "https://www.google.com/maps/search/?api=1&query={}",
        urlencoding::encode(title)
    )
}

/// Embeddable map centered on the point: a small bounding box with a
/// marker at the exact coordinates
pub fn osm_embed_url(coords: Coordinates) -> String {
    format!(
        "https://www.openstreetmap.org/export/embed.html?bbox={}%2C{}%2C{}%2C{}&layer=mapnik&marker={}%2C{}",
        coords.lng - BBOX_OFFSET,
        coords.lat - BBOX_OFFSET,
        coords.lng + BBOX_OFFSET,
        coords.lat + BBOX_OFFSET,
        coords.lat,
        coords.lng
    )
}

/// Pull an embeddable URL out of a `mapEmbed` value or markup fragment.
///
/// Accepts either a bare URL or iframe markup with a `src` attribute.
pub fn extract_embed_src(markup: &str) -> Option<String> {
    let trimmed = markup.trim();
    if trimmed.is_empty() {
        return None;
    }
    if !trimmed.contains(IFRAME_OPEN) {
        return Some(trimmed.to_string());
    }

    let src_start = trimmed.find("src=\"")? + "src=\"".len();
    let src_len = trimmed[src_start..].find('"')?;
    let src = &trimmed[src_start..src_start + src_len];
    if src.is_empty() {
        None
    } else {
        Some(src.to_string())
    }
}

/// Remove legacy iframe fragments from content and tidy the whitespace
/// left behind
pub fn strip_map_markup(content: &str) -> String {
    let mut text = content.to_string();

    while let Some(open) = text.find(IFRAME_OPEN) {
        let end = match text[open..].find(IFRAME_CLOSE) {
            Some(close) => open + close + IFRAME_CLOSE.len(),
            // Unterminated fragment: drop everything from the marker on
            None => text.len(),
        };
        text.replace_range(open..end, " ");
    }

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
