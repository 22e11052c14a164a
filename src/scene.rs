use crate::error::DecodeError;
use roxmltree::Node;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One acquisition returned by the inventory catalog.
///
/// Times are kept exactly as the catalog wrote them.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Default)]
pub struct Scene {
    pub scene_id: String,
    pub browse_url: String,
    pub cloud_cover: f32,
    pub day_or_night: String,
    pub start_time: String,
    pub end_time: String,
    pub upper_left_latitude: f64,
    pub upper_left_longitude: f64,
    pub lower_left_latitude: f64,
    pub lower_left_longitude: f64,
    pub upper_right_latitude: f64,
    pub upper_right_longitude: f64,
    pub lower_right_latitude: f64,
    pub lower_right_longitude: f64,
}

impl Scene {
    /// Build a scene from a `metaData` element. Elements the catalog left out
    /// decode to empty strings or zero.
    pub(crate) fn from_node(meta_data: Node) -> Result<Self, DecodeError> {
        Ok(Self {
            scene_id: extract_text(meta_data, "sceneID"),
            browse_url: extract_text(meta_data, "browseURL"),
            cloud_cover: extract_number(meta_data, "cloudCoverFull")?,
            day_or_night: extract_text(meta_data, "dayOrNight"),
            start_time: extract_text(meta_data, "sceneStartTime"),
            end_time: extract_text(meta_data, "sceneEndTime"),
            upper_left_latitude: extract_number(meta_data, "upperLeftCornerLatitude")?,
            upper_left_longitude: extract_number(meta_data, "upperLeftCornerLongitude")?,
            lower_left_latitude: extract_number(meta_data, "lowerLeftCornerLatitude")?,
            lower_left_longitude: extract_number(meta_data, "lowerLeftCornerLongitude")?,
            upper_right_latitude: extract_number(meta_data, "upperRightCornerLatitude")?,
            upper_right_longitude: extract_number(meta_data, "upperRightCornerLongitude")?,
            lower_right_latitude: extract_number(meta_data, "lowerRightCornerLatitude")?,
            lower_right_longitude: extract_number(meta_data, "lowerRightCornerLongitude")?,
        })
    }

    /// Corner polygon ordered lower-left, lower-right, upper-right, upper-left.
    pub fn footprint(&self) -> Footprint {
        Footprint {
            lons: [
                self.lower_left_longitude,
                self.lower_right_longitude,
                self.upper_right_longitude,
                self.upper_left_longitude,
            ],
            lats: [
                self.lower_left_latitude,
                self.lower_right_latitude,
                self.upper_right_latitude,
                self.upper_left_latitude,
            ],
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let envelope = self.footprint().envelope();
        write!(
            f,
            "Scene: {}\nDate: {}\nURL: {}\nBbox: {} {} {} {}",
            self.scene_id,
            self.start_time,
            self.browse_url,
            envelope.min_lon,
            envelope.min_lat,
            envelope.max_lon,
            envelope.max_lat
        )
    }
}

fn child<'a, 'input>(parent: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    parent.children().find(|n| n.has_tag_name(tag))
}

/// Character data of the element, joined across comments and processing
/// instructions.
fn extract_text(parent: Node, tag: &str) -> String {
    child(parent, tag)
        .map(|n| {
            n.children()
                .filter(|c| c.is_text())
                .filter_map(|c| c.text())
                .collect::<String>()
        })
        .unwrap_or_default()
}

fn extract_number<T: std::str::FromStr + Default>(
    parent: Node,
    tag: &'static str,
) -> Result<T, DecodeError> {
    let text = extract_text(parent, tag);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(T::default());
    }
    trimmed.parse().map_err(|_| DecodeError::InvalidNumber {
        element: tag,
        value: text.clone(),
    })
}

/// Four-corner scene outline, longitudes and latitudes stored separately.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footprint {
    pub lons: [f64; 4],
    pub lats: [f64; 4],
}

impl Footprint {
    /// `(lon, lat)` pairs in polygon order.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.lons.iter().copied().zip(self.lats.iter().copied()).collect()
    }

    pub fn envelope(&self) -> Envelope {
        let min = |values: &[f64; 4]| values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = |values: &[f64; 4]| values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Envelope {
            min_lon: min(&self.lons),
            min_lat: min(&self.lats),
            max_lon: max(&self.lons),
            max_lat: max(&self.lats),
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq)]
pub struct Envelope {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}
