//! Search criteria for the Landsat inventory catalog
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq, Default)]
#[serde(from = "String", into = "String")]
pub enum Sensor {
    Landsat8,
    Landsat7,
    Landsat7SlcOff,
    Landsat45Tm,
    Landsat45Mss,
    Landsat13Mss,
    #[default]
    Combined,
    /// Passed through verbatim; the catalog decides whether it exists.
    Other(String),
}

impl Sensor {
    pub fn code(&self) -> &str {
        match self {
            Self::Landsat8 => "LANDSAT_8",
            Self::Landsat7 => "LANDSAT_ETM",
            Self::Landsat7SlcOff => "LANDSAT_ETM_SLC_OFF",
            Self::Landsat45Tm => "LANDSAT_TM",
            Self::Landsat45Mss => "LANDSAT_MSS2",
            Self::Landsat13Mss => "LANDSAT_MSS1",
            Self::Combined => "LANDSAT_COMBINED",
            Self::Other(code) => code,
        }
    }
}

impl FromStr for Sensor {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let sensor = match s {
            "LANDSAT_8" => Self::Landsat8,
            "LANDSAT_ETM" => Self::Landsat7,
            "LANDSAT_ETM_SLC_OFF" => Self::Landsat7SlcOff,
            "LANDSAT_TM" => Self::Landsat45Tm,
            "LANDSAT_MSS2" => Self::Landsat45Mss,
            "LANDSAT_MSS1" => Self::Landsat13Mss,
            "LANDSAT_COMBINED" => Self::Combined,
            other => Self::Other(other.to_string()),
        };
        Ok(sensor)
    }
}

impl From<&str> for Sensor {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(sensor) => sensor,
            Err(never) => match never {},
        }
    }
}

impl From<String> for Sensor {
    fn from(s: String) -> Self {
        Sensor::from(s.as_str())
    }
}

impl From<Sensor> for String {
    fn from(sensor: Sensor) -> Self {
        sensor.code().to_string()
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Geographic filter in decimal degrees.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub west: f64,
    pub east: f64,
    pub south: f64,
    pub north: f64,
}

impl BoundingBox {
    pub const WORLD: BoundingBox = BoundingBox {
        west: -180.0,
        east: 180.0,
        south: -90.0,
        north: 90.0,
    };

    pub fn new(west: f64, east: f64, south: f64, north: f64) -> Self {
        Self {
            west,
            east,
            south,
            north,
        }
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::WORLD
    }
}

/// A finished set of search criteria. Produced by [`QueryBuilder::build`].
#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    pub bbox: BoundingBox,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub sensor: Sensor,
    pub path_range: Option<(u32, u32)>,
    pub row_range: Option<(u32, u32)>,
    pub max_cloud_cover: Option<u8>,
}

impl Query {
    pub fn builder() -> QueryBuilder {
        QueryBuilder::new()
    }

    /// True when the request must be expressed on the WRS path/row grid
    /// instead of as a lat/long box.
    pub fn is_path_row(&self) -> bool {
        self.path_range.is_some() || self.row_range.is_some()
    }
}

impl Default for Query {
    fn default() -> Self {
        QueryBuilder::new().build()
    }
}

fn earliest_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or(NaiveDate::MIN)
}

fn latest_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(3000, 1, 1).unwrap_or(NaiveDate::MAX)
}

/// Accumulates search criteria. Unset filters default to the whole globe,
/// 1900-01-01 through 3000-01-01 and every Landsat sensor.
///
/// Values are not validated. An inverted date range or an unknown sensor is
/// sent to the catalog as-is, and what the catalog does with it is undefined.
#[derive(Clone, Debug)]
pub struct QueryBuilder {
    query: Query,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self {
            query: Query {
                bbox: BoundingBox::WORLD,
                start_date: earliest_date(),
                end_date: latest_date(),
                sensor: Sensor::Combined,
                path_range: None,
                row_range: None,
                max_cloud_cover: None,
            },
        }
    }

    pub fn bounding_box(mut self, west: f64, east: f64, south: f64, north: f64) -> Self {
        self.query.bbox = BoundingBox::new(west, east, south, north);
        self
    }

    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.query.start_date = start;
        self.query.end_date = end;
        self
    }

    pub fn sensor(mut self, sensor: impl Into<Sensor>) -> Self {
        self.query.sensor = sensor.into();
        self
    }

    pub fn path_range(mut self, start: u32, end: u32) -> Self {
        self.query.path_range = Some((start, end));
        self
    }

    pub fn row_range(mut self, start: u32, end: u32) -> Self {
        self.query.row_range = Some((start, end));
        self
    }

    pub fn max_cloud_cover(mut self, percent: u8) -> Self {
        self.query.max_cloud_cover = Some(percent);
        self
    }

    pub fn build(self) -> Query {
        self.query
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_defaults() {
        let query = QueryBuilder::new().build();
        assert_eq!(query.bbox, BoundingBox::new(-180.0, 180.0, -90.0, 90.0));
        assert_eq!(query.start_date, date(1900, 1, 1));
        assert_eq!(query.end_date, date(3000, 1, 1));
        assert_eq!(query.sensor, Sensor::Combined);
        assert_eq!(query.path_range, None);
        assert_eq!(query.row_range, None);
        assert_eq!(query.max_cloud_cover, None);
        assert!(!query.is_path_row());
    }

    #[test]
    fn test_chained_setters() {
        let query = Query::builder()
            .bounding_box(-71.0, -70.0, 41.0, 42.0)
            .date_range(date(2015, 2, 25), date(2015, 3, 7))
            .sensor(Sensor::Landsat8)
            .max_cloud_cover(20)
            .build();

        assert_eq!(query.bbox.west, -71.0);
        assert_eq!(query.bbox.east, -70.0);
        assert_eq!(query.bbox.south, 41.0);
        assert_eq!(query.bbox.north, 42.0);
        assert_eq!(query.sensor, Sensor::Landsat8);
        assert_eq!(query.max_cloud_cover, Some(20));
    }

    #[test]
    fn test_inverted_dates_are_kept() {
        let query = Query::builder()
            .date_range(date(2020, 1, 1), date(2010, 1, 1))
            .build();
        assert_eq!(query.start_date, date(2020, 1, 1));
        assert_eq!(query.end_date, date(2010, 1, 1));
    }

    #[test]
    fn test_path_or_row_switches_shape() {
        assert!(Query::builder().path_range(12, 13).build().is_path_row());
        assert!(Query::builder().row_range(30, 31).build().is_path_row());
    }

    #[test]
    fn test_sensor_codes() {
        assert_eq!(Sensor::from("LANDSAT_ETM_SLC_OFF"), Sensor::Landsat7SlcOff);
        assert_eq!(Sensor::from("LANDSAT_MSS1"), Sensor::Landsat13Mss);
        assert_eq!(Sensor::Landsat45Tm.to_string(), "LANDSAT_TM");
    }

    #[test]
    fn test_unknown_sensor_passes_through() {
        let sensor = Sensor::from("SENTINEL_2");
        assert_eq!(sensor, Sensor::Other("SENTINEL_2".to_string()));
        assert_eq!(sensor.code(), "SENTINEL_2");
    }
}
