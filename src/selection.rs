use crate::query::{BoundingBox, Query, QueryBuilder, Sensor};
use anyhow::Result;
use chrono::NaiveDate;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A saved search, stored as TOML. Every filter is optional; whatever is
/// missing keeps the [`QueryBuilder`] default.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct QuerySelection {
    pub id: String,
    name: String,
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sensor: Option<Sensor>,
    #[serde(
        default,
        deserialize_with = "deserialize_date",
        skip_serializing_if = "Option::is_none"
    )]
    start_date: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "deserialize_date",
        skip_serializing_if = "Option::is_none"
    )]
    end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    path: Option<(u32, u32)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    row: Option<(u32, u32)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_cloud_cover: Option<u8>,
    // Tables have to come after plain values in TOML
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bbox: Option<BoundingBox>,
}

/// Dates may be written either as quoted strings or as TOML local dates.
fn deserialize_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    let value = toml::Value::deserialize(deserializer)?;
    let date = match value {
        toml::Value::String(s) => s.parse::<NaiveDate>().map_err(de::Error::custom)?,
        toml::Value::Datetime(datetime) => {
            let date = datetime
                .date
                .ok_or_else(|| de::Error::custom(format!("'{datetime}' has no date part")))?;
            NaiveDate::from_ymd_opt(date.year.into(), date.month.into(), date.day.into())
                .ok_or_else(|| de::Error::custom(format!("invalid date '{date}'")))?
        }
        other => {
            return Err(de::Error::custom(format!(
                "expected a date, found {}",
                other.type_str()
            )))
        }
    };
    Ok(Some(date))
}

pub fn template() -> toml::Table {
    toml::toml! {
        id = "landsat8.cape_cod"

        name = "Landsat 8 over Cape Cod, early spring 2015"

        description = "All Landsat 8 OLI/TIRS acquisitions intersecting Cape Cod and\n\
        the outer Massachusetts coast between late February and early March 2015."

        sensor = "LANDSAT_8"

        start_date = "2015-02-25"

        end_date = "2015-03-07"

        [bbox]
        west = -71.0
        east = -70.0
        south = 41.0
        north = 42.0
    }
}

impl QuerySelection {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let selection: Self = toml::from_str(&content)?;
        Ok(selection)
    }

    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn from_template(table: &toml::Table) -> Result<Self> {
        let selection: Self = toml::from_str(&table.to_string())?;
        Ok(selection)
    }

    pub fn to_builder(&self) -> QueryBuilder {
        let mut builder = QueryBuilder::new();
        if let Some(bbox) = self.bbox {
            builder = builder.bounding_box(bbox.west, bbox.east, bbox.south, bbox.north);
        }
        if let Some(sensor) = &self.sensor {
            builder = builder.sensor(sensor.clone());
        }

        // A single open end keeps the default for that side
        let defaults = QueryBuilder::new().build();
        if self.start_date.is_some() || self.end_date.is_some() {
            builder = builder.date_range(
                self.start_date.unwrap_or(defaults.start_date),
                self.end_date.unwrap_or(defaults.end_date),
            );
        }

        if let Some((start, end)) = self.path {
            builder = builder.path_range(start, end);
        }
        if let Some((start, end)) = self.row {
            builder = builder.row_range(start, end);
        }
        if let Some(cc) = self.max_cloud_cover {
            builder = builder.max_cloud_cover(cc);
        }
        builder
    }

    pub fn to_query(&self) -> Query {
        self.to_builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE_PATH: &str = "/tmp/landsat_query_selection.toml";

    #[test]
    fn test_template() {
        let selection = QuerySelection::from_template(&template()).unwrap();
        assert_eq!(selection.id, "landsat8.cape_cod");

        let query = selection.to_query();
        assert_eq!(query.bbox, BoundingBox::new(-71.0, -70.0, 41.0, 42.0));
        assert_eq!(query.sensor, Sensor::Landsat8);
        assert_eq!(query.start_date, NaiveDate::from_ymd_opt(2015, 2, 25).unwrap());
        assert_eq!(query.end_date, NaiveDate::from_ymd_opt(2015, 3, 7).unwrap());
        assert_eq!(query.max_cloud_cover, None);
        assert!(!query.is_path_row());
    }

    #[test]
    fn test_write_and_read_toml() {
        let path = Path::new(TEMPLATE_PATH);
        let selection = QuerySelection::from_template(&template()).unwrap();
        selection.write(path).unwrap();

        let read_back = QuerySelection::read(path).unwrap();
        assert_eq!(read_back, selection);
    }

    #[test]
    fn test_path_row_selection() {
        let content = r#"
            id = "wrs.012031"
            name = "Path 12 row 31"
            description = ""
            sensor = "LANDSAT_TM"
            path = [12, 12]
            row = [31, 31]
            max_cloud_cover = 10
        "#;
        let selection: QuerySelection = toml::from_str(content).unwrap();
        let query = selection.to_query();

        assert_eq!(query.sensor, Sensor::Landsat45Tm);
        assert_eq!(query.path_range, Some((12, 12)));
        assert_eq!(query.row_range, Some((31, 31)));
        assert_eq!(query.max_cloud_cover, Some(10));
        assert_eq!(query.bbox, BoundingBox::WORLD);
    }

    #[test]
    fn test_toml_date_literals() {
        let content = r#"
            id = "literal-dates"
            name = ""
            description = ""
            start_date = 2015-02-25
            end_date = "2015-03-07"
        "#;
        let selection: QuerySelection = toml::from_str(content).unwrap();
        let query = selection.to_query();
        assert_eq!(query.start_date, NaiveDate::from_ymd_opt(2015, 2, 25).unwrap());
        assert_eq!(query.end_date, NaiveDate::from_ymd_opt(2015, 3, 7).unwrap());
    }

    #[test]
    fn test_date_time_without_date_is_rejected() {
        let content = r#"
            id = "time-only"
            name = ""
            description = ""
            start_date = 07:32:00
        "#;
        assert!(toml::from_str::<QuerySelection>(content).is_err());
    }

    #[test]
    fn test_open_ended_dates() {
        let content = r#"
            id = "since-2013"
            name = ""
            description = ""
            start_date = "2013-04-11"
        "#;
        let selection: QuerySelection = toml::from_str(content).unwrap();
        let query = selection.to_query();
        assert_eq!(query.start_date, NaiveDate::from_ymd_opt(2013, 4, 11).unwrap());
        assert_eq!(query.end_date, NaiveDate::from_ymd_opt(3000, 1, 1).unwrap());
        assert_eq!(query.sensor, Sensor::Combined);
    }
}
