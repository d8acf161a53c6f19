//! CSV ingestion adapters for the raw input tables.
//!
//! Each loader deserializes one table into typed records; a missing or
//! ill-typed column surfaces as a schema error naming the table, before the
//! pipeline proper starts.

use std::fs::File;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::info;

use crate::error::PipelineError;
use crate::pipeline::types::{StationRecord, TripRecord, WeatherRecord, ZipGeoRecord};

pub fn load_trips(path: &Path) -> Result<Vec<TripRecord>, PipelineError> {
    load_table(path, "trips")
}

pub fn load_stations(path: &Path) -> Result<Vec<StationRecord>, PipelineError> {
    load_table(path, "stations")
}

pub fn load_weather(path: &Path) -> Result<Vec<WeatherRecord>, PipelineError> {
    load_table(path, "weather")
}

/// Loads a zip-code geocoding table, overriding the built-in one from
/// [`crate::geo::frequent_zip_codes`].
pub fn load_zip_geo(path: &Path) -> Result<Vec<ZipGeoRecord>, PipelineError> {
    load_table(path, "zip_geo")
}

fn load_table<T: DeserializeOwned>(
    path: &Path,
    table: &'static str,
) -> Result<Vec<T>, PipelineError> {
    let file = File::open(path).map_err(|source| PipelineError::Io { table, source })?;
    let mut reader = csv::Reader::from_reader(file);

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let row: T = result.map_err(|e| PipelineError::Schema {
            table,
            detail: e.to_string(),
        })?;
        rows.push(row);
    }

    info!(table, rows = rows.len(), "Input table loaded");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    #[test]
    fn test_load_stations() {
        let path = temp_path("bikeshare_features_test_stations.csv");
        fs::write(
            &path,
            "id,station,municipal,lat,lng,status\n\
             23,Mass Ave,Boston,42.35,-71.09,Existing\n\
             48,Main St,Cambridge,42.36,-71.10,Removed\n",
        )
        .unwrap();

        let stations = load_stations(Path::new(&path)).unwrap();

        assert_eq!(stations.len(), 2);
        assert_eq!(stations[0].id, 23);
        assert_eq!(stations[1].municipal, "Cambridge");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_trips_with_nullable_columns() {
        let path = temp_path("bikeshare_features_test_trips.csv");
        fs::write(
            &path,
            "seq_id,status,duration,start_date,start_station_id,end_station_id,bike_nr,subsc_type,zip_code,birth_date,gender\n\
             1,Closed,600,7/28/2011 10:12:00,23,48,B00468,Registered,'02118,1985,Male\n\
             2,Closed,300,7/28/2011 11:00:00,,,B00554,Casual,,,\n",
        )
        .unwrap();

        let trips = load_trips(Path::new(&path)).unwrap();

        assert_eq!(trips.len(), 2);
        assert_eq!(trips[0].zip_code.as_deref(), Some("'02118"));
        assert!(trips[1].start_station_id.is_none());
        assert!(trips[1].gender.is_none());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_column_is_schema_error() {
        let path = temp_path("bikeshare_features_test_bad_stations.csv");
        fs::write(&path, "id,station\n23,Mass Ave\n").unwrap();

        let err = load_stations(Path::new(&path)).unwrap_err();
        assert!(matches!(err, PipelineError::Schema { table: "stations", .. }));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_unreadable_file_is_io_error() {
        let err = load_weather(Path::new("/nonexistent/boston_weather.csv")).unwrap_err();
        assert!(matches!(err, PipelineError::Io { table: "weather", .. }));
    }
}
