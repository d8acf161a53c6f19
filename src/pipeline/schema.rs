//! The published schema: projection onto the public column vocabulary and
//! categorical typing of the nominal columns.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::PipelineError;
use crate::pipeline::types::{EngineeredRecord, Gender, SubscriberType};

/// Columns published with categorical (enumerated) typing. The charting
/// layer groups on these; everything else is numeric or free-form.
pub const CATEGORICAL_COLUMNS: &[&str] = &[
    "station_municipality",
    "station_status",
    "trip_status",
    "subsc_type",
    "zip_code",
    "gender",
    "weather_event",
    "visibility_range",
    "temp_range",
    "humidity_range",
    "wind_range",
    "dew_point_range",
    "age_range",
    "bike_freq_use_range",
    "bike_avg_dur_range",
];

/// One published row of the feature set.
///
/// Start-station columns are renamed to the public vocabulary (`lat_start`
/// becomes `latitude`, and so on); columns sourced from a left join stay
/// nullable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRow {
    pub station_municipality: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub station_status: Option<String>,
    pub trip_status: String,
    pub year: i32,
    pub month: u32,
    pub weekday: u32,
    pub day: u32,
    pub hour: u32,
    pub subsc_type: SubscriberType,
    pub zip_code: Option<String>,
    pub zip_code_lat: Option<f64>,
    pub zip_code_lng: Option<f64>,
    pub gender: Option<Gender>,
    pub age: Option<i32>,
    pub same_station_flag: u8,
    pub visibility_range: Option<&'static str>,
    pub temp_range: Option<&'static str>,
    pub humidity_range: Option<&'static str>,
    pub wind_range: Option<&'static str>,
    pub dew_point_range: Option<&'static str>,
    pub age_range: Option<&'static str>,
    pub bike_use_cnt: u64,
    pub bike_ride_duration_avg: f64,
    pub bike_freq_use_range: Option<&'static str>,
    pub bike_avg_dur_range: Option<&'static str>,
    pub avg_tmp_f: Option<f64>,
    pub avg_dew_point_f: Option<f64>,
    pub avg_humidity_pct: Option<f64>,
    pub avg_sea_level_press_in: Option<f64>,
    pub avg_visibility_mi: Option<f64>,
    pub avg_wind_mph: Option<f64>,
    pub snowfall_in: Option<f64>,
    pub precip_in: Option<f64>,
    pub weather_event: Option<String>,
    pub duration: i64,
}

/// The finished feature set handed to the visualization layer.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    pub rows: Vec<FeatureRow>,
}

impl FeatureTable {
    /// Distinct level set of a declared categorical column.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Schema`] for a column name that is not in
    /// [`CATEGORICAL_COLUMNS`]. Null cells contribute no level.
    pub fn category_levels(&self, column: &str) -> Result<BTreeSet<String>, PipelineError> {
        if !CATEGORICAL_COLUMNS.contains(&column) {
            return Err(PipelineError::Schema {
                table: "features",
                detail: format!("{column:?} is not a declared categorical column"),
            });
        }

        let mut levels = BTreeSet::new();
        for row in &self.rows {
            if let Some(level) = row.category_value(column) {
                levels.insert(level);
            }
        }
        Ok(levels)
    }
}

impl FeatureRow {
    fn category_value(&self, column: &str) -> Option<String> {
        match column {
            "station_municipality" => self.station_municipality.clone(),
            "station_status" => self.station_status.clone(),
            "trip_status" => Some(self.trip_status.clone()),
            "subsc_type" => Some(
                match self.subsc_type {
                    SubscriberType::Registered => "Registered",
                    SubscriberType::Casual => "Casual",
                }
                .to_string(),
            ),
            "zip_code" => self.zip_code.clone(),
            "gender" => self.gender.map(|g| {
                match g {
                    Gender::Male => "Male",
                    Gender::Female => "Female",
                }
                .to_string()
            }),
            "weather_event" => self.weather_event.clone(),
            "visibility_range" => self.visibility_range.map(str::to_string),
            "temp_range" => self.temp_range.map(str::to_string),
            "humidity_range" => self.humidity_range.map(str::to_string),
            "wind_range" => self.wind_range.map(str::to_string),
            "dew_point_range" => self.dew_point_range.map(str::to_string),
            "age_range" => self.age_range.map(str::to_string),
            "bike_freq_use_range" => self.bike_freq_use_range.map(str::to_string),
            "bike_avg_dur_range" => self.bike_avg_dur_range.map(str::to_string),
            _ => None,
        }
    }
}

/// Projects every engineered record onto the published vocabulary.
pub fn normalize(records: Vec<EngineeredRecord>) -> FeatureTable {
    let rows = records.into_iter().map(feature_row).collect();
    FeatureTable { rows }
}

fn feature_row(record: EngineeredRecord) -> FeatureRow {
    let EngineeredRecord {
        master,
        same_station_flag,
        age,
        visibility_range,
        temp_range,
        humidity_range,
        wind_range,
        dew_point_range,
        age_range,
        bike_use_cnt,
        bike_ride_duration_avg,
        bike_use_range,
        bike_avg_dur_range,
    } = record;

    let (zip_code_lat, zip_code_lng) = match master.residence {
        Some(z) => (Some(z.zip_code_lat), Some(z.zip_code_lng)),
        None => (None, None),
    };

    let (station_municipality, latitude, longitude, station_status) = match master.start_station {
        Some(s) => (Some(s.municipal), Some(s.lat), Some(s.lng), Some(s.status)),
        None => (None, None, None, None),
    };

    let (
        avg_tmp_f,
        avg_dew_point_f,
        avg_humidity_pct,
        avg_sea_level_press_in,
        avg_visibility_mi,
        avg_wind_mph,
        snowfall_in,
        precip_in,
        weather_event,
    ) = match master.weather {
        Some(w) => (
            w.avg_temp_f,
            w.avg_dew_point_f,
            w.avg_humidity_pct,
            w.avg_sea_level_press_in,
            w.avg_visibility_mi,
            w.avg_wind_mph,
            w.snowfall_in,
            w.precip_in,
            w.events,
        ),
        None => (None, None, None, None, None, None, None, None, None),
    };

    FeatureRow {
        station_municipality,
        latitude,
        longitude,
        station_status,
        trip_status: master.trip.trip_status,
        year: master.calendar.year,
        month: master.calendar.month,
        weekday: master.calendar.weekday,
        day: master.calendar.day,
        hour: master.calendar.hour,
        subsc_type: master.trip.subsc_type,
        zip_code: master.trip.zip_code,
        zip_code_lat,
        zip_code_lng,
        gender: master.trip.gender,
        age,
        same_station_flag,
        visibility_range,
        temp_range,
        humidity_range,
        wind_range,
        dew_point_range,
        age_range,
        bike_use_cnt,
        bike_ride_duration_avg,
        bike_freq_use_range: bike_use_range,
        bike_avg_dur_range,
        avg_tmp_f,
        avg_dew_point_f,
        avg_humidity_pct,
        avg_sea_level_press_in,
        avg_visibility_mi,
        avg_wind_mph,
        snowfall_in,
        precip_in,
        weather_event,
        duration: master.trip.duration,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::{
        MasterRecord, StationRecord, TripCalendar, TripRecord, WeatherRecord,
    };

    fn engineered() -> EngineeredRecord {
        EngineeredRecord {
            master: MasterRecord {
                trip: TripRecord {
                    seq_id: 1,
                    trip_status: "Closed".to_string(),
                    duration: 600,
                    start_date: "7/28/2011 10:12:00".to_string(),
                    start_station_id: Some(23),
                    end_station_id: Some(48),
                    bike_nr: "B00468".to_string(),
                    subsc_type: SubscriberType::Registered,
                    zip_code: Some("'02118".to_string()),
                    birth_date: Some(1985),
                    gender: Some(Gender::Female),
                },
                calendar: TripCalendar {
                    year: 2011,
                    month: 7,
                    day: 28,
                    hour: 10,
                    weekday: 3,
                },
                start_station: Some(StationRecord {
                    id: 23,
                    station: "Mass Ave".to_string(),
                    municipal: "Boston".to_string(),
                    lat: 42.35,
                    lng: -71.09,
                    status: "Existing".to_string(),
                }),
                end_station: None,
                weather: Some(WeatherRecord {
                    year: 2011,
                    month: 7,
                    day: 28,
                    avg_temp_f: Some(71.0),
                    avg_dew_point_f: Some(55.0),
                    avg_humidity_pct: Some(60.0),
                    avg_sea_level_press_in: Some(30.0),
                    avg_visibility_mi: Some(10.0),
                    avg_wind_mph: Some(7.0),
                    snowfall_in: None,
                    precip_in: Some(0.0),
                    events: Some("Rain".to_string()),
                }),
                residence: None,
            },
            same_station_flag: 0,
            age: Some(26),
            visibility_range: Some("8+"),
            temp_range: Some("60-80"),
            humidity_range: Some("60-80"),
            wind_range: Some("5-10"),
            dew_point_range: Some("40-60"),
            age_range: Some("20-40"),
            bike_use_cnt: 3,
            bike_ride_duration_avg: 200.0,
            bike_use_range: Some("0-500"),
            bike_avg_dur_range: None,
        }
    }

    #[test]
    fn test_start_station_columns_renamed() {
        let table = normalize(vec![engineered()]);
        let row = &table.rows[0];

        assert_eq!(row.station_municipality.as_deref(), Some("Boston"));
        assert_eq!(row.latitude, Some(42.35));
        assert_eq!(row.longitude, Some(-71.09));
        assert_eq!(row.station_status.as_deref(), Some("Existing"));
    }

    #[test]
    fn test_calendar_columns_renamed() {
        let row = &normalize(vec![engineered()]).rows[0];

        assert_eq!(row.year, 2011);
        assert_eq!(row.month, 7);
        assert_eq!(row.weekday, 3);
        assert_eq!(row.day, 28);
        assert_eq!(row.hour, 10);
    }

    #[test]
    fn test_unmatched_station_leaves_nulls() {
        let mut record = engineered();
        record.master.start_station = None;

        let row = &normalize(vec![record]).rows[0];

        assert!(row.station_municipality.is_none());
        assert!(row.latitude.is_none());
        assert!(row.station_status.is_none());
    }

    #[test]
    fn test_category_levels_known_column() {
        let mut casual = engineered();
        casual.master.trip.subsc_type = SubscriberType::Casual;
        let table = normalize(vec![engineered(), casual]);

        let levels = table.category_levels("subsc_type").unwrap();

        assert_eq!(
            levels.into_iter().collect::<Vec<_>>(),
            vec!["Casual".to_string(), "Registered".to_string()]
        );
    }

    #[test]
    fn test_category_levels_skip_nulls() {
        let mut record = engineered();
        record.bike_avg_dur_range = None;
        let table = normalize(vec![record]);

        assert!(table.category_levels("bike_avg_dur_range").unwrap().is_empty());
    }

    #[test]
    fn test_category_levels_unknown_column_is_schema_error() {
        let table = normalize(vec![engineered()]);
        let err = table.category_levels("duration").unwrap_err();

        assert!(matches!(err, PipelineError::Schema { table: "features", .. }));
    }
}
