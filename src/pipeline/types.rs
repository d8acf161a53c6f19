//! Record types flowing through the feature pipeline.

use serde::{Deserialize, Serialize};

/// Subscriber type distinguishing members with accounts from single-ride
/// purchasers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubscriberType {
    Registered,
    Casual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

/// One bike rental event, as ingested.
///
/// Nullable columns in the raw export (station ids, zip code, birth year,
/// gender) come through as `Option`; the pipeline adds to a trip but never
/// rewrites these fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    pub seq_id: u64,
    #[serde(rename = "status")]
    pub trip_status: String,
    /// Trip duration in seconds.
    pub duration: i64,
    /// Raw start timestamp string; parsed by the temporal enricher.
    pub start_date: String,
    pub start_station_id: Option<u32>,
    pub end_station_id: Option<u32>,
    pub bike_nr: String,
    pub subsc_type: SubscriberType,
    pub zip_code: Option<String>,
    /// Birth year, reported for registered riders only.
    pub birth_date: Option<i32>,
    pub gender: Option<Gender>,
}

/// Station reference data. Unique on `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationRecord {
    pub id: u32,
    pub station: String,
    pub municipal: String,
    pub lat: f64,
    pub lng: f64,
    pub status: String,
}

/// Daily weather aggregates. Unique on (year, month, day).
///
/// Field names mirror the raw export's headers via serde renames so the
/// table deserializes without a preprocessing pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    #[serde(rename = "Year")]
    pub year: i32,
    #[serde(rename = "Month")]
    pub month: u32,
    #[serde(rename = "Day")]
    pub day: u32,
    #[serde(rename = "Avg Temp (F)")]
    pub avg_temp_f: Option<f64>,
    #[serde(rename = "Avg Dew Point (F)")]
    pub avg_dew_point_f: Option<f64>,
    #[serde(rename = "Avg Humidity (%)")]
    pub avg_humidity_pct: Option<f64>,
    #[serde(rename = "Avg Sea Level Press (in)")]
    pub avg_sea_level_press_in: Option<f64>,
    #[serde(rename = "Avg Visibility (mi)")]
    pub avg_visibility_mi: Option<f64>,
    #[serde(rename = "Avg Wind (mph)")]
    pub avg_wind_mph: Option<f64>,
    #[serde(rename = "Snowfall (in)")]
    pub snowfall_in: Option<f64>,
    #[serde(rename = "Precip (in)")]
    pub precip_in: Option<f64>,
    #[serde(rename = "Events")]
    pub events: Option<String>,
}

/// Postal code to residence coordinates. Unique on `zip_code`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZipGeoRecord {
    pub zip_code: String,
    pub zip_code_lat: f64,
    pub zip_code_lng: f64,
}

/// Calendar fields derived from a trip's start timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripCalendar {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    /// 0 = Monday.
    pub weekday: u32,
}

/// A trip joined with its reference data: start/end station views, the
/// day's weather, and the rider's residence coordinates.
///
/// Exactly one `MasterRecord` exists per `TripRecord`; unmatched reference
/// keys leave `None` fields rather than dropping the row.
#[derive(Debug, Clone, PartialEq)]
pub struct MasterRecord {
    pub trip: TripRecord,
    pub calendar: TripCalendar,
    pub start_station: Option<StationRecord>,
    pub end_station: Option<StationRecord>,
    pub weather: Option<WeatherRecord>,
    pub residence: Option<ZipGeoRecord>,
}

/// A master record plus every derived feature.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineeredRecord {
    pub master: MasterRecord,
    /// 1 when the trip starts and ends at the same station.
    pub same_station_flag: u8,
    /// Rider age at trip start; registered riders with a birth year only.
    pub age: Option<i32>,
    pub visibility_range: Option<&'static str>,
    pub temp_range: Option<&'static str>,
    pub humidity_range: Option<&'static str>,
    pub wind_range: Option<&'static str>,
    pub dew_point_range: Option<&'static str>,
    pub age_range: Option<&'static str>,
    /// Trip count for this trip's bike across the full population.
    pub bike_use_cnt: u64,
    /// Mean trip duration for this trip's bike, in seconds.
    pub bike_ride_duration_avg: f64,
    pub bike_use_range: Option<&'static str>,
    pub bike_avg_dur_range: Option<&'static str>,
}
