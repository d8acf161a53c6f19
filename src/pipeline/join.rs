//! Left joins of trips against the keyed reference tables.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use tracing::debug;

use crate::error::PipelineError;
use crate::pipeline::types::{
    MasterRecord, StationRecord, TripCalendar, TripRecord, WeatherRecord, ZipGeoRecord,
};

/// Joins each trip with its start/end station, daily weather, and residence
/// coordinates.
///
/// All four joins preserve left-side cardinality: a missed lookup leaves
/// `None` on the master record and the row is retained. Right-side key
/// uniqueness is enforced once, when the indexes are built.
#[derive(Debug)]
pub struct DatasetJoiner {
    stations: HashMap<u32, StationRecord>,
    weather: HashMap<(i32, u32, u32), WeatherRecord>,
    zip_geo: HashMap<String, ZipGeoRecord>,
}

impl DatasetJoiner {
    /// Indexes the reference tables.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::DuplicateKey`] if any reference table repeats
    /// a join key; a duplicate would fan a left join out and silently inflate
    /// row counts downstream.
    pub fn new(
        stations: Vec<StationRecord>,
        weather: Vec<WeatherRecord>,
        zip_geo: Vec<ZipGeoRecord>,
    ) -> Result<Self, PipelineError> {
        Ok(Self {
            stations: unique_index(stations, "stations", |s| s.id)?,
            weather: unique_index(weather, "weather", |w| (w.year, w.month, w.day))?,
            zip_geo: unique_index(zip_geo, "zip_geo", |z| z.zip_code.clone())?,
        })
    }

    /// Produces one [`MasterRecord`] per enriched trip.
    pub fn join(&self, trips: Vec<(TripRecord, TripCalendar)>) -> Vec<MasterRecord> {
        trips
            .into_iter()
            .map(|(trip, calendar)| self.join_one(trip, calendar))
            .collect()
    }

    fn join_one(&self, trip: TripRecord, calendar: TripCalendar) -> MasterRecord {
        let start_station = trip
            .start_station_id
            .and_then(|id| self.stations.get(&id))
            .cloned();
        let end_station = trip
            .end_station_id
            .and_then(|id| self.stations.get(&id))
            .cloned();
        let weather = self
            .weather
            .get(&(calendar.year, calendar.month, calendar.day))
            .cloned();
        let residence = trip
            .zip_code
            .as_ref()
            .and_then(|zip| self.zip_geo.get(zip))
            .cloned();

        if weather.is_none() {
            debug!(
                seq_id = trip.seq_id,
                year = calendar.year,
                month = calendar.month,
                day = calendar.day,
                "No weather observation for trip date"
            );
        }

        MasterRecord {
            trip,
            calendar,
            start_station,
            end_station,
            weather,
            residence,
        }
    }
}

fn unique_index<K, V, F>(
    rows: Vec<V>,
    table: &'static str,
    key_of: F,
) -> Result<HashMap<K, V>, PipelineError>
where
    K: Hash + Eq + Debug,
    F: Fn(&V) -> K,
{
    let mut index = HashMap::with_capacity(rows.len());
    for row in rows {
        let key = key_of(&row);
        let key_repr = format!("{key:?}");
        if index.insert(key, row).is_some() {
            return Err(PipelineError::DuplicateKey {
                table,
                key: key_repr,
            });
        }
    }
    Ok(index)
}
