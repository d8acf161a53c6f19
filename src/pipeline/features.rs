//! Derived features: same-station flag, rider age, per-bike usage
//! aggregates, categorical range bins, and the outlier-duration filter.

use std::collections::HashMap;

use tracing::info;

use crate::pipeline::binning;
use crate::pipeline::types::{EngineeredRecord, MasterRecord, SubscriberType};

/// Retained trips satisfy `0 < duration <= 3000` seconds.
const DURATION_MIN_EXCLUSIVE_S: i64 = 0;
const DURATION_MAX_INCLUSIVE_S: i64 = 3000;

struct BikeUsage {
    trips: u64,
    total_duration: i64,
}

/// Derives every feature and applies the duration filter.
///
/// Per-bike aggregates are computed over the full trip population before
/// the filter runs, so a bike's usage statistics include its outlier trips.
/// The filter is the only row-dropping operation in the pipeline.
pub fn engineer(masters: Vec<MasterRecord>) -> Vec<EngineeredRecord> {
    let usage = bike_usage(&masters);

    let mut records: Vec<EngineeredRecord> = masters
        .into_iter()
        .map(|master| derive(master, &usage))
        .collect();

    let rows_before = records.len();
    records.retain(|r| {
        r.master.trip.duration > DURATION_MIN_EXCLUSIVE_S
            && r.master.trip.duration <= DURATION_MAX_INCLUSIVE_S
    });
    info!(
        rows_before,
        rows_after = records.len(),
        dropped = rows_before - records.len(),
        "Applied trip duration filter"
    );

    records
}

fn bike_usage(masters: &[MasterRecord]) -> HashMap<String, BikeUsage> {
    let mut usage: HashMap<String, BikeUsage> = HashMap::new();
    for m in masters {
        let entry = usage
            .entry(m.trip.bike_nr.clone())
            .or_insert(BikeUsage {
                trips: 0,
                total_duration: 0,
            });
        entry.trips += 1;
        entry.total_duration += m.trip.duration;
    }
    usage
}

fn derive(master: MasterRecord, usage: &HashMap<String, BikeUsage>) -> EngineeredRecord {
    let same_station_flag = match (master.trip.start_station_id, master.trip.end_station_id) {
        (Some(start), Some(end)) if start == end => 1,
        _ => 0,
    };

    let age = match (master.trip.subsc_type, master.trip.birth_date) {
        (SubscriberType::Registered, Some(birth)) => Some(master.calendar.year - birth),
        _ => None,
    };

    let weather = master.weather.as_ref();
    let visibility_range =
        binning::VISIBILITY_MI.bucket(weather.and_then(|w| w.avg_visibility_mi));
    let temp_range = binning::TEMP_F.bucket(weather.and_then(|w| w.avg_temp_f));
    let humidity_range = binning::HUMIDITY_PCT.bucket(weather.and_then(|w| w.avg_humidity_pct));
    let wind_range = binning::WIND_MPH.bucket(weather.and_then(|w| w.avg_wind_mph));
    let dew_point_range = binning::DEW_POINT_F.bucket(weather.and_then(|w| w.avg_dew_point_f));
    let age_range = binning::AGE_YEARS.bucket(age.map(f64::from));

    // The bike index is built from the same records, so the key is present.
    let bike = &usage[master.trip.bike_nr.as_str()];
    let bike_use_cnt = bike.trips;
    let bike_ride_duration_avg = bike.total_duration as f64 / bike.trips as f64;
    let bike_use_range = binning::BIKE_USE_CNT.bucket(Some(bike_use_cnt as f64));
    let bike_avg_dur_range = binning::BIKE_AVG_DURATION_S.bucket(Some(bike_ride_duration_avg));

    EngineeredRecord {
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
    }
}
