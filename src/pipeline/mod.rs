//! The feature-engineering pipeline.
//!
//! Four raw tables go in: trips, stations, daily weather, and zip-code
//! geocoding. One denormalized feature table comes out, built by calendar
//! enrichment, cardinality-preserving left joins, feature derivation, and a
//! final projection onto the published schema.

pub mod binning;
pub mod features;
pub mod join;
pub mod schema;
pub mod types;

use tracing::info;

use crate::error::PipelineError;
use crate::temporal;
use join::DatasetJoiner;
use schema::FeatureTable;
use types::{StationRecord, TripRecord, WeatherRecord, ZipGeoRecord};

/// Runs the full pipeline over in-memory tables.
///
/// Row counts are preserved through enrichment and every join; the duration
/// filter inside the feature stage is the only place rows are dropped.
///
/// # Errors
///
/// Fails on the first malformed trip timestamp, a duplicate key in any
/// reference table, or a schema violation. There is no partial-dataset
/// recovery; the caller gets a complete table or an error naming the stage.
pub fn build_feature_table(
    trips: Vec<TripRecord>,
    stations: Vec<StationRecord>,
    weather: Vec<WeatherRecord>,
    zip_geo: Vec<ZipGeoRecord>,
) -> Result<FeatureTable, PipelineError> {
    let trip_count = trips.len();

    let enriched = temporal::enrich_all(trips)?;
    info!(rows = enriched.len(), "Trips enriched with calendar fields");

    let joiner = DatasetJoiner::new(stations, weather, zip_geo)?;
    let masters = joiner.join(enriched);
    debug_assert_eq!(masters.len(), trip_count);
    info!(rows = masters.len(), "Reference tables joined");

    let engineered = features::engineer(masters);
    info!(
        rows = engineered.len(),
        dropped = trip_count - engineered.len(),
        "Features derived"
    );

    Ok(schema::normalize(engineered))
}
