//! Static zip-code geocoding for the most frequent rider postal codes.

use crate::pipeline::types::ZipGeoRecord;

/// Hand-curated residence coordinates for the ten postal codes riders report
/// most often. Zip codes keep the leading apostrophe the raw trip export uses
/// to force text typing, so they match `TripRecord::zip_code` verbatim.
const FREQUENT_ZIP_CODES: &[(&str, f64, f64)] = &[
    ("'02118", 42.3407, -71.0708),
    ("'02139", 42.3643, -71.1022),
    ("'02215", 42.3476, -71.1009),
    ("'02116", 42.3514, -71.0776),
    ("'02115", 42.3480, -71.0885),
    ("'02138", 42.34733, -71.16867),
    ("'02114", 42.36033, -71.06732),
    ("'02143", 42.38371, -71.10213),
    ("'02113", 42.36285, -71.05518),
    ("'02134", 42.35595, -71.13411),
];

/// Builds the default zip-code geocoding table.
///
/// Returned as plain rows so callers inject it into the joiner like any other
/// reference table; tests and the CLI can substitute their own.
pub fn frequent_zip_codes() -> Vec<ZipGeoRecord> {
    FREQUENT_ZIP_CODES
        .iter()
        .map(|&(zip_code, zip_code_lat, zip_code_lng)| ZipGeoRecord {
            zip_code: zip_code.to_string(),
            zip_code_lat,
            zip_code_lng,
        })
        .collect()
}
