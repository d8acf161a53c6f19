//! Calendar enrichment of trip start timestamps.

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::error::PipelineError;
use crate::pipeline::types::{TripCalendar, TripRecord};

/// Start timestamp formats seen in the raw trip exports.
const START_DATE_FORMATS: &[&str] = &[
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Derives year, month, day, hour, and weekday (0 = Monday) from a trip's
/// raw start timestamp.
///
/// # Errors
///
/// Returns [`PipelineError::Parse`] when the timestamp matches none of the
/// recognized formats. The record is never silently discarded here; the
/// caller decides whether a bad timestamp aborts the run.
pub fn derive_calendar(trip: &TripRecord) -> Result<TripCalendar, PipelineError> {
    let parsed = parse_start_date(&trip.start_date).ok_or_else(|| PipelineError::Parse {
        seq_id: trip.seq_id,
        value: trip.start_date.clone(),
    })?;

    Ok(TripCalendar {
        year: parsed.year(),
        month: parsed.month(),
        day: parsed.day(),
        hour: parsed.hour(),
        weekday: parsed.weekday().num_days_from_monday(),
    })
}

/// Enriches every trip, failing the whole pass on the first bad timestamp.
pub fn enrich_all(
    trips: Vec<TripRecord>,
) -> Result<Vec<(TripRecord, TripCalendar)>, PipelineError> {
    trips
        .into_iter()
        .map(|trip| derive_calendar(&trip).map(|calendar| (trip, calendar)))
        .collect()
}

fn parse_start_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    START_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::SubscriberType;

    fn trip_starting(start_date: &str) -> TripRecord {
        TripRecord {
            seq_id: 1,
            trip_status: "Closed".to_string(),
            duration: 600,
            start_date: start_date.to_string(),
            start_station_id: Some(23),
            end_station_id: Some(23),
            bike_nr: "B00468".to_string(),
            subsc_type: SubscriberType::Registered,
            zip_code: Some("'02118".to_string()),
            birth_date: Some(1985),
            gender: Some(crate::pipeline::types::Gender::Male),
        }
    }

    #[test]
    fn test_derive_calendar_us_format() {
        let calendar = derive_calendar(&trip_starting("7/28/2011 10:12:00")).unwrap();

        assert_eq!(calendar.year, 2011);
        assert_eq!(calendar.month, 7);
        assert_eq!(calendar.day, 28);
        assert_eq!(calendar.hour, 10);
        // 2011-07-28 was a Thursday
        assert_eq!(calendar.weekday, 3);
    }

    #[test]
    fn test_derive_calendar_iso_format() {
        let calendar = derive_calendar(&trip_starting("2012-10-01 08:05:30")).unwrap();

        assert_eq!(calendar.year, 2012);
        assert_eq!(calendar.month, 10);
        assert_eq!(calendar.hour, 8);
        // 2012-10-01 was a Monday
        assert_eq!(calendar.weekday, 0);
    }

    #[test]
    fn test_derive_calendar_rejects_garbage() {
        let err = derive_calendar(&trip_starting("not a timestamp")).unwrap_err();
        match err {
            PipelineError::Parse { seq_id, value } => {
                assert_eq!(seq_id, 1);
                assert_eq!(value, "not a timestamp");
            }
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_enrich_all_fails_on_first_bad_timestamp() {
        let trips = vec![trip_starting("7/28/2011 10:12:00"), trip_starting("bogus")];
        assert!(enrich_all(trips).is_err());
    }
}
