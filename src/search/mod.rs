// src/search/mod.rs

use std::collections::HashSet;

use chrono::NaiveDateTime;

use crate::error::ApiError;
use crate::models::{CallOutcome, Load};

pub const PICKUP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Load ids with at least one booked call on record.
pub fn booked_load_ids(log: &[CallOutcome]) -> HashSet<&str> {
    log.iter()
        .filter(|c| c.is_booked())
        .map(|c| c.load_id.as_str())
        .collect()
}

/// Earliest-pickup open load whose origin and destination contain the
/// given substrings (case-insensitive).
pub fn find_open_load(
    catalog: Vec<Load>,
    log: &[CallOutcome],
    origin: &str,
    destination: &str,
) -> Result<Load, ApiError> {
    let origin = origin.to_lowercase();
    let destination = destination.to_lowercase();
    let booked = booked_load_ids(log);

    let mut candidates = catalog
        .into_iter()
        .filter(|l| l.origin.to_lowercase().contains(&origin))
        .filter(|l| l.destination.to_lowercase().contains(&destination))
        .filter(|l| !booked.contains(l.load_id.as_str()))
        .map(|l| {
            let pickup = NaiveDateTime::parse_from_str(&l.pickup_datetime, PICKUP_FORMAT)
                .map_err(|_| ApiError::InvalidPickup {
                    load_id: l.load_id.clone(),
                    value: l.pickup_datetime.clone(),
                })?;
            Ok::<_, ApiError>((pickup, l))
        })
        .collect::<Result<Vec<_>, _>>()?;

    // stable: ties keep catalog order
    candidates.sort_by_key(|(pickup, _)| *pickup);
    candidates
        .into_iter()
        .next()
        .map(|(_, load)| load)
        .ok_or(ApiError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(id: &str, origin: &str, destination: &str, pickup: &str) -> Load {
        Load {
            load_id: id.into(),
            origin: origin.into(),
            destination: destination.into(),
            pickup_datetime: pickup.into(),
            equipment_type: Some("Reefer".into()),
            loadboard_rate: Some(2100.0),
            extra: Default::default(),
        }
    }

    fn call(id: &str, booked: i64) -> CallOutcome {
        CallOutcome {
            load_id: id.into(),
            mc_number: "MC42".into(),
            booked,
            sentiment: "neutral".into(),
            original_rate: None,
            final_rate: None,
            transcript_summary: String::new(),
        }
    }

    fn catalog() -> Vec<Load> {
        vec![
            load("L1", "Dallas, TX", "Atlanta, GA", "2025-06-03T10:00:00"),
            load("L2", "Dallas, TX", "Atlanta, GA", "2025-06-01T07:30:00"),
            load("L3", "Houston, TX", "Atlanta, GA", "2025-05-01T07:30:00"),
            load("L4", "dallas, tx", "ATLANTA, GA", "2025-06-02T12:00:00"),
        ]
    }

    #[test]
    fn returns_earliest_pickup() {
        let hit = find_open_load(catalog(), &[], "dallas", "atlanta").unwrap();
        assert_eq!(hit.load_id, "L2");
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        let hit = find_open_load(catalog(), &[], "HOUS", "lanta, g").unwrap();
        assert_eq!(hit.load_id, "L3");
    }

    #[test]
    fn no_match_is_not_found() {
        let err = find_open_load(catalog(), &[], "Seattle", "Atlanta").unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
        let err = find_open_load(Vec::new(), &[], "", "").unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn any_booked_entry_excludes_load() {
        let log = vec![call("L2", 0), call("L2", 1), call("L2", 0)];
        let hit = find_open_load(catalog(), &log, "Dallas", "Atlanta").unwrap();
        assert_eq!(hit.load_id, "L4");
    }

    #[test]
    fn unbooked_calls_do_not_exclude() {
        let log = vec![call("L2", 0), call("L2", 0)];
        let hit = find_open_load(catalog(), &log, "Dallas", "Atlanta").unwrap();
        assert_eq!(hit.load_id, "L2");
    }

    #[test]
    fn all_booked_is_not_found() {
        let log = vec![call("L3", 1)];
        let err = find_open_load(catalog(), &log, "Houston", "").unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn malformed_pickup_fails_request() {
        let mut loads = catalog();
        loads.push(load("L5", "Dallas, TX", "Atlanta, GA", "06/01/2025 07:00"));
        let err = find_open_load(loads, &[], "Dallas", "Atlanta").unwrap_err();
        match err {
            ApiError::InvalidPickup { load_id, .. } => assert_eq!(load_id, "L5"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_pickup_on_booked_load_is_ignored() {
        let mut loads = catalog();
        loads.push(load("L5", "Dallas, TX", "Atlanta, GA", "soon"));
        let hit = find_open_load(loads, &[call("L5", 1)], "Dallas", "Atlanta").unwrap();
        assert_eq!(hit.load_id, "L2");
    }
}
