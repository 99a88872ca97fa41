use std::collections::BTreeMap;

use availability::AvailabilityPoint;
use campground_scan::{Campsite, ScanError};
use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};

/// Date format the grid endpoint expects, e.g. "7-1-2024"
pub const API_DATE_FORMAT: &str = "%-m-%-d-%Y";

/// Booking page for every ReserveCalifornia unit
pub const RESERVE_CA_BOOKING_URL: &str = "https://www.reservecalifornia.com/CaliforniaWebHome/";

/// Request body of the grid search endpoint
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GridRequest {
    /// Numeric facility identifier
    pub facility_id: u64,
    /// First night, formatted with [`API_DATE_FORMAT`]
    pub start_date: String,
    /// Last night, formatted with [`API_DATE_FORMAT`]
    pub end_date: String,
}

impl GridRequest {
    /// Build a request for the nights from `start` to `end`
    pub fn new(facility_id: u64, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            facility_id,
            start_date: start.format(API_DATE_FORMAT).to_string(),
            end_date: end.format(API_DATE_FORMAT).to_string(),
        }
    }
}

/// Response of the grid search endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GridResponse {
    /// Last date actually covered by this response, ISO formatted
    pub end_date: String,
    /// Missing when the facility does not exist
    pub facility: Option<Facility>,
}

impl GridResponse {
    /// Parse the last covered date
    pub fn actual_end_date(&self) -> Result<NaiveDate, ScanError> {
        parse_iso_day(&self.end_date)
            .ok_or_else(|| ScanError::DataFormat(format!("Invalid EndDate: {}", self.end_date)))
    }
}

/// A campground in ReserveCalifornia terms
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Facility {
    /// Numeric facility identifier
    pub facility_id: Option<u64>,
    /// Display name
    pub name: String,
    /// Bookable units keyed by unit id
    pub units: Option<BTreeMap<String, Unit>>,
}

/// A single bookable unit (campsite)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Unit {
    /// Numeric unit identifier
    pub unit_id: u64,
    /// Display name
    pub name: String,
    /// Availability per night, keyed by ISO date
    #[serde(default)]
    pub slices: BTreeMap<String, Slice>,
}

/// Availability of one unit for one night
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Slice {
    /// Whether the night can be booked
    pub is_free: bool,
}

impl Unit {
    /// Convert into the back-end independent campsite
    pub fn into_campsite(self) -> Campsite {
        let availabilities = self
            .slices
            .iter()
            .filter_map(|(date_str, slice)| match parse_iso_day(date_str) {
                Some(date) => Some(AvailabilityPoint::new(date, slice.is_free)),
                None => {
                    warn!("Failed to parse date: {}", date_str);
                    None
                }
            })
            .collect();

        Campsite {
            id: self.unit_id.to_string(),
            name: self.name,
            url: RESERVE_CA_BOOKING_URL.to_string(),
            availabilities,
        }
    }
}

/// Parse the day part of "2024-07-05" or "2024-07-05T00:00:00"
fn parse_iso_day(value: &str) -> Option<NaiveDate> {
    value
        .get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRID_RESPONSE: &str = r#"{
        "Message": "",
        "StartDate": "2024-07-05T00:00:00",
        "EndDate": "2024-07-07T00:00:00",
        "AvailableUnitsOnly": false,
        "Facility": {
            "FacilityId": 674,
            "Name": "Steep Ravine Campsites",
            "UnitCount": 2,
            "Units": {
                "31": {
                    "UnitId": 31,
                    "Name": "Campsite #1",
                    "IsAda": false,
                    "Slices": {
                        "2024-07-05": {"Date": "2024-07-05", "IsFree": true, "IsBlocked": false, "MinStay": 1},
                        "2024-07-06": {"Date": "2024-07-06", "IsFree": false, "IsBlocked": false, "MinStay": 1}
                    }
                },
                "32": {
                    "UnitId": 32,
                    "Name": "Cabin #2",
                    "Slices": {}
                }
            }
        }
    }"#;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, day).unwrap()
    }

    #[test]
    fn test_request_body() {
        let request = GridRequest::new(674, date(5), NaiveDate::from_ymd_opt(2024, 12, 25).unwrap());
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "FacilityId": 674,
                "StartDate": "7-5-2024",
                "EndDate": "12-25-2024"
            })
        );
    }

    #[test]
    fn test_parse_grid_response() {
        let response: GridResponse = serde_json::from_str(GRID_RESPONSE).unwrap();
        assert_eq!(response.actual_end_date().unwrap(), date(7));

        let facility = response.facility.unwrap();
        assert_eq!(facility.name, "Steep Ravine Campsites");

        let campsites: Vec<Campsite> = facility
            .units
            .unwrap()
            .into_values()
            .map(Unit::into_campsite)
            .collect();
        assert_eq!(campsites.len(), 2);
        assert_eq!(campsites[0].id, "31");
        assert_eq!(campsites[0].name, "Campsite #1");
        assert_eq!(campsites[0].url, RESERVE_CA_BOOKING_URL);
        assert_eq!(
            campsites[0].availabilities,
            vec![
                AvailabilityPoint::new(date(5), true),
                AvailabilityPoint::new(date(6), false),
            ]
        );
        assert!(campsites[1].availabilities.is_empty());
    }

    #[test]
    fn test_missing_facility() {
        let response: GridResponse =
            serde_json::from_str(r#"{"EndDate": "2024-07-07T00:00:00", "Facility": null}"#).unwrap();
        assert!(response.facility.is_none());
    }

    #[test]
    fn test_invalid_end_date() {
        let response: GridResponse =
            serde_json::from_str(r#"{"EndDate": "soon", "Facility": null}"#).unwrap();
        assert!(matches!(
            response.actual_end_date(),
            Err(ScanError::DataFormat(_))
        ));
    }
}
