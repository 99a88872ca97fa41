use std::collections::{BTreeMap, HashMap};

use availability::AvailabilityPoint;
use campground_scan::Campsite;
use chrono::NaiveDate;
use log::{debug, warn};
use serde::Deserialize;

/// Response structure from the campground details endpoint
#[derive(Debug, Deserialize)]
pub struct RecGovCampgroundResponse {
    /// Missing when the campground does not exist
    pub campground: Option<RecGovCampground>,
}

/// Campground details from recreation.gov
#[derive(Debug, Deserialize)]
pub struct RecGovCampground {
    /// Display name of the campground
    pub facility_name: String,
}

/// Response structure from the monthly availability endpoint
#[derive(Debug, Deserialize)]
pub struct RecGovMonthResponse {
    /// Campsites keyed by campsite id
    pub campsites: BTreeMap<String, RecGovCampsite>,
}

/// Availability of one campsite for one month
#[derive(Debug, Deserialize)]
pub struct RecGovCampsite {
    /// Campsite identifier, also used in the booking link
    pub campsite_id: String,

    /// Site number or label, e.g. "042"
    pub site: Option<String>,

    /// Loop the site belongs to
    #[serde(rename = "loop")]
    pub campsite_loop: Option<String>,

    /// Site type, e.g. "STANDARD NONELECTRIC"
    pub campsite_type: Option<String>,

    /// Status per night, keyed by timestamps like "2024-07-05T00:00:00Z"
    #[serde(default)]
    pub availabilities: HashMap<String, String>,
}

impl RecGovCampsite {
    /// Display name: site label followed by its loop
    pub fn display_name(&self) -> String {
        let site = self.site.as_deref().unwrap_or(&self.campsite_id);
        match self.campsite_loop.as_deref() {
            Some(campsite_loop) if !campsite_loop.is_empty() => {
                format!("{} ({})", site, campsite_loop)
            }
            _ => site.to_string(),
        }
    }

    /// Link to the campsite's booking page
    pub fn url(&self) -> String {
        format!(
            "https://www.recreation.gov/camping/campsites/{}",
            self.campsite_id
        )
    }

    /// Convert the raw status map into availability points, skipping unparseable dates
    pub fn availability_points(&self) -> Vec<AvailabilityPoint> {
        self.availabilities
            .iter()
            .filter_map(|(date_str, status)| {
                let date = date_str
                    .get(..10)
                    .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok());
                match date {
                    Some(date) => Some(AvailabilityPoint::new(date, is_available(status))),
                    None => {
                        warn!("Failed to parse date: {}", date_str);
                        None
                    }
                }
            })
            .collect()
    }

    /// Convert into the back-end independent campsite
    pub fn into_campsite(self) -> Campsite {
        Campsite {
            id: self.campsite_id.clone(),
            name: self.display_name(),
            url: self.url(),
            availabilities: self.availability_points(),
        }
    }
}

/// Whether a recreation.gov night status can be booked online
pub fn is_available(status: &str) -> bool {
    match status {
        "Available" => true,
        "Reserved"
        | "Not Available"
        | "Not Reservable"
        | "Not Reservable Management"
        | "Walk-up" => false,
        _ => {
            debug!("Unknown availability status: {}", status);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MONTH_RESPONSE: &str = r#"{
        "campsites": {
            "70002": {
                "availabilities": {
                    "2024-07-06T00:00:00Z": "Reserved",
                    "2024-07-05T00:00:00Z": "Available",
                    "bogus": "Available"
                },
                "campsite_id": "70002",
                "campsite_reserve_type": "Site-Specific",
                "campsite_type": "STANDARD NONELECTRIC",
                "capacity_rating": "Single",
                "loop": "Upper Pines",
                "max_num_people": 6,
                "min_num_people": 0,
                "quantities": null,
                "site": "002",
                "type_of_use": "Overnight"
            },
            "70001": {
                "availabilities": {
                    "2024-07-05T00:00:00Z": "Not Reservable Management"
                },
                "campsite_id": "70001",
                "loop": "",
                "site": "001"
            }
        }
    }"#;

    #[test]
    fn test_parse_month_response() {
        let response: RecGovMonthResponse = serde_json::from_str(MONTH_RESPONSE).unwrap();
        let campsites: Vec<Campsite> = response
            .campsites
            .into_values()
            .map(RecGovCampsite::into_campsite)
            .collect();

        assert_eq!(campsites.len(), 2);
        assert_eq!(campsites[0].id, "70001");
        assert_eq!(campsites[0].name, "001");
        assert_eq!(campsites[1].name, "002 (Upper Pines)");
        assert_eq!(
            campsites[1].url,
            "https://www.recreation.gov/camping/campsites/70002"
        );

        let mut points = campsites[1].availabilities.clone();
        availability::sort_chronologically(&mut points);
        assert_eq!(
            points,
            vec![
                AvailabilityPoint::new(NaiveDate::from_ymd_opt(2024, 7, 5).unwrap(), true),
                AvailabilityPoint::new(NaiveDate::from_ymd_opt(2024, 7, 6).unwrap(), false),
            ]
        );
        assert!(!campsites[0].availabilities[0].is_available);
    }

    #[test]
    fn test_parse_campground_response() {
        let found: RecGovCampgroundResponse =
            serde_json::from_str(r#"{"campground": {"facility_name": "UPPER PINES"}}"#).unwrap();
        assert_eq!(found.campground.unwrap().facility_name, "UPPER PINES");

        let missing: RecGovCampgroundResponse = serde_json::from_str("{}").unwrap();
        assert!(missing.campground.is_none());
    }

    #[test]
    fn test_is_available() {
        assert!(is_available("Available"));
        assert!(!is_available("Reserved"));
        assert!(!is_available("Not Available"));
        assert!(!is_available("Not Reservable"));
        assert!(!is_available("Not Reservable Management"));
        assert!(!is_available("Walk-up"));
        assert!(!is_available("unknown"));
    }

    #[test]
    fn test_display_name_without_site_label() {
        let campsite = RecGovCampsite {
            campsite_id: "123".to_string(),
            site: None,
            campsite_loop: Some("Loop B".to_string()),
            campsite_type: None,
            availabilities: HashMap::new(),
        };
        assert_eq!(campsite.display_name(), "123 (Loop B)");
    }
}
