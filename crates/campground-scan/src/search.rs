use availability::{
    Itinerary, SiteMatches, consolidate_itineraries, find_matching_stays, sort_chronologically,
};
use chrono::Weekday;
use log::{debug, info};
use serde::Serialize;

use crate::provider::{Campground, Campsite, ReservationApi};
use crate::scan_types::ScanError;

/// What to look for at a campground
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    /// Back-end specific campground identifier
    pub campground_id: String,
    /// Check-in weekday
    pub start_weekday: Weekday,
    /// Number of nights to stay
    pub nights: u32,
    /// How many months ahead to check
    pub months: u32,
}

/// Result of a search, ready to be displayed
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    /// The campground that was searched
    pub campground: Campground,
    /// The request the report answers
    pub request: SearchRequest,
    /// Matching stays grouped by shared dates, earliest first
    pub itineraries: Vec<Itinerary<Campsite>>,
}

/// Look up the campground, fetch its campsites and consolidate every matching stay
pub async fn search(
    api: &dyn ReservationApi,
    request: &SearchRequest,
) -> Result<SearchReport, ScanError> {
    let campground = api
        .get_campground(&request.campground_id)
        .await?
        .ok_or_else(|| ScanError::CampgroundNotFound(request.campground_id.clone()))?;

    info!(
        "Searching {} on {} for {} night(s) starting {}",
        campground.name,
        api.provider_name(),
        request.nights,
        request.start_weekday
    );

    let campsites = api
        .get_campsites(&request.campground_id, request.months)
        .await?;
    let total_sites = campsites.len();

    let matches = match_campsites(campsites, request.start_weekday, request.nights);
    info!(
        "{} of {} campsites have at least one matching stay",
        matches.len(),
        total_sites
    );

    let itineraries = consolidate_itineraries(&matches);
    debug!("Consolidated into {} itineraries", itineraries.len());

    Ok(SearchReport {
        campground,
        request: request.clone(),
        itineraries,
    })
}

/// Run the matcher on every campsite and keep the ones with at least one stay
pub fn match_campsites(
    campsites: Vec<Campsite>,
    start_weekday: Weekday,
    nights: u32,
) -> Vec<SiteMatches<Campsite>> {
    campsites
        .into_iter()
        .filter_map(|campsite| {
            let mut availabilities = campsite.available_dates().to_vec();
            sort_chronologically(&mut availabilities);

            let ranges = find_matching_stays(&availabilities, start_weekday, nights);
            if ranges.is_empty() {
                return None;
            }

            debug!("{}: {} matching stay(s)", campsite.name(), ranges.len());
            Some(SiteMatches {
                site: campsite,
                ranges,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use availability::{AvailabilityPoint, DateRange};
    use chrono::NaiveDate;

    fn july(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, day).unwrap()
    }

    /// Campsite whose availability is given newest first, like a hash map might
    fn campsite(id: &str, free_days: &[u32], booked_days: &[u32]) -> Campsite {
        let mut availabilities: Vec<AvailabilityPoint> = free_days
            .iter()
            .map(|&d| AvailabilityPoint::new(july(d), true))
            .chain(booked_days.iter().map(|&d| AvailabilityPoint::new(july(d), false)))
            .collect();
        availabilities.sort_by(|a, b| b.date.cmp(&a.date));

        Campsite {
            id: id.to_string(),
            name: format!("{} (Loop A)", id),
            url: format!("https://example.com/campsites/{}", id),
            availabilities,
        }
    }

    struct MockReservationApi {
        campground: Option<Campground>,
        campsites: Vec<Campsite>,
    }

    #[async_trait::async_trait]
    impl ReservationApi for MockReservationApi {
        fn provider_name(&self) -> &'static str {
            "mock"
        }

        async fn get_campground(
            &self,
            _campground_id: &str,
        ) -> Result<Option<Campground>, ScanError> {
            Ok(self.campground.clone())
        }

        async fn get_campsites(
            &self,
            _campground_id: &str,
            _months_to_check: u32,
        ) -> Result<Vec<Campsite>, ScanError> {
            Ok(self.campsites.clone())
        }
    }

    struct FailingReservationApi;

    #[async_trait::async_trait]
    impl ReservationApi for FailingReservationApi {
        fn provider_name(&self) -> &'static str {
            "failing"
        }

        async fn get_campground(
            &self,
            campground_id: &str,
        ) -> Result<Option<Campground>, ScanError> {
            Ok(Some(Campground {
                id: campground_id.to_string(),
                name: "Broken Creek".to_string(),
            }))
        }

        async fn get_campsites(
            &self,
            _campground_id: &str,
            _months_to_check: u32,
        ) -> Result<Vec<Campsite>, ScanError> {
            Err(ScanError::RateLimited)
        }
    }

    fn request() -> SearchRequest {
        SearchRequest {
            campground_id: "232447".to_string(),
            start_weekday: Weekday::Fri,
            nights: 2,
            months: 1,
        }
    }

    fn upper_pines() -> Option<Campground> {
        Some(Campground {
            id: "232447".to_string(),
            name: "Upper Pines".to_string(),
        })
    }

    #[tokio::test]
    async fn test_search_consolidates_matching_sites() {
        let api = MockReservationApi {
            campground: upper_pines(),
            campsites: vec![
                campsite("001", &[5, 6, 7, 12, 13], &[14]),
                campsite("002", &[6, 7, 8], &[5]),
                campsite("003", &[5, 6], &[7]),
            ],
        };

        let report = search(&api, &request()).await.unwrap();

        assert_eq!(report.campground.name, "Upper Pines");
        assert_eq!(report.request, request());

        let ranges: Vec<DateRange> = report.itineraries.iter().map(|i| i.range).collect();
        assert_eq!(
            ranges,
            vec![
                DateRange::new(july(5), july(7)),
                DateRange::new(july(12), july(14)),
            ]
        );

        let first: Vec<&str> = report.itineraries[0]
            .sites
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(first, vec!["001", "003"]);
        assert_eq!(report.itineraries[1].sites[0].id, "001");
    }

    #[tokio::test]
    async fn test_search_unknown_campground() {
        let api = MockReservationApi {
            campground: None,
            campsites: Vec::new(),
        };

        let error = search(&api, &request()).await.unwrap_err();
        assert!(matches!(error, ScanError::CampgroundNotFound(ref id) if id == "232447"));
    }

    #[tokio::test]
    async fn test_search_without_matches_is_empty() {
        let api = MockReservationApi {
            campground: upper_pines(),
            campsites: vec![campsite("001", &[6, 7, 8], &[5])],
        };

        let report = search(&api, &request()).await.unwrap();
        assert!(report.itineraries.is_empty());
    }

    #[tokio::test]
    async fn test_search_propagates_provider_errors() {
        let error = search(&FailingReservationApi, &request())
            .await
            .unwrap_err();
        assert!(matches!(error, ScanError::RateLimited));
    }

    #[test]
    fn test_match_campsites_drops_sites_without_stays() {
        let matches = match_campsites(
            vec![campsite("001", &[5, 6], &[7]), campsite("002", &[5], &[6, 7])],
            Weekday::Fri,
            2,
        );

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].site.id, "001");
        assert_eq!(matches[0].ranges, vec![DateRange::new(july(5), july(7))]);
    }
}
