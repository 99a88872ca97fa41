use campground_scan::{
    Campground, Campsite, CampsiteCollector, HttpConfig, ReservationApi, ScanError, build_client,
    error_for_status,
};
use chrono::{Days, Local, Months, NaiveDate};
use log::{debug, info, warn};
use reqwest::{Client, StatusCode};

use crate::types::{GridRequest, GridResponse, Unit};

/// Default base URL of the ReserveCalifornia API
pub const RESERVE_CA_BASE_URL: &str = "https://calirdr.usedirect.com";

/// Client for the ReserveCalifornia grid search API
pub struct ReserveCaClient {
    client: Client,
    base_url: String,
}

impl ReserveCaClient {
    /// Create a new ReserveCalifornia API client
    pub fn new(config: &HttpConfig) -> Result<Self, ScanError> {
        Self::with_base_url(config, RESERVE_CA_BASE_URL)
    }

    /// Create a client that talks to a different host, e.g. a local mirror
    pub fn with_base_url(config: &HttpConfig, base_url: &str) -> Result<Self, ScanError> {
        Ok(Self {
            client: build_client(config)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of the grid search endpoint
    pub fn grid_url(&self) -> String {
        format!("{}/rdr/rdr/search/grid", self.base_url)
    }

    /// Request the grid for one window of nights. `Ok(None)` when the facility is unknown.
    pub async fn get_grid(
        &self,
        facility_id: u64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<GridResponse>, ScanError> {
        let request = GridRequest::new(facility_id, start, end);
        debug!(
            "Requesting grid for facility {} from {} to {}",
            facility_id, request.start_date, request.end_date
        );

        let response = self.client.post(self.grid_url()).json(&request).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let grid: GridResponse = error_for_status(response).await?.json().await?;
        Ok(Some(grid))
    }

    /// Collect every unit's availability between `start` and `end`, one window at a time
    pub async fn get_campsites_between_dates(
        &self,
        campground_id: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Campsite>, ScanError> {
        let facility_id = parse_facility_id(campground_id)?;
        let mut collector = CampsiteCollector::new();
        let mut page_start = start;

        loop {
            let grid = self
                .get_grid(facility_id, page_start, end)
                .await?
                .ok_or_else(|| ScanError::CampgroundNotFound(campground_id.to_string()))?;
            let actual_end = grid.actual_end_date()?;

            let facility = grid
                .facility
                .ok_or_else(|| ScanError::CampgroundNotFound(campground_id.to_string()))?;
            facility
                .units
                .unwrap_or_default()
                .into_values()
                .map(Unit::into_campsite)
                .for_each(|campsite| collector.add(campsite));

            debug!("Grid covered {} to {}", page_start, actual_end);

            match next_page_start(page_start, end, actual_end) {
                Some(next) => page_start = next,
                None => break,
            }
        }

        info!(
            "Fetched {} campsites for facility {} between {} and {}",
            collector.len(),
            campground_id,
            start,
            end
        );
        Ok(collector.into_campsites())
    }
}

#[async_trait::async_trait]
impl ReservationApi for ReserveCaClient {
    fn provider_name(&self) -> &'static str {
        "ReserveCalifornia"
    }

    async fn get_campground(&self, campground_id: &str) -> Result<Option<Campground>, ScanError> {
        let facility_id = parse_facility_id(campground_id)?;
        let today = Local::now().date_naive();
        let tomorrow = today.checked_add_days(Days::new(1)).unwrap_or(today);

        let facility = self
            .get_grid(facility_id, today, tomorrow)
            .await?
            .and_then(|grid| grid.facility);

        Ok(facility.map(|facility| Campground {
            id: campground_id.to_string(),
            name: facility.name,
        }))
    }

    async fn get_campsites(
        &self,
        campground_id: &str,
        months_to_check: u32,
    ) -> Result<Vec<Campsite>, ScanError> {
        let start = Local::now().date_naive();
        let end = start
            .checked_add_months(Months::new(months_to_check))
            .ok_or_else(|| {
                ScanError::ConfigError(format!("Cannot look {} months ahead", months_to_check))
            })?;

        self.get_campsites_between_dates(campground_id, start, end)
            .await
    }
}

/// Where the next window starts, or `None` once `end` is covered.
///
/// A window that does not reach past its own start would repeat forever, so it
/// also ends pagination.
pub fn next_page_start(
    page_start: NaiveDate,
    end: NaiveDate,
    actual_end: NaiveDate,
) -> Option<NaiveDate> {
    if actual_end >= end {
        return None;
    }
    if actual_end < page_start {
        warn!(
            "Grid ended at {} before the requested start {}, stopping",
            actual_end, page_start
        );
        return None;
    }
    actual_end.checked_add_days(Days::new(1))
}

/// ReserveCalifornia facility ids are numeric
pub fn parse_facility_id(campground_id: &str) -> Result<u64, ScanError> {
    campground_id
        .trim()
        .parse()
        .map_err(|_| ScanError::InvalidCampgroundId(campground_id.to_string()))
}
