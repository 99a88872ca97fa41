use campground_scan::{
    Campground, Campsite, CampsiteCollector, HttpConfig, ReservationApi, ScanError, build_client,
    error_for_status,
};
use chrono::{Datelike, Local, Months, NaiveDate};
use log::{debug, info};
use reqwest::{Client, StatusCode};

use crate::types::{RecGovCampgroundResponse, RecGovCampsite, RecGovMonthResponse};

/// Default base URL of the recreation.gov internal API
pub const REC_GOV_BASE_URL: &str = "https://www.recreation.gov/api";

/// Client for interacting with recreation.gov API
pub struct RecGovClient {
    client: Client,
    base_url: String,
}

impl RecGovClient {
    /// Create a new recreation.gov API client
    pub fn new(config: &HttpConfig) -> Result<Self, ScanError> {
        Self::with_base_url(config, REC_GOV_BASE_URL)
    }

    /// Create a client that talks to a different host, e.g. a local mirror
    pub fn with_base_url(config: &HttpConfig, base_url: &str) -> Result<Self, ScanError> {
        Ok(Self {
            client: build_client(config)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of the campground details endpoint
    pub fn campground_url(&self, campground_id: &str) -> String {
        format!(
            "{}/camps/campgrounds/{}",
            self.base_url,
            urlencoding::encode(campground_id)
        )
    }

    /// URL of the monthly availability endpoint for the month starting at `month_start`
    pub fn month_url(&self, campground_id: &str, month_start: NaiveDate) -> String {
        let start_date = format!("{}T00:00:00.000Z", month_start.format("%Y-%m-%d"));
        format!(
            "{}/camps/availability/campground/{}/month?start_date={}",
            self.base_url,
            urlencoding::encode(campground_id),
            urlencoding::encode(&start_date)
        )
    }

    /// Fetch every campsite's availability for one calendar month
    pub async fn get_month_availability(
        &self,
        campground_id: &str,
        month_start: NaiveDate,
    ) -> Result<Vec<Campsite>, ScanError> {
        let url = self.month_url(campground_id, month_start);
        debug!("Making request to: {}", url);

        let response = self.client.get(&url).send().await?;
        debug!("API response status: {}", response.status());

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ScanError::CampgroundNotFound(campground_id.to_string()));
        }

        let month: RecGovMonthResponse = error_for_status(response).await?.json().await?;

        Ok(month
            .campsites
            .into_values()
            .map(RecGovCampsite::into_campsite)
            .collect())
    }
}

#[async_trait::async_trait]
impl ReservationApi for RecGovClient {
    fn provider_name(&self) -> &'static str {
        "recreation.gov"
    }

    async fn get_campground(&self, campground_id: &str) -> Result<Option<Campground>, ScanError> {
        let url = self.campground_url(campground_id);
        debug!("Getting campground details from {}", url);

        let response = self.client.get(&url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let details: RecGovCampgroundResponse = error_for_status(response).await?.json().await?;

        Ok(details.campground.map(|campground| Campground {
            id: campground_id.to_string(),
            name: campground.facility_name,
        }))
    }

    async fn get_campsites(
        &self,
        campground_id: &str,
        months_to_check: u32,
    ) -> Result<Vec<Campsite>, ScanError> {
        let mut collector = CampsiteCollector::new();

        for month_start in month_starts(Local::now().date_naive(), months_to_check) {
            let campsites = self.get_month_availability(campground_id, month_start).await?;
            debug!(
                "{} campsites returned for month starting {}",
                campsites.len(),
                month_start
            );
            campsites.into_iter().for_each(|campsite| collector.add(campsite));
        }

        info!(
            "Fetched {} campsites for campground {} over {} month(s)",
            collector.len(),
            campground_id,
            months_to_check
        );
        Ok(collector.into_campsites())
    }
}

/// First day of the current month followed by the next `months - 1` month starts
pub fn month_starts(today: NaiveDate, months: u32) -> Vec<NaiveDate> {
    let Some(first) = today.with_day(1) else {
        return Vec::new();
    };

    (0..months)
        .filter_map(|delta| first.checked_add_months(Months::new(delta)))
        .collect()
}
