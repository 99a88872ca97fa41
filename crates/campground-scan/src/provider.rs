use std::collections::HashMap;

use availability::AvailabilityPoint;
use serde::{Deserialize, Serialize};

use crate::scan_types::ScanError;

/// A campground as reported by a reservation back-end
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campground {
    /// Back-end specific identifier
    pub id: String,
    /// Display name
    pub name: String,
}

/// A single bookable campsite and its per-night availability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campsite {
    /// Back-end specific identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Link to the site's booking page
    pub url: String,
    /// Availability as returned by the back-end, in no particular order
    pub availabilities: Vec<AvailabilityPoint>,
}

impl Campsite {
    /// Display name of the site
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Link to the site's booking page
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Availability as returned by the back-end; not sorted
    pub fn available_dates(&self) -> &[AvailabilityPoint] {
        &self.availabilities
    }
}

/// Capability every reservation back-end provides
#[async_trait::async_trait]
pub trait ReservationApi: Send + Sync {
    /// Short name of the back-end, used in log messages
    fn provider_name(&self) -> &'static str;

    /// Look up a campground. `Ok(None)` means the back-end does not know it.
    async fn get_campground(&self, campground_id: &str) -> Result<Option<Campground>, ScanError>;

    /// Fetch every campsite of a campground with availability for the next
    /// `months_to_check` months
    async fn get_campsites(
        &self,
        campground_id: &str,
        months_to_check: u32,
    ) -> Result<Vec<Campsite>, ScanError>;
}

/// Merges paginated responses into one [`Campsite`] per site id.
///
/// Back-ends return availability a month or a date window at a time. Merging the
/// pages lets a stay that crosses a page boundary match. Sites keep the order in
/// which they were first seen.
#[derive(Debug, Default)]
pub struct CampsiteCollector {
    campsites: Vec<Campsite>,
    index: HashMap<String, usize>,
}

impl CampsiteCollector {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one page worth of a site's availability
    pub fn add(&mut self, campsite: Campsite) {
        match self.index.get(&campsite.id) {
            Some(&slot) => self.campsites[slot]
                .availabilities
                .extend(campsite.availabilities),
            None => {
                self.index.insert(campsite.id.clone(), self.campsites.len());
                self.campsites.push(campsite);
            }
        }
    }

    /// Number of distinct sites collected so far
    pub fn len(&self) -> usize {
        self.campsites.len()
    }

    /// Whether nothing has been collected yet
    pub fn is_empty(&self) -> bool {
        self.campsites.is_empty()
    }

    /// Finish collecting
    pub fn into_campsites(self) -> Vec<Campsite> {
        self.campsites
    }
}
