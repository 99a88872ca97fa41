use std::collections::HashMap;

use chrono::NaiveDate;

use crate::types::{Itinerary, SiteMatches};

/// Group per-site matches into itineraries that share the same dates.
///
/// Ranges are bucketed by their `(start, end)` dates. Within a bucket sites keep the
/// order in which they were supplied. Buckets are returned sorted by check-in date;
/// the sort is stable, so ranges sharing a check-in date keep first-seen order.
pub fn consolidate_itineraries<S: Clone>(matches: &[SiteMatches<S>]) -> Vec<Itinerary<S>> {
    let mut index: HashMap<(NaiveDate, NaiveDate), usize> = HashMap::new();
    let mut itineraries: Vec<Itinerary<S>> = Vec::new();

    for site_matches in matches {
        for range in &site_matches.ranges {
            let slot = *index.entry(range.key()).or_insert_with(|| {
                itineraries.push(Itinerary {
                    range: *range,
                    sites: Vec::new(),
                });
                itineraries.len() - 1
            });
            itineraries[slot].sites.push(site_matches.site.clone());
        }
    }

    itineraries.sort_by_key(|itinerary| itinerary.range.start);
    itineraries
}
