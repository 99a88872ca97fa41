use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Booking state of one site for one night
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AvailabilityPoint {
    /// The night this point describes
    pub date: NaiveDate,
    /// Whether the site can be booked for that night
    pub is_available: bool,
}

impl AvailabilityPoint {
    /// Create a new availability point
    pub fn new(date: NaiveDate, is_available: bool) -> Self {
        Self { date, is_available }
    }
}

/// A candidate stay: check in on `start`, check out on `end`.
///
/// Every night in `[start, end)` is available. The checkout day itself is only a
/// boundary marker and may be booked by someone else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// Check-in date
    pub start: NaiveDate,
    /// Check-out date
    pub end: NaiveDate,
}

impl DateRange {
    /// Create a new date range
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Number of nights between check-in and check-out
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Canonical identity of the range, used for grouping
    pub fn key(&self) -> (NaiveDate, NaiveDate) {
        (self.start, self.end)
    }
}

/// A site together with the stays it can offer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteMatches<S> {
    /// The site the ranges belong to
    pub site: S,
    /// Matching stays in chronological order
    pub ranges: Vec<DateRange>,
}

/// One date range and every site that is free for all of it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Itinerary<S> {
    /// The shared stay
    pub range: DateRange,
    /// Sites available for the stay, in the order they were supplied
    pub sites: Vec<S>,
}

/// Map an ISO weekday number (1 = Monday .. 7 = Sunday) to a [`Weekday`]
pub fn weekday_from_iso(number: u32) -> Option<Weekday> {
    match number {
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        7 => Some(Weekday::Sun),
        _ => None,
    }
}

/// Sort availability points by date, oldest first.
///
/// Providers often hand back date-keyed maps, so their output has no reliable order.
pub fn sort_chronologically(points: &mut [AvailabilityPoint]) {
    points.sort_by_key(|point| point.date);
}
