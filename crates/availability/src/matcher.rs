use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::types::{AvailabilityPoint, DateRange};

/// Where the scan currently is while walking a site's availability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Looking for a night that starts on the requested weekday
    Idle,
    /// Inside a run of available nights that started on `start`
    Accumulating { start: NaiveDate, nights: u32 },
}

/// Find every stay of exactly `length_of_stay` nights that starts on `start_weekday`.
///
/// `availabilities` must be sorted by date (see [`crate::sort_chronologically`]).
/// The scan is a single pass that tracks at most one open stay at a time:
///
/// - an open stay closes as soon as it has enough nights; the next point is its
///   checkout day, and that day's own availability does not matter
/// - an unavailable or missing night abandons the open stay
/// - the point that closes or abandons a stay is never reused as a new check-in
///
/// A stay that is still open when the input runs out has no checkout day and is
/// not reported. A `length_of_stay` of zero never matches.
pub fn find_matching_stays(
    availabilities: &[AvailabilityPoint],
    start_weekday: Weekday,
    length_of_stay: u32,
) -> Vec<DateRange> {
    if length_of_stay == 0 {
        return Vec::new();
    }

    let (_, stays) = availabilities.iter().fold(
        (ScanState::Idle, Vec::new()),
        |(state, mut stays), point| {
            let next = match state {
                ScanState::Accumulating { start, nights } if nights >= length_of_stay => {
                    // Contiguous input makes this the current point's date.
                    if let Some(end) = start.checked_add_days(Days::new(length_of_stay.into())) {
                        stays.push(DateRange::new(start, end));
                    }
                    ScanState::Idle
                }
                ScanState::Accumulating { start, nights }
                    if point.is_available && is_next_night(start, nights, point.date) =>
                {
                    ScanState::Accumulating {
                        start,
                        nights: nights + 1,
                    }
                }
                ScanState::Accumulating { .. } => ScanState::Idle,
                ScanState::Idle if point.is_available && point.date.weekday() == start_weekday => {
                    ScanState::Accumulating {
                        start: point.date,
                        nights: 1,
                    }
                }
                ScanState::Idle => ScanState::Idle,
            };
            (next, stays)
        },
    );

    stays
}

/// Whether `date` directly follows the `nights` already counted from `start`
fn is_next_night(start: NaiveDate, nights: u32, date: NaiveDate) -> bool {
    start.checked_add_days(Days::new(nights.into())) == Some(date)
}
