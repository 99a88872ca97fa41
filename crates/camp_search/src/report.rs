use std::fmt::Write;

use availability::DateRange;
use campground_scan::SearchReport;
use chrono::{Datelike, NaiveDate, Weekday};

/// Full English name of a weekday
pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Short US date without padding, e.g. "7/5/2024"
pub fn format_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

/// "7/5/2024 to 7/7/2024"
pub fn format_range(range: &DateRange) -> String {
    format!("{} to {}", format_date(range.start), format_date(range.end))
}

/// Whole weeks from `today` until `date`, rounded to the nearest week
pub fn weeks_until(today: NaiveDate, date: NaiveDate) -> i64 {
    let days = (date - today).num_days();
    (days as f64 / 7.0).round() as i64
}

fn plural<'a>(count: i64, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}

/// Status line printed before the results
pub fn render_header(report: &SearchReport) -> String {
    let nights = i64::from(report.request.nights);
    format!(
        "Checking for sites at {} available on a {} for {} {}.\n",
        report.campground.name,
        weekday_name(report.request.start_weekday),
        nights,
        plural(nights, "night", "nights")
    )
}

/// Human readable list of itineraries
pub fn render_itineraries(report: &SearchReport, today: NaiveDate) -> String {
    let mut out = String::new();

    if report.itineraries.is_empty() {
        out.push_str("No sites found for the given constraints :(\n");
        return out;
    }

    let count = report.itineraries.len() as i64;
    // Writing to a String cannot fail
    let _ = writeln!(
        out,
        "Found {} matching {}:\n",
        count,
        plural(count, "itinerary", "itineraries")
    );

    for itinerary in &report.itineraries {
        let weeks = weeks_until(today, itinerary.range.start);
        let _ = writeln!(
            out,
            "{} (in {} {}):",
            format_range(&itinerary.range),
            weeks,
            plural(weeks, "week", "weeks")
        );
        for site in &itinerary.sites {
            let _ = writeln!(out, "- {} {}", site.name(), site.url());
        }
    }

    out
}

/// Header, blank line and itineraries
pub fn render_report(report: &SearchReport, today: NaiveDate) -> String {
    format!(
        "{}\n{}",
        render_header(report),
        render_itineraries(report, today)
    )
}
