//! # Availability
//!
//! This crate turns per-site, per-date availability records into bookable stays.
//! It finds contiguous runs of available nights that begin on a given weekday and
//! groups the runs of many sites into itineraries that share the same dates.
//!
//! Everything in here is pure and synchronous, so it can be called once per site
//! from any number of tasks at the same time.

/// Core data types: availability points, date ranges and itineraries.
mod types;
pub use types::*;

/// Matching of contiguous stays for a single site.
mod matcher;
pub use matcher::*;

/// Grouping of per-site matches into shared itineraries.
mod itinerary;
pub use itinerary::*;
