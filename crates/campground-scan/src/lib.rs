//! # Campground Scan
//!
//! This crate connects reservation back-ends to the availability matcher.
//! It defines the capability every back-end provides, the shared error type,
//! the HTTP client setup the adapters use, and the search driver that turns a
//! campground's campsites into consolidated itineraries.

/// Error type shared by all back-ends
mod scan_types;
pub use scan_types::*;

/// Reservation back-end capability and the campground/campsite values it yields
mod provider;
pub use provider::*;

/// HTTP client construction for the back-end adapters
mod http_client;
pub use http_client::*;

/// Search driver: fetch, match and consolidate
mod search;
pub use search::*;
