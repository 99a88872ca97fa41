//! # ReserveCA
//!
//! This crate provides a client for the ReserveCalifornia grid search API used by
//! California state parks. The API answers with a window of dates that may be
//! shorter than requested, so campsites are fetched page by page.

/// Client for the grid search endpoint.
mod client;
pub use client::*;

/// Wire types of the grid search endpoint.
mod types;
pub use types::*;
