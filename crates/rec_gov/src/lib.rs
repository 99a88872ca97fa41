//! # RecGov
//!
//! This crate provides a client for the recreation.gov availability API.
//! Campground availability is fetched one calendar month per request.

/// Client for the recreation.gov campground and availability endpoints.
mod client;
pub use client::*;

/// Wire types of the recreation.gov API.
mod types;
pub use types::*;
