//! API client library for moviefind.
//!
//! Provides a client for the RapidAPI IMDb movie catalog.

/// Movie catalog API client.
pub mod catalog;
