//! Movie catalog API client module.
//!
//! Handles HTTP requests to the catalog `search` endpoint, either as a
//! keyword search by title or as the default genre listing.

mod api;
mod client;
mod descriptor;
mod types;

#[allow(clippy::module_name_repetitions)]
pub use api::{CatalogApi, LocalCatalogApi};
#[allow(clippy::module_name_repetitions)]
pub use client::{CatalogClient, CatalogClientBuilder, DEFAULT_API_HOST, DEFAULT_BASE_URL};
pub use descriptor::{DefaultListing, RequestDescriptor, SortOrder};
#[allow(clippy::module_name_repetitions)]
pub use types::{CatalogSearchResponse, PrimaryImage, RawMovieEntry};
