//! `CatalogApi` trait definition.
#![allow(clippy::future_not_send)]

use anyhow::Result;

use super::descriptor::RequestDescriptor;
use super::types::CatalogSearchResponse;

/// Movie catalog API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(CatalogApi: Send)]
pub trait LocalCatalogApi {
    /// Runs the lookup described by `descriptor`.
    ///
    /// Exactly one HTTP request is issued per call; there is no retry.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the server answers with a
    /// non-success status, or the body is not valid JSON.
    async fn search(&self, descriptor: &RequestDescriptor) -> Result<CatalogSearchResponse>;
}
