//! `SearchSession` - feeds query changes into the fetch pipeline.

use moviefind_api::catalog::CatalogApi;
use tokio::sync::watch;

use crate::controller::QueryController;
use crate::pipeline::{FetchPipeline, PendingFetch, SearchSnapshot};

/// A query controller wired to a fetch pipeline.
///
/// Creating the session fires the initial lookup. Afterwards every
/// descriptor change reported by the controller fires exactly one more.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct SearchSession<A> {
    controller: QueryController,
    pipeline: FetchPipeline<A>,
}

impl<A> SearchSession<A>
where
    A: CatalogApi + Sync + 'static,
{
    /// Creates the session and triggers the lookup for `initial_query`.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn start(api: A, initial_query: impl Into<String>) -> Self {
        let controller = QueryController::new(initial_query);
        let pipeline = FetchPipeline::new(api);
        pipeline.trigger(controller.descriptor().clone());
        Self {
            controller,
            pipeline,
        }
    }

    /// Replaces the search text.
    ///
    /// Returns the triggered lookup, or `None` when the descriptor did not
    /// change.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn set_query(&mut self, query: impl Into<String>) -> Option<PendingFetch> {
        let descriptor = self.controller.set_query(query)?;
        Some(self.pipeline.trigger(descriptor))
    }
}

impl<A> SearchSession<A> {
    /// Returns the current search text.
    #[must_use]
    pub fn query(&self) -> &str {
        self.controller.query()
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.pipeline.subscribe()
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> SearchSnapshot {
        self.pipeline.snapshot()
    }

    /// Waits until the latest lookup has left `Loading`.
    pub async fn settled(&self) -> SearchSnapshot {
        self.pipeline.settled().await
    }
}
