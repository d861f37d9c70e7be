//! `FetchPipeline` - executes request descriptors and commits outcomes.
//!
//! Each trigger issues a new [`Generation`] and sets the outcome to
//! `Loading`. The lookup then runs as its own task; when it resolves, the
//! outcome is committed only if its generation is still the current one.
//! Both the bump and the check happen inside the `watch` channel's write
//! lock, so a stale resolution can never land after a newer trigger.

use std::sync::Arc;

use anyhow::Result;
use moviefind_api::catalog::{CatalogApi, CatalogSearchResponse, RequestDescriptor};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::outcome::{FetchOutcome, SearchView};
use crate::record::MovieRecord;

/// Identifies one trigger. Strictly increasing within a pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    /// Returns the raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    const fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// State published to subscribers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSnapshot {
    /// Generation of the latest trigger.
    pub generation: Generation,
    /// Descriptor of the latest trigger.
    pub descriptor: Option<RequestDescriptor>,
    /// Outcome of the latest trigger.
    pub outcome: FetchOutcome,
}

impl SearchSnapshot {
    /// Projects the snapshot onto the presentation fields.
    #[must_use]
    pub fn view(&self) -> SearchView {
        self.outcome.view()
    }
}

/// A triggered lookup running in the background.
#[derive(Debug)]
pub struct PendingFetch {
    /// Generation issued for this lookup.
    pub generation: Generation,
    /// Task handle. Resolves to `true` if the outcome was committed.
    pub handle: JoinHandle<bool>,
}

impl PendingFetch {
    /// Waits for the lookup and reports whether its outcome was committed.
    ///
    /// A task that panicked or was aborted counts as not committed.
    pub async fn committed(self) -> bool {
        matches!(self.handle.await, Ok(true))
    }
}

/// Executes descriptors against a catalog API.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct FetchPipeline<A> {
    /// Catalog API.
    api: Arc<A>,
    /// Published state, shared with in-flight tasks.
    state: Arc<watch::Sender<SearchSnapshot>>,
}

impl<A> FetchPipeline<A> {
    /// Creates an idle pipeline.
    #[must_use]
    pub fn new(api: A) -> Self {
        Self::from_arc(Arc::new(api))
    }

    /// Creates an idle pipeline over a shared API handle.
    #[must_use]
    pub fn from_arc(api: Arc<A>) -> Self {
        let (state, _) = watch::channel(SearchSnapshot::default());
        Self {
            api,
            state: Arc::new(state),
        }
    }

    /// Returns the catalog API handle.
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.state.subscribe()
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> SearchSnapshot {
        self.state.borrow().clone()
    }

    /// Waits until the latest trigger has left `Loading`.
    pub async fn settled(&self) -> SearchSnapshot {
        let mut rx = self.state.subscribe();
        let settled = rx
            .wait_for(|snapshot| !snapshot.outcome.is_loading())
            .await
            .map(|snapshot| snapshot.clone());
        settled.unwrap_or_else(|_| self.snapshot())
    }

    /// Issues a new generation for `descriptor` and enters `Loading`.
    fn begin(&self, descriptor: &RequestDescriptor) -> Generation {
        let mut token = Generation::default();
        self.state.send_modify(|snapshot| {
            snapshot.generation = snapshot.generation.next();
            snapshot.descriptor = Some(descriptor.clone());
            snapshot.outcome = FetchOutcome::Loading;
            token = snapshot.generation;
        });
        tracing::debug!(generation = token.get(), %descriptor, "fetch triggered");
        token
    }
}

impl<A> FetchPipeline<A>
where
    A: CatalogApi + Sync + 'static,
{
    /// Triggers a lookup on the current Tokio runtime and returns at once.
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime.
    pub fn trigger(&self, descriptor: RequestDescriptor) -> PendingFetch {
        let generation = self.begin(&descriptor);
        let guard = CommitGuard::new(Arc::clone(&self.state), generation);
        let api = Arc::clone(&self.api);

        let handle = tokio::spawn(async move {
            let outcome = resolve(api.as_ref(), &descriptor).await;
            guard.commit(outcome)
        });

        PendingFetch { generation, handle }
    }

    /// Triggers a lookup and waits for it on the current task.
    ///
    /// Returns `true` if the outcome was committed.
    pub async fn run(&self, descriptor: RequestDescriptor) -> bool {
        let generation = self.begin(&descriptor);
        let guard = CommitGuard::new(Arc::clone(&self.state), generation);
        let outcome = resolve(self.api.as_ref(), &descriptor).await;
        guard.commit(outcome)
    }
}

/// Runs one lookup and classifies the result.
async fn resolve<A: CatalogApi>(api: &A, descriptor: &RequestDescriptor) -> FetchOutcome {
    classify(api.search(descriptor).await)
}

/// Maps a lookup result to an outcome.
///
/// Errors become `Failure` with the generic message; the error itself is
/// only logged.
#[must_use]
pub fn classify(result: Result<CatalogSearchResponse>) -> FetchOutcome {
    match result {
        Err(err) => {
            tracing::warn!("catalog lookup failed: {err:#}");
            FetchOutcome::failure()
        }
        Ok(response) if response.is_empty() => FetchOutcome::Empty,
        Ok(response) => {
            FetchOutcome::Success(response.results.iter().map(MovieRecord::from).collect())
        }
    }
}

/// Commits `outcome` if `token` is still the current generation.
fn commit(
    state: &watch::Sender<SearchSnapshot>,
    token: Generation,
    outcome: FetchOutcome,
) -> bool {
    state.send_if_modified(|snapshot| {
        if snapshot.generation != token {
            tracing::debug!(
                stale = token.get(),
                current = snapshot.generation.get(),
                "discarding stale outcome"
            );
            return false;
        }
        snapshot.outcome = outcome;
        true
    })
}

/// Leaves `Loading` even if the lookup never produces an outcome.
///
/// Dropping the guard without calling [`CommitGuard::commit`] (the task
/// panicked or was aborted) commits `Failure` for its generation.
#[derive(Debug)]
struct CommitGuard {
    state: Arc<watch::Sender<SearchSnapshot>>,
    token: Generation,
    armed: bool,
}

impl CommitGuard {
    const fn new(state: Arc<watch::Sender<SearchSnapshot>>, token: Generation) -> Self {
        Self {
            state,
            token,
            armed: true,
        }
    }

    fn commit(mut self, outcome: FetchOutcome) -> bool {
        self.armed = false;
        commit(&self.state, self.token, outcome)
    }
}

impl Drop for CommitGuard {
    fn drop(&mut self) {
        if self.armed {
            tracing::warn!(
                generation = self.token.get(),
                "fetch ended without an outcome"
            );
            commit(&self.state, self.token, FetchOutcome::failure());
        }
    }
}
