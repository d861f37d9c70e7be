//! Search state machine and fetch pipeline for moviefind.
//!
//! [`QueryController`] turns search text into a request descriptor,
//! [`FetchPipeline`] runs descriptors against the catalog and publishes
//! the outcome, and [`SearchSession`] connects the two.

mod controller;
mod outcome;
mod pipeline;
mod record;
mod session;

pub use controller::QueryController;
pub use outcome::{EMPTY_MESSAGE, FAILURE_MESSAGE, FetchOutcome, SearchView};
pub use pipeline::{FetchPipeline, Generation, PendingFetch, SearchSnapshot, classify};
pub use record::{MovieRecord, PLACEHOLDER_DESCRIPTION, PLACEHOLDER_IMAGE_URL};
pub use session::SearchSession;
