//! `FetchOutcome` and its projection onto the observable view fields.

use crate::record::MovieRecord;

/// Message shown when a lookup succeeded but returned nothing.
pub const EMPTY_MESSAGE: &str = "No movies found.";

/// Message shown when a lookup failed.
pub const FAILURE_MESSAGE: &str = "Failed to fetch movies. Please try again later.";

/// Classification of one fetch attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Nothing has been triggered yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The lookup returned at least one entry.
    Success(Vec<MovieRecord>),
    /// The lookup succeeded with nothing to show.
    Empty,
    /// The lookup failed. Holds the user-facing message.
    Failure(String),
}

impl FetchOutcome {
    /// Builds a failure carrying the generic user-facing message.
    #[must_use]
    pub fn failure() -> Self {
        Self::Failure(String::from(FAILURE_MESSAGE))
    }

    /// Returns `true` while a request is in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns `true` for `Success`, `Empty` and `Failure`.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Empty | Self::Failure(_))
    }

    /// Projects the outcome onto the fields read by the presentation layer.
    #[must_use]
    pub fn view(&self) -> SearchView {
        match self {
            Self::Idle => SearchView::default(),
            Self::Loading => SearchView {
                is_loading: true,
                ..SearchView::default()
            },
            Self::Success(movies) => SearchView {
                movies: movies.clone(),
                ..SearchView::default()
            },
            Self::Empty => SearchView {
                error_message: String::from(EMPTY_MESSAGE),
                ..SearchView::default()
            },
            Self::Failure(message) => SearchView {
                error_message: message.clone(),
                ..SearchView::default()
            },
        }
    }
}

/// The three fields consumed by the presentation layer.
///
/// At most one of `is_loading`, a non-empty `error_message`, or a
/// non-empty `movies` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchView {
    /// A request is in flight.
    pub is_loading: bool,
    /// Message to show instead of results. Empty when there is none.
    pub error_message: String,
    /// Records to show.
    pub movies: Vec<MovieRecord>,
}
