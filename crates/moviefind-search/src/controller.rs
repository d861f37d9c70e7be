//! `QueryController` - holds the search text and derives the descriptor.

use moviefind_api::catalog::RequestDescriptor;

/// Owns the current search text.
///
/// Every call to [`QueryController::set_query`] recomputes the descriptor
/// synchronously. There is no debounce and no minimum length.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct QueryController {
    /// Current search text.
    query: String,
    /// Descriptor derived from `query`.
    descriptor: RequestDescriptor,
}

impl Default for QueryController {
    fn default() -> Self {
        Self::new("")
    }
}

impl QueryController {
    /// Creates a controller with an initial search text.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        let descriptor = RequestDescriptor::from_query(&query);
        Self { query, descriptor }
    }

    /// Returns the current search text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the descriptor for the current search text.
    #[must_use]
    pub const fn descriptor(&self) -> &RequestDescriptor {
        &self.descriptor
    }

    /// Replaces the search text.
    ///
    /// Returns the new descriptor when it differs from the previous one,
    /// `None` when nothing needs fetching.
    pub fn set_query(&mut self, query: impl Into<String>) -> Option<RequestDescriptor> {
        self.query = query.into();
        let descriptor = RequestDescriptor::from_query(&self.query);
        if descriptor == self.descriptor {
            return None;
        }
        self.descriptor = descriptor.clone();
        Some(descriptor)
    }
}
