//! `RequestDescriptor` and URL construction for the `search` endpoint.

use std::fmt;

use anyhow::{Context, Result};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

/// Endpoint path, relative to the base URL.
const SEARCH_PATH: &str = "search";

/// Value of the `type` filter sent with every request.
const MEDIA_TYPE: &str = "movie";

/// Characters escaped in query keys and values: everything except
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )`, as `encodeURIComponent` does.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Sort direction of the default listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending (`ASC`).
    Asc,
    /// Descending (`DESC`).
    Desc,
}

impl SortOrder {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Parameters of the listing shown when no query is entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultListing {
    /// Genre filter.
    pub genre: String,
    /// Field to sort by.
    pub sort_field: String,
    /// Sort direction.
    pub sort_order: SortOrder,
    /// Maximum number of rows.
    pub limit: u32,
}

impl Default for DefaultListing {
    fn default() -> Self {
        Self {
            genre: String::from("Drama"),
            sort_field: String::from("id"),
            sort_order: SortOrder::Asc,
            limit: 10,
        }
    }
}

/// What to fetch from the catalog.
///
/// Derived from the search text with [`RequestDescriptor::from_query`];
/// it has no lifecycle of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestDescriptor {
    /// Keyword search by title.
    Search {
        /// Search text, sent verbatim.
        title: String,
    },
    /// Default genre listing.
    Default(DefaultListing),
}

impl RequestDescriptor {
    /// Derives the descriptor for a search text.
    ///
    /// The empty string selects the default listing. Anything else,
    /// whitespace included, is a title search.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        if query.is_empty() {
            Self::Default(DefaultListing::default())
        } else {
            Self::Search {
                title: String::from(query),
            }
        }
    }

    /// Returns `true` for a title search.
    #[must_use]
    pub const fn is_search(&self) -> bool {
        matches!(self, Self::Search { .. })
    }

    /// Returns the query parameters in wire order.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("type", String::from(MEDIA_TYPE))];
        match self {
            Self::Search { title } => {
                pairs.push(("title", title.clone()));
            }
            Self::Default(listing) => {
                pairs.push(("genre", listing.genre.clone()));
                pairs.push(("rows", listing.limit.to_string()));
                pairs.push(("sortOrder", String::from(listing.sort_order.as_str())));
                pairs.push(("sortField", listing.sort_field.clone()));
            }
        }
        pairs
    }

    /// Returns the percent-encoded query string, spaces as `%20`.
    #[must_use]
    pub fn query_string(&self) -> String {
        self.query_pairs()
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(key, COMPONENT),
                    utf8_percent_encode(value, COMPONENT)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Builds the full request URL against `base_url`.
    ///
    /// `base_url` should end with `/` so that `search` is appended to it
    /// rather than replacing its last segment. Any query on `base_url` is
    /// replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint path cannot be joined onto `base_url`.
    pub fn to_url(&self, base_url: &Url) -> Result<Url> {
        let mut url = base_url
            .join(SEARCH_PATH)
            .with_context(|| format!("failed to join URL path: {SEARCH_PATH}"))?;
        url.set_query(Some(&self.query_string()));
        Ok(url)
    }
}

impl fmt::Display for RequestDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Search { title } => write!(f, "search(title={title:?})"),
            Self::Default(listing) => write!(
                f,
                "default(genre={}, rows={}, sort={} {})",
                listing.genre,
                listing.limit,
                listing.sort_field,
                listing.sort_order.as_str(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn base() -> Url {
        Url::parse("https://imdb236.p.rapidapi.com/api/imdb/").unwrap()
    }

    #[test]
    fn test_empty_query_selects_default_listing() {
        // Arrange & Act
        let descriptor = RequestDescriptor::from_query("");

        // Assert
        assert_eq!(
            descriptor,
            RequestDescriptor::Default(DefaultListing::default())
        );
        assert!(!descriptor.is_search());
    }

    #[test]
    fn test_non_empty_query_selects_search() {
        // Arrange & Act
        let descriptor = RequestDescriptor::from_query("matrix");

        // Assert
        assert_eq!(
            descriptor,
            RequestDescriptor::Search {
                title: String::from("matrix")
            }
        );
    }

    #[test]
    fn test_whitespace_query_is_not_trimmed() {
        // Arrange & Act
        let descriptor = RequestDescriptor::from_query("  ");

        // Assert
        assert_eq!(
            descriptor,
            RequestDescriptor::Search {
                title: String::from("  ")
            }
        );
    }

    #[test]
    fn test_from_query_is_deterministic() {
        // Arrange
        let queries = ["", "a", "ab", "The Matrix", "すずめの戸締まり"];

        // Act & Assert
        for query in queries {
            assert_eq!(
                RequestDescriptor::from_query(query),
                RequestDescriptor::from_query(query)
            );
        }
    }

    #[test]
    fn test_default_url_exact() {
        // Arrange
        let descriptor = RequestDescriptor::from_query("");

        // Act
        let url = descriptor.to_url(&base()).unwrap();

        // Assert
        assert_eq!(
            url.as_str(),
            "https://imdb236.p.rapidapi.com/api/imdb/search?type=movie&genre=Drama&rows=10&sortOrder=ASC&sortField=id"
        );
    }

    #[test]
    fn test_search_url_contains_title() {
        // Arrange
        let descriptor = RequestDescriptor::from_query("matrix");

        // Act
        let url = descriptor.to_url(&base()).unwrap();

        // Assert
        assert_eq!(
            url.as_str(),
            "https://imdb236.p.rapidapi.com/api/imdb/search?type=movie&title=matrix"
        );
    }

    #[test]
    fn test_search_url_encodes_reserved_characters() {
        // Arrange
        let descriptor = RequestDescriptor::from_query("tom & jerry=1");

        // Act
        let url = descriptor.to_url(&base()).unwrap();

        // Assert
        assert_eq!(url.query(), Some("type=movie&title=tom%20%26%20jerry%3D1"));
        let title = url
            .query_pairs()
            .find(|(k, _)| k == "title")
            .map(|(_, v)| v.into_owned());
        assert_eq!(title.as_deref(), Some("tom & jerry=1"));
    }

    #[test]
    fn test_search_url_encodes_space_as_percent_20() {
        // Arrange
        let descriptor = RequestDescriptor::from_query("the matrix");

        // Act
        let url = descriptor.to_url(&base()).unwrap();

        // Assert
        assert_eq!(url.query(), Some("type=movie&title=the%20matrix"));
    }

    #[test]
    fn test_query_string_keeps_component_safe_marks() {
        // Arrange
        let descriptor = RequestDescriptor::from_query("the matrix's (1999)!*~");

        // Act
        let query = descriptor.query_string();

        // Assert
        assert_eq!(query, "type=movie&title=the%20matrix's%20(1999)!*~");
    }

    #[test]
    fn test_search_url_encodes_non_ascii_as_utf8() {
        // Arrange
        let descriptor = RequestDescriptor::from_query("amélie+");

        // Act
        let url = descriptor.to_url(&base()).unwrap();

        // Assert
        assert_eq!(url.query(), Some("type=movie&title=am%C3%A9lie%2B"));
        let title = url
            .query_pairs()
            .find(|(k, _)| k == "title")
            .map(|(_, v)| v.into_owned());
        assert_eq!(title.as_deref(), Some("amélie+"));
    }

    #[test]
    fn test_descending_listing_url() {
        // Arrange
        let descriptor = RequestDescriptor::Default(DefaultListing {
            sort_order: SortOrder::Desc,
            ..DefaultListing::default()
        });

        // Act
        let url = descriptor.to_url(&base()).unwrap();

        // Assert
        assert_eq!(
            url.query(),
            Some("type=movie&genre=Drama&rows=10&sortOrder=DESC&sortField=id")
        );
        assert_eq!(
            descriptor.to_string(),
            "default(genre=Drama, rows=10, sort=id DESC)"
        );
    }

    #[test]
    fn test_to_url_replaces_existing_query() {
        // Arrange
        let base = Url::parse("http://localhost:8080/api/imdb/?stale=1").unwrap();
        let descriptor = RequestDescriptor::from_query("x");

        // Act
        let url = descriptor.to_url(&base).unwrap();

        // Assert
        assert_eq!(url.as_str(), "http://localhost:8080/api/imdb/search?type=movie&title=x");
    }

    #[test]
    fn test_display() {
        // Arrange & Act & Assert
        assert_eq!(
            RequestDescriptor::from_query("ab").to_string(),
            "search(title=\"ab\")"
        );
        assert_eq!(
            RequestDescriptor::from_query("").to_string(),
            "default(genre=Drama, rows=10, sort=id ASC)"
        );
    }
}
