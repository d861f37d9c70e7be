//! Catalog API response types.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserializes a field that may be missing, `null`, or of an unexpected
/// type. Anything that does not decode as `T` becomes `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// `primaryImage` field of a catalog entry.
///
/// Some upstream records carry an object with a `url` key, others a bare
/// URL string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PrimaryImage {
    /// Bare URL string.
    Url(String),
    /// Image object.
    Object {
        /// Image URL.
        #[serde(default, deserialize_with = "lenient")]
        url: Option<String>,
    },
}

impl PrimaryImage {
    /// Returns the image URL, if any.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Url(url) => Some(url.as_str()),
            Self::Object { url } => url.as_deref(),
        }
    }
}

/// A single raw entry of the `results` array.
///
/// Field names differ between catalog endpoints, so both spellings are
/// kept and resolved later.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMovieEntry {
    /// Title.
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    /// Primary title.
    #[serde(default, deserialize_with = "lenient")]
    pub primary_title: Option<String>,
    /// Poster image URL.
    #[serde(default, deserialize_with = "lenient")]
    pub image_url: Option<String>,
    /// Primary image.
    #[serde(default, deserialize_with = "lenient")]
    pub primary_image: Option<PrimaryImage>,
    /// Short description.
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    /// Storyline text.
    #[serde(default, deserialize_with = "lenient")]
    pub storyline: Option<String>,
}

/// Error body returned by the API gateway on non-success statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogErrorResponse {
    /// Error message.
    pub message: String,
}

/// Decoded `search` response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSearchResponse {
    /// Result entries. Empty when the payload had none.
    pub results: Vec<RawMovieEntry>,
}

impl CatalogSearchResponse {
    /// Extracts the result collection from a decoded JSON body.
    ///
    /// A body that is not an object, or whose `results` is missing or not
    /// an array, yields an empty response. Array items that are not
    /// objects are kept as entries with every field unset.
    #[must_use]
    pub fn from_json(body: Value) -> Self {
        let Value::Object(mut map) = body else {
            return Self::default();
        };
        let Some(Value::Array(items)) = map.remove("results") else {
            return Self::default();
        };

        let results = items
            .into_iter()
            .map(|item| {
                serde_json::from_value(item).unwrap_or_else(|err| {
                    tracing::debug!(%err, "catalog entry is not an object");
                    RawMovieEntry::default()
                })
            })
            .collect();

        Self { results }
    }

    /// Returns `true` if there are no result entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
