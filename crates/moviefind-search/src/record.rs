//! `MovieRecord` - normalized, display-ready catalog entry.

use moviefind_api::catalog::{PrimaryImage, RawMovieEntry};

/// Image shown when a record has no poster.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/300x450?text=No+Image";

/// Text shown when a record has no description.
pub const PLACEHOLDER_DESCRIPTION: &str = "No description available.";

/// A catalog entry mapped onto a fixed shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieRecord {
    /// Title. Empty when the entry carried none.
    pub title: String,
    /// Poster image URL.
    pub image_url: Option<String>,
    /// Description text.
    pub description: Option<String>,
}

impl MovieRecord {
    /// Returns the poster URL, or the placeholder image.
    #[must_use]
    pub fn image_url_or_placeholder(&self) -> &str {
        self.image_url.as_deref().unwrap_or(PLACEHOLDER_IMAGE_URL)
    }

    /// Returns the description, or the placeholder text.
    #[must_use]
    pub fn description_or_placeholder(&self) -> &str {
        self.description
            .as_deref()
            .unwrap_or(PLACEHOLDER_DESCRIPTION)
    }
}

/// First candidate that is present and non-empty.
fn first_present<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Option<&'a str> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
}

impl From<&RawMovieEntry> for MovieRecord {
    fn from(entry: &RawMovieEntry) -> Self {
        let title = first_present([entry.title.as_deref(), entry.primary_title.as_deref()]);
        let image_url = first_present([
            entry.image_url.as_deref(),
            entry.primary_image.as_ref().and_then(PrimaryImage::url),
        ]);
        let description =
            first_present([entry.description.as_deref(), entry.storyline.as_deref()]);

        Self {
            title: title.map(String::from).unwrap_or_default(),
            image_url: image_url.map(String::from),
            description: description.map(String::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefers_first_spelling() {
        // Arrange
        let entry = RawMovieEntry {
            title: Some(String::from("Heat")),
            primary_title: Some(String::from("Heat (1995)")),
            image_url: Some(String::from("https://example.com/a.jpg")),
            primary_image: Some(PrimaryImage::Url(String::from("https://example.com/b.jpg"))),
            description: Some(String::from("short")),
            storyline: Some(String::from("long")),
            ..RawMovieEntry::default()
        };

        // Act
        let record = MovieRecord::from(&entry);

        // Assert
        assert_eq!(record.title, "Heat");
        assert_eq!(record.image_url.as_deref(), Some("https://example.com/a.jpg"));
        assert_eq!(record.description.as_deref(), Some("short"));
    }

    #[test]
    fn test_falls_back_to_second_spelling() {
        // Arrange
        let entry = RawMovieEntry {
            primary_title: Some(String::from("The Matrix")),
            primary_image: Some(PrimaryImage::Object {
                url: Some(String::from("https://example.com/m.jpg")),
            }),
            storyline: Some(String::from("Neo wakes up.")),
            ..RawMovieEntry::default()
        };

        // Act
        let record = MovieRecord::from(&entry);

        // Assert
        assert_eq!(record.title, "The Matrix");
        assert_eq!(record.image_url.as_deref(), Some("https://example.com/m.jpg"));
        assert_eq!(record.description.as_deref(), Some("Neo wakes up."));
    }

    #[test]
    fn test_empty_string_counts_as_absent() {
        // Arrange
        let entry = RawMovieEntry {
            title: Some(String::new()),
            primary_title: Some(String::from("Fallback")),
            description: Some(String::new()),
            ..RawMovieEntry::default()
        };

        // Act
        let record = MovieRecord::from(&entry);

        // Assert
        assert_eq!(record.title, "Fallback");
        assert_eq!(record.description, None);
    }

    #[test]
    fn test_unresolved_fields_use_placeholders() {
        // Arrange & Act
        let record = MovieRecord::from(&RawMovieEntry::default());

        // Assert
        assert_eq!(record.title, "");
        assert_eq!(record.image_url_or_placeholder(), PLACEHOLDER_IMAGE_URL);
        assert_eq!(record.description_or_placeholder(), PLACEHOLDER_DESCRIPTION);
    }
}
