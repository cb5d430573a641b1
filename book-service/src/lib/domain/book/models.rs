use std::fmt;

use uuid::Uuid;

use crate::book::errors::BookIdError;
use crate::book::errors::RequiredFieldError;

/// Book record.
///
/// Persisted verbatim; no ownership ties a book to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: BookId,
    pub title: RequiredText,
    pub author: RequiredText,
    pub published_year: Option<i32>,
    pub genre: Option<String>,
}

/// Book unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookId(pub Uuid);

impl BookId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a book ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, BookIdError> {
        Uuid::parse_str(s)
            .map(BookId)
            .map_err(|e| BookIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Non-empty text value for the schema's required fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredText(String);

impl RequiredText {
    /// # Arguments
    /// * `field` - Field name reported on failure
    /// * `value` - Raw value, `None` when absent from the payload
    ///
    /// # Errors
    /// * `Missing` - Value is absent or blank
    pub fn new(field: &'static str, value: Option<String>) -> Result<Self, RequiredFieldError> {
        match value {
            Some(value) if !value.trim().is_empty() => Ok(Self(value)),
            _ => Err(RequiredFieldError::Missing(field)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequiredText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a book
#[derive(Debug, Clone)]
pub struct CreateBookCommand {
    pub title: RequiredText,
    pub author: RequiredText,
    pub published_year: Option<i32>,
    pub genre: Option<String>,
}

/// Command to update an existing book.
///
/// All fields are optional to support partial updates.
/// Only provided fields will be updated; `Some(None)` clears an optional field.
#[derive(Debug, Clone, Default)]
pub struct UpdateBookCommand {
    pub title: Option<RequiredText>,
    pub author: Option<RequiredText>,
    pub published_year: Option<Option<i32>>,
    pub genre: Option<Option<String>>,
}

impl UpdateBookCommand {
    /// Apply the provided fields to `book`.
    pub fn apply(self, book: &mut Book) {
        if let Some(title) = self.title {
            book.title = title;
        }
        if let Some(author) = self.author {
            book.author = author;
        }
        if let Some(published_year) = self.published_year {
            book.published_year = published_year;
        }
        if let Some(genre) = self.genre {
            book.genre = genre;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(field: &'static str, value: &str) -> RequiredText {
        RequiredText::new(field, Some(value.to_string())).unwrap()
    }

    #[test]
    fn test_required_text() {
        assert_eq!(
            RequiredText::new("title", None),
            Err(RequiredFieldError::Missing("title"))
        );
        assert_eq!(
            RequiredText::new("author", Some("   ".to_string())),
            Err(RequiredFieldError::Missing("author"))
        );
        assert_eq!(text("title", "Dune").as_str(), "Dune");
    }

    #[test]
    fn test_update_applies_only_provided_fields() {
        let mut book = Book {
            id: BookId::new(),
            title: text("title", "Dune"),
            author: text("author", "Frank Herbert"),
            published_year: Some(1965),
            genre: None,
        };

        UpdateBookCommand {
            genre: Some(Some("Science Fiction".to_string())),
            ..Default::default()
        }
        .apply(&mut book);

        assert_eq!(book.title.as_str(), "Dune");
        assert_eq!(book.author.as_str(), "Frank Herbert");
        assert_eq!(book.published_year, Some(1965));
        assert_eq!(book.genre.as_deref(), Some("Science Fiction"));
    }

    #[test]
    fn test_update_clears_optional_fields() {
        let mut book = Book {
            id: BookId::new(),
            title: text("title", "Dune"),
            author: text("author", "Frank Herbert"),
            published_year: Some(1965),
            genre: Some("Fiction".to_string()),
        };

        UpdateBookCommand {
            genre: Some(None),
            ..Default::default()
        }
        .apply(&mut book);

        assert_eq!(book.genre, None);
        assert_eq!(book.published_year, Some(1965));
    }
}
