use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::CreateBookCommand;
use crate::domain::book::models::RequiredText;
use crate::domain::book::ports::BookServicePort;
use crate::inbound::http::router::AppState;

pub async fn create_book(
    State(state): State<AppState>,
    Json(body): Json<BookRequestBody>,
) -> Result<ApiSuccess<BookData>, ApiError> {
    state
        .book_service
        .create_book(body.try_into_create_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref book| ApiSuccess::new(StatusCode::CREATED, book.into()))
}

/// HTTP request body for creating or updating a book (raw JSON).
///
/// Optional fields distinguish an absent key (`None`) from an explicit
/// `null` (`Some(None)`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRequestBody {
    pub title: Option<String>,
    pub author: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub published_year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    pub genre: Option<Option<String>>,
}

fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl BookRequestBody {
    fn try_into_create_command(self) -> Result<CreateBookCommand, BookError> {
        Ok(CreateBookCommand {
            title: RequiredText::new("title", self.title)?,
            author: RequiredText::new("author", self.author)?,
            published_year: self.published_year.flatten(),
            genre: self.genre.flatten(),
        })
    }
}

/// Book as rendered in responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookData {
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
}

impl From<&Book> for BookData {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.to_string(),
            title: book.title.as_str().to_string(),
            author: book.author.as_str().to_string(),
            published_year: book.published_year,
            genre: book.genre.clone(),
        }
    }
}
