use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::create_book::BookData;
use super::create_book::BookRequestBody;
use super::ApiError;
use super::ApiSuccess;
use crate::book::errors::BookError;
use crate::domain::book::models::BookId;
use crate::domain::book::models::RequiredText;
use crate::domain::book::models::UpdateBookCommand;
use crate::domain::book::ports::BookServicePort;
use crate::inbound::http::router::AppState;

impl BookRequestBody {
    fn try_into_update_command(self) -> Result<UpdateBookCommand, BookError> {
        // A provided title or author must still be non-empty
        let title = self
            .title
            .map(|title| RequiredText::new("title", Some(title)))
            .transpose()?;
        let author = self
            .author
            .map(|author| RequiredText::new("author", Some(author)))
            .transpose()?;

        Ok(UpdateBookCommand {
            title,
            author,
            published_year: self.published_year,
            genre: self.genre,
        })
    }
}

pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<BookRequestBody>,
) -> Result<ApiSuccess<BookData>, ApiError> {
    let book_id = BookId::from_string(&id).map_err(BookError::from)?;
    let command = body.try_into_update_command()?;

    state
        .book_service
        .update_book(&book_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref book| ApiSuccess::new(StatusCode::OK, book.into()))
}
