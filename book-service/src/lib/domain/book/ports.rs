use async_trait::async_trait;

use crate::book::errors::BookError;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::domain::book::models::CreateBookCommand;
use crate::domain::book::models::UpdateBookCommand;

/// Port for book domain service operations.
#[async_trait]
pub trait BookServicePort: Send + Sync + 'static {
    /// Create a book from a validated command.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_book(&self, command: CreateBookCommand) -> Result<Book, BookError>;

    /// List every stored book.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_books(&self) -> Result<Vec<Book>, BookError>;

    /// Retrieve a book by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_book(&self, id: &BookId) -> Result<Book, BookError>;

    /// Update the provided fields of a book.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_book(&self, id: &BookId, command: UpdateBookCommand)
        -> Result<Book, BookError>;

    /// Delete a book.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_book(&self, id: &BookId) -> Result<(), BookError>;
}

/// Persistence operations for books.
#[async_trait]
pub trait BookRepository: Send + Sync + 'static {
    /// Persist new book to storage.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, book: Book) -> Result<Book, BookError>;

    /// Retrieve all books from storage.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<Book>, BookError>;

    /// Retrieve book by identifier.
    ///
    /// # Returns
    /// Optional book (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, BookError>;

    /// Overwrite a stored book.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, book: Book) -> Result<Book, BookError>;

    /// Remove book from storage.
    ///
    /// # Errors
    /// * `NotFound` - Book does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &BookId) -> Result<(), BookError>;
}
