use std::sync::Arc;

use async_trait::async_trait;

use crate::book::errors::BookError;
use crate::book::ports::BookRepository;
use crate::book::ports::BookServicePort;
use crate::domain::book::models::Book;
use crate::domain::book::models::BookId;
use crate::domain::book::models::CreateBookCommand;
use crate::domain::book::models::UpdateBookCommand;

/// Pass-through CRUD over the book repository.
pub struct BookService<BR>
where
    BR: BookRepository,
{
    repository: Arc<BR>,
}

impl<BR> BookService<BR>
where
    BR: BookRepository,
{
    pub fn new(repository: Arc<BR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<BR> BookServicePort for BookService<BR>
where
    BR: BookRepository,
{
    async fn create_book(&self, command: CreateBookCommand) -> Result<Book, BookError> {
        let book = Book {
            id: BookId::new(),
            title: command.title,
            author: command.author,
            published_year: command.published_year,
            genre: command.genre,
        };

        self.repository.create(book).await
    }

    async fn list_books(&self) -> Result<Vec<Book>, BookError> {
        self.repository.list_all().await
    }

    async fn get_book(&self, id: &BookId) -> Result<Book, BookError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| BookError::NotFound(id.to_string()))
    }

    async fn update_book(
        &self,
        id: &BookId,
        command: UpdateBookCommand,
    ) -> Result<Book, BookError> {
        let mut book = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| BookError::NotFound(id.to_string()))?;

        command.apply(&mut book);

        self.repository.update(book).await
    }

    async fn delete_book(&self, id: &BookId) -> Result<(), BookError> {
        self.repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::book::models::RequiredText;

    mock! {
        pub TestBookRepository {}

        #[async_trait]
        impl BookRepository for TestBookRepository {
            async fn create(&self, book: Book) -> Result<Book, BookError>;
            async fn list_all(&self) -> Result<Vec<Book>, BookError>;
            async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, BookError>;
            async fn update(&self, book: Book) -> Result<Book, BookError>;
            async fn delete(&self, id: &BookId) -> Result<(), BookError>;
        }
    }

    fn text(field: &'static str, value: &str) -> RequiredText {
        RequiredText::new(field, Some(value.to_string())).unwrap()
    }

    fn test_book(id: BookId) -> Book {
        Book {
            id,
            title: text("title", "Test Book"),
            author: text("author", "Test Author"),
            published_year: Some(2023),
            genre: Some("Fiction".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_book_success() {
        let mut repository = MockTestBookRepository::new();

        repository
            .expect_create()
            .withf(|book| {
                book.title.as_str() == "Test Book"
                    && book.author.as_str() == "Test Author"
                    && book.published_year == Some(2023)
            })
            .times(1)
            .returning(|book| Ok(book));

        let service = BookService::new(Arc::new(repository));

        let command = CreateBookCommand {
            title: text("title", "Test Book"),
            author: text("author", "Test Author"),
            published_year: Some(2023),
            genre: Some("Fiction".to_string()),
        };

        let book = service.create_book(command).await.unwrap();
        assert_eq!(book.genre.as_deref(), Some("Fiction"));
    }

    #[tokio::test]
    async fn test_list_books_database_error() {
        let mut repository = MockTestBookRepository::new();

        repository
            .expect_list_all()
            .times(1)
            .returning(|| Err(BookError::DatabaseError("Database error".to_string())));

        let service = BookService::new(Arc::new(repository));

        let result = service.list_books().await;
        assert!(matches!(result.unwrap_err(), BookError::DatabaseError(_)));
    }

    #[tokio::test]
    async fn test_get_book_success() {
        let mut repository = MockTestBookRepository::new();
        let book_id = BookId::new();
        let expected = test_book(book_id);

        let returned = expected.clone();
        repository
            .expect_find_by_id()
            .withf(move |id| *id == book_id)
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        let service = BookService::new(Arc::new(repository));

        let book = service.get_book(&book_id).await.unwrap();
        assert_eq!(book, expected);
    }

    #[tokio::test]
    async fn test_get_book_not_found() {
        let mut repository = MockTestBookRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = BookService::new(Arc::new(repository));

        let result = service.get_book(&BookId::new()).await;
        assert!(matches!(result.unwrap_err(), BookError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_book_success() {
        let mut repository = MockTestBookRepository::new();
        let book_id = BookId::new();

        let existing = test_book(book_id);
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        repository
            .expect_update()
            .withf(|book| {
                book.title.as_str() == "Updated Book" && book.author.as_str() == "Test Author"
            })
            .times(1)
            .returning(|book| Ok(book));

        let service = BookService::new(Arc::new(repository));

        let command = UpdateBookCommand {
            title: Some(text("title", "Updated Book")),
            ..Default::default()
        };

        let book = service.update_book(&book_id, command).await.unwrap();
        assert_eq!(book.title.as_str(), "Updated Book");
        assert_eq!(book.published_year, Some(2023));
    }

    #[tokio::test]
    async fn test_update_book_not_found() {
        let mut repository = MockTestBookRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_update().times(0);

        let service = BookService::new(Arc::new(repository));

        let result = service
            .update_book(&BookId::new(), UpdateBookCommand::default())
            .await;
        assert!(matches!(result.unwrap_err(), BookError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_book_not_found() {
        let mut repository = MockTestBookRepository::new();
        let book_id = BookId::new();

        repository
            .expect_delete()
            .withf(move |id| *id == book_id)
            .times(1)
            .returning(move |_| Err(BookError::NotFound(book_id.to_string())));

        let service = BookService::new(Arc::new(repository));

        let result = service.delete_book(&book_id).await;
        assert!(matches!(result.unwrap_err(), BookError::NotFound(_)));
    }
}
