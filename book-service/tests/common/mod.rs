use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use axum::body::Body;
use axum::http::header;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use book_service::book::errors::BookError;
use book_service::book::models::Book;
use book_service::book::models::BookId;
use book_service::book::ports::BookRepository;
use book_service::domain::book::service::BookService;
use book_service::domain::user::service::UserService;
use book_service::inbound::http::router::create_router;
use book_service::user::errors::UserError;
use book_service::user::models::User;
use book_service::user::models::Username;
use book_service::user::ports::UserRepository;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Credential store keeping users in memory, unique by username
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn get(&self, username: &str) -> Option<User> {
        self.users.lock().unwrap().get(username).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        let key = user.username.as_str().to_string();
        if users.contains_key(&key) {
            return Err(UserError::UsernameAlreadyExists(key));
        }
        users.insert(key, user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().unwrap().get(username.as_str()).cloned())
    }
}

/// Credential store whose every call fails like an unreachable database
pub struct UnavailableUserRepository;

#[async_trait]
impl UserRepository for UnavailableUserRepository {
    async fn create(&self, _user: User) -> Result<User, UserError> {
        Err(UserError::DatabaseError("connection refused".to_string()))
    }

    async fn find_by_username(&self, _username: &Username) -> Result<Option<User>, UserError> {
        Err(UserError::DatabaseError("connection refused".to_string()))
    }
}

/// Book store keeping insertion order in memory
#[derive(Default)]
pub struct InMemoryBookRepository {
    books: Mutex<Vec<Book>>,
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn create(&self, book: Book) -> Result<Book, BookError> {
        self.books.lock().unwrap().push(book.clone());
        Ok(book)
    }

    async fn list_all(&self) -> Result<Vec<Book>, BookError> {
        Ok(self.books.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: &BookId) -> Result<Option<Book>, BookError> {
        Ok(self
            .books
            .lock()
            .unwrap()
            .iter()
            .find(|book| book.id == *id)
            .cloned())
    }

    async fn update(&self, book: Book) -> Result<Book, BookError> {
        let mut books = self.books.lock().unwrap();
        let stored = books
            .iter_mut()
            .find(|stored| stored.id == book.id)
            .ok_or_else(|| BookError::NotFound(book.id.to_string()))?;
        *stored = book.clone();
        Ok(book)
    }

    async fn delete(&self, id: &BookId) -> Result<(), BookError> {
        let mut books = self.books.lock().unwrap();
        let before = books.len();
        books.retain(|book| book.id != *id);
        if books.len() == before {
            return Err(BookError::NotFound(id.to_string()));
        }
        Ok(())
    }
}

/// Response captured from the router
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub raw: String,
    pub body: Value,
}

/// Test application driving the real router in-process
pub struct TestApp {
    pub router: Router,
    pub users: Arc<InMemoryUserRepository>,
    pub authenticator: Arc<Authenticator>,
}

impl TestApp {
    pub fn spawn() -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let authenticator = Arc::new(Authenticator::new(JWT_SECRET));
        let router = Self::router_with(Arc::clone(&users), Arc::clone(&authenticator));

        Self {
            router,
            users,
            authenticator,
        }
    }

    /// Router whose credential store is unreachable
    pub fn spawn_with_unavailable_store() -> Router {
        Self::router_with(
            Arc::new(UnavailableUserRepository),
            Arc::new(Authenticator::new(JWT_SECRET)),
        )
    }

    fn router_with<UR: UserRepository>(users: Arc<UR>, authenticator: Arc<Authenticator>) -> Router {
        let books = Arc::new(InMemoryBookRepository::default());
        let user_service = Arc::new(UserService::new(users, Arc::clone(&authenticator)));
        let book_service = Arc::new(BookService::new(books));

        create_router(user_service, book_service, authenticator)
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        send(self.router.clone(), method, path, body, token).await
    }

    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request(Method::POST, path, Some(body), None).await
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Method::GET, path, None, None).await
    }

    /// Register then log in, returning the bearer token
    pub async fn register_and_login(&self, username: &str, password: &str) -> String {
        let credentials = serde_json::json!({ "username": username, "password": password });

        let response = self.post("/register", credentials.clone()).await;
        assert_eq!(response.status, StatusCode::CREATED);

        let response = self.post("/login", credentials).await;
        assert_eq!(response.status, StatusCode::OK);

        response.body["token"]
            .as_str()
            .expect("token missing from login response")
            .to_string()
    }
}

pub async fn send(
    router: Router,
    method: Method,
    path: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> TestResponse {
    let mut request = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = router
        .oneshot(request)
        .await
        .expect("Failed to execute request");

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("Failed to read response body")
        .to_bytes();
    let raw = String::from_utf8(bytes.to_vec()).expect("Response body is not UTF-8");
    let body = serde_json::from_str(&raw).unwrap_or(Value::Null);

    TestResponse { status, raw, body }
}
