//! Repository layer for database operations

pub mod books;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::book::{Book, Page, PageRequest},
};

pub use books::PgBookRepository;

/// Storage operations on the `books` table
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>>;

    /// All records, ordered by id
    async fn find_all(&self) -> AppResult<Vec<Book>>;

    async fn find_page(&self, request: PageRequest) -> AppResult<Page<Book>>;

    /// Case-insensitive substring match on name or author
    async fn search_by_name_or_author(&self, keyword: &str) -> AppResult<Vec<Book>>;

    async fn exists_by_name_and_author(&self, name: &str, author: &str) -> AppResult<bool>;

    async fn exists_by_id(&self, id: i32) -> AppResult<bool>;

    async fn count(&self) -> AppResult<i64>;

    /// Insert when `book.id` is `None`, otherwise overwrite the stored row
    async fn save(&self, book: Book) -> AppResult<Book>;

    /// Save every book in one transaction, returning them in input order
    async fn save_all(&self, books: Vec<Book>) -> AppResult<Vec<Book>>;

    /// Returns whether a row was removed
    async fn delete_by_id(&self, id: i32) -> AppResult<bool>;

    /// Returns the number of rows removed
    async fn delete_all(&self) -> AppResult<u64>;

    /// Round-trip to the database
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding the storage handles
#[derive(Clone)]
pub struct Repository {
    pub books: Arc<dyn BookRepository>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: Arc::new(PgBookRepository::new(pool)),
        }
    }

    /// Build a repository on top of any book storage
    pub fn with_books(books: Arc<dyn BookRepository>) -> Self {
        Self { books }
    }
}
