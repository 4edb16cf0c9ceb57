//! PostgreSQL storage for books

use async_trait::async_trait;
use sqlx::{Executor, Pool, Postgres};

use super::BookRepository;
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, Page, PageRequest, SortField},
};

const BOOK_COLUMNS: &str = "id, name, author, price";

#[derive(Clone)]
pub struct PgBookRepository {
    pool: Pool<Postgres>,
}

impl PgBookRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Insert or overwrite one book on the given executor
async fn save_on<'e, E>(executor: E, book: Book) -> AppResult<Book>
where
    E: Executor<'e, Database = Postgres>,
{
    match book.id {
        None => {
            let row = sqlx::query_as::<_, Book>(
                r#"
                INSERT INTO books (name, author, price)
                VALUES ($1, $2, $3)
                RETURNING id, name, author, price
                "#,
            )
            .bind(&book.name)
            .bind(&book.author)
            .bind(book.price)
            .fetch_one(executor)
            .await?;
            Ok(row)
        }
        Some(id) => sqlx::query_as::<_, Book>(
            r#"
            UPDATE books SET name = $1, author = $2, price = $3
            WHERE id = $4
            RETURNING id, name, author, price
            "#,
        )
        .bind(&book.name)
        .bind(&book.author)
        .bind(book.price)
        .bind(id)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book not found with ID: {}", id))),
    }
}

/// ORDER BY clause for a page. Identifiers come from a closed set, never from input text.
fn order_clause(request: &PageRequest) -> String {
    let direction = request.direction.as_sql();
    match request.sort {
        SortField::Id => format!("ORDER BY id {}", direction),
        other => format!("ORDER BY {} {}, id {}", other.column(), direction, direction),
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let book = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books WHERE id = $1",
            BOOK_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(book)
    }

    async fn find_all(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books ORDER BY id",
            BOOK_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_page(&self, request: PageRequest) -> AppResult<Page<Book>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;

        let query = format!(
            "SELECT {} FROM books {} LIMIT $1 OFFSET $2",
            BOOK_COLUMNS,
            order_clause(&request)
        );
        let rows = sqlx::query_as::<_, Book>(&query)
            .bind(request.size)
            .bind(request.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(Page::new(rows, &request, total))
    }

    async fn search_by_name_or_author(&self, keyword: &str) -> AppResult<Vec<Book>> {
        // strpos rather than LIKE so '%' and '_' in the keyword match literally
        let rows = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, name, author, price FROM books
            WHERE strpos(lower(name), lower($1)) > 0
               OR strpos(lower(author), lower($1)) > 0
            ORDER BY id
            "#,
        )
        .bind(keyword)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn exists_by_name_and_author(&self, name: &str, author: &str) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM books WHERE name = $1 AND author = $2)",
        )
        .bind(name)
        .bind(author)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn exists_by_id(&self, id: i32) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn save(&self, book: Book) -> AppResult<Book> {
        save_on(&self.pool, book).await
    }

    async fn save_all(&self, books: Vec<Book>) -> AppResult<Vec<Book>> {
        let mut tx = self.pool.begin().await?;
        let mut saved = Vec::with_capacity(books.len());
        for book in books {
            saved.push(save_on(&mut *tx, book).await?);
        }
        tx.commit().await?;
        Ok(saved)
    }

    async fn delete_by_id(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM books")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
