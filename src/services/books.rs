//! Book catalog service

use crate::{
    error::{AppError, AppResult},
    mapper,
    models::book::{BookDto, Page, PageRequest},
    repository::Repository,
};

fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Book not found with ID: {}", id))
}

fn duplicate() -> AppError {
    AppError::Conflict("Book with same name and author already exists".to_string())
}

#[derive(Clone)]
pub struct BooksService {
    repository: Repository,
}

impl BooksService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a book, rejecting a (name, author) pair already in the catalog.
    ///
    /// The existence check and the insert are separate statements, so two
    /// concurrent requests for the same pair can both succeed.
    pub async fn create_book(&self, dto: &BookDto) -> AppResult<BookDto> {
        tracing::info!("Creating new book: {:?}", dto.name);

        let mut book = mapper::to_entity(dto)?;
        if self
            .repository
            .books
            .exists_by_name_and_author(&book.name, &book.author)
            .await?
        {
            return Err(duplicate());
        }

        book.id = None;
        let saved = self.repository.books.save(book).await?;

        tracing::info!("Book created successfully with ID: {:?}", saved.id);
        Ok(saved.into())
    }

    /// Create several books at once. No duplicate check is made; either all
    /// books are stored or none.
    pub async fn create_books(&self, dtos: &[BookDto]) -> AppResult<Vec<BookDto>> {
        tracing::info!("Creating {} books", dtos.len());

        if dtos.is_empty() {
            return Ok(Vec::new());
        }

        let mut books = mapper::to_entity_list(dtos)?;
        for book in &mut books {
            book.id = None;
        }

        let saved = self.repository.books.save_all(books).await?;
        tracing::info!("Successfully created {} books", saved.len());
        Ok(mapper::to_dto_list(&saved))
    }

    pub async fn get_all_books(&self) -> AppResult<Vec<BookDto>> {
        tracing::info!("Fetching all books");
        let books = self.repository.books.find_all().await?;
        Ok(mapper::to_dto_list(&books))
    }

    pub async fn get_books_page(&self, request: PageRequest) -> AppResult<Page<BookDto>> {
        tracing::info!(
            "Fetching books with pagination: page={}, size={}, sort={} {}",
            request.page,
            request.size,
            request.sort.column(),
            request.direction
        );
        let page = self.repository.books.find_page(request).await?;
        Ok(page.map(BookDto::from))
    }

    pub async fn get_book_by_id(&self, id: i32) -> AppResult<BookDto> {
        tracing::info!("Fetching book with ID: {}", id);
        self.repository
            .books
            .find_by_id(id)
            .await?
            .map(BookDto::from)
            .ok_or_else(|| not_found(id))
    }

    /// Merge the fields present in `dto` into the stored book.
    ///
    /// When the resulting (name, author) pair differs from the stored one it
    /// must not already belong to another book.
    pub async fn update_book(&self, id: i32, dto: &BookDto) -> AppResult<BookDto> {
        tracing::info!("Updating book with ID: {}", id);

        let mut book = self
            .repository
            .books
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))?;

        let name = dto.name.as_deref().unwrap_or(&book.name);
        let author = dto.author.as_deref().unwrap_or(&book.author);
        if (name != book.name || author != book.author)
            && self
                .repository
                .books
                .exists_by_name_and_author(name, author)
                .await?
        {
            return Err(duplicate());
        }

        mapper::merge_into(dto, &mut book);
        let updated = self.repository.books.save(book).await?;

        tracing::info!("Book updated successfully with ID: {}", id);
        Ok(updated.into())
    }

    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        tracing::info!("Deleting book with ID: {}", id);

        if !self.repository.books.exists_by_id(id).await? {
            return Err(not_found(id));
        }
        // Gone between the probe and the delete
        if !self.repository.books.delete_by_id(id).await? {
            return Err(not_found(id));
        }

        tracing::info!("Book deleted successfully with ID: {}", id);
        Ok(())
    }

    /// Empty the catalog, returning how many books were removed
    pub async fn delete_all_books(&self) -> AppResult<u64> {
        tracing::info!("Deleting all books");
        let count = self.repository.books.count().await?;
        tracing::debug!("{} books stored before deletion", count);
        let removed = self.repository.books.delete_all().await?;
        tracing::info!("Successfully deleted {} books", removed);
        Ok(removed)
    }

    pub async fn search_books(&self, keyword: Option<&str>) -> AppResult<Vec<BookDto>> {
        tracing::info!("Searching books with keyword: {:?}", keyword);

        let keyword = keyword.map(str::trim).unwrap_or_default();
        if keyword.is_empty() {
            return Err(AppError::BadRequest(
                "Search keyword cannot be empty".to_string(),
            ));
        }

        let books = self.repository.books.search_by_name_or_author(keyword).await?;
        Ok(mapper::to_dto_list(&books))
    }

    pub async fn book_exists(&self, id: i32) -> AppResult<bool> {
        self.repository.books.exists_by_id(id).await
    }
}
