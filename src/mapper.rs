//! Conversions between the stored `Book` and the transport `BookDto`

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookDto},
};

impl From<&Book> for BookDto {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            name: Some(book.name.clone()),
            author: Some(book.author.clone()),
            price: Some(book.price),
        }
    }
}

impl From<Book> for BookDto {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            name: Some(book.name),
            author: Some(book.author),
            price: Some(book.price),
        }
    }
}

impl TryFrom<&BookDto> for Book {
    type Error = AppError;

    fn try_from(dto: &BookDto) -> Result<Self, Self::Error> {
        let missing = |field: &str| AppError::Validation(format!("{}: {} is required", field, field));

        Ok(Self {
            id: dto.id,
            name: dto.name.clone().ok_or_else(|| missing("name"))?,
            author: dto.author.clone().ok_or_else(|| missing("author"))?,
            price: dto.price.ok_or_else(|| missing("price"))?,
        })
    }
}

pub fn to_dto(book: &Book) -> BookDto {
    BookDto::from(book)
}

pub fn to_entity(dto: &BookDto) -> AppResult<Book> {
    Book::try_from(dto)
}

pub fn to_dto_list(books: &[Book]) -> Vec<BookDto> {
    books.iter().map(BookDto::from).collect()
}

pub fn to_entity_list(dtos: &[BookDto]) -> AppResult<Vec<Book>> {
    dtos.iter().map(Book::try_from).collect()
}

/// Copy the fields present in `dto` onto `book`. The id is never touched.
pub fn merge_into(dto: &BookDto, book: &mut Book) {
    if let Some(name) = &dto.name {
        book.name = name.clone();
    }
    if let Some(author) = &dto.author {
        book.author = author.clone();
    }
    if let Some(price) = dto.price {
        book.price = price;
    }
}
