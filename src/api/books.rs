//! Book catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{BookDto, Page, PageQuery},
        response::ApiResponse,
    },
    AppState,
};

/// Search query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Substring matched case-insensitively against name and author
    pub keyword: Option<String>,
}

/// Create a book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = BookDto,
    responses(
        (status = 201, description = "Book created", body = BookDto),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Book with same name and author already exists")
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    WithRejection(Json(dto), _): WithRejection<Json<BookDto>, AppError>,
) -> AppResult<(StatusCode, Json<ApiResponse<BookDto>>)> {
    dto.validate_new()?;
    let created = state.services.books.create_book(&dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Book created successfully", created)),
    ))
}

/// Create several books in one transaction
#[utoipa::path(
    post,
    path = "/books/batch",
    tag = "books",
    request_body = Vec<BookDto>,
    responses(
        (status = 201, description = "Books created", body = Vec<BookDto>),
        (status = 400, description = "Invalid input")
    )
)]
pub async fn create_books(
    State(state): State<AppState>,
    WithRejection(Json(dtos), _): WithRejection<Json<Vec<BookDto>>, AppError>,
) -> AppResult<(StatusCode, Json<ApiResponse<Vec<BookDto>>>)> {
    for (index, dto) in dtos.iter().enumerate() {
        dto.validate_new().map_err(|e| match e {
            AppError::Validation(msg) => AppError::Validation(format!("books[{}]: {}", index, msg)),
            other => other,
        })?;
    }

    let created = state.services.books.create_books(&dtos).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Books created successfully", created)),
    ))
}

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = Vec<BookDto>)
    )
)]
pub async fn get_all_books(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Vec<BookDto>>>> {
    let books = state.services.books.get_all_books().await?;
    Ok(Json(ApiResponse::success("Books retrieved successfully", books)))
}

/// List books one page at a time
#[utoipa::path(
    get,
    path = "/books/paginated",
    tag = "books",
    params(PageQuery),
    responses(
        (status = 200, description = "Page of books with totalElements/totalPages metadata", body = Vec<BookDto>),
        (status = 400, description = "Invalid paging parameters")
    )
)]
pub async fn get_books_paginated(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<PageQuery>, AppError>,
) -> AppResult<Json<ApiResponse<Page<BookDto>>>> {
    let request = query.into_request(state.config.pagination.max_size)?;
    let page = state.services.books.get_books_page(request).await?;
    Ok(Json(ApiResponse::success("Books retrieved successfully", page)))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookDto),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<ApiResponse<BookDto>>> {
    let book = state.services.books.get_book_by_id(id).await?;
    Ok(Json(ApiResponse::success("Book retrieved successfully", book)))
}

/// Update a book; absent fields keep their stored value
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = BookDto,
    responses(
        (status = 200, description = "Book updated", body = BookDto),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Book with same name and author already exists")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
    WithRejection(Json(dto), _): WithRejection<Json<BookDto>, AppError>,
) -> AppResult<Json<ApiResponse<BookDto>>> {
    dto.validate_patch()?;
    let updated = state.services.books.update_book(id, &dto).await?;
    Ok(Json(ApiResponse::success("Book updated successfully", updated)))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<ApiResponse<()>>> {
    state.services.books.delete_book(id).await?;
    Ok(Json(ApiResponse::empty("Book deleted successfully")))
}

/// Delete every book
#[utoipa::path(
    delete,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "Catalog emptied")
    )
)]
pub async fn delete_all_books(State(state): State<AppState>) -> AppResult<Json<ApiResponse<()>>> {
    state.services.books.delete_all_books().await?;
    Ok(Json(ApiResponse::empty("All books deleted successfully")))
}

/// Search books by name or author
#[utoipa::path(
    get,
    path = "/books/search",
    tag = "books",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching books", body = Vec<BookDto>),
        (status = 400, description = "Missing or blank keyword")
    )
)]
pub async fn search_books(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<SearchQuery>, AppError>,
) -> AppResult<Json<ApiResponse<Vec<BookDto>>>> {
    let books = state
        .services
        .books
        .search_books(query.keyword.as_deref())
        .await?;
    Ok(Json(ApiResponse::success("Search completed successfully", books)))
}

/// Check whether a book exists
#[utoipa::path(
    get,
    path = "/books/{id}/exists",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Whether the book exists", body = bool)
    )
)]
pub async fn book_exists(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, AppError>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let exists = state.services.books.book_exists(id).await?;
    Ok(Json(ApiResponse::success("Existence check completed", exists)))
}
