//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookstore Catalog API",
        version = "1.0.0",
        description = "Book catalog REST API. Every response body is an envelope \
                       `{ success, message, data }`; the documented body is the `data` payload."
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::create_book,
        books::create_books,
        books::get_all_books,
        books::get_books_paginated,
        books::get_book,
        books::update_book,
        books::delete_book,
        books::delete_all_books,
        books::search_books,
        books::book_exists,
    ),
    components(
        schemas(
            crate::models::book::BookDto,
            crate::models::book::PageQuery,
            books::SearchQuery,
            health::ReadinessStatus,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
