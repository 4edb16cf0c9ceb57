//! Data models for the catalog

pub mod book;
pub mod response;

// Re-export commonly used types
pub use book::{Book, BookDto, Page, PageQuery, PageRequest, SortDirection, SortField};
pub use response::ApiResponse;
