//! Book model, transport representation and pagination types

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::error::{describe_validation_errors, AppError, AppResult};

pub const DEFAULT_PAGE_SIZE: i64 = 10;
/// Largest page a client may request unless configured otherwise
pub const MAX_PAGE_SIZE: i64 = 100;
/// Decimal places kept by the `price` column
pub const PRICE_SCALE: u32 = 2;

/// Largest value the `NUMERIC(12, 2)` price column holds
pub fn max_price() -> Decimal {
    Decimal::new(999_999_999_999, PRICE_SCALE)
}

/// Persisted book record
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Book {
    /// Assigned by storage on insert; `None` for a record not yet saved
    pub id: Option<i32>,
    pub name: String,
    pub author: String,
    pub price: Decimal,
}

/// Book as exchanged over the API.
///
/// Every field is optional so the same shape serves creation (all of
/// `name`, `author` and `price` required) and partial updates (absent
/// fields keep their stored value).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct BookDto {
    /// Server-assigned identifier, ignored on input
    pub id: Option<i32>,
    #[validate(length(max = 255, message = "Name must be at most 255 characters"))]
    pub name: Option<String>,
    #[validate(length(max = 255, message = "Author must be at most 255 characters"))]
    pub author: Option<String>,
    #[schema(value_type = Option<f64>, example = 19.99)]
    pub price: Option<Decimal>,
}

impl BookDto {
    pub fn new(name: impl Into<String>, author: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            author: Some(author.into()),
            price: Some(price),
        }
    }

    /// Check a payload that creates a book: every field must be present
    pub fn validate_new(&self) -> AppResult<()> {
        self.check(true)
    }

    /// Check a partial-update payload: present fields must be well-formed
    pub fn validate_patch(&self) -> AppResult<()> {
        self.check(false)
    }

    fn check(&self, require_all: bool) -> AppResult<()> {
        let mut problems = Vec::new();

        if let Err(errors) = self.validate() {
            problems.push(describe_validation_errors(&errors));
        }
        check_text("name", "Name", self.name.as_deref(), require_all, &mut problems);
        check_text("author", "Author", self.author.as_deref(), require_all, &mut problems);
        match self.price {
            None if require_all => problems.push("price: Price is required".to_string()),
            Some(price) if price < Decimal::ZERO => {
                problems.push("price: Price must not be negative".to_string())
            }
            Some(price) if price > max_price() => problems.push(format!(
                "price: Price must not exceed {}",
                max_price()
            )),
            Some(price) if price.normalize().scale() > PRICE_SCALE => problems.push(format!(
                "price: Price must have at most {} decimal places",
                PRICE_SCALE
            )),
            _ => {}
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(problems.join("; ")))
        }
    }
}

fn check_text(
    field: &str,
    label: &str,
    value: Option<&str>,
    required: bool,
    problems: &mut Vec<String>,
) {
    match value {
        None if required => problems.push(format!("{}: {} is required", field, label)),
        Some(v) if v.trim().is_empty() => {
            problems.push(format!("{}: {} must not be blank", field, label))
        }
        _ => {}
    }
}

/// Columns a page may be sorted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Id,
    Name,
    Author,
    Price,
}

impl SortField {
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::Author => "author",
            SortField::Price => "price",
        }
    }
}

impl FromStr for SortField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(SortField::Id),
            "name" => Ok(SortField::Name),
            "author" => Ok(SortField::Author),
            "price" => Ok(SortField::Price),
            _ => Err(AppError::BadRequest(format!(
                "Invalid sort field '{}': expected one of id, name, author, price",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("asc") {
            Ok(SortDirection::Asc)
        } else if s.trim().eq_ignore_ascii_case("desc") {
            Ok(SortDirection::Desc)
        } else {
            Err(AppError::BadRequest(format!(
                "Invalid sort direction '{}': expected asc or desc",
                s
            )))
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Validated pagination request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index
    pub page: i64,
    pub size: i64,
    pub sort: SortField,
    pub direction: SortDirection,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: SortField::default(),
            direction: SortDirection::default(),
        }
    }
}

impl PageRequest {
    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }
}

/// Pagination query parameters
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Zero-based page number (default: 0)
    pub page: Option<i64>,
    /// Page size (default: 10, at most the configured maximum, 100 by default)
    pub size: Option<i64>,
    /// Sort field: id, name, author or price (default: id)
    pub sort_by: Option<String>,
    /// Sort direction: asc or desc, case-insensitive (default: asc)
    pub sort_dir: Option<String>,
}

impl PageQuery {
    /// Validate the raw parameters; `max_size` caps the page size
    pub fn into_request(self, max_size: i64) -> AppResult<PageRequest> {
        let page = self.page.unwrap_or(0);
        if page < 0 {
            return Err(AppError::BadRequest(
                "Page index must not be negative".to_string(),
            ));
        }

        let size = self.size.unwrap_or(DEFAULT_PAGE_SIZE);
        if size < 1 {
            return Err(AppError::BadRequest(
                "Page size must be at least 1".to_string(),
            ));
        }
        if size > max_size {
            return Err(AppError::BadRequest(format!(
                "Page size must not exceed {}",
                max_size
            )));
        }
        if page.checked_mul(size).is_none() {
            return Err(AppError::BadRequest("Page index is too large".to_string()));
        }

        let sort = match self.sort_by.as_deref() {
            Some(s) => s.parse()?,
            None => SortField::default(),
        };
        let direction = match self.sort_dir.as_deref() {
            Some(s) => s.parse()?,
            None => SortDirection::default(),
        };

        Ok(PageRequest {
            page,
            size,
            sort,
            direction,
        })
    }
}

/// A bounded slice of records plus paging metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: i64,
    pub size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
    pub first: bool,
    pub last: bool,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: i64) -> Self {
        let total_pages = if request.size > 0 {
            total_elements / request.size + i64::from(total_elements % request.size != 0)
        } else {
            0
        };

        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
            total_pages,
            first: request.page == 0,
            last: request.page >= total_pages.saturating_sub(1),
        }
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            first: self.first,
            last: self.last,
        }
    }
}
