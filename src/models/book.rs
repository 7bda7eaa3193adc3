//! Book (catalog record) model and related types.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Availability status of a book's copy pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookStatus {
    Available,
    Borrowed,
    Reserved,
    Maintenance,
}

impl Default for BookStatus {
    fn default() -> Self {
        BookStatus::Available
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BookStatus::Available => "Available",
            BookStatus::Borrowed => "Borrowed",
            BookStatus::Reserved => "Reserved",
            BookStatus::Maintenance => "Maintenance",
        };
        write!(f, "{}", label)
    }
}

/// Full catalog record. Owned exclusively by the id index; every other
/// structure refers to it by `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub isbn: String,
    pub publication_year: i32,
    pub category: String,
    pub total_copies: u32,
    pub available_copies: u32,
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub status: BookStatus,
    /// Rolling arithmetic mean of all review ratings for this book.
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub borrow_count: u64,
}

impl Book {
    pub fn is_available(&self) -> bool {
        self.available_copies > 0 && self.status == BookStatus::Available
    }
}

/// Request payload for registering a new book.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewBook {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub isbn: String,
    #[serde(default)]
    pub publication_year: i32,
    pub category: String,
    #[validate(range(min = 1))]
    pub total_copies: u32,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub language: String,
}

impl From<NewBook> for Book {
    fn from(new: NewBook) -> Self {
        Book {
            id: new.id,
            title: new.title,
            author: new.author,
            publisher: new.publisher,
            isbn: new.isbn,
            publication_year: new.publication_year,
            category: new.category,
            total_copies: new.total_copies,
            available_copies: new.total_copies,
            location: new.location,
            description: new.description,
            pages: new.pages,
            language: new.language,
            status: BookStatus::Available,
            rating: 0.0,
            views: 0,
            borrow_count: 0,
        }
    }
}

/// Partial update for an existing book. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub publisher: Option<String>,
    pub isbn: Option<String>,
    pub publication_year: Option<i32>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub pages: Option<u32>,
    pub language: Option<String>,
    pub status: Option<BookStatus>,
}

/// Multi-criteria search filter. Empty strings and a zero year act as
/// wildcards; title and author are substring matches, category and year
/// are exact.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub year: i32,
}

impl SearchQuery {
    pub fn matches(&self, book: &Book) -> bool {
        let title_match = self.title.is_empty()
            || book.title.to_lowercase().contains(&self.title.to_lowercase());
        let author_match = self.author.is_empty()
            || book.author.to_lowercase().contains(&self.author.to_lowercase());
        let category_match = self.category.is_empty() || self.category == book.category;
        let year_match = self.year == 0 || book.publication_year == self.year;
        title_match && author_match && category_match && year_match
    }

    /// Human-readable form logged into the search history.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if !self.title.is_empty() {
            parts.push(format!("title~{}", self.title));
        }
        if !self.author.is_empty() {
            parts.push(format!("author~{}", self.author));
        }
        if !self.category.is_empty() {
            parts.push(format!("category={}", self.category));
        }
        if self.year != 0 {
            parts.push(format!("year={}", self.year));
        }
        if parts.is_empty() {
            "*".to_string()
        } else {
            parts.join(" ")
        }
    }
}
