//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::CatalogError;

/// Genre data for callers
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GenreRecord {
    pub id: i32,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Language data for callers
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LanguageRecord {
    pub id: i32,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Copy-status data for callers
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StatusRecord {
    pub id: i32,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Author data for callers
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AuthorRecord {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
    pub created_at: String,
    pub updated_at: String,
}

/// Book data with its author set resolved, in association order
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BookRecord {
    pub id: i32,
    pub title: String,
    pub genre_id: Option<i32>,
    pub language_id: Option<i32>,
    pub summary: String,
    pub isbn: String,
    pub authors: Vec<AuthorRecord>,
    pub created_at: String,
    pub updated_at: String,
}

/// Physical-copy data with referenced labels resolved for display
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BookInstanceRecord {
    pub id: i32,
    pub book_id: Option<i32>,
    pub inv_nom: Option<String>,
    pub imprint: String,
    pub status_id: Option<i32>,
    pub due_back: Option<NaiveDate>,
    pub book_title: Option<String>,
    pub status_name: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Input for creating an author
#[derive(Debug, Clone, serde::Deserialize)]
pub struct NewAuthor {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Partial update for an author; outer `None` leaves the field untouched
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct AuthorPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<Option<NaiveDate>>,
    pub date_of_death: Option<Option<NaiveDate>>,
}

/// Input for creating a book; author associations are established
/// in the same transaction once the base row has an id
#[derive(Debug, Clone, serde::Deserialize)]
pub struct NewBook {
    pub title: String,
    pub genre_id: Option<i32>,
    pub language_id: Option<i32>,
    pub author_ids: Vec<i32>,
    pub summary: String,
    pub isbn: String,
}

/// Partial update for a book; `author_ids: Some(..)` replaces the whole set
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct BookPatch {
    pub title: Option<String>,
    pub genre_id: Option<Option<i32>>,
    pub language_id: Option<Option<i32>>,
    pub author_ids: Option<Vec<i32>>,
    pub summary: Option<String>,
    pub isbn: Option<String>,
}

/// Input for creating a physical copy
#[derive(Debug, Clone, serde::Deserialize)]
pub struct NewBookInstance {
    pub book_id: Option<i32>,
    pub inv_nom: Option<String>,
    pub imprint: String,
    pub status_id: Option<i32>,
    pub due_back: Option<NaiveDate>,
}

/// Partial update for a physical copy
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct BookInstancePatch {
    pub book_id: Option<Option<i32>>,
    pub inv_nom: Option<Option<String>>,
    pub imprint: Option<String>,
    pub status_id: Option<Option<i32>>,
    pub due_back: Option<Option<NaiveDate>>,
}

/// Filter criteria for book listings (admin list_filter: genre, author)
#[derive(Debug, Default, Clone)]
pub struct BookFilter {
    pub genre_id: Option<i32>,
    pub author_id: Option<i32>,
}

/// Filter criteria for copy listings (admin list_filter: book, status)
#[derive(Debug, Default, Clone)]
pub struct BookInstanceFilter {
    pub book_id: Option<i32>,
    pub status_id: Option<i32>,
}

/// Repository trait for the Genre lookup table
#[async_trait]
pub trait GenreRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<GenreRecord>, CatalogError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<GenreRecord>, CatalogError>;

    async fn create(&self, name: String) -> Result<GenreRecord, CatalogError>;

    async fn update(&self, id: i32, name: String) -> Result<GenreRecord, CatalogError>;

    /// Cascades to books of this genre and, transitively, their copies
    async fn delete(&self, id: i32) -> Result<(), CatalogError>;
}

/// Repository trait for the Language lookup table
#[async_trait]
pub trait LanguageRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<LanguageRecord>, CatalogError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<LanguageRecord>, CatalogError>;

    async fn create(&self, name: String) -> Result<LanguageRecord, CatalogError>;

    async fn update(&self, id: i32, name: String) -> Result<LanguageRecord, CatalogError>;

    /// Cascades to books in this language and, transitively, their copies
    async fn delete(&self, id: i32) -> Result<(), CatalogError>;
}

/// Repository trait for the copy-status lookup table
#[async_trait]
pub trait StatusRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<StatusRecord>, CatalogError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<StatusRecord>, CatalogError>;

    async fn create(&self, name: String) -> Result<StatusRecord, CatalogError>;

    async fn update(&self, id: i32, name: String) -> Result<StatusRecord, CatalogError>;

    /// Cascades to copies carrying this status
    async fn delete(&self, id: i32) -> Result<(), CatalogError>;
}

/// Repository trait for the Author entity
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<AuthorRecord>, CatalogError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<AuthorRecord>, CatalogError>;

    async fn create(&self, input: NewAuthor) -> Result<AuthorRecord, CatalogError>;

    async fn update(&self, id: i32, input: AuthorPatch) -> Result<AuthorRecord, CatalogError>;

    /// Removes only the book associations, never the books themselves
    async fn delete(&self, id: i32) -> Result<(), CatalogError>;
}

/// Repository trait for the Book entity
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn find_all(&self, filter: BookFilter) -> Result<Vec<BookRecord>, CatalogError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<BookRecord>, CatalogError>;

    async fn create(&self, input: NewBook) -> Result<BookRecord, CatalogError>;

    async fn update(&self, id: i32, input: BookPatch) -> Result<BookRecord, CatalogError>;

    /// Cascades to the book's physical copies
    async fn delete(&self, id: i32) -> Result<(), CatalogError>;
}

/// Repository trait for the BookInstance entity
#[async_trait]
pub trait BookInstanceRepository: Send + Sync {
    async fn find_all(
        &self,
        filter: BookInstanceFilter,
    ) -> Result<Vec<BookInstanceRecord>, CatalogError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<BookInstanceRecord>, CatalogError>;

    async fn create(&self, input: NewBookInstance) -> Result<BookInstanceRecord, CatalogError>;

    async fn update(
        &self,
        id: i32,
        input: BookInstancePatch,
    ) -> Result<BookInstanceRecord, CatalogError>;

    async fn delete(&self, id: i32) -> Result<(), CatalogError>;
}
