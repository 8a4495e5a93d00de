//! SeaORM implementation of BookRepository
//!
//! Author associations live in the `book_authors` join table; they are
//! written in the same transaction as the base row since the book id does
//! not exist before the insert.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};

use crate::domain::{
    AuthorRecord, BookFilter, BookPatch, BookRecord, BookRepository, CatalogError, NewBook,
};
use crate::models::book::{ActiveModel, Entity as BookEntity, Model};
use crate::models::{author, book, book_authors, genre, language};

const TITLE_MAX: usize = 200;
const SUMMARY_MAX: usize = 1000;
const ISBN_LEN: usize = 13;

/// SeaORM-based implementation of BookRepository
pub struct SeaOrmBookRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Authors in association order (join rows are scanned in insertion
    /// order, which is the relation's natural order).
    async fn load_authors(&self, book_id: i32) -> Result<Vec<AuthorRecord>, CatalogError> {
        let links = book_authors::Entity::find()
            .filter(book_authors::Column::BookId.eq(book_id))
            .all(&self.db)
            .await?;

        let ids: Vec<i32> = links.into_iter().map(|link| link.author_id).collect();
        let positions: HashMap<i32, usize> = ids
            .iter()
            .enumerate()
            .map(|(position, id)| (*id, position))
            .collect();

        let mut authors = author::Entity::find()
            .filter(author::Column::Id.is_in(ids))
            .all(&self.db)
            .await?;
        authors.sort_by_key(|a| positions.get(&a.id).copied().unwrap_or(usize::MAX));

        Ok(authors
            .into_iter()
            .map(|a| AuthorRecord {
                id: a.id,
                first_name: a.first_name,
                last_name: a.last_name,
                date_of_birth: a.date_of_birth,
                date_of_death: a.date_of_death,
                created_at: a.created_at,
                updated_at: a.updated_at,
            })
            .collect())
    }

    async fn to_record(&self, model: Model) -> Result<BookRecord, CatalogError> {
        let authors = self.load_authors(model.id).await?;

        Ok(BookRecord {
            id: model.id,
            title: model.title,
            genre_id: model.genre_id,
            language_id: model.language_id,
            summary: model.summary,
            isbn: model.isbn,
            authors,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }

    async fn ensure_genre(&self, id: i32) -> Result<(), CatalogError> {
        if genre::Entity::find_by_id(id).one(&self.db).await?.is_none() {
            return Err(CatalogError::Referential(format!(
                "genre {} does not exist",
                id
            )));
        }
        Ok(())
    }

    async fn ensure_language(&self, id: i32) -> Result<(), CatalogError> {
        if language::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(CatalogError::Referential(format!(
                "language {} does not exist",
                id
            )));
        }
        Ok(())
    }

    async fn ensure_authors(&self, ids: &[i32]) -> Result<(), CatalogError> {
        for id in ids {
            if author::Entity::find_by_id(*id)
                .one(&self.db)
                .await?
                .is_none()
            {
                return Err(CatalogError::Referential(format!(
                    "author {} does not exist",
                    id
                )));
            }
        }
        Ok(())
    }
}

fn validate_scalars(
    title: Option<&str>,
    summary: Option<&str>,
    isbn: Option<&str>,
) -> Result<(), CatalogError> {
    if let Some(title) = title {
        if title.trim().is_empty() {
            return Err(CatalogError::Validation(
                "book title must not be empty".to_string(),
            ));
        }
        if title.chars().count() > TITLE_MAX {
            return Err(CatalogError::Validation(format!(
                "book title exceeds {} characters",
                TITLE_MAX
            )));
        }
    }
    if let Some(summary) = summary
        && summary.chars().count() > SUMMARY_MAX
    {
        return Err(CatalogError::Validation(format!(
            "book summary exceeds {} characters",
            SUMMARY_MAX
        )));
    }
    // ISBN-13 as stored, digits and check character included
    if let Some(isbn) = isbn
        && isbn.chars().count() != ISBN_LEN
    {
        return Err(CatalogError::Validation(format!(
            "isbn must contain exactly {} characters",
            ISBN_LEN
        )));
    }
    Ok(())
}

#[async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn find_all(&self, filter: BookFilter) -> Result<Vec<BookRecord>, CatalogError> {
        tracing::debug!(
            "List books - Filters: genre_id={:?}, author_id={:?}",
            filter.genre_id,
            filter.author_id
        );

        let mut query = BookEntity::find();

        if let Some(genre_id) = filter.genre_id {
            query = query.filter(book::Column::GenreId.eq(genre_id));
        }

        if let Some(author_id) = filter.author_id {
            let book_ids: Vec<i32> = book_authors::Entity::find()
                .filter(book_authors::Column::AuthorId.eq(author_id))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|link| link.book_id)
                .collect();
            query = query.filter(book::Column::Id.is_in(book_ids));
        }

        let models = query.all(&self.db).await?;

        let mut books = Vec::with_capacity(models.len());
        for model in models {
            books.push(self.to_record(model).await?);
        }

        Ok(books)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<BookRecord>, CatalogError> {
        let book = BookEntity::find_by_id(id).one(&self.db).await?;

        match book {
            Some(model) => Ok(Some(self.to_record(model).await?)),
            None => Ok(None),
        }
    }

    async fn create(&self, input: NewBook) -> Result<BookRecord, CatalogError> {
        validate_scalars(Some(&input.title), Some(&input.summary), Some(&input.isbn))?;

        if let Some(genre_id) = input.genre_id {
            self.ensure_genre(genre_id).await?;
        }
        if let Some(language_id) = input.language_id {
            self.ensure_language(language_id).await?;
        }
        self.ensure_authors(&input.author_ids).await?;

        let now = chrono::Utc::now().to_rfc3339();
        let txn = self.db.begin().await?;

        let book = ActiveModel {
            title: Set(input.title),
            genre_id: Set(input.genre_id),
            language_id: Set(input.language_id),
            summary: Set(input.summary),
            isbn: Set(input.isbn),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = book.insert(&txn).await?;

        for author_id in &input.author_ids {
            let link = book_authors::ActiveModel {
                book_id: Set(inserted.id),
                author_id: Set(*author_id),
            };
            link.insert(&txn).await?;
        }

        txn.commit().await?;

        self.to_record(inserted).await
    }

    async fn update(&self, id: i32, input: BookPatch) -> Result<BookRecord, CatalogError> {
        let existing = BookEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CatalogError::NotFound)?;

        validate_scalars(
            input.title.as_deref(),
            input.summary.as_deref(),
            input.isbn.as_deref(),
        )?;

        if let Some(Some(genre_id)) = input.genre_id {
            self.ensure_genre(genre_id).await?;
        }
        if let Some(Some(language_id)) = input.language_id {
            self.ensure_language(language_id).await?;
        }
        if let Some(author_ids) = &input.author_ids {
            self.ensure_authors(author_ids).await?;
        }

        let txn = self.db.begin().await?;

        let mut active: ActiveModel = existing.into();
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(genre_id) = input.genre_id {
            active.genre_id = Set(genre_id);
        }
        if let Some(language_id) = input.language_id {
            active.language_id = Set(language_id);
        }
        if let Some(summary) = input.summary {
            active.summary = Set(summary);
        }
        if let Some(isbn) = input.isbn {
            active.isbn = Set(isbn);
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let updated = active.update(&txn).await?;

        // Replace the author set wholesale when one was supplied
        if let Some(author_ids) = input.author_ids {
            book_authors::Entity::delete_many()
                .filter(book_authors::Column::BookId.eq(id))
                .exec(&txn)
                .await?;

            for author_id in author_ids {
                let link = book_authors::ActiveModel {
                    book_id: Set(id),
                    author_id: Set(author_id),
                };
                link.insert(&txn).await?;
            }
        }

        txn.commit().await?;

        self.to_record(updated).await
    }

    async fn delete(&self, id: i32) -> Result<(), CatalogError> {
        let result = BookEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(CatalogError::NotFound);
        }

        Ok(())
    }
}
