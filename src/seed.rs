use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

use crate::domain::{
    AuthorRepository, BookInstanceRepository, BookRepository, CatalogError, GenreRepository,
    LanguageRepository, NewAuthor, NewBook, NewBookInstance, StatusRepository,
};
use crate::infrastructure::{
    SeaOrmAuthorRepository, SeaOrmBookInstanceRepository, SeaOrmBookRepository,
    SeaOrmGenreRepository, SeaOrmLanguageRepository, SeaOrmStatusRepository,
};
use crate::models::book;

/// Seeds a small demo catalog. No-op when books already exist.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), CatalogError> {
    if book::Entity::find().count(db).await? > 0 {
        tracing::info!("Catalog already populated, skipping demo seed");
        return Ok(());
    }

    let genres = SeaOrmGenreRepository::new(db.clone());
    let languages = SeaOrmLanguageRepository::new(db.clone());
    let statuses = SeaOrmStatusRepository::new(db.clone());
    let authors = SeaOrmAuthorRepository::new(db.clone());
    let books = SeaOrmBookRepository::new(db.clone());
    let instances = SeaOrmBookInstanceRepository::new(db.clone());

    let science_fiction = genres.create("Science Fiction".to_string()).await?;
    genres.create("Fantasy".to_string()).await?;

    let english = languages.create("English".to_string()).await?;
    languages.create("French".to_string()).await?;

    let available = statuses.create("available".to_string()).await?;
    let on_loan = statuses.create("on loan".to_string()).await?;

    let herbert = authors
        .create(NewAuthor {
            first_name: "Frank".to_string(),
            last_name: "Herbert".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1920, 10, 8),
            date_of_death: NaiveDate::from_ymd_opt(1986, 2, 11),
        })
        .await?;

    let dune = books
        .create(NewBook {
            title: "Dune".to_string(),
            genre_id: Some(science_fiction.id),
            language_id: Some(english.id),
            author_ids: vec![herbert.id],
            summary: "Paul Atreides leads desert-dwelling Fremen on Arrakis.".to_string(),
            isbn: "9780441013593".to_string(),
        })
        .await?;

    instances
        .create(NewBookInstance {
            book_id: Some(dune.id),
            inv_nom: Some("INV001".to_string()),
            imprint: "Ace Books, 1990".to_string(),
            status_id: Some(available.id),
            due_back: None,
        })
        .await?;

    instances
        .create(NewBookInstance {
            book_id: Some(dune.id),
            inv_nom: Some("INV002".to_string()),
            imprint: "Ace Books, 1990".to_string(),
            status_id: Some(on_loan.id),
            due_back: NaiveDate::from_ymd_opt(2024, 6, 1),
        })
        .await?;

    tracing::info!("Seeded demo catalog");
    Ok(())
}
