use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

use webbooks_catalog::db;
use webbooks_catalog::display;
use webbooks_catalog::domain::{
    AuthorRecord, AuthorRepository, BookFilter, BookInstanceFilter, BookInstancePatch,
    BookInstanceRepository, BookPatch, BookRecord, BookRepository, CatalogError, GenreRepository,
    LanguageRepository, NewAuthor, NewBook, NewBookInstance, StatusRepository,
};
use webbooks_catalog::infrastructure::{
    SeaOrmAuthorRepository, SeaOrmBookInstanceRepository, SeaOrmBookRepository,
    SeaOrmGenreRepository, SeaOrmLanguageRepository, SeaOrmStatusRepository,
};

// Helper to create a test database
async fn setup_test_db() -> DatabaseConnection {
    // In-memory SQLite for testing
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

async fn create_author(db: &DatabaseConnection, first: &str, last: &str) -> AuthorRecord {
    SeaOrmAuthorRepository::new(db.clone())
        .create(NewAuthor {
            first_name: first.to_string(),
            last_name: last.to_string(),
            date_of_birth: None,
            date_of_death: None,
        })
        .await
        .expect("Failed to create author")
}

async fn create_book(
    db: &DatabaseConnection,
    title: &str,
    genre_id: Option<i32>,
    language_id: Option<i32>,
    author_ids: Vec<i32>,
) -> BookRecord {
    SeaOrmBookRepository::new(db.clone())
        .create(NewBook {
            title: title.to_string(),
            genre_id,
            language_id,
            author_ids,
            summary: "A book for testing.".to_string(),
            isbn: "9780000000000".to_string(),
        })
        .await
        .expect("Failed to create book")
}

#[tokio::test]
async fn create_then_read_round_trips_all_fields() {
    let db = setup_test_db().await;
    let genres = SeaOrmGenreRepository::new(db.clone());
    let languages = SeaOrmLanguageRepository::new(db.clone());
    let books = SeaOrmBookRepository::new(db.clone());

    let fiction = genres.create("Fiction".to_string()).await.unwrap();
    let english = languages.create("English".to_string()).await.unwrap();
    let doe = create_author(&db, "Jane", "Doe").await;

    let created = books
        .create(NewBook {
            title: "Dune".to_string(),
            genre_id: Some(fiction.id),
            language_id: Some(english.id),
            author_ids: vec![doe.id],
            summary: "A desert planet.".to_string(),
            isbn: "9780441013593".to_string(),
        })
        .await
        .unwrap();

    let read = books
        .find_by_id(created.id)
        .await
        .unwrap()
        .expect("Book should exist");

    assert_eq!(read, created);
    assert_eq!(read.title, "Dune");
    assert_eq!(read.genre_id, Some(fiction.id));
    assert_eq!(read.language_id, Some(english.id));
    assert_eq!(read.isbn, "9780441013593");
    assert_eq!(read.authors.len(), 1);
    assert_eq!(read.authors[0].last_name, "Doe");
}

#[tokio::test]
async fn display_authors_follows_association_order() {
    let db = setup_test_db().await;
    let books = SeaOrmBookRepository::new(db.clone());

    let gaiman = create_author(&db, "Neil", "Gaiman").await;
    let pratchett = create_author(&db, "Terry", "Pratchett").await;

    // Associate in the opposite order of creation
    let book = create_book(&db, "Good Omens", None, None, vec![pratchett.id, gaiman.id]).await;

    assert_eq!(display::display_authors(&book), "Pratchett, Gaiman");

    let reread = books.find_by_id(book.id).await.unwrap().unwrap();
    assert_eq!(display::display_authors(&reread), "Pratchett, Gaiman");

    let unauthored = create_book(&db, "Anonymous", None, None, vec![]).await;
    assert_eq!(display::display_authors(&unauthored), "");
}

#[tokio::test]
async fn fiction_dune_scenario() {
    let db = setup_test_db().await;
    let genres = SeaOrmGenreRepository::new(db.clone());
    let languages = SeaOrmLanguageRepository::new(db.clone());
    let books = SeaOrmBookRepository::new(db.clone());

    let fiction = genres.create("Fiction".to_string()).await.unwrap();
    let english = languages.create("English".to_string()).await.unwrap();
    let doe = create_author(&db, "Jane", "Doe").await;

    let dune = books
        .create(NewBook {
            title: "Dune".to_string(),
            genre_id: Some(fiction.id),
            language_id: Some(english.id),
            author_ids: vec![doe.id],
            summary: "...".to_string(),
            isbn: "9780441013593".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(display::book_label(&dune), "Dune");
    assert_eq!(display::display_authors(&dune), "Doe");
    assert_eq!(display::detail_url(&dune), format!("book-detail/{}", dune.id));
    // Stable across repeated calls
    assert_eq!(display::detail_url(&dune), display::detail_url(&dune));
}

#[tokio::test]
async fn on_loan_instance_scenario() {
    let db = setup_test_db().await;
    let statuses = SeaOrmStatusRepository::new(db.clone());
    let instances = SeaOrmBookInstanceRepository::new(db.clone());

    let doe = create_author(&db, "Jane", "Doe").await;
    let dune = create_book(&db, "Dune", None, None, vec![doe.id]).await;
    let on_loan = statuses.create("On loan".to_string()).await.unwrap();

    let instance = instances
        .create(NewBookInstance {
            book_id: Some(dune.id),
            inv_nom: Some("INV001".to_string()),
            imprint: "Ace Books, 1990".to_string(),
            status_id: Some(on_loan.id),
            due_back: NaiveDate::from_ymd_opt(2024, 6, 1),
        })
        .await
        .unwrap();

    assert_eq!(display::instance_label(&instance), "INV001 Dune On loan");
    assert_eq!(instance.due_back, NaiveDate::from_ymd_opt(2024, 6, 1));
}

#[tokio::test]
async fn deleting_a_genre_cascades_to_books_and_their_copies() {
    let db = setup_test_db().await;
    let genres = SeaOrmGenreRepository::new(db.clone());
    let books = SeaOrmBookRepository::new(db.clone());
    let instances = SeaOrmBookInstanceRepository::new(db.clone());

    let horror = genres.create("Horror".to_string()).await.unwrap();
    let kept_book = create_book(&db, "Unrelated", None, None, vec![]).await;
    let doomed_book = create_book(&db, "Doomed", Some(horror.id), None, vec![]).await;

    let doomed_copy = instances
        .create(NewBookInstance {
            book_id: Some(doomed_book.id),
            inv_nom: Some("INV100".to_string()),
            imprint: "Somewhere, 2001".to_string(),
            status_id: None,
            due_back: None,
        })
        .await
        .unwrap();

    genres.delete(horror.id).await.unwrap();

    assert!(books.find_by_id(doomed_book.id).await.unwrap().is_none());
    assert!(instances.find_by_id(doomed_copy.id).await.unwrap().is_none());
    // Books outside the genre survive
    assert!(books.find_by_id(kept_book.id).await.unwrap().is_some());
}

#[tokio::test]
async fn deleting_a_status_cascades_to_copies_only() {
    let db = setup_test_db().await;
    let statuses = SeaOrmStatusRepository::new(db.clone());
    let books = SeaOrmBookRepository::new(db.clone());
    let instances = SeaOrmBookInstanceRepository::new(db.clone());

    let book = create_book(&db, "Kept", None, None, vec![]).await;
    let lost = statuses.create("lost".to_string()).await.unwrap();

    let copy = instances
        .create(NewBookInstance {
            book_id: Some(book.id),
            inv_nom: None,
            imprint: "Somewhere, 1999".to_string(),
            status_id: Some(lost.id),
            due_back: None,
        })
        .await
        .unwrap();

    statuses.delete(lost.id).await.unwrap();

    assert!(instances.find_by_id(copy.id).await.unwrap().is_none());
    assert!(books.find_by_id(book.id).await.unwrap().is_some());
}

#[tokio::test]
async fn deleting_an_author_detaches_but_keeps_the_book() {
    let db = setup_test_db().await;
    let authors = SeaOrmAuthorRepository::new(db.clone());
    let books = SeaOrmBookRepository::new(db.clone());

    let doe = create_author(&db, "Jane", "Doe").await;
    let roe = create_author(&db, "Richard", "Roe").await;
    let dune = create_book(&db, "Dune", None, None, vec![doe.id, roe.id]).await;

    authors.delete(doe.id).await.unwrap();

    let reread = books.find_by_id(dune.id).await.unwrap().unwrap();
    assert_eq!(display::display_authors(&reread), "Roe");
    assert!(reread.authors.iter().all(|a| a.id != doe.id));
}

#[tokio::test]
async fn books_are_filterable_by_genre_and_author() {
    let db = setup_test_db().await;
    let genres = SeaOrmGenreRepository::new(db.clone());
    let books = SeaOrmBookRepository::new(db.clone());

    let poetry = genres.create("Poetry".to_string()).await.unwrap();
    let prose = genres.create("Prose".to_string()).await.unwrap();
    let frost = create_author(&db, "Robert", "Frost").await;

    let poems = create_book(&db, "Collected Poems", Some(poetry.id), None, vec![frost.id]).await;
    create_book(&db, "Essays", Some(prose.id), None, vec![]).await;

    let by_genre = books
        .find_all(BookFilter {
            genre_id: Some(poetry.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_genre.len(), 1);
    assert_eq!(by_genre[0].id, poems.id);

    let by_author = books
        .find_all(BookFilter {
            author_id: Some(frost.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_author.len(), 1);
    assert_eq!(by_author[0].id, poems.id);

    let all = books.find_all(BookFilter::default()).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn copies_are_filterable_by_book_and_status() {
    let db = setup_test_db().await;
    let statuses = SeaOrmStatusRepository::new(db.clone());
    let instances = SeaOrmBookInstanceRepository::new(db.clone());

    let first = create_book(&db, "First", None, None, vec![]).await;
    let second = create_book(&db, "Second", None, None, vec![]).await;
    let available = statuses.create("available".to_string()).await.unwrap();
    let on_loan = statuses.create("on loan".to_string()).await.unwrap();

    for (book_id, status_id) in [
        (first.id, available.id),
        (first.id, on_loan.id),
        (second.id, available.id),
    ] {
        instances
            .create(NewBookInstance {
                book_id: Some(book_id),
                inv_nom: None,
                imprint: "Imprint, 2000".to_string(),
                status_id: Some(status_id),
                due_back: None,
            })
            .await
            .unwrap();
    }

    let of_first = instances
        .find_all(BookInstanceFilter {
            book_id: Some(first.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(of_first.len(), 2);

    let loaned = instances
        .find_all(BookInstanceFilter {
            status_id: Some(on_loan.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(loaned.len(), 1);
    assert_eq!(loaned[0].book_id, Some(first.id));
}

#[tokio::test]
async fn partial_update_replaces_only_supplied_fields() {
    let db = setup_test_db().await;
    let genres = SeaOrmGenreRepository::new(db.clone());
    let books = SeaOrmBookRepository::new(db.clone());

    let fantasy = genres.create("Fantasy".to_string()).await.unwrap();
    let doe = create_author(&db, "Jane", "Doe").await;
    let roe = create_author(&db, "Richard", "Roe").await;
    let book = create_book(&db, "Draft", Some(fantasy.id), None, vec![doe.id]).await;

    let updated = books
        .update(
            book.id,
            BookPatch {
                title: Some("Final".to_string()),
                genre_id: Some(None),
                author_ids: Some(vec![roe.id]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.title, "Final");
    assert_eq!(updated.genre_id, None);
    assert_eq!(updated.summary, book.summary);
    assert_eq!(updated.isbn, book.isbn);
    assert_eq!(display::display_authors(&updated), "Roe");
}

#[tokio::test]
async fn copy_update_moves_status_and_due_back() {
    let db = setup_test_db().await;
    let statuses = SeaOrmStatusRepository::new(db.clone());
    let instances = SeaOrmBookInstanceRepository::new(db.clone());

    let book = create_book(&db, "Dune", None, None, vec![]).await;
    let available = statuses.create("available".to_string()).await.unwrap();
    let on_loan = statuses.create("on loan".to_string()).await.unwrap();

    let copy = instances
        .create(NewBookInstance {
            book_id: Some(book.id),
            inv_nom: Some("INV003".to_string()),
            imprint: "Ace Books, 1990".to_string(),
            status_id: Some(available.id),
            due_back: None,
        })
        .await
        .unwrap();

    let loaned = instances
        .update(
            copy.id,
            BookInstancePatch {
                status_id: Some(Some(on_loan.id)),
                due_back: Some(NaiveDate::from_ymd_opt(2024, 6, 1)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(loaned.status_name.as_deref(), Some("on loan"));
    assert_eq!(loaned.due_back, NaiveDate::from_ymd_opt(2024, 6, 1));
    assert_eq!(loaned.inv_nom.as_deref(), Some("INV003"));
    assert_eq!(display::instance_label(&loaned), "INV003 Dune on loan");
}

#[tokio::test]
async fn validation_rejects_missing_or_malformed_fields() {
    let db = setup_test_db().await;
    let genres = SeaOrmGenreRepository::new(db.clone());
    let books = SeaOrmBookRepository::new(db.clone());

    let err = genres.create("  ".to_string()).await.unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)), "{err}");

    let err = books
        .create(NewBook {
            title: "".to_string(),
            genre_id: None,
            language_id: None,
            author_ids: vec![],
            summary: "s".to_string(),
            isbn: "9780441013593".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)), "{err}");

    // ISBN must be exactly 13 characters
    let err = books
        .create(NewBook {
            title: "Short ISBN".to_string(),
            genre_id: None,
            language_id: None,
            author_ids: vec![],
            summary: "s".to_string(),
            isbn: "12345".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)), "{err}");
}

#[tokio::test]
async fn validation_rejects_over_length_fields() {
    let db = setup_test_db().await;
    let statuses = SeaOrmStatusRepository::new(db.clone());
    let books = SeaOrmBookRepository::new(db.clone());
    let instances = SeaOrmBookInstanceRepository::new(db.clone());

    // Titles are capped at 200 characters
    let err = books
        .create(NewBook {
            title: "t".repeat(201),
            genre_id: None,
            language_id: None,
            author_ids: vec![],
            summary: "s".to_string(),
            isbn: "9780000000000".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)), "{err}");

    // Summaries at 1000
    let err = books
        .create(NewBook {
            title: "Long summary".to_string(),
            genre_id: None,
            language_id: None,
            author_ids: vec![],
            summary: "s".repeat(1001),
            isbn: "9780000000000".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)), "{err}");

    // Status names at 20
    let err = statuses.create("s".repeat(21)).await.unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)), "{err}");

    // Inventory numbers at 20, both on create and on update
    let book = create_book(&db, "Bounded", None, None, vec![]).await;
    let err = instances
        .create(NewBookInstance {
            book_id: Some(book.id),
            inv_nom: Some("i".repeat(21)),
            imprint: "Imprint, 2000".to_string(),
            status_id: None,
            due_back: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)), "{err}");

    let copy = instances
        .create(NewBookInstance {
            book_id: Some(book.id),
            inv_nom: Some("INV001".to_string()),
            imprint: "Imprint, 2000".to_string(),
            status_id: None,
            due_back: None,
        })
        .await
        .unwrap();
    let err = instances
        .update(
            copy.id,
            BookInstancePatch {
                inv_nom: Some(Some("i".repeat(21))),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Validation(_)), "{err}");
}

#[tokio::test]
async fn writes_with_dangling_references_are_rejected() {
    let db = setup_test_db().await;
    let books = SeaOrmBookRepository::new(db.clone());
    let instances = SeaOrmBookInstanceRepository::new(db.clone());

    let err = books
        .create(NewBook {
            title: "Ghost genre".to_string(),
            genre_id: Some(999),
            language_id: None,
            author_ids: vec![],
            summary: "s".to_string(),
            isbn: "9780000000000".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Referential(_)), "{err}");

    let err = books
        .create(NewBook {
            title: "Ghost author".to_string(),
            genre_id: None,
            language_id: None,
            author_ids: vec![999],
            summary: "s".to_string(),
            isbn: "9780000000000".to_string(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Referential(_)), "{err}");

    let err = instances
        .create(NewBookInstance {
            book_id: Some(999),
            inv_nom: None,
            imprint: "Imprint, 2000".to_string(),
            status_id: None,
            due_back: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Referential(_)), "{err}");
}

#[tokio::test]
async fn missing_ids_surface_not_found() {
    let db = setup_test_db().await;
    let books = SeaOrmBookRepository::new(db.clone());
    let authors = SeaOrmAuthorRepository::new(db.clone());

    assert!(books.find_by_id(999).await.unwrap().is_none());

    let err = books.delete(999).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound), "{err}");

    let err = books.update(999, BookPatch::default()).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound), "{err}");

    let err = authors.delete(999).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound), "{err}");
}

#[tokio::test]
async fn seed_populates_once() {
    let db = setup_test_db().await;
    let books = SeaOrmBookRepository::new(db.clone());

    webbooks_catalog::seed::seed_demo_data(&db).await.unwrap();
    webbooks_catalog::seed::seed_demo_data(&db).await.unwrap();

    let catalog = books.find_all(BookFilter::default()).await.unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(display::display_authors(&catalog[0]), "Herbert");
}
