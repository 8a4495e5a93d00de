use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use webbooks_catalog::domain::{BookFilter, BookRepository};
use webbooks_catalog::infrastructure::SeaOrmBookRepository;
use webbooks_catalog::{admin, config, db, display, seed};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "webbooks_catalog=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = config::Config::from_env();
    tracing::info!("Opening catalog at {}", config.database_url);

    let conn = db::init_db(&config.database_url)
        .await
        .expect("Failed to open catalog database");

    if config.seed_demo_data {
        seed::seed_demo_data(&conn)
            .await
            .expect("Failed to seed demo catalog");
    }

    for registration in admin::site() {
        tracing::info!(
            "Admin entity {}: list_display={:?} list_filter={:?}",
            registration.entity,
            registration.list_display,
            registration.list_filter
        );
    }

    let books = SeaOrmBookRepository::new(conn.clone());
    let catalog = books
        .find_all(BookFilter::default())
        .await
        .expect("Failed to list books");

    tracing::info!("{} books in the catalog", catalog.len());
    for book in &catalog {
        tracing::info!(
            "{} by {} ({})",
            display::book_label(book),
            display::display_authors(book),
            display::detail_url(book)
        );
    }
}
