pub mod author;
pub mod book;
pub mod book_authors;
pub mod book_instance;
pub mod genre;
pub mod language;
pub mod status;
