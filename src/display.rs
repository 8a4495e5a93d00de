//! Human-readable labels and the canonical book locator.
//!
//! Pure formatting over domain records, independent of persistence, so the
//! admin layer can render list columns without touching the store again.

use crate::domain::{
    AuthorRecord, BookInstanceRecord, BookRecord, GenreRecord, LanguageRecord, StatusRecord,
};

pub fn genre_label(genre: &GenreRecord) -> String {
    genre.name.clone()
}

pub fn language_label(language: &LanguageRecord) -> String {
    language.name.clone()
}

pub fn status_label(status: &StatusRecord) -> String {
    status.name.clone()
}

/// "first_name last_name"
pub fn author_label(author: &AuthorRecord) -> String {
    format!("{} {}", author.first_name, author.last_name)
}

pub fn book_label(book: &BookRecord) -> String {
    book.title.clone()
}

/// "inv_nom book status" with absent parts omitted.
pub fn instance_label(instance: &BookInstanceRecord) -> String {
    [
        instance.inv_nom.as_deref(),
        instance.book_title.as_deref(),
        instance.status_name.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" ")
}

/// Comma-joined author last names, in association order.
pub fn display_authors(book: &BookRecord) -> String {
    book.authors
        .iter()
        .map(|author| author.last_name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Canonical path to the book's detail view, resolved by an external router.
pub fn detail_url(book: &BookRecord) -> String {
    format!("book-detail/{}", book.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author(id: i32, first: &str, last: &str) -> AuthorRecord {
        AuthorRecord {
            id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            date_of_birth: None,
            date_of_death: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn book(id: i32, title: &str, authors: Vec<AuthorRecord>) -> BookRecord {
        BookRecord {
            id,
            title: title.to_string(),
            genre_id: None,
            language_id: None,
            summary: String::new(),
            isbn: "9780441013593".to_string(),
            authors,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn book_label_is_the_title() {
        let b = book(1, "Dune", vec![]);
        assert_eq!(book_label(&b), "Dune");
    }

    #[test]
    fn author_label_joins_first_and_last() {
        let a = author(1, "Jane", "Doe");
        assert_eq!(author_label(&a), "Jane Doe");
    }

    #[test]
    fn display_authors_joins_last_names_in_order() {
        let b = book(
            1,
            "Good Omens",
            vec![author(1, "Terry", "Pratchett"), author(2, "Neil", "Gaiman")],
        );
        assert_eq!(display_authors(&b), "Pratchett, Gaiman");
    }

    #[test]
    fn display_authors_is_empty_for_no_authors() {
        let b = book(1, "Anonymous", vec![]);
        assert_eq!(display_authors(&b), "");
    }

    #[test]
    fn instance_label_joins_present_parts() {
        let full = BookInstanceRecord {
            id: 7,
            book_id: Some(1),
            inv_nom: Some("INV001".to_string()),
            imprint: "Ace, 1990".to_string(),
            status_id: Some(2),
            due_back: None,
            book_title: Some("Dune".to_string()),
            status_name: Some("On loan".to_string()),
            created_at: String::new(),
            updated_at: String::new(),
        };
        assert_eq!(instance_label(&full), "INV001 Dune On loan");

        let bare = BookInstanceRecord {
            inv_nom: None,
            status_id: None,
            status_name: None,
            ..full
        };
        assert_eq!(instance_label(&bare), "Dune");
    }

    #[test]
    fn detail_url_is_stable_for_an_id() {
        let b = book(42, "Dune", vec![]);
        assert_eq!(detail_url(&b), "book-detail/42");
        assert_eq!(detail_url(&b), detail_url(&b));
    }
}
