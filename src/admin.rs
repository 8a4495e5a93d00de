//! Declarative admin-panel configuration.
//!
//! Each entity is registered once as plain data (list columns, filters,
//! fieldset grouping) handed to a generic admin renderer at startup. There
//! is no process-wide mutable registry.

/// A titled group of fields on the edit form.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Fieldset {
    pub legend: &'static str,
    pub fields: &'static [&'static str],
}

/// Admin registration for one entity.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct EntityAdmin {
    pub entity: &'static str,
    /// Columns shown on the list page; `display_author` is the derived
    /// comma-joined last-name column.
    pub list_display: &'static [&'static str],
    pub list_filter: &'static [&'static str],
    /// Flat field order for the edit form; ignored when fieldsets are set.
    pub fields: &'static [&'static str],
    pub fieldsets: &'static [Fieldset],
}

impl EntityAdmin {
    const fn defaults(entity: &'static str) -> Self {
        Self {
            entity,
            list_display: &["name"],
            list_filter: &[],
            fields: &["name"],
            fieldsets: &[],
        }
    }
}

/// The six catalog registrations, mirroring the admin panel layout.
pub fn site() -> [EntityAdmin; 6] {
    [
        EntityAdmin {
            entity: "author",
            list_display: &["last_name", "first_name"],
            fields: &["first_name", "last_name", "date_of_birth", "date_of_death"],
            ..EntityAdmin::defaults("author")
        },
        EntityAdmin {
            entity: "book",
            list_display: &["title", "genre", "language", "display_author"],
            list_filter: &["genre", "author"],
            fields: &["title", "genre", "language", "author", "summary", "isbn"],
            ..EntityAdmin::defaults("book")
        },
        EntityAdmin {
            entity: "book_instance",
            list_display: &["inv_nom", "book", "status"],
            list_filter: &["book", "status"],
            fieldsets: &[
                Fieldset {
                    legend: "A copy of the book",
                    fields: &["book", "imprint", "inv_nom"],
                },
                Fieldset {
                    legend: "Status and termination",
                    fields: &["status", "due_back"],
                },
            ],
            ..EntityAdmin::defaults("book_instance")
        },
        EntityAdmin::defaults("genre"),
        EntityAdmin::defaults("language"),
        EntityAdmin::defaults("status"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entity_is_registered_once() {
        let site = site();
        let mut names: Vec<_> = site.iter().map(|e| e.entity).collect();
        names.sort();
        assert_eq!(
            names,
            ["author", "book", "book_instance", "genre", "language", "status"]
        );
    }

    #[test]
    fn book_instance_groups_copy_and_status_fields() {
        let site = site();
        let instance = site
            .iter()
            .find(|e| e.entity == "book_instance")
            .expect("book_instance registered");
        assert_eq!(instance.list_filter, ["book", "status"]);
        assert_eq!(instance.fieldsets.len(), 2);
        assert_eq!(instance.fieldsets[0].fields, ["book", "imprint", "inv_nom"]);
        assert_eq!(instance.fieldsets[1].fields, ["status", "due_back"]);
    }

    #[test]
    fn registrations_serialize_for_renderers() {
        let site = site();
        let json = serde_json::to_value(site).expect("site serializes");
        assert_eq!(json[0]["entity"], "author");
        let instance = json
            .as_array()
            .and_then(|entities| {
                entities
                    .iter()
                    .find(|e| e["entity"] == "book_instance")
            })
            .expect("book_instance registered");
        assert_eq!(
            instance["fieldsets"][0]["fields"],
            serde_json::json!(["book", "imprint", "inv_nom"])
        );
    }

    #[test]
    fn book_list_is_filterable_by_genre_and_author() {
        let site = site();
        let book = site.iter().find(|e| e.entity == "book").expect("book registered");
        assert_eq!(book.list_filter, ["genre", "author"]);
        assert!(book.list_display.contains(&"display_author"));
    }
}
