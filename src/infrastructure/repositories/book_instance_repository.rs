//! SeaORM implementation of BookInstanceRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::domain::{
    BookInstanceFilter, BookInstancePatch, BookInstanceRecord, BookInstanceRepository,
    CatalogError, NewBookInstance,
};
use crate::models::book_instance::{ActiveModel, Column, Entity as InstanceEntity, Model};
use crate::models::{book, status};

const INV_NOM_MAX: usize = 20;
const IMPRINT_MAX: usize = 200;

/// SeaORM-based implementation of BookInstanceRepository
pub struct SeaOrmBookInstanceRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookInstanceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Resolves the referenced book title and status name so display
    /// labels need no further queries.
    async fn to_record(&self, model: Model) -> Result<BookInstanceRecord, CatalogError> {
        let book_title = match model.book_id {
            Some(book_id) => book::Entity::find_by_id(book_id)
                .one(&self.db)
                .await?
                .map(|b| b.title),
            None => None,
        };

        let status_name = match model.status_id {
            Some(status_id) => status::Entity::find_by_id(status_id)
                .one(&self.db)
                .await?
                .map(|s| s.name),
            None => None,
        };

        Ok(BookInstanceRecord {
            id: model.id,
            book_id: model.book_id,
            inv_nom: model.inv_nom,
            imprint: model.imprint,
            status_id: model.status_id,
            due_back: model.due_back,
            book_title,
            status_name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }

    async fn ensure_book(&self, id: i32) -> Result<(), CatalogError> {
        if book::Entity::find_by_id(id).one(&self.db).await?.is_none() {
            return Err(CatalogError::Referential(format!(
                "book {} does not exist",
                id
            )));
        }
        Ok(())
    }

    async fn ensure_status(&self, id: i32) -> Result<(), CatalogError> {
        if status::Entity::find_by_id(id).one(&self.db).await?.is_none() {
            return Err(CatalogError::Referential(format!(
                "status {} does not exist",
                id
            )));
        }
        Ok(())
    }
}

fn validate_scalars(inv_nom: Option<&str>, imprint: Option<&str>) -> Result<(), CatalogError> {
    if let Some(inv_nom) = inv_nom
        && inv_nom.chars().count() > INV_NOM_MAX
    {
        return Err(CatalogError::Validation(format!(
            "inventory number exceeds {} characters",
            INV_NOM_MAX
        )));
    }
    if let Some(imprint) = imprint {
        if imprint.trim().is_empty() {
            return Err(CatalogError::Validation(
                "imprint must not be empty".to_string(),
            ));
        }
        if imprint.chars().count() > IMPRINT_MAX {
            return Err(CatalogError::Validation(format!(
                "imprint exceeds {} characters",
                IMPRINT_MAX
            )));
        }
    }
    Ok(())
}

#[async_trait]
impl BookInstanceRepository for SeaOrmBookInstanceRepository {
    async fn find_all(
        &self,
        filter: BookInstanceFilter,
    ) -> Result<Vec<BookInstanceRecord>, CatalogError> {
        tracing::debug!(
            "List copies - Filters: book_id={:?}, status_id={:?}",
            filter.book_id,
            filter.status_id
        );

        let mut query = InstanceEntity::find();

        if let Some(book_id) = filter.book_id {
            query = query.filter(Column::BookId.eq(book_id));
        }
        if let Some(status_id) = filter.status_id {
            query = query.filter(Column::StatusId.eq(status_id));
        }

        let models = query.all(&self.db).await?;

        let mut instances = Vec::with_capacity(models.len());
        for model in models {
            instances.push(self.to_record(model).await?);
        }

        Ok(instances)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<BookInstanceRecord>, CatalogError> {
        let instance = InstanceEntity::find_by_id(id).one(&self.db).await?;

        match instance {
            Some(model) => Ok(Some(self.to_record(model).await?)),
            None => Ok(None),
        }
    }

    async fn create(&self, input: NewBookInstance) -> Result<BookInstanceRecord, CatalogError> {
        validate_scalars(input.inv_nom.as_deref(), Some(&input.imprint))?;

        if let Some(book_id) = input.book_id {
            self.ensure_book(book_id).await?;
        }
        if let Some(status_id) = input.status_id {
            self.ensure_status(status_id).await?;
        }

        let now = chrono::Utc::now().to_rfc3339();

        let instance = ActiveModel {
            book_id: Set(input.book_id),
            inv_nom: Set(input.inv_nom),
            imprint: Set(input.imprint),
            status_id: Set(input.status_id),
            due_back: Set(input.due_back),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = instance.insert(&self.db).await?;

        self.to_record(result).await
    }

    async fn update(
        &self,
        id: i32,
        input: BookInstancePatch,
    ) -> Result<BookInstanceRecord, CatalogError> {
        let existing = InstanceEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CatalogError::NotFound)?;

        validate_scalars(
            input.inv_nom.as_ref().and_then(|v| v.as_deref()),
            input.imprint.as_deref(),
        )?;

        if let Some(Some(book_id)) = input.book_id {
            self.ensure_book(book_id).await?;
        }
        if let Some(Some(status_id)) = input.status_id {
            self.ensure_status(status_id).await?;
        }

        let mut active: ActiveModel = existing.into();

        if let Some(book_id) = input.book_id {
            active.book_id = Set(book_id);
        }
        if let Some(inv_nom) = input.inv_nom {
            active.inv_nom = Set(inv_nom);
        }
        if let Some(imprint) = input.imprint {
            active.imprint = Set(imprint);
        }
        if let Some(status_id) = input.status_id {
            active.status_id = Set(status_id);
        }
        if let Some(due_back) = input.due_back {
            active.due_back = Set(due_back);
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let result = active.update(&self.db).await?;

        self.to_record(result).await
    }

    async fn delete(&self, id: i32) -> Result<(), CatalogError> {
        let result = InstanceEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(CatalogError::NotFound);
        }

        Ok(())
    }
}
