//! SeaORM implementation of AuthorRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::domain::{AuthorPatch, AuthorRecord, AuthorRepository, CatalogError, NewAuthor};
use crate::models::author::{ActiveModel, Entity as AuthorEntity, Model};

const NAME_MAX: usize = 100;

/// SeaORM-based implementation of AuthorRepository
pub struct SeaOrmAuthorRepository {
    db: DatabaseConnection,
}

impl SeaOrmAuthorRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn validate_name(field: &str, value: &str) -> Result<(), CatalogError> {
    if value.trim().is_empty() {
        return Err(CatalogError::Validation(format!(
            "author {} must not be empty",
            field
        )));
    }
    if value.chars().count() > NAME_MAX {
        return Err(CatalogError::Validation(format!(
            "author {} exceeds {} characters",
            field, NAME_MAX
        )));
    }
    Ok(())
}

fn to_record(model: Model) -> AuthorRecord {
    AuthorRecord {
        id: model.id,
        first_name: model.first_name,
        last_name: model.last_name,
        date_of_birth: model.date_of_birth,
        date_of_death: model.date_of_death,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl AuthorRepository for SeaOrmAuthorRepository {
    async fn find_all(&self) -> Result<Vec<AuthorRecord>, CatalogError> {
        let authors = AuthorEntity::find().all(&self.db).await?;

        Ok(authors.into_iter().map(to_record).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<AuthorRecord>, CatalogError> {
        let author = AuthorEntity::find_by_id(id).one(&self.db).await?;

        Ok(author.map(to_record))
    }

    async fn create(&self, input: NewAuthor) -> Result<AuthorRecord, CatalogError> {
        validate_name("first_name", &input.first_name)?;
        validate_name("last_name", &input.last_name)?;
        let now = chrono::Utc::now().to_rfc3339();

        let author = ActiveModel {
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            date_of_birth: Set(input.date_of_birth),
            date_of_death: Set(input.date_of_death),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = author.insert(&self.db).await?;

        Ok(to_record(result))
    }

    async fn update(&self, id: i32, input: AuthorPatch) -> Result<AuthorRecord, CatalogError> {
        let existing = AuthorEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CatalogError::NotFound)?;

        if let Some(first_name) = &input.first_name {
            validate_name("first_name", first_name)?;
        }
        if let Some(last_name) = &input.last_name {
            validate_name("last_name", last_name)?;
        }

        let mut active: ActiveModel = existing.into();

        if let Some(first_name) = input.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = input.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(date_of_birth) = input.date_of_birth {
            active.date_of_birth = Set(date_of_birth);
        }
        if let Some(date_of_death) = input.date_of_death {
            active.date_of_death = Set(date_of_death);
        }
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let result = active.update(&self.db).await?;

        Ok(to_record(result))
    }

    async fn delete(&self, id: i32) -> Result<(), CatalogError> {
        let result = AuthorEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(CatalogError::NotFound);
        }

        Ok(())
    }
}
