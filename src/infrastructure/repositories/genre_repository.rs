//! SeaORM implementation of GenreRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::domain::{CatalogError, GenreRecord, GenreRepository};
use crate::models::genre::{ActiveModel, Entity as GenreEntity, Model};

const NAME_MAX: usize = 200;

/// SeaORM-based implementation of GenreRepository
pub struct SeaOrmGenreRepository {
    db: DatabaseConnection,
}

impl SeaOrmGenreRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn validate_name(name: &str) -> Result<(), CatalogError> {
    if name.trim().is_empty() {
        return Err(CatalogError::Validation(
            "genre name must not be empty".to_string(),
        ));
    }
    if name.chars().count() > NAME_MAX {
        return Err(CatalogError::Validation(format!(
            "genre name exceeds {} characters",
            NAME_MAX
        )));
    }
    Ok(())
}

fn to_record(model: Model) -> GenreRecord {
    GenreRecord {
        id: model.id,
        name: model.name,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl GenreRepository for SeaOrmGenreRepository {
    async fn find_all(&self) -> Result<Vec<GenreRecord>, CatalogError> {
        let genres = GenreEntity::find().all(&self.db).await?;

        Ok(genres.into_iter().map(to_record).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<GenreRecord>, CatalogError> {
        let genre = GenreEntity::find_by_id(id).one(&self.db).await?;

        Ok(genre.map(to_record))
    }

    async fn create(&self, name: String) -> Result<GenreRecord, CatalogError> {
        validate_name(&name)?;
        let now = chrono::Utc::now().to_rfc3339();

        let genre = ActiveModel {
            name: Set(name),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = genre.insert(&self.db).await?;

        Ok(to_record(result))
    }

    async fn update(&self, id: i32, name: String) -> Result<GenreRecord, CatalogError> {
        validate_name(&name)?;

        let existing = GenreEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CatalogError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(name);
        active.updated_at = Set(chrono::Utc::now().to_rfc3339());

        let result = active.update(&self.db).await?;

        Ok(to_record(result))
    }

    async fn delete(&self, id: i32) -> Result<(), CatalogError> {
        let result = GenreEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(CatalogError::NotFound);
        }

        Ok(())
    }
}
