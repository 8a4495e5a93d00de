//! SeaORM implementation of LanguageRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::domain::{CatalogError, LanguageRecord, LanguageRepository};
use crate::models::language::{ActiveModel, Entity as LanguageEntity, Model};

const NAME_MAX: usize = 200;

/// SeaORM-based implementation of LanguageRepository
pub struct SeaOrmLanguageRepository {
    db: DatabaseConnection,
}

impl SeaOrmLanguageRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn validate_name(name: &str) -> Result<(), CatalogError> {
    if name.trim().is_empty() {
        return Err(CatalogError::Validation(
            "language name must not be empty".to_string(),
        ));
    }
    if name.chars().count() > NAME_MAX {
        return Err(CatalogError::Validation(format!(
            "language name exceeds {} characters",
            NAME_MAX
        )));
    }
    Ok(())
}

fn to_record(model: Model) -> LanguageRecord {
    LanguageRecord {
        id: model.id,
        name: model.name,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl LanguageRepository for SeaOrmLanguageRepository {
    async fn find_all(&self) -> Result<Vec<LanguageRecord>, CatalogError> {
        let languages = LanguageEntity::find().all(&self.db).await?;

        Ok(languages.into_iter().map(to_record).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<LanguageRecord>, CatalogError> {
        let language = LanguageEntity::find_by_id(id).one(&self.db).await?;

        Ok(language.map(to_record))
    }

    async fn create(&self, name: String) -> Result<LanguageRecord, CatalogError> {
        validate_name(&name)?;
        let now = chrono::Utc::now().to_rfc3339();

        let language = ActiveModel {
            name: Set(name),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = language.insert(&self.db).await?;

        Ok(to_record(result))
    }

    async fn update(&self, id: i32, name: String) -> Result<LanguageRecord, CatalogError> {
        validate_name(&name)?;

        let existing = LanguageEntity::find_by_id(id)
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
        let result = LanguageEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(CatalogError::NotFound);
        }

        Ok(())
    }
}
