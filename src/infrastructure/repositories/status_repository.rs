//! SeaORM implementation of StatusRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::domain::{CatalogError, StatusRecord, StatusRepository};
use crate::models::status::{ActiveModel, Entity as StatusEntity, Model};

const NAME_MAX: usize = 20;

/// SeaORM-based implementation of StatusRepository
pub struct SeaOrmStatusRepository {
    db: DatabaseConnection,
}

impl SeaOrmStatusRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn validate_name(name: &str) -> Result<(), CatalogError> {
    if name.trim().is_empty() {
        return Err(CatalogError::Validation(
            "status name must not be empty".to_string(),
        ));
    }
    if name.chars().count() > NAME_MAX {
        return Err(CatalogError::Validation(format!(
            "status name exceeds {} characters",
            NAME_MAX
        )));
    }
    Ok(())
}

fn to_record(model: Model) -> StatusRecord {
    StatusRecord {
        id: model.id,
        name: model.name,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl StatusRepository for SeaOrmStatusRepository {
    async fn find_all(&self) -> Result<Vec<StatusRecord>, CatalogError> {
        let statuses = StatusEntity::find().all(&self.db).await?;

        Ok(statuses.into_iter().map(to_record).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<StatusRecord>, CatalogError> {
        let status = StatusEntity::find_by_id(id).one(&self.db).await?;

        Ok(status.map(to_record))
    }

    async fn create(&self, name: String) -> Result<StatusRecord, CatalogError> {
        validate_name(&name)?;
        let now = chrono::Utc::now().to_rfc3339();

        let status = ActiveModel {
            name: Set(name),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = status.insert(&self.db).await?;

        Ok(to_record(result))
    }

    async fn update(&self, id: i32, name: String) -> Result<StatusRecord, CatalogError> {
        validate_name(&name)?;

        let existing = StatusEntity::find_by_id(id)
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
        let result = StatusEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(CatalogError::NotFound);
        }

        Ok(())
    }
}
