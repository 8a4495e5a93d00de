use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Copy status rows are admin-managed data, not a closed enum.
/// Typical values: `available`, `on loan`, `reserved`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "statuses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::book_instance::Entity")]
    BookInstance,
}

impl Related<super::book_instance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookInstance.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
