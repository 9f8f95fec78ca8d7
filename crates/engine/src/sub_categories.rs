//! Sub-categories, each attached to one parent category.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::Audit;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubCategory {
    pub id: i32,
    pub name: String,
    pub category_id: i32,
    pub audit: Audit,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transaction_sub_categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub category_id: i32,
    pub created_at: DateTimeUtc,
    pub created_by: String,
    pub updated_at: Option<DateTimeUtc>,
    pub updated_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Category,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SubCategory {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            category_id: model.category_id,
            audit: Audit::new(
                model.created_at,
                model.created_by,
                model.updated_at,
                model.updated_by,
            ),
        }
    }
}
