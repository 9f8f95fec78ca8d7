use chrono::Utc;
use sea_orm::{ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{Category, ResultEngine, categories, sub_categories, transactions};

use super::{Engine, normalize_required_name, with_tx};

impl Engine {
    /// Create a category owned by `user_id`.
    pub async fn create_category(&self, name: &str, user_id: Uuid) -> ResultEngine<Category> {
        let name = normalize_required_name(name, "category name")?;

        with_tx!(self, |db_tx| {
            self.require_user(&db_tx, user_id).await?;
            let model = categories::ActiveModel {
                id: ActiveValue::NotSet,
                name: ActiveValue::Set(name),
                user_id: ActiveValue::Set(user_id.to_string()),
                created_at: ActiveValue::Set(Utc::now()),
                created_by: ActiveValue::Set(user_id.to_string()),
                updated_at: ActiveValue::Set(None),
                updated_by: ActiveValue::Set(None),
            }
            .insert(&db_tx)
            .await?;
            Category::try_from(model)
        })
    }

    /// Return one category. Categories of other users are `Unauthorized`.
    pub async fn category(&self, category_id: i32, user_id: Uuid) -> ResultEngine<Category> {
        let model = self
            .require_category(&self.database, category_id, user_id)
            .await?;
        Category::try_from(model)
    }

    /// List the categories owned by `user_id`, oldest first.
    pub async fn list_categories(&self, user_id: Uuid) -> ResultEngine<Vec<Category>> {
        categories::Entity::find()
            .filter(categories::Column::UserId.eq(user_id.to_string()))
            .order_by_asc(categories::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Category::try_from)
            .collect()
    }

    /// Rename a category. Only the owner may do it.
    pub async fn update_category(
        &self,
        category_id: i32,
        name: &str,
        user_id: Uuid,
    ) -> ResultEngine<Category> {
        let name = normalize_required_name(name, "category name")?;

        with_tx!(self, |db_tx| {
            self.require_category(&db_tx, category_id, user_id).await?;
            let model = categories::ActiveModel {
                id: ActiveValue::Unchanged(category_id),
                name: ActiveValue::Set(name),
                updated_at: ActiveValue::Set(Some(Utc::now())),
                updated_by: ActiveValue::Set(Some(user_id.to_string())),
                ..Default::default()
            }
            .update(&db_tx)
            .await?;
            Category::try_from(model)
        })
    }

    /// Delete a category together with its sub-categories.
    ///
    /// Refused with `Conflict` while transactions reference the category.
    pub async fn delete_category(&self, category_id: i32, user_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_category(&db_tx, category_id, user_id).await?;
            self.require_unreferenced(
                &db_tx,
                transactions::Column::CategoryId,
                category_id,
                "category",
            )
            .await?;

            sub_categories::Entity::delete_many()
                .filter(sub_categories::Column::CategoryId.eq(category_id))
                .exec(&db_tx)
                .await?;
            categories::Entity::delete_by_id(category_id)
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }
}
