use chrono::Utc;
use sea_orm::{ActiveValue, JoinType, QueryFilter, QueryOrder, QuerySelect, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{ResultEngine, SubCategory, categories, sub_categories, transactions};

use super::{Engine, normalize_required_name, with_tx};

impl Engine {
    /// Create a sub-category under a category owned by `user_id`.
    pub async fn create_sub_category(
        &self,
        name: &str,
        category_id: i32,
        user_id: Uuid,
    ) -> ResultEngine<SubCategory> {
        let name = normalize_required_name(name, "sub-category name")?;

        with_tx!(self, |db_tx| {
            self.require_category(&db_tx, category_id, user_id).await?;
            let model = sub_categories::ActiveModel {
                id: ActiveValue::NotSet,
                name: ActiveValue::Set(name),
                category_id: ActiveValue::Set(category_id),
                created_at: ActiveValue::Set(Utc::now()),
                created_by: ActiveValue::Set(user_id.to_string()),
                updated_at: ActiveValue::Set(None),
                updated_by: ActiveValue::Set(None),
            }
            .insert(&db_tx)
            .await?;
            Ok(SubCategory::from(model))
        })
    }

    pub async fn sub_category(
        &self,
        sub_category_id: i32,
        user_id: Uuid,
    ) -> ResultEngine<SubCategory> {
        let model = self
            .require_sub_category(&self.database, sub_category_id, user_id)
            .await?;
        Ok(SubCategory::from(model))
    }

    /// List sub-categories whose parent is owned by `user_id`.
    ///
    /// With `category_id`, only that category's sub-categories are returned
    /// (after checking the caller owns it).
    pub async fn list_sub_categories(
        &self,
        category_id: Option<i32>,
        user_id: Uuid,
    ) -> ResultEngine<Vec<SubCategory>> {
        if let Some(category_id) = category_id {
            self.require_category(&self.database, category_id, user_id)
                .await?;
        }

        let mut query = sub_categories::Entity::find()
            .join(JoinType::InnerJoin, sub_categories::Relation::Category.def())
            .filter(categories::Column::UserId.eq(user_id.to_string()));
        if let Some(category_id) = category_id {
            query = query.filter(sub_categories::Column::CategoryId.eq(category_id));
        }

        let models = query
            .order_by_asc(sub_categories::Column::Id)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(SubCategory::from).collect())
    }

    /// Rename a sub-category and/or move it under another category.
    ///
    /// The caller must own both the current and the new parent. A move is
    /// refused with `Conflict` while transactions reference the sub-category.
    pub async fn update_sub_category(
        &self,
        sub_category_id: i32,
        name: &str,
        category_id: i32,
        user_id: Uuid,
    ) -> ResultEngine<SubCategory> {
        let name = normalize_required_name(name, "sub-category name")?;

        with_tx!(self, |db_tx| {
            let current = self
                .require_sub_category(&db_tx, sub_category_id, user_id)
                .await?;
            if current.category_id != category_id {
                self.require_category(&db_tx, category_id, user_id).await?;
                self.require_unreferenced(
                    &db_tx,
                    transactions::Column::SubCategoryId,
                    sub_category_id,
                    "sub-category",
                )
                .await?;
            }
            let model = sub_categories::ActiveModel {
                id: ActiveValue::Unchanged(sub_category_id),
                name: ActiveValue::Set(name),
                category_id: ActiveValue::Set(category_id),
                updated_at: ActiveValue::Set(Some(Utc::now())),
                updated_by: ActiveValue::Set(Some(user_id.to_string())),
                ..Default::default()
            }
            .update(&db_tx)
            .await?;
            Ok(SubCategory::from(model))
        })
    }

    /// Delete a sub-category. Refused with `Conflict` while transactions
    /// reference it.
    pub async fn delete_sub_category(&self, sub_category_id: i32, user_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_sub_category(&db_tx, sub_category_id, user_id)
                .await?;
            self.require_unreferenced(
                &db_tx,
                transactions::Column::SubCategoryId,
                sub_category_id,
                "sub-category",
            )
            .await?;
            sub_categories::Entity::delete_by_id(sub_category_id)
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }
}
