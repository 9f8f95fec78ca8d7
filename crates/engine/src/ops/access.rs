//! Ownership checks shared by the services.
//!
//! Every helper is generic over [`ConnectionTrait`] so it runs either on the
//! plain connection or inside an open transaction scope.

use sea_orm::{ConnectionTrait, PaginatorTrait, QueryFilter, prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, categories, sub_categories, transactions, users};

use super::Engine;

impl Engine {
    pub(super) async fn require_user(
        &self,
        db: &impl ConnectionTrait,
        user_id: Uuid,
    ) -> ResultEngine<users::Model> {
        users::Entity::find_by_id(user_id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| EngineError::NotFound("user not exists".to_string()))
    }

    /// Load a category and check it belongs to `user_id`.
    pub(super) async fn require_category(
        &self,
        db: &impl ConnectionTrait,
        category_id: i32,
        user_id: Uuid,
    ) -> ResultEngine<categories::Model> {
        let model = categories::Entity::find_by_id(category_id)
            .one(db)
            .await?
            .ok_or_else(|| EngineError::NotFound("category not exists".to_string()))?;
        if model.user_id != user_id.to_string() {
            return Err(EngineError::Unauthorized(
                "category belongs to another user".to_string(),
            ));
        }
        Ok(model)
    }

    /// Load a sub-category and check its parent belongs to `user_id`.
    pub(super) async fn require_sub_category(
        &self,
        db: &impl ConnectionTrait,
        sub_category_id: i32,
        user_id: Uuid,
    ) -> ResultEngine<sub_categories::Model> {
        let model = sub_categories::Entity::find_by_id(sub_category_id)
            .one(db)
            .await?
            .ok_or_else(|| EngineError::NotFound("sub-category not exists".to_string()))?;
        self.require_category(db, model.category_id, user_id)
            .await
            .map_err(|err| match err {
                EngineError::Unauthorized(_) => EngineError::Unauthorized(
                    "sub-category belongs to another user".to_string(),
                ),
                other => other,
            })?;
        Ok(model)
    }

    /// Resolve the optional sub-category of a posting and check it hangs off
    /// `category_id`.
    pub(super) async fn require_sub_category_of(
        &self,
        db: &impl ConnectionTrait,
        sub_category_id: Option<i32>,
        category_id: i32,
    ) -> ResultEngine<Option<sub_categories::Model>> {
        let Some(sub_category_id) = sub_category_id else {
            return Ok(None);
        };
        let model = sub_categories::Entity::find_by_id(sub_category_id)
            .one(db)
            .await?
            .ok_or_else(|| EngineError::NotFound("sub-category not exists".to_string()))?;
        if model.category_id != category_id {
            return Err(EngineError::InvalidArgument(format!(
                "sub-category {sub_category_id} does not belong to category {category_id}"
            )));
        }
        Ok(Some(model))
    }

    /// Load a transaction owned by `user_id`.
    ///
    /// A transaction owned by someone else is reported as missing.
    pub(super) async fn require_transaction(
        &self,
        db: &impl ConnectionTrait,
        transaction_id: i32,
        user_id: Uuid,
    ) -> ResultEngine<transactions::Model> {
        transactions::Entity::find_by_id(transaction_id)
            .filter(transactions::Column::UserId.eq(user_id.to_string()))
            .one(db)
            .await?
            .ok_or_else(|| EngineError::NotFound("transaction not exists".to_string()))
    }

    /// Fail with `Conflict` while any transaction still references the
    /// filtered rows.
    pub(super) async fn require_unreferenced(
        &self,
        db: &impl ConnectionTrait,
        column: transactions::Column,
        id: i32,
        what: &str,
    ) -> ResultEngine<()> {
        let count = transactions::Entity::find()
            .filter(column.eq(id))
            .count(db)
            .await?;
        if count > 0 {
            return Err(EngineError::Conflict(format!(
                "{what} is referenced by {count} transaction(s)"
            )));
        }
        Ok(())
    }
}
