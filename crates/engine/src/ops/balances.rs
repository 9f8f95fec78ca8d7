use chrono::Utc;
use sea_orm::{ConnectionTrait, QueryFilter, prelude::*, sea_query::Expr};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, users, util::checked_balance};

use super::Engine;

impl Engine {
    /// Add `delta` to the user's balance.
    ///
    /// The write is a single `balance = balance + delta` statement, so two
    /// scopes posting for the same user never overwrite each other. The
    /// caller passes the balance it read for the overflow check.
    pub(super) async fn apply_balance_delta(
        &self,
        db: &impl ConnectionTrait,
        user: &users::Model,
        delta: i64,
        actor: Uuid,
    ) -> ResultEngine<()> {
        checked_balance(user.balance, delta)?;
        if delta == 0 {
            return Ok(());
        }

        let result = users::Entity::update_many()
            .col_expr(
                users::Column::Balance,
                Expr::col(users::Column::Balance).add(delta),
            )
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .col_expr(
                users::Column::UpdatedBy,
                Expr::value(Some(actor.to_string())),
            )
            .filter(users::Column::Id.eq(user.id.clone()))
            .exec(db)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::NotFound("user not exists".to_string()));
        }
        Ok(())
    }

    /// Overwrite the user's balance.
    pub(super) async fn store_balance(
        &self,
        db: &impl ConnectionTrait,
        user_id: Uuid,
        balance: i64,
        actor: &str,
    ) -> ResultEngine<()> {
        let result = users::Entity::update_many()
            .col_expr(users::Column::Balance, Expr::value(balance))
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .col_expr(
                users::Column::UpdatedBy,
                Expr::value(Some(actor.to_string())),
            )
            .filter(users::Column::Id.eq(user_id.to_string()))
            .exec(db)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::NotFound("user not exists".to_string()));
        }
        Ok(())
    }
}
