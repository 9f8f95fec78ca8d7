use chrono::Utc;
use sea_orm::{ActiveValue, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine, Transaction, TransactionCmd, TransactionDetail, TransactionType,
    transactions,
};

use super::{super::with_tx, Engine, Posting};

impl Engine {
    /// Post a transaction and apply its signed amount to the owner's balance.
    ///
    /// All checks run inside the same scope as the writes:
    /// 1. the category exists and belongs to the caller
    /// 2. the sub-category, if any, exists and belongs to that category
    /// 3. the acting user still exists
    /// 4. type, date and amount are valid
    ///
    /// Any failure leaves both the balance and the transactions untouched.
    /// The posted row is returned with its category names.
    pub async fn post_transaction(&self, cmd: TransactionCmd) -> ResultEngine<TransactionDetail> {
        let user_id = cmd.user_id;

        let detail = with_tx!(self, |db_tx| {
            let category = self
                .require_category(&db_tx, cmd.category_id, user_id)
                .await?;
            let sub_category = self
                .require_sub_category_of(&db_tx, cmd.sub_category_id, cmd.category_id)
                .await?;
            let user = self.require_user(&db_tx, user_id).await?;
            let posting = Posting::try_from(&cmd)?;

            self.apply_balance_delta(&db_tx, &user, posting.signed_amount(), user_id)
                .await?;

            let model = transactions::ActiveModel {
                id: ActiveValue::NotSet,
                amount: ActiveValue::Set(posting.amount),
                category_id: ActiveValue::Set(cmd.category_id),
                sub_category_id: ActiveValue::Set(cmd.sub_category_id),
                transaction_date: ActiveValue::Set(posting.transaction_date),
                transaction_type: ActiveValue::Set(posting.transaction_type.as_str().to_string()),
                note: ActiveValue::Set(posting.note),
                user_id: ActiveValue::Set(user_id.to_string()),
                created_at: ActiveValue::Set(Utc::now()),
                created_by: ActiveValue::Set(user_id.to_string()),
                updated_at: ActiveValue::Set(None),
                updated_by: ActiveValue::Set(None),
            }
            .insert(&db_tx)
            .await?;
            Ok::<_, EngineError>(TransactionDetail {
                transaction: Transaction::try_from(model)?,
                category_name: category.name,
                sub_category_name: sub_category.map(|s| s.name),
            })
        })?;

        tracing::info!(
            transaction_id = detail.transaction.id,
            user_id = %user_id,
            kind = detail.transaction.transaction_type.as_str(),
            "transaction posted"
        );
        Ok(detail)
    }

    /// Return one of the caller's transactions with its category names.
    pub async fn transaction(
        &self,
        transaction_id: i32,
        user_id: Uuid,
    ) -> ResultEngine<TransactionDetail> {
        let model = self
            .require_transaction(&self.database, transaction_id, user_id)
            .await?;
        let mut details = self
            .transaction_details(&self.database, vec![model])
            .await?;
        details
            .pop()
            .ok_or_else(|| EngineError::NotFound("transaction not exists".to_string()))
    }

    /// Rewrite a transaction.
    ///
    /// The new fields go through the same checks as a posting; the balance
    /// moves by the difference between the new and the old signed amount.
    pub async fn update_transaction(
        &self,
        transaction_id: i32,
        cmd: TransactionCmd,
    ) -> ResultEngine<TransactionDetail> {
        let user_id = cmd.user_id;

        let detail = with_tx!(self, |db_tx| {
            let current = self
                .require_transaction(&db_tx, transaction_id, user_id)
                .await?;
            let category = self
                .require_category(&db_tx, cmd.category_id, user_id)
                .await?;
            let sub_category = self
                .require_sub_category_of(&db_tx, cmd.sub_category_id, cmd.category_id)
                .await?;
            let user = self.require_user(&db_tx, user_id).await?;
            let posting = Posting::try_from(&cmd)?;

            let old_signed =
                TransactionType::try_from(current.transaction_type.as_str())?.signed(current.amount);
            let delta = posting
                .signed_amount()
                .checked_sub(old_signed)
                .ok_or_else(|| EngineError::InvalidArgument("balance overflow".to_string()))?;
            self.apply_balance_delta(&db_tx, &user, delta, user_id)
                .await?;

            let model = transactions::ActiveModel {
                id: ActiveValue::Unchanged(transaction_id),
                amount: ActiveValue::Set(posting.amount),
                category_id: ActiveValue::Set(cmd.category_id),
                sub_category_id: ActiveValue::Set(cmd.sub_category_id),
                transaction_date: ActiveValue::Set(posting.transaction_date),
                transaction_type: ActiveValue::Set(posting.transaction_type.as_str().to_string()),
                note: ActiveValue::Set(posting.note),
                updated_at: ActiveValue::Set(Some(Utc::now())),
                updated_by: ActiveValue::Set(Some(user_id.to_string())),
                ..Default::default()
            }
            .update(&db_tx)
            .await?;
            Ok::<_, EngineError>(TransactionDetail {
                transaction: Transaction::try_from(model)?,
                category_name: category.name,
                sub_category_name: sub_category.map(|s| s.name),
            })
        })?;

        tracing::info!(transaction_id, user_id = %user_id, "transaction updated");
        Ok(detail)
    }

    /// Delete a transaction and revert its effect on the balance.
    pub async fn delete_transaction(&self, transaction_id: i32, user_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let current = self
                .require_transaction(&db_tx, transaction_id, user_id)
                .await?;
            let user = self.require_user(&db_tx, user_id).await?;
            let old_signed =
                TransactionType::try_from(current.transaction_type.as_str())?.signed(current.amount);

            self.apply_balance_delta(&db_tx, &user, -old_signed, user_id)
                .await?;
            transactions::Entity::delete_by_id(transaction_id)
                .exec(&db_tx)
                .await?;
            Ok::<(), EngineError>(())
        })?;

        tracing::info!(transaction_id, user_id = %user_id, "transaction deleted");
        Ok(())
    }
}
