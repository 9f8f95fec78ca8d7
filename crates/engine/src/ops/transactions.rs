//! Transaction posting engine.
//!
//! Writes (`write`) validate the category/sub-category/user graph, move the
//! owner's balance and persist the row inside one scope. Reads (`list`)
//! return records enriched with category names.

use std::collections::HashMap;

use chrono::NaiveDate;
use sea_orm::{ConnectionTrait, QueryFilter, prelude::*};

use crate::{
    EngineError, ResultEngine, Transaction, TransactionCmd, TransactionDetail, TransactionType,
    categories, sub_categories, transactions, util::parse_date,
};

use super::{Engine, normalize_optional_text};

mod list;
mod write;

/// A [`TransactionCmd`] after field validation.
struct Posting {
    amount: i64,
    transaction_type: TransactionType,
    transaction_date: NaiveDate,
    note: Option<String>,
}

impl Posting {
    fn signed_amount(&self) -> i64 {
        self.transaction_type.signed(self.amount)
    }
}

impl TryFrom<&TransactionCmd> for Posting {
    type Error = EngineError;

    fn try_from(cmd: &TransactionCmd) -> ResultEngine<Self> {
        let transaction_type = TransactionType::try_from(cmd.transaction_type.trim())?;
        let transaction_date = parse_date(&cmd.transaction_date, "transaction_date")?;
        if cmd.amount <= 0 {
            return Err(EngineError::InvalidArgument(
                "amount must be > 0".to_string(),
            ));
        }
        Ok(Self {
            amount: cmd.amount,
            transaction_type,
            transaction_date,
            note: normalize_optional_text(cmd.note.as_deref()),
        })
    }
}

/// Parse a `YYYY-MM-DD` date as accepted by the transaction filters.
pub fn parse_transaction_date(value: &str) -> ResultEngine<NaiveDate> {
    parse_date(value, "date")
}

impl Engine {
    /// Attach category and sub-category names to transaction rows.
    async fn transaction_details(
        &self,
        db: &impl ConnectionTrait,
        models: Vec<transactions::Model>,
    ) -> ResultEngine<Vec<TransactionDetail>> {
        let mut category_ids: Vec<i32> = models.iter().map(|m| m.category_id).collect();
        category_ids.sort_unstable();
        category_ids.dedup();
        let mut sub_category_ids: Vec<i32> =
            models.iter().filter_map(|m| m.sub_category_id).collect();
        sub_category_ids.sort_unstable();
        sub_category_ids.dedup();

        let category_names: HashMap<i32, String> = if category_ids.is_empty() {
            HashMap::new()
        } else {
            categories::Entity::find()
                .filter(categories::Column::Id.is_in(category_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|c| (c.id, c.name))
                .collect()
        };
        let sub_category_names: HashMap<i32, String> = if sub_category_ids.is_empty() {
            HashMap::new()
        } else {
            sub_categories::Entity::find()
                .filter(sub_categories::Column::Id.is_in(sub_category_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|s| (s.id, s.name))
                .collect()
        };

        models
            .into_iter()
            .map(|model| {
                let category_name = category_names
                    .get(&model.category_id)
                    .cloned()
                    .ok_or_else(|| EngineError::NotFound("category not exists".to_string()))?;
                let sub_category_name = model
                    .sub_category_id
                    .and_then(|id| sub_category_names.get(&id).cloned());
                Ok(TransactionDetail {
                    transaction: Transaction::try_from(model)?,
                    category_name,
                    sub_category_name,
                })
            })
            .collect()
    }
}
