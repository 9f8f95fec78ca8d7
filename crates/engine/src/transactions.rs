//! Transaction primitives.
//!
//! A `Transaction` records one income or expense. Its `amount` is always the
//! positive magnitude that was submitted; the sign applied to the owner's
//! balance comes from [`TransactionType`].

use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Audit, EngineError, ResultEngine, util::parse_uuid};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Balance delta produced by `amount` of this type.
    pub fn signed(self, amount: i64) -> i64 {
        match self {
            Self::Income => amount,
            Self::Expense => -amount,
        }
    }
}

impl TryFrom<&str> for TransactionType {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::InvalidArgument(format!(
                "invalid transaction type: {other}"
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i32,
    pub amount: i64,
    pub category_id: i32,
    pub sub_category_id: Option<i32>,
    pub transaction_date: NaiveDate,
    pub transaction_type: TransactionType,
    pub note: Option<String>,
    pub user_id: Uuid,
    pub audit: Audit,
}

impl Transaction {
    /// Signed effect of this transaction on the owner's balance.
    pub fn signed_amount(&self) -> i64 {
        self.transaction_type.signed(self.amount)
    }
}

/// A transaction together with the names of its category and sub-category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDetail {
    pub transaction: Transaction,
    pub category_name: String,
    pub sub_category_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub amount: i64,
    pub category_id: i32,
    pub sub_category_id: Option<i32>,
    pub transaction_date: NaiveDate,
    pub transaction_type: String,
    pub note: Option<String>,
    pub user_id: String,
    pub created_at: DateTimeUtc,
    pub created_by: String,
    pub updated_at: Option<DateTimeUtc>,
    pub updated_by: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::sub_categories::Entity",
        from = "Column::SubCategoryId",
        to = "super::sub_categories::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    SubCategory,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::sub_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubCategory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> ResultEngine<Self> {
        Ok(Self {
            id: model.id,
            amount: model.amount,
            category_id: model.category_id,
            sub_category_id: model.sub_category_id,
            transaction_date: model.transaction_date,
            transaction_type: TransactionType::try_from(model.transaction_type.as_str())?,
            note: model.note,
            user_id: parse_uuid(&model.user_id, "user")?,
            audit: Audit::new(
                model.created_at,
                model.created_by,
                model.updated_at,
                model.updated_by,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_determines_sign() {
        assert_eq!(TransactionType::Income.signed(100), 100);
        assert_eq!(TransactionType::Expense.signed(30), -30);
    }

    #[test]
    fn parses_known_types_only() {
        assert_eq!(
            TransactionType::try_from("expense").unwrap(),
            TransactionType::Expense
        );
        assert_eq!(
            TransactionType::try_from("transfer"),
            Err(EngineError::InvalidArgument(
                "invalid transaction type: transfer".to_string()
            ))
        );
    }
}
