//! Command structs for engine operations.
//!
//! These types group parameters for write operations (registration,
//! posting and updating transactions) and for the filtered transaction
//! listing, keeping call sites readable and avoiding long argument lists.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::TransactionType;

/// Register a new user.
#[derive(Clone, Debug)]
pub struct RegisterCmd {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisterCmd {
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Post (or rewrite) a transaction on behalf of `user_id`.
///
/// `transaction_type` and `transaction_date` are kept as submitted and
/// validated by the engine inside the posting scope.
#[derive(Clone, Debug)]
pub struct TransactionCmd {
    pub user_id: Uuid,
    pub amount: i64,
    pub category_id: i32,
    pub sub_category_id: Option<i32>,
    pub transaction_type: String,
    pub transaction_date: String,
    pub note: Option<String>,
}

impl TransactionCmd {
    #[must_use]
    pub fn new(
        user_id: Uuid,
        amount: i64,
        category_id: i32,
        transaction_type: impl Into<String>,
        transaction_date: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            amount,
            category_id,
            sub_category_id: None,
            transaction_type: transaction_type.into(),
            transaction_date: transaction_date.into(),
            note: None,
        }
    }

    #[must_use]
    pub fn sub_category_id(mut self, sub_category_id: i32) -> Self {
        self.sub_category_id = Some(sub_category_id);
        self
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Filters for listing a user's transactions.
///
/// Both `start_date` and `end_date` are inclusive. Absent `page`/`limit`
/// fall back to page 1 of 10.
#[derive(Clone, Debug, Default)]
pub struct TransactionListFilter {
    pub category_id: Option<i32>,
    pub sub_category_id: Option<i32>,
    pub transaction_type: Option<TransactionType>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl TransactionListFilter {
    #[must_use]
    pub fn category_id(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }

    #[must_use]
    pub fn sub_category_id(mut self, sub_category_id: i32) -> Self {
        self.sub_category_id = Some(sub_category_id);
        self
    }

    #[must_use]
    pub fn transaction_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = Some(transaction_type);
        self
    }

    #[must_use]
    pub fn between(mut self, start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    #[must_use]
    pub fn page(mut self, page: u64, limit: u64) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }
}
