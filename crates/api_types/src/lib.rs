//! JSON types exchanged over the HTTP API.
//!
//! Successful responses are wrapped in [`ApiResponse`]; failures use
//! [`ErrorResponse`]. Dates travel as `YYYY-MM-DD`, timestamps as RFC 3339.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Envelope for every successful response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: String,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(code: u16, message: impl Into<String>, data: T) -> Self {
        Self {
            code,
            message: message.into(),
            data,
        }
    }
}

/// Body of every failed response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: u16,
    /// One of `invalid_argument`, `not_found`, `conflict`, `unauthorized`,
    /// `internal`.
    pub kind: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// Offset pagination envelope.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination<T> {
    pub total_records: u64,
    pub total_pages: u64,
    pub current_page: u64,
    pub limit: u64,
    pub records: Vec<T>,
    pub next_page: Option<u64>,
    pub previous_page: Option<u64>,
}

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserRegister {
        pub username: String,
        pub email: String,
        pub password: String,
    }

    /// `username` also accepts the email address; a value containing `@` is
    /// always treated as one.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserLogin {
        pub username: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginResponse {
        pub token: String,
        pub user_id: Uuid,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub id: Uuid,
        pub username: String,
        pub email: String,
        pub balance: i64,
        pub created_at: DateTime<Utc>,
        pub created_by: String,
        pub updated_at: Option<DateTime<Utc>>,
        pub updated_by: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProfileUpdate {
        pub username: String,
        pub email: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalanceUpdate {
        pub balance: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PasswordUpdate {
        pub old_password: String,
        pub new_password: String,
    }
}

pub mod category {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryCreate {
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryUpdate {
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryView {
        pub id: i32,
        pub name: String,
        pub user_id: Uuid,
        pub created_at: DateTime<Utc>,
        pub created_by: String,
        pub updated_at: Option<DateTime<Utc>>,
        pub updated_by: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SubCategoryCreate {
        pub name: String,
        pub category_id: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SubCategoryUpdate {
        pub name: String,
        pub category_id: i32,
    }

    /// Query string of `GET /api/transaction-categories/sub-categories`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct SubCategoryList {
        pub category_id: Option<i32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SubCategoryView {
        pub id: i32,
        pub name: String,
        pub category_id: i32,
        pub created_at: DateTime<Utc>,
        pub created_by: String,
        pub updated_at: Option<DateTime<Utc>>,
        pub updated_by: Option<String>,
    }
}

pub mod transaction {
    use super::*;

    /// Body of both `POST /api/transactions` and `PUT /api/transactions/{id}`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionNew {
        pub amount: i64,
        pub category_id: i32,
        pub sub_category_id: Option<i32>,
        /// `YYYY-MM-DD`.
        pub transaction_date: String,
        /// `income` or `expense`.
        pub transaction_type: String,
        pub note: Option<String>,
    }

    /// Query string of `GET /api/transactions`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionList {
        pub category_id: Option<i32>,
        pub sub_category_id: Option<i32>,
        pub start_date: Option<String>,
        pub end_date: Option<String>,
        pub transaction_type: Option<String>,
        pub page: Option<u64>,
        pub limit: Option<u64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: i32,
        pub amount: i64,
        pub category_id: i32,
        /// Category name.
        pub category: String,
        pub sub_category_id: Option<i32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub sub_category: Option<String>,
        pub transaction_date: NaiveDate,
        pub transaction_type: String,
        pub note: Option<String>,
        pub user_id: Uuid,
        pub created_at: DateTime<Utc>,
        pub created_by: String,
        pub updated_at: Option<DateTime<Utc>>,
        pub updated_by: Option<String>,
    }
}
