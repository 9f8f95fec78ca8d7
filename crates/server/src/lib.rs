use api_types::ErrorResponse;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use engine::{EngineError, ErrorKind};

pub use server::{AuthUser, ServerState, router, run_with_listener};

mod categories;
mod extract;
mod server;
mod sub_categories;
mod transactions;
mod user;

pub mod types {
    pub mod user {
        pub use api_types::user::{
            BalanceUpdate, LoginResponse, PasswordUpdate, ProfileUpdate, UserLogin, UserRegister,
            UserView,
        };
    }

    pub mod category {
        pub use api_types::category::{
            CategoryCreate, CategoryUpdate, CategoryView, SubCategoryCreate, SubCategoryList,
            SubCategoryUpdate, SubCategoryView,
        };
    }

    pub mod transaction {
        pub use api_types::transaction::{TransactionList, TransactionNew, TransactionView};
    }

    pub use api_types::{ApiResponse, ErrorResponse, Pagination};
}

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    /// Malformed request (body, query string or path). The rejection detail
    /// is reported in `errors`.
    Generic(String),
}

fn status_for_kind(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::Internal(message) => {
            tracing::error!("internal error: {message}");
            "internal server error".to_string()
        }
        EngineError::InvalidArgument(message)
        | EngineError::NotFound(message)
        | EngineError::Conflict(message)
        | EngineError::Unauthorized(message) => message,
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (kind, message, errors) = match self {
            ServerError::Engine(err) => (err.kind(), message_for_engine_error(err), Vec::new()),
            ServerError::Generic(detail) => (
                ErrorKind::InvalidArgument,
                "malformed request".to_string(),
                vec![detail],
            ),
        };
        let status = status_for_kind(kind);
        let body = ErrorResponse {
            code: status.as_u16(),
            kind: kind.as_str().to_string(),
            message,
            errors,
        };

        (status, Json(body)).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        Self::Generic(value.body_text())
    }
}

impl From<QueryRejection> for ServerError {
    fn from(value: QueryRejection) -> Self {
        Self::Generic(value.body_text())
    }
}

impl From<PathRejection> for ServerError {
    fn from(value: PathRejection) -> Self {
        Self::Generic(value.body_text())
    }
}
