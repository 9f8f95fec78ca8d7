//! Transactions API endpoints

use api_types::{
    ApiResponse, Pagination,
    transaction::{TransactionList, TransactionNew, TransactionView},
};
use axum::{Extension, Json, extract::State, http::StatusCode};
use engine::{
    Page, TransactionCmd, TransactionDetail, TransactionListFilter, TransactionType,
    parse_transaction_date,
};
use uuid::Uuid;

use crate::{
    ServerError,
    extract::{IdPath, JsonBody, QueryParams},
    server::{AuthUser, ServerState},
};

fn map_detail(detail: TransactionDetail) -> TransactionView {
    let tx = detail.transaction;
    TransactionView {
        id: tx.id,
        amount: tx.amount,
        category_id: tx.category_id,
        category: detail.category_name,
        sub_category_id: tx.sub_category_id,
        sub_category: detail.sub_category_name,
        transaction_date: tx.transaction_date,
        transaction_type: tx.transaction_type.as_str().to_string(),
        note: tx.note,
        user_id: tx.user_id,
        created_at: tx.audit.created_at,
        created_by: tx.audit.created_by,
        updated_at: tx.audit.updated_at,
        updated_by: tx.audit.updated_by,
    }
}

fn map_page(page: Page<TransactionDetail>) -> Pagination<TransactionView> {
    let page = page.map(map_detail);
    Pagination {
        total_records: page.total_records,
        total_pages: page.total_pages,
        current_page: page.current_page,
        limit: page.limit,
        records: page.records,
        next_page: page.next_page,
        previous_page: page.previous_page,
    }
}

fn to_cmd(user_id: Uuid, payload: TransactionNew) -> TransactionCmd {
    TransactionCmd {
        user_id,
        amount: payload.amount,
        category_id: payload.category_id,
        sub_category_id: payload.sub_category_id,
        transaction_type: payload.transaction_type,
        transaction_date: payload.transaction_date,
        note: payload.note,
    }
}

/// Query strings often carry `key=` for unset filters.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn to_filter(query: TransactionList) -> Result<TransactionListFilter, ServerError> {
    let transaction_type = non_empty(query.transaction_type)
        .map(|kind| TransactionType::try_from(kind.trim()))
        .transpose()?;
    let start_date = non_empty(query.start_date)
        .map(|date| parse_transaction_date(&date))
        .transpose()?;
    let end_date = non_empty(query.end_date)
        .map(|date| parse_transaction_date(&date))
        .transpose()?;

    Ok(TransactionListFilter {
        category_id: query.category_id,
        sub_category_id: query.sub_category_id,
        transaction_type,
        start_date,
        end_date,
        page: query.page,
        limit: query.limit,
    })
}

pub async fn list(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    QueryParams(query): QueryParams<TransactionList>,
) -> Result<Json<ApiResponse<Pagination<TransactionView>>>, ServerError> {
    let filter = to_filter(query)?;
    let page = state.engine.list_transactions(user.id, &filter).await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK.as_u16(),
        "transactions",
        map_page(page),
    )))
}

pub async fn create(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<TransactionNew>,
) -> Result<(StatusCode, Json<ApiResponse<TransactionView>>), ServerError> {
    let detail = state
        .engine
        .post_transaction(to_cmd(user.id, payload))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            StatusCode::CREATED.as_u16(),
            "transaction created",
            map_detail(detail),
        )),
    ))
}

pub async fn get(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    IdPath(transaction_id): IdPath<i32>,
) -> Result<Json<ApiResponse<TransactionView>>, ServerError> {
    let detail = state.engine.transaction(transaction_id, user.id).await?;
    Ok(Json(ApiResponse::new(
        StatusCode::OK.as_u16(),
        "transaction",
        map_detail(detail),
    )))
}

pub async fn update(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    IdPath(transaction_id): IdPath<i32>,
    JsonBody(payload): JsonBody<TransactionNew>,
) -> Result<Json<ApiResponse<TransactionView>>, ServerError> {
    let detail = state
        .engine
        .update_transaction(transaction_id, to_cmd(user.id, payload))
        .await?;
    Ok(Json(ApiResponse::new(
        StatusCode::OK.as_u16(),
        "transaction updated",
        map_detail(detail),
    )))
}

pub async fn delete(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    IdPath(transaction_id): IdPath<i32>,
) -> Result<Json<ApiResponse<()>>, ServerError> {
    state
        .engine
        .delete_transaction(transaction_id, user.id)
        .await?;
    Ok(Json(ApiResponse::new(
        StatusCode::OK.as_u16(),
        "transaction deleted",
        (),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_query_values_are_ignored() {
        let filter = to_filter(TransactionList {
            start_date: Some(String::new()),
            transaction_type: Some(" ".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(filter.start_date, None);
        assert_eq!(filter.transaction_type, None);
    }

    #[test]
    fn unknown_type_is_rejected() {
        let res = to_filter(TransactionList {
            transaction_type: Some("gift".to_string()),
            ..Default::default()
        });
        assert!(matches!(
            res,
            Err(ServerError::Engine(engine::EngineError::InvalidArgument(_)))
        ));
    }

    #[test]
    fn dates_are_parsed() {
        let filter = to_filter(TransactionList {
            start_date: Some("2024-01-01".to_string()),
            end_date: Some("2024-01-31".to_string()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(filter.start_date, chrono::NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(filter.end_date, chrono::NaiveDate::from_ymd_opt(2024, 1, 31));
    }
}
