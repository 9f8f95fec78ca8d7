//! Categories API endpoints.

use api_types::{
    ApiResponse,
    category::{CategoryCreate, CategoryUpdate, CategoryView},
};
use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::{
    ServerError,
    extract::{IdPath, JsonBody},
    server::{AuthUser, ServerState},
};

fn map_category(category: engine::Category) -> CategoryView {
    CategoryView {
        id: category.id,
        name: category.name,
        user_id: category.user_id,
        created_at: category.audit.created_at,
        created_by: category.audit.created_by,
        updated_at: category.audit.updated_at,
        updated_by: category.audit.updated_by,
    }
}

pub async fn list(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
) -> Result<Json<ApiResponse<Vec<CategoryView>>>, ServerError> {
    let categories = state
        .engine
        .list_categories(user.id)
        .await?
        .into_iter()
        .map(map_category)
        .collect();

    Ok(Json(ApiResponse::new(
        StatusCode::OK.as_u16(),
        "categories",
        categories,
    )))
}

pub async fn create(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<CategoryCreate>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryView>>), ServerError> {
    let category = state
        .engine
        .create_category(&payload.name, user.id)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            StatusCode::CREATED.as_u16(),
            "category created",
            map_category(category),
        )),
    ))
}

pub async fn get(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    IdPath(category_id): IdPath<i32>,
) -> Result<Json<ApiResponse<CategoryView>>, ServerError> {
    let category = state.engine.category(category_id, user.id).await?;
    Ok(Json(ApiResponse::new(
        StatusCode::OK.as_u16(),
        "category",
        map_category(category),
    )))
}

pub async fn update(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    IdPath(category_id): IdPath<i32>,
    JsonBody(payload): JsonBody<CategoryUpdate>,
) -> Result<Json<ApiResponse<CategoryView>>, ServerError> {
    let category = state
        .engine
        .update_category(category_id, &payload.name, user.id)
        .await?;
    Ok(Json(ApiResponse::new(
        StatusCode::OK.as_u16(),
        "category updated",
        map_category(category),
    )))
}

pub async fn delete(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    IdPath(category_id): IdPath<i32>,
) -> Result<Json<ApiResponse<()>>, ServerError> {
    state.engine.delete_category(category_id, user.id).await?;
    Ok(Json(ApiResponse::new(
        StatusCode::OK.as_u16(),
        "category deleted",
        (),
    )))
}
