use api_types::{
    ApiResponse,
    category::{SubCategoryCreate, SubCategoryList, SubCategoryUpdate, SubCategoryView},
};
use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::{
    ServerError,
    extract::{IdPath, JsonBody, QueryParams},
    server::{AuthUser, ServerState},
};

fn map_sub_category(sub_category: engine::SubCategory) -> SubCategoryView {
    SubCategoryView {
        id: sub_category.id,
        name: sub_category.name,
        category_id: sub_category.category_id,
        created_at: sub_category.audit.created_at,
        created_by: sub_category.audit.created_by,
        updated_at: sub_category.audit.updated_at,
        updated_by: sub_category.audit.updated_by,
    }
}

pub async fn list(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    QueryParams(query): QueryParams<SubCategoryList>,
) -> Result<Json<ApiResponse<Vec<SubCategoryView>>>, ServerError> {
    let sub_categories = state
        .engine
        .list_sub_categories(query.category_id, user.id)
        .await?
        .into_iter()
        .map(map_sub_category)
        .collect();

    Ok(Json(ApiResponse::new(
        StatusCode::OK.as_u16(),
        "sub-categories",
        sub_categories,
    )))
}

pub async fn create(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<SubCategoryCreate>,
) -> Result<(StatusCode, Json<ApiResponse<SubCategoryView>>), ServerError> {
    let sub_category = state
        .engine
        .create_sub_category(&payload.name, payload.category_id, user.id)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            StatusCode::CREATED.as_u16(),
            "sub-category created",
            map_sub_category(sub_category),
        )),
    ))
}

pub async fn get(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    IdPath(sub_category_id): IdPath<i32>,
) -> Result<Json<ApiResponse<SubCategoryView>>, ServerError> {
    let sub_category = state.engine.sub_category(sub_category_id, user.id).await?;
    Ok(Json(ApiResponse::new(
        StatusCode::OK.as_u16(),
        "sub-category",
        map_sub_category(sub_category),
    )))
}

pub async fn update(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    IdPath(sub_category_id): IdPath<i32>,
    JsonBody(payload): JsonBody<SubCategoryUpdate>,
) -> Result<Json<ApiResponse<SubCategoryView>>, ServerError> {
    let sub_category = state
        .engine
        .update_sub_category(sub_category_id, &payload.name, payload.category_id, user.id)
        .await?;
    Ok(Json(ApiResponse::new(
        StatusCode::OK.as_u16(),
        "sub-category updated",
        map_sub_category(sub_category),
    )))
}

pub async fn delete(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    IdPath(sub_category_id): IdPath<i32>,
) -> Result<Json<ApiResponse<()>>, ServerError> {
    state
        .engine
        .delete_sub_category(sub_category_id, user.id)
        .await?;
    Ok(Json(ApiResponse::new(
        StatusCode::OK.as_u16(),
        "sub-category deleted",
        (),
    )))
}
