//! Registration, login and profile endpoints.

use api_types::{
    ApiResponse,
    user::{
        BalanceUpdate, LoginResponse, PasswordUpdate, ProfileUpdate, UserLogin, UserRegister,
        UserView,
    },
};
use axum::{Extension, Json, extract::State, http::StatusCode};
use engine::RegisterCmd;

use crate::{ServerError, extract::JsonBody, server::AuthUser, server::ServerState};

pub(crate) fn map_user(user: engine::User) -> UserView {
    UserView {
        id: user.id,
        username: user.username,
        email: user.email,
        balance: user.balance,
        created_at: user.audit.created_at,
        created_by: user.audit.created_by,
        updated_at: user.audit.updated_at,
        updated_by: user.audit.updated_by,
    }
}

pub async fn register(
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<UserRegister>,
) -> Result<(StatusCode, Json<ApiResponse<UserView>>), ServerError> {
    let user = state
        .engine
        .register(RegisterCmd::new(
            payload.username,
            payload.email,
            payload.password,
        ))
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            StatusCode::CREATED.as_u16(),
            "user registered",
            map_user(user),
        )),
    ))
}

pub async fn login(
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<UserLogin>,
) -> Result<Json<ApiResponse<LoginResponse>>, ServerError> {
    let session = state
        .engine
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(ApiResponse::new(
        StatusCode::OK.as_u16(),
        "login succeeded",
        LoginResponse {
            token: session.token,
            user_id: session.user_id,
        },
    )))
}

pub async fn profile(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
) -> Result<Json<ApiResponse<UserView>>, ServerError> {
    let user = state.engine.user(user.id).await?;
    Ok(Json(ApiResponse::new(
        StatusCode::OK.as_u16(),
        "profile",
        map_user(user),
    )))
}

pub async fn update_profile(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<ProfileUpdate>,
) -> Result<Json<ApiResponse<UserView>>, ServerError> {
    let user = state
        .engine
        .update_profile(user.id, &payload.username, &payload.email)
        .await?;
    Ok(Json(ApiResponse::new(
        StatusCode::OK.as_u16(),
        "profile updated",
        map_user(user),
    )))
}

pub async fn update_balance(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<BalanceUpdate>,
) -> Result<Json<ApiResponse<UserView>>, ServerError> {
    let user = state
        .engine
        .update_balance(user.id, payload.balance)
        .await?;
    Ok(Json(ApiResponse::new(
        StatusCode::OK.as_u16(),
        "balance updated",
        map_user(user),
    )))
}

pub async fn update_password(
    Extension(user): Extension<AuthUser>,
    State(state): State<ServerState>,
    JsonBody(payload): JsonBody<PasswordUpdate>,
) -> Result<Json<ApiResponse<()>>, ServerError> {
    state
        .engine
        .update_password(user.id, &payload.old_password, &payload.new_password)
        .await?;
    tracing::info!(user = %user.username, "password updated");
    Ok(Json(ApiResponse::new(
        StatusCode::OK.as_u16(),
        "password updated",
        (),
    )))
}
