use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, patch, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
    typed_header::TypedHeaderRejection,
};
use uuid::Uuid;

use std::sync::Arc;

use crate::{ServerError, categories, sub_categories, transactions, user};
use engine::{Engine, EngineError};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Identity of the caller, injected by the bearer middleware.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
}

/// Requests must carry `Authorization: Bearer <token>` issued by login.
async fn auth(
    auth_header: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    State(state): State<ServerState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let Ok(TypedHeader(Authorization(bearer))) = auth_header else {
        return Err(EngineError::Unauthorized("missing bearer token".to_string()).into());
    };

    let identity = state.engine.verify_token(bearer.token())?;
    request.extensions_mut().insert(AuthUser {
        id: identity.user_id,
        username: identity.username,
    });
    Ok(next.run(request).await)
}

pub fn router(state: ServerState) -> Router {
    let protected = Router::new()
        .route("/api/users/profile", get(user::profile).put(user::update_profile))
        .route("/api/users/balance", patch(user::update_balance))
        .route("/api/users/password", patch(user::update_password))
        .route(
            "/api/transaction-categories",
            get(categories::list).post(categories::create),
        )
        .route(
            "/api/transaction-categories/{id}",
            get(categories::get)
                .put(categories::update)
                .delete(categories::delete),
        )
        .route(
            "/api/transaction-categories/sub-categories",
            get(sub_categories::list).post(sub_categories::create),
        )
        .route(
            "/api/transaction-categories/sub-categories/{id}",
            get(sub_categories::get)
                .put(sub_categories::update)
                .delete(sub_categories::delete),
        )
        .route(
            "/api/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route(
            "/api/transactions/{id}",
            get(transactions::get)
                .put(transactions::update)
                .delete(transactions::delete),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), auth));

    Router::new()
        .route("/api/users/register", post(user::register))
        .route("/api/users/login", post(user::login))
        .merge(protected)
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}
