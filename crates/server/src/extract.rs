//! Extractors whose rejections render as [`ServerError`] bodies.

use axum::extract::{FromRequest, FromRequestParts, Path, Query};

use crate::ServerError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ServerError))]
pub struct JsonBody<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(ServerError))]
pub struct QueryParams<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(ServerError))]
pub struct IdPath<T>(pub T);
