//! Request extractors whose rejections go through [`AppError`].

use axum::extract::FromRequest;

use crate::errors::AppError;

/// `axum::Json` with a `{error, code}` body on malformed or mistyped input.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
