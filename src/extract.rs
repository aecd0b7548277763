//! Extractors that reject with [`AppError`]
//!
//! Drop-in replacements for axum's `Path` and `Query` so malformed
//! parameters render through the shared error envelope.

use axum::extract::FromRequestParts;

use crate::error::AppError;

/// Path parameters
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);

/// Query string parameters
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);
