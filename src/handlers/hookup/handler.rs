//! Hookup handler implementations
//!
//! Each handler runs after its gates, calls exactly one service method and
//! wraps the result in the success envelope. Errors are returned as-is.

use axum::extract::State;
use uuid::Uuid;

use crate::{
    error::AppResult,
    extract::{Path, Query},
    handlers::envelope::Success,
    middleware::{AuthenticatedUser, UploadedImage, ValidatedJson},
    models::{HookupDetails, HookupWinner},
    state::AppState,
};

use super::request::{
    CreateHookupRequest, GenderQuery, ListHookupsQuery, SetStatusRequest, UpdateWinnerRequest,
};

/// Open a round for a gender
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateHookupRequest>,
) -> AppResult<Success<HookupDetails>> {
    let data = state.hookups().create(payload.gender.parse()?).await?;
    Ok(Success::created(data))
}

/// Active round for a gender
pub async fn get_active(
    State(state): State<AppState>,
    Query(query): Query<GenderQuery>,
) -> AppResult<Success<HookupDetails>> {
    let data = state.hookups().get_active(query.gender()?).await?;
    Ok(Success::ok(data))
}

/// List rounds
pub async fn get_all(
    State(state): State<AppState>,
    Query(query): Query<ListHookupsQuery>,
) -> AppResult<Success<Vec<HookupDetails>>> {
    let data = state.hookups().get_all(query.into()).await?;
    Ok(Success::ok(data))
}

/// Most recent winners
pub async fn get_last_winners(
    State(state): State<AppState>,
) -> AppResult<Success<Vec<HookupWinner>>> {
    let data = state.hookups().get_last_winners().await?;
    Ok(Success::ok(data))
}

/// All winners for a gender
pub async fn get_all_winners(
    State(state): State<AppState>,
    Query(query): Query<GenderQuery>,
) -> AppResult<Success<Vec<HookupWinner>>> {
    let data = state.hookups().get_all_winners(query.gender()?).await?;
    Ok(Success::ok(data))
}

/// Submit the caller's photo to a round
pub async fn submit_photo(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    image: UploadedImage,
) -> AppResult<Success<HookupDetails>> {
    let data = state.hookups().add(id, user.id, image.filename).await?;
    Ok(Success::ok(data))
}

/// Pick a round's winner
pub async fn update_winner(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateWinnerRequest>,
) -> AppResult<Success<HookupDetails>> {
    let data = state.hookups().set_winner(id, payload.user).await?;
    Ok(Success::ok(data))
}

/// Change a round's status
pub async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<SetStatusRequest>,
) -> AppResult<Success<HookupDetails>> {
    let data = state
        .hookups()
        .update_status(id, payload.status.parse()?)
        .await?;
    Ok(Success::ok(data))
}
