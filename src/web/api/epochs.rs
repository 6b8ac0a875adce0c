use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::ephemeris::{DerivedLocation, DerivedSpeed, StateRecord};
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::state::AppState;

/// Raw strings, so that bad numbers surface as `invalid_argument`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct EpochsQuery {
    #[serde(default)]
    pub offset: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

#[utoipa::path(
    get,
    path = "/epochs",
    tag = "epochs",
    params(
        ("offset" = Option<String>, Query, description = "Index of the first epoch (default 0)"),
        ("limit" = Option<String>, Query, description = "Maximum number of epochs (default all)")
    ),
    responses(
        (status = 200, description = "Epoch identifiers in series order", body = Vec<String>),
        (status = 400, description = "offset or limit is not an integer", body = ErrorResponse)
    )
)]
pub async fn list_epochs(
    State(state): State<AppState>,
    Query(query): Query<EpochsQuery>,
) -> ApiResult<Json<Vec<String>>> {
    let epochs = state
        .store
        .slice(query.offset.as_deref(), query.limit.as_deref())?;
    Ok(Json(epochs))
}

#[utoipa::path(
    get,
    path = "/epochs/{index}",
    tag = "epochs",
    params(
        ("index" = String, Path, description = "Zero-based position in the current series")
    ),
    responses(
        (status = 200, description = "State vector", body = StateRecord),
        (status = 400, description = "Index is not an integer", body = ErrorResponse),
        (status = 404, description = "Index outside the series", body = ErrorResponse)
    )
)]
pub async fn get_epoch(
    State(state): State<AppState>,
    Path(index): Path<String>,
) -> ApiResult<Json<StateRecord>> {
    let index = state.store.index(&index)?;
    Ok(Json(state.store.get(index)?))
}

#[utoipa::path(
    get,
    path = "/epochs/{index}/speed",
    tag = "epochs",
    params(
        ("index" = String, Path, description = "Zero-based position in the current series")
    ),
    responses(
        (status = 200, description = "Instantaneous speed", body = DerivedSpeed),
        (status = 400, description = "Index is not an integer", body = ErrorResponse),
        (status = 404, description = "Index outside the series", body = ErrorResponse)
    )
)]
pub async fn get_speed(
    State(state): State<AppState>,
    Path(index): Path<String>,
) -> ApiResult<Json<DerivedSpeed>> {
    let index = state.store.index(&index)?;
    Ok(Json(state.store.speed(index)?))
}

#[utoipa::path(
    get,
    path = "/epochs/{index}/location",
    tag = "epochs",
    params(
        ("index" = String, Path, description = "Zero-based position in the current series")
    ),
    responses(
        (status = 200, description = "Geodetic sub-point", body = DerivedLocation),
        (status = 400, description = "Index is not an integer", body = ErrorResponse),
        (status = 404, description = "Index outside the series", body = ErrorResponse),
        (status = 500, description = "Stored epoch is malformed", body = ErrorResponse)
    )
)]
pub async fn get_location(
    State(state): State<AppState>,
    Path(index): Path<String>,
) -> ApiResult<Json<DerivedLocation>> {
    let index = state.store.index(&index)?;
    let location = state.store.location(index)?;
    Ok(Json(state.geocoder.annotate(location).await))
}
