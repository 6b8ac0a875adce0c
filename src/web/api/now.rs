use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::ephemeris::{time::parse_reference, EphemerisError, NearestResult};
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct NowQuery {
    #[serde(default)]
    pub at: Option<String>,
}

#[utoipa::path(
    get,
    path = "/now",
    tag = "epochs",
    params(
        ("at" = Option<String>, Query, description = "Reference time, feed format or RFC3339 (default: now)")
    ),
    responses(
        (status = 200, description = "Sample closest to the reference time", body = NearestResult),
        (status = 400, description = "Unparseable reference time", body = ErrorResponse),
        (status = 503, description = "No epochs loaded", body = ErrorResponse)
    )
)]
pub async fn now(
    State(state): State<AppState>,
    Query(query): Query<NowQuery>,
) -> ApiResult<Json<NearestResult>> {
    let reference = match query.at.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(text) => parse_reference(text).map_err(|_| {
            EphemerisError::InvalidArgument(format!("unrecognised reference time {text:?}"))
        })?,
        None => Utc::now(),
    };

    let mut result = state.store.nearest(reference)?;
    result.location = state.geocoder.annotate(result.location).await;
    Ok(Json(result))
}
