use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::ephemeris::Series;
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct ReloadResponse {
    pub epochs: usize,
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "dataset",
    responses(
        (status = 200, description = "The full series with its units", body = Series)
    )
)]
pub async fn get_dataset(State(state): State<AppState>) -> Json<Series> {
    Json(state.store.all().as_ref().clone())
}

#[utoipa::path(
    delete,
    path = "/delete-data",
    tag = "dataset",
    responses(
        (status = 200, description = "Series cleared", body = Series)
    )
)]
pub async fn delete_data(State(state): State<AppState>) -> Json<Series> {
    state.store.clear();
    log::info!("Series cleared");
    Json(state.store.all().as_ref().clone())
}

#[utoipa::path(
    post,
    path = "/post-data",
    tag = "dataset",
    responses(
        (status = 200, description = "Series reloaded from the feed", body = ReloadResponse),
        (status = 500, description = "Feed contains invalid records", body = ErrorResponse),
        (status = 502, description = "Feed could not be fetched", body = ErrorResponse)
    )
)]
pub async fn post_data(State(state): State<AppState>) -> ApiResult<Json<ReloadResponse>> {
    let document = state.loader.fetch().await?;
    let epochs = document.series.len();
    state.install(document).await;

    Ok(Json(ReloadResponse {
        epochs,
        message: "the data has been posted".to_string(),
    }))
}

#[utoipa::path(
    get,
    path = "/comment",
    tag = "dataset",
    responses(
        (status = 200, description = "COMMENT lines of the feed", body = Vec<String>)
    )
)]
pub async fn comment(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.ancillary().await.comment.clone())
}

#[utoipa::path(
    get,
    path = "/header",
    tag = "dataset",
    responses(
        (status = 200, description = "Feed header", body = BTreeMap<String, String>)
    )
)]
pub async fn header(State(state): State<AppState>) -> Json<BTreeMap<String, String>> {
    Json(state.ancillary().await.header.clone())
}

#[utoipa::path(
    get,
    path = "/metadata",
    tag = "dataset",
    responses(
        (status = 200, description = "Segment metadata", body = BTreeMap<String, String>)
    )
)]
pub async fn metadata(State(state): State<AppState>) -> Json<BTreeMap<String, String>> {
    Json(state.ancillary().await.metadata.clone())
}
