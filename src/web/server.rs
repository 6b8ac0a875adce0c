use axum::{routing::delete, routing::get, routing::post, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::feed::FeedLoader;
use crate::geocode::Geocoder;

use super::api::dataset as dataset_handlers;
use super::api::epochs as epoch_handlers;
use super::api::now as now_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::state::AppState;
use super::ui::handlers as ui_handlers;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Whole dataset
        .route("/", get(dataset_handlers::get_dataset))
        .route("/delete-data", delete(dataset_handlers::delete_data))
        .route("/post-data", post(dataset_handlers::post_data))
        .route("/comment", get(dataset_handlers::comment))
        .route("/header", get(dataset_handlers::header))
        .route("/metadata", get(dataset_handlers::metadata))
        // Epoch queries
        .route("/epochs", get(epoch_handlers::list_epochs))
        .route("/epochs/{index}", get(epoch_handlers::get_epoch))
        .route("/epochs/{index}/speed", get(epoch_handlers::get_speed))
        .route("/epochs/{index}/location", get(epoch_handlers::get_location))
        .route("/now", get(now_handlers::now))
        // Help page
        .route("/help", get(ui_handlers::help))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();

    let loader = FeedLoader::from_config(&config.feed).map_err(std::io::Error::other)?;
    let geocoder = Geocoder::from_config(&config.geocoder).map_err(std::io::Error::other)?;
    let state = AppState::new(loader, geocoder);

    // Start with an empty series if the first fetch fails; POST /post-data retries.
    match state.loader.fetch().await {
        Ok(document) => state.install(document).await,
        Err(e) => log::warn!("Failed to load ephemeris feed: {}", e),
    }

    let app = build_router(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}
