use utoipa::OpenApi;

use super::api::{dataset, epochs, error::ErrorResponse, now};

#[derive(OpenApi)]
#[openapi(
    paths(
        dataset::get_dataset,
        dataset::delete_data,
        dataset::post_data,
        dataset::comment,
        dataset::header,
        dataset::metadata,
        epochs::list_epochs,
        epochs::get_epoch,
        epochs::get_speed,
        epochs::get_location,
        now::now,
    ),
    components(
        schemas(
            ErrorResponse,
            dataset::ReloadResponse,
            epochs::EpochsQuery,
            now::NowQuery,
            crate::ephemeris::Series,
            crate::ephemeris::StateRecord,
            crate::ephemeris::Vector3,
            crate::ephemeris::DerivedSpeed,
            crate::ephemeris::DerivedLocation,
            crate::ephemeris::Altitude,
            crate::ephemeris::Place,
            crate::ephemeris::NearestResult,
            crate::feed::Ancillary,
        )
    ),
    info(
        title = "ISS Tracker API",
        description = "Query the ISS state-vector ephemeris: epochs, speed, sub-point location",
        version = "0.1.0"
    ),
    tags(
        (name = "dataset", description = "Whole-series access and reload"),
        (name = "epochs", description = "Per-epoch queries and derived values")
    )
)]
pub struct ApiDoc;
