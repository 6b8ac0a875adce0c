use axum::response::IntoResponse;

use super::templates::{HelpTemplate, RouteHelp};

const ROUTES: &[RouteHelp] = &[
    RouteHelp { method: "GET", path: "/", description: "The entire data set with its units." },
    RouteHelp { method: "GET", path: "/epochs", description: "All epochs in the data set." },
    RouteHelp {
        method: "GET",
        path: "/epochs?limit=int&offset=int",
        description: "Epochs starting at offset (default 0), at most limit of them (default all).",
    },
    RouteHelp { method: "GET", path: "/epochs/<epoch>", description: "Position and velocity of one epoch, by index." },
    RouteHelp { method: "GET", path: "/epochs/<epoch>/speed", description: "Instantaneous speed of one epoch." },
    RouteHelp {
        method: "GET",
        path: "/epochs/<epoch>/location",
        description: "Latitude, longitude, altitude and geoposition of one epoch.",
    },
    RouteHelp {
        method: "GET",
        path: "/now?at=time",
        description: "Location and speed of the epoch nearest in time (default: now).",
    },
    RouteHelp { method: "DELETE", path: "/delete-data", description: "Deletes all epochs from the data set." },
    RouteHelp { method: "POST", path: "/post-data", description: "Reloads the data set from the feed." },
    RouteHelp { method: "GET", path: "/comment", description: "The COMMENT list of the feed." },
    RouteHelp { method: "GET", path: "/header", description: "The header of the feed." },
    RouteHelp { method: "GET", path: "/metadata", description: "The metadata of the feed." },
    RouteHelp { method: "GET", path: "/swagger-ui", description: "Interactive API documentation." },
];

pub async fn help() -> impl IntoResponse {
    HelpTemplate { routes: ROUTES }
}
