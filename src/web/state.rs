use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ephemeris::EphemerisStore;
use crate::feed::{Ancillary, FeedDocument, FeedLoader};
use crate::geocode::Geocoder;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<EphemerisStore>,
    pub ancillary: Arc<RwLock<Arc<Ancillary>>>,
    pub loader: Arc<FeedLoader>,
    pub geocoder: Arc<Geocoder>,
}

impl AppState {
    pub fn new(loader: FeedLoader, geocoder: Geocoder) -> Self {
        Self {
            store: Arc::new(EphemerisStore::new()),
            ancillary: Arc::new(RwLock::new(Arc::new(Ancillary::default()))),
            loader: Arc::new(loader),
            geocoder: Arc::new(geocoder),
        }
    }

    /// Swap in a freshly decoded document: series and ancillary data together.
    pub async fn install(&self, document: FeedDocument) {
        let FeedDocument { series, ancillary } = document;
        let mut current = self.ancillary.write().await;
        self.store.load(series);
        *current = Arc::new(ancillary);
        log::info!("Installed {} epochs", self.store.len());
    }

    pub async fn ancillary(&self) -> Arc<Ancillary> {
        self.ancillary.read().await.clone()
    }
}
