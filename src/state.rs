use std::sync::Arc;

use crate::services::file_storage::FileStorage;
use crate::services::geocoding::Geocoder;
use crate::store::EntityStore;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EntityStore>,
    pub geocoder: Arc<dyn Geocoder>,
    pub files: Arc<FileStorage>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn EntityStore>,
        geocoder: Arc<dyn Geocoder>,
        files: Arc<FileStorage>,
    ) -> Self {
        Self { store, geocoder, files }
    }
}
