pub mod file_storage;
pub mod geocoding;
pub mod place_service;
pub mod user_service;
