//! Power-plant directory backed by an ArcGIS feature service.
//!
//! The service caps how many features one query returns; when the cap is
//! hit the response sets `exceededTransferLimit`, which is surfaced as
//! [`grid_core::FacilityDirectoryResult::truncated`].

mod client;
mod config;
mod features;

pub use client::ArcGisPlantDirectory;
pub use config::{PlantDirectoryConfig, DEFAULT_DIRECTORY_URL};
pub use features::parse_feature_response;
