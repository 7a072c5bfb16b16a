//! # pinmap
//!
//! A small interactive pin map: a fixed set of locations, one marker per
//! location, and a popup per marker that opens on click and closes on its
//! close control or on a click elsewhere on the map.
//!
//! The core (viewport, markers, popup state, event routing) is plain Rust and
//! works headless. The `egui` feature adds a widget that draws the canvas.

pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod prelude;
#[cfg(feature = "egui")]
pub mod ui;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::MapConfig,
    geo::{LatLng, LatLngBounds, Point},
    map::MapCanvas,
    viewport::{InitialViewState, Viewport},
};

pub use crate::data::locations::{seattle_locations, LocationRecord};

pub use crate::input::{
    events::{ClickEvent, EventHandled, InputEvent, MapEvent},
    handler::EventManager,
};

pub use crate::layers::{
    manager::MarkerManager,
    marker::{Marker, MarkerState, PopupView, Transition},
};

#[cfg(feature = "egui")]
pub use crate::ui::{widget::MapView, UiMapExt};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Duplicate location id: {0}")]
    DuplicateLocationId(u32),

    #[error("Unknown marker: {0}")]
    UnknownMarker(u32),

    #[error("Config error: {0}")]
    Config(String),
}

/// Error type alias for convenience
pub type Error = MapError;

/// Installs `env_logger` once. Safe to call more than once.
#[cfg(feature = "debug")]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
