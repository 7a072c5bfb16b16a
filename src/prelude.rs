//! Prelude module for common pinmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use pinmap::prelude::*;`

pub use crate::core::{
    config::{MapConfig, MarkerConfig, PopupConfig},
    geo::{LatLng, LatLngBounds, Point, ScreenRect},
    map::MapCanvas,
    viewport::{InitialViewState, Viewport},
};

pub use crate::data::locations::{
    parse_locations, seattle_locations, validate_locations, LocationRecord, SEATTLE_LOCATIONS,
};

pub use crate::input::{
    events::{ClickEvent, EventHandled, InputEvent, MapEvent, MapEventKind, MouseButton},
    handler::EventManager,
};

pub use crate::layers::{
    base::{LayerProperties, LayerTrait},
    manager::MarkerManager,
    marker::{Marker, MarkerState, PopupView, Transition},
};

#[cfg(feature = "egui")]
pub use crate::ui::{
    style::{MapStyle, MarkerStyle, PopupStyle},
    widget::MapView,
    UiMapExt,
};

pub use crate::{MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
