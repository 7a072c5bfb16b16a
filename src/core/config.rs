//! Configuration for the pin map
//!
//! `MapConfig` carries everything the canvas and the widget need to know that
//! is not location data: the initial view, the surface size, marker glyph
//! styling and popup behavior. Defaults reproduce the Seattle map; a JSON file
//! can override any subset of fields.

use crate::core::constants::{
    DEFAULT_MAP_SIZE, DEFAULT_MARKER_SCALE, DEFAULT_POPUP_IMAGE_SIZE, DEFAULT_POPUP_OFFSET,
    MAX_ZOOM, MIN_ZOOM,
};
use crate::core::geo::Point;
use crate::core::viewport::InitialViewState;
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Marker glyph styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerConfig {
    /// Fill color as `[r, g, b]`
    pub color: [u8; 3],
    /// Scale relative to the default icon size
    pub scale: f64,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            color: [0, 0, 255],
            scale: DEFAULT_MARKER_SCALE,
        }
    }
}

/// Popup placement and dismissal behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupConfig {
    /// Pixel offset of the popup tip from the marker coordinate
    pub offset: (f64, f64),
    /// Edge length of the square image box
    pub image_size: f64,
    /// Show a close control on each popup
    pub close_button: bool,
    /// Close open popups when the map background is clicked
    pub close_on_map_click: bool,
}

impl PopupConfig {
    pub fn offset_point(&self) -> Point {
        self.offset.into()
    }
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            offset: DEFAULT_POPUP_OFFSET,
            image_size: DEFAULT_POPUP_IMAGE_SIZE,
            close_button: true,
            close_on_map_click: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub title: String,
    pub initial_view: InitialViewState,
    /// Map surface size in pixels
    pub size: (f64, f64),
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub markers: MarkerConfig,
    pub popup: PopupConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            title: "Amplify Seattle Visit".to_string(),
            initial_view: InitialViewState::default(),
            size: DEFAULT_MAP_SIZE,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
            markers: MarkerConfig::default(),
            popup: PopupConfig::default(),
        }
    }
}

impl MapConfig {
    /// Parses and validates a JSON config. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: MapConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON config from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        log::info!("loading map config from {}", path.display());
        Self::from_json_str(&json)
    }

    pub fn size_point(&self) -> Point {
        self.size.into()
    }

    pub fn validate(&self) -> Result<()> {
        let view = &self.initial_view;
        if !(-180.0..=180.0).contains(&view.longitude) || !(-90.0..=90.0).contains(&view.latitude)
        {
            return Err(MapError::InvalidCoordinates(format!(
                "initial view ({}, {}) is out of range",
                view.longitude, view.latitude
            )));
        }
        if !(self.min_zoom >= MIN_ZOOM && self.min_zoom <= self.max_zoom && self.max_zoom <= MAX_ZOOM)
        {
            return Err(MapError::Config(format!(
                "zoom range {}..{} must lie within {}..{}",
                self.min_zoom, self.max_zoom, MIN_ZOOM, MAX_ZOOM
            )));
        }
        if !(self.min_zoom..=self.max_zoom).contains(&view.zoom) {
            return Err(MapError::Config(format!(
                "initial zoom {} is outside {}..{}",
                view.zoom, self.min_zoom, self.max_zoom
            )));
        }
        if !(self.size.0 > 0.0 && self.size.1 > 0.0) {
            return Err(MapError::Config(format!(
                "map size {}x{} must be positive",
                self.size.0, self.size.1
            )));
        }
        if !(self.markers.scale > 0.0) {
            return Err(MapError::Config(format!(
                "marker scale {} must be positive",
                self.markers.scale
            )));
        }
        if !(self.popup.image_size > 0.0) {
            return Err(MapError::Config(format!(
                "popup image size {} must be positive",
                self.popup.image_size
            )));
        }
        Ok(())
    }
}
