use crate::core::geo::{LatLng, Point};
use serde::{Deserialize, Serialize};

/// Input events delivered to the map canvas by the rendering surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Single click/tap at a container pixel position
    Click {
        position: Point,
        button: MouseButton,
    },
    /// The close control of a marker's popup was activated
    PopupClose { marker_id: u32 },
    /// Drag in progress
    Drag { delta: Point },
    /// Scroll wheel or pinch zoom
    Scroll { delta: f64, position: Point },
    /// Viewport/window resize
    Resize { size: Point },
}

/// Mouse button types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
}

/// Whether an event was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventHandled {
    Handled,
    NotHandled,
}

impl EventHandled {
    pub fn is_handled(self) -> bool {
        self == EventHandled::Handled
    }
}

/// A click being routed through the canvas. Once a handler stops
/// propagation, no ancestor handler (the map-wide dismiss) sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvent {
    pub position: Point,
    pub lat_lng: LatLng,
    propagation_stopped: bool,
}

impl ClickEvent {
    pub fn new(position: Point, lat_lng: LatLng) -> Self {
        Self {
            position,
            lat_lng,
            propagation_stopped: false,
        }
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Map event types that can be emitted by the canvas
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// Click on the map background (not consumed by a marker)
    Click { lat_lng: LatLng, pixel: Point },
    /// Click consumed by a marker glyph
    MarkerClick { marker_id: u32 },
    /// A popup became visible
    PopupOpen { marker_id: u32 },
    /// A popup was removed
    PopupClose { marker_id: u32 },
    /// Map view has changed (center or zoom)
    ViewChanged { center: LatLng, zoom: f64 },
}

/// Discriminant of `MapEvent`, used to key listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapEventKind {
    Click,
    MarkerClick,
    PopupOpen,
    PopupClose,
    ViewChanged,
}

impl MapEvent {
    pub fn kind(&self) -> MapEventKind {
        match self {
            MapEvent::Click { .. } => MapEventKind::Click,
            MapEvent::MarkerClick { .. } => MapEventKind::MarkerClick,
            MapEvent::PopupOpen { .. } => MapEventKind::PopupOpen,
            MapEvent::PopupClose { .. } => MapEventKind::PopupClose,
            MapEvent::ViewChanged { .. } => MapEventKind::ViewChanged,
        }
    }
}
