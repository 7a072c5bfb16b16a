//! Map pins and their popup visibility state.
//!
//! Each `Marker` owns one `LocationRecord` and one `MarkerState`. The state is
//! a two-state machine:
//!
//! ```text
//!            click on glyph (consumed)
//!   Hidden ───────────────────────────▶ Shown
//!     ▲                                   │
//!     └───── close control / map dismiss ─┘
//! ```
//!
//! Triggers that do not match the current state are no-ops. Nothing outside
//! the owning marker reads or writes its state.

use crate::{
    core::{
        config::MapConfig,
        constants::MARKER_ICON_SIZE,
        geo::{LatLng, LatLngBounds, Point, ScreenRect},
        viewport::Viewport,
    },
    data::locations::LocationRecord,
    input::events::ClickEvent,
    layers::base::{LayerProperties, LayerTrait},
};
use serde::{Deserialize, Serialize};

/// Popup visibility of a single marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MarkerState {
    #[default]
    Hidden,
    Shown,
}

/// Outcome of a transition trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Changed,
    Unchanged,
}

impl Transition {
    pub fn changed(self) -> bool {
        self == Transition::Changed
    }
}

impl MarkerState {
    pub fn is_popup_visible(self) -> bool {
        self == MarkerState::Shown
    }

    /// `Hidden → Shown`
    pub fn show(&mut self) -> Transition {
        match self {
            MarkerState::Hidden => {
                *self = MarkerState::Shown;
                Transition::Changed
            }
            MarkerState::Shown => Transition::Unchanged,
        }
    }

    /// `Shown → Hidden`
    pub fn hide(&mut self) -> Transition {
        match self {
            MarkerState::Shown => {
                *self = MarkerState::Hidden;
                Transition::Changed
            }
            MarkerState::Hidden => Transition::Unchanged,
        }
    }
}

/// Everything needed to draw one open popup
#[derive(Debug, Clone, PartialEq)]
pub struct PopupView {
    pub marker_id: u32,
    pub title: String,
    pub description: String,
    pub image: String,
    /// Geographic coordinate the popup points at
    pub anchor: LatLng,
    /// Pixel offset of the popup tip from the anchor
    pub offset: Point,
    pub close_button: bool,
}

impl PopupView {
    /// Container pixel position of the popup tip
    pub fn screen_anchor(&self, viewport: &Viewport) -> Point {
        viewport.lat_lng_to_pixel(&self.anchor).add(&self.offset)
    }
}

pub struct Marker {
    properties: LayerProperties,
    record: LocationRecord,
    state: MarkerState,
    scale: f64,
    popup_offset: Point,
    close_button: bool,
    dismiss_on_map_click: bool,
}

impl Marker {
    pub fn new(record: LocationRecord) -> Self {
        Self::with_config(record, &MapConfig::default())
    }

    pub fn with_config(record: LocationRecord, config: &MapConfig) -> Self {
        let properties = LayerProperties::new(format!("marker-{}", record.id), record.title.clone());
        Self {
            properties,
            record,
            state: MarkerState::Hidden,
            scale: config.markers.scale,
            popup_offset: config.popup.offset_point(),
            close_button: config.popup.close_button,
            dismiss_on_map_click: config.popup.close_on_map_click,
        }
    }

    /// Id of the location this marker stands for
    pub fn record_id(&self) -> u32 {
        self.record.id
    }

    pub fn record(&self) -> &LocationRecord {
        &self.record
    }

    pub fn position(&self) -> LatLng {
        self.record.position()
    }

    pub fn state(&self) -> MarkerState {
        self.state
    }

    pub fn is_popup_visible(&self) -> bool {
        self.state.is_popup_visible()
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Click on the glyph. The click is always consumed so the map-wide
    /// dismiss does not close the popup in the same interaction.
    pub fn handle_click(&mut self, event: &mut ClickEvent) -> Transition {
        event.stop_propagation();
        let transition = self.state.show();
        if transition.changed() {
            log::debug!("{} popup shown", self.id());
        }
        transition
    }

    /// Close control on the popup
    pub fn close_popup(&mut self) -> Transition {
        let transition = self.state.hide();
        if transition.changed() {
            log::debug!("{} popup closed", self.id());
        }
        transition
    }

    /// Map surface dismissal (click on the background)
    pub fn on_map_dismiss(&mut self) -> Transition {
        if self.dismiss_on_map_click {
            self.close_popup()
        } else {
            Transition::Unchanged
        }
    }

    /// The popup to draw, present only while the state is `Shown`
    pub fn popup(&self) -> Option<PopupView> {
        self.is_popup_visible().then(|| PopupView {
            marker_id: self.record.id,
            title: self.record.title.clone(),
            description: self.record.description.clone(),
            image: self.record.image.clone(),
            anchor: self.position(),
            offset: self.popup_offset,
            close_button: self.close_button,
        })
    }

    /// Pixel size of the glyph
    pub fn glyph_size(&self) -> Point {
        Point::new(MARKER_ICON_SIZE.0, MARKER_ICON_SIZE.1).multiply(self.scale)
    }

    /// Screen rectangle of the glyph; its tip sits on the marker coordinate
    pub fn glyph_rect(&self, viewport: &Viewport) -> ScreenRect {
        ScreenRect::from_bottom_center(viewport.lat_lng_to_pixel(&self.position()), self.glyph_size())
    }

    pub fn hit_test(&self, viewport: &Viewport, pixel: &Point) -> bool {
        self.glyph_rect(viewport).contains(pixel)
    }
}

impl LayerTrait for Marker {
    crate::impl_layer_trait!(properties);

    fn options(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.record.id,
            "position": {
                "lat": self.record.latitude,
                "lng": self.record.longitude
            },
            "title": self.record.title,
            "state": self.state,
            "scale": self.scale
        })
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        Some(LatLngBounds::new(self.position(), self.position()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::locations::seattle_locations;

    fn marker(index: usize) -> Marker {
        Marker::new(seattle_locations()[index].clone())
    }

    fn click() -> ClickEvent {
        ClickEvent::new(Point::default(), LatLng::default())
    }

    #[test]
    fn test_state_machine_transitions() {
        let mut state = MarkerState::default();
        assert_eq!(state, MarkerState::Hidden);

        assert_eq!(state.hide(), Transition::Unchanged);
        assert_eq!(state.show(), Transition::Changed);
        assert_eq!(state.show(), Transition::Unchanged);
        assert!(state.is_popup_visible());
        assert_eq!(state.hide(), Transition::Changed);
        assert_eq!(state, MarkerState::Hidden);

        // Re-entrant: the machine never reaches a terminal state
        assert_eq!(state.show(), Transition::Changed);
    }

    #[test]
    fn test_click_shows_popup_and_consumes_event() {
        let mut marker = marker(2);
        assert!(marker.popup().is_none());

        let mut event = click();
        assert_eq!(marker.handle_click(&mut event), Transition::Changed);
        assert!(event.is_propagation_stopped());

        let popup = marker.popup().unwrap();
        assert_eq!(popup.marker_id, 3);
        assert_eq!(popup.title, "Seattle Underground Tour");
        assert_eq!(popup.image, marker.record().image);
        assert_eq!(popup.description, marker.record().description);
        assert_eq!(popup.offset, Point::new(0.0, -40.0));
    }

    #[test]
    fn test_click_when_shown_still_consumes() {
        let mut marker = marker(0);
        marker.handle_click(&mut click());

        let mut event = click();
        assert_eq!(marker.handle_click(&mut event), Transition::Unchanged);
        assert!(event.is_propagation_stopped());
        assert!(marker.is_popup_visible());
    }

    #[test]
    fn test_close_popup() {
        let mut marker = marker(0);
        assert_eq!(marker.close_popup(), Transition::Unchanged);

        marker.handle_click(&mut click());
        assert_eq!(marker.close_popup(), Transition::Changed);
        assert!(marker.popup().is_none());
        assert_eq!(marker.state(), MarkerState::Hidden);
    }

    #[test]
    fn test_map_dismiss_respects_config() {
        let mut config = MapConfig::default();
        config.popup.close_on_map_click = false;
        let mut sticky = Marker::with_config(seattle_locations()[0].clone(), &config);
        sticky.handle_click(&mut click());
        assert_eq!(sticky.on_map_dismiss(), Transition::Unchanged);
        assert!(sticky.is_popup_visible());

        let mut marker = marker(0);
        marker.handle_click(&mut click());
        assert_eq!(marker.on_map_dismiss(), Transition::Changed);
        assert!(!marker.is_popup_visible());
    }

    #[test]
    fn test_glyph_sits_above_coordinate() {
        let viewport = Viewport::default();
        let marker = marker(5);
        let tip = viewport.lat_lng_to_pixel(&marker.position());
        let rect = marker.glyph_rect(&viewport);

        assert!((rect.max.y - tip.y).abs() < 1e-9);
        assert!((rect.width() - MARKER_ICON_SIZE.0 * 0.8).abs() < 1e-9);
        assert!(marker.hit_test(&viewport, &Point::new(tip.x, tip.y - 10.0)));
        assert!(!marker.hit_test(&viewport, &Point::new(tip.x, tip.y + 10.0)));
    }

    #[test]
    fn test_popup_clears_glyph() {
        let viewport = Viewport::default();
        let mut marker = marker(5);
        marker.handle_click(&mut click());
        let popup = marker.popup().unwrap();
        let rect = marker.glyph_rect(&viewport);
        assert!(popup.screen_anchor(&viewport).y < rect.min.y);
    }

    #[test]
    fn test_layer_surface() {
        let marker = marker(1);
        assert_eq!(marker.id(), "marker-2");
        assert_eq!(marker.name(), "Pike Place Market");
        let options = marker.options();
        assert_eq!(options["id"], 2);
        assert_eq!(options["state"], "Hidden");
    }
}
