use crate::{
    core::{
        config::MapConfig,
        constants::SCROLL_ZOOM_RATE,
        geo::{LatLng, Point},
        viewport::{InitialViewState, Viewport},
    },
    data::locations::{validate_locations, LocationRecord},
    input::{
        events::{ClickEvent, EventHandled, InputEvent, MapEvent, MapEventKind, MouseButton},
        handler::EventManager,
    },
    layers::{
        manager::MarkerManager,
        marker::{Marker, PopupView, Transition},
    },
    MapError, Result,
};

/// Composition root of the pin map: the viewport plus one marker per location.
///
/// Markers are keyed by location id and kept in input order. Every marker owns
/// its own popup state; the canvas only routes input to the right marker and
/// publishes map-wide dismissal.
///
/// Map events are queued until [`MapCanvas::process_events`] runs. `MapView`
/// drains the queue every frame; headless callers must call it themselves
/// after each batch of input.
pub struct MapCanvas {
    viewport: Viewport,
    markers: MarkerManager,
    config: MapConfig,
    event_manager: EventManager,
}

impl MapCanvas {
    /// Builds a canvas with default styling. Fails on duplicate ids or
    /// coordinates outside the valid range.
    pub fn new(view: InitialViewState, size: Point, records: &[LocationRecord]) -> Result<Self> {
        let config = MapConfig {
            initial_view: view,
            size: (size.x, size.y),
            ..MapConfig::default()
        };
        Self::from_config(&config, records)
    }

    pub fn from_config(config: &MapConfig, records: &[LocationRecord]) -> Result<Self> {
        config.validate()?;
        validate_locations(records)?;

        let mut viewport = Viewport::from_view(&config.initial_view, config.size_point());
        viewport.set_zoom_limits(config.min_zoom, config.max_zoom);

        let mut markers = MarkerManager::new();
        for record in records {
            markers.add_marker(Marker::with_config(record.clone(), config))?;
        }

        log::info!(
            "map canvas ready: {} markers at ({:.5}, {:.5}) zoom {}",
            markers.len(),
            viewport.center.lat,
            viewport.center.lng,
            viewport.zoom
        );

        Ok(Self {
            viewport,
            markers,
            config: config.clone(),
            event_manager: EventManager::new(),
        })
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn marker(&self, id: u32) -> Option<&Marker> {
        self.markers.get(id)
    }

    /// Markers in input order
    pub fn markers(&self) -> impl Iterator<Item = &Marker> + '_ {
        self.markers.iter()
    }

    /// Location ids in render order
    pub fn marker_ids(&self) -> &[u32] {
        self.markers.ids()
    }

    /// Clicks a marker's glyph directly, bypassing hit-testing
    pub fn click_marker(&mut self, id: u32) -> Result<EventHandled> {
        let pixel = self.marker_pixel(id)?;
        let mut click = ClickEvent::new(pixel, self.viewport.pixel_to_lat_lng(&pixel));
        self.dispatch_marker_click(id, &mut click)?;
        Ok(EventHandled::Handled)
    }

    /// Activates the close control of a marker's popup. Closing a popup that
    /// is not shown is a no-op.
    pub fn close_popup(&mut self, id: u32) -> Result<EventHandled> {
        let marker = self
            .markers
            .get_mut(id)
            .ok_or(MapError::UnknownMarker(id))?;
        if marker.close_popup().changed() {
            self.event_manager.emit(MapEvent::PopupClose { marker_id: id });
            Ok(EventHandled::Handled)
        } else {
            Ok(EventHandled::NotHandled)
        }
    }

    /// Routes one input event from the rendering surface
    pub fn handle_input(&mut self, event: InputEvent) -> EventHandled {
        match event {
            InputEvent::Click {
                position,
                button: MouseButton::Left,
            } => self.handle_click(position),
            InputEvent::Click { .. } => EventHandled::NotHandled,
            InputEvent::PopupClose { marker_id } => match self.close_popup(marker_id) {
                Ok(handled) => handled,
                Err(err) => {
                    log::warn!("ignoring popup close: {}", err);
                    EventHandled::NotHandled
                }
            },
            InputEvent::Drag { delta } => {
                self.pan(delta);
                EventHandled::Handled
            }
            InputEvent::Scroll { delta, position } => {
                let zoom = self.viewport.zoom + delta * SCROLL_ZOOM_RATE;
                self.zoom_to(zoom, Some(position));
                EventHandled::Handled
            }
            InputEvent::Resize { size } => {
                self.set_size(size);
                EventHandled::Handled
            }
        }
    }

    /// Popups currently shown, in render order
    pub fn visible_popups(&self) -> Vec<PopupView> {
        self.markers.iter().filter_map(Marker::popup).collect()
    }

    /// Shown popups whose marker lies inside the current view
    pub fn popups_in_view(&self) -> Vec<PopupView> {
        self.markers
            .visible_in(&self.viewport)
            .filter_map(Marker::popup)
            .collect()
    }

    /// Ids of markers whose popup is shown
    pub fn shown_marker_ids(&self) -> Vec<u32> {
        self.markers
            .iter()
            .filter(|marker| marker.is_popup_visible())
            .map(Marker::record_id)
            .collect()
    }

    /// Register a map event listener
    pub fn on<F>(&mut self, kind: MapEventKind, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.event_manager.on(kind, callback);
    }

    /// Dispatches and drains queued map events
    pub fn process_events(&mut self) -> Vec<MapEvent> {
        self.event_manager.process_events()
    }

    /// Moves the view. Zoom is clamped to the configured range; a
    /// `ViewChanged` event is queued only if center or zoom moved.
    pub fn set_view(&mut self, center: LatLng, zoom: f64) {
        let before = (self.viewport.center, self.viewport.zoom);
        self.viewport.set_center(center);
        self.viewport.set_zoom(zoom);
        self.emit_view_changed_since(before);
    }

    pub fn pan(&mut self, delta: Point) {
        let before = (self.viewport.center, self.viewport.zoom);
        self.viewport.pan(delta);
        self.emit_view_changed_since(before);
    }

    pub fn zoom_to(&mut self, zoom: f64, focus_point: Option<Point>) {
        let before = (self.viewport.center, self.viewport.zoom);
        self.viewport.zoom_to(zoom, focus_point);
        self.emit_view_changed_since(before);
    }

    pub fn set_size(&mut self, size: Point) {
        self.viewport.set_size(size);
    }

    fn handle_click(&mut self, position: Point) -> EventHandled {
        let lat_lng = self.viewport.pixel_to_lat_lng(&position);
        let mut click = ClickEvent::new(position, lat_lng);

        if let Some(id) = self.markers.hit_test(&self.viewport, &position) {
            if let Err(err) = self.dispatch_marker_click(id, &mut click) {
                log::warn!("marker click failed: {}", err);
            }
        }

        if click.is_propagation_stopped() {
            return EventHandled::Handled;
        }

        self.event_manager.emit(MapEvent::Click {
            lat_lng,
            pixel: position,
        });
        self.dismiss_popups();
        EventHandled::Handled
    }

    fn dispatch_marker_click(&mut self, id: u32, click: &mut ClickEvent) -> Result<()> {
        let marker = self
            .markers
            .get_mut(id)
            .ok_or(MapError::UnknownMarker(id))?;
        let transition = marker.handle_click(click);

        self.event_manager.emit(MapEvent::MarkerClick { marker_id: id });
        if transition == Transition::Changed {
            self.event_manager.emit(MapEvent::PopupOpen { marker_id: id });
        }
        Ok(())
    }

    /// Map-wide dismissal; each subscribed marker closes its own popup
    fn dismiss_popups(&mut self) {
        let mut closed = Vec::new();
        self.markers.for_each_marker_mut(|marker| {
            if marker.on_map_dismiss().changed() {
                closed.push(marker.record_id());
            }
        });
        for marker_id in closed {
            self.event_manager.emit(MapEvent::PopupClose { marker_id });
        }
    }

    fn marker_pixel(&self, id: u32) -> Result<Point> {
        self.markers
            .get(id)
            .map(|marker| self.viewport.lat_lng_to_pixel(&marker.position()))
            .ok_or(MapError::UnknownMarker(id))
    }

    fn emit_view_changed_since(&mut self, (center, zoom): (LatLng, f64)) {
        if self.viewport.center == center && self.viewport.zoom == zoom {
            return;
        }
        self.event_manager.emit(MapEvent::ViewChanged {
            center: self.viewport.center,
            zoom: self.viewport.zoom,
        });
    }
}
