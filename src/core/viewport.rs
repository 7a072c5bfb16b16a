use crate::core::constants::{
    DEFAULT_CENTER_LAT, DEFAULT_CENTER_LNG, DEFAULT_ZOOM, EARTH_RADIUS, MAX_ZOOM, MIN_ZOOM,
    TILE_SIZE,
};
use crate::core::geo::{LatLng, LatLngBounds, Point};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// The view a map surface opens with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialViewState {
    pub longitude: f64,
    pub latitude: f64,
    pub zoom: f64,
}

impl InitialViewState {
    pub fn new(longitude: f64, latitude: f64, zoom: f64) -> Self {
        Self {
            longitude,
            latitude,
            zoom,
        }
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

impl Default for InitialViewState {
    fn default() -> Self {
        Self::new(DEFAULT_CENTER_LNG, DEFAULT_CENTER_LAT, DEFAULT_ZOOM)
    }
}

/// Manages the current view of the map: center, zoom, and screen dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            size,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        }
    }

    /// Creates a viewport from an initial view state
    pub fn from_view(view: &InitialViewState, size: Point) -> Self {
        Self::new(view.center(), view.zoom, size)
    }

    /// Sets the center of the viewport, keeping it inside the projection
    pub fn set_center(&mut self, center: LatLng) {
        self.center = LatLng::new(LatLng::clamp_lat(center.lat), LatLng::wrap_lng(center.lng));
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Sets the viewport size
    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    /// Sets the zoom limits
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
    }

    /// Projects a LatLng to world pixel coordinates at the given zoom level (EPSG:3857)
    pub fn project(&self, lat_lng: &LatLng, zoom: Option<f64>) -> Point {
        let scale = TILE_SIZE * 2_f64.powf(zoom.unwrap_or(self.zoom));
        let lat = LatLng::clamp_lat(lat_lng.lat);

        let x = lat_lng.lng.to_radians() * EARTH_RADIUS;
        let y = (PI / 4.0 + lat.to_radians() / 2.0).tan().ln() * EARTH_RADIUS;

        let circumference = 2.0 * PI * EARTH_RADIUS;
        Point::new(
            (x + PI * EARTH_RADIUS) / circumference * scale,
            (-y + PI * EARTH_RADIUS) / circumference * scale,
        )
    }

    /// Unprojects world pixel coordinates back to LatLng at the given zoom level
    pub fn unproject(&self, pixel: &Point, zoom: Option<f64>) -> LatLng {
        let scale = TILE_SIZE * 2_f64.powf(zoom.unwrap_or(self.zoom));
        let circumference = 2.0 * PI * EARTH_RADIUS;

        let x = (pixel.x / scale) * circumference - PI * EARTH_RADIUS;
        let y = PI * EARTH_RADIUS - (pixel.y / scale) * circumference;

        let lng = (x / EARTH_RADIUS).to_degrees();
        let lat = (2.0 * (y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();

        LatLng::new(lat, lng)
    }

    /// Converts a geographical coordinate to container pixel coordinates
    pub fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Point {
        let offset = self
            .project(lat_lng, None)
            .subtract(&self.project(&self.center, None));
        Point::new(offset.x + self.size.x / 2.0, offset.y + self.size.y / 2.0)
    }

    /// Converts container pixel coordinates back to geographical coordinates
    pub fn pixel_to_lat_lng(&self, pixel: &Point) -> LatLng {
        let world = self.project(&self.center, None).add(&Point::new(
            pixel.x - self.size.x / 2.0,
            pixel.y - self.size.y / 2.0,
        ));
        self.unproject(&world, None)
    }

    /// Pans the viewport by a pixel offset. Dragging right moves the map right,
    /// so the center moves left.
    pub fn pan(&mut self, delta: Point) {
        let center_px = self.project(&self.center, None).subtract(&delta);
        let new_center = self.unproject(&center_px, None);
        self.set_center(new_center);
    }

    /// Zooms to a level, keeping `focus_point` (container pixels) fixed on screen
    pub fn zoom_to(&mut self, zoom: f64, focus_point: Option<Point>) {
        let new_zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < 0.001 {
            return;
        }

        match focus_point {
            Some(focus) => {
                let focus_lat_lng = self.pixel_to_lat_lng(&focus);
                self.zoom = new_zoom;
                let drift = self.lat_lng_to_pixel(&focus_lat_lng).subtract(&focus);
                self.pan(drift.multiply(-1.0));
            }
            None => self.zoom = new_zoom,
        }
    }

    /// Geographic bounds of the visible area
    pub fn bounds(&self) -> LatLngBounds {
        let north_west = self.pixel_to_lat_lng(&Point::new(0.0, 0.0));
        let south_east = self.pixel_to_lat_lng(&self.size);
        LatLngBounds::from_coords(south_east.lat, north_west.lng, north_west.lat, south_east.lng)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::from_view(
            &InitialViewState::default(),
            crate::core::constants::DEFAULT_MAP_SIZE.into(),
        )
    }
}
