//! Core constants for the pin map, taken from common web-map conventions.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Default square tile size in pixels, the base unit of the Mercator pixel grid.
pub const TILE_SIZE: f64 = 256.0;

/// Equatorial Earth radius used by the Web Mercator projection (EPSG:3857).
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Latitude limit of the Web Mercator projection.
pub const MAX_LATITUDE: f64 = 85.051_128_779_8;

/// Zoom range accepted by the viewport.
pub const MIN_ZOOM: f64 = 0.0;
pub const MAX_ZOOM: f64 = 18.0;

/// Initial view of the Seattle map.
pub const DEFAULT_CENTER_LNG: f64 = -122.338_165_9;
pub const DEFAULT_CENTER_LAT: f64 = 47.615_686;
pub const DEFAULT_ZOOM: f64 = 12.0;

/// Map surface size in pixels.
pub const DEFAULT_MAP_SIZE: (f64, f64) = (600.0, 600.0);

/// Marker icon default size (unscaled).
pub const MARKER_ICON_SIZE: (f64, f64) = (27.0, 41.0);

/// Marker glyph scale relative to `MARKER_ICON_SIZE`.
pub const DEFAULT_MARKER_SCALE: f64 = 0.8;

/// Popup anchor offset from the marker coordinate, in pixels. Negative y is up.
pub const DEFAULT_POPUP_OFFSET: (f64, f64) = (0.0, -40.0);

/// Edge length of the square popup image box.
pub const DEFAULT_POPUP_IMAGE_SIZE: f64 = 200.0;

/// Zoom change per scroll-wheel unit.
pub const SCROLL_ZOOM_RATE: f64 = 0.002;
