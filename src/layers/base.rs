use crate::core::geo::LatLngBounds;

/// Common layer surface shared by everything drawn on the map
pub trait LayerTrait {
    fn id(&self) -> &str;
    fn name(&self) -> &str;

    /// Geographic extent of the layer, if it has one
    fn bounds(&self) -> Option<LatLngBounds> {
        None
    }

    /// Checks whether the layer is inside (or touches) the given bounds
    fn intersects_bounds(&self, bounds: &LatLngBounds) -> bool {
        self.bounds().map_or(true, |own| own.intersects(bounds))
    }

    /// Layer description as JSON, for debugging and inspection
    fn options(&self) -> serde_json::Value;
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerProperties {
    pub id: String,
    pub name: String,
}

impl LayerProperties {
    pub fn new(id: String, name: String) -> Self {
        Self { id, name }
    }
}
