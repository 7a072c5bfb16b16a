use crate::{
    core::{geo::Point, viewport::Viewport},
    layers::{base::LayerTrait, marker::Marker},
    MapError, Result,
};
use fxhash::FxHashMap;

/// Markers keyed by location id, kept in insertion (render) order
#[derive(Default)]
pub struct MarkerManager {
    markers: FxHashMap<u32, Marker>,
    /// Location ids in render order; later entries draw on top
    render_order: Vec<u32>,
}

impl MarkerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a marker. Ids must be unique within the manager.
    pub fn add_marker(&mut self, marker: Marker) -> Result<()> {
        let id = marker.record_id();
        if self.markers.contains_key(&id) {
            return Err(MapError::DuplicateLocationId(id));
        }
        self.markers.insert(id, marker);
        self.render_order.push(id);
        Ok(())
    }

    pub fn get(&self, id: u32) -> Option<&Marker> {
        self.markers.get(&id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Marker> {
        self.markers.get_mut(&id)
    }

    /// Ids in render order
    pub fn ids(&self) -> &[u32] {
        &self.render_order
    }

    /// Markers in render order
    pub fn iter(&self) -> impl Iterator<Item = &Marker> + '_ {
        self.render_order
            .iter()
            .filter_map(move |id| self.markers.get(id))
    }

    /// Applies a function to each marker mutably in render order
    pub fn for_each_marker_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Marker),
    {
        for id in &self.render_order {
            if let Some(marker) = self.markers.get_mut(id) {
                f(marker);
            }
        }
    }

    /// Topmost marker whose glyph contains the pixel
    pub fn hit_test(&self, viewport: &Viewport, pixel: &Point) -> Option<u32> {
        self.render_order
            .iter()
            .rev()
            .copied()
            .find(|id| {
                self.markers
                    .get(id)
                    .map_or(false, |marker| marker.hit_test(viewport, pixel))
            })
    }

    /// Markers whose coordinate lies inside the viewport
    pub fn visible_in<'a>(&'a self, viewport: &Viewport) -> impl Iterator<Item = &'a Marker> + 'a {
        let bounds = viewport.bounds();
        self.iter()
            .filter(move |marker| marker.intersects_bounds(&bounds))
    }

    /// Gets the number of markers
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Checks if the manager is empty
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;
    use crate::data::locations::{seattle_locations, LocationRecord};

    fn manager() -> MarkerManager {
        let mut manager = MarkerManager::new();
        for record in seattle_locations() {
            manager.add_marker(Marker::new(record.clone())).unwrap();
        }
        manager
    }

    #[test]
    fn test_render_order_follows_insertion() {
        let manager = manager();
        assert_eq!(manager.ids(), &[1, 2, 3, 4, 5, 6]);
        let titles: Vec<&str> = manager.iter().map(|m| m.record().title.as_str()).collect();
        assert_eq!(titles[0], "Amplify Team Dinner");
        assert_eq!(titles[5], "My first day in the office (Blackfoot)");
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut manager = manager();
        let err = manager
            .add_marker(Marker::new(seattle_locations()[0].clone()))
            .unwrap_err();
        assert!(matches!(err, MapError::DuplicateLocationId(1)));
        assert_eq!(manager.len(), 6);
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let mut manager = MarkerManager::new();
        let a = LocationRecord::new(10, "A", "", "", -122.3, 47.6);
        let b = LocationRecord::new(11, "B", "", "", -122.3, 47.6);
        manager.add_marker(Marker::new(a)).unwrap();
        manager.add_marker(Marker::new(b)).unwrap();

        let viewport = Viewport::default();
        let tip = viewport.lat_lng_to_pixel(&manager.get(10).unwrap().position());
        let hit = manager.hit_test(&viewport, &Point::new(tip.x, tip.y - 5.0));
        assert_eq!(hit, Some(11));
        assert_eq!(manager.hit_test(&viewport, &Point::new(-50.0, -50.0)), None);
    }

    #[test]
    fn test_all_fixture_markers_visible_initially() {
        let manager = manager();
        assert_eq!(manager.visible_in(&Viewport::default()).count(), 6);
    }

    #[test]
    fn test_visible_in_skips_markers_outside_view() {
        let manager = manager();
        let mut viewport = Viewport::default();
        viewport.set_center(LatLng::new(47.6097236, -122.3443816));
        viewport.set_zoom(17.0);

        let ids: Vec<u32> = manager.visible_in(&viewport).map(Marker::record_id).collect();
        assert!(ids.contains(&2));
        assert!(!ids.contains(&1));
    }
}
