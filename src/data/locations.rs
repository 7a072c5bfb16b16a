//! Location records shown as pins on the map.

use crate::core::geo::LatLng;
use crate::{MapError, Result};
use fxhash::FxHashSet;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// One point of interest. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: u32,
    pub title: String,
    pub description: String,
    /// URL of an externally hosted image; passed through untouched
    pub image: String,
    pub longitude: f64,
    pub latitude: f64,
}

impl LocationRecord {
    pub fn new(
        id: u32,
        title: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
        longitude: f64,
        latitude: f64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            image: image.into(),
            longitude,
            latitude,
        }
    }

    pub fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }
}

/// Rejects duplicate ids and coordinates outside the valid range.
pub fn validate_locations(records: &[LocationRecord]) -> Result<()> {
    let mut seen = FxHashSet::default();
    for record in records {
        if !seen.insert(record.id) {
            return Err(MapError::DuplicateLocationId(record.id));
        }
        if !record.position().is_valid() {
            return Err(MapError::InvalidCoordinates(format!(
                "location {} at ({}, {})",
                record.id, record.longitude, record.latitude
            )));
        }
    }
    Ok(())
}

/// Parses a JSON array of location records.
pub fn parse_locations(json: &str) -> Result<Vec<LocationRecord>> {
    let records: Vec<LocationRecord> = serde_json::from_str(json)?;
    validate_locations(&records)?;
    Ok(records)
}

const IMAGE_BASE: &str = "https://aws-map-seattle-blog-pics.s3.amazonaws.com/public";

/// The six Seattle locations, in display order.
pub static SEATTLE_LOCATIONS: Lazy<Vec<LocationRecord>> = Lazy::new(|| {
    vec![
        LocationRecord::new(
            1,
            "Amplify Team Dinner",
            "It's not everyone, but I'm grateful I was able to see folks in real life and bond over food, drinks and laughs!",
            format!("{IMAGE_BASE}/IMG_20220330_204113.jpeg"),
            -122.3098577,
            47.6248646,
        ),
        LocationRecord::new(
            2,
            "Pike Place Market",
            "I went to this farmer's market everyday and after 5 days I was still finding new things! Plus the food is amazing🤤",
            format!("{IMAGE_BASE}/IMG_4767.jpeg"),
            -122.3443816,
            47.6097236,
        ),
        LocationRecord::new(
            3,
            "Seattle Underground Tour",
            "Seattle has so much history! I was able to walk through an old bootlegger's hole from prohibition days.",
            format!("{IMAGE_BASE}/IMG_4826.jpg"),
            -122.3358691,
            47.6023561,
        ),
        LocationRecord::new(
            4,
            "Amazon Spheres",
            "This botanical workspace is a nice way to escape the Seattle weather.",
            format!("{IMAGE_BASE}/IMG_4904.jpeg"),
            -122.3415544,
            47.6158954,
        ),
        LocationRecord::new(
            5,
            "Bainbridge Island Ferry",
            "I took my very first ferry ride! My wife and I spent a day away from the city by visting the quaint island of Bainbridge",
            format!("{IMAGE_BASE}/IMG_4951.jpeg"),
            -122.3402124,
            47.6025113,
        ),
        LocationRecord::new(
            6,
            "My first day in the office (Blackfoot)",
            "Rachel Lee goes down in history as the first in-person coworker I met💜",
            format!("{IMAGE_BASE}/IMG_7282.jpeg"),
            -122.3381659,
            47.615686,
        ),
    ]
});

pub fn seattle_locations() -> &'static [LocationRecord] {
    &SEATTLE_LOCATIONS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_is_valid() {
        let locations = seattle_locations();
        assert_eq!(locations.len(), 6);
        assert!(validate_locations(locations).is_ok());

        let ids: Vec<u32> = locations.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(locations[2].title, "Seattle Underground Tour");
        assert!(locations[2].image.ends_with("IMG_4826.jpg"));
    }

    #[test]
    fn test_position_swaps_axis_order() {
        let record = &seattle_locations()[1];
        assert_eq!(record.position(), LatLng::new(47.6097236, -122.3443816));
    }

    #[test]
    fn test_parse_locations() {
        let json = serde_json::to_string(&seattle_locations()[..2]).unwrap();
        let parsed = parse_locations(&json).unwrap();
        assert_eq!(parsed, seattle_locations()[..2].to_vec());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut records = seattle_locations()[..2].to_vec();
        records[1].id = records[0].id;
        assert!(matches!(
            validate_locations(&records),
            Err(MapError::DuplicateLocationId(1))
        ));
    }

    #[test]
    fn test_out_of_range_coordinates_rejected() {
        let record = LocationRecord::new(9, "Nowhere", "", "", -200.0, 10.0);
        assert!(matches!(
            validate_locations(&[record]),
            Err(MapError::InvalidCoordinates(_))
        ));
    }
}
