//! District markers
//!
//! Six fixed points of interest, one per city side, generated at
//! startup from the side labels. The backend serves these as stat
//! cards; which card is open is frontend state and never lives here.

use serde::{Deserialize, Serialize};

use crate::city::sides::{canonical_angle, SIDE_COUNT};

/// Radial distance of each marker from the city center.
const MARKER_RADIUS: f32 = 7.0;

/// Height of the marker beacons above the plaza.
const MARKER_HEIGHT: f32 = 2.4;

/// Display label and element tag for each side, in side order.
const SIDE_LABELS: [(&str, &str); SIDE_COUNT] = [
    ("Ember Quarter", "Fire"),
    ("Tidegate District", "Water"),
    ("Terrace Ward", "Earth"),
    ("Galewalk Commons", "Wind"),
    ("Lumen Plaza", "Light"),
    ("Duskrow Borough", "Shadow"),
];

/// Immutable descriptor of one district marker.
///
/// Serialized as-is to the frontend stat card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DistrictMarker {
    /// Stable marker id, equal to the side index it belongs to.
    pub id: usize,
    /// District display name.
    pub title: String,
    /// District level shown on the card.
    pub level: u32,
    /// Elemental affinity tag.
    pub element: String,
    /// Attack stat.
    pub attack: u32,
    /// Defense stat.
    pub defense: u32,
    /// World-space marker position `[x, y, z]`.
    pub position: [f32; 3],
}

/// Build the fixed marker set, one marker per side.
///
/// Stats are derived deterministically from the side index so the
/// set is identical on every launch. Positions sit on a ring at the
/// canonical angle of their side.
pub fn district_markers() -> Vec<DistrictMarker> {
    (0..SIDE_COUNT)
        .map(|side| {
            let (title, element) = SIDE_LABELS[side];
            let angle = canonical_angle(side);
            DistrictMarker {
                id: side,
                title: title.to_owned(),
                level: 3 + (side as u32 * 2) % 7,
                element: element.to_owned(),
                attack: 40 + (side as u32 * 17) % 50,
                defense: 35 + (side as u32 * 23) % 50,
                position: [
                    MARKER_RADIUS * angle.sin(),
                    MARKER_HEIGHT,
                    MARKER_RADIUS * angle.cos(),
                ],
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_marker_per_side_with_matching_ids() {
        let markers = district_markers();
        assert_eq!(markers.len(), SIDE_COUNT);
        for (side, marker) in markers.iter().enumerate() {
            assert_eq!(marker.id, side);
        }
    }

    #[test]
    fn titles_and_elements_are_unique() {
        let markers = district_markers();
        for a in 0..markers.len() {
            for b in a + 1..markers.len() {
                assert_ne!(markers[a].title, markers[b].title);
                assert_ne!(markers[a].element, markers[b].element);
            }
        }
    }

    #[test]
    fn markers_sit_on_the_ring_at_their_side_angle() {
        for marker in district_markers() {
            let [x, y, z] = marker.position;
            assert_eq!(y, MARKER_HEIGHT);
            let radial = (x * x + z * z).sqrt();
            assert!((radial - MARKER_RADIUS).abs() < 1e-4);
            let angle = x.atan2(z).rem_euclid(std::f32::consts::TAU);
            let expected = canonical_angle(marker.id);
            let residue = (angle - expected).rem_euclid(std::f32::consts::TAU);
            let distance = residue.min(std::f32::consts::TAU - residue);
            assert!(distance < 1e-4, "marker {}: off by {distance}", marker.id);
        }
    }

    #[test]
    fn generation_is_deterministic() {
        assert_eq!(district_markers(), district_markers());
    }

    #[test]
    fn cards_round_trip_through_json() {
        let markers = district_markers();
        let json = serde_json::to_string(&markers).unwrap();
        let back: Vec<DistrictMarker> = serde_json::from_str(&json).unwrap();
        assert_eq!(markers, back);
    }
}
