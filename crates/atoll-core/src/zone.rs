//! Circular keep-clear region around the central model

use serde::{Deserialize, Serialize};

/// Circular region in the ground plane where nothing may be planted.
///
/// The scene starts with a seed radius and replaces it with a value derived
/// from the loaded model's footprint once that is known.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExclusionZone {
    /// Center of the zone on the ground X axis
    pub center_x: f32,
    /// Center of the zone on the ground Z axis
    pub center_z: f32,
    /// Keep-clear radius in world units
    pub radius: f32,
}

impl ExclusionZone {
    /// Create a zone centered at (`center_x`, `center_z`).
    pub fn new(center_x: f32, center_z: f32, radius: f32) -> Self {
        Self {
            center_x,
            center_z,
            radius,
        }
    }

    /// Derive a zone from a model footprint: half the larger horizontal
    /// extent plus a clearance margin.
    pub fn from_footprint(
        center_x: f32,
        center_z: f32,
        size_x: f32,
        size_z: f32,
        margin: f32,
    ) -> Self {
        Self {
            center_x,
            center_z,
            radius: size_x.max(size_z) / 2.0 + margin,
        }
    }

    /// Whether (`x`, `z`) falls strictly inside the zone. A point exactly on
    /// the rim counts as outside.
    pub fn contains(&self, x: f32, z: f32) -> bool {
        let dx = x - self.center_x;
        let dz = z - self.center_z;
        (dx * dx + dz * dz).sqrt() < self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_inside_and_outside() {
        let zone = ExclusionZone::new(0.0, 0.0, 15.0);

        assert!(zone.contains(0.0, 0.0));
        assert!(zone.contains(10.0, 10.0));
        assert!(!zone.contains(15.1, 0.0));
        assert!(!zone.contains(-40.0, 60.0));
    }

    #[test]
    fn test_rim_counts_as_outside() {
        let zone = ExclusionZone::new(0.0, 0.0, 15.0);

        assert!(!zone.contains(15.0, 0.0));
        assert!(!zone.contains(0.0, -15.0));
    }

    #[test]
    fn test_offset_center() {
        let zone = ExclusionZone::new(20.0, -5.0, 4.0);

        assert!(zone.contains(21.0, -6.0));
        assert!(!zone.contains(0.0, 0.0));
    }

    #[test]
    fn test_from_footprint_uses_larger_extent() {
        let zone = ExclusionZone::from_footprint(0.0, 0.0, 24.0, 10.0, 3.0);
        assert_eq!(zone.radius, 15.0);

        let zone = ExclusionZone::from_footprint(0.0, 0.0, 6.0, 30.0, 3.0);
        assert_eq!(zone.radius, 18.0);
    }
}
