//! Drifting droplet field advanced once per animation tick

use std::ops::Range;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fixed-size set of drifting droplets: parallel position and velocity
/// triples, mutated in place every frame. Only `y` changes after creation;
/// each droplet's downward drift is assigned once and never re-randomized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleField {
    positions: Vec<[f32; 3]>,
    velocities: Vec<[f32; 3]>,
    /// Height band a droplet respawns into after falling through the floor
    reset_band: Range<f32>,
}

impl ParticleField {
    /// Scatter `count` droplets with `x` and `z` uniform in
    /// `±half_extent`, `y` uniform in `band`, and a fixed downward drift in
    /// `(-max_fall, 0]` per droplet.
    pub fn scatter<R: Rng + ?Sized>(
        count: usize,
        half_extent: f32,
        band: Range<f32>,
        max_fall: f32,
        rng: &mut R,
    ) -> Self {
        let mut positions = Vec::with_capacity(count);
        let mut velocities = Vec::with_capacity(count);

        for _ in 0..count {
            positions.push([
                rng.random_range(-half_extent..half_extent),
                rng.random_range(band.clone()),
                rng.random_range(-half_extent..half_extent),
            ]);
            velocities.push([0.0, -rng.random_range(0.0..max_fall), 0.0]);
        }

        Self {
            positions,
            velocities,
            reset_band: band,
        }
    }

    /// Build a field from explicit triples. The two lists must pair up.
    pub fn from_parts(
        positions: Vec<[f32; 3]>,
        velocities: Vec<[f32; 3]>,
        reset_band: Range<f32>,
    ) -> Self {
        debug_assert_eq!(positions.len(), velocities.len());
        Self {
            positions,
            velocities,
            reset_band,
        }
    }

    /// Advance every droplet by one tick: apply its vertical drift, and when
    /// it falls below the floor respawn it at a fresh height inside the
    /// reset band. Drifts are left untouched, so the fall loops forever.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for (position, velocity) in self.positions.iter_mut().zip(&self.velocities) {
            position[1] += velocity[1];
            if position[1] < 0.0 {
                position[1] = rng.random_range(self.reset_band.clone());
            }
        }
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn velocities(&self) -> &[[f32; 3]] {
        &self.velocities
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const BAND: Range<f32> = 20.0..70.0;

    #[test]
    fn test_scatter_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let field = ParticleField::scatter(2000, 100.0, BAND, 0.1, &mut rng);

        assert_eq!(field.len(), 2000);
        for position in field.positions() {
            assert!(position[0] >= -100.0 && position[0] < 100.0);
            assert!(position[1] >= 20.0 && position[1] < 70.0);
            assert!(position[2] >= -100.0 && position[2] < 100.0);
        }
        for velocity in field.velocities() {
            assert_eq!(velocity[0], 0.0);
            assert!(velocity[1] <= 0.0 && velocity[1] > -0.1);
            assert_eq!(velocity[2], 0.0);
        }
    }

    #[test]
    fn test_advance_applies_drift() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut field =
            ParticleField::from_parts(vec![[0.0, 10.0, 0.0]], vec![[0.0, -0.1, 0.0]], BAND);

        field.advance(&mut rng);

        let y = field.positions()[0][1];
        assert!((y - 9.9).abs() < 1e-5, "expected 9.9, got {y}");
    }

    #[test]
    fn test_advance_wraps_into_band() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut field =
            ParticleField::from_parts(vec![[0.0, 0.05, 0.0]], vec![[0.0, -0.1, 0.0]], BAND);

        field.advance(&mut rng);

        let y = field.positions()[0][1];
        assert!(y >= 20.0 && y < 70.0, "expected a reset into the band, got {y}");
        // The drift survives the wrap
        assert_eq!(field.velocities()[0][1], -0.1);
    }

    #[test]
    fn test_advance_accumulates_until_wrap() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut field =
            ParticleField::from_parts(vec![[0.0, 1.0, 0.0]], vec![[0.0, -0.3, 0.0]], BAND);

        for tick in 1..=3 {
            field.advance(&mut rng);
            let y = field.positions()[0][1];
            let expected = 1.0 - 0.3 * tick as f32;
            assert!((y - expected).abs() < 1e-5, "tick {tick}: expected {expected}, got {y}");
        }

        // Fourth tick crosses the floor
        field.advance(&mut rng);
        let y = field.positions()[0][1];
        assert!(y >= 20.0 && y < 70.0);
    }

    #[test]
    fn test_zero_drift_never_wraps() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut field =
            ParticleField::from_parts(vec![[5.0, 30.0, -5.0]], vec![[0.0, 0.0, 0.0]], BAND);

        for _ in 0..100 {
            field.advance(&mut rng);
        }

        assert_eq!(field.positions()[0], [5.0, 30.0, -5.0]);
    }
}
