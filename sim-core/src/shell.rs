//! Precomputed set of offsets a node may use to place a child.
//!
//! The shell samples polar and azimuth angles in whole degrees over the full
//! sphere and rounds each resulting point to integer coordinates. Sampling
//! is uniform in *angle*, not in surface area, so offsets cluster towards
//! the poles of the z axis. That bias shapes the growth pattern and is kept
//! deliberately.

use std::f32::consts::PI;

use glam::IVec3;

/// Number of angle samples per axis (1 degree apart).
const ANGLE_STEPS: u32 = 360;

/// At or below this radius every sample rounds to the zero vector and the
/// shell is empty.
pub const MIN_RADIUS: f32 = 0.5;

/// Deduplicated integer offsets of length roughly `radius`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectionShell {
    offsets: Vec<IVec3>,
}

impl DirectionShell {
    /// Builds the shell for the given radius.
    ///
    /// For every pair `(theta, phi)` of whole-degree angles computes
    /// `radius * (sin theta cos phi, sin theta sin phi, cos theta)`, rounds
    /// each coordinate half-to-even and keeps one copy of each distinct
    /// result. The zero vector is dropped since it would place a child on
    /// top of its parent.
    ///
    /// The result is a pure function of `radius`. Offsets are kept sorted so
    /// that picking by index is reproducible under a seeded rng.
    ///
    /// ### Parameters
    /// - `radius` - Target offset length.
    ///
    /// ### Returns
    /// A new [`DirectionShell`]. It is empty when `radius <= MIN_RADIUS`.
    pub fn build(radius: f32) -> Self {
        let mut offsets = Vec::with_capacity((ANGLE_STEPS * ANGLE_STEPS) as usize);

        for t in 0..ANGLE_STEPS {
            let theta = t as f32 * PI / 180.0;
            let (sin_t, cos_t) = theta.sin_cos();
            for p in 0..ANGLE_STEPS {
                let phi = p as f32 * PI / 180.0;
                let (sin_p, cos_p) = phi.sin_cos();

                let v = IVec3::new(
                    (radius * sin_t * cos_p).round_ties_even() as i32,
                    (radius * sin_t * sin_p).round_ties_even() as i32,
                    (radius * cos_t).round_ties_even() as i32,
                );
                offsets.push(v);
            }
        }

        Self::from_offsets(offsets)
    }

    /// Builds a shell from an explicit list of offsets.
    ///
    /// Applies the same normalisation as [`DirectionShell::build`]: zero
    /// vectors are dropped, the rest sorted and deduplicated.
    pub fn from_offsets(offsets: impl IntoIterator<Item = IVec3>) -> Self {
        let mut offsets: Vec<IVec3> = offsets
            .into_iter()
            .filter(|v| *v != IVec3::ZERO)
            .collect();
        offsets.sort_unstable_by_key(|v| v.to_array());
        offsets.dedup();

        Self { offsets }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    #[inline]
    pub fn get(&self, i: usize) -> Option<IVec3> {
        self.offsets.get(i).copied()
    }

    pub fn offsets(&self) -> &[IVec3] {
        &self.offsets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn build_is_deterministic() {
        let a = DirectionShell::build(5.0);
        let b = DirectionShell::build(5.0);
        assert_eq!(a, b);
    }

    #[test]
    fn offsets_are_distinct_and_nonzero() {
        let shell = DirectionShell::build(5.0);
        assert!(!shell.is_empty());

        let unique: HashSet<IVec3> = shell.offsets().iter().copied().collect();
        assert_eq!(unique.len(), shell.len());
        assert!(!unique.contains(&IVec3::ZERO));
    }

    #[test]
    fn offsets_have_length_close_to_radius() {
        let radius = 5.0_f32;
        let shell = DirectionShell::build(radius);

        // Rounding each coordinate moves a point by at most sqrt(3)/2.
        let slack = 3.0_f32.sqrt() / 2.0 + 1e-4;
        for v in shell.offsets() {
            let len = v.as_vec3().length();
            assert!(
                (len - radius).abs() <= slack,
                "offset {v:?} has length {len}"
            );
        }
    }

    #[test]
    fn shell_covers_both_poles_and_the_equator() {
        let shell = DirectionShell::build(5.0);
        let has = |v: IVec3| shell.offsets().contains(&v);

        assert!(has(IVec3::new(0, 0, 5)));
        assert!(has(IVec3::new(0, 0, -5)));
        assert!(has(IVec3::new(5, 0, 0)));
        assert!(has(IVec3::new(-5, 0, 0)));
        assert!(has(IVec3::new(0, 5, 0)));
        assert!(has(IVec3::new(0, -5, 0)));
    }

    #[test]
    fn tiny_radius_produces_unit_offsets_only() {
        let shell = DirectionShell::build(0.7);
        for v in shell.offsets() {
            assert!(v.abs().max_element() <= 1);
        }
        assert!(!shell.is_empty());
    }

    #[test]
    fn from_offsets_normalises_input() {
        let shell = DirectionShell::from_offsets([
            IVec3::new(0, 0, 5),
            IVec3::ZERO,
            IVec3::new(5, 0, 0),
            IVec3::new(0, 0, 5),
        ]);
        assert_eq!(
            shell.offsets(),
            &[IVec3::new(0, 0, 5), IVec3::new(5, 0, 0)]
        );
    }

    #[test]
    fn min_radius_is_the_empty_boundary() {
        assert!(DirectionShell::build(MIN_RADIUS).is_empty());
        assert!(!DirectionShell::build(MIN_RADIUS + 0.01).is_empty());
    }

    #[test]
    fn vanishing_radius_yields_empty_shell() {
        let shell = DirectionShell::build(0.1);
        assert!(shell.is_empty());
        assert_eq!(shell.get(0), None);
    }
}
