//! Configuration for hull construction and export.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ConvexHull3dError;

/// The scale applied to vertex coordinates by default when exporting a hull.
pub const DEFAULT_OBJ_SCALE: f64 = 10.0;

/// How faces with a non-empty outside set are refined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Refinement {
    /// Replace every face that can see the apex and cone the horizon.
    ///
    /// Produces a closed and convex hull.
    #[default]
    Horizon,
    /// Split each face into three children against its own outside set only.
    ///
    /// Produces a closed mesh that is in general not convex, since neighboring
    /// faces are never consulted.
    FaceLocal,
}

/// Configuration for [`HullBuilder`](crate::HullBuilder).
///
/// # Example
///
/// ```
/// use quickhull3d::{HullConfig, Refinement};
///
/// let config = HullConfig::default()
///     .with_epsilon(1e-12)
///     .with_refinement(Refinement::Horizon)
///     .with_validation(true);
///
/// assert_eq!(config.epsilon, 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HullConfig {
    /// A point is outside a face only if its distance in front of the face plane
    /// is strictly greater than this. Defaults to `0.0`.
    pub epsilon: f64,
    /// The refinement strategy. Defaults to [`Refinement::Horizon`].
    pub refinement: Refinement,
    /// Whether to run [`ConvexHull3d::validate`](crate::ConvexHull3d::validate)
    /// on the generated hull. Defaults to `false`.
    pub validate: bool,
    /// The tolerance used when `validate` is set. Defaults to `1e-9`.
    pub validation_tolerance: f64,
}

impl Default for HullConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.0,
            refinement: Refinement::default(),
            validate: false,
            validation_tolerance: 1e-9,
        }
    }
}

impl HullConfig {
    /// Sets the sidedness threshold.
    #[inline]
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Sets the refinement strategy.
    #[inline]
    pub fn with_refinement(mut self, refinement: Refinement) -> Self {
        self.refinement = refinement;
        self
    }

    /// Enables or disables validation of the generated hull.
    #[inline]
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Sets the tolerance used for validation.
    #[inline]
    pub fn with_validation_tolerance(mut self, tolerance: f64) -> Self {
        self.validation_tolerance = tolerance;
        self
    }

    pub(crate) fn check(&self) -> Result<(), ConvexHull3dError> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(ConvexHull3dError::InvalidInput(
                "Epsilon must be finite and non-negative.",
            ));
        }
        if !self.validation_tolerance.is_finite() || self.validation_tolerance < 0.0 {
            return Err(ConvexHull3dError::InvalidInput(
                "Validation tolerance must be finite and non-negative.",
            ));
        }
        Ok(())
    }
}

/// Options for [`write_obj`](crate::export::write_obj).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjOptions {
    /// The factor every vertex coordinate is multiplied by.
    pub scale: f64,
}

impl Default for ObjOptions {
    fn default() -> Self {
        Self {
            scale: DEFAULT_OBJ_SCALE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = HullConfig::default();
        assert_eq!(config.epsilon, 0.0);
        assert_eq!(config.refinement, Refinement::Horizon);
        assert!(!config.validate);
        assert_eq!(ObjOptions::default().scale, 10.0);
    }

    #[test]
    fn rejects_bad_epsilon() {
        for epsilon in [-1e-9, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                HullConfig::default().with_epsilon(epsilon).check(),
                Err(ConvexHull3dError::InvalidInput(_))
            ));
        }
        assert_eq!(HullConfig::default().with_epsilon(1e-6).check(), Ok(()));
    }
}
