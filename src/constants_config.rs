// src/constants_config.rs

use log::warn;
use crate::errors::GravityError;

/// Runtime parameters for a Barnes-Hut simulation.
///
/// - `theta` controls the accuracy/performance trade-off of the tree
///   traversal: a cluster of side `s` at distance `d` is collapsed into a
///   single point mass when `s / d < theta`. `0.0` forces exact pairwise
///   summation; values above ~1.5 trade visible accuracy for speed.
/// - `softening` is the minimum effective separation. It enters the force
///   law as an additive `softening²` in the squared-distance denominator, so
///   the force stays finite as two bodies approach the same position.
/// - `gravitational_constant` scales every force.
/// - `dt` is the fixed time step consumed by each integration step.
/// - `max_depth` and `max_bodies_per_leaf` guard the tree against degenerate
///   body distributions: a leaf splits once it holds more than
///   `max_bodies_per_leaf` bodies, except at `max_depth`, where further
///   bodies are absorbed into the leaf's aggregate as coincident.
#[derive(Debug, Clone, Copy)]
pub struct SimulationConfig {
    pub theta: f64,
    pub softening: f64,
    pub gravitational_constant: f64,
    pub dt: f64,
    pub max_depth: usize,
    pub max_bodies_per_leaf: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            theta: 0.5,
            softening: 1e-2,
            gravitational_constant: 6.674_30e-11,
            dt: 1e-2,
            max_depth: 64,
            max_bodies_per_leaf: 1,
        }
    }
}

impl SimulationConfig {
    /// Creates a configuration, falling back to the default for every
    /// parameter passed as `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_gravity::constants_config::SimulationConfig;
    ///
    /// let config = SimulationConfig::new(Some(0.8), None, Some(1.0), None, None, None);
    /// assert_eq!(config.theta, 0.8);
    /// assert_eq!(config.gravitational_constant, 1.0);
    /// // Unspecified parameters keep their defaults.
    /// assert_eq!(config.dt, SimulationConfig::default().dt);
    /// ```
    pub fn new(
        theta: Option<f64>,
        softening: Option<f64>,
        gravitational_constant: Option<f64>,
        dt: Option<f64>,
        max_depth: Option<usize>,
        max_bodies_per_leaf: Option<usize>,
    ) -> Self {
        let default = SimulationConfig::default();
        Self {
            theta: theta.unwrap_or(default.theta),
            softening: softening.unwrap_or(default.softening),
            gravitational_constant: gravitational_constant.unwrap_or(default.gravitational_constant),
            dt: dt.unwrap_or(default.dt),
            max_depth: max_depth.unwrap_or(default.max_depth),
            max_bodies_per_leaf: max_bodies_per_leaf.unwrap_or(default.max_bodies_per_leaf),
        }
    }

    /// Checks every parameter, rejecting values that would corrupt a tree
    /// build or an integration step.
    ///
    /// Unusual but workable values (a very large `theta`, zero softening)
    /// are accepted with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if `theta` or `softening` is negative or non-finite,
    /// if `gravitational_constant` is non-finite, if `dt` is not a positive
    /// finite number, or if `max_bodies_per_leaf` is zero.
    pub fn validate(&self) -> Result<(), GravityError> {
        if !self.theta.is_finite() || self.theta < 0.0 {
            return Err(GravityError::InvalidTheta);
        }
        if !self.softening.is_finite() || self.softening < 0.0 {
            return Err(GravityError::InvalidSoftening);
        }
        if !self.gravitational_constant.is_finite() {
            return Err(GravityError::CalculationError(
                "gravitational_constant must be finite".to_string(),
            ));
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(GravityError::InvalidTimeStep);
        }
        if self.max_bodies_per_leaf == 0 {
            return Err(GravityError::InvalidLeafCapacity);
        }

        if self.theta > 1.5 {
            warn!("theta = {} is above the usual 0.1-1.5 operating range; clusters will be collapsed very aggressively", self.theta);
        }
        if self.softening == 0.0 {
            warn!("softening is zero; forces between near-coincident bodies are unbounded");
        }

        Ok(())
    }
}
