//! Per-step driver for the Barnes-Hut engine.
//!
//! Each step runs four phases in order: a parallel min/max reduction sizes
//! the bounding cube, the octree is built sequentially from the current body
//! snapshot, forces are evaluated in parallel against the immutable tree
//! (one rayon task per body, each writing only its own output slot), and a
//! serial pass integrates velocities and positions. Every phase is a
//! barrier: integration never overlaps force evaluation, and the next
//! step's tree is only built from fully integrated positions.

use log::debug;
use rayon::prelude::*;
use std::f64::consts::PI;

use crate::constants_config::SimulationConfig;
use crate::errors::GravityError;
use crate::gravity::{build_tree, Body, Region};
use crate::models::Vec3;

/// An N-body system advanced with Barnes-Hut gravity and semi-implicit
/// Euler integration.
///
/// [`GravitySimulation::step`] mutates the owned bodies in place; callers
/// that integrate themselves can use [`GravitySimulation::forces`] or
/// [`GravitySimulation::accelerations`] instead, which return one vector
/// per body in body order and leave the system untouched.
///
/// # Examples
///
/// ```
/// use rs_gravity::constants_config::SimulationConfig;
/// use rs_gravity::gravity::{Body, GravitySimulation};
/// use rs_gravity::models::Vec3;
///
/// let bodies = vec![
///     Body::new(Vec3::new(-1.0, 0.0, 0.0), Vec3::zero(), 1.0).unwrap(),
///     Body::new(Vec3::new(1.0, 0.0, 0.0), Vec3::zero(), 1.0).unwrap(),
/// ];
/// let config = SimulationConfig::new(Some(0.5), Some(0.01), Some(1.0), Some(0.001), None, None);
/// let mut sim = GravitySimulation::new(bodies, config).unwrap();
///
/// sim.step().unwrap();
///
/// // The pair attracts: both bodies picked up velocity toward the origin.
/// assert!(sim.bodies[0].velocity.x > 0.0);
/// assert!(sim.bodies[1].velocity.x < 0.0);
/// ```
pub struct GravitySimulation {
    pub bodies: Vec<Body>,
    pub config: SimulationConfig,
    pub time: f64,
}

impl GravitySimulation {
    /// Creates a simulation over a body snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation or any body
    /// carries a non-positive or non-finite mass.
    pub fn new(bodies: Vec<Body>, config: SimulationConfig) -> Result<Self, GravityError> {
        config.validate()?;
        if bodies.iter().any(|b| !b.mass.is_finite() || b.mass <= 0.0) {
            return Err(GravityError::InvalidMass);
        }
        Ok(GravitySimulation { bodies, config, time: 0.0 })
    }

    /// The cubic region enclosing every body, computed as a parallel
    /// min/max reduction over positions.
    ///
    /// # Errors
    ///
    /// Returns an error when the system is empty or a position is
    /// non-finite.
    pub fn bounding_region(&self) -> Result<Region, GravityError> {
        if self.bodies.is_empty() {
            return Err(GravityError::DegenerateRegion);
        }
        let inf = f64::INFINITY;
        let (min, max) = self
            .bodies
            .par_iter()
            .map(|b| (b.position, b.position))
            .reduce(
                || (Vec3::new(inf, inf, inf), Vec3::new(-inf, -inf, -inf)),
                |a, b| (a.0.min_components(&b.0), a.1.max_components(&b.1)),
            );
        Region::from_bounds(min, max)
    }

    /// Net gravitational force on every body, in body order.
    ///
    /// Builds a fresh tree from the current snapshot and evaluates all
    /// bodies against it in parallel. An empty system yields an empty
    /// vector.
    pub fn forces(&self) -> Result<Vec<Vec3>, GravityError> {
        if self.bodies.is_empty() {
            return Ok(Vec::new());
        }
        let bounds = self.bounding_region()?;
        let tree = build_tree(&self.bodies, bounds, &self.config)?;
        debug!(
            "force tree built over {} bodies (root side {:.3e})",
            tree.num_bodies(),
            bounds.side
        );

        let SimulationConfig { theta, softening, gravitational_constant, .. } = self.config;
        Ok(self
            .bodies
            .par_iter()
            .map(|body| tree.compute_force(body, theta, gravitational_constant, softening))
            .collect())
    }

    /// Net acceleration on every body, in body order.
    pub fn accelerations(&self) -> Result<Vec<Vec3>, GravityError> {
        let forces = self.forces()?;
        Ok(forces
            .iter()
            .zip(self.bodies.iter())
            .map(|(force, body)| *force / body.mass)
            .collect())
    }

    /// Advances the system by one time step.
    ///
    /// Integration is semi-implicit Euler: every velocity is kicked by its
    /// body's acceleration first, then every position drifts with the
    /// already-updated velocity, which holds orbits together far better
    /// than the explicit order.
    pub fn step(&mut self) -> Result<(), GravityError> {
        let dt = self.config.dt;
        if self.bodies.is_empty() {
            self.time += dt;
            return Ok(());
        }

        let forces = self.forces()?;
        for (body, force) in self.bodies.iter_mut().zip(forces.iter()) {
            body.apply_force(*force, dt);
            body.advance(dt);
        }
        self.time += dt;
        Ok(())
    }

    /// Runs the simulation for a specified number of steps.
    pub fn run(&mut self, steps: usize) -> Result<(), GravityError> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(())
    }

    /// Mass-weighted center of the system, if it holds any body.
    pub fn mass_center(&self) -> Option<Vec3> {
        if self.bodies.is_empty() {
            return None;
        }
        let (weighted, total) = self
            .bodies
            .iter()
            .fold((Vec3::zero(), 0.0), |(weighted, total), b| {
                (weighted + b.position * b.mass, total + b.mass)
            });
        Some(weighted / total)
    }

    /// Total kinetic energy of the system.
    pub fn total_kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }
}

/// Samples a body mass: mostly light bodies with the occasional heavy
/// attractor.
fn sample_mass() -> f64 {
    if rand::random::<f64>() < 0.01 {
        10.0 + 5.0 * rand::random::<f64>()
    } else {
        0.1 + 0.9 * rand::random::<f64>()
    }
}

/// Creates a box-shaped cluster of bodies with random velocities.
///
/// Positions are uniform within `extent` of `center` along each axis and
/// velocity components are uniform in `[-max_speed, max_speed]`.
///
/// # Examples
///
/// ```
/// use rs_gravity::gravity::scatter_cluster;
/// use rs_gravity::models::Vec3;
///
/// let bodies = scatter_cluster(100, Vec3::zero(), 20.0, 4.0);
/// assert_eq!(bodies.len(), 100);
/// assert!(bodies.iter().all(|b| b.mass > 0.0));
/// ```
pub fn scatter_cluster(count: usize, center: Vec3, extent: f64, max_speed: f64) -> Vec<Body> {
    let mut bodies = Vec::with_capacity(count);
    for _ in 0..count {
        let offset = Vec3::new(
            extent * (2.0 * rand::random::<f64>() - 1.0),
            extent * (2.0 * rand::random::<f64>() - 1.0),
            extent * (2.0 * rand::random::<f64>() - 1.0),
        );
        let velocity = Vec3::new(
            max_speed * (2.0 * rand::random::<f64>() - 1.0),
            max_speed * (2.0 * rand::random::<f64>() - 1.0),
            max_speed * (2.0 * rand::random::<f64>() - 1.0),
        );
        bodies.push(Body {
            position: center + offset,
            velocity,
            mass: sample_mass(),
        });
    }
    bodies
}

/// Creates a flat ring of bodies on orbit-like tangential velocities.
///
/// Bodies are spread evenly in angle between `inner_radius` and
/// `outer_radius` in the plane through `center`, each moving perpendicular
/// to its radius with a speed growing as the square root of the radius.
///
/// # Examples
///
/// ```
/// use rs_gravity::gravity::spawn_disc;
/// use rs_gravity::models::Vec3;
///
/// let bodies = spawn_disc(64, Vec3::zero(), 6.0, 14.0);
/// for body in &bodies {
///     let radius = body.position.norm();
///     assert!(radius > 5.99 && radius < 14.01);
///     assert_eq!(body.position.z, 0.0);
/// }
/// ```
pub fn spawn_disc(count: usize, center: Vec3, inner_radius: f64, outer_radius: f64) -> Vec<Body> {
    let mut bodies = Vec::with_capacity(count);
    for i in 0..count {
        let angle = i as f64 * 2.0 * PI / count.max(1) as f64;
        let radius = inner_radius + (outer_radius - inner_radius) * rand::random::<f64>();
        let position = center + Vec3::new(radius * angle.cos(), radius * angle.sin(), 0.0);

        // Tangential direction, counter-clockwise around the disc axis.
        let speed = 0.5 * radius.sqrt();
        let velocity = Vec3::new(-angle.sin(), angle.cos(), 0.0) * speed;

        bodies.push(Body {
            position,
            velocity,
            mass: sample_mass(),
        });
    }
    bodies
}
