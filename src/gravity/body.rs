use crate::errors::GravityError;
use crate::models::Vec3;

/// A point mass in the simulation.
///
/// A body is a plain numeric record: position, velocity, and a positive
/// mass. It carries no identity; the engine never creates or destroys
/// bodies, it only reads their positions and masses while building the
/// tree and writes velocities and positions back during integration.
#[derive(Debug, Clone, Copy)]
pub struct Body {
    pub position: Vec3,
    pub velocity: Vec3,
    pub mass: f64,
}

impl Body {
    /// Creates a new body.
    ///
    /// # Errors
    ///
    /// Returns an error if `mass` is not a positive finite number, or if
    /// the position or velocity has a non-finite component.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_gravity::gravity::Body;
    /// use rs_gravity::models::Vec3;
    ///
    /// let body = Body::new(Vec3::new(1.0, 2.0, 0.0), Vec3::zero(), 3.0)
    ///     .expect("Failed to create body");
    /// assert_eq!(body.mass, 3.0);
    ///
    /// assert!(Body::new(Vec3::zero(), Vec3::zero(), 0.0).is_err());
    /// assert!(Body::new(Vec3::zero(), Vec3::zero(), -1.0).is_err());
    /// ```
    pub fn new(position: Vec3, velocity: Vec3, mass: f64) -> Result<Self, GravityError> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(GravityError::InvalidMass);
        }
        if !position.is_finite() || !velocity.is_finite() {
            return Err(GravityError::CalculationError(
                "Body position and velocity must be finite".to_string(),
            ));
        }
        Ok(Body { position, velocity, mass })
    }

    /// Applies a force over a time step `dt`, updating the velocity.
    ///
    /// This is the velocity half of the semi-implicit Euler scheme:
    /// `v += (F / m) * dt`. The position is advanced separately by
    /// [`Body::advance`], after the velocity update, so the new position
    /// already reflects the kicked velocity.
    pub fn apply_force(&mut self, force: Vec3, dt: f64) {
        self.velocity += force * (dt / self.mass);
    }

    /// Advances the position by `velocity * dt`.
    pub fn advance(&mut self, dt: f64) {
        self.position += self.velocity * dt;
    }

    /// Distance to another body.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_gravity::gravity::Body;
    /// use rs_gravity::models::Vec3;
    ///
    /// let a = Body::new(Vec3::zero(), Vec3::zero(), 1.0).unwrap();
    /// let b = Body::new(Vec3::new(3.0, 4.0, 0.0), Vec3::zero(), 1.0).unwrap();
    /// assert_eq!(a.distance_to(&b), 5.0);
    /// ```
    pub fn distance_to(&self, other: &Body) -> f64 {
        (other.position - self.position).norm()
    }

    /// Kinetic energy, `m * |v|² / 2`.
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.norm_squared()
    }
}
