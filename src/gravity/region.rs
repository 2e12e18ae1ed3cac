use crate::errors::GravityError;
use crate::gravity::Body;
use crate::models::Vec3;

/// Relative padding applied when deriving a bounding cube from a body set,
/// so bodies sitting exactly on the max corner stay inside the half-open
/// bounds.
const BOUNDS_PADDING: f64 = 1.0 + 1e-3;

/// Represents a cubic region in 3D space.
///
/// A `Region` is described by its center and the length of one side. It is
/// the spatial footprint of one tree node; subdividing it yields the eight
/// equally sized octants covered by that node's children.
///
/// Containment is half-open per axis: the lower face belongs to the region,
/// the upper face does not. The same `>=`-goes-up rule drives
/// [`Region::contains`], [`Region::octant_index`], and the child layout of
/// [`Region::subdivide`], so a point on a shared face between siblings is
/// assigned to exactly one of them.
///
/// # Examples
///
/// ```
/// use rs_gravity::gravity::Region;
/// use rs_gravity::models::Vec3;
///
/// let region = Region::new(Vec3::zero(), 2.0).unwrap();
///
/// assert!(region.contains(Vec3::new(0.5, 0.5, 0.5)));
/// assert!(region.contains(Vec3::new(-1.0, 0.0, 0.0))); // lower face is inside
/// assert!(!region.contains(Vec3::new(1.0, 0.0, 0.0))); // upper face is not
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Region {
    pub center: Vec3,
    pub side: f64,
}

impl Region {
    /// Creates a region from a center and a side length.
    ///
    /// # Errors
    ///
    /// Returns an error if `side` is not a positive finite number or the
    /// center has a non-finite component.
    pub fn new(center: Vec3, side: f64) -> Result<Self, GravityError> {
        if !side.is_finite() || side <= 0.0 || !center.is_finite() {
            return Err(GravityError::DegenerateRegion);
        }
        Ok(Region { center, side })
    }

    /// Half the side length, the distance from the center to each face.
    pub fn half(&self) -> f64 {
        self.side * 0.5
    }

    /// Returns true if the point lies within this region.
    ///
    /// Bounds are inclusive on the lower faces and exclusive on the upper
    /// faces, which keeps boundary points unambiguous between siblings.
    pub fn contains(&self, point: Vec3) -> bool {
        let h = self.half();
        point.x >= self.center.x - h && point.x < self.center.x + h
            && point.y >= self.center.y - h && point.y < self.center.y + h
            && point.z >= self.center.z - h && point.z < self.center.z + h
    }

    /// Index of the octant a point belongs to, as a 3-bit code.
    ///
    /// Bit 0 is set for `x >= center.x`, bit 1 for `y >= center.y`, bit 2
    /// for `z >= center.z`. The layout matches the child ordering returned
    /// by [`Region::subdivide`], so
    /// `region.subdivide()[region.octant_index(p)]` is the child containing
    /// `p` for any `p` inside the region.
    pub fn octant_index(&self, point: Vec3) -> usize {
        let mut index = 0;
        if point.x >= self.center.x {
            index |= 1;
        }
        if point.y >= self.center.y {
            index |= 2;
        }
        if point.z >= self.center.z {
            index |= 4;
        }
        index
    }

    /// Subdivides the region into eight equally sized octants.
    ///
    /// Children are ordered by the same bit code as
    /// [`Region::octant_index`]: each child has half the parent's side, and
    /// its center is offset by a quarter side along each axis, toward the
    /// negative face when the corresponding bit is clear and the positive
    /// face when it is set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_gravity::gravity::Region;
    /// use rs_gravity::models::Vec3;
    ///
    /// let region = Region::new(Vec3::zero(), 2.0).unwrap();
    /// let children = region.subdivide();
    ///
    /// assert_eq!(children[0].center, Vec3::new(-0.5, -0.5, -0.5));
    /// assert_eq!(children[7].center, Vec3::new(0.5, 0.5, 0.5));
    /// assert_eq!(children[0].side, 1.0);
    ///
    /// // A point is contained by exactly the child its octant code names.
    /// let p = Vec3::new(0.3, -0.2, 0.9);
    /// assert!(children[region.octant_index(p)].contains(p));
    /// ```
    pub fn subdivide(&self) -> [Region; 8] {
        let quarter = self.side * 0.25;
        let side = self.half();
        std::array::from_fn(|i| {
            let dx = if i & 1 == 0 { -quarter } else { quarter };
            let dy = if i & 2 == 0 { -quarter } else { quarter };
            let dz = if i & 4 == 0 { -quarter } else { quarter };
            Region {
                center: Vec3::new(self.center.x + dx, self.center.y + dy, self.center.z + dz),
                side,
            }
        })
    }

    /// Builds the cubic region spanning a min/max corner pair.
    ///
    /// The cube is centered on the box and sized to its largest extent,
    /// padded slightly so points on the max corner fall inside the
    /// half-open bounds. A zero-extent box (a single point, or coincident
    /// points) gets a unit cube around it.
    ///
    /// # Errors
    ///
    /// Returns an error if either corner has a non-finite component or the
    /// box is inverted.
    pub fn from_bounds(min: Vec3, max: Vec3) -> Result<Self, GravityError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(GravityError::DegenerateRegion);
        }
        let extent = (max - min).max_element();
        if extent < 0.0 {
            return Err(GravityError::DegenerateRegion);
        }
        let side = if extent > 0.0 { extent * BOUNDS_PADDING } else { 1.0 };
        Region::new((min + max) * 0.5, side)
    }

    /// Builds the bounding cube of a body set.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty set or non-finite positions.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_gravity::gravity::{Body, Region};
    /// use rs_gravity::models::Vec3;
    ///
    /// let bodies = vec![
    ///     Body::new(Vec3::new(-3.0, 0.0, 0.0), Vec3::zero(), 1.0).unwrap(),
    ///     Body::new(Vec3::new(5.0, 1.0, -2.0), Vec3::zero(), 1.0).unwrap(),
    /// ];
    /// let bounds = Region::containing(&bodies).unwrap();
    /// for body in &bodies {
    ///     assert!(bounds.contains(body.position));
    /// }
    /// ```
    pub fn containing(bodies: &[Body]) -> Result<Self, GravityError> {
        if bodies.is_empty() {
            return Err(GravityError::DegenerateRegion);
        }
        let mut min = bodies[0].position;
        let mut max = bodies[0].position;
        for body in &bodies[1..] {
            min = min.min_components(&body.position);
            max = max.max_components(&body.position);
        }
        Region::from_bounds(min, max)
    }
}
