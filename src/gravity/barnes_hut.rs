use crate::constants_config::SimulationConfig;
use crate::errors::GravityError;
use crate::gravity::{Body, Region};
use crate::models::Vec3;

/// Two bodies closer than this are treated as the same body during force
/// evaluation, which is how a query body skips its own entry in the tree.
const COINCIDENT_DIST_SQ: f64 = 1e-24;

/// The bodies held by one leaf, together with their running aggregate.
///
/// A leaf usually holds a single body. It holds more when the configured
/// leaf capacity is above one, or when the depth cap stopped subdivision
/// from separating (near-)coincident bodies.
#[derive(Debug, Clone)]
pub struct LeafCell {
    pub bodies: Vec<Body>,
    pub mass: f64,
    pub center_of_mass: Vec3,
}

impl LeafCell {
    fn of(body: Body) -> Self {
        LeafCell {
            mass: body.mass,
            center_of_mass: body.position,
            bodies: vec![body],
        }
    }

    fn absorb(&mut self, body: Body) {
        let total = self.mass + body.mass;
        self.center_of_mass =
            (self.center_of_mass * self.mass + body.position * body.mass) / total;
        self.mass = total;
        self.bodies.push(body);
    }
}

/// Barnes-Hut octree node.
///
/// Each node covers a cubic [`Region`] and is one of:
/// - `Empty`: no bodies beneath it, only the region.
/// - `Leaf`: a small bucket of bodies with their aggregate mass and center
///   of mass.
/// - `Internal`: eight children tiling the region, plus the total mass and
///   mass-weighted mean position of every body in the subtree.
///
/// Aggregates are maintained incrementally on every insertion; the tree is
/// rebuilt from scratch from the current body snapshot each simulation step
/// rather than updated across steps, so the aggregates can never go stale
/// as bodies move.
///
/// # Examples
///
/// ```
/// use rs_gravity::constants_config::SimulationConfig;
/// use rs_gravity::gravity::{BarnesHutNode, Body, Region};
/// use rs_gravity::models::Vec3;
///
/// let bounds = Region::new(Vec3::zero(), 10.0).unwrap();
/// let mut tree = BarnesHutNode::new(bounds);
/// let config = SimulationConfig::default();
///
/// tree.insert(Body::new(Vec3::new(1.0, 2.0, 0.0), Vec3::zero(), 5.0).unwrap(), &config).unwrap();
/// tree.insert(Body::new(Vec3::new(-2.0, -3.0, 1.0), Vec3::zero(), 10.0).unwrap(), &config).unwrap();
///
/// assert_eq!(tree.num_bodies(), 2);
/// assert_eq!(tree.mass(), 15.0);
/// ```
#[derive(Debug, Clone)]
pub enum BarnesHutNode {
    /// The node is empty; it stores the region it represents.
    Empty(Region),
    /// The node holds one leaf bucket of bodies.
    Leaf(Region, LeafCell),
    /// The node is internal and holds aggregated data along with eight children.
    Internal {
        region: Region,
        mass: f64,
        center_of_mass: Vec3,
        num_bodies: usize,
        children: [Box<BarnesHutNode>; 8],
    },
}

impl BarnesHutNode {
    /// Creates a new empty node covering the given region.
    pub fn new(region: Region) -> Self {
        BarnesHutNode::Empty(region)
    }

    /// The region this node covers.
    pub fn region(&self) -> Region {
        match self {
            BarnesHutNode::Empty(region) => *region,
            BarnesHutNode::Leaf(region, _) => *region,
            BarnesHutNode::Internal { region, .. } => *region,
        }
    }

    /// Total mass of every body in this subtree; zero for an empty node.
    pub fn mass(&self) -> f64 {
        match self {
            BarnesHutNode::Empty(_) => 0.0,
            BarnesHutNode::Leaf(_, cell) => cell.mass,
            BarnesHutNode::Internal { mass, .. } => *mass,
        }
    }

    /// Mass-weighted mean position of the subtree, if it holds any body.
    pub fn center_of_mass(&self) -> Option<Vec3> {
        match self {
            BarnesHutNode::Empty(_) => None,
            BarnesHutNode::Leaf(_, cell) => Some(cell.center_of_mass),
            BarnesHutNode::Internal { center_of_mass, .. } => Some(*center_of_mass),
        }
    }

    /// Number of bodies in this subtree.
    pub fn num_bodies(&self) -> usize {
        match self {
            BarnesHutNode::Empty(_) => 0,
            BarnesHutNode::Leaf(_, cell) => cell.bodies.len(),
            BarnesHutNode::Internal { num_bodies, .. } => *num_bodies,
        }
    }

    /// Inserts a body into the subtree.
    ///
    /// A leaf splits into eight children once its population would exceed
    /// `config.max_bodies_per_leaf`, except at `config.max_depth`: past the
    /// cap the leaf absorbs further bodies into its aggregate instead, so
    /// bodies sharing one position cannot drive unbounded subdivision.
    ///
    /// # Errors
    ///
    /// Returns [`GravityError::BodyOutOfBounds`] if the body's position is
    /// not inside this node's region. Nothing is dropped silently; the
    /// caller is responsible for sizing the root region over the whole
    /// body set (see [`Region::containing`]).
    pub fn insert(&mut self, body: Body, config: &SimulationConfig) -> Result<(), GravityError> {
        if !self.region().contains(body.position) {
            return Err(GravityError::BodyOutOfBounds);
        }
        self.insert_at(body, 0, config);
        Ok(())
    }

    /// Insertion worker. The body is known to lie inside `self.region()`;
    /// octant indexing keeps that invariant down the recursion because the
    /// children of a region tile it exactly.
    fn insert_at(&mut self, body: Body, depth: usize, config: &SimulationConfig) {
        match self {
            BarnesHutNode::Empty(region) => {
                *self = BarnesHutNode::Leaf(*region, LeafCell::of(body));
            }
            BarnesHutNode::Leaf(region, cell) => {
                if cell.bodies.len() < config.max_bodies_per_leaf || depth >= config.max_depth {
                    cell.absorb(body);
                    return;
                }

                // Split: re-home the resident bodies, then the new one.
                let region = *region;
                let residents = std::mem::take(&mut cell.bodies);
                let children = region
                    .subdivide()
                    .map(|octant| Box::new(BarnesHutNode::Empty(octant)));
                *self = BarnesHutNode::Internal {
                    region,
                    mass: 0.0,
                    center_of_mass: Vec3::zero(),
                    num_bodies: 0,
                    children,
                };
                for resident in residents {
                    self.insert_at(resident, depth, config);
                }
                self.insert_at(body, depth, config);
            }
            BarnesHutNode::Internal {
                region,
                mass,
                center_of_mass,
                num_bodies,
                children,
            } => {
                let total = *mass + body.mass;
                *center_of_mass =
                    (*center_of_mass * *mass + body.position * body.mass) / total;
                *mass = total;
                *num_bodies += 1;

                let index = region.octant_index(body.position);
                children[index].insert_at(body, depth + 1, config);
            }
        }
    }

    /// Computes the force exerted on `body` by the mass in this subtree.
    ///
    /// - An empty node contributes nothing.
    /// - A leaf contributes the softened pairwise force of each of its
    ///   bodies; an entry coinciding with `body`'s position is skipped, which
    ///   excludes the query body itself.
    /// - An internal node whose angular size is below the threshold
    ///   (`side / distance < theta`) is collapsed into a single point mass at
    ///   its center of mass; otherwise all eight children are summed.
    ///
    /// The pairwise law is `G * m1 * m2 / (d² + softening²)` along the unit
    /// separation vector, so the magnitude stays bounded by
    /// `G * m1 * m2 / softening²` no matter how close two bodies get.
    ///
    /// Evaluation never mutates the tree; any number of queries against one
    /// built tree are independent.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_gravity::constants_config::SimulationConfig;
    /// use rs_gravity::gravity::{build_tree, Body, Region};
    /// use rs_gravity::models::Vec3;
    ///
    /// let bodies = vec![
    ///     Body::new(Vec3::new(1.0, 0.0, 0.0), Vec3::zero(), 1.0).unwrap(),
    ///     Body::new(Vec3::new(-1.0, 0.0, 0.0), Vec3::zero(), 1.0).unwrap(),
    /// ];
    /// let bounds = Region::new(Vec3::zero(), 4.0).unwrap();
    /// let tree = build_tree(&bodies, bounds, &SimulationConfig::default()).unwrap();
    ///
    /// let probe = Body::new(Vec3::new(0.0, 2.0, 0.0), Vec3::zero(), 1.0).unwrap();
    /// let force = tree.compute_force(&probe, 0.5, 1.0, 0.0);
    ///
    /// // The pair is symmetric about the y-axis: x cancels, y pulls down.
    /// assert!(force.x.abs() < 1e-12);
    /// assert!(force.y < 0.0);
    /// ```
    pub fn compute_force(&self, body: &Body, theta: f64, g: f64, softening: f64) -> Vec3 {
        self.force_from(body, theta, g, softening * softening)
    }

    fn force_from(&self, body: &Body, theta: f64, g: f64, eps2: f64) -> Vec3 {
        match self {
            BarnesHutNode::Empty(_) => Vec3::zero(),
            BarnesHutNode::Leaf(_, cell) => {
                let mut force = Vec3::zero();
                for other in &cell.bodies {
                    force += point_mass_force(body, other.position, other.mass, g, eps2);
                }
                force
            }
            BarnesHutNode::Internal {
                region,
                mass,
                center_of_mass,
                children,
                ..
            } => {
                let distance = (*center_of_mass - body.position).norm();
                // distance == 0 gives an infinite ratio and falls through
                // to the children.
                if region.side / distance < theta {
                    point_mass_force(body, *center_of_mass, *mass, g, eps2)
                } else {
                    let mut force = Vec3::zero();
                    for child in children.iter() {
                        force += child.force_from(body, theta, g, eps2);
                    }
                    force
                }
            }
        }
    }
}

/// Softened inverse-square attraction of `target` toward a point mass.
///
/// Returns zero when the point coincides with the target's position, which
/// is how a body is excluded from its own force sum.
fn point_mass_force(target: &Body, at: Vec3, mass: f64, g: f64, eps2: f64) -> Vec3 {
    let r = at - target.position;
    let r2 = r.norm_squared();
    if r2 < COINCIDENT_DIST_SQ {
        return Vec3::zero();
    }
    let dist_sq = r2 + eps2;
    let dist = dist_sq.sqrt();
    let magnitude = g * target.mass * mass / dist_sq;
    r * (magnitude / dist)
}

/// Builds a Barnes-Hut tree over a body snapshot.
///
/// The tree borrows nothing: bodies are copied into the leaves, so the
/// returned tree can be shared immutably across force-evaluation threads
/// while the caller retains the originals.
///
/// # Errors
///
/// Returns an error if any body lies outside `bounds`. The bounding region
/// must cover the entire snapshot for the step; see [`Region::containing`].
///
/// # Examples
///
/// ```
/// use rs_gravity::constants_config::SimulationConfig;
/// use rs_gravity::gravity::{build_tree, Body, Region};
/// use rs_gravity::models::Vec3;
///
/// let bodies = vec![
///     Body::new(Vec3::new(0.1, 0.1, 0.0), Vec3::zero(), 1.0).unwrap(),
///     Body::new(Vec3::new(-0.5, 0.5, 0.2), Vec3::zero(), 2.0).unwrap(),
///     Body::new(Vec3::new(0.4, -0.2, -0.3), Vec3::zero(), 1.5).unwrap(),
/// ];
/// let bounds = Region::new(Vec3::zero(), 2.0).unwrap();
/// let tree = build_tree(&bodies, bounds, &SimulationConfig::default()).unwrap();
///
/// assert_eq!(tree.num_bodies(), 3);
/// assert_eq!(tree.mass(), 4.5);
/// ```
pub fn build_tree(
    bodies: &[Body],
    bounds: Region,
    config: &SimulationConfig,
) -> Result<BarnesHutNode, GravityError> {
    let mut root = BarnesHutNode::new(bounds);
    for &body in bodies {
        root.insert(body, config)?;
    }
    Ok(root)
}

/// Exact O(N²) reference evaluator: the softened pairwise force on `target`
/// from every body in the slice, with no tree approximation.
///
/// An entry whose position coincides with `target`'s is skipped, matching
/// the self-exclusion rule of the tree traversal, so the slice may contain
/// the target itself.
///
/// # Examples
///
/// ```
/// use rs_gravity::gravity::{direct_force, Body};
/// use rs_gravity::models::Vec3;
///
/// let bodies = vec![
///     Body::new(Vec3::new(1.0, 0.0, 0.0), Vec3::zero(), 1.0).unwrap(),
///     Body::new(Vec3::new(0.0, 1.0, 0.0), Vec3::zero(), 1.0).unwrap(),
/// ];
/// let target = Body::new(Vec3::zero(), Vec3::zero(), 1.0).unwrap();
/// let force = direct_force(&target, &bodies, 1.0, 0.0);
///
/// // Equal masses at equal distances: both components match.
/// assert!((force.x - force.y).abs() < 1e-12);
/// ```
pub fn direct_force(target: &Body, bodies: &[Body], g: f64, softening: f64) -> Vec3 {
    let eps2 = softening * softening;
    let mut force = Vec3::zero();
    for body in bodies {
        force += point_mass_force(target, body.position, body.mass, g, eps2);
    }
    force
}
