use crate::errors::GravityError;
use crate::gravity::{Body, Region};
use crate::models::Vec3;

#[test]
fn test_region_rejects_degenerate_side() {
    assert_eq!(Region::new(Vec3::zero(), 0.0).unwrap_err(), GravityError::DegenerateRegion);
    assert_eq!(Region::new(Vec3::zero(), -1.0).unwrap_err(), GravityError::DegenerateRegion);
    assert_eq!(Region::new(Vec3::zero(), f64::NAN).unwrap_err(), GravityError::DegenerateRegion);
    assert_eq!(Region::new(Vec3::zero(), f64::INFINITY).unwrap_err(), GravityError::DegenerateRegion);
    assert_eq!(
        Region::new(Vec3::new(f64::NAN, 0.0, 0.0), 1.0).unwrap_err(),
        GravityError::DegenerateRegion
    );
}

#[test]
fn test_contains_is_half_open() {
    let region = Region::new(Vec3::zero(), 2.0).unwrap();

    assert!(region.contains(Vec3::zero()));
    assert!(region.contains(Vec3::new(0.99, 0.99, 0.99)));
    assert!(region.contains(Vec3::new(-1.0, -1.0, -1.0))); // lower faces inclusive

    assert!(!region.contains(Vec3::new(1.0, 0.0, 0.0))); // upper faces exclusive
    assert!(!region.contains(Vec3::new(0.0, 1.0, 0.0)));
    assert!(!region.contains(Vec3::new(0.0, 0.0, 1.0)));
    assert!(!region.contains(Vec3::new(1.5, 0.0, 0.0)));
}

#[test]
fn test_octant_index_covers_all_octants() {
    let region = Region::new(Vec3::zero(), 10.0).unwrap();

    assert_eq!(region.octant_index(Vec3::new(-1.0, -1.0, -1.0)), 0);
    assert_eq!(region.octant_index(Vec3::new(1.0, -1.0, -1.0)), 1);
    assert_eq!(region.octant_index(Vec3::new(-1.0, 1.0, -1.0)), 2);
    assert_eq!(region.octant_index(Vec3::new(1.0, 1.0, -1.0)), 3);
    assert_eq!(region.octant_index(Vec3::new(-1.0, -1.0, 1.0)), 4);
    assert_eq!(region.octant_index(Vec3::new(1.0, -1.0, 1.0)), 5);
    assert_eq!(region.octant_index(Vec3::new(-1.0, 1.0, 1.0)), 6);
    assert_eq!(region.octant_index(Vec3::new(1.0, 1.0, 1.0)), 7);
}

#[test]
fn test_octant_index_boundary_goes_to_upper_child() {
    let region = Region::new(Vec3::zero(), 10.0).unwrap();

    // A coordinate equal to the center maps to the "upper" sibling on
    // that axis, the same rule `contains` uses for faces.
    assert_eq!(region.octant_index(Vec3::new(0.0, -1.0, -1.0)), 1);
    assert_eq!(region.octant_index(Vec3::new(-1.0, 0.0, -1.0)), 2);
    assert_eq!(region.octant_index(Vec3::new(-1.0, -1.0, 0.0)), 4);
    assert_eq!(region.octant_index(Vec3::zero()), 7);
}

#[test]
fn test_subdivide_geometry() {
    let region = Region::new(Vec3::new(2.0, -2.0, 0.0), 4.0).unwrap();
    let children = region.subdivide();

    for child in &children {
        assert_eq!(child.side, 2.0);
    }
    assert_eq!(children[0].center, Vec3::new(1.0, -3.0, -1.0));
    assert_eq!(children[1].center, Vec3::new(3.0, -3.0, -1.0));
    assert_eq!(children[7].center, Vec3::new(3.0, -1.0, 1.0));
}

#[test]
fn test_subdivide_tiles_parent_exactly() {
    let region = Region::new(Vec3::new(0.5, 0.5, 0.5), 3.0).unwrap();
    let children = region.subdivide();

    // Sample the parent on a grid (including points on the internal
    // faces): every sample must land in exactly one child.
    let h = region.half();
    let steps = 6; // step of side/6 lands samples on the internal faces

    for ix in 0..steps {
        for iy in 0..steps {
            for iz in 0..steps {
                let point = Vec3::new(
                    region.center.x - h + region.side * ix as f64 / steps as f64,
                    region.center.y - h + region.side * iy as f64 / steps as f64,
                    region.center.z - h + region.side * iz as f64 / steps as f64,
                );
                assert!(region.contains(point));
                let owners = children.iter().filter(|c| c.contains(point)).count();
                assert_eq!(owners, 1, "point {:?} owned by {} children", point, owners);
            }
        }
    }
}

#[test]
fn test_octant_index_agrees_with_subdivide() {
    let region = Region::new(Vec3::new(-1.0, 2.0, 3.0), 8.0).unwrap();
    let children = region.subdivide();

    let samples = [
        Vec3::new(-1.0, 2.0, 3.0), // exact center
        Vec3::new(-4.9, -1.9, -0.9),
        Vec3::new(2.9, 5.9, 6.9),
        Vec3::new(-1.0, 0.0, 5.0),
        Vec3::new(0.5, 2.0, 3.0),
    ];
    for point in samples {
        assert!(region.contains(point));
        assert!(children[region.octant_index(point)].contains(point));
    }
}

#[test]
fn test_containing_bounds_every_body() {
    let bodies = vec![
        Body::new(Vec3::new(-3.0, 7.0, 0.0), Vec3::zero(), 1.0).unwrap(),
        Body::new(Vec3::new(5.0, -1.0, -2.0), Vec3::zero(), 1.0).unwrap(),
        Body::new(Vec3::new(0.0, 0.0, 9.0), Vec3::zero(), 1.0).unwrap(),
    ];

    let bounds = Region::containing(&bodies).unwrap();
    for body in &bodies {
        assert!(bounds.contains(body.position), "{:?} escaped {:?}", body.position, bounds);
    }
}

#[test]
fn test_containing_single_body() {
    let bodies = vec![Body::new(Vec3::new(4.0, 4.0, 4.0), Vec3::zero(), 1.0).unwrap()];

    let bounds = Region::containing(&bodies).unwrap();
    assert!(bounds.side > 0.0);
    assert!(bounds.contains(bodies[0].position));
}

#[test]
fn test_containing_coincident_bodies() {
    let position = Vec3::new(-2.0, 1.0, 0.5);
    let bodies = vec![
        Body::new(position, Vec3::zero(), 1.0).unwrap(),
        Body::new(position, Vec3::zero(), 2.0).unwrap(),
    ];

    let bounds = Region::containing(&bodies).unwrap();
    assert!(bounds.side > 0.0);
    assert!(bounds.contains(position));
}

#[test]
fn test_containing_empty_set_errors() {
    assert_eq!(Region::containing(&[]).unwrap_err(), GravityError::DegenerateRegion);
}

#[test]
fn test_from_bounds_rejects_non_finite() {
    let result = Region::from_bounds(Vec3::new(f64::NAN, 0.0, 0.0), Vec3::zero());
    assert!(result.is_err());
}
