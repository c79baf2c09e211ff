use corona_particles_core::{
    displace, planar_distance, FieldConstants, FieldError, ParticleField, Point3,
};
use proptest::prelude::*;

fn scenario_constants() -> FieldConstants {
    FieldConstants {
        boundary_distance: 10.0,
        max_displacement: 20.0,
        height_offset: 0.0,
        scale_divisor: 2.0,
        scale_range: [1.0, 6.0],
        axis_signs: [1.0, 1.0, 1.0],
    }
}

/// Four particles on the depth axis at planar distances 2, 8, 12 and 15 from
/// an anchor sitting at the body centre.
fn scenario_field() -> ParticleField {
    let origins = [2.0, 8.0, 12.0, 15.0]
        .iter()
        .map(|z| Point3::new(0.0, 0.0, *z))
        .collect();
    let coefficients = vec![
        Point3::new(0.3, -0.2, 0.8),
        Point3::new(-0.5, 0.4, -0.6),
        Point3::new(0.9, 0.9, 0.9),
        Point3::new(-0.1, 0.7, 0.5),
    ];
    ParticleField::from_buffers(origins, coefficients).expect("equal buffer sizes")
}

#[test]
fn particles_inside_boundary_flare_outward_others_stay_home() {
    let constants = scenario_constants();
    let anchor = Point3::ZERO;
    let mut field = scenario_field();

    let distances: Vec<f32> = field
        .origins()
        .iter()
        .map(|o| planar_distance(*o, anchor, 0.0))
        .collect();
    assert_eq!(distances, vec![2.0, 8.0, 12.0, 15.0]);

    field.update(anchor, &constants);
    let positions = field.positions();
    let origins = field.origins();

    for i in 0..2 {
        let dz = positions[i][2] - origins[i].z;
        assert!(dz > 0.0, "particle {i} should move away from the centre, dz={dz}");
    }
    for i in 2..4 {
        assert_eq!(positions[i], origins[i].to_array(), "particle {i} should rest");
    }

    // particle 0: 20 * (10 - 2) / 10 * 0.8 = 12.8
    assert!((positions[0][2] - (2.0 + 12.8)).abs() < 1e-5);
    assert!((positions[0][0] - 0.3 * 12.8).abs() < 1e-5);
    assert!((positions[0][1] + 0.2 * 12.8).abs() < 1e-5);
}

#[test]
fn boundary_distance_itself_takes_the_reset_branch() {
    let constants = scenario_constants();
    let coefficient = Point3::new(1.0, 1.0, 1.0);

    // 6-8-10 triangle in the depth/height plane
    let on_boundary = Point3::new(0.0, 6.0, 8.0);
    assert_eq!(planar_distance(on_boundary, Point3::ZERO, 0.0), 10.0);
    let d = displace(on_boundary, coefficient, Point3::ZERO, &constants);
    assert_eq!(d.position, on_boundary);
    assert_eq!(d.push, 0.0);

    let just_inside = Point3::new(0.0, 6.0, 7.99);
    let d = displace(just_inside, coefficient, Point3::ZERO, &constants);
    assert!(d.push > 0.0);
    assert_ne!(d.position, just_inside);
}

#[test]
fn lateral_axis_does_not_change_the_branch() {
    let constants = scenario_constants();
    let coefficient = Point3::new(0.5, 0.5, 0.5);
    let near = displace(Point3::new(0.0, 0.0, 3.0), coefficient, Point3::ZERO, &constants);
    let wide = displace(Point3::new(500.0, 0.0, 3.0), coefficient, Point3::ZERO, &constants);
    assert_eq!(near.push, wide.push);
}

#[test]
fn update_twice_is_bit_identical() {
    let constants = FieldConstants::halo();
    let mut field =
        ParticleField::initialize_seeded(&corona_particles_core::sphere_samples(256, 5.0), 0.1, 5.0, Some(3))
            .unwrap();
    let anchor = Point3::new(0.4, 1.0, 7.5);

    field.update(anchor, &constants);
    let positions = field.positions().to_vec();
    let scales = field.scales().to_vec();

    field.update(anchor, &constants);
    assert_eq!(field.positions(), positions.as_slice());
    assert_eq!(field.scales(), scales.as_slice());
}

#[test]
fn result_does_not_depend_on_call_history() {
    let constants = FieldConstants::corona();
    let samples = corona_particles_core::sphere_samples(128, 5.0);
    let mut walked = ParticleField::initialize_seeded(&samples, 0.2, 5.0, Some(11)).unwrap();
    let mut fresh = walked.clone();

    for z in [-20.0, -5.0, 0.0, 4.0, 9.0] {
        walked.update(Point3::new(0.0, 0.0, z), &constants);
    }
    let target = Point3::new(0.0, 0.5, 6.0);
    walked.update(target, &constants);
    fresh.update(target, &constants);

    assert_eq!(walked.positions(), fresh.positions());
    assert_eq!(walked.scales(), fresh.scales());
}

#[test]
fn far_anchor_restores_origins_with_min_scale() {
    let constants = FieldConstants::corona();
    let samples = corona_particles_core::sphere_samples(200, 5.0);
    let mut field = ParticleField::initialize_seeded(&samples, 0.3, 5.0, Some(5)).unwrap();

    field.update(Point3::new(0.0, 0.0, 5.5), &constants);
    assert!(field
        .positions()
        .iter()
        .zip(field.origins())
        .any(|(p, o)| *p != o.to_array()));

    field.update(Point3::new(0.0, 0.0, -1000.0), &constants);
    for (p, o) in field.positions().iter().zip(field.origins()) {
        assert_eq!(*p, o.to_array());
    }
    assert!(field.scales().iter().all(|s| *s == constants.scale_range[0]));
}

#[test]
fn nan_anchor_resets_instead_of_poisoning_buffers() {
    let constants = FieldConstants::corona();
    let mut field = scenario_field();
    field.update(Point3::new(f32::NAN, f32::NAN, f32::NAN), &constants);
    for (p, o) in field.positions().iter().zip(field.origins()) {
        assert_eq!(*p, o.to_array());
    }
}

#[test]
fn axis_signs_flip_individual_axes() {
    let mut constants = scenario_constants();
    let origin = Point3::new(0.0, 0.0, 2.0);
    let coefficient = Point3::new(0.5, 0.5, 1.0);
    let plain = displace(origin, coefficient, Point3::ZERO, &constants);

    constants.axis_signs = [-1.0, 1.0, -1.0];
    let flipped = displace(origin, coefficient, Point3::ZERO, &constants);

    assert_eq!(flipped.position.x, -plain.position.x);
    assert_eq!(flipped.position.y, plain.position.y);
    assert_eq!(flipped.position.z - origin.z, -(plain.position.z - origin.z));
}

#[test]
fn mismatched_buffers_fail_fast() {
    let err = ParticleField::from_buffers(vec![Point3::ZERO; 4], vec![Point3::ONE; 3])
        .unwrap_err();
    assert_eq!(
        err,
        FieldError::BufferSizeMismatch {
            origins: 4,
            coefficients: 3
        }
    );
}

#[test]
fn flat_positions_interleave_xyz() {
    let field = ParticleField::from_buffers(
        vec![Point3::new(1.0, 2.0, 3.0), Point3::new(4.0, 5.0, 6.0)],
        vec![Point3::ZERO; 2],
    )
    .unwrap();
    assert_eq!(field.positions_flat(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}

fn finite() -> impl Strategy<Value = f32> {
    -50.0f32..50.0
}

fn point() -> impl Strategy<Value = Point3> {
    (finite(), finite(), finite()).prop_map(|(x, y, z)| Point3::new(x, y, z))
}

fn coefficient() -> impl Strategy<Value = Point3> {
    (-1.0f32..1.0, -1.0f32..1.0, -1.0f32..1.0).prop_map(|(x, y, z)| Point3::new(x, y, z))
}

proptest! {
    #[test]
    fn scale_always_within_range(
        origin in point(),
        coeff in coefficient(),
        anchor in point(),
        min in 0.0f32..5.0,
        span in 0.0f32..5.0,
        divisor in 0.1f32..30.0,
    ) {
        let constants = FieldConstants {
            scale_divisor: divisor,
            scale_range: [min, min + span],
            ..FieldConstants::corona()
        };
        let d = displace(origin, coeff, anchor, &constants);
        prop_assert!(d.scale >= min && d.scale <= min + span);
    }

    #[test]
    fn outside_boundary_is_exactly_origin(
        origin in point(),
        coeff in coefficient(),
        anchor in point(),
    ) {
        let constants = FieldConstants::corona();
        let dis = planar_distance(origin, anchor, constants.height_offset);
        let d = displace(origin, coeff, anchor, &constants);
        if dis >= constants.boundary_distance {
            prop_assert_eq!(d.position, origin);
        } else {
            prop_assert!(d.push >= 0.0);
        }
    }
}
