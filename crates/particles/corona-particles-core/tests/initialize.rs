use corona_particles_core::{seeded_rng, sphere_samples, FieldError, ParticleField, Point3};

#[test]
fn origins_land_on_reference_sphere_despite_jitter() {
    let samples = sphere_samples(500, 1.0);
    let field = ParticleField::initialize_seeded(&samples, 0.35, 4.0, Some(42)).unwrap();

    assert_eq!(field.len(), 500);
    assert_eq!(field.coefficients().len(), 500);
    assert_eq!(field.positions().len(), 500);
    assert_eq!(field.scales().len(), 500);
    for o in field.origins() {
        assert!((o.length() - 4.0).abs() < 1e-4, "{o} off sphere");
    }
    // jitter actually moved directions away from the lattice
    let moved = field
        .origins()
        .iter()
        .zip(&samples)
        .filter(|(o, s)| (**o / 4.0 - **s).length() > 1e-3)
        .count();
    assert!(moved > 400);
}

#[test]
fn same_seed_reproduces_field() {
    let samples = sphere_samples(64, 2.0);
    let a = ParticleField::initialize_seeded(&samples, 0.1, 2.0, Some(7)).unwrap();
    let b = ParticleField::initialize_seeded(&samples, 0.1, 2.0, Some(7)).unwrap();
    let c = ParticleField::initialize_seeded(&samples, 0.1, 2.0, Some(8)).unwrap();

    assert_eq!(a.origins(), b.origins());
    assert_eq!(a.coefficients(), b.coefficients());
    assert_ne!(a.coefficients(), c.coefficients());
}

#[test]
fn explicit_rng_matches_seeded_constructor() {
    let samples = sphere_samples(32, 2.0);
    let mut rng = seeded_rng(Some(1234));
    let a = ParticleField::initialize(&samples, 0.05, 3.0, &mut rng).unwrap();
    let b = ParticleField::initialize_seeded(&samples, 0.05, 3.0, Some(1234)).unwrap();
    assert_eq!(a.origins(), b.origins());
}

#[test]
fn coefficients_are_signed_and_bounded() {
    let field =
        ParticleField::initialize_seeded(&sphere_samples(300, 1.0), 0.0, 1.0, Some(9)).unwrap();
    let all: Vec<f32> = field
        .coefficients()
        .iter()
        .flat_map(|c| c.to_array())
        .collect();
    assert!(all.iter().all(|v| *v >= -1.0 && *v < 1.0));
    assert!(all.iter().any(|v| *v < 0.0));
    assert!(all.iter().any(|v| *v > 0.0));
}

#[test]
fn fresh_field_outputs_start_at_origins() {
    let field =
        ParticleField::initialize_seeded(&sphere_samples(16, 1.0), 0.1, 1.0, Some(2)).unwrap();
    assert!(field.is_dirty());
    for (p, o) in field.positions().iter().zip(field.origins()) {
        assert_eq!(*p, o.to_array());
    }
}

#[test]
fn empty_geometry_is_reported() {
    let err = ParticleField::initialize_seeded(&[], 0.1, 1.0, Some(1)).unwrap_err();
    assert_eq!(err, FieldError::EmptyGeometry);
    assert!(err.is_recoverable());
}

#[test]
fn bad_radius_or_jitter_is_rejected() {
    let samples = [Point3::X];
    for radius in [0.0, -1.0, f32::NAN] {
        let err = ParticleField::initialize_seeded(&samples, 0.1, radius, Some(1)).unwrap_err();
        assert!(matches!(err, FieldError::InvalidGeometry { .. }));
    }
    let err = ParticleField::initialize_seeded(&samples, -0.1, 1.0, Some(1)).unwrap_err();
    assert!(matches!(err, FieldError::InvalidGeometry { .. }));
}

#[test]
fn dispose_releases_buffers() {
    let mut field =
        ParticleField::initialize_seeded(&sphere_samples(16, 1.0), 0.1, 1.0, Some(2)).unwrap();
    field.dispose();
    assert!(field.is_inert());
    assert!(field.positions().is_empty());
    assert!(field.scales().is_empty());
    assert!(!field.is_dirty());
}

#[cfg(feature = "os-rng")]
#[test]
fn unseeded_fields_differ() {
    let samples = sphere_samples(32, 1.0);
    let a = ParticleField::initialize_seeded(&samples, 0.1, 1.0, None).unwrap();
    let b = ParticleField::initialize_seeded(&samples, 0.1, 1.0, None).unwrap();
    assert_ne!(a.coefficients(), b.coefficients());
}
