use criterion::{black_box, criterion_group, criterion_main, Criterion};

use corona_particles_core::{sphere_samples, FieldConstants, ParticleField, Point3};

fn bench_update(c: &mut Criterion) {
    let constants = FieldConstants::corona();
    let samples = sphere_samples(20_000, 5.0);
    let mut field = ParticleField::initialize_seeded(&samples, 0.2, 5.0, Some(1)).unwrap();

    c.bench_function("field_update_20k_near", |b| {
        b.iter(|| field.update(black_box(Point3::new(0.0, 0.0, 6.0)), &constants))
    });
    c.bench_function("field_update_20k_far", |b| {
        b.iter(|| field.update(black_box(Point3::new(0.0, 0.0, -35.0)), &constants))
    });
}

criterion_group!(benches, bench_update);
criterion_main!(benches);
