//! Origin sampling: jitter base geometry, snap it back onto the reference
//! sphere, and draw each particle's coefficients.

use glam::Vec3;
#[cfg(not(feature = "os-rng"))]
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seed used when no seed is given and OS entropy is compiled out.
pub const FALLBACK_SEED: u64 = 0x5eed_c0c0_a000_0001;

/// Build the RNG for field initialization.
///
/// `Some(seed)` is reproducible; `None` draws from OS entropy when the
/// `os-rng` feature is enabled.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        #[cfg(feature = "os-rng")]
        None => StdRng::from_os_rng(),
        #[cfg(not(feature = "os-rng"))]
        None => {
            debug!("no seed and no entropy source; using fallback seed");
            StdRng::seed_from_u64(FALLBACK_SEED)
        }
    }
}

#[inline]
fn signed_unit<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.random_range(-1.0f32..1.0)
}

/// Perturb each sample by up to `jitter` per axis and rescale it to lie on a
/// sphere of `radius` around the origin.
///
/// A perturbed point with no usable direction lands on `+Y * radius`.
pub fn jitter_onto_sphere<R: Rng + ?Sized>(
    samples: &[Vec3],
    jitter: f32,
    radius: f32,
    rng: &mut R,
) -> Vec<Vec3> {
    samples
        .iter()
        .map(|sample| {
            let offset = Vec3::new(signed_unit(rng), signed_unit(rng), signed_unit(rng)) * jitter;
            (*sample + offset).try_normalize().unwrap_or(Vec3::Y) * radius
        })
        .collect()
}

/// Draw `count` signed per-axis coefficients in [-1, 1).
pub fn draw_coefficients<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Vec3> {
    (0..count)
        .map(|_| Vec3::new(signed_unit(rng), signed_unit(rng), signed_unit(rng)))
        .collect()
}

/// Evenly spread `count` points on a sphere (Fibonacci lattice).
///
/// Stand-in geometry for hosts and tests without a loaded mesh.
pub fn sphere_samples(count: usize, radius: f32) -> Vec<Vec3> {
    let golden_angle = std::f32::consts::PI * (3.0 - 5.0f32.sqrt());
    (0..count)
        .map(|i| {
            let y = if count > 1 {
                1.0 - 2.0 * i as f32 / (count - 1) as f32
            } else {
                0.0
            };
            let ring = (1.0 - y * y).max(0.0).sqrt();
            let theta = golden_angle * i as f32;
            Vec3::new(theta.cos() * ring, y, theta.sin() * ring) * radius
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jittered_points_sit_on_sphere() {
        let mut rng = seeded_rng(Some(7));
        let samples = sphere_samples(64, 1.3);
        let origins = jitter_onto_sphere(&samples, 0.2, 3.0, &mut rng);
        assert_eq!(origins.len(), 64);
        for o in origins {
            assert!((o.length() - 3.0).abs() < 1e-4, "{o}");
        }
    }

    #[test]
    fn zero_length_point_falls_back_to_up() {
        let mut rng = seeded_rng(Some(1));
        let origins = jitter_onto_sphere(&[Vec3::ZERO], 0.0, 2.0, &mut rng);
        assert_eq!(origins, vec![Vec3::new(0.0, 2.0, 0.0)]);
    }

    #[test]
    fn coefficients_are_signed_unit() {
        let mut rng = seeded_rng(Some(99));
        let coeffs = draw_coefficients(500, &mut rng);
        assert!(coeffs
            .iter()
            .all(|c| c.to_array().iter().all(|v| (-1.0..1.0).contains(v))));
        assert!(coeffs.iter().any(|c| c.x < 0.0));
        assert!(coeffs.iter().any(|c| c.x > 0.0));
    }

    #[test]
    fn sphere_samples_cover_both_poles() {
        let pts = sphere_samples(10, 5.0);
        assert!((pts[0].y - 5.0).abs() < 1e-5);
        assert!((pts[9].y + 5.0).abs() < 1e-5);
        assert!(pts.iter().all(|p| (p.length() - 5.0).abs() < 1e-4));
        assert_eq!(sphere_samples(1, 2.0), vec![Vec3::new(2.0, 0.0, 0.0)]);
    }
}
