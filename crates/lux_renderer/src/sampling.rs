//! Random sampling helpers.
//!
//! All sampling draws from an explicitly passed generator so concurrent
//! evaluations never share random state.

use lux_math::Vec3;
use rand::{Rng, RngCore};

/// Uniform float in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}

/// Generate a random unit vector on the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    // Use rejection sampling for uniform distribution on sphere
    loop {
        let v = Vec3::new(
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
        );
        let len_sq = v.length_squared();
        if len_sq > 1e-6 && len_sq <= 1.0 {
            return v / len_sq.sqrt();
        }
    }
}

/// Sample a random point in the unit square [-0.5, 0.5] x [-0.5, 0.5].
pub fn sample_square(rng: &mut dyn RngCore) -> (f32, f32) {
    (gen_f32(rng) - 0.5, gen_f32(rng) - 0.5)
}
