//! Tone mapping and display encoding for the lit result.

use glam::Vec3;

/// Reinhard tone curve, per channel.
///
/// Monotonic, and maps any non-negative radiance into `[0, 1)`.
pub fn reinhard(color: Vec3) -> Vec3 {
    color / (color + Vec3::ONE)
}

/// Gamma encoding to display space with a 1/2.2 exponent.
pub fn gamma_encode(color: Vec3) -> Vec3 {
    color.max(Vec3::ZERO).powf(1.0 / 2.2)
}

/// Combine accumulated radiance and emission into the final display color.
///
/// Output alpha is fixed at 1.0; blending and alpha cutoff are not handled
/// at this stage.
pub fn resolve(radiance: Vec3, emissive: Vec3) -> [f32; 4] {
    let color = gamma_encode(reinhard(radiance + emissive));
    [color.x, color.y, color.z, 1.0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reinhard_range() {
        for v in [0.0, 0.1, 1.0, 10.0, 1e6] {
            let out = reinhard(Vec3::splat(v));
            assert!(out.x >= 0.0 && out.x < 1.0, "out of range for input {}", v);
        }
    }

    #[test]
    fn test_reinhard_monotonic() {
        let mut prev = -1.0f32;
        for i in 0..200 {
            let out = reinhard(Vec3::splat(i as f32 * 0.1)).x;
            assert!(out > prev);
            prev = out;
        }
    }

    #[test]
    fn test_gamma_brightens_midtones() {
        let out = gamma_encode(Vec3::splat(0.2));
        assert!(out.x > 0.2);
    }

    #[test]
    fn test_resolve_opaque() {
        let out = resolve(Vec3::splat(0.5), Vec3::ZERO);
        assert_eq!(out[3], 1.0);
        assert!(out[0] > 0.0 && out[0] < 1.0);
    }

    #[test]
    fn test_resolve_adds_emissive() {
        let unlit = resolve(Vec3::ZERO, Vec3::ZERO);
        let emissive = resolve(Vec3::ZERO, Vec3::splat(2.0));
        assert_eq!(unlit[0], 0.0);
        assert!(emissive[0] > 0.5);
    }
}
