//! Per-sample lighting evaluation.
//!
//! This is the fragment-stage core: given one interpolated surface sample,
//! the bound material and the active light set, accumulate the
//! Cook-Torrance contribution of every light and resolve to display color.
//! Each evaluation is a pure function of its inputs; samples share nothing
//! and can be dispatched in any order or in parallel.

use glam::{Vec2, Vec3};

use crate::attenuation::{cone_attenuation, range_attenuation};
use crate::brdf;
use crate::light::{Light, LightBuffer, LightKind};
use crate::material::Material;
use crate::post;

/// Interpolated fragment inputs for one covered sample.
#[derive(Clone, Copy, Debug)]
pub struct SurfaceSample {
    pub world_position: Vec3,
    /// Assumed close to unit length; re-normalized before shading.
    pub normal: Vec3,
    /// Forwarded for texture sampling; not consumed by the shading math yet.
    pub uv: Vec2,
}

/// Unit direction toward the light and its combined falloff at `point`.
fn direction_and_attenuation(light: &Light, point: Vec3) -> (Vec3, f32) {
    match light.kind {
        LightKind::Point => {
            let to_light = light.position - point;
            let dist = to_light.length();
            let l = to_light.normalize_or_zero();
            (l, range_attenuation(dist, light.range))
        }
        // Directional lights are not spatially bounded; range and cone
        // do not apply.
        LightKind::Directional => ((-light.direction).normalize_or_zero(), 1.0),
        LightKind::Spot => {
            let to_light = light.position - point;
            let dist = to_light.length();
            let l = to_light.normalize_or_zero();
            let axis = light.direction.normalize_or_zero();
            let cone = cone_attenuation((-l).dot(axis), light.inner_cos, light.outer_cos);
            (l, range_attenuation(dist, light.range) * cone)
        }
    }
}

/// Outgoing radiance at the sample, before emission and tone mapping.
///
/// Light order only matters up to floating-point rounding; the slots are
/// independent and their contributions sum.
pub fn accumulate_radiance(
    camera_pos: Vec3,
    lights: &LightBuffer,
    material: &Material,
    sample: &SurfaceSample,
) -> Vec3 {
    let n = sample.normal.normalize_or_zero();
    let v = (camera_pos - sample.world_position).normalize_or_zero();
    let albedo = Vec3::new(
        material.base_color_factor[0],
        material.base_color_factor[1],
        material.base_color_factor[2],
    );

    let mut radiance = Vec3::ZERO;
    for light in lights.active() {
        let (l, attenuation) = direction_and_attenuation(light, sample.world_position);
        radiance += brdf::contribution(
            n,
            v,
            l,
            light.color,
            attenuation,
            albedo,
            material.metallic_factor,
            material.roughness_factor,
        );
    }
    radiance
}

/// Full fragment pipeline for one sample: accumulate the lit sum, add
/// emission, tone-map and gamma-encode. Returns display-space RGBA with
/// alpha fixed at 1.0.
pub fn shade(
    camera_pos: Vec3,
    lights: &LightBuffer,
    material: &Material,
    sample: &SurfaceSample,
) -> [f32; 4] {
    let radiance = accumulate_radiance(camera_pos, lights, material, sample);
    post::resolve(radiance, Vec3::from(material.emissive_factor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::MAX_LIGHTS;

    fn facing_sample() -> SurfaceSample {
        SurfaceSample {
            world_position: Vec3::new(5.0, 0.0, 0.0),
            normal: Vec3::NEG_X,
            uv: Vec2::ZERO,
        }
    }

    fn matte_white() -> Material {
        Material {
            base_color_factor: [1.0, 1.0, 1.0, 1.0],
            metallic_factor: 0.0,
            roughness_factor: 1.0,
            ..Material::default()
        }
    }

    #[test]
    fn test_point_light_at_half_range() {
        // Light at the origin, sample 5 units out of a 10 unit range,
        // normal facing the light dead on: diffuse-dominant, finite,
        // scaled by the 0.25 falloff.
        let lights = LightBuffer::from_slice(&[Light::point(Vec3::ZERO, Vec3::ONE, 10.0)]);
        let out = accumulate_radiance(Vec3::ZERO, &lights, &matte_white(), &facing_sample());
        assert!(out.is_finite());
        assert!(out.x > 0.0);
        // Attenuation 0.25 and NdotL = 1 bound the result by albedo/pi * 0.25.
        assert!(out.x < 0.25);
    }

    #[test]
    fn test_directional_ignores_range_and_position() {
        let near = LightBuffer::from_slice(&[Light {
            range: 0.001,
            ..Light::directional(Vec3::X, Vec3::ONE)
        }]);
        let far = LightBuffer::from_slice(&[Light {
            position: Vec3::splat(1000.0),
            range: 1e9,
            ..Light::directional(Vec3::X, Vec3::ONE)
        }]);
        let sample = facing_sample();
        let a = accumulate_radiance(Vec3::ZERO, &near, &matte_white(), &sample);
        let b = accumulate_radiance(Vec3::ZERO, &far, &matte_white(), &sample);
        assert_eq!(a, b);
        assert!(a.x > 0.0);
    }

    #[test]
    fn test_spot_cone_gates_contribution() {
        // Spot at the origin aimed down +X hits the sample; aimed away it
        // falls outside the outer cone and contributes nothing.
        let aimed = LightBuffer::from_slice(&[Light::spot(
            Vec3::ZERO,
            Vec3::X,
            Vec3::ONE,
            10.0,
            0.3,
            0.5,
        )]);
        let averted = LightBuffer::from_slice(&[Light::spot(
            Vec3::ZERO,
            Vec3::Y,
            Vec3::ONE,
            10.0,
            0.3,
            0.5,
        )]);
        let sample = facing_sample();
        assert!(accumulate_radiance(Vec3::ZERO, &aimed, &matte_white(), &sample).x > 0.0);
        assert_eq!(
            accumulate_radiance(Vec3::ZERO, &averted, &matte_white(), &sample),
            Vec3::ZERO
        );
    }

    #[test]
    fn test_light_beyond_range_contributes_nothing() {
        let lights = LightBuffer::from_slice(&[Light::point(Vec3::ZERO, Vec3::ONE, 4.0)]);
        let out = accumulate_radiance(Vec3::ZERO, &lights, &matte_white(), &facing_sample());
        assert_eq!(out, Vec3::ZERO);
    }

    #[test]
    fn test_contributions_sum_over_lights() {
        let one = LightBuffer::from_slice(&[Light::point(Vec3::ZERO, Vec3::ONE, 10.0)]);
        let two = LightBuffer::from_slice(&[
            Light::point(Vec3::ZERO, Vec3::ONE, 10.0),
            Light::point(Vec3::ZERO, Vec3::ONE, 10.0),
        ]);
        let sample = facing_sample();
        let a = accumulate_radiance(Vec3::ZERO, &one, &matte_white(), &sample);
        let b = accumulate_radiance(Vec3::ZERO, &two, &matte_white(), &sample);
        assert!((b - a * 2.0).abs().max_element() < 1e-6);
    }

    #[test]
    fn test_oversized_count_evaluates_capacity_only() {
        let mut lights = LightBuffer::new();
        for _ in 0..MAX_LIGHTS {
            lights.push(Light::point(Vec3::ZERO, Vec3::ONE, 10.0));
        }
        let baseline = accumulate_radiance(Vec3::ZERO, &lights, &matte_white(), &facing_sample());

        // A bogus count of 20 must not read past the 16 slots.
        lights.set_count(20);
        let clamped = accumulate_radiance(Vec3::ZERO, &lights, &matte_white(), &facing_sample());
        assert_eq!(baseline, clamped);
    }

    #[test]
    fn test_denormalized_normal_is_renormalized() {
        let lights = LightBuffer::from_slice(&[Light::point(Vec3::ZERO, Vec3::ONE, 10.0)]);
        let unit = facing_sample();
        let scaled = SurfaceSample {
            normal: Vec3::NEG_X * 3.0,
            ..unit
        };
        let a = accumulate_radiance(Vec3::ZERO, &lights, &matte_white(), &unit);
        let b = accumulate_radiance(Vec3::ZERO, &lights, &matte_white(), &scaled);
        assert!((a - b).abs().max_element() < 1e-6);
    }

    #[test]
    fn test_shade_output_is_displayable() {
        let lights = LightBuffer::from_slice(&[Light::point(Vec3::ZERO, Vec3::splat(4.0), 10.0)]);
        let out = shade(Vec3::ZERO, &lights, &matte_white(), &facing_sample());
        for channel in &out[..3] {
            assert!(*channel >= 0.0 && *channel < 1.0);
        }
        assert_eq!(out[3], 1.0);
    }

    #[test]
    fn test_emissive_shows_with_no_lights() {
        let material = Material {
            emissive_factor: [1.0, 0.5, 0.0],
            ..matte_white()
        };
        let out = shade(Vec3::ZERO, &LightBuffer::new(), &material, &facing_sample());
        assert!(out[0] > 0.0);
        assert!(out[0] > out[1]);
        assert_eq!(out[2], 0.0);
    }
}
