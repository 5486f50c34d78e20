//! Cook-Torrance microfacet BRDF in the metallic-roughness workflow.
//!
//! The standard GGX distribution / Smith geometry / Schlick Fresnel
//! combination. Every denominator carries a small epsilon floor so grazing
//! angles and mirror-smooth roughness stay finite; the floors are a
//! numerical safety net, not part of the reflectance model.

use glam::Vec3;
use std::f32::consts::PI;

/// Roughness below this collapses the GGX lobe into a near-delta spike;
/// inputs are clamped up to it before evaluation.
pub const MIN_ROUGHNESS: f32 = 0.02;

/// Reflectance at normal incidence for dielectric surfaces.
const DIELECTRIC_F0: f32 = 0.04;

/// GGX (Trowbridge-Reitz) normal distribution.
pub fn distribution_ggx(n_dot_h: f32, roughness: f32) -> f32 {
    let a = roughness * roughness;
    let a2 = a * a;
    let denom = n_dot_h * n_dot_h * (a2 - 1.0) + 1.0;
    a2 / (PI * denom * denom + 1e-6)
}

/// Schlick-GGX masking for a single direction.
fn geometry_schlick_ggx(n_dot_x: f32, k: f32) -> f32 {
    n_dot_x / (n_dot_x * (1.0 - k) + k + 1e-6)
}

/// Smith masking-shadowing: independent Schlick-GGX terms for the view
/// and light directions.
pub fn geometry_smith(n_dot_v: f32, n_dot_l: f32, roughness: f32) -> f32 {
    let k = (roughness + 1.0) * (roughness + 1.0) / 8.0;
    geometry_schlick_ggx(n_dot_v, k) * geometry_schlick_ggx(n_dot_l, k)
}

/// Fresnel-Schlick reflectance at the given half-vector angle.
pub fn fresnel_schlick(h_dot_v: f32, f0: Vec3) -> Vec3 {
    f0 + (Vec3::ONE - f0) * (1.0 - h_dot_v.max(0.0)).powi(5)
}

/// Reflectance at normal incidence: 0.04 for dielectrics, blending to the
/// albedo itself for conductors.
pub fn base_reflectance(albedo: Vec3, metallic: f32) -> Vec3 {
    Vec3::splat(DIELECTRIC_F0).lerp(albedo, metallic)
}

/// Radiance contributed by a single light.
///
/// `n`, `v` and `l` must be unit length; `attenuation` already folds in
/// distance and cone falloff. A light behind the surface contributes
/// nothing. Metals get no diffuse term, and the Fresnel reflectance is
/// subtracted from the diffuse weight so the two lobes never sum past
/// the incident energy at normal incidence.
pub fn contribution(
    n: Vec3,
    v: Vec3,
    l: Vec3,
    light_color: Vec3,
    attenuation: f32,
    albedo: Vec3,
    metallic: f32,
    roughness: f32,
) -> Vec3 {
    let roughness = roughness.clamp(MIN_ROUGHNESS, 1.0);

    let h = (v + l).normalize_or_zero();
    let n_dot_v = n.dot(v).max(0.0);
    let n_dot_l = n.dot(l).max(0.0);
    let n_dot_h = n.dot(h).max(0.0);

    let d = distribution_ggx(n_dot_h, roughness);
    let g = geometry_smith(n_dot_v, n_dot_l, roughness);
    let f = fresnel_schlick(h.dot(v), base_reflectance(albedo, metallic));

    let specular = d * g * f / (4.0 * n_dot_v * n_dot_l).max(1e-6);
    let diffuse = (Vec3::ONE - f) * (1.0 - metallic) * albedo / PI;

    (diffuse + specular) * light_color * n_dot_l * attenuation
}
