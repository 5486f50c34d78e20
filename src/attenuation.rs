//! Distance and cone falloff for punctual lights.

/// Squared linear distance falloff.
///
/// Equals 1.0 at the light's position and reaches 0.0 at `dist >= range`,
/// non-increasing in between. The squared ramp gives a smoother tail than
/// a plain linear one. `range` is floored so a degenerate zero-range light
/// attenuates to nothing instead of dividing by zero.
pub fn range_attenuation(dist: f32, range: f32) -> f32 {
    let falloff = (1.0 - dist / range.max(1e-3)).clamp(0.0, 1.0);
    falloff * falloff
}

/// Spot cone falloff from the cosine of the angle to the cone axis.
///
/// Returns 1.0 inside the inner cone, 0.0 outside the outer cone, and a
/// linear ramp between the two. A hard-edged cone (`inner_cos == outer_cos`)
/// is legal; the denominator floor turns the ramp into a step.
pub fn cone_attenuation(cos_angle: f32, inner_cos: f32, outer_cos: f32) -> f32 {
    ((cos_angle - outer_cos) / (inner_cos - outer_cos).max(1e-4)).clamp(0.0, 1.0)
}
