//! Dynamic light set with a fixed-capacity, GPU-mirrored layout.
//!
//! Three punctual light types share one fixed-layout record, discriminated
//! by [`LightKind`]:
//! - **Point**: position + range falloff
//! - **Directional**: direction only, not spatially bounded
//! - **Spot**: position + range falloff + inner/outer cone
//!
//! The set holds at most [`MAX_LIGHTS`] entries with the active count stored
//! separately, mirroring the storage-buffer + count-uniform pair on the GPU
//! side. Readers clamp the count against capacity rather than trusting it.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Capacity of the light buffer. Matches the GPU-side array length.
pub const MAX_LIGHTS: usize = 16;

/// Closed set of supported light types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightKind {
    Point,
    Directional,
    Spot,
}

/// One dynamic light.
///
/// All kinds share the full record; `direction` is meaningful for
/// directional and spot lights, `range` for point and spot lights, and the
/// cone cosines for spot lights only. Cone edges are stored as cosines of
/// the half-angles, precomputed once instead of per sample.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Light {
    pub kind: LightKind,
    pub position: Vec3,
    pub direction: Vec3,
    pub color: Vec3,
    pub range: f32,
    pub inner_cos: f32,
    pub outer_cos: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            kind: LightKind::Point,
            position: Vec3::ZERO,
            direction: Vec3::NEG_Y,
            color: Vec3::ONE,
            range: 10.0,
            inner_cos: 0.5f32.cos(), // ~30 deg
            outer_cos: 0.7f32.cos(), // ~40 deg
        }
    }
}

impl Light {
    /// Point light with distance falloff out to `range`.
    pub fn point(position: Vec3, color: Vec3, range: f32) -> Self {
        Self {
            kind: LightKind::Point,
            position,
            color,
            range,
            ..Self::default()
        }
    }

    /// Directional light shining along `direction`, unattenuated.
    pub fn directional(direction: Vec3, color: Vec3) -> Self {
        Self {
            kind: LightKind::Directional,
            direction,
            color,
            ..Self::default()
        }
    }

    /// Spot light with cone half-angles given in radians.
    pub fn spot(
        position: Vec3,
        direction: Vec3,
        color: Vec3,
        range: f32,
        inner_angle: f32,
        outer_angle: f32,
    ) -> Self {
        Self {
            kind: LightKind::Spot,
            position,
            direction,
            color,
            range,
            inner_cos: inner_angle.cos(),
            outer_cos: outer_angle.cos(),
        }
    }
}

// ============================================================================
// GPU Records
// ============================================================================

/// GPU-ready light record.
///
/// Layout matches the WGSL storage-buffer struct: three padded vec3 blocks
/// with the type discriminant packed next to the direction, then the scalar
/// block. Total size: 64 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct LightUniform {
    pub position: [f32; 3],
    pub _pad0: f32,

    pub color: [f32; 3],
    pub _pad1: f32,

    pub direction: [f32; 3],
    pub light_type: u32,

    pub range: f32,
    pub inner_cos: f32,
    pub outer_cos: f32,
    pub _pad2: f32,
}

impl From<&Light> for LightUniform {
    fn from(l: &Light) -> Self {
        let light_type = match l.kind {
            LightKind::Point => 0,
            LightKind::Directional => 1,
            LightKind::Spot => 2,
        };

        Self {
            position: l.position.to_array(),
            _pad0: 0.0,

            color: l.color.to_array(),
            _pad1: 0.0,

            direction: l.direction.to_array(),
            light_type,

            range: l.range,
            inner_cos: l.inner_cos,
            outer_cos: l.outer_cos,
            _pad2: 0.0,
        }
    }
}

/// Count record accompanying the light array. 16 bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct LightParams {
    pub count: u32,
    pub _pad: [u32; 3],
}

// ============================================================================
// Light Buffer
// ============================================================================

/// Fixed-capacity light set with an explicit active count.
///
/// The count is stored separately from the slots and readers clamp it
/// against [`MAX_LIGHTS`], so a host that writes an oversized count still
/// evaluates exactly the capacity.
#[derive(Clone, Copy, Debug)]
pub struct LightBuffer {
    slots: [Light; MAX_LIGHTS],
    count: u32,
}

impl Default for LightBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LightBuffer {
    /// Empty buffer.
    pub fn new() -> Self {
        Self {
            slots: [Light::default(); MAX_LIGHTS],
            count: 0,
        }
    }

    /// Buffer filled from a slice; entries beyond capacity are dropped.
    pub fn from_slice(lights: &[Light]) -> Self {
        let mut buf = Self::new();
        for &light in lights {
            buf.push(light);
        }
        buf
    }

    /// Appends a light, dropping it if the buffer is full.
    pub fn push(&mut self, light: Light) {
        let slot = self.count as usize;
        if slot >= MAX_LIGHTS {
            log::warn!("light buffer full ({} slots), dropping light", MAX_LIGHTS);
            return;
        }
        self.slots[slot] = light;
        self.count += 1;
    }

    /// Number of active lights, clamped to capacity.
    pub fn len(&self) -> usize {
        (self.count as usize).min(MAX_LIGHTS)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Overrides the stored count without touching the slots, as a host
    /// rewriting the count uniform would.
    pub fn set_count(&mut self, count: u32) {
        self.count = count;
    }

    /// The active slots.
    pub fn active(&self) -> &[Light] {
        &self.slots[..self.len()]
    }

    /// Upload-ready record array plus the matching count record. Inactive
    /// slots are zeroed.
    pub fn pack(&self) -> ([LightUniform; MAX_LIGHTS], LightParams) {
        let mut records = [LightUniform::zeroed(); MAX_LIGHTS];
        for (record, light) in records.iter_mut().zip(self.active()) {
            *record = light.into();
        }
        let params = LightParams {
            count: self.len() as u32,
            _pad: [0; 3],
        };
        (records, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_sizes() {
        // Must match the GPU-side struct layouts.
        assert_eq!(std::mem::size_of::<LightUniform>(), 64);
        assert_eq!(std::mem::size_of::<LightParams>(), 16);
    }

    #[test]
    fn test_uniform_encoding() {
        let light = Light::spot(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::NEG_Y,
            Vec3::ONE,
            20.0,
            0.4,
            0.6,
        );
        let record = LightUniform::from(&light);
        assert_eq!(record.light_type, 2);
        assert_eq!(record.position, [1.0, 2.0, 3.0]);
        assert_eq!(record.range, 20.0);
        assert!((record.inner_cos - 0.4f32.cos()).abs() < 1e-6);
        assert!((record.outer_cos - 0.6f32.cos()).abs() < 1e-6);

        assert_eq!(LightUniform::from(&Light::default()).light_type, 0);
        let sun = Light::directional(Vec3::NEG_Y, Vec3::ONE);
        assert_eq!(LightUniform::from(&sun).light_type, 1);
    }

    #[test]
    fn test_push_clamps_at_capacity() {
        let mut buf = LightBuffer::new();
        for _ in 0..20 {
            buf.push(Light::default());
        }
        assert_eq!(buf.len(), MAX_LIGHTS);
        assert_eq!(buf.active().len(), MAX_LIGHTS);
    }

    #[test]
    fn test_oversized_count_is_clamped_at_read() {
        let mut buf = LightBuffer::new();
        buf.set_count(20);
        assert_eq!(buf.len(), MAX_LIGHTS);
        assert_eq!(buf.active().len(), MAX_LIGHTS);
    }

    #[test]
    fn test_pack_zeroes_inactive_slots() {
        let mut buf = LightBuffer::new();
        buf.push(Light::point(Vec3::X, Vec3::ONE, 5.0));
        let (records, params) = buf.pack();
        assert_eq!(params.count, 1);
        assert_eq!(records[0].position, [1.0, 0.0, 0.0]);
        assert_eq!(records[1].range, 0.0);
        assert_eq!(records[1].color, [0.0, 0.0, 0.0]);
    }
}
