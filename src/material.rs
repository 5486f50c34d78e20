//! Material descriptors in the metallic-roughness workflow.
//!
//! Authoring-side [`Material`] records live in a bounded [`MaterialRegistry`]
//! indexed by [`MaterialId`]; [`MaterialUniform`] is the GPU-mirrored record
//! for the material storage buffer. Texture slots are declared in the record
//! but not yet consumed by the shading math.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Capacity of the material storage buffer.
pub const MAX_MATERIALS: usize = 64;

/// How the base color alpha channel is interpreted.
///
/// Carried through to the GPU record; the lighting evaluator itself always
/// outputs opaque.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlphaMode {
    #[default]
    Opaque,
    Mask,
    Blend,
}

/// One material descriptor.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    pub name: Option<String>,

    /// Linear-space albedo and alpha.
    pub base_color_factor: [f32; 4],
    /// Linear-space emission, added after the lit sum.
    pub emissive_factor: [f32; 3],
    pub metallic_factor: f32,
    /// Stored unclamped; the evaluator clamps to its working range.
    pub roughness_factor: f32,

    pub alpha_mode: AlphaMode,
    pub alpha_cutoff: f32,
    pub double_sided: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: None,
            base_color_factor: [1.0, 1.0, 1.0, 1.0],
            emissive_factor: [0.0, 0.0, 0.0],
            metallic_factor: 1.0,
            roughness_factor: 1.0,
            alpha_mode: AlphaMode::Opaque,
            alpha_cutoff: 0.5,
            double_sided: false,
        }
    }
}

/// GPU-ready material record. 64 bytes.
///
/// `texture_indices` reserves the base-color / metallic-roughness / normal /
/// emissive slots for when texture sampling lands.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct MaterialUniform {
    pub base_color: [f32; 4],

    pub emissive: [f32; 3],
    pub metallic: f32,

    pub roughness: f32,
    pub alpha_cutoff: f32,
    pub double_sided: u32,
    pub _pad0: u32,

    pub texture_indices: [u32; 4],
}

impl From<&Material> for MaterialUniform {
    fn from(m: &Material) -> Self {
        Self {
            base_color: m.base_color_factor,
            emissive: m.emissive_factor,
            metallic: m.metallic_factor,
            roughness: m.roughness_factor,
            alpha_cutoff: m.alpha_cutoff,
            double_sided: m.double_sided as u32,
            _pad0: 0,
            texture_indices: [0; 4],
        }
    }
}

/// Index into the material array. Issued by [`MaterialRegistry::register`];
/// validity is the caller's contract once handed to a draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialId(pub u32);

/// Bounded material pool with slot 0 prefilled with the default material.
pub struct MaterialRegistry {
    materials: Vec<Material>,
    by_name: HashMap<String, MaterialId>,
}

impl Default for MaterialRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self {
            materials: vec![Material::default()],
            by_name: HashMap::new(),
        }
    }

    /// The fallback material in slot 0.
    pub fn default_id() -> MaterialId {
        MaterialId(0)
    }

    /// Adds a material, returning its id, or `None` when the pool is full.
    pub fn register(&mut self, material: Material) -> Option<MaterialId> {
        if self.materials.len() >= MAX_MATERIALS {
            log::warn!(
                "material registry full ({} slots), dropping {:?}",
                MAX_MATERIALS,
                material.name
            );
            return None;
        }
        let id = MaterialId(self.materials.len() as u32);
        if let Some(name) = &material.name {
            self.by_name.insert(name.clone(), id);
        }
        self.materials.push(material);
        Some(id)
    }

    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id.0 as usize)
    }

    pub fn lookup(&self, name: &str) -> Option<MaterialId> {
        self.by_name.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Upload-ready records for every registered slot.
    pub fn pack(&self) -> Vec<MaterialUniform> {
        self.materials.iter().map(MaterialUniform::from).collect()
    }
}
