//! Offline demo renderer.
//!
//! Drives the evaluator the way a GPU dispatch would: one independent
//! shading evaluation per covered pixel, no shared state between pixels.
//! The subject is an orthographically projected unit sphere — a cheap way
//! to get a world position and normal per pixel without a rasterizer.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glam::{Vec2, Vec3};
use serde::Deserialize;
use std::path::PathBuf;

use crate::camera::Camera;
use crate::light::{Light, LightBuffer};
use crate::material::Material;
use crate::shading::{self, SurfaceSample};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the demo sphere to a PNG
    Render {
        /// Output image path
        #[arg(long, default_value = "render.png")]
        out: PathBuf,

        /// Output width in pixels
        #[arg(long, default_value_t = 800)]
        width: u32,

        /// Output height in pixels
        #[arg(long, default_value_t = 800)]
        height: u32,

        /// JSON scene file replacing the built-in lights and material
        #[arg(long)]
        scene: Option<PathBuf>,
    },
}

/// Lights and material for the demo render, loadable from JSON.
#[derive(Deserialize)]
#[serde(default)]
struct SceneRig {
    lights: Vec<Light>,
    material: Material,
}

impl Default for SceneRig {
    fn default() -> Self {
        // Key / fill / rim, roughly the classic three-point setup.
        Self {
            lights: vec![
                Light::directional(Vec3::new(-0.4, -0.8, -0.45), Vec3::splat(2.2)),
                Light::point(Vec3::new(2.0, 0.5, 2.5), Vec3::new(1.2, 0.9, 0.7), 8.0),
                Light::spot(
                    Vec3::new(-1.5, 2.0, 1.5),
                    Vec3::new(0.55, -0.74, -0.55),
                    Vec3::new(0.4, 0.5, 1.4),
                    12.0,
                    0.35,
                    0.55,
                ),
            ],
            material: Material {
                name: Some("demo".into()),
                base_color_factor: [0.75, 0.3, 0.25, 1.0],
                metallic_factor: 0.1,
                roughness_factor: 0.45,
                ..Material::default()
            },
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            out,
            width,
            height,
            scene,
        } => render_sphere(out, width, height, scene),
    }
}

fn load_rig(path: Option<PathBuf>) -> Result<SceneRig> {
    match path {
        Some(path) => {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read scene file {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("failed to parse scene file {}", path.display()))
        }
        None => Ok(SceneRig::default()),
    }
}

fn render_sphere(out: PathBuf, width: u32, height: u32, scene: Option<PathBuf>) -> Result<()> {
    let rig = load_rig(scene)?;
    let lights = LightBuffer::from_slice(&rig.lights);
    log::info!(
        "rendering {}x{} with {} light(s)",
        width,
        height,
        lights.len()
    );

    let camera = Camera {
        eye: Vec3::new(0.0, 0.0, 3.0),
        target: Vec3::ZERO,
        aspect: width as f32 / height as f32,
        ..Camera::default()
    };
    // The evaluator reads camera state through the per-frame record.
    let camera_uniform = camera.to_uniform();
    let camera_pos = Vec3::from(camera_uniform.camera_pos);

    let aspect = width as f32 / height as f32;
    let mut img = image::RgbaImage::new(width, height);

    for (px, py, pixel) in img.enumerate_pixels_mut() {
        // Pixel center to normalized device coordinates, y up.
        let x = ((px as f32 + 0.5) / width as f32 * 2.0 - 1.0) * aspect;
        let y = 1.0 - (py as f32 + 0.5) / height as f32 * 2.0;

        let r2 = x * x + y * y;
        if r2 > 1.0 {
            *pixel = image::Rgba([0, 0, 0, 0]);
            continue;
        }

        // Front hemisphere of the unit sphere; the normal is the position.
        let world = Vec3::new(x, y, (1.0 - r2).sqrt());
        let sample = SurfaceSample {
            world_position: world,
            normal: world,
            uv: Vec2::new((px as f32 + 0.5) / width as f32, (py as f32 + 0.5) / height as f32),
        };

        let color = shading::shade(camera_pos, &lights, &rig.material, &sample);
        *pixel = image::Rgba([
            (color[0] * 255.0).round() as u8,
            (color[1] * 255.0).round() as u8,
            (color[2] * 255.0).round() as u8,
            (color[3] * 255.0).round() as u8,
        ]);
    }

    img.save(&out)
        .with_context(|| format!("failed to write {}", out.display()))?;
    log::info!("wrote {}", out.display());
    Ok(())
}
