//! Entry point: generate a mesh, build its tangent frames and report/dump the buffers.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use asset::{CubeParams, MeshData, SphereParams, TangentFrames, compute_tangents};
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "tanmesh", about = "Procedural meshes with tangent-space bases")]
struct Cli {
    #[command(subcommand)]
    shape: Shape,

    /// Write positions/normals/uvs/indices and tangent frames as JSON.
    #[arg(long, global = true)]
    dump: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Shape {
    /// UV sphere.
    Sphere {
        #[arg(long, default_value_t = SphereParams::default().radius)]
        radius: f32,
        /// Latitude divisions (>= 2).
        #[arg(long, default_value_t = SphereParams::default().u)]
        u: u32,
        /// Longitude divisions (>= 2).
        #[arg(long, default_value_t = SphereParams::default().v)]
        v: u32,
    },
    /// 24-vertex cube.
    Cube {
        #[arg(long, default_value_t = CubeParams::default().side)]
        side: f32,
        #[arg(long, default_value_t = CubeParams::default().u_scale)]
        u_scale: f32,
        #[arg(long, default_value_t = CubeParams::default().v_scale)]
        v_scale: f32,
        /// Use the 3x2 texture atlas UVs instead of per-face tiling.
        #[arg(long)]
        atlas: bool,
    },
}

impl Shape {
    fn generate(&self) -> Result<MeshData> {
        let mesh = match *self {
            Shape::Sphere { radius, u, v } => SphereParams { radius, u, v }
                .generate()
                .context("Failed to generate sphere")?,
            Shape::Cube {
                side,
                u_scale,
                v_scale,
                atlas,
            } => {
                let mesh = CubeParams {
                    side,
                    u_scale,
                    v_scale,
                }
                .generate()
                .context("Failed to generate cube")?;
                if atlas {
                    mesh.with_uvs(&asset::atlas::CUBE_ATLAS_UVS)?
                } else {
                    mesh
                }
            }
        };
        Ok(mesh)
    }
}

#[derive(Serialize)]
struct Dump<'a> {
    positions: &'a [f32],
    normals: &'a [f32],
    uvs: &'a [f32],
    #[serde(skip_serializing_if = "Option::is_none")]
    colors: Option<&'a [f32]>,
    indices: &'a [u32],
    indices2: &'a [u32],
    tangents: &'a [f32],
    bitangents: &'a [f32],
    report: asset::TangentReport,
}

impl<'a> Dump<'a> {
    fn new(mesh: &'a MeshData, frames: &'a TangentFrames) -> Self {
        Self {
            positions: mesh.positions_flat(),
            normals: mesh.normals_flat(),
            uvs: mesh.uvs_flat(),
            colors: mesh.colors_flat(),
            indices: &mesh.indices,
            indices2: &mesh.edge_indices,
            tangents: frames.tangents_flat(),
            bitangents: frames.bitangents_flat(),
            report: frames.report,
        }
    }
}

fn write_dump(path: &Path, mesh: &MeshData, frames: &TangentFrames) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create dump file: {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &Dump::new(mesh, frames))
        .with_context(|| format!("Failed to write dump file: {}", path.display()))?;
    log::info!("Wrote buffers to {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::info!("Generating {:?}", cli.shape);

    let mesh = cli.shape.generate()?;
    let frames = compute_tangents(&mesh).context("Failed to compute tangent frames")?;

    log::info!(
        "Mesh: {} vertices, {} triangles, {} wireframe edges",
        mesh.vertex_count(),
        mesh.triangle_count(),
        mesh.edge_count()
    );
    log::info!("Tangent frames: {:?}", frames.report);

    if let Some(path) = &cli.dump {
        write_dump(path, &mesh, &frames)?;
    }

    Ok(())
}
