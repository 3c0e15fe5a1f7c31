//! Lifts random 2D points onto the paraboloid `z = x² + y²` and writes their convex hull
//! as an OBJ file.
//!
//! The faces of the lower hull project to the Delaunay triangulation of the 2D points.
//!
//! ```text
//! cargo run --example paraboloid_lift -- --points 100 --seed 7 --output convexhull.obj
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::DVec3;
use quickhull3d::{export::save_obj, HullBuilder, ObjOptions};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

#[derive(Parser)]
#[command(name = "paraboloid_lift")]
#[command(about = "Convex hull of random points lifted onto a paraboloid")]
struct Args {
    /// Number of points sampled in the unit square
    #[arg(long, default_value_t = 20)]
    points: usize,
    /// Seed for the point sampler
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Where to write the OBJ file
    #[arg(long, default_value = "convexhull.obj")]
    output: PathBuf,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();
    let args = Args::parse();

    let mut rng = StdRng::seed_from_u64(args.seed);
    let points: Vec<DVec3> = (0..args.points)
        .map(|_| {
            let x: f64 = rng.random();
            let y: f64 = rng.random();
            DVec3::new(x, y, x * x + y * y)
        })
        .collect();

    let mut builder = HullBuilder::new(points);
    let hull = builder.generate().context("hull construction failed")?;

    tracing::info!(
        points = args.points,
        faces = hull.faces().len(),
        delaunay_triangles = hull.lower_faces().len(),
        "hull"
    );

    save_obj(hull, &args.output, &ObjOptions::default())
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    tracing::info!(output = %args.output.display(), "wrote");

    Ok(())
}
