//! Loads the vertices of an OBJ file into a tree and checks nearest-point
//! queries against a brute-force scan.
//!
//! Usage: `cargo run --example nearest_obj -- model.obj [distance]`
//! Without a file a random cloud of 50,000 points is used.

use kdthree::{BoundingBox, DVec3, KdTree, ObjMesh};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let path = args.next();
    let distance: f64 = match args.next() {
        Some(arg) => arg.parse()?,
        None => 1.1,
    };

    let mut tree = KdTree::new();
    match &path {
        Some(path) => {
            let mesh = ObjMesh::read(path)?;
            info!("Read {} vertices and {} faces from {}", mesh.positions.len(), mesh.faces.len(), path);
            tree.add_points(mesh.positions);
        }
        None => {
            tree.add_random_points(50_000, &BoundingBox::from_coords(-10.0, -10.0, -10.0, 10.0, 10.0, 10.0));
        }
    }

    let start = Instant::now();
    tree.build()?;
    info!(
        "Built {} nodes ({} leaves, depth {}) in {:?}",
        tree.node_count(),
        tree.leaf_count(),
        tree.depth(),
        start.elapsed()
    );

    // Every vertex must find itself.
    let start = Instant::now();
    let mut mismatches = 0;
    for (i, &p) in tree.points().iter().enumerate() {
        match tree.find_closest_point(p, 0.0)? {
            Some(nearest) if nearest.index == i => {}
            Some(nearest) if nearest.distance == 0.0 => {} // duplicate vertex
            _ => mismatches += 1,
        }
    }
    info!("Exact set: {} mismatches in {:?}", mismatches, start.elapsed());

    // Random queries inside the envelope, compared against brute force.
    let Some(metrics) = tree.metrics() else {
        return Ok(());
    };
    let mut rng = StdRng::seed_from_u64(42);
    let mut misses = 0;
    let mut worse = 0;
    let start = Instant::now();
    for _ in 0..1500 {
        let q = DVec3::new(
            metrics.min.x + rng.r#gen::<f64>() * metrics.range.x,
            metrics.min.y + rng.r#gen::<f64>() * metrics.range.y,
            metrics.min.z + rng.r#gen::<f64>() * metrics.range.z,
        );
        let Some(expected) = tree.find_closest_point_brute(q) else {
            continue;
        };
        match tree.find_closest_point(q, distance)? {
            Some(found) if found.distance > expected.distance => worse += 1,
            Some(_) => {}
            None => misses += 1,
        }
    }
    info!(
        "Random set (distance {}): {} without match, {} farther than brute force, in {:?}",
        distance,
        misses,
        worse,
        start.elapsed()
    );
    Ok(())
}
