//! # kdthree
//!
//! `kdthree` is a Rust library for nearest-point queries over static sets of 3D
//! points, designed to be used in Rust as well as compiled to WebAssembly
//! (WASM). Points are appended once, the tree is built once, and queries then
//! run against the immutable result.
//!
//! ## Features
//!
//! - **Midpoint partitioning**: each node splits at the center of its bounding box
//!   along its longest axis, down to a configurable leaf size and depth.
//! - **Bounded queries**: nearest point inside a cube ([`KdTree::find_closest_point`])
//!   or a sphere ([`KdTree::find_closest_point_in_sphere`]) around the query point,
//!   plus a brute-force reference ([`KdTree::find_closest_point_brute`]).
//! - **Bounding volumes**: [`BoundingBox`] and [`BoundingSphere`] with box–box,
//!   box–sphere (hollow and solid) and sphere–sphere tests.
//! - **Mesh input**: a small OBJ reader/writer ([`ObjMesh`]) to load point sets.
//! - **WASM-ready**: [`KdTree3D`] exposes the tree through `wasm-bindgen`.
//!
//! ## Balance
//!
//! The split position is the bounding-box midpoint, not the median of the
//! points. Strongly clustered data can therefore produce deep, unbalanced
//! trees with empty nodes; `max_depth` in [`TreeConfig`] bounds this.
//!
//! ## Example
//!
//! ```
//! use glam::DVec3;
//! use kdthree::KdTree;
//!
//! let mut tree = KdTree::with_limits(2, 10);
//! tree.add_xyz(0.0, 0.0, 0.0);
//! tree.add_xyz(1.0, 0.0, 0.0);
//! tree.add_xyz(10.0, 10.0, 10.0);
//! tree.build().unwrap();
//!
//! let nearest = tree.find_closest_point(DVec3::new(0.1, 0.0, 0.0), 1.0).unwrap().unwrap();
//! assert_eq!(nearest.index, 0);
//! ```

mod bounds;
mod config;
mod error;
mod intersect;
mod kdtree;
mod metrics;
mod node;
pub mod obj;
mod query;
mod sphere;
mod wasm;

pub use glam::DVec3;

pub use bounds::Axis;
pub use bounds::BoundingBox;
pub use config::TreeConfig;
pub use error::KdTreeError;
pub use error::ObjError;
pub use intersect::IntersectionMode;
pub use intersect::Intersects;
pub use kdtree::KdTree;
pub use metrics::PointMetrics;
pub use node::KdNode;
pub use node::NodeId;
pub use obj::ObjMesh;
pub use query::Nearest;
pub use query::SearchRegion;
pub use sphere::BoundingSphere;
pub use wasm::KdTree3D;
