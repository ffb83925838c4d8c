#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Exact single-source geodesic distances on closed triangle meshes.
//!
//! Given a validated [`TriangleMesh`] and a source vertex, [`funnel_tree`]
//! builds a tree of *funnels*: planar unfoldings of triangle strips rooted at
//! the source, propagated breadth-first across the surface in parallel and
//! pruned wherever two funnels unfold the same triangle. The tree is exact up
//! to floating error; [`shortest_distances`] reduces it to one geodesic
//! distance per vertex in a single pass.

pub mod funnel;
pub mod geom;
pub mod parse;

pub use funnel::{Funnel, funnel_tree, shortest_distances};
pub use geom::{MeshError, Point3, Triangle, TriangleMesh, VertexIdx};

/// Build the funnel tree at `source` and reduce it to per-vertex geodesic
/// distances in one call.
#[must_use]
pub fn geodesic_distances(mesh: &TriangleMesh, source: VertexIdx) -> Vec<f64> {
    let tree = funnel_tree(mesh, source);
    shortest_distances(mesh, source, &tree)
}
