use crate::geom::{TriangleMesh, VertexIdx};

use super::record::Funnel;

/// Reduce a funnel tree to per-vertex geodesic distances from `source`.
///
/// Every funnel's `sp` is an exact surface distance to its `p` vertex along
/// the recorded strip, so the minimum over all funnels with `p = v` is the
/// geodesic distance to `v`. Removed funnels are included in the pass: a
/// clipped funnel is always dominated by a surviving one, so they never
/// lower the minimum, and skipping the flag check keeps the reduction a
/// straight scan.
#[must_use]
pub fn shortest_distances(mesh: &TriangleMesh, source: VertexIdx, tree: &[Funnel]) -> Vec<f64> {
    let mut distances = vec![f64::INFINITY; mesh.vertex_count()];
    distances[source as usize] = 0.0;
    for f in tree {
        let p = f.p as usize;
        if distances[p] > f.sp {
            distances[p] = f.sp;
        }
    }
    distances
}
