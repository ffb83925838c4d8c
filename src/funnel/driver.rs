use log::{debug, info};
use rayon::prelude::*;

use crate::geom::{TriangleMesh, VertexIdx};

use super::clip::ClipMap;
use super::propagate::{Split, advance};
use super::record::Funnel;

/// Build the funnel tree rooted at `source`.
///
/// The returned arena is in breadth-first order: the first
/// `incident_faces(source).len()` entries are the seed funnels, and every
/// later entry belongs to a contiguous `(Fpv, Fvq)` pair appended in the
/// order their parents were processed. Child references assume that pair
/// adjacency.
///
/// Levels are processed bulk-synchronously: all funnels of the current level
/// advance in parallel (rayon's pool, sized by `RAYON_NUM_THREADS`), then
/// their splits are merged serially in level order, which appends the next
/// level and applies the clipping rule. The merge order makes the whole
/// construction deterministic for a given mesh and source.
#[must_use]
pub fn funnel_tree(mesh: &TriangleMesh, source: VertexIdx) -> Vec<Funnel> {
    let star = mesh.incident_faces(source);
    let n = star.len();
    let mut list: Vec<Funnel> = Vec::with_capacity(n * 3);

    // Walk the fan of faces around the source so that consecutive seeds
    // share their p/q boundary vertices; every star vertex is then the p of
    // exactly one seed, carrying its exact edge distance. Each seed's
    // sequence holds the whole star (own face last), so no funnel ever
    // unfolds back into it: the tree radiates outward.
    let mut face = star[0];
    let mut tri = mesh.triangle(face);
    let mut p = if tri.a == source { tri.b } else { tri.a };
    let mut q = if tri.c == source { tri.b } else { tri.c };
    for i in 0..n {
        if i > 0 {
            let faces = mesh.edge_faces(source, q);
            face = if faces[0] == face { faces[1] } else { faces[0] };
            tri = mesh.triangle(face);
            p = q;
            q = tri.vertex_opposite(source, p);
        }

        let mut sequence = star.to_vec();
        let pos = sequence
            .iter()
            .position(|&sf| sf == face)
            .expect("fan walk stays inside the source star");
        sequence.swap(pos, n - 1);

        let psw = mesh.corner_angle(p, source, q);
        list.push(Funnel {
            p,
            q,
            x: p,
            sequence,
            sp: mesh.distance(source, p),
            pq: mesh.distance(p, q),
            spq: mesh.corner_angle(source, p, q),
            psq: psw,
            psw,
            ..Funnel::default()
        });
    }

    let mut clip = ClipMap::new();
    let mut start = 0;
    let mut level = 0u64;
    loop {
        let end = list.len();
        let outcomes: Vec<Option<Split>> = list[start..end]
            .par_iter_mut()
            .map(|f| if f.removed { None } else { advance(mesh, f) })
            .collect();

        for (offset, outcome) in outcomes.into_iter().enumerate() {
            let Some(split) = outcome else { continue };
            let parent = start + offset;
            if list[parent].removed {
                // clipped away earlier in this merge; its split never happened
                continue;
            }
            let pair = list.len();
            list[parent].children = Some(pair);
            let [fpv, fvq] = split.children;
            list.push(fpv);
            list.push(fvq);
            clip.register(&mut list, parent, pair, split.key, split.sv, split.pvs);
        }

        debug!("level {level}: {} funnels in, {} children out", end - start, list.len() - end);
        if list.len() == end {
            break;
        }
        start = end;
        level += 1;
    }

    info!(
        "funnel tree rooted at vertex {source}: {} funnels across {} levels",
        list.len(),
        level + 1
    );
    list
}
