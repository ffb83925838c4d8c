use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::geom::VertexIdx;

use super::record::{Funnel, FunnelIdx};

/// Clip-map key: the `(p, v, q)` triple of a split, roles preserved. Two
/// splits collide only when they unfold the same triangle with the same role
/// assignment, which is what makes their `sv` and ∠pvs comparable.
type SplitKey = (VertexIdx, VertexIdx, VertexIdx);

#[derive(Clone, Copy)]
struct Owner {
    funnel: FunnelIdx,
    pair: FunnelIdx,
}

/// Registry of split funnels keyed by their unfolded triangle.
///
/// When two funnels split on the same `(p, v, q)`, only one of the two
/// children on each side of `s-v` can still carry shortest paths; the
/// ordered comparison on `(sv, ∠pvs)` picks the losers and flags their
/// subtrees removed.
pub(crate) struct ClipMap {
    map: HashMap<SplitKey, Owner>,
}

impl ClipMap {
    pub(crate) fn new() -> Self {
        Self { map: HashMap::new() }
    }

    /// Register the split of `funnel`, whose children sit at `pair` and
    /// `pair + 1`, and resolve any collision with the split already holding
    /// the key.
    pub(crate) fn register(
        &mut self,
        list: &mut [Funnel],
        funnel: FunnelIdx,
        pair: FunnelIdx,
        key: SplitKey,
        sv: f64,
        pvs: f64,
    ) {
        match self.map.entry(key) {
            Entry::Vacant(e) => {
                e.insert(Owner { funnel, pair });
            }
            Entry::Occupied(mut e) => {
                let old = *e.get();
                let old_sv = list[old.pair + 1].sp;
                let old_pvs = list[old.funnel].pvs;
                let pvs_larger = pvs > old_pvs;

                if old_sv > sv {
                    // the newcomer reaches v on a shorter unfolded path; it
                    // takes over the key and may clip future arrivals too
                    remove_subtree(list, old.pair + usize::from(pvs_larger));
                    e.insert(Owner { funnel, pair });
                } else if sv > old_sv {
                    list[pair + usize::from(!pvs_larger)].removed = true;
                } else {
                    list[pair + usize::from(!pvs_larger)].removed = true;
                    remove_subtree(list, old.pair + usize::from(pvs_larger));
                }
            }
        }
    }
}

/// Flag `root` and every descendant as removed.
///
/// Iterative: clipping can cascade through subtrees spanning many levels.
/// The flag is monotonic, never cleared.
pub(crate) fn remove_subtree(list: &mut [Funnel], root: FunnelIdx) {
    let mut stack = vec![root];
    while let Some(i) = stack.pop() {
        list[i].removed = true;
        if let Some(pair) = list[i].children {
            stack.push(pair);
            stack.push(pair + 1);
        }
    }
}
