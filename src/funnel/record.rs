use crate::geom::{FaceIdx, VertexIdx};

/// Index of a funnel in the tree's flat arena.
///
/// The tree is one append-only `Vec<Funnel>`; records refer to their children
/// by index so the storage can relocate on growth.
pub type FunnelIdx = usize;

/// One unfolded-strip funnel rooted at the source vertex.
///
/// A funnel is the planar unfolding of the triangle strip recorded in
/// `sequence`, parameterised by the boundary edge `p-q` of the strip's last
/// face and the front vertex `x` it advances from. All lengths and angles
/// describe the unfolded image, with the source unfolded to a fixed point
/// `s`; `sp` in particular is the length of the straight `s`-to-`p` segment
/// in that image, an exact surface distance along the strip.
#[derive(Debug, Clone, Default)]
pub struct Funnel {
    /// Left boundary vertex of the frontier edge, as seen from the source.
    pub p: VertexIdx,
    /// Right boundary vertex of the frontier edge.
    pub q: VertexIdx,
    /// Front vertex the funnel currently advances from.
    pub x: VertexIdx,
    /// Faces already unfolded, the seed star of the source included. The
    /// strip's current face is last.
    pub sequence: Vec<FaceIdx>,
    /// Unfolded distance from the source to `p`.
    pub sp: f64,
    /// Length of the frontier edge `p-q`.
    pub pq: f64,
    /// Angle ∠spq at `p` in the unfolding.
    pub spq: f64,
    /// Angle ∠psq at the unfolded image of the source.
    pub psq: f64,
    /// Running minimum of ∠psv over the ancestor chain: the wedge at the
    /// source that still sees the frontier. Non-increasing down the tree.
    pub psw: f64,
    /// Hinge angle accumulated at `q` while sliding across consecutive
    /// edges, folded back below π when the strip reflects.
    pub top_right_angle: f64,
    /// Angle ∠pvs at the split vertex; meaningful once `children` is set.
    pub pvs: f64,
    /// Arena index of the contiguous `(Fpv, Fvq)` child pair.
    pub children: Option<FunnelIdx>,
    /// Set by clipping. A removed funnel is treated as if never created,
    /// its descendants with it.
    pub removed: bool,
}

impl Funnel {
    /// The strip's current face.
    #[must_use]
    pub fn last_face(&self) -> FaceIdx {
        *self.sequence.last().expect("a funnel's sequence is never empty")
    }
}
