use std::f64::consts::PI;

use crate::geom::{TriangleMesh, VertexIdx, acos_clamped};

use super::record::Funnel;

/// Interior angle between sides `ab` and `bc`, opposite `ca`, by the law of
/// cosines. Clamped against floating drift like every other angle here.
pub(crate) fn angle_from_sides(ab: f64, bc: f64, ca: f64) -> f64 {
    acos_clamped((ab * ab + bc * bc - ca * ca) / (2.0 * ab * bc))
}

/// Third side of a triangle with sides `b`, `c` and included angle.
pub(crate) fn side_from_angle(included: f64, b: f64, c: f64) -> f64 {
    (b * b + c * c - 2.0 * b * c * included.cos()).sqrt()
}

/// Fold an accumulated hinge angle back across π.
///
/// Returns the folded angle and the orientation sign of the next unfolding:
/// -1 when the strip reflects onto the other side of the hinge edge.
pub(crate) fn fold_hinge(angle: f64) -> (f64, f64) {
    if angle >= PI {
        (2.0 * PI - angle, -1.0)
    } else {
        (angle, 1.0)
    }
}

/// One crossing into an unvisited face: the opposite vertex and the geometry
/// of its unfolded image.
struct Crossing {
    v: VertexIdx,
    vq: f64,
    pv: f64,
    spv: f64,
    sign: f64,
}

/// A funnel's split outcome: the two children and the values the clipper
/// compares, keyed by the `(p, v, q)` triple of the split.
pub(crate) struct Split {
    pub key: (VertexIdx, VertexIdx, VertexIdx),
    pub sv: f64,
    pub pvs: f64,
    pub children: [Funnel; 2],
}

/// Advance `f` across zero or more edges until it either runs off its strip
/// (no children, returns `None`) or splits into an `(Fpv, Fvq)` pair.
///
/// The funnel's geometric state is updated in place on every slide; after a
/// split the record keeps its state at the moment of the decision, with
/// `pvs` filled in for the clipper.
pub(crate) fn advance(mesh: &TriangleMesh, f: &mut Funnel) -> Option<Split> {
    loop {
        let c = cross_open_edges(mesh, f)?;

        let sv = side_from_angle(c.spv, f.sp, c.pv);
        let psv = angle_from_sides(f.sp, sv, c.pv);
        let pvq = angle_from_sides(c.pv, c.vq, f.pq);
        let psw = f.psw.min(psv);
        f.top_right_angle = (mesh.corner_angle(f.x, c.v, f.q) - pvq * c.sign).max(0.0);

        if psv < f.psw {
            // v falls outside the wedge: split into the two sides of s-v
            let pvs = angle_from_sides(c.pv, sv, f.sp);
            let fpv = Funnel {
                p: f.p,
                q: c.v,
                x: f.x,
                sequence: f.sequence.clone(),
                sp: f.sp,
                pq: c.pv,
                spq: c.spv,
                psq: psv,
                psw,
                top_right_angle: f.top_right_angle,
                ..Funnel::default()
            };
            let fvq = Funnel {
                p: c.v,
                q: f.q,
                x: c.v,
                sequence: f.sequence.clone(),
                sp: sv,
                pq: c.vq,
                spq: pvq - pvs,
                psq: f.psq - psv,
                psw: f.psw - psv,
                ..Funnel::default()
            };
            f.pvs = pvs;
            return Some(Split { key: (f.p, c.v, f.q), sv, pvs, children: [fpv, fvq] });
        }

        // v stays inside the wedge: q advances to v, p is kept
        f.q = c.v;
        f.pq = c.pv;
        f.spq = c.spv;
        f.psq = psv;
        f.psw = psw;
    }
}

/// Walk across `x-q` edges until an unvisited face yields a vertex in front
/// of the source, advancing `x` past vertices whose unfolding has wrapped
/// onto the back half-plane (∠spv ≥ π). `None` when the strip runs into a
/// face it has already visited.
fn cross_open_edges(mesh: &TriangleMesh, f: &mut Funnel) -> Option<Crossing> {
    loop {
        let faces = mesh.edge_faces(f.x, f.q);
        let next = if faces[0] == f.last_face() { faces[1] } else { faces[0] };
        if f.sequence.contains(&next) {
            return None;
        }
        f.sequence.push(next);
        let v = mesh.triangle(next).vertex_opposite(f.x, f.q);

        let (folded, sign) = fold_hinge(f.top_right_angle + mesh.corner_angle(f.x, f.q, v));
        f.top_right_angle = folded;

        let vq = mesh.distance(v, f.q);
        let pv = side_from_angle(f.top_right_angle, f.pq, vq);
        let spv = f.spq + angle_from_sides(pv, f.pq, vq) * sign;

        if spv >= PI {
            f.x = v;
            continue;
        }
        return Some(Crossing { v, vq, pv, spv, sign });
    }
}
