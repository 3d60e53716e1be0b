//! Orientation, containment and intersection tests on ring nodes.

use core::ptr;

use crate::node::{node, Node};

/// Twice the signed area of the triangle `p, q, r`.
///
/// Negative for a counter-clockwise (convex) corner in a y-up frame; zero for
/// collinear points.
#[inline]
pub(crate) fn area(p: &Node, q: &Node, r: &Node) -> f64 {
    (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y)
}

/// check if two points are equal
#[inline]
pub(crate) fn equals(p1: &Node, p2: &Node) -> bool {
    p1.x == p2.x && p1.y == p2.y
}

fn sign(v: f64) -> i32 {
    (v > 0.0) as i32 - (v < 0.0) as i32
}

/// for collinear points p, q, r, check if point q lies on segment pr
fn on_segment(p: &Node, q: &Node, r: &Node) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// check if segments p1-q1 and p2-q2 intersect, end points included
pub(crate) fn intersects(p1: &Node, q1: &Node, p2: &Node, q2: &Node) -> bool {
    let o1 = sign(area(p1, q1, p2));
    let o2 = sign(area(p1, q1, q2));
    let o3 = sign(area(p2, q2, p1));
    let o4 = sign(area(p2, q2, q1));
    (o1 != o2 && o3 != o4) // general case
        || (o1 == 0 && on_segment(p1, p2, q1)) // p2 lies on p1q1
        || (o2 == 0 && on_segment(p1, q2, q1)) // q2 lies on p1q1
        || (o3 == 0 && on_segment(p2, p1, q2)) // p1 lies on p2q2
        || (o4 == 0 && on_segment(p2, q1, q2)) // q1 lies on p2q2
}

/// check if point p lies within the closed triangle a, b, c
#[allow(clippy::too_many_arguments)]
#[inline]
pub(crate) fn point_in_triangle(
    ax: f64,
    ay: f64,
    bx: f64,
    by: f64,
    cx: f64,
    cy: f64,
    px: f64,
    py: f64,
) -> bool {
    (cx - px) * (ay - py) >= (ax - px) * (cy - py)
        && (ax - px) * (by - py) >= (bx - px) * (ay - py)
        && (bx - px) * (cy - py) >= (cx - px) * (by - py)
}

/// check if the diagonal a-b starts into the ring interior at `a`
pub(crate) fn locally_inside(nodes: &[Node], a: &Node, b: &Node) -> bool {
    let a_prev = node!(nodes, a.prev_i);
    let a_next = node!(nodes, a.next_i);
    if area(a_prev, a, a_next) < 0.0 {
        area(a, b, a_next) >= 0.0 && area(a, a_prev, b) >= 0.0
    } else {
        area(a, b, a_prev) < 0.0 || area(a, a_next, b) < 0.0
    }
}

/// check if the middle point of the diagonal a-b is inside the ring (even-odd rule)
pub(crate) fn middle_inside(nodes: &[Node], a: &Node, b: &Node) -> bool {
    let mut p = a;
    let mut inside = false;
    let (px, py) = ((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
    loop {
        let p_next = node!(nodes, p.next_i);
        inside ^= (p.y > py) != (p_next.y > py)
            && (px < (p_next.x - p.x) * (py - p.y) / (p_next.y - p.y) + p.x);
        p = p_next;
        if ptr::eq(p, a) {
            return inside;
        }
    }
}

/// check if the diagonal a-b crosses a ring edge that touches neither end
pub(crate) fn intersects_ring(nodes: &[Node], a: &Node, b: &Node) -> bool {
    let mut p = a;
    loop {
        let p_next = node!(nodes, p.next_i);
        if (p.i != a.i && p.i != b.i && p_next.i != a.i && p_next.i != b.i)
            && intersects(p, p_next, a, b)
        {
            return true;
        }
        p = p_next;
        if ptr::eq(p, a) {
            return false;
        }
    }
}

/// Twice the signed shoelace area of a closed point sequence.
///
/// Positive for a clockwise ring in a y-up frame.
pub(crate) fn signed_area(data: &[[f64; 2]]) -> f64 {
    let Some(&[mut bx, mut by]) = data.last() else {
        return 0.0;
    };
    let mut sum = 0.0;
    for &[ax, ay] in data {
        sum += (ax - bx) * (ay + by);
        (bx, by) = (ax, ay);
    }
    sum
}
