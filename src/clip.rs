//! Ear slicing over one ring, with the fallbacks used when no ear can be found.

use alloc::vec::Vec;

use crate::node::{node, remove_node, Node, NodeIndex};
use crate::predicates::{
    area, equals, intersects, intersects_ring, locally_inside, middle_inside, point_in_triangle,
};
use crate::zorder::ZOrder;
use crate::Index;

/// How far [`clip_ears`] got with a ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Clipped {
    /// The ring is fully triangulated (or only a degenerate sliver was left).
    Done,
    /// No ear and no null triangle is left; the ring needs to be split.
    Stuck(NodeIndex),
    /// The step budget ran out.
    OutOfSteps,
}

/// Remaining main-loop iterations for one triangulation call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Budget(Option<usize>);

impl Budget {
    pub fn new(limit: Option<usize>) -> Self {
        Self(limit)
    }

    fn tick(&mut self) -> bool {
        match &mut self.0 {
            None => true,
            Some(0) => false,
            Some(left) => {
                *left -= 1;
                true
            }
        }
    }
}

/// main ear slicing loop which triangulates a ring (given as a linked list)
pub(crate) fn clip_ears<N: Index>(
    nodes: &mut [Node],
    mut ear_i: NodeIndex,
    zorder: &ZOrder,
    triangles: &mut Vec<[N; 3]>,
    budget: &mut Budget,
) -> Clipped {
    let mut stop_i = ear_i;

    loop {
        let ear = node!(nodes, ear_i);
        if ear.prev_i == ear.next_i {
            return Clipped::Done;
        }
        if !budget.tick() {
            return Clipped::OutOfSteps;
        }
        let pi = ear.prev_i;
        let ni = ear.next_i;
        let prev = node!(nodes, pi);
        let next = node!(nodes, ni);
        let next_next_i = next.next_i;

        if is_ear(nodes, ear_i, zorder) {
            // cut off the triangle
            triangles.push(triangle(prev, ear, next));
            remove_node(nodes, ear_i);

            // skipping the next vertex leads to less sliver triangles
            (ear_i, stop_i) = (next_next_i, next_next_i);
            continue;
        }

        // cure a small local self-intersection: p-ear crosses next-nn
        let next_next = node!(nodes, next_next_i);
        if !equals(prev, next_next)
            && intersects(prev, ear, next, next_next)
            && locally_inside(nodes, prev, next_next)
            && locally_inside(nodes, next_next, prev)
        {
            triangles.push(triangle(prev, ear, next_next));
            remove_node(nodes, ni);
            remove_node(nodes, ear_i);

            (ear_i, stop_i) = (next_next_i, next_next_i);
            continue;
        }

        ear_i = ni;

        // we looped through the whole remaining ring and can't find any more ears
        if ear_i == stop_i {
            let ear = node!(nodes, ear_i);
            if ear.prev_i == node!(nodes, ear.next_i).next_i {
                // three points that never formed an ear are an inverted or flat
                // sliver left over from a self-intersection; nothing to fill
                tracing::trace!(vertex = ear.i, "dropping degenerate sliver");
                return Clipped::Done;
            }
            if let Some(anchor_i) = remove_null_triangles(nodes, ear_i) {
                (ear_i, stop_i) = (anchor_i, anchor_i);
                continue;
            }
            return Clipped::Stuck(ear_i);
        }
    }
}

fn triangle<N: Index>(a: &Node, b: &Node, c: &Node) -> [N; 3] {
    [
        N::from_usize(a.i as usize),
        N::from_usize(b.i as usize),
        N::from_usize(c.i as usize),
    ]
}

/// whether `p` blocks the ear a-b-c: inside the triangle and not itself convex
#[inline]
fn blocks(nodes: &[Node], p: &Node, a: &Node, b: &Node, c: &Node) -> bool {
    point_in_triangle(a.x, a.y, b.x, b.y, c.x, c.y, p.x, p.y)
        && area(node!(nodes, p.prev_i), p, node!(nodes, p.next_i)) >= 0.0
}

/// check whether a ring node forms a valid ear with adjacent nodes
fn is_ear(nodes: &[Node], ear_i: NodeIndex, zorder: &ZOrder) -> bool {
    let b = node!(nodes, ear_i);
    let a = node!(nodes, b.prev_i);
    let c = node!(nodes, b.next_i);

    if area(a, b, c) >= 0.0 {
        // reflex, can't be an ear
        return false;
    }

    // triangle bbox
    let x0 = a.x.min(b.x.min(c.x));
    let y0 = a.y.min(b.y.min(c.y));
    let x1 = a.x.max(b.x.max(c.x));
    let y1 = a.y.max(b.y.max(c.y));

    // z-order range for the current triangle bbox
    let min_z = zorder.key(x0, y0);
    let max_z = zorder.key(x1, y1);

    let candidate = |p_i: NodeIndex| {
        let p = node!(nodes, p_i);
        p_i != b.prev_i
            && p_i != b.next_i
            && (p.x >= x0 && p.x <= x1 && p.y >= y0 && p.y <= y1)
            && blocks(nodes, p, a, b, c)
    };

    // first look for points inside the triangle in increasing z-order
    let mut o_n = b.next_z_i;
    while let Some(n_i) = o_n {
        let n = node!(nodes, n_i);
        if n.z > max_z {
            break;
        }
        if candidate(n_i) {
            return false;
        }
        o_n = n.next_z_i;
    }

    // then look for points in decreasing z-order
    let mut o_p = b.prev_z_i;
    while let Some(p_i) = o_p {
        let p = node!(nodes, p_i);
        if p.z < min_z {
            break;
        }
        if candidate(p_i) {
            return false;
        }
        o_p = p.prev_z_i;
    }

    true
}

/// Removes coincident and collinear nodes left on a stuck ring.
///
/// Returns a live anchor to restart from when anything was removed.
fn remove_null_triangles(nodes: &mut [Node], start_i: NodeIndex) -> Option<NodeIndex> {
    let mut removed = false;
    let mut p_i = node!(nodes, start_i).next_i;

    while p_i != start_i {
        let p = node!(nodes, p_i);
        let p_next = node!(nodes, p.next_i);
        if equals(p, p_next) || area(node!(nodes, p.prev_i), p, p_next) == 0.0 {
            tracing::trace!(vertex = p.i, "removing null triangle");
            let (prev_i, _) = remove_node(nodes, p_i);
            removed = true;
            p_i = prev_i;
            if node!(nodes, p_i).next_i == p_i {
                break;
            }
        }
        p_i = node!(nodes, p_i).next_i;
    }

    // the anchor had to survive the walk above; check it last
    let start = node!(nodes, start_i);
    if start.next_i != start_i
        && area(node!(nodes, start.prev_i), start, node!(nodes, start.next_i)) == 0.0
    {
        tracing::trace!(vertex = start.i, "removing null triangle");
        let (_, next_i) = remove_node(nodes, start_i);
        return Some(next_i);
    }

    removed.then_some(start_i)
}

/// Looks for a diagonal that divides the ring of `start_i` into two rings.
pub(crate) fn find_split(nodes: &[Node], start_i: NodeIndex) -> Option<(NodeIndex, NodeIndex)> {
    let mut a_i = start_i;
    loop {
        let a = node!(nodes, a_i);
        let mut b_i = node!(nodes, a.next_i).next_i;

        while b_i != a.prev_i {
            let b = node!(nodes, b_i);
            if a.i != b.i && is_good_split(nodes, a, b) {
                return Some((a_i, b_i));
            }
            b_i = b.next_i;
        }

        a_i = a.next_i;
        if a_i == start_i {
            return None;
        }
    }
}

/// whether another ring node shares the position of `a`, apart from `partner`
fn on_bridge(nodes: &[Node], a: &Node, partner: &Node) -> bool {
    [a.prev_z_i, a.next_z_i].into_iter().flatten().any(|z_i| {
        let z = node!(nodes, z_i);
        !core::ptr::eq(z, partner) && equals(a, z)
    })
}

/// check if the diagonal a-b lies fully inside the ring and splits it into two
/// rings that can be triangulated on their own
fn is_good_split(nodes: &[Node], a: &Node, b: &Node) -> bool {
    let a_prev = node!(nodes, a.prev_i);
    let a_next = node!(nodes, a.next_i);
    let b_prev = node!(nodes, b.prev_i);
    let b_next = node!(nodes, b.next_i);

    // not along an existing edge and crossing no other edge
    let no_intersect = a_next.i != b.i && a_prev.i != b.i && !intersects_ring(nodes, a, b);
    // visible from both ends and through the middle
    let local_split =
        locally_inside(nodes, a, b) && locally_inside(nodes, b, a) && middle_inside(nodes, a, b);
    // does not create opposite-facing sectors
    let same_dir = area(a_prev, a, b_prev) != 0.0 || area(a, b_prev, b) != 0.0;
    // zero-length bridge between two reflex corners
    let bridge = equals(a, b) && area(a_prev, a, a_next) > 0.0 && area(b_prev, b, b_next) > 0.0;

    no_intersect
        && ((local_split && same_dir) || bridge)
        && !on_bridge(nodes, a, b)
        && !on_bridge(nodes, b, a)
}
