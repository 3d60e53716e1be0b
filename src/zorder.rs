//! Morton (z-order) keys and the z-sorted node chain used to speed up ear tests.

use core::cmp::Ordering;

use crate::node::{node, node_mut, Node, NodeIndex};

/// Largest normalized coordinate on each axis.
const KEY_RANGE: f64 = 65535.0;

/// Maps coordinates inside a bounding box onto the z-order curve.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ZOrder {
    min_x: f64,
    min_y: f64,
    scale_x: f64,
    scale_y: f64,
}

impl ZOrder {
    /// Returns `None` for a box with zero (or non-finite) width or height.
    pub fn new(min_x: f64, min_y: f64, width: f64, height: f64) -> Option<Self> {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return None;
        }
        Some(Self {
            min_x,
            min_y,
            scale_x: KEY_RANGE / width,
            scale_y: KEY_RANGE / height,
        })
    }

    /// z-order of a point; each axis is normalized by its own extent to 16 bits
    pub fn key(&self, x: f64, y: f64) -> u32 {
        // points outside the box land on its edge
        let x = ((x - self.min_x) * self.scale_x).clamp(0.0, KEY_RANGE) as u32;
        let y = ((y - self.min_y) * self.scale_y).clamp(0.0, KEY_RANGE) as u32;
        spread(x) | (spread(y) << 1)
    }
}

/// Spreads the low 16 bits of `v` over the even bits of the result.
fn spread(v: u32) -> u32 {
    let mut v = v & 0x0000_FFFF;
    v = (v | (v << 8)) & 0x00FF_00FF;
    v = (v | (v << 4)) & 0x0F0F_0F0F;
    v = (v | (v << 2)) & 0x3333_3333;
    (v | (v << 1)) & 0x5555_5555
}

/// interlink ring nodes in z-order
pub(crate) fn index_curve(nodes: &mut [Node], start_i: NodeIndex, zorder: &ZOrder) {
    let mut p_i = start_i;
    loop {
        let p = node_mut!(nodes, p_i);
        p.z = zorder.key(p.x, p.y);
        p.prev_z_i = Some(p.prev_i);
        p.next_z_i = Some(p.next_i);
        p_i = p.next_i;
        if p_i == start_i {
            break;
        }
    }

    let tail_i = node!(nodes, start_i).prev_i;
    node_mut!(nodes, start_i).prev_z_i = None;
    node_mut!(nodes, tail_i).next_z_i = None;
    sort_linked(nodes, start_i);
}

/// Total order of the z-chain: key first, then position, then vertex index.
fn z_cmp(a: &Node, b: &Node) -> Ordering {
    a.z.cmp(&b.z)
        .then_with(|| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal))
        .then_with(|| a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal))
        .then_with(|| a.i.cmp(&b.i))
}

/// Simon Tatham's linked list merge sort algorithm
/// http://www.chiark.greenend.org.uk/~sgtatham/algorithms/listsort.html
fn sort_linked(nodes: &mut [Node], list_i: NodeIndex) {
    let mut in_size: usize = 1;
    let mut list_i = Some(list_i);

    loop {
        let mut p_i = list_i;
        list_i = None;
        let mut tail_i: Option<NodeIndex> = None;
        let mut num_merges = 0;

        while let Some(p_start_i) = p_i {
            num_merges += 1;
            let mut q_i = node!(nodes, p_start_i).next_z_i;
            let mut p_size: usize = 1;
            for _ in 1..in_size {
                let Some(i) = q_i else { break };
                p_size += 1;
                q_i = node!(nodes, i).next_z_i;
            }
            let mut q_size = in_size;

            loop {
                // take from p while it is not exhausted and not greater than q
                let take_p = match (p_i, q_i) {
                    (Some(p), Some(q)) if p_size > 0 && q_size > 0 => {
                        z_cmp(node!(nodes, p), node!(nodes, q)) != Ordering::Greater
                    }
                    (Some(_), _) if p_size > 0 => true,
                    (_, Some(_)) if q_size > 0 => false,
                    _ => break,
                };
                let e_i = if take_p {
                    let Some(e_i) = p_i else { break };
                    p_size -= 1;
                    p_i = node!(nodes, e_i).next_z_i;
                    e_i
                } else {
                    let Some(e_i) = q_i else { break };
                    q_size -= 1;
                    q_i = node!(nodes, e_i).next_z_i;
                    e_i
                };
                node_mut!(nodes, e_i).prev_z_i = tail_i;

                if let Some(tail_i) = tail_i {
                    node_mut!(nodes, tail_i).next_z_i = Some(e_i);
                } else {
                    list_i = Some(e_i);
                }
                tail_i = Some(e_i);
            }

            p_i = q_i;
        }

        if let Some(tail_i) = tail_i {
            node_mut!(nodes, tail_i).next_z_i = None;
        }
        if num_merges <= 1 {
            break;
        }
        in_size *= 2;
    }
}
