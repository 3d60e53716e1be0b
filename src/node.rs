//! Vertex arena shared by the ring and the z-order chain.

use alloc::vec::Vec;
use core::num::NonZeroU32;

macro_rules! node {
    ($self:ident.$nodes:ident, $index:expr) => {
        unsafe {
            debug_assert!($index.get() < $self.$nodes.len() as u32);
            $self.$nodes.get_unchecked($index.get() as usize)
        }
    };
    ($nodes:ident, $index:expr) => {
        unsafe {
            debug_assert!($index.get() < $nodes.len() as u32);
            $nodes.get_unchecked($index.get() as usize)
        }
    };
}

macro_rules! node_mut {
    ($self:ident.$nodes:ident, $index:expr) => {
        unsafe {
            debug_assert!($index.get() < $self.$nodes.len() as u32);
            $self.$nodes.get_unchecked_mut($index.get() as usize)
        }
    };
    ($nodes:ident, $index:expr) => {
        unsafe {
            debug_assert!($index.get() < $nodes.len() as u32);
            $nodes.get_unchecked_mut($index.get() as usize)
        }
    };
}

pub(crate) use node;
pub(crate) use node_mut;

/// Handle of a node in the arena. Slot 0 holds a sentinel, so handles are never zero.
pub(crate) type NodeIndex = NonZeroU32;

pub(crate) struct Node {
    /// vertex index in the input ring
    pub i: u32,
    /// z-order curve value
    pub z: u32,
    /// vertex coordinates x
    pub x: f64,
    /// vertex coordinates y
    pub y: f64,
    /// previous vertex in the ring
    pub prev_i: NodeIndex,
    /// next vertex in the ring
    pub next_i: NodeIndex,
    /// previous node in z-order
    pub prev_z_i: Option<NodeIndex>,
    /// next node in z-order
    pub next_z_i: Option<NodeIndex>,
}

impl Node {
    pub fn new(i: u32, x: f64, y: f64) -> Self {
        Self {
            i,
            x,
            y,
            prev_i: NodeIndex::MIN,
            next_i: NodeIndex::MIN,
            z: 0,
            prev_z_i: None,
            next_z_i: None,
        }
    }
}

/// Clears the arena and pushes the sentinel node.
pub(crate) fn reset(nodes: &mut Vec<Node>, capacity: usize) {
    nodes.clear();
    nodes.reserve(capacity + 1);
    nodes.push(Node::new(u32::MAX, f64::INFINITY, f64::INFINITY));
}

fn next_index(nodes: &[Node]) -> NodeIndex {
    debug_assert!(!nodes.is_empty());
    unsafe { NodeIndex::new_unchecked(nodes.len() as u32) }
}

/// create a node and optionally link it with previous one (in a circular doubly linked list)
pub(crate) fn insert_node(
    nodes: &mut Vec<Node>,
    i: u32,
    x: f64,
    y: f64,
    last: Option<NodeIndex>,
) -> NodeIndex {
    let mut p = Node::new(i, x, y);
    let p_i = next_index(nodes);
    match last {
        Some(last_i) => {
            let last = node_mut!(nodes, last_i);
            let last_next_i = last.next_i;
            (p.next_i, last.next_i) = (last_next_i, p_i);
            p.prev_i = last_i;
            node_mut!(nodes, last_next_i).prev_i = p_i;
        }
        None => {
            (p.prev_i, p.next_i) = (p_i, p_i);
        }
    }
    nodes.push(p);
    p_i
}

/// Unlinks a node from both the ring and the z-order chain.
///
/// The node keeps its own links, so it still reads as a neighbour of the
/// ring it left; it is never reused.
pub(crate) fn remove_node(nodes: &mut [Node], p_i: NodeIndex) -> (NodeIndex, NodeIndex) {
    let p = node!(nodes, p_i);
    let p_next_i = p.next_i;
    let p_prev_i = p.prev_i;
    let p_next_z_i = p.next_z_i;
    let p_prev_z_i = p.prev_z_i;

    node_mut!(nodes, p_next_i).prev_i = p_prev_i;
    node_mut!(nodes, p_prev_i).next_i = p_next_i;

    if let Some(prev_z_i) = p_prev_z_i {
        node_mut!(nodes, prev_z_i).next_z_i = p_next_z_i;
    }
    if let Some(next_z_i) = p_next_z_i {
        node_mut!(nodes, next_z_i).prev_z_i = p_prev_z_i;
    }
    let p = node_mut!(nodes, p_i);
    (p.prev_z_i, p.next_z_i) = (None, None);
    (p_prev_i, p_next_i)
}

/// Splits the ring of `a_i` along the diagonal to `b_i`.
///
/// Both corners are duplicated into new nodes that keep their vertex index, so
/// the two resulting rings share no node. `a_i` stays on the ring `a -> b -> ..`,
/// and the returned handle (the copy of `b`) is on the other one.
pub(crate) fn split_ring(nodes: &mut Vec<Node>, a_i: NodeIndex, b_i: NodeIndex) -> NodeIndex {
    let a2_i = next_index(nodes);
    let b2_i = a2_i.saturating_add(1);

    let a = node_mut!(nodes, a_i);
    let mut a2 = Node::new(a.i, a.x, a.y);
    let an_i = a.next_i;
    a.next_i = b_i;
    a2.prev_i = b2_i;
    a2.next_i = an_i;
    node_mut!(nodes, an_i).prev_i = a2_i;

    let b = node_mut!(nodes, b_i);
    let mut b2 = Node::new(b.i, b.x, b.y);
    let bp_i = b.prev_i;
    b.prev_i = a_i;
    b2.next_i = a2_i;
    b2.prev_i = bp_i;
    node_mut!(nodes, bp_i).next_i = b2_i;

    nodes.extend([a2, b2]);

    b2_i
}

/// Number of nodes on the ring of `start_i`.
pub(crate) fn ring_len(nodes: &[Node], start_i: NodeIndex) -> usize {
    let mut count = 1;
    let mut p_i = node!(nodes, start_i).next_i;
    while p_i != start_i {
        count += 1;
        p_i = node!(nodes, p_i).next_i;
    }
    count
}

#[cfg(test)]
mod test {
    use super::*;

    fn ring(nodes: &mut Vec<Node>, points: &[[f64; 2]]) -> NodeIndex {
        reset(nodes, points.len());
        let mut last = None;
        for (i, &[x, y]) in points.iter().enumerate() {
            last = Some(insert_node(nodes, i as u32, x, y, last));
        }
        last.unwrap()
    }

    fn indices(nodes: &[Node], start_i: NodeIndex) -> Vec<u32> {
        let mut out = alloc::vec![node!(nodes, start_i).i];
        let mut p_i = node!(nodes, start_i).next_i;
        while p_i != start_i {
            out.push(node!(nodes, p_i).i);
            p_i = node!(nodes, p_i).next_i;
        }
        out
    }

    #[test]
    fn test_insert_links_circularly() {
        let mut nodes = Vec::new();
        let last = ring(&mut nodes, &[[0., 0.], [1., 0.], [1., 1.]]);
        assert_eq!(indices(&nodes, last), alloc::vec![2, 0, 1]);
        assert_eq!(ring_len(&nodes, last), 3);
        let first = node!(nodes, last).next_i;
        assert_eq!(node!(nodes, first).prev_i, last);
    }

    #[test]
    fn test_remove_unlinks() {
        let mut nodes = Vec::new();
        let last = ring(&mut nodes, &[[0., 0.], [1., 0.], [1., 1.], [0., 1.]]);
        let first = node!(nodes, last).next_i;
        let (prev_i, next_i) = remove_node(&mut nodes, first);
        assert_eq!(prev_i, last);
        assert_eq!(node!(nodes, next_i).i, 1);
        assert_eq!(indices(&nodes, last), alloc::vec![3, 1, 2]);
    }

    #[test]
    fn test_split_duplicates_corners() {
        let mut nodes = Vec::new();
        let last = ring(
            &mut nodes,
            &[[0., 0.], [2., 0.], [2., 1.], [2., 2.], [0., 2.], [0., 1.]],
        );
        let a = node!(nodes, last).next_i; // vertex 0
        let b = NodeIndex::new(4).unwrap(); // vertex 3
        let c = split_ring(&mut nodes, a, b);
        assert_eq!(indices(&nodes, a), alloc::vec![0, 3, 4, 5]);
        assert_eq!(indices(&nodes, c), alloc::vec![3, 0, 1, 2]);
        assert_eq!(nodes.len(), 9);
    }
}
