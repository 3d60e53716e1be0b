//! Ear-clipping triangulation of a single polygon ring, hardened for the
//! degenerate outlines produced by boolean operations on board-level geometry
//! (copper fills, pads): duplicate points, zero-area spikes, touching edges and
//! small self-intersections.
//!
//! The ring may already contain bridge edges that connect holes to the outer
//! boundary. Ear tests are accelerated with a z-order curve; rings without any
//! ear left are repaired by dropping null triangles and, as a last resort, by
//! splitting them along an interior diagonal.
//!
//! ```
//! use zonecut::{BBox, Triangulator};
//!
//! let ring = [[0i64, 0], [10, 0], [10, 10], [0, 10]];
//! let bbox = BBox::from_points(&ring).unwrap();
//! let mut triangles: Vec<[u32; 3]> = Vec::new();
//! Triangulator::new().triangulate(ring, &bbox, &mut triangles).unwrap();
//! assert_eq!(triangles.len(), 2);
//! ```

#![no_std]

extern crate alloc;

mod bbox;
mod clip;
mod error;
mod mesh;
mod node;
mod options;
mod predicates;
mod zorder;

use alloc::vec::Vec;
use num_traits::{Float, ToPrimitive};

pub use bbox::BBox;
pub use error::TriangulationError;
pub use mesh::TriangulatedPolygon;
pub use options::{Options, DEFAULT_MAX_SPLIT_DEPTH};

use clip::{clip_ears, find_split, Budget, Clipped};
use node::{insert_node, node, remove_node, ring_len, split_ring, Node, NodeIndex};
use predicates::{equals, signed_area};
use zorder::{index_curve, ZOrder};

/// Largest ring accepted. Node handles are `u32`, and every split adds two
/// nodes, with at most one split per point.
const MAX_POINTS: usize = (u32::MAX / 3) as usize;

/// Integer type of the emitted vertex indices.
///
/// A ring whose last position does not fit the type is rejected with
/// [`TriangulationError::TooManyPoints`] before any triangle is emitted.
pub trait Index: Copy {
    fn into_usize(self) -> usize;
    fn try_from_usize(v: usize) -> Option<Self>;
    /// Converts a position already accepted by [`try_from_usize`](Self::try_from_usize).
    fn from_usize(v: usize) -> Self;
}

macro_rules! impl_index {
    ($($t:ty),*) => {$(
        impl Index for $t {
            #[inline]
            fn into_usize(self) -> usize {
                self as usize
            }
            #[inline]
            fn try_from_usize(v: usize) -> Option<Self> {
                Self::try_from(v).ok()
            }
            #[inline]
            fn from_usize(v: usize) -> Self {
                debug_assert!(Self::try_from(v).is_ok(), "index {v} out of range");
                v as Self
            }
        }
    )*};
}

impl_index!(u16, u32, usize);

/// Reusable triangulation state.
///
/// All working memory of a call lives here and is recycled by the next call,
/// so one instance per thread avoids repeated allocations.
pub struct Triangulator {
    data: Vec<[f64; 2]>,
    nodes: Vec<Node>,
    pending: Vec<(NodeIndex, u32)>,
    options: Options,
}

impl Default for Triangulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Triangulator {
    /// Creates a triangulator with default [`Options`].
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    pub fn with_options(options: Options) -> Self {
        Self {
            data: Vec::new(),
            nodes: Vec::new(),
            pending: Vec::new(),
            options,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Triangulates a closed ring.
    ///
    /// `triangles_out` is cleared, then receives index triples into `ring`. The
    /// bounding box is only used to scale the z-order keys; it should contain
    /// every point of the ring.
    ///
    /// On a partial failure ([`TriangulationError::is_partial`]) the triangles
    /// emitted so far stay in `triangles_out`.
    pub fn triangulate<C: ToPrimitive, N: Index>(
        &mut self,
        ring: impl IntoIterator<Item = [C; 2]>,
        bbox: &BBox<C>,
        triangles_out: &mut Vec<[N; 3]>,
    ) -> Result<(), TriangulationError> {
        triangles_out.clear();

        let zorder = bbox
            .to_f64()
            .and_then(|[x, y, w, h]| ZOrder::new(x, y, w, h))
            .ok_or(TriangulationError::EmptyBoundingBox)?;

        self.data.clear();
        for (i, [x, y]) in ring.into_iter().enumerate() {
            match (x.to_f64(), y.to_f64()) {
                (Some(x), Some(y)) if x.is_finite() && y.is_finite() => self.data.push([x, y]),
                _ => return Err(TriangulationError::InvalidCoordinate(i)),
            }
        }
        if self.data.len() < 3 {
            return Err(TriangulationError::TooFewPoints(self.data.len()));
        }
        let len = self.data.len();
        if len > MAX_POINTS || N::try_from_usize(len - 1).is_none() {
            return Err(TriangulationError::TooManyPoints(len));
        }

        triangles_out.reserve(self.data.len());
        node::reset(&mut self.nodes, self.data.len() / 2 * 3);

        let Some(anchor_i) = self.linked_list() else {
            return Err(TriangulationError::TooFewPoints(0));
        };
        let Some(anchor_i) = update_list(&mut self.nodes, anchor_i, &zorder) else {
            let distinct = ring_len(&self.nodes, anchor_i);
            return Err(TriangulationError::TooFewPoints(distinct));
        };

        self.earcut(anchor_i, &zorder, triangles_out)
    }

    /// Triangulates a ring into `result`, computing the bounding box from the ring itself.
    ///
    /// `result` keeps a copy of the ring, so the mesh can be used on its own.
    pub fn tesselate<C, N>(
        &mut self,
        ring: &[[C; 2]],
        result: &mut TriangulatedPolygon<C, N>,
    ) -> Result<(), TriangulationError>
    where
        C: Copy + PartialOrd + ToPrimitive,
        N: Index,
    {
        result.clear();
        let (vertices, triangles) = result.parts_mut();
        vertices.extend_from_slice(ring);
        let bbox = BBox::from_points(ring).ok_or(TriangulationError::TooFewPoints(0))?;
        self.triangulate(ring.iter().copied(), &bbox, triangles)
    }

    /// create a circular doubly linked list from the ring, always counter-clockwise
    fn linked_list(&mut self) -> Option<NodeIndex> {
        let mut last_i: Option<NodeIndex> = None;
        // positions fit u32, the ring is bounded by MAX_POINTS
        let iter = self.data.iter().enumerate();

        if signed_area(&self.data) > 0.0 {
            for (i, &[x, y]) in iter.rev() {
                last_i = Some(insert_node(&mut self.nodes, i as u32, x, y, last_i));
            }
        } else {
            for (i, &[x, y]) in iter {
                last_i = Some(insert_node(&mut self.nodes, i as u32, x, y, last_i));
            }
        }

        // drop a closing point that repeats the first one
        let li = last_i?;
        let last = node!(self.nodes, li);
        let first_i = last.next_i;
        if first_i != li && equals(last, node!(self.nodes, first_i)) {
            remove_node(&mut self.nodes, first_i);
        }
        last_i
    }

    /// Clips the ring of `anchor_i`, splitting it whenever clipping gets stuck.
    ///
    /// Sub-rings are kept on an explicit stack, first half on top, so the output
    /// order matches a depth-first recursion.
    fn earcut<N: Index>(
        &mut self,
        anchor_i: NodeIndex,
        zorder: &ZOrder,
        triangles: &mut Vec<[N; 3]>,
    ) -> Result<(), TriangulationError> {
        let mut budget = Budget::new(self.options.step_limit);
        let mut unresolved = 0;
        let mut depth_capped = false;

        self.pending.clear();
        self.pending.push((anchor_i, 0));

        while let Some((ring_i, depth)) = self.pending.pop() {
            let stuck_i = match clip_ears(&mut self.nodes, ring_i, zorder, triangles, &mut budget)
            {
                Clipped::Done => continue,
                Clipped::Stuck(stuck_i) => stuck_i,
                Clipped::OutOfSteps => {
                    let limit = self.options.step_limit.unwrap_or_default();
                    tracing::debug!(limit, emitted = triangles.len(), "step limit exhausted");
                    return Err(TriangulationError::StepLimitExhausted(limit));
                }
            };

            if depth >= self.options.max_split_depth {
                tracing::debug!(depth, "ring left unresolved at split depth limit");
                depth_capped = true;
                unresolved += 1;
                continue;
            }

            let Some((a_i, b_i)) = find_split(&self.nodes, stuck_i) else {
                tracing::debug!(
                    vertices = ring_len(&self.nodes, stuck_i),
                    depth,
                    "no valid diagonal to split ring"
                );
                unresolved += 1;
                continue;
            };

            tracing::debug!(
                a = node!(self.nodes, a_i).i,
                b = node!(self.nodes, b_i).i,
                depth,
                "splitting ring"
            );
            let c_i = split_ring(&mut self.nodes, a_i, b_i);
            for half_i in [c_i, a_i] {
                if let Some(half_i) = update_list(&mut self.nodes, half_i, zorder) {
                    self.pending.push((half_i, depth + 1));
                }
            }
        }

        match (unresolved, depth_capped) {
            (0, _) => Ok(()),
            (unresolved, true) => Err(TriangulationError::SplitDepthExceeded {
                unresolved,
                max_depth: self.options.max_split_depth,
            }),
            (unresolved, false) => Err(TriangulationError::Incomplete { unresolved }),
        }
    }
}

/// Removes coincident neighbours and rebuilds the z-order chain of a ring.
///
/// Returns `None` when fewer than 3 nodes are left.
fn update_list(nodes: &mut [Node], start_i: NodeIndex, zorder: &ZOrder) -> Option<NodeIndex> {
    let mut p_i = node!(nodes, start_i).next_i;
    while p_i != start_i {
        let p = node!(nodes, p_i);
        if equals(p, node!(nodes, p.next_i)) {
            let (prev_i, _) = remove_node(nodes, p_i);
            p_i = prev_i;
        }
        p_i = node!(nodes, p_i).next_i;
    }

    // the walk never removes the anchor, so compare it with its successor here
    loop {
        let start = node!(nodes, start_i);
        let next_i = start.next_i;
        if next_i == start_i || !equals(start, node!(nodes, next_i)) {
            break;
        }
        remove_node(nodes, next_i);
    }

    if ring_len(nodes, start_i) < 3 {
        return None;
    }
    index_curve(nodes, start_i, zorder);
    Some(start_i)
}

/// Returns a relative difference between the ring area and its triangulation area;
/// used to verify correctness of triangulation
pub fn deviation<C: ToPrimitive, N: Index>(
    ring: impl IntoIterator<Item = [C; 2]>,
    triangles: &[[N; 3]],
) -> f64 {
    let data = ring
        .into_iter()
        .map(|[x, y]| [x.to_f64().unwrap_or(f64::NAN), y.to_f64().unwrap_or(f64::NAN)])
        .collect::<Vec<[f64; 2]>>();
    let polygon_area = if data.len() < 3 {
        0.0
    } else {
        Float::abs(signed_area(&data))
    };

    let mut triangles_area = 0.0;
    for &[a, b, c] in triangles {
        let [a, b, c] = [a.into_usize(), b.into_usize(), c.into_usize()];
        triangles_area += Float::abs(
            (data[a][0] - data[c][0]) * (data[b][1] - data[a][1])
                - (data[a][0] - data[b][0]) * (data[c][1] - data[a][1]),
        );
    }
    if polygon_area == 0.0 && triangles_area == 0.0 {
        0.0
    } else {
        Float::abs((polygon_area - triangles_area) / polygon_area)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn distinct_ring(tr: &Triangulator, anchor_i: NodeIndex) -> Vec<u32> {
        let nodes = &tr.nodes;
        let mut out = alloc::vec![node!(nodes, anchor_i).i];
        let mut p_i = node!(nodes, anchor_i).next_i;
        while p_i != anchor_i {
            out.push(node!(nodes, p_i).i);
            p_i = node!(nodes, p_i).next_i;
        }
        out
    }

    fn load(tr: &mut Triangulator, points: &[[f64; 2]]) -> Option<NodeIndex> {
        tr.data.clear();
        tr.data.extend_from_slice(points);
        node::reset(&mut tr.nodes, points.len());
        tr.linked_list()
    }

    #[test]
    fn test_linked_list_keeps_ccw_order() {
        let mut tr = Triangulator::new();
        let anchor = load(&mut tr, &[[0., 0.], [10., 0.], [10., 10.], [0., 10.]]).unwrap();
        assert_eq!(distinct_ring(&tr, anchor), alloc::vec![3, 0, 1, 2]);
    }

    #[test]
    fn test_linked_list_reverses_cw_ring() {
        let mut tr = Triangulator::new();
        let anchor = load(&mut tr, &[[0., 0.], [0., 10.], [10., 10.], [10., 0.]]).unwrap();
        assert_eq!(distinct_ring(&tr, anchor), alloc::vec![0, 3, 2, 1]);
    }

    #[test]
    fn test_linked_list_drops_closing_point() {
        let mut tr = Triangulator::new();
        let anchor = load(
            &mut tr,
            &[[0., 0.], [10., 0.], [10., 10.], [0., 10.], [0., 0.]],
        )
        .unwrap();
        assert_eq!(distinct_ring(&tr, anchor), alloc::vec![4, 1, 2, 3]);
    }

    #[test]
    fn test_update_list_removes_duplicates() {
        let mut tr = Triangulator::new();
        let anchor = load(
            &mut tr,
            &[[0., 0.], [0., 0.], [10., 0.], [10., 10.], [10., 10.], [0., 10.]],
        )
        .unwrap();
        let zorder = ZOrder::new(0., 0., 10., 10.).unwrap();
        let anchor = update_list(&mut tr.nodes, anchor, &zorder).unwrap();
        assert_eq!(distinct_ring(&tr, anchor), alloc::vec![5, 1, 2, 4]);
    }

    #[test]
    fn test_update_list_collapses() {
        let mut tr = Triangulator::new();
        let anchor = load(&mut tr, &[[0., 0.], [5., 5.], [5., 5.], [0., 0.]]).unwrap();
        let zorder = ZOrder::new(0., 0., 10., 10.).unwrap();
        assert!(update_list(&mut tr.nodes, anchor, &zorder).is_none());
    }

    #[test]
    fn test_deviation() {
        let ring = [[0., 0.], [10., 0.], [10., 10.], [0., 10.]];
        assert_eq!(deviation(ring, &[[0u32, 1, 2], [2, 3, 0]]), 0.0);
        assert_eq!(deviation(ring, &[[0u32, 1, 2]]), 0.5);
        assert_eq!(deviation([[0., 0.], [1., 1.]], &[] as &[[u32; 3]]), 0.0);
    }
}
