use alloc::vec::Vec;
use num_traits::{Float, ToPrimitive};

use crate::Index;

/// A triangle mesh over a copy of the ring it was built from.
///
/// Filled by [`Triangulator::tesselate`](crate::Triangulator::tesselate); the
/// triangles index into [`vertices`](Self::vertices).
#[derive(Debug, Clone, PartialEq)]
pub struct TriangulatedPolygon<C, N = u32> {
    vertices: Vec<[C; 2]>,
    triangles: Vec<[N; 3]>,
}

impl<C, N> Default for TriangulatedPolygon<C, N> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            triangles: Vec::new(),
        }
    }
}

impl<C: Copy, N: Index> TriangulatedPolygon<C, N> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.triangles.clear();
    }

    pub fn vertices(&self) -> &[[C; 2]] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[[N; 3]] {
        &self.triangles
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Corner points of the triangle at `index`.
    pub fn triangle(&self, index: usize) -> Option<[[C; 2]; 3]> {
        let [a, b, c] = *self.triangles.get(index)?;
        Some([
            self.vertices[a.into_usize()],
            self.vertices[b.into_usize()],
            self.vertices[c.into_usize()],
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = [[C; 2]; 3]> + '_ {
        (0..self.triangles.len()).filter_map(|i| self.triangle(i))
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut Vec<[C; 2]>, &mut Vec<[N; 3]>) {
        (&mut self.vertices, &mut self.triangles)
    }
}

impl<C: Copy + ToPrimitive, N: Index> TriangulatedPolygon<C, N> {
    /// Total unsigned area covered by the triangles.
    pub fn area(&self) -> f64 {
        self.iter()
            .map(|[a, b, c]| {
                let [ax, ay] = [a[0].to_f64(), a[1].to_f64()];
                let [bx, by] = [b[0].to_f64(), b[1].to_f64()];
                let [cx, cy] = [c[0].to_f64(), c[1].to_f64()];
                match (ax, ay, bx, by, cx, cy) {
                    (Some(ax), Some(ay), Some(bx), Some(by), Some(cx), Some(cy)) => {
                        Float::abs((bx - ax) * (cy - ay) - (cx - ax) * (by - ay)) / 2.0
                    }
                    _ => 0.0,
                }
            })
            .sum()
    }
}
