use num_traits::ToPrimitive;

/// Axis-aligned bounds of a ring, in the ring's own coordinate type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BBox<C> {
    pub min: [C; 2],
    pub max: [C; 2],
}

impl<C> BBox<C> {
    pub fn new(min: [C; 2], max: [C; 2]) -> Self {
        Self { min, max }
    }
}

impl<C: Copy + PartialOrd> BBox<C> {
    /// Smallest box containing every point, or `None` for no points.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a [C; 2]>) -> Option<Self>
    where
        C: 'a,
    {
        let mut iter = points.into_iter();
        let &first = iter.next()?;
        Some(iter.fold(Self::new(first, first), |mut bbox, &[x, y]| {
            if x < bbox.min[0] {
                bbox.min[0] = x;
            }
            if y < bbox.min[1] {
                bbox.min[1] = y;
            }
            if x > bbox.max[0] {
                bbox.max[0] = x;
            }
            if y > bbox.max[1] {
                bbox.max[1] = y;
            }
            bbox
        }))
    }
}

impl<C: ToPrimitive> BBox<C> {
    /// `[min_x, min_y, width, height]` as `f64`, if every bound is representable.
    pub(crate) fn to_f64(&self) -> Option<[f64; 4]> {
        let min_x = self.min[0].to_f64()?;
        let min_y = self.min[1].to_f64()?;
        let max_x = self.max[0].to_f64()?;
        let max_y = self.max[1].to_f64()?;
        Some([min_x, min_y, max_x - min_x, max_y - min_y])
    }
}
