/// Why a triangulation produced no triangles, or only some of them.
///
/// Rejected input ([`is_degenerate`](Self::is_degenerate)) leaves the output
/// empty. A partial result ([`is_partial`](Self::is_partial)) keeps every
/// triangle emitted before the failure; each of them is still valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TriangulationError {
    /// The bounding box has zero (or non-finite) width or height.
    #[error("bounding box has no area")]
    EmptyBoundingBox,
    /// Fewer than 3 distinct points are left after removing duplicates.
    #[error("ring has {0} distinct point(s), at least 3 are required")]
    TooFewPoints(usize),
    /// The ring has more points than the output index type (or the node
    /// arena) can address.
    #[error("ring has {0} points, more than the index type can address")]
    TooManyPoints(usize),
    /// The coordinate at this ring position is not a finite number.
    #[error("point {0} has a non-finite coordinate")]
    InvalidCoordinate(usize),
    /// Some sub-rings had no valid diagonal to split them on.
    #[error("{unresolved} sub-ring(s) could not be triangulated")]
    Incomplete { unresolved: usize },
    /// Some sub-rings would have needed splitting deeper than allowed.
    #[error("{unresolved} sub-ring(s) left unresolved at split depth limit {max_depth}")]
    SplitDepthExceeded { unresolved: usize, max_depth: u32 },
    /// The step budget ran out before the ring was fully triangulated.
    #[error("step limit of {0} exhausted")]
    StepLimitExhausted(usize),
}

impl TriangulationError {
    /// Whether the input was rejected before any triangle was emitted.
    pub fn is_degenerate(&self) -> bool {
        matches!(
            self,
            Self::EmptyBoundingBox
                | Self::TooFewPoints(_)
                | Self::TooManyPoints(_)
                | Self::InvalidCoordinate(_)
        )
    }

    /// Whether triangles were (possibly) emitted but part of the area is missing.
    pub fn is_partial(&self) -> bool {
        !self.is_degenerate()
    }
}
