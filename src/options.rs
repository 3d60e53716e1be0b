/// Default for [`Options::max_split_depth`].
pub const DEFAULT_MAX_SPLIT_DEPTH: u32 = 1024;

/// Limits that bound the work done on pathological rings.
///
/// ```
/// use zonecut::Options;
///
/// let options = Options::default().with_step_limit(1_000_000);
/// assert_eq!(options.max_split_depth, zonecut::DEFAULT_MAX_SPLIT_DEPTH);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// How many times a ring may be split into sub-rings, counted along one
    /// chain of splits. Deeper sub-rings are left untriangulated.
    pub max_split_depth: u32,
    /// Total number of ear-clipping steps allowed for one call, or `None` for no limit.
    pub step_limit: Option<usize>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_split_depth: DEFAULT_MAX_SPLIT_DEPTH,
            step_limit: None,
        }
    }
}

impl Options {
    pub fn with_max_split_depth(mut self, depth: u32) -> Self {
        self.max_split_depth = depth;
        self
    }

    pub fn with_step_limit(mut self, steps: usize) -> Self {
        self.step_limit = Some(steps);
        self
    }
}
