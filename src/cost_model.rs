//! The `Cost` type and the costs of the three primitive edit operations.

/// Type for storing costs. Rewrite rules carry fractional weights, so costs
/// are floats rather than the usual integer edit distance.
pub type Cost = f64;

/// Sentinel for table cells not yet proven reachable. Adding a finite cost
/// to `INF` still compares greater than any real candidate.
pub const INF: Cost = f64::MAX;

/// Penalty written into the masks of a blocked region. Large enough to
/// dominate any sane catalogue while staying far from overflow.
pub const BLOCK: Cost = 3000.0;

/// Absolute tolerance for cost equality during backtracing. Strict `==`
/// would miss co-optimal paths after summing rule weights.
const TOLERANCE: Cost = 1e-7;

#[inline]
pub fn approx_eq(a: Cost, b: Cost) -> bool {
    (a - b).abs() < TOLERANCE
}

/// Costs of the primitive single-character operations. The catalogue can
/// override each of them with a `>add:`, `>rep:` or `>rem:` line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CostModel {
    /// Inserting one character into the search string.
    pub add: Cost,
    /// Replacing one character of the search string.
    pub rep: Cost,
    /// Removing one character from the search string.
    pub rem: Cost,
}

impl Default for CostModel {
    fn default() -> Self {
        CostModel {
            add: 1.0,
            rep: 1.0,
            rem: 1.0,
        }
    }
}

impl CostModel {
    pub fn new(add: Cost, rep: Cost, rem: Cost) -> Self {
        CostModel { add, rep, rem }
    }
}
