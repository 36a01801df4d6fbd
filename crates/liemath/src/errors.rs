use thiserror::Error;

/// Error produced when constructing a layout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Empty signature
    #[error("layout must have at least one basis vector")]
    EmptySignature,
    /// Too many dimensions
    #[error("layout has {0} basis vectors but the maximum is {max}", max = crate::MAX_NDIM)]
    TooManyDimensions(usize),
    /// Invalid metric
    #[error("basis vector must square to 1, -1, or 0; got {0}")]
    InvalidMetric(i8),
    /// Wrong number of basis vector names
    #[error("expected {expected} basis vector names; got {got}")]
    WrongIdCount {
        /// Number of basis vectors.
        expected: u8,
        /// Number of names given.
        got: usize,
    },
    /// Empty basis vector name
    #[error("basis vector #{0} has an empty name")]
    EmptyId(usize),
    /// Duplicate basis vector name
    #[error("duplicate basis vector name {0:?}")]
    DuplicateId(String),
    /// Layout is not conformal
    ///
    /// Conformal layouts must end with a pair of basis vectors squaring to
    /// `+1` and `-1`.
    #[error("last two basis vectors of a conformal layout must square to +1 and -1")]
    NotConformal,
    /// Mismatched metric between corresponding basis vectors
    #[error("basis vector {0:?} has a different metric in each layout")]
    MismatchedMetric(String),
}

/// Error produced when combining multivectors from different layouts.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("multivectors belong to different layouts")]
pub struct LayoutMismatch;

/// Error produced when decomposing a point pair into its two ends.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum PointPairError {
    /// Not a bivector
    #[error("point pair must be a bivector")]
    NotBivector,
    /// Zero
    #[error("point pair is zero")]
    Zero,
    /// Imaginary point pair (squares to a negative number)
    ///
    /// The two ends are complex conjugates, so there is no real solution.
    #[error("point pair is imaginary")]
    Imaginary,
    /// Tangent point pair (squares to zero)
    ///
    /// The two ends coincide, so they cannot be separated by normalization.
    #[error("point pair is tangent")]
    Tangent,
    /// Layout mismatch
    #[error(transparent)]
    LayoutMismatch(#[from] LayoutMismatch),
}

/// Error produced when converting between rounds and multivectors.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum RoundError {
    /// Zero radius
    #[error("round must have nonzero radius")]
    ZeroRadius,
    /// Zero normal vector
    #[error("plane must have nonzero normal vector")]
    ZeroNormal,
    /// Too many dimensions
    #[error("round needs {got} dimensions but the layout only has {max}")]
    TooManyDimensions {
        /// Dimensions of the layout.
        max: u8,
        /// Dimensions required by the round.
        got: u8,
    },
    /// Not a vector in the Lie quadric (not null)
    #[error("multivector does not represent an oriented round")]
    NotLieSphere,
    /// Layout mismatch
    #[error(transparent)]
    LayoutMismatch(#[from] LayoutMismatch),
}

/// Error produced when solving Apollonius' problem.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApolloniusError {
    /// Wrong number of rounds
    #[error("expected {expected} rounds in {ndim}D; got {got}")]
    WrongCount {
        /// Number of Euclidean dimensions.
        ndim: u8,
        /// Number of rounds required.
        expected: usize,
        /// Number of rounds given.
        got: usize,
    },
    /// Degenerate configuration
    ///
    /// This happens when the rounds are not independent; for example, when
    /// two of them are identical.
    #[error("rounds are not independent")]
    Degenerate,
    /// Invalid round
    #[error("round #{index}: {error}")]
    BadRound {
        /// Index of the round.
        index: usize,
        /// Error produced when embedding the round.
        error: RoundError,
    },
    /// Invalid layout
    #[error(transparent)]
    Layout(#[from] LayoutError),
}
