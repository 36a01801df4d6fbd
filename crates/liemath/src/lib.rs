//! Clifford algebras with custom layouts, conformal geometric algebra, and Lie
//! sphere geometry for solving Apollonius' problem.
//!
//! The central type is [`Multivector`], which is always bound to a [`Layout`]
//! describing the signature and names of its basis vectors. On top of that:
//!
//! - [`ConformalLayout`] adds `e+`/`e-`, `einf`/`eo`, and `up`/`down`.
//! - [`LieLayout`] augments a conformal layout with one more basis vector
//!   squaring to -1, in which oriented circles and spheres become null
//!   vectors and oriented contact becomes orthogonality.
//! - [`Apollonius`] uses that to find all circles (or spheres) tangent to a
//!   given set.

pub use {approx, num_traits as num, smallvec};

/// Floating-point type used for geometry.
pub type Float = f64;

/// Small floating-point value used for comparisons and tiny offsets.
pub const EPSILON: Float = 0.000001;

/// Maximum number of basis vectors in a layout.
pub const MAX_NDIM: u8 = 12;

/// Asserts that both arguments are approximately equal.
#[macro_export]
macro_rules! assert_approx_eq {
    ($a:expr, $b:expr $(,)?) => {
        $crate::approx::assert_abs_diff_eq!($a, $b, epsilon = $crate::EPSILON)
    };
}

#[macro_use]
mod vector;

pub mod apollonius;
pub mod approx_cmp;
pub mod conformal;
mod errors;
pub mod layout;
pub mod lie;
pub mod multivector;
pub mod round;
pub mod sign;
pub mod transform;

pub use errors::*;

/// Structs, traits, and constants.
pub mod prelude {
    pub use crate::apollonius::Apollonius;
    pub use crate::approx_cmp::*;
    pub use crate::conformal::ConformalLayout;
    pub use crate::errors::*;
    pub use crate::layout::{Axes, BasisVectorIds, Layout, Metric};
    pub use crate::lie::LieLayout;
    pub use crate::multivector::{Multivector, Product, Term};
    pub use crate::round::Round;
    pub use crate::sign::Sign;
    pub use crate::transform::BasisTransform;
    pub use crate::vector::*;
    pub use crate::{EPSILON, Float, MAX_NDIM, vector};
}
pub use prelude::*;
