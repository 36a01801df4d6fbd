use std::ops::{Mul, Neg};

use crate::{Axes, Float, Layout};

/// Scaled basis blade.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Term {
    /// Coefficient.
    pub coef: Float,
    /// Basis blade.
    pub axes: Axes,
}

impl Neg for Term {
    type Output = Term;

    fn neg(self) -> Self::Output {
        Term {
            coef: -self.coef,
            axes: self.axes,
        }
    }
}
impl Mul<Float> for Term {
    type Output = Term;

    fn mul(self, rhs: Float) -> Self::Output {
        Term {
            coef: self.coef * rhs,
            axes: self.axes,
        }
    }
}

impl Term {
    /// Constructs a scalar term.
    pub const fn scalar(coef: Float) -> Self {
        Self {
            coef,
            axes: Axes::SCALAR,
        }
    }

    /// Returns the grade of the term.
    pub fn grade(self) -> u8 {
        self.axes.grade()
    }

    /// Returns the geometric product of two terms, or `None` if it is zero
    /// because of a degenerate basis vector.
    pub fn geometric_product(layout: &Layout, lhs: Self, rhs: Self) -> Option<Self> {
        let sign = layout.sign_of_geometric_product(lhs.axes, rhs.axes)?;
        Some(Term {
            coef: sign * (lhs.coef * rhs.coef),
            axes: lhs.axes ^ rhs.axes,
        })
    }

    /// Returns the outer product of two terms, or `None` if they share a basis
    /// vector.
    pub fn wedge(lhs: Self, rhs: Self) -> Option<Self> {
        if lhs.axes.intersects(rhs.axes) {
            return None;
        }
        Some(Term {
            coef: Axes::reorder_sign(lhs.axes, rhs.axes) * (lhs.coef * rhs.coef),
            axes: lhs.axes | rhs.axes,
        })
    }

    /// Returns the reverse of the term.
    #[must_use]
    pub fn rev(self) -> Self {
        Term {
            coef: self.axes.sign_of_reverse() * self.coef,
            axes: self.axes,
        }
    }
}
