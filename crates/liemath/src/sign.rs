//! Positive or negative sign.

use std::ops::{Mul, MulAssign, Neg};

use crate::Float;

/// Positive or negative.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sign {
    /// Positive
    #[default]
    Pos,
    /// Negative
    Neg,
}

impl Neg for Sign {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Sign::Pos => Sign::Neg,
            Sign::Neg => Sign::Pos,
        }
    }
}
impl Mul for Sign {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        match rhs {
            Sign::Pos => self,
            Sign::Neg => -self,
        }
    }
}
impl MulAssign for Sign {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}
impl Mul<Float> for Sign {
    type Output = Float;

    fn mul(self, rhs: Float) -> Self::Output {
        match self {
            Sign::Pos => rhs,
            Sign::Neg => -rhs,
        }
    }
}

impl Sign {
    /// Returns `1.0` or `-1.0`.
    pub fn to_float(self) -> Float {
        self * 1.0
    }
    /// Returns `Neg` if `odd` is true, or `Pos` otherwise.
    pub fn from_parity(odd: bool) -> Self {
        if odd { Sign::Neg } else { Sign::Pos }
    }
    /// Returns all signs.
    pub fn iter() -> impl Iterator<Item = Sign> {
        [Sign::Pos, Sign::Neg].into_iter()
    }
}
