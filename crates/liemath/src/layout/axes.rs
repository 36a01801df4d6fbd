use std::fmt;

use bitflags::bitflags;

use crate::Sign;

bitflags! {
    /// Set of basis vectors for a basis blade.
    ///
    /// Bit `i` is the `i`th basis vector of the layout, so the meaning of an
    /// `Axes` value depends on the layout it is used with.
    #[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct Axes: u16 {
        /// Scalar (no axes)
        const SCALAR = 0;

        const _ = !0;
    }
}

impl fmt::Display for Axes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "1");
        }
        write!(f, "e")?;
        for i in self.indices() {
            write!(f, "[{i}]")?;
        }
        Ok(())
    }
}

impl Axes {
    /// Returns the `i`th basis vector (zero-indexed).
    pub const fn vector(i: u8) -> Self {
        Self::from_bits_retain(1 << i)
    }
    /// Returns the set of all basis vectors in an `ndim`-dimensional layout.
    pub const fn pseudoscalar(ndim: u8) -> Self {
        Self::from_bits_retain(((1_u32 << ndim) - 1) as u16)
    }

    /// Returns the number of basis vectors in the blade.
    pub const fn grade(self) -> u8 {
        self.bits().count_ones() as _
    }

    /// Returns an iterator over the indices of the basis vectors in the blade,
    /// in increasing order.
    pub fn indices(self) -> impl Iterator<Item = u8> {
        let bits = self.bits();
        (0..16_u8).filter(move |&i| bits & (1 << i) != 0)
    }

    /// Returns the sign of the [reverse] of the basis blade.
    ///
    /// [reverse]: https://en.wikipedia.org/wiki/Geometric_algebra#Reversion
    pub fn sign_of_reverse(self) -> Sign {
        // The number of swaps required to reverse a sequence of length n is
        // n*(n-1)/2. This sequence alternates between pairs of even and odd
        // numbers; if its parity is odd, then negate the coefficient.
        match self.grade() % 4 {
            0 | 1 => Sign::Pos,
            _ => Sign::Neg,
        }
    }
    /// Returns the sign of the grade involution of the basis blade.
    pub fn sign_of_involute(self) -> Sign {
        Sign::from_parity(self.grade() % 2 == 1)
    }

    /// Returns the sign introduced by sorting the concatenation of `lhs` and
    /// `rhs` into canonical order, ignoring the metric.
    pub fn reorder_sign(lhs: Self, rhs: Self) -> Sign {
        // For each basis vector in `rhs`, count the basis vectors in `lhs`
        // that it must move past.
        let mut a = lhs.bits() >> 1;
        let b = rhs.bits();
        let mut swaps = 0;
        while a != 0 {
            swaps += (a & b).count_ones();
            a >>= 1;
        }
        Sign::from_parity(swaps % 2 == 1)
    }
}
