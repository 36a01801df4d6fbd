//! Operator overloads for [`Multivector`].
//!
//! | operator | product |
//! |---|---|
//! | `a * b` | geometric product |
//! | `a ^ b` | outer (wedge) product |
//! | `a \| b` | inner product (grade `\|r - s\|`) |
//! | `a << b` | left contraction |
//! | `a >> b` | right contraction |
//!
//! All binary operators panic if the operands have different layouts. Use
//! [`Multivector::product()`] for a fallible version.

use std::ops::*;

use super::{Multivector, Term, assert_same_layout};
use crate::{Float, LayoutMismatch};

/// Product derived from the geometric product by keeping only some grades.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Product {
    /// Geometric product
    Geometric,
    /// Outer product: keeps grade `r + s`
    Outer,
    /// Inner product: keeps grade `|r - s|`, and is zero if either operand
    /// is a scalar
    Inner,
    /// Left contraction: keeps grade `s - r`
    LeftContraction,
    /// Right contraction: keeps grade `r - s`
    RightContraction,
    /// Scalar product: keeps grade `0`
    Scalar,
}
impl Product {
    fn keeps(self, lhs_grade: u8, rhs_grade: u8, result_grade: u8) -> bool {
        match self {
            Product::Geometric => true,
            Product::Outer => result_grade == lhs_grade + rhs_grade,
            Product::Inner => {
                lhs_grade != 0 && rhs_grade != 0 && result_grade == lhs_grade.abs_diff(rhs_grade)
            }
            Product::LeftContraction => Some(result_grade) == rhs_grade.checked_sub(lhs_grade),
            Product::RightContraction => Some(result_grade) == lhs_grade.checked_sub(rhs_grade),
            Product::Scalar => result_grade == 0,
        }
    }
}

impl Multivector {
    /// Returns a product of two multivectors, or an error if they have
    /// different layouts.
    pub fn product(product: Product, lhs: &Self, rhs: &Self) -> Result<Self, LayoutMismatch> {
        lhs.check_same_layout(rhs)?;
        let layout = &lhs.layout;
        let mut ret = Self::zero(layout);
        for l in lhs.terms().filter(|t| t.coef != 0.0) {
            for r in rhs.terms().filter(|t| t.coef != 0.0) {
                let Some(term) = Term::geometric_product(layout, l, r) else {
                    continue;
                };
                if product.keeps(l.grade(), r.grade(), term.grade()) {
                    ret[term.axes] += term.coef;
                }
            }
        }
        Ok(ret)
    }

    #[track_caller]
    fn product_or_panic(product: Product, lhs: &Self, rhs: &Self) -> Self {
        assert_same_layout(lhs, rhs);
        match Self::product(product, lhs, rhs) {
            Ok(ret) => ret,
            Err(e) => panic!("{e}"),
        }
    }

    fn zip_with(lhs: &Self, rhs: &Self, f: impl Fn(Float, Float) -> Float) -> Self {
        assert_same_layout(lhs, rhs);
        let mut ret = lhs.clone();
        for (l, &r) in ret.coefficients.iter_mut().zip(&*rhs.coefficients) {
            *l = f(*l, r);
        }
        ret
    }
}

macro_rules! impl_multivector_binop {
    (impl $trait:ident, fn $func:ident, |$l:ident, $r:ident| $body:expr) => {
        impl $trait<&Multivector> for &Multivector {
            type Output = Multivector;

            #[track_caller]
            fn $func(self, rhs: &Multivector) -> Multivector {
                let ($l, $r) = (self, rhs);
                $body
            }
        }
        impl $trait<Multivector> for Multivector {
            type Output = Multivector;

            #[track_caller]
            fn $func(self, rhs: Multivector) -> Multivector {
                $trait::$func(&self, &rhs)
            }
        }
        impl $trait<&Multivector> for Multivector {
            type Output = Multivector;

            #[track_caller]
            fn $func(self, rhs: &Multivector) -> Multivector {
                $trait::$func(&self, rhs)
            }
        }
        impl $trait<Multivector> for &Multivector {
            type Output = Multivector;

            #[track_caller]
            fn $func(self, rhs: Multivector) -> Multivector {
                $trait::$func(self, &rhs)
            }
        }
    };
}

impl_multivector_binop!(impl Add, fn add, |l, r| Multivector::zip_with(l, r, |a, b| a + b));
impl_multivector_binop!(impl Sub, fn sub, |l, r| Multivector::zip_with(l, r, |a, b| a - b));
impl_multivector_binop!(impl Mul, fn mul, |l, r| {
    Multivector::product_or_panic(Product::Geometric, l, r)
});
impl_multivector_binop!(impl BitXor, fn bitxor, |l, r| {
    Multivector::product_or_panic(Product::Outer, l, r)
});
impl_multivector_binop!(impl BitOr, fn bitor, |l, r| {
    Multivector::product_or_panic(Product::Inner, l, r)
});
impl_multivector_binop!(impl Shl, fn shl, |l, r| {
    Multivector::product_or_panic(Product::LeftContraction, l, r)
});
impl_multivector_binop!(impl Shr, fn shr, |l, r| {
    Multivector::product_or_panic(Product::RightContraction, l, r)
});

impl Neg for Multivector {
    type Output = Multivector;

    fn neg(mut self) -> Self::Output {
        self.coefficients.iter_mut().for_each(|x| *x = -*x);
        self
    }
}
impl Neg for &Multivector {
    type Output = Multivector;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

impl Mul<Float> for Multivector {
    type Output = Multivector;

    fn mul(mut self, rhs: Float) -> Self::Output {
        self *= rhs;
        self
    }
}
impl Mul<Float> for &Multivector {
    type Output = Multivector;

    fn mul(self, rhs: Float) -> Self::Output {
        self.clone() * rhs
    }
}
impl Div<Float> for Multivector {
    type Output = Multivector;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn div(self, rhs: Float) -> Self::Output {
        self * (1.0 / rhs)
    }
}
impl Div<Float> for &Multivector {
    type Output = Multivector;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn div(self, rhs: Float) -> Self::Output {
        self * (1.0 / rhs)
    }
}
impl MulAssign<Float> for Multivector {
    fn mul_assign(&mut self, rhs: Float) {
        self.coefficients.iter_mut().for_each(|x| *x *= rhs);
    }
}

/// Adds a scalar.
impl Add<Float> for Multivector {
    type Output = Multivector;

    fn add(mut self, rhs: Float) -> Self::Output {
        self[crate::Axes::SCALAR] += rhs;
        self
    }
}
impl Add<Float> for &Multivector {
    type Output = Multivector;

    fn add(self, rhs: Float) -> Self::Output {
        self.clone() + rhs
    }
}
/// Subtracts a scalar.
impl Sub<Float> for Multivector {
    type Output = Multivector;

    fn sub(self, rhs: Float) -> Self::Output {
        self + -rhs
    }
}

impl AddAssign<&Multivector> for Multivector {
    #[track_caller]
    fn add_assign(&mut self, rhs: &Multivector) {
        *self = &*self + rhs;
    }
}
impl SubAssign<&Multivector> for Multivector {
    #[track_caller]
    fn sub_assign(&mut self, rhs: &Multivector) {
        *self = &*self - rhs;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{BasisVectorIds, Layout, assert_approx_eq};

    fn sta() -> Arc<Layout> {
        Layout::new([1, -1, -1, -1], BasisVectorIds::ordered(["t", "x", "y", "z"])).unwrap()
    }

    #[test]
    fn test_basis_vectors_square_to_metric() {
        let layout = sta();
        let t = layout.basis_vector(0);
        let x = layout.basis_vector(1);
        assert_approx_eq!(&t * &t, layout.scalar(1.0));
        assert_approx_eq!(&x * &x, layout.scalar(-1.0));
    }

    #[test]
    fn test_distinct_basis_vectors_anticommute() {
        let layout = sta();
        let [t, x, y, z] = [0, 1, 2, 3].map(|i| layout.basis_vector(i));
        for (a, b) in [(&t, &x), (&x, &y), (&y, &z), (&t, &z)] {
            assert_approx_eq!(a * b, -(b * a));
            assert_approx_eq!(a ^ b, a * b);
            assert!((a | b).is_zero());
        }
    }

    #[test]
    fn test_contractions() {
        let layout = sta();
        let [t, x, y, _] = [0, 1, 2, 3].map(|i| layout.basis_vector(i));
        let xy = &x ^ &y;
        // x ⌋ (x ∧ y) = x² y = -y
        assert_approx_eq!(&x << &xy, -&y);
        // (x ∧ y) ⌊ y = x y² = -x
        assert_approx_eq!(&xy >> &y, -&x);
        // a bivector cannot contract onto a vector from the left
        assert!((&xy << &x).is_zero());
        assert!((&t << &xy).is_zero());
    }

    #[test]
    fn test_inner_product() {
        let layout = sta();
        let [_, x, y, _] = [0, 1, 2, 3].map(|i| layout.basis_vector(i));
        let xy = &x ^ &y;
        assert_approx_eq!(&x | &xy, -&y);
        assert_approx_eq!(&xy | &x, &y);
        // scalars have no inner product
        let two = layout.scalar(2.0);
        assert!((&two | &x).is_zero());
        assert!((&xy | &two).is_zero());
        assert!((&two | &two).is_zero());
    }

    #[test]
    fn test_scalar_arithmetic() {
        let layout = sta();
        let x = layout.basis_vector(1);
        let y = (&x + 1.0) * 2.0;
        assert_approx_eq!(y.scalar_part(), 2.0);
        assert_approx_eq!(y.get_by_name("ex").unwrap(), 2.0);
        assert_approx_eq!((y / 2.0 - 1.0), x);
    }

    #[test]
    fn test_product_layout_mismatch() {
        let a = sta().basis_vector(0);
        let b = Layout::new([1, 1], BasisVectorIds::Default)
            .unwrap()
            .basis_vector(0);
        assert_eq!(
            Multivector::product(Product::Geometric, &a, &b),
            Err(LayoutMismatch),
        );
    }

    #[test]
    #[should_panic]
    fn test_operator_layout_mismatch_panics() {
        let a = sta().basis_vector(0);
        let b = Layout::new([1, 1], BasisVectorIds::Default)
            .unwrap()
            .basis_vector(0);
        let _ = a * b;
    }
}
