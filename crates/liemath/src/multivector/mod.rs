//! Multivectors in an arbitrary [`Layout`].

use std::fmt;
use std::ops::{Index, IndexMut};
use std::sync::Arc;

use itertools::Itertools;

mod ops;
mod term;

pub use ops::Product;
pub use term::Term;

use crate::approx_cmp::{is_approx_nonzero, is_approx_zero, try_div};
use crate::{Axes, EPSILON, Float, Layout, LayoutMismatch, Vector};

/// Element of a Clifford algebra: a sum of scaled basis blades.
///
/// Every multivector is bound to a [`Layout`]. The coefficients are stored
/// densely, indexed by the bits of [`Axes`].
#[derive(Clone, PartialEq)]
pub struct Multivector {
    layout: Arc<Layout>,
    coefficients: Box<[Float]>,
}

impl fmt::Debug for Multivector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Multivector({self})")
    }
}

impl fmt::Display for Multivector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut is_first = true;
        for term in self.nonzero_terms() {
            let coef = term.coef;
            match (is_first, coef < 0.0) {
                (true, false) => (),
                (true, true) => write!(f, "-")?,
                (false, false) => write!(f, " + ")?,
                (false, true) => write!(f, " - ")?,
            }
            is_first = false;

            if term.axes.is_empty() {
                write!(f, "{}", coef.abs())?;
            } else {
                write!(f, "{} {}", coef.abs(), self.layout.blade_name(term.axes))?;
            }
        }
        if is_first {
            write!(f, "0")?;
        }
        Ok(())
    }
}

impl approx::AbsDiffEq for Multivector {
    type Epsilon = Float;

    fn default_epsilon() -> Self::Epsilon {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.layout == other.layout
            && std::iter::zip(&self.coefficients, &other.coefficients)
                .all(|(l, r)| (l - r).abs() <= epsilon)
    }
}

impl Index<Axes> for Multivector {
    type Output = Float;

    fn index(&self, index: Axes) -> &Self::Output {
        &self.coefficients[index.bits() as usize]
    }
}
impl IndexMut<Axes> for Multivector {
    fn index_mut(&mut self, index: Axes) -> &mut Self::Output {
        &mut self.coefficients[index.bits() as usize]
    }
}

impl Multivector {
    /// Constructs the zero multivector.
    pub fn zero(layout: &Arc<Layout>) -> Self {
        Self {
            layout: Arc::clone(layout),
            coefficients: vec![0.0; layout.blade_count()].into_boxed_slice(),
        }
    }
    /// Constructs a scalar.
    pub fn scalar(layout: &Arc<Layout>, x: Float) -> Self {
        Self::from_axes(layout, Axes::SCALAR, x)
    }
    /// Constructs a multivector with a single scaled basis blade.
    pub fn from_axes(layout: &Arc<Layout>, axes: Axes, coef: Float) -> Self {
        let mut ret = Self::zero(layout);
        ret[axes] = coef;
        ret
    }
    /// Constructs a multivector from a sum of terms.
    pub fn from_terms(layout: &Arc<Layout>, terms: impl IntoIterator<Item = Term>) -> Self {
        let mut ret = Self::zero(layout);
        for term in terms {
            ret[term.axes] += term.coef;
        }
        ret
    }
    /// Constructs a grade-1 multivector using the components of `v` as the
    /// coefficients of the first basis vectors.
    ///
    /// Returns `None` if `v` has more components than the layout has basis
    /// vectors.
    pub fn from_vector(layout: &Arc<Layout>, v: &Vector) -> Option<Self> {
        if v.ndim() > layout.ndim() {
            return None;
        }
        Some(Self::from_terms(
            layout,
            v.iter().enumerate().map(|(i, x)| Term {
                coef: x,
                axes: Axes::vector(i as u8),
            }),
        ))
    }

    /// Returns the layout of the multivector.
    pub fn layout(&self) -> &Arc<Layout> {
        &self.layout
    }
    /// Returns the number of basis vectors in the layout.
    pub fn ndim(&self) -> u8 {
        self.layout.ndim()
    }
    /// Returns an error if `self` and `other` have different layouts.
    pub fn check_same_layout(&self, other: &Self) -> Result<(), LayoutMismatch> {
        if Arc::ptr_eq(&self.layout, &other.layout) || self.layout == other.layout {
            Ok(())
        } else {
            Err(LayoutMismatch)
        }
    }

    /// Returns the coefficient of a basis blade given by name, such as `e12`
    /// or `e1^np1`, accounting for the order of the basis vectors in the
    /// name.
    pub fn get_by_name(&self, name: &str) -> Option<Float> {
        let (axes, sign) = self.layout.axes_from_name(name)?;
        Some(sign * self[axes])
    }
    /// Returns the coefficients, indexed by the bits of [`Axes`].
    pub fn coefficients(&self) -> &[Float] {
        &self.coefficients
    }
    /// Returns the scalar component.
    pub fn scalar_part(&self) -> Float {
        self[Axes::SCALAR]
    }

    /// Returns an iterator over all terms in canonical order.
    pub fn terms(&self) -> impl '_ + Clone + Iterator<Item = Term> {
        self.layout.blades().iter().map(|&axes| Term {
            coef: self[axes],
            axes,
        })
    }
    /// Returns an iterator over the terms that are approximately nonzero, in
    /// canonical order.
    pub fn nonzero_terms(&self) -> impl '_ + Clone + Iterator<Item = Term> {
        self.terms().filter(|term| is_approx_nonzero(term.coef))
    }
    /// Returns whether every coefficient is approximately zero.
    pub fn is_zero(&self) -> bool {
        self.coefficients.iter().all(|&x| is_approx_zero(x))
    }

    /// Returns the part of the multivector with grade `grade`.
    #[must_use]
    pub fn grade_project(&self, grade: u8) -> Self {
        let mut ret = self.clone();
        for (i, x) in ret.coefficients.iter_mut().enumerate() {
            if (i as u16).count_ones() != grade as u32 {
                *x = 0.0;
            }
        }
        ret
    }
    /// Returns the grades with approximately nonzero components, in
    /// increasing order.
    pub fn grades(&self) -> Vec<u8> {
        self.nonzero_terms()
            .map(|term| term.grade())
            .dedup()
            .collect()
    }
    /// Returns the grade of the multivector if it is homogeneous. Zero has no
    /// grade.
    pub fn grade(&self) -> Option<u8> {
        self.grades().into_iter().exactly_one().ok()
    }

    /// Returns the [reverse] of the multivector, written `~x`.
    ///
    /// [reverse]: https://en.wikipedia.org/wiki/Geometric_algebra#Reversion
    #[must_use]
    pub fn rev(&self) -> Self {
        self.map_terms(|axes| axes.sign_of_reverse().to_float())
    }
    /// Returns the grade involution of the multivector.
    #[must_use]
    pub fn involute(&self) -> Self {
        self.map_terms(|axes| axes.sign_of_involute().to_float())
    }
    /// Returns the Clifford conjugate of the multivector: the reverse of the
    /// grade involution.
    #[must_use]
    pub fn conjugate(&self) -> Self {
        self.map_terms(|axes| (axes.sign_of_involute() * axes.sign_of_reverse()).to_float())
    }
    fn map_terms(&self, mut factor: impl FnMut(Axes) -> Float) -> Self {
        let mut ret = self.clone();
        for &axes in self.layout.blades() {
            ret[axes] *= factor(axes);
        }
        ret
    }

    /// Returns the scalar part of `x ~x`, which is the squared magnitude for
    /// Euclidean signatures and may be negative otherwise.
    pub fn mag2(&self) -> Float {
        Self::scalar_product(self, &self.rev())
    }
    /// Returns the square root of the absolute value of [`Self::mag2()`].
    pub fn abs(&self) -> Float {
        self.mag2().abs().sqrt()
    }
    /// Returns the multivector scaled so that [`Self::abs()`] is one, or
    /// `None` if it is approximately zero.
    #[must_use]
    pub fn normal(&self) -> Option<Self> {
        let abs = self.abs();
        is_approx_nonzero(abs).then(|| self / abs)
    }
    /// Returns the multivector scaled so that its largest coefficient has
    /// absolute value one. Zero is returned unchanged.
    ///
    /// Unlike [`Self::normal()`], this works for null multivectors.
    #[must_use]
    pub fn normalize_max(&self) -> Self {
        let max = self
            .coefficients
            .iter()
            .map(|x| x.abs())
            .fold(0.0, Float::max);
        if max == 0.0 { self.clone() } else { self / max }
    }

    /// Returns the scalar part of the geometric product of `lhs` and `rhs`,
    /// without computing the rest of the product.
    ///
    /// # Panics
    ///
    /// Panics if the multivectors have different layouts.
    pub fn scalar_product(lhs: &Self, rhs: &Self) -> Float {
        assert_same_layout(lhs, rhs);
        let layout = &lhs.layout;
        layout
            .blades()
            .iter()
            .filter_map(|&axes| {
                let sign = layout.sign_of_geometric_product(axes, axes)?;
                Some(sign * (lhs[axes] * rhs[axes]))
            })
            .sum()
    }

    /// Returns the inverse of the multivector, or `None` if it is not
    /// invertible.
    ///
    /// Blades and versors are inverted directly as `~x / (x ~x)`. Other
    /// multivectors are inverted by solving a linear system with one row per
    /// basis blade.
    #[must_use]
    pub fn inverse(&self) -> Option<Self> {
        let rev = self.rev();
        let product = self * &rev;
        if product.grade_project(0).abs_diff_eq_default(&product) {
            let denom = product.scalar_part();
            return try_div(1.0, denom).map(|mult| rev * mult);
        }
        self.general_inverse()
    }
    fn general_inverse(&self) -> Option<Self> {
        let layout = &self.layout;
        let n = layout.blade_count();

        // Column `j` of `m` is `self * e_j`, so `m * x = 1` gives `self * x = 1`.
        let mut m = vec![vec![0.0; n + 1]; n];
        for j in 0..n {
            let rhs = Axes::from_bits_retain(j as u16);
            for &lhs in layout.blades() {
                let coef = self[lhs];
                if coef == 0.0 {
                    continue;
                }
                if let Some(sign) = layout.sign_of_geometric_product(lhs, rhs) {
                    m[(lhs ^ rhs).bits() as usize][j] += sign * coef;
                }
            }
        }
        m[0][n] = 1.0;

        // Gaussian elimination with partial pivoting
        for col in 0..n {
            let pivot = (col..n).max_by(|&a, &b| m[a][col].abs().total_cmp(&m[b][col].abs()))?;
            if is_approx_zero(m[pivot][col]) {
                log::trace!("singular multivector {self}");
                return None;
            }
            m.swap(col, pivot);
            let p = m[col][col];
            for x in &mut m[col][col..] {
                *x /= p;
            }
            for row in 0..n {
                if row != col {
                    let factor = m[row][col];
                    if factor != 0.0 {
                        for k in col..=n {
                            let delta = factor * m[col][k];
                            m[row][k] -= delta;
                        }
                    }
                }
            }
        }

        let mut ret = Self::zero(layout);
        ret.coefficients
            .iter_mut()
            .zip(&m)
            .for_each(|(x, row)| *x = row[n]);
        Some(ret)
    }

    /// Returns the dual of the multivector: `x I⁻¹`, where `I` is the unit
    /// pseudoscalar. Returns `None` if the pseudoscalar is not invertible
    /// (when some basis vector squares to zero).
    #[must_use]
    pub fn dual(&self) -> Option<Self> {
        Some(self * self.layout.pseudoscalar().inverse()?)
    }
    /// Inverts [`Self::dual()`]: `x I`.
    #[must_use]
    pub fn undual(&self) -> Self {
        self * self.layout.pseudoscalar()
    }

    /// Returns the geometric product of every multivector in an iterator, or
    /// the scalar `1` if the iterator is empty.
    pub fn mul_all(layout: &Arc<Layout>, iter: impl IntoIterator<Item = Self>) -> Self {
        iter.into_iter()
            .fold(Self::scalar(layout, 1.0), |acc, x| acc * x)
    }
    /// Returns the outer product of every multivector in an iterator, or the
    /// scalar `1` if the iterator is empty.
    pub fn wedge_all(layout: &Arc<Layout>, iter: impl IntoIterator<Item = Self>) -> Self {
        iter.into_iter()
            .fold(Self::scalar(layout, 1.0), |acc, x| acc ^ x)
    }

    fn abs_diff_eq_default(&self, other: &Self) -> bool {
        approx::AbsDiffEq::abs_diff_eq(self, other, EPSILON)
    }
}

/// Panics if two multivectors have different layouts.
#[track_caller]
pub(crate) fn assert_same_layout(lhs: &Multivector, rhs: &Multivector) {
    if let Err(e) = lhs.check_same_layout(rhs) {
        panic!("{e}: {} and {}", lhs.layout, rhs.layout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BasisVectorIds, assert_approx_eq};

    fn g3() -> Arc<Layout> {
        Layout::new([1, 1, 1], BasisVectorIds::Default).unwrap()
    }

    #[test]
    fn test_multivector_display() {
        let layout = g3();
        let x = layout.scalar(2.0) - layout.basis_vector(0) * 1.5
            + layout.blade_by_name("e21").unwrap();
        assert_eq!(x.to_string(), "2 - 1.5 e1 - 1 e12");
        assert_eq!(layout.zero().to_string(), "0");
    }

    #[test]
    fn test_multivector_grades() {
        let layout = g3();
        let [e1, e2, e3] = [0, 1, 2].map(|i| layout.basis_vector(i));
        let x = &e1 + (&e2 ^ &e3);
        assert_eq!(x.grades(), vec![1, 2]);
        assert_eq!(x.grade(), None);
        assert_eq!(x.grade_project(2).grade(), Some(2));
        assert_eq!(layout.zero().grade(), None);
    }

    #[test]
    fn test_multivector_rev_and_involute() {
        let layout = g3();
        let e12 = layout.blade_by_name("e12").unwrap();
        let e1 = layout.basis_vector(0);
        assert_approx_eq!(e12.rev(), -&e12);
        assert_approx_eq!(e1.involute(), -&e1);
        assert_approx_eq!(e12.conjugate(), -&e12);
    }

    #[test]
    fn test_multivector_versor_inverse() {
        let layout = g3();
        let [e1, e2, _] = [0, 1, 2].map(|i| layout.basis_vector(i));
        let v = &e1 * 3.0 + &e2 * 4.0;
        let inv = v.inverse().unwrap();
        assert_approx_eq!(&v * &inv, layout.scalar(1.0));
    }

    #[test]
    fn test_multivector_general_inverse() {
        let layout = g3();
        // 2 + e1 is not a versor, but it is invertible: (2 - e1) / 3
        let x = layout.scalar(2.0) + layout.basis_vector(0);
        let inv = x.inverse().unwrap();
        assert_approx_eq!(inv, (layout.scalar(2.0) - layout.basis_vector(0)) / 3.0);

        // 1 + e1 squares to 2(1 + e1), so it is a zero divisor.
        let y = layout.scalar(1.0) + layout.basis_vector(0);
        assert_eq!(y.inverse(), None);
    }

    #[test]
    fn test_multivector_dual() {
        let layout = g3();
        let e3 = layout.basis_vector(2);
        let e12 = layout.blade_by_name("e12").unwrap();
        // e3 I⁻¹ = e3 (-e123) = -e12
        assert_approx_eq!(e3.dual().unwrap(), -&e12);
        assert_approx_eq!(e3.dual().unwrap().undual(), e3);
    }
}
