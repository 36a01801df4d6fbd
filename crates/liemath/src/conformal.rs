//! [Conformal geometric algebra](https://en.wikipedia.org/wiki/Conformal_geometric_algebra).

use std::sync::Arc;

use crate::approx_cmp::{is_approx_negative, is_approx_zero, try_div};
use crate::{
    Axes, BasisVectorIds, Float, Layout, LayoutError, LayoutMismatch, Metric, Multivector,
    PointPairError, RoundError, Vector,
};

/// Layout whose last two basis vectors are `e+` (squaring to `+1`) and `e-`
/// (squaring to `-1`).
///
/// The remaining basis vectors are the "base" of the layout. The first
/// [`Self::euclidean_ndim()`] of them are the Euclidean axes used by
/// [`Self::up()`] and [`Self::down()`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConformalLayout {
    layout: Arc<Layout>,
    euclidean_ndim: u8,

    ep: Multivector,
    en: Multivector,
    einf: Multivector,
    eo: Multivector,
}

impl ConformalLayout {
    /// Constructs a conformal layout from a signature, which must end with
    /// `+1, -1`.
    pub fn new(
        signature: impl IntoIterator<Item = i8>,
        ids: BasisVectorIds,
    ) -> Result<Self, LayoutError> {
        let layout = Layout::new(signature, ids)?;
        let ndim = layout.ndim();
        let base_ndim = ndim.checked_sub(2).ok_or(LayoutError::NotConformal)?;
        Self::from_layout(layout, base_ndim)
    }
    /// Constructs the conformal layout for `ndim`-dimensional Euclidean space,
    /// with basis vectors `e1`, ..., `eN`, `ep`, `em`.
    pub fn euclidean(ndim: u8) -> Result<Self, LayoutError> {
        let ids = (1..=ndim)
            .map(|i| i.to_string())
            .chain(["p".to_owned(), "m".to_owned()]);
        Self::new(
            std::iter::repeat_n(1, ndim as usize).chain([1, -1]),
            BasisVectorIds::ordered(ids),
        )
    }
    /// Constructs a conformal layout from an existing layout, using the first
    /// `euclidean_ndim` basis vectors as Euclidean axes.
    pub(crate) fn from_layout(layout: Arc<Layout>, euclidean_ndim: u8) -> Result<Self, LayoutError> {
        let ndim = layout.ndim();
        if ndim < 2 || euclidean_ndim > ndim - 2 {
            return Err(LayoutError::NotConformal);
        }
        if layout.metric(ndim - 2) != Metric::Pos || layout.metric(ndim - 1) != Metric::Neg {
            return Err(LayoutError::NotConformal);
        }

        let ep = layout.basis_vector(ndim - 2);
        let en = layout.basis_vector(ndim - 1);
        let einf = &en + &ep;
        let eo = (&en - &ep) * 0.5;

        Ok(Self {
            layout,
            euclidean_ndim,
            ep,
            en,
            einf,
            eo,
        })
    }

    /// Returns the underlying layout.
    pub fn layout(&self) -> &Arc<Layout> {
        &self.layout
    }
    /// Returns the number of Euclidean axes.
    pub fn euclidean_ndim(&self) -> u8 {
        self.euclidean_ndim
    }
    /// Returns the number of base vectors (every basis vector except `e+` and
    /// `e-`).
    pub fn base_ndim(&self) -> u8 {
        self.layout.ndim() - 2
    }

    /// Returns `e+`, which squares to `+1`.
    pub fn ep(&self) -> &Multivector {
        &self.ep
    }
    /// Returns `e-`, which squares to `-1`.
    pub fn en(&self) -> &Multivector {
        &self.en
    }
    /// Returns the null vector representing the point at infinity: `e- + e+`.
    pub fn einf(&self) -> &Multivector {
        &self.einf
    }
    /// Returns the null vector representing the origin: `(e- - e+) / 2`.
    pub fn eo(&self) -> &Multivector {
        &self.eo
    }
    /// Returns the Minkowski plane `einf ∧ eo`.
    pub fn e0_bivector(&self) -> Multivector {
        &self.einf ^ &self.eo
    }
    /// Returns the pseudoscalar of the base vectors.
    pub fn base_pseudoscalar(&self) -> Multivector {
        Multivector::from_axes(&self.layout, Axes::pseudoscalar(self.base_ndim()), 1.0)
    }

    /// Returns the Euclidean vector `x` as a grade-1 multivector.
    pub fn vector(&self, x: &Vector) -> Result<Multivector, RoundError> {
        if x.ndim() > self.euclidean_ndim {
            return Err(RoundError::TooManyDimensions {
                max: self.euclidean_ndim,
                got: x.ndim(),
            });
        }
        Multivector::from_vector(&self.layout, x).ok_or(RoundError::TooManyDimensions {
            max: self.euclidean_ndim,
            got: x.ndim(),
        })
    }
    /// Returns the Euclidean components of a multivector, ignoring every
    /// other component.
    pub fn euclidean_part(&self, x: &Multivector) -> Vector {
        (0..self.euclidean_ndim)
            .map(|i| x[Axes::vector(i)])
            .collect()
    }

    /// Embeds a Euclidean point as a null vector: `x + x²/2 einf + eo`.
    pub fn up(&self, x: &Vector) -> Result<Multivector, RoundError> {
        Ok(self.vector(x)? + &self.einf * (x.mag2() / 2.0) + &self.eo)
    }
    /// Scales a point so that its inner product with `einf` is `-1`, or
    /// returns `None` if the point is at infinity.
    pub fn homo(&self, x: &Multivector) -> Option<Multivector> {
        let weight = -Multivector::scalar_product(x, &self.einf);
        try_div(1.0, weight).map(|mult| x * mult)
    }
    /// Extracts the Euclidean point represented by a null vector, or returns
    /// `None` if the point is at infinity.
    ///
    /// For a dual round, this returns its center.
    pub fn down(&self, x: &Multivector) -> Option<Vector> {
        Some(self.euclidean_part(&self.homo(x)?))
    }

    /// Returns the inner product of two vectors.
    pub fn dot(&self, a: &Multivector, b: &Multivector) -> Float {
        Multivector::scalar_product(a, b)
    }

    /// Splits a point pair into its two ends, trying `einf` first and then
    /// each basis vector. See [`crate::LieLayout::pp_ends()`].
    pub fn pp_ends(&self, pp: &Multivector) -> Result<[Multivector; 2], PointPairError> {
        if pp.layout() != &self.layout {
            return Err(LayoutMismatch.into());
        }
        let candidates = std::iter::once(self.einf.clone()).chain(self.layout.basis_vectors());
        split_point_pair(pp, candidates)
    }
}

/// Splits a point pair into two null vectors using the projectors
/// `(1 ± F) / 2`, where `F` is the normalized point pair.
///
/// Each candidate `v` gives ends `P (v ⌋ pp)` and `~P (v ⌋ pp)`; the first
/// candidate for which neither end vanishes is used.
pub(crate) fn split_point_pair(
    pp: &Multivector,
    candidates: impl IntoIterator<Item = Multivector>,
) -> Result<[Multivector; 2], PointPairError> {
    if pp.is_zero() {
        return Err(PointPairError::Zero);
    }
    if !(pp - pp.grade_project(2)).is_zero() {
        return Err(PointPairError::NotBivector);
    }

    let pp = pp.normalize_max();
    let square = (&pp * &pp).scalar_part();
    log::trace!("point pair {pp} squares to {square}");
    if is_approx_zero(square) {
        return Err(PointPairError::Tangent);
    }
    if is_approx_negative(square) {
        return Err(PointPairError::Imaginary);
    }

    let f = pp.normal().ok_or(PointPairError::Tangent)?;
    let p = (&f + 1.0) * 0.5;
    let p_rev = p.rev();

    for v in candidates {
        let c = &v << &pp;
        let a = (&p * &c).grade_project(1);
        let b = (&p_rev * &c).grade_project(1);
        if !a.is_zero() && !b.is_zero() {
            return Ok([a, b]);
        }
        log::trace!("point pair ends vanish for {v}; trying another vector");
    }

    Err(PointPairError::Tangent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::approx_cmp::approx_eq;
    use crate::{assert_approx_eq, vector};

    #[test]
    fn test_conformal_basis() {
        let cga = ConformalLayout::euclidean(3).unwrap();
        let einf = cga.einf();
        let eo = cga.eo();
        assert_approx_eq!(cga.dot(einf, einf), 0.0);
        assert_approx_eq!(cga.dot(eo, eo), 0.0);
        assert_approx_eq!(cga.dot(einf, eo), -1.0);
        let e0 = cga.e0_bivector();
        assert_approx_eq!(&e0 * &e0, cga.layout().scalar(1.0));
        assert_eq!(cga.layout().blade_name(Axes::vector(3)), "ep");
    }

    #[test]
    fn test_up_is_null_and_down_inverts_it() {
        let cga = ConformalLayout::euclidean(3).unwrap();
        let x = vector![1.0, -2.0, 3.0];
        let p = cga.up(&x).unwrap();
        assert_approx_eq!(cga.dot(&p, &p), 0.0);
        assert_approx_eq!(cga.down(&p).unwrap(), x);
        assert_approx_eq!(cga.down(&(p * -3.0)).unwrap(), x);
        assert_eq!(cga.down(cga.einf()), None);
    }

    #[test]
    fn test_up_distance() {
        let cga = ConformalLayout::euclidean(2).unwrap();
        let a = cga.up(&vector![1.0, 1.0]).unwrap();
        let b = cga.up(&vector![4.0, 5.0]).unwrap();
        // -2 A·B = |a - b|²
        assert_approx_eq!(-2.0 * cga.dot(&a, &b), 25.0);
    }

    #[test]
    fn test_pp_ends() {
        let cga = ConformalLayout::euclidean(3).unwrap();
        let a = vector![0.0, 1.0, 2.0];
        let b = vector![3.0, -1.0, 0.5];
        let pp = cga.up(&a).unwrap() ^ cga.up(&b).unwrap();
        let [x, y] = cga.pp_ends(&pp).unwrap().map(|end| cga.down(&end).unwrap());
        assert!(
            (approx_eq(&x, &a) && approx_eq(&y, &b)) || (approx_eq(&x, &b) && approx_eq(&y, &a)),
        );

        // a point with the point at infinity
        let flat_point = cga.up(&a).unwrap() ^ cga.einf();
        let ends = cga.pp_ends(&flat_point).unwrap();
        assert!(ends.iter().any(|end| cga.down(end).is_none()));
    }

    #[test]
    fn test_conformal_layout_errors() {
        assert_eq!(
            ConformalLayout::new([1, 1, 1], BasisVectorIds::Default),
            Err(LayoutError::NotConformal),
        );
        assert_eq!(
            ConformalLayout::new([1], BasisVectorIds::Default),
            Err(LayoutError::NotConformal),
        );
        assert_eq!(
            ConformalLayout::euclidean(2).unwrap().up(&vector![1.0, 2.0, 3.0]),
            Err(RoundError::TooManyDimensions { max: 2, got: 3 }),
        );
    }
}
