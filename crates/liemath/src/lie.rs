//! [Lie sphere geometry](https://en.wikipedia.org/wiki/Lie_sphere_geometry)
//! as an augmented conformal layout.
//!
//! The augmented layout has one extra basis vector `enp1` squaring to `-1`.
//! An oriented round with unit dual `x` embeds as the null vector
//! `x + enp1`, and two oriented rounds are in oriented contact exactly when
//! their embeddings are orthogonal.

use std::sync::Arc;

use crate::approx_cmp::is_approx_zero;
use crate::conformal::split_point_pair;
use crate::{
    Axes, BasisTransform, BasisVectorIds, ConformalLayout, Float, Layout, LayoutError,
    LayoutMismatch, MAX_NDIM, Multivector, PointPairError, Round, RoundError, Vector,
};

/// Name of the extra basis vector.
pub const ENP1_ID: &str = "np1";

/// Conformal layout augmented with an extra basis vector `enp1` squaring to
/// `-1`, placed just before `e+` and `e-`.
///
/// For `ndim` Euclidean dimensions, the signature is `[+1; ndim]`, `-1`,
/// `+1`, `-1` and the basis vectors are named `1`, ..., `ndim`, `np1`, `p`,
/// `m`.
#[derive(Debug, Clone, PartialEq)]
pub struct LieLayout {
    ndim: u8,
    layout: ConformalLayout,
    enp1: Multivector,

    conformal_base: ConformalLayout,
    to_conformal: BasisTransform,
    to_augmented: BasisTransform,
}

impl LieLayout {
    /// Constructs the augmented layout for `ndim`-dimensional Euclidean
    /// space.
    pub fn new(ndim: u8) -> Result<Self, LayoutError> {
        let total = ndim as usize + 3;
        if total > MAX_NDIM as usize {
            return Err(LayoutError::TooManyDimensions(total));
        }

        let ids = (1..=ndim)
            .map(|i| i.to_string())
            .chain([ENP1_ID, "p", "m"].map(str::to_owned));
        let signature = std::iter::repeat_n(1, ndim as usize).chain([-1, 1, -1]);
        let augmented = Layout::new(signature, BasisVectorIds::ordered(ids))?;
        let layout = ConformalLayout::from_layout(augmented, ndim)?;
        let enp1 = layout.layout().basis_vector(ndim);

        let conformal_base = ConformalLayout::euclidean(ndim)?;
        let to_conformal =
            BasisTransform::between_basis_vectors(layout.layout(), conformal_base.layout())?;
        let to_augmented =
            BasisTransform::between_basis_vectors(conformal_base.layout(), layout.layout())?;

        log::trace!("constructed Lie layout {}", layout.layout());

        Ok(Self {
            ndim,
            layout,
            enp1,
            conformal_base,
            to_conformal,
            to_augmented,
        })
    }
    /// Constructs the augmented layout for the Euclidean plane.
    pub fn n2() -> Result<Self, LayoutError> {
        Self::new(2)
    }
    /// Constructs the augmented layout for 3D Euclidean space.
    pub fn n3() -> Result<Self, LayoutError> {
        Self::new(3)
    }

    /// Returns the number of Euclidean dimensions.
    pub fn ndim(&self) -> u8 {
        self.ndim
    }
    /// Returns the augmented layout.
    pub fn layout(&self) -> &ConformalLayout {
        &self.layout
    }
    /// Returns the underlying Clifford layout of the augmented layout.
    pub fn algebra(&self) -> &Arc<Layout> {
        self.layout.layout()
    }
    /// Returns the conformal layout without `enp1`.
    pub fn conformal_base(&self) -> &ConformalLayout {
        &self.conformal_base
    }
    /// Returns the extra basis vector, which squares to `-1`.
    pub fn enp1(&self) -> &Multivector {
        &self.enp1
    }
    /// Returns `einf` in the augmented layout.
    pub fn einf(&self) -> &Multivector {
        self.layout.einf()
    }
    /// Returns `eo` in the augmented layout.
    pub fn eo(&self) -> &Multivector {
        self.layout.eo()
    }

    /// Projects a multivector from the augmented layout onto the conformal
    /// layout, dropping every blade that contains `enp1`.
    pub fn to_conformal(&self, x: &Multivector) -> Result<Multivector, LayoutMismatch> {
        self.to_conformal.apply(x)
    }
    /// Includes a multivector from the conformal layout in the augmented
    /// layout.
    pub fn to_augmented(&self, x: &Multivector) -> Result<Multivector, LayoutMismatch> {
        self.to_augmented.apply(x)
    }

    /// Embeds a Euclidean point as a null vector in the augmented layout.
    pub fn up(&self, x: &Vector) -> Result<Multivector, RoundError> {
        self.layout.up(x)
    }
    /// Extracts the Euclidean point represented by a null vector.
    pub fn down(&self, x: &Multivector) -> Option<Vector> {
        self.layout.down(x)
    }

    /// Returns the dual of a sphere with signed radius `radius`:
    /// `(up(center) - radius²/2 einf) / radius`.
    ///
    /// The result squares to `1`. Negating the radius negates the result,
    /// which reverses the orientation of the sphere.
    pub fn dual_round(&self, center: &Vector, radius: Float) -> Result<Multivector, RoundError> {
        Round::sphere(center.clone(), radius).to_dual(&self.layout)
    }
    /// Returns the dual of the plane `{x : normal · x = distance}`, which
    /// squares to `1`.
    pub fn dual_plane(&self, normal: &Vector, distance: Float) -> Result<Multivector, RoundError> {
        Round::plane(normal.clone(), distance)?.to_dual(&self.layout)
    }

    /// Lifts a unit dual round onto the Lie quadric: `x + enp1`.
    ///
    /// # Panics
    ///
    /// Panics if `x` is not in the augmented layout.
    pub fn ups(&self, x: &Multivector) -> Multivector {
        x + &self.enp1
    }
    /// Normalizes the sign of a Lie vector so that its `enp1` coefficient is
    /// nonnegative.
    ///
    /// # Panics
    ///
    /// Panics if `x` is not in the augmented layout.
    pub fn downs(&self, x: &Multivector) -> Multivector {
        if self.lie_product(x, &self.enp1) > 0.0 {
            -x
        } else {
            x.clone()
        }
    }

    /// Returns the inner product of two vectors in the augmented layout.
    ///
    /// For two Lie spheres, this is zero exactly when they are in oriented
    /// contact.
    pub fn lie_product(&self, a: &Multivector, b: &Multivector) -> Float {
        Multivector::scalar_product(a, b)
    }

    /// Embeds an oriented round in the Lie quadric.
    pub fn to_lie(&self, round: &Round) -> Result<Multivector, RoundError> {
        if round.ndim() > self.ndim {
            return Err(RoundError::TooManyDimensions {
                max: self.ndim,
                got: round.ndim(),
            });
        }
        match round {
            Round::Point(p) => self.up(p),
            _ => Ok(self.ups(&round.to_dual(&self.layout)?)),
        }
    }
    /// Decodes a vector in the Lie quadric as an oriented round.
    ///
    /// Any nonzero multiple of a Lie vector decodes to the same round. A null
    /// vector with no `enp1` component decodes to a point.
    pub fn from_lie(&self, x: &Multivector) -> Result<Round, RoundError> {
        if x.layout() != self.algebra() {
            return Err(LayoutMismatch.into());
        }
        if x.is_zero() || !(x - x.grade_project(1)).is_zero() {
            return Err(RoundError::NotLieSphere);
        }
        let x = self.downs(&x.normalize_max());
        if !is_approx_zero(self.lie_product(&x, &x)) {
            return Err(RoundError::NotLieSphere);
        }

        let coef = x[Axes::vector(self.ndim)];
        if is_approx_zero(coef) {
            let point = self.down(&x).ok_or(RoundError::NotLieSphere)?;
            return Ok(Round::Point(point));
        }

        let dual = self.to_conformal(&(x / coef - &self.enp1))?;
        Round::from_dual(&self.conformal_base, &dual).ok_or(RoundError::NotLieSphere)
    }

    /// Splits a point pair into its two ends, which are null vectors.
    ///
    /// With `F` the normalized point pair and `P = (1 + F) / 2`, the ends are
    /// `P (v ⌋ pp)` and `~P (v ⌋ pp)` for some vector `v`. This uses `einf`
    /// when possible and falls back to `enp1` and then to each basis vector
    /// when either end vanishes.
    ///
    /// Each end is determined only up to a scale factor.
    pub fn pp_ends(&self, pp: &Multivector) -> Result<[Multivector; 2], PointPairError> {
        if pp.layout() != self.algebra() {
            return Err(LayoutMismatch.into());
        }
        let candidates = [self.einf().clone(), self.enp1.clone()]
            .into_iter()
            .chain(self.algebra().basis_vectors());
        split_point_pair(pp, candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::approx_cmp::is_approx_negative;
    use crate::{assert_approx_eq, vector};

    #[test]
    fn test_lie_layout_signature() {
        let lie = LieLayout::n2().unwrap();
        let layout = lie.algebra();
        assert_eq!(layout.ndim(), 5);
        assert_eq!(layout.basis_names(), ["1", "2", "np1", "p", "m"]);
        assert_approx_eq!(lie.lie_product(lie.enp1(), lie.enp1()), -1.0);
        assert_approx_eq!(lie.lie_product(lie.einf(), lie.eo()), -1.0);
        assert_approx_eq!(lie.lie_product(lie.einf(), lie.enp1()), 0.0);

        assert_eq!(
            lie.conformal_base().layout().basis_names(),
            ["1", "2", "p", "m"],
        );
        assert_eq!(
            LieLayout::new(MAX_NDIM),
            Err(LayoutError::TooManyDimensions(MAX_NDIM as usize + 3)),
        );
    }

    #[test]
    fn test_ups_is_null() {
        let lie = LieLayout::n3().unwrap();
        let s = lie.dual_round(&vector![1.0, 2.0, 3.0], -0.5).unwrap();
        assert_approx_eq!(lie.lie_product(&s, &s), 1.0);
        let l = lie.ups(&s);
        assert_approx_eq!(lie.lie_product(&l, &l), 0.0);

        let plane = lie.ups(&lie.dual_plane(&vector![0.0, 0.0, 2.0], 1.0).unwrap());
        assert_approx_eq!(lie.lie_product(&plane, &plane), 0.0);

        assert_eq!(
            lie.dual_round(&vector![1.0], 0.0),
            Err(RoundError::ZeroRadius),
        );
    }

    #[test]
    fn test_downs_normalizes_sign() {
        let lie = LieLayout::n2().unwrap();
        let l = lie.ups(&lie.dual_round(&vector![1.0, 1.0], 2.0).unwrap());
        assert_approx_eq!(lie.downs(&l), l);
        assert_approx_eq!(lie.downs(&(&l * -3.0)), &l * 3.0);
    }

    #[test]
    fn test_lie_product_detects_oriented_contact() {
        let lie = LieLayout::n2().unwrap();
        let a = lie.to_lie(&Round::sphere(vector![0.0, 0.0], 2.0)).unwrap();
        let inside = lie.to_lie(&Round::sphere(vector![1.0, 0.0], 1.0)).unwrap();
        let outside = lie.to_lie(&Round::sphere(vector![3.0, 0.0], 1.0)).unwrap();
        let outside_flipped = lie.to_lie(&Round::sphere(vector![3.0, 0.0], -1.0)).unwrap();
        assert_approx_eq!(lie.lie_product(&a, &inside), 0.0);
        assert!(is_approx_negative(lie.lie_product(&a, &outside)));
        assert_approx_eq!(lie.lie_product(&a, &outside_flipped), 0.0);

        let line = Round::plane(vector![0.0, 1.0], -2.0).unwrap();
        assert_approx_eq!(lie.lie_product(&a, &lie.to_lie(&line).unwrap()), 0.0);
    }

    #[test]
    fn test_from_lie_inverts_to_lie() {
        let lie = LieLayout::n3().unwrap();
        let rounds = [
            Round::sphere(vector![1.0, -1.0, 0.5], 0.75),
            Round::sphere(vector![1.0, -1.0, 0.5], -0.75),
            Round::plane(vector![1.0, 1.0, 0.0], 3.0).unwrap(),
            Round::Point(vector![4.0, 0.0, -2.0]),
        ];
        for round in rounds {
            let l = lie.to_lie(&round).unwrap();
            assert_approx_eq!(lie.from_lie(&l).unwrap(), round);
            assert_approx_eq!(lie.from_lie(&(l * -0.25)).unwrap(), round);
        }
    }

    #[test]
    fn test_from_lie_rejects_non_null() {
        let lie = LieLayout::n2().unwrap();
        let s = lie.dual_round(&vector![0.0, 0.0], 1.0).unwrap();
        assert_eq!(lie.from_lie(&s), Err(RoundError::NotLieSphere));
        let other = LieLayout::n3().unwrap();
        assert_eq!(
            lie.from_lie(other.enp1()),
            Err(RoundError::LayoutMismatch(LayoutMismatch)),
        );
    }

    #[test]
    fn test_conformal_roundtrip() {
        let lie = LieLayout::n2().unwrap();
        let p = lie.conformal_base().up(&vector![2.0, 3.0]).unwrap();
        let augmented = lie.to_augmented(&p).unwrap();
        assert_approx_eq!(augmented, lie.up(&vector![2.0, 3.0]).unwrap());
        assert_approx_eq!(lie.to_conformal(&(&augmented + lie.enp1())).unwrap(), p);
    }

    #[test]
    fn test_pp_ends_recovers_points() {
        let lie = LieLayout::n2().unwrap();
        let a = lie.up(&vector![1.0, 2.0]).unwrap();
        let b = lie.up(&vector![-3.0, 0.5]).unwrap();
        let pp = (&a ^ &b) * 4.0;

        let ends = lie.pp_ends(&pp).unwrap();
        let mut downs = ends.each_ref().map(|end| lie.down(end).unwrap());
        if downs[0].get(0) > downs[1].get(0) {
            downs.swap(0, 1);
        }
        assert_approx_eq!(downs[0], vector![-3.0, 0.5]);
        assert_approx_eq!(downs[1], vector![1.0, 2.0]);
        for end in &ends {
            assert_approx_eq!(lie.lie_product(end, end), 0.0);
        }
    }

    #[test]
    fn test_pp_ends_falls_back_when_einf_vanishes() {
        let lie = LieLayout::n2().unwrap();
        // a plane has no `einf` weight
        let plane = lie.to_lie(&Round::plane(vector![1.0, 0.0], 1.0).unwrap()).unwrap();
        let sphere = lie.to_lie(&Round::sphere(vector![0.0, 3.0], 1.0)).unwrap();
        let ends = lie.pp_ends(&(&plane ^ &sphere)).unwrap();
        let mut rounds = ends.map(|end| lie.from_lie(&end).unwrap());
        if matches!(rounds[0], Round::Sphere { .. }) {
            rounds.swap(0, 1);
        }
        assert_approx_eq!(rounds[0], Round::plane(vector![1.0, 0.0], 1.0).unwrap());
        assert_approx_eq!(rounds[1], Round::sphere(vector![0.0, 3.0], 1.0));
    }

    #[test]
    fn test_pp_ends_errors() {
        let lie = LieLayout::n2().unwrap();
        let a = lie.up(&vector![1.0, 2.0]).unwrap();

        assert_eq!(lie.pp_ends(&a), Err(PointPairError::NotBivector));
        assert_eq!(lie.pp_ends(&lie.algebra().zero()), Err(PointPairError::Zero));

        let e1 = lie.algebra().basis_vector(0);
        let e2 = lie.algebra().basis_vector(1);
        assert_eq!(lie.pp_ends(&(e1 ^ e2)), Err(PointPairError::Imaginary));

        // a point wedged with a sphere through it
        let s = lie.to_lie(&Round::sphere(vector![1.0, 3.0], 1.0)).unwrap();
        assert_eq!(lie.pp_ends(&(&a ^ &s)), Err(PointPairError::Tangent));

        let other = LieLayout::n3().unwrap();
        let pp = other.up(&vector![1.0]).unwrap() ^ other.einf();
        assert_eq!(
            lie.pp_ends(&pp),
            Err(PointPairError::LayoutMismatch(LayoutMismatch)),
        );
    }
}
