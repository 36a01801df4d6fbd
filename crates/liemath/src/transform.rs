//! Conversion of multivectors between layouts that share basis vectors.

use std::sync::Arc;

use crate::{Axes, Layout, LayoutError, LayoutMismatch, Multivector, Sign};

/// Linear map between two layouts that sends each basis vector of the source
/// to the basis vector of the target with the same name.
///
/// Basis vectors with no counterpart in the target are sent to zero, so every
/// blade containing one of them vanishes.
#[derive(Debug, Clone, PartialEq)]
pub struct BasisTransform {
    src: Arc<Layout>,
    dst: Arc<Layout>,
    /// Index in `dst` of each basis vector of `src`.
    map: Vec<Option<u8>>,
}

impl BasisTransform {
    /// Constructs a transformation that matches basis vectors by name.
    ///
    /// Returns an error if two basis vectors with the same name have
    /// different metrics.
    pub fn between_basis_vectors(
        src: &Arc<Layout>,
        dst: &Arc<Layout>,
    ) -> Result<Self, LayoutError> {
        let map = src
            .basis_names()
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let Some(j) = dst.index_of(id) else {
                    return Ok(None);
                };
                if src.metric(i as u8) != dst.metric(j) {
                    return Err(LayoutError::MismatchedMetric(id.clone()));
                }
                Ok(Some(j))
            })
            .collect::<Result<_, _>>()?;

        Ok(Self {
            src: Arc::clone(src),
            dst: Arc::clone(dst),
            map,
        })
    }

    /// Returns the source layout.
    pub fn src(&self) -> &Arc<Layout> {
        &self.src
    }
    /// Returns the target layout.
    pub fn dst(&self) -> &Arc<Layout> {
        &self.dst
    }

    /// Maps a basis blade of the source layout to the target layout, or
    /// returns `None` if the blade vanishes.
    pub fn map_axes(&self, axes: Axes) -> Option<(Axes, Sign)> {
        let mut ret = Axes::SCALAR;
        let mut sign = Sign::Pos;
        for i in axes.indices() {
            let v = Axes::vector(self.map[i as usize]?);
            sign *= Axes::reorder_sign(ret, v);
            ret |= v;
        }
        Some((ret, sign))
    }

    /// Applies the transformation to a multivector of the source layout.
    pub fn apply(&self, x: &Multivector) -> Result<Multivector, LayoutMismatch> {
        if x.layout() != &self.src {
            return Err(LayoutMismatch);
        }
        let mut ret = Multivector::zero(&self.dst);
        for term in x.terms().filter(|t| t.coef != 0.0) {
            if let Some((axes, sign)) = self.map_axes(term.axes) {
                ret[axes] += sign * term.coef;
            }
        }
        Ok(ret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BasisVectorIds, assert_approx_eq};

    #[test]
    fn test_between_basis_vectors_drops_missing() {
        let big = Layout::new([1, 1, -1], BasisVectorIds::ordered(["x", "y", "z"])).unwrap();
        let small = Layout::new([1, 1], BasisVectorIds::ordered(["x", "y"])).unwrap();
        let t = BasisTransform::between_basis_vectors(&big, &small).unwrap();

        let x = big.blade_by_name("exy").unwrap() * 2.0 + big.blade_by_name("exz").unwrap();
        assert_approx_eq!(t.apply(&x).unwrap(), small.blade_by_name("exy").unwrap() * 2.0);
    }

    #[test]
    fn test_between_basis_vectors_reorders() {
        let a = Layout::new([1, 1], BasisVectorIds::ordered(["x", "y"])).unwrap();
        let b = Layout::new([1, 1], BasisVectorIds::ordered(["y", "x"])).unwrap();
        let t = BasisTransform::between_basis_vectors(&a, &b).unwrap();
        let xy = a.blade_by_name("exy").unwrap();
        // `b` stores y∧x canonically, and x∧y = -(y∧x)
        assert_approx_eq!(t.apply(&xy).unwrap(), -b.blade_by_name("eyx").unwrap());
        assert_approx_eq!(t.apply(&xy).unwrap(), b.blade_by_name("exy").unwrap());
    }

    #[test]
    fn test_between_basis_vectors_metric_mismatch() {
        let a = Layout::new([1, 1], BasisVectorIds::ordered(["x", "y"])).unwrap();
        let b = Layout::new([1, -1], BasisVectorIds::ordered(["x", "y"])).unwrap();
        assert_eq!(
            BasisTransform::between_basis_vectors(&a, &b),
            Err(LayoutError::MismatchedMetric("y".to_owned())),
        );
    }

    #[test]
    fn test_apply_wrong_layout() {
        let a = Layout::new([1, 1], BasisVectorIds::Default).unwrap();
        let b = Layout::new([1], BasisVectorIds::Default).unwrap();
        let t = BasisTransform::between_basis_vectors(&a, &b).unwrap();
        assert_eq!(t.apply(&b.basis_vector(0)), Err(LayoutMismatch));
    }
}
