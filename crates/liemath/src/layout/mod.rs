//! Layouts: the signature and basis vector names of a Clifford algebra.

use std::fmt;
use std::sync::Arc;

use itertools::Itertools;
use smallvec::SmallVec;

mod axes;

pub use axes::Axes;

use crate::{Float, LayoutError, MAX_NDIM, Multivector, Sign};

/// Square of a basis vector.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Squares to `+1`.
    Pos,
    /// Squares to `-1`.
    Neg,
    /// Squares to `0`.
    Null,
}
impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Pos => write!(f, "+1"),
            Metric::Neg => write!(f, "-1"),
            Metric::Null => write!(f, "0"),
        }
    }
}
impl TryFrom<i8> for Metric {
    type Error = LayoutError;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Metric::Pos),
            -1 => Ok(Metric::Neg),
            0 => Ok(Metric::Null),
            _ => Err(LayoutError::InvalidMetric(value)),
        }
    }
}
impl Metric {
    /// Returns the square of the basis vector as a number.
    pub fn to_float(self) -> Float {
        match self {
            Metric::Pos => 1.0,
            Metric::Neg => -1.0,
            Metric::Null => 0.0,
        }
    }
}

/// Names for the basis vectors of a layout.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum BasisVectorIds {
    /// Basis vectors are numbered starting from 1.
    #[default]
    Default,
    /// Basis vectors are named in order.
    Ordered(Vec<String>),
}
impl BasisVectorIds {
    /// Constructs a list of names from anything string-like.
    pub fn ordered<S: ToString>(ids: impl IntoIterator<Item = S>) -> Self {
        Self::Ordered(ids.into_iter().map(|s| s.to_string()).collect())
    }

    fn resolve(self, ndim: u8) -> Result<Vec<String>, LayoutError> {
        let ids = match self {
            BasisVectorIds::Default => (1..=ndim).map(|i| i.to_string()).collect(),
            BasisVectorIds::Ordered(ids) => ids,
        };
        if ids.len() != ndim as usize {
            return Err(LayoutError::WrongIdCount {
                expected: ndim,
                got: ids.len(),
            });
        }
        if let Some(i) = ids.iter().position(|id| id.is_empty()) {
            return Err(LayoutError::EmptyId(i));
        }
        if let Some(dup) = ids.iter().duplicates().next() {
            return Err(LayoutError::DuplicateId(dup.clone()));
        }
        Ok(ids)
    }
}

/// Signature and basis vector names of a Clifford algebra.
///
/// Layouts are shared between multivectors using [`Arc`]. Two multivectors
/// can only be combined if their layouts are equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Square of each basis vector.
    signature: SmallVec<[Metric; 8]>,
    /// Name of each basis vector.
    ids: Vec<String>,
    /// Every basis blade, ordered by grade and then lexicographically.
    blade_order: Vec<Axes>,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Layout(")?;
        let entries = std::iter::zip(&self.ids, &self.signature)
            .map(|(id, metric)| format!("e{id}²={metric}"))
            .join(", ");
        write!(f, "{entries})")
    }
}

impl Layout {
    /// Constructs a new layout from the square of each basis vector.
    pub fn new(
        signature: impl IntoIterator<Item = i8>,
        ids: BasisVectorIds,
    ) -> Result<Arc<Self>, LayoutError> {
        let signature: SmallVec<[Metric; 8]> = signature
            .into_iter()
            .map(Metric::try_from)
            .collect::<Result<_, _>>()?;
        if signature.is_empty() {
            return Err(LayoutError::EmptySignature);
        }
        if signature.len() > MAX_NDIM as usize {
            return Err(LayoutError::TooManyDimensions(signature.len()));
        }
        let ndim = signature.len() as u8;
        let ids = ids.resolve(ndim)?;

        let blade_order = (0..=ndim)
            .flat_map(|grade| (0..ndim).combinations(grade as usize))
            .map(|indices| {
                indices
                    .into_iter()
                    .fold(Axes::SCALAR, |acc, i| acc | Axes::vector(i))
            })
            .collect();

        log::trace!("constructed layout with signature {signature:?} and ids {ids:?}");

        Ok(Arc::new(Self {
            signature,
            ids,
            blade_order,
        }))
    }

    /// Returns the number of basis vectors.
    pub fn ndim(&self) -> u8 {
        self.signature.len() as u8
    }
    /// Returns the number of basis blades, which is `2^ndim`.
    pub fn blade_count(&self) -> usize {
        1 << self.ndim()
    }
    /// Returns the square of each basis vector.
    pub fn signature(&self) -> &[Metric] {
        &self.signature
    }
    /// Returns the square of the `i`th basis vector.
    pub fn metric(&self, i: u8) -> Metric {
        self.signature[i as usize]
    }
    /// Returns the name of each basis vector.
    pub fn basis_names(&self) -> &[String] {
        &self.ids
    }
    /// Returns the index of the basis vector with the given name.
    pub fn index_of(&self, id: &str) -> Option<u8> {
        self.ids.iter().position(|it| it == id).map(|i| i as u8)
    }

    /// Returns every basis blade, ordered by grade and then lexicographically.
    pub fn blades(&self) -> &[Axes] {
        &self.blade_order
    }
    /// Returns every basis blade of a grade, in lexicographic order.
    pub fn blades_of_grade(&self, grade: u8) -> impl '_ + Iterator<Item = Axes> {
        self.blade_order
            .iter()
            .copied()
            .filter(move |axes| axes.grade() == grade)
    }

    /// Returns the sign of the geometric product between two basis blades,
    /// or `None` if the product is zero because a shared basis vector squares
    /// to zero.
    pub fn sign_of_geometric_product(&self, lhs: Axes, rhs: Axes) -> Option<Sign> {
        let mut sign = Axes::reorder_sign(lhs, rhs);
        for i in (lhs & rhs).indices() {
            match self.metric(i) {
                Metric::Pos => (),
                Metric::Neg => sign = -sign,
                Metric::Null => return None,
            }
        }
        Some(sign)
    }

    /// Returns the name of a basis blade, such as `e12` or `e1^np1`.
    pub fn blade_name(&self, axes: Axes) -> String {
        if axes.is_empty() {
            return "1".to_owned();
        }
        let separator = if self.ids.iter().all(|id| id.chars().count() == 1) {
            ""
        } else {
            "^"
        };
        let ids = axes.indices().map(|i| &self.ids[i as usize]).join(separator);
        format!("e{ids}")
    }
    /// Parses the name of a basis blade, accepting basis vectors in any
    /// order. Returns the canonical blade along with the sign needed to
    /// reorder the basis vectors.
    pub fn axes_from_name(&self, name: &str) -> Option<(Axes, Sign)> {
        if name == "1" {
            return Some((Axes::SCALAR, Sign::Pos));
        }
        let rest = name.strip_prefix('e')?;
        let indices: Vec<u8> = if rest.contains('^') {
            rest.split('^').map(|id| self.index_of(id)).collect::<Option<_>>()?
        } else if let Some(i) = self.index_of(rest) {
            vec![i]
        } else {
            rest.chars()
                .map(|c| self.index_of(c.encode_utf8(&mut [0; 4])))
                .collect::<Option<_>>()?
        };

        let mut axes = Axes::SCALAR;
        let mut sign = Sign::Pos;
        for i in indices {
            let v = Axes::vector(i);
            if axes.contains(v) {
                return None; // repeated basis vector
            }
            sign *= Axes::reorder_sign(axes, v);
            axes |= v;
        }
        Some((axes, sign))
    }

    /// Returns the scalar `x` in the layout.
    pub fn scalar(self: &Arc<Self>, x: Float) -> Multivector {
        Multivector::scalar(self, x)
    }
    /// Returns the zero multivector in the layout.
    pub fn zero(self: &Arc<Self>) -> Multivector {
        Multivector::zero(self)
    }
    /// Returns the `i`th basis vector.
    pub fn basis_vector(self: &Arc<Self>, i: u8) -> Multivector {
        Multivector::from_axes(self, Axes::vector(i), 1.0)
    }
    /// Returns the basis vector with the given name.
    pub fn basis_vector_by_name(self: &Arc<Self>, id: &str) -> Option<Multivector> {
        Some(self.basis_vector(self.index_of(id)?))
    }
    /// Returns all basis vectors in order.
    pub fn basis_vectors(self: &Arc<Self>) -> Vec<Multivector> {
        (0..self.ndim()).map(|i| self.basis_vector(i)).collect()
    }
    /// Returns the basis blade with the given name, such as `e12` or
    /// `e1^np1`. If the name lists the basis vectors out of order, the
    /// result is signed accordingly.
    pub fn blade_by_name(self: &Arc<Self>, name: &str) -> Option<Multivector> {
        let (axes, sign) = self.axes_from_name(name)?;
        Some(Multivector::from_axes(self, axes, sign.to_float()))
    }
    /// Returns the unit pseudoscalar: the product of all basis vectors.
    pub fn pseudoscalar(self: &Arc<Self>) -> Multivector {
        Multivector::from_axes(self, Axes::pseudoscalar(self.ndim()), 1.0)
    }
}
