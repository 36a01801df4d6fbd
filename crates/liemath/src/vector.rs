//! N-dimensional Euclidean vectors.

use std::fmt;
use std::ops::*;

use itertools::Itertools;
use smallvec::SmallVec;

use crate::{EPSILON, Float};

/// Constructs an N-dimensional vector, using the same syntax as `vec![]`.
#[macro_export]
macro_rules! vector {
    [$($tok:tt)*] => {
        $crate::Vector($crate::smallvec::smallvec![$($tok)*])
    };
}

/// N-dimensional Euclidean vector. Indexing out of bounds returns zero.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Vector(pub SmallVec<[Float; 4]>);

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.iter().join(", "))
    }
}

impl approx::AbsDiffEq for Vector {
    type Epsilon = Float;

    fn default_epsilon() -> Self::Epsilon {
        EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        Vector::zip(self, other).all(|(l, r)| (l - r).abs() <= epsilon)
    }
}

impl FromIterator<Float> for Vector {
    fn from_iter<T: IntoIterator<Item = Float>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
impl<const N: usize> From<[Float; N]> for Vector {
    fn from(value: [Float; N]) -> Self {
        value.into_iter().collect()
    }
}

impl Index<u8> for Vector {
    type Output = Float;

    fn index(&self, index: u8) -> &Self::Output {
        self.0.get(index as usize).unwrap_or(&0.0)
    }
}

macro_rules! impl_vector_ops {
    (impl for $type_name:ty) => {
        impl Add<&Vector> for $type_name {
            type Output = Vector;

            fn add(self, rhs: &Vector) -> Self::Output {
                Vector::zip(&self, rhs).map(|(l, r)| l + r).collect()
            }
        }
        impl Sub<&Vector> for $type_name {
            type Output = Vector;

            fn sub(self, rhs: &Vector) -> Self::Output {
                Vector::zip(&self, rhs).map(|(l, r)| l - r).collect()
            }
        }
        impl Neg for $type_name {
            type Output = Vector;

            fn neg(self) -> Self::Output {
                self.0.iter().map(|x| -x).collect()
            }
        }
        impl Mul<Float> for $type_name {
            type Output = Vector;

            fn mul(self, rhs: Float) -> Self::Output {
                self.0.iter().map(|x| x * rhs).collect()
            }
        }
        impl Div<Float> for $type_name {
            type Output = Vector;

            #[allow(clippy::suspicious_arithmetic_impl)]
            fn div(self, rhs: Float) -> Self::Output {
                let mult = 1.0 / rhs;
                self.0.iter().map(|x| x * mult).collect()
            }
        }
    };
}
impl_vector_ops!(impl for Vector);
impl_vector_ops!(impl for &'_ Vector);

impl Vector {
    /// Zero-dimensional empty vector.
    pub const EMPTY: Self = Self(SmallVec::new_const());

    /// Returns a zero vector.
    pub fn zero(ndim: u8) -> Self {
        Self(smallvec::smallvec![0.0; ndim as usize])
    }
    /// Returns a unit vector along an axis.
    pub fn unit(axis: u8) -> Self {
        let mut ret = Self::zero(axis + 1);
        ret.0[axis as usize] = 1.0;
        ret
    }

    /// Returns the number of components in the vector.
    pub fn ndim(&self) -> u8 {
        self.0.len() as u8
    }
    /// Returns a component of the vector. If the index is out of bounds,
    /// returns zero.
    pub fn get(&self, axis: u8) -> Float {
        self[axis]
    }
    /// Returns an iterator over the components of the vector.
    pub fn iter(&self) -> impl '_ + Clone + Iterator<Item = Float> {
        self.0.iter().copied()
    }

    /// Pads or truncates the vector to `ndim` components.
    #[must_use]
    pub fn resized(&self, ndim: u8) -> Vector {
        self.iter()
            .pad_using(ndim as usize, |_| 0.0)
            .take(ndim as usize)
            .collect()
    }

    /// Returns the dot product of this vector with another.
    pub fn dot(&self, rhs: &Vector) -> Float {
        std::iter::zip(self.iter(), rhs.iter())
            .map(|(l, r)| l * r)
            .sum()
    }
    /// Returns the squared magnitude of the vector.
    pub fn mag2(&self) -> Float {
        self.dot(self)
    }
    /// Returns the magnitude of the vector.
    pub fn mag(&self) -> Float {
        self.mag2().sqrt()
    }
    /// Returns a normalized copy of the vector, or `None` if it is zero.
    #[must_use]
    pub fn normalize(&self) -> Option<Vector> {
        let mult = 1.0 / self.mag();
        mult.is_finite().then(|| self * mult)
    }
    /// Returns the distance between two points.
    pub fn distance(&self, other: &Vector) -> Float {
        (self - other).mag()
    }

    /// Returns an iterator over two vectors, both padded to the same length.
    pub fn zip<'a>(a: &'a Vector, b: &'a Vector) -> impl 'a + Iterator<Item = (Float, Float)> {
        let max_ndim = std::cmp::max(a.ndim(), b.ndim());
        (0..max_ndim).map(move |i| (a[i], b[i]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn test_vector_add_pads_shorter() {
        let v1 = vector![1.0, 2.0, -10.0];
        let v2 = vector![-5.0];
        assert_eq!(&v1 + &v2, vector![-4.0, 2.0, -10.0]);
        assert_eq!(v2 - &v1, vector![-6.0, -2.0, 10.0]);
    }

    #[test]
    pub fn test_vector_resized() {
        let v = vector![1.0, 2.0, 3.0];
        assert_eq!(v.resized(2), vector![1.0, 2.0]);
        assert_eq!(v.resized(4), vector![1.0, 2.0, 3.0, 0.0]);
    }

    #[test]
    pub fn test_dot_product() {
        let v1 = vector![1.0, 2.0, -10.0];
        let v2 = vector![-5.0, 16.0];
        assert_eq!(v1.dot(&v2), 27.0);
        assert_eq!(Vector::unit(2), vector![0.0, 0.0, 1.0]);
    }
}
