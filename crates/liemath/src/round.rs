//! Oriented circles, spheres, lines, planes, and points in Euclidean space.

use std::fmt;

use crate::approx_cmp::{approx_eq, is_approx_negative, is_approx_zero, try_div};
use crate::{ConformalLayout, EPSILON, Float, Multivector, RoundError, Vector};

/// Oriented round (or flat) in Euclidean space.
///
/// In 2D, a sphere is a circle and a plane is a line.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Round {
    /// Sphere with a signed radius. A positive radius faces outward and a
    /// negative radius faces inward.
    Sphere {
        /// Center of the sphere.
        center: Vector,
        /// Signed radius of the sphere.
        radius: Float,
    },
    /// Plane `{x : normal · x = distance}`.
    ///
    /// A sphere with positive radius is in oriented contact with the plane
    /// when it touches the plane from the side that `normal` points toward.
    Plane {
        /// Unit normal vector.
        normal: Vector,
        /// Signed distance from the origin.
        distance: Float,
    },
    /// Sphere with radius zero.
    Point(Vector),
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Round::Sphere { center, radius } => write!(f, "sphere(center={center}, r={radius})"),
            Round::Plane { normal, distance } => {
                write!(f, "plane(normal={normal}, d={distance})")
            }
            Round::Point(p) => write!(f, "point{p}"),
        }
    }
}

impl approx::AbsDiffEq for Round {
    type Epsilon = Float;

    fn default_epsilon() -> Self::Epsilon {
        crate::EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        match (self, other) {
            (
                Round::Sphere { center, radius },
                Round::Sphere {
                    center: c2,
                    radius: r2,
                },
            ) => center.abs_diff_eq(c2, epsilon) && radius.abs_diff_eq(r2, epsilon),
            (
                Round::Plane { normal, distance },
                Round::Plane {
                    normal: n2,
                    distance: d2,
                },
            ) => normal.abs_diff_eq(n2, epsilon) && distance.abs_diff_eq(d2, epsilon),
            (Round::Point(a), Round::Point(b)) => a.abs_diff_eq(b, epsilon),
            _ => false,
        }
    }
}

impl Round {
    /// Constructs a sphere with a signed radius.
    pub fn sphere(center: impl Into<Vector>, radius: Float) -> Self {
        Round::Sphere {
            center: center.into(),
            radius,
        }
    }
    /// Constructs a plane, normalizing `normal`.
    pub fn plane(normal: impl Into<Vector>, distance: Float) -> Result<Self, RoundError> {
        let normal: Vector = normal.into();
        let mag = normal.mag();
        if is_approx_zero(mag) {
            return Err(RoundError::ZeroNormal);
        }
        Ok(Round::Plane {
            normal: normal / mag,
            distance: distance / mag,
        })
    }

    /// Returns the same round with the normal vector of a plane scaled to
    /// unit length, along with its distance.
    pub fn normalized(&self) -> Result<Self, RoundError> {
        match self {
            Round::Plane { normal, distance } => Round::plane(normal.clone(), *distance),
            _ => Ok(self.clone()),
        }
    }

    /// Returns the number of dimensions needed to represent the round.
    pub fn ndim(&self) -> u8 {
        match self {
            Round::Sphere { center, .. } => center.ndim(),
            Round::Plane { normal, .. } => normal.ndim(),
            Round::Point(p) => p.ndim(),
        }
    }

    /// Returns the same round with the opposite orientation.
    #[must_use]
    pub fn flipped(&self) -> Self {
        match self {
            Round::Sphere { center, radius } => Round::Sphere {
                center: center.clone(),
                radius: -radius,
            },
            Round::Plane { normal, distance } => Round::Plane {
                normal: -normal,
                distance: -distance,
            },
            Round::Point(p) => Round::Point(p.clone()),
        }
    }

    /// Returns whether two rounds are approximately equal, ignoring
    /// orientation.
    pub fn unoriented_approx_eq(&self, other: &Self) -> bool {
        approx_eq(self, other) || approx_eq(self, &other.flipped())
    }

    /// Returns whether two rounds are in oriented contact: tangent, and facing
    /// the same way at the point of tangency.
    ///
    /// A point is in contact with every round passing through it. A plane with
    /// zero normal is in contact with nothing.
    pub fn is_tangent_to(&self, other: &Self) -> bool {
        use Round::*;

        let (Ok(a), Ok(b)) = (self.normalized(), other.normalized()) else {
            return false;
        };
        match (&a, &b) {
            (Sphere { center: c1, radius: r1 }, Sphere { center: c2, radius: r2 }) => {
                approx_eq(&c1.distance(c2), &(r1 - r2).abs())
            }
            (Sphere { center, radius }, Plane { normal, distance })
            | (Plane { normal, distance }, Sphere { center, radius }) => {
                approx_eq(&(normal.dot(center) - distance), radius)
            }
            (Plane { normal: n1, .. }, Plane { normal: n2, .. }) => approx_eq(n1, n2),
            (Point(p), Sphere { center, radius }) | (Sphere { center, radius }, Point(p)) => {
                approx_eq(&p.distance(center), &radius.abs())
            }
            (Point(p), Plane { normal, distance }) | (Plane { normal, distance }, Point(p)) => {
                approx_eq(&normal.dot(p), distance)
            }
            (Point(p), Point(q)) => approx_eq(p, q),
        }
    }

    /// Returns the dual representation of the round in a conformal layout.
    ///
    /// Spheres and planes are normalized so that they square to `1`, with
    /// orientation encoded in the sign. Points are embedded using
    /// [`ConformalLayout::up()`].
    pub fn to_dual(&self, cga: &ConformalLayout) -> Result<Multivector, RoundError> {
        match self {
            Round::Sphere { center, radius } => {
                let r = *radius;
                if is_approx_zero(r) {
                    return Err(RoundError::ZeroRadius);
                }
                Ok((cga.up(center)? - cga.einf() * (r * r / 2.0)) / r)
            }
            Round::Plane { normal, distance } => {
                let mag = normal.mag();
                if is_approx_zero(mag) {
                    return Err(RoundError::ZeroNormal);
                }
                Ok(cga.vector(&(normal / mag))? + cga.einf() * (distance / mag))
            }
            Round::Point(p) => cga.up(p),
        }
    }

    /// Interprets a grade-1 multivector in a conformal layout as a dual round.
    ///
    /// The multivector is assumed to be a positive multiple of a normalized
    /// dual round, so that orientation can be recovered from its sign. Returns
    /// `None` if it is not a vector or represents an imaginary sphere.
    pub fn from_dual(cga: &ConformalLayout, x: &Multivector) -> Option<Self> {
        if x.layout() != cga.layout() || x.is_zero() {
            return None;
        }
        if !(x - x.grade_project(1)).is_zero() {
            return None;
        }

        let x2 = cga.dot(x, x);
        let weight = -cga.dot(x, cga.einf());

        // flat when the weight is negligible relative to the magnitude
        if weight.abs() <= EPSILON * x2.abs().sqrt() {
            let n = cga.euclidean_part(x);
            let mag = n.mag();
            let distance = try_div(-cga.dot(x, cga.eo()), mag)?;
            return Some(Round::Plane {
                normal: n / mag,
                distance,
            });
        }

        let r2 = x2 / (weight * weight);
        if !r2.is_finite() {
            return None;
        }
        let center = cga.euclidean_part(x) / weight;
        if is_approx_zero(r2) {
            Some(Round::Point(center))
        } else if is_approx_negative(r2) {
            None // imaginary
        } else {
            Some(Round::Sphere {
                center,
                radius: r2.sqrt().copysign(weight),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_approx_eq, vector};

    #[test]
    fn test_dual_sphere_squares_to_one() {
        let cga = ConformalLayout::euclidean(3).unwrap();
        for radius in [1.5, -0.25] {
            let s = Round::sphere(vector![1.0, -2.0, 3.0], radius)
                .to_dual(&cga)
                .unwrap();
            assert_approx_eq!(cga.dot(&s, &s), 1.0);
        }
    }

    #[test]
    fn test_dual_round_roundtrip_preserves_orientation() {
        let cga = ConformalLayout::euclidean(2).unwrap();
        let rounds = [
            Round::sphere(vector![1.0, -2.0], 1.5),
            Round::sphere(vector![1.0, -2.0], -1.5),
            Round::plane(vector![3.0, 4.0], 10.0).unwrap(),
            Round::Point(vector![0.5, 0.25]),
        ];
        for round in rounds {
            let dual = round.to_dual(&cga).unwrap();
            assert_approx_eq!(Round::from_dual(&cga, &(dual.clone() * 7.0)).unwrap(), round);
            if !matches!(round, Round::Point(_)) {
                let flipped = Round::from_dual(&cga, &-dual).unwrap();
                assert_approx_eq!(flipped, round.flipped());
            }
        }
    }

    #[test]
    fn test_from_dual_rejects_imaginary_and_bivectors() {
        let cga = ConformalLayout::euclidean(2).unwrap();
        let p = cga.up(&vector![1.0, 1.0]).unwrap();
        let imaginary = &p + cga.einf() * 2.0; // r² = -4
        assert_eq!(Round::from_dual(&cga, &imaginary), None);
        let bivector = &p ^ cga.einf();
        assert_eq!(Round::from_dual(&cga, &bivector), None);
    }

    #[test]
    fn test_is_tangent_to() {
        let a = Round::sphere(vector![0.0, 0.0], 2.0);
        let internal = Round::sphere(vector![1.0, 0.0], 1.0);
        let external = Round::sphere(vector![3.0, 0.0], -1.0);
        assert!(a.is_tangent_to(&internal));
        assert!(a.is_tangent_to(&external));
        assert!(!a.is_tangent_to(&external.flipped()));

        let line = Round::plane(vector![0.0, 1.0], -2.0).unwrap();
        assert!(a.is_tangent_to(&line));
        assert!(!a.is_tangent_to(&line.flipped()));
        assert!(a.flipped().is_tangent_to(&line.flipped()));
        assert!(Round::Point(vector![0.0, -2.0]).is_tangent_to(&line));
    }

    #[test]
    fn test_plane_with_non_unit_normal() {
        let cga = ConformalLayout::euclidean(2).unwrap();
        // y = 1
        let line = Round::Plane {
            normal: vector![0.0, 2.0],
            distance: 2.0,
        };
        let unit = Round::plane(vector![0.0, 1.0], 1.0).unwrap();
        assert_approx_eq!(line.normalized().unwrap(), unit);

        let dual = line.to_dual(&cga).unwrap();
        assert_approx_eq!(dual, unit.to_dual(&cga).unwrap());
        assert_approx_eq!(Round::from_dual(&cga, &dual).unwrap(), unit);

        let circle = Round::sphere(vector![0.0, 2.0], 1.0);
        assert!(circle.is_tangent_to(&line));
        assert!(line.is_tangent_to(&circle));
        assert!(!Round::sphere(vector![0.0, 3.0], 1.0).is_tangent_to(&line));

        let degenerate = Round::Plane {
            normal: vector![0.0, 0.0],
            distance: 1.0,
        };
        assert_eq!(degenerate.to_dual(&cga), Err(RoundError::ZeroNormal));
        assert!(!circle.is_tangent_to(&degenerate));
    }

    #[test]
    fn test_from_dual_huge_sphere() {
        let cga = ConformalLayout::euclidean(2).unwrap();
        for radius in [1500.0, -1.0e4] {
            let round = Round::sphere(vector![1.0, 0.0], radius);
            let dual = round.to_dual(&cga).unwrap();
            let Some(Round::Sphere { center, radius: r }) = Round::from_dual(&cga, &dual) else {
                panic!("expected sphere with radius {radius}");
            };
            assert_approx_eq!(center, vector![1.0, 0.0]);
            approx::assert_relative_eq!(r, radius, max_relative = 1e-6);
        }
    }

    #[test]
    fn test_unoriented_approx_eq() {
        let a = Round::sphere(vector![1.0], 2.0);
        assert!(a.unoriented_approx_eq(&a.flipped()));
        assert!(!a.unoriented_approx_eq(&Round::sphere(vector![1.0], 3.0)));
    }
}
