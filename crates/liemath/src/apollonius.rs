//! Solver for [Apollonius' problem] and its higher-dimensional analogues.
//!
//! In `N` dimensions, Apollonius' problem asks for every sphere tangent to
//! `N + 1` given spheres. Embedded in the Lie quadric, each oriented solution
//! is orthogonal to every input, so the oriented solutions are the two ends
//! of the point pair dual to the wedge of the inputs.
//!
//! [Apollonius' problem]: https://en.wikipedia.org/wiki/Problem_of_Apollonius

use float_ord::FloatOrd;
use itertools::Itertools;

use crate::{
    ApolloniusError, Float, LayoutError, LieLayout, Multivector, PointPairError, Round, Sign,
};

/// Solver for Apollonius' problem in a fixed number of dimensions.
#[derive(Debug, Clone)]
pub struct Apollonius {
    lie: LieLayout,
}

impl Apollonius {
    /// Constructs a solver for `ndim`-dimensional Euclidean space.
    pub fn new(ndim: u8) -> Result<Self, LayoutError> {
        Ok(Self {
            lie: LieLayout::new(ndim)?,
        })
    }

    /// Returns the number of Euclidean dimensions.
    pub fn ndim(&self) -> u8 {
        self.lie.ndim()
    }
    /// Returns the number of rounds required by [`Self::solve_oriented()`].
    pub fn round_count(&self) -> usize {
        self.ndim() as usize + 1
    }
    /// Returns the Lie layout used by the solver.
    pub fn lie(&self) -> &LieLayout {
        &self.lie
    }

    /// Returns every oriented round in oriented contact with each of `rounds`.
    ///
    /// There are generally two solutions, or none if the solutions are
    /// imaginary. If the two solutions coincide, no solutions are returned.
    pub fn solve_oriented(&self, rounds: &[Round]) -> Result<Vec<Round>, ApolloniusError> {
        let pp = self.solution_point_pair(rounds)?;

        let ends = match self.lie.pp_ends(&pp) {
            Ok(ends) => ends,
            Err(e @ (PointPairError::Imaginary | PointPairError::Tangent)) => {
                log::debug!("no real solutions: {e}");
                return Ok(vec![]);
            }
            Err(e) => {
                log::warn!("unable to split solution point pair {pp}: {e}");
                return Err(ApolloniusError::Degenerate);
            }
        };

        Ok(ends
            .iter()
            .filter_map(|end| match self.lie.from_lie(&self.lie.downs(end)) {
                Ok(round) => Some(round),
                Err(e) => {
                    log::warn!("discarding solution {end}: {e}");
                    None
                }
            })
            .collect())
    }

    /// Returns the point pair in the Lie quadric whose ends are the oriented
    /// solutions for `rounds`.
    pub fn solution_point_pair(&self, rounds: &[Round]) -> Result<Multivector, ApolloniusError> {
        if rounds.len() != self.round_count() {
            return Err(ApolloniusError::WrongCount {
                ndim: self.ndim(),
                expected: self.round_count(),
                got: rounds.len(),
            });
        }

        let lie_spheres: Vec<Multivector> = rounds
            .iter()
            .enumerate()
            .map(|(index, round)| {
                let l = self
                    .lie
                    .to_lie(round)
                    .map_err(|error| ApolloniusError::BadRound { index, error })?;
                Ok::<_, ApolloniusError>(l.normalize_max())
            })
            .collect::<Result<_, _>>()?;

        let wedge = Multivector::wedge_all(self.lie.algebra(), lie_spheres);
        log::debug!("wedge of {} Lie spheres has magnitude {}", rounds.len(), wedge.abs());
        if wedge.is_zero() {
            return Err(ApolloniusError::Degenerate);
        }

        let pp = wedge.dual().ok_or(ApolloniusError::Degenerate)?;
        log::debug!("solution point pair squares to {}", (&pp * &pp).scalar_part());
        Ok(pp)
    }

    /// Returns every round tangent to each of `rounds`, regardless of
    /// orientation.
    ///
    /// This tries every orientation of `rounds` except the first, which is
    /// fixed, and discards duplicate solutions. Three mutually external circles
    /// in the plane have eight solutions. The result is sorted: spheres before
    /// planes before points, each by position.
    pub fn solve_all(&self, rounds: &[Round]) -> Result<Vec<Round>, ApolloniusError> {
        if rounds.len() != self.round_count() {
            return Err(ApolloniusError::WrongCount {
                ndim: self.ndim(),
                expected: self.round_count(),
                got: rounds.len(),
            });
        }

        let mut solutions: Vec<Round> = vec![];

        for (i, signs) in self.orientations(rounds.len()).enumerate() {
            let oriented = rounds
                .iter()
                .zip(&signs)
                .map(|(round, &sign)| match sign {
                    Sign::Pos => round.clone(),
                    Sign::Neg => round.flipped(),
                })
                .collect_vec();

            let new_solutions = match self.solve_oriented(&oriented) {
                Ok(s) => s,
                // Errors that do not depend on orientation are reported once.
                Err(e) if i == 0 => return Err(e),
                Err(e) => {
                    log::warn!("skipping orientation {signs:?}: {e}");
                    continue;
                }
            };
            log::debug!("orientation {signs:?} has {} solutions", new_solutions.len());

            for s in new_solutions {
                if !solutions.iter().any(|old| old.unoriented_approx_eq(&s)) {
                    solutions.push(s);
                }
            }
        }

        solutions.sort_by_cached_key(sort_key);
        Ok(solutions)
    }

    /// Returns every assignment of signs with the first fixed to positive.
    fn orientations(&self, count: usize) -> impl Iterator<Item = Vec<Sign>> {
        let free = count.saturating_sub(1);
        (0..1_u32 << free).map(move |bits| {
            std::iter::once(Sign::Pos)
                .chain((0..free).map(|j| Sign::from_parity(bits & (1 << j) != 0)))
                .collect()
        })
    }
}

fn sort_key(round: &Round) -> (u8, Vec<FloatOrd<Float>>) {
    let (rank, coords): (u8, Vec<Float>) = match round {
        Round::Sphere { center, radius } => (0, center.iter().chain([radius.abs()]).collect()),
        Round::Plane { normal, distance } => (1, normal.iter().chain([*distance]).collect()),
        Round::Point(p) => (2, p.iter().collect()),
    };
    (rank, coords.into_iter().map(FloatOrd).collect())
}
