use std::path::Path;

use eyre::{Context, Result, ensure};
use liemath::{Apollonius, Round};
use serde::{Deserialize, Serialize};

const PROBLEM_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const ENV_PREFIX: &str = "APOLLONIUS";

pub(crate) const DEFAULT_PROBLEM_STR: &str = include_str!("default.yaml");
pub(crate) const SPHERES_PROBLEM_STR: &str = include_str!("spheres.yaml");

lazy_static! {
    pub(crate) static ref DEFAULT_PROBLEM: Problem =
        serde_norway::from_str(DEFAULT_PROBLEM_STR).expect("error loading default problem");
    pub(crate) static ref SPHERES_PROBLEM: Problem =
        serde_norway::from_str(SPHERES_PROBLEM_STR).expect("error loading spheres problem");
}

/// Set of oriented rounds to find tangent rounds for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Problem {
    /// Number of Euclidean dimensions.
    pub ndim: u8,
    /// Rounds that every solution must be tangent to.
    pub rounds: Vec<Round>,
}

/// Solutions to a [`Problem`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct Solution {
    pub ndim: u8,
    pub rounds: Vec<Round>,
    /// Whether every orientation of the inputs was tried.
    pub all_orientations: bool,
    pub solutions: Vec<Round>,
}

impl Problem {
    /// Loads a problem from a file, or the default problem if `path` is
    /// `None`. Fields can be overridden using environment variables such as
    /// `APOLLONIUS_NDIM`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let env = config::Environment::with_prefix(ENV_PREFIX).try_parsing(true);
        match path {
            Some(path) => Self::load_from_sources(config::File::from(path), env)
                .wrap_err_with(|| format!("error loading problem from {}", path.display())),
            None => Self::load_from_sources(
                config::File::from_str(DEFAULT_PROBLEM_STR, PROBLEM_FILE_FORMAT),
                env,
            )
            .wrap_err("error loading default problem"),
        }
    }

    fn load_from_sources<S>(source: S, env: config::Environment) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let mut problem: Self = config::Config::builder()
            .add_source(source)
            .add_source(env)
            .build()?
            .try_deserialize()?;
        problem.rounds = problem
            .rounds
            .iter()
            .enumerate()
            .map(|(i, round)| {
                round
                    .normalized()
                    .wrap_err_with(|| format!("bad round #{i} ({round})"))
            })
            .collect::<Result<_>>()?;
        problem.validate()?;
        log::debug!("loaded problem with {} rounds", problem.rounds.len());
        Ok(problem)
    }

    /// Checks that every round fits in the space and that there is the right
    /// number of rounds.
    pub fn validate(&self) -> Result<()> {
        let expected = self.ndim as usize + 1;
        ensure!(
            self.rounds.len() == expected,
            "{}D problem needs {expected} rounds; got {}",
            self.ndim,
            self.rounds.len(),
        );
        for (i, round) in self.rounds.iter().enumerate() {
            ensure!(
                round.ndim() <= self.ndim,
                "round #{i} ({round}) does not fit in {}D",
                self.ndim,
            );
        }
        Ok(())
    }

    /// Solves the problem, either with the given orientations or with every
    /// orientation.
    pub fn solve(&self, all_orientations: bool) -> Result<Solution> {
        let solver = Apollonius::new(self.ndim).wrap_err("error constructing layout")?;
        let solutions = if all_orientations {
            solver.solve_all(&self.rounds)
        } else {
            solver.solve_oriented(&self.rounds)
        }
        .wrap_err("error solving problem")?;

        Ok(Solution {
            ndim: self.ndim,
            rounds: self.rounds.clone(),
            all_orientations,
            solutions,
        })
    }
}

impl Solution {
    /// Builds a scene with the inputs in black and each solution in its own
    /// color.
    pub fn to_scene(&self) -> Result<liedraw::Scene> {
        let mut scene = liedraw::Scene::new(self.ndim)?;
        for (i, round) in self.rounds.iter().enumerate() {
            scene
                .add_round(round, liedraw::Rgb::BLACK)?
                .with_label(format!("input {i}"));
        }
        let n = self.solutions.len();
        for (i, round) in self.solutions.iter().enumerate() {
            scene
                .add_round(round, liedraw::Rgb::gradient(i, n))?
                .with_label(format!("solution {i}"));
        }
        Ok(scene)
    }
}
