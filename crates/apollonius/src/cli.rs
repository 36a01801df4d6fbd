use std::io::Write;
use std::path::PathBuf;

use eyre::{Context, Result, bail};
use itertools::Itertools;
use liemath::prelude::*;
use serde::Serialize;

use crate::problem::{DEFAULT_PROBLEM, Problem, SPHERES_PROBLEM};

/// Solve Apollonius' problem using Lie sphere geometry
///
/// Finds every circle (or sphere) tangent to a set of circles, lines, and
/// points in 2D, or spheres, planes, and points in higher dimensions.
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Print the augmented layout used for Lie sphere geometry.
    Layout {
        /// Number of Euclidean dimensions.
        #[arg(short, long, default_value_t = 2)]
        ndim: u8,
    },
    /// Solve a problem and print the solutions as JSON.
    Solve {
        /// Problem file (YAML, JSON, or TOML). If omitted, the built-in
        /// three-circle problem is used.
        problem: Option<PathBuf>,

        /// Try every orientation of the inputs instead of only the given one.
        #[arg(short, long)]
        all: bool,

        /// Write an SVG drawing of the inputs and solutions, use '-' for
        /// stdout.
        #[arg(long, value_parser)]
        svg: Option<clio::Output>,

        /// Write the scene as JSON, use '-' for stdout.
        #[arg(long, value_parser)]
        json: Option<clio::Output>,
    },
    /// Walk through the built-in example step by step.
    Demo {
        /// Number of Euclidean dimensions (2 for circles or 3 for spheres).
        #[arg(short, long, default_value_t = 2)]
        ndim: u8,

        /// Write an SVG drawing of the inputs and solutions, use '-' for
        /// stdout.
        #[arg(long, value_parser)]
        svg: Option<clio::Output>,
    },
}

pub(crate) fn exec(subcommand: Subcommand) -> Result<()> {
    match subcommand {
        Subcommand::Layout { ndim } => {
            let lie = LieLayout::new(ndim).wrap_err("error constructing layout")?;
            print!("{}", describe_layout(&lie));
            Ok(())
        }

        Subcommand::Solve {
            problem,
            all,
            svg,
            json,
        } => {
            let problem = Problem::load(problem.as_deref())?;
            let solution = problem.solve(all)?;
            log::info!("found {} solutions", solution.solutions.len());

            if svg.is_some() || json.is_some() {
                let scene = solution.to_scene()?;
                if let Some(output) = svg {
                    write_output(output, &scene.to_svg(&Default::default())?)
                        .wrap_err("error writing SVG")?;
                }
                if let Some(output) = json {
                    write_output(output, &scene.to_json()?).wrap_err("error writing scene")?;
                }
            }

            write_json_output(&solution)
        }

        Subcommand::Demo { ndim, svg } => {
            let problem: &Problem = match ndim {
                2 => &DEFAULT_PROBLEM,
                3 => &SPHERES_PROBLEM,
                _ => bail!("demo is only available in 2D and 3D"),
            };
            print!("{}", demo(problem)?);

            if let Some(output) = svg {
                let scene = problem.solve(true)?.to_scene()?;
                write_output(output, &scene.to_svg(&Default::default())?)
                    .wrap_err("error writing SVG")?;
            }
            Ok(())
        }
    }
}

/// Describes the basis vectors of the augmented layout and the special null
/// vectors.
fn describe_layout(lie: &LieLayout) -> String {
    let layout = lie.algebra();
    let mut lines = vec![
        format!("layout: {layout}"),
        format!("blades: {}", layout.blade_count()),
    ];
    for (i, v) in layout.basis_vectors().iter().enumerate() {
        lines.push(format!(
            "  {}^2 = {}",
            layout.blade_name(Axes::vector(i as u8)),
            v * v,
        ));
    }
    lines.push(format!("einf = {}", lie.einf()));
    lines.push(format!("eo = {}", lie.eo()));
    lines.push(format!("enp1 = {}", lie.enp1()));
    lines.iter().map(|line| format!("{line}\n")).join("")
}

/// Solves a problem, describing each step of the computation.
fn demo(problem: &Problem) -> Result<String> {
    let solver = Apollonius::new(problem.ndim)?;
    let lie = solver.lie();
    let mut lines = vec![];

    for (i, round) in problem.rounds.iter().enumerate() {
        let l = lie.to_lie(round)?;
        lines.push(format!("round {i}: {round}"));
        lines.push(format!("  Lie vector: {l}"));
        lines.push(format!("  L^2 = {}", lie.lie_product(&l, &l)));
    }

    let pp = solver.solution_point_pair(&problem.rounds)?;
    lines.push(format!("point pair: {pp}"));
    lines.push(format!("  PP^2 = {}", (&pp * &pp).scalar_part()));
    match lie.pp_ends(&pp) {
        Ok(ends) => {
            for end in &ends {
                let end = lie.downs(end);
                lines.push(format!("  end: {end}"));
                lines.push(format!("    = {}", lie.from_lie(&end)?));
            }
        }
        Err(e) => lines.push(format!("  no solutions: {e}")),
    }

    let all = solver.solve_all(&problem.rounds)?;
    lines.push(format!("{} solutions in every orientation:", all.len()));
    for s in &all {
        lines.push(format!("  {s}"));
    }
    Ok(lines.iter().map(|line| format!("{line}\n")).join(""))
}

fn write_output(mut output: clio::Output, contents: &str) -> Result<()> {
    output.write_all(contents.as_bytes())?;
    output.flush()?;
    Ok(())
}

fn write_json_output<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::*;

    #[test]
    fn test_args() {
        Args::command().debug_assert();

        let args = Args::try_parse_from(["apollonius", "solve", "--all", "problem.yaml"]).unwrap();
        let Subcommand::Solve {
            problem, all, svg, ..
        } = args.subcommand
        else {
            panic!("expected solve subcommand");
        };
        assert_eq!(problem, Some(PathBuf::from("problem.yaml")));
        assert!(all);
        assert!(svg.is_none());

        assert!(Args::try_parse_from(["apollonius"]).is_err());
    }

    #[test]
    fn test_describe_layout() {
        let text = describe_layout(&LieLayout::n2().unwrap());
        assert!(text.contains("enp1^2 = -1"), "{text}");
        assert_eq!(text.lines().filter(|l| l.contains("^2 = ")).count(), 5);
    }

    #[test]
    fn test_demo() {
        let text = demo(&DEFAULT_PROBLEM).unwrap();
        assert!(text.contains("8 solutions in every orientation"), "{text}");
        assert_eq!(text.matches("  end: ").count(), 2);
    }
}
