//! Scenes of colored circles, spheres, planes, points, and point pairs.
//!
//! A [`Scene`] records each object along with the conformal multivector it
//! came from, and can be written as JSON or rendered to SVG.

use liemath::{LayoutError, LayoutMismatch, PointPairError, RoundError};
use thiserror::Error;

mod rgb;
mod scene;
mod svg;

pub use rgb::Rgb;
pub use scene::{BladeCoefficient, Scene, SceneEntry, SceneObject};
pub use svg::SvgOptions;

/// Error produced when adding objects to a scene or writing it out.
#[derive(Error, Debug)]
pub enum SceneError {
    /// Object has more dimensions than the scene
    #[error("object needs {got} dimensions but the scene only has {max}")]
    TooManyDimensions {
        /// Dimensions of the scene.
        max: u8,
        /// Dimensions required by the object.
        got: u8,
    },
    /// Multivector has no drawable interpretation
    #[error("multivector {0} does not represent a real round")]
    Unrepresentable(String),
    /// Multivector has grades other than 1 or 2
    #[error("cannot draw multivector with grades {0:?}")]
    UnsupportedGrades(Vec<u8>),
    /// Point at infinity
    #[error("cannot draw point at infinity")]
    PointAtInfinity,
    /// Invalid layout
    #[error(transparent)]
    Layout(#[from] LayoutError),
    /// Layout mismatch
    #[error(transparent)]
    LayoutMismatch(#[from] LayoutMismatch),
    /// Invalid round
    #[error(transparent)]
    Round(#[from] RoundError),
    /// Invalid point pair
    #[error(transparent)]
    PointPair(#[from] PointPairError),
    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Formatting error
    #[error(transparent)]
    Fmt(#[from] std::fmt::Error),
}

#[cfg(test)]
mod tests;
