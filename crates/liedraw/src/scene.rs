use liemath::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{Rgb, SceneError};

/// Geometric object that can be drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SceneObject {
    /// Single point.
    Point {
        /// Position of the point.
        position: Vector,
    },
    /// Circle in 2D or sphere in 3D, with a signed radius.
    Sphere {
        /// Center of the sphere.
        center: Vector,
        /// Signed radius.
        radius: Float,
    },
    /// Line in 2D or plane in 3D: `{x : normal · x = distance}`.
    Plane {
        /// Unit normal vector.
        normal: Vector,
        /// Signed distance from the origin.
        distance: Float,
    },
    /// Pair of points.
    PointPair {
        /// Positions of the two points.
        ends: [Vector; 2],
    },
}
impl From<Round> for SceneObject {
    fn from(round: Round) -> Self {
        match round {
            Round::Sphere { center, radius } => SceneObject::Sphere { center, radius },
            Round::Plane { normal, distance } => SceneObject::Plane { normal, distance },
            Round::Point(position) => SceneObject::Point { position },
        }
    }
}

/// Coefficient of a single basis blade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BladeCoefficient {
    /// Name of the blade, such as `e12`.
    pub blade: String,
    /// Coefficient of the blade.
    pub coef: Float,
}

/// Object in a scene, along with how to draw it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneEntry {
    /// Object to draw.
    #[serde(flatten)]
    pub object: SceneObject,
    /// Stroke color.
    pub color: Rgb,
    /// Text to display next to the object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Nonzero coefficients of the conformal multivector representing the
    /// object.
    #[serde(default)]
    pub multivector: Vec<BladeCoefficient>,
}
impl SceneEntry {
    /// Sets the label of the entry.
    pub fn with_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = Some(label.into());
        self
    }
}

/// Collection of colored objects in 2D or 3D Euclidean space.
#[derive(Debug, Clone, Serialize)]
pub struct Scene {
    ndim: u8,
    #[serde(skip)]
    cga: ConformalLayout,
    entries: Vec<SceneEntry>,
}

impl Scene {
    /// Constructs an empty scene in `ndim`-dimensional space.
    pub fn new(ndim: u8) -> Result<Self, SceneError> {
        Ok(Self {
            ndim,
            cga: ConformalLayout::euclidean(ndim)?,
            entries: vec![],
        })
    }

    /// Returns the number of dimensions of the scene.
    pub fn ndim(&self) -> u8 {
        self.ndim
    }
    /// Returns the conformal layout used to record multivectors.
    pub fn conformal_layout(&self) -> &ConformalLayout {
        &self.cga
    }
    /// Returns the objects in the scene, in the order they were added.
    pub fn entries(&self) -> &[SceneEntry] {
        &self.entries
    }
    /// Returns the number of objects in the scene.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    /// Returns whether the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn check_ndim(&self, ndim: u8) -> Result<(), SceneError> {
        if ndim > self.ndim {
            return Err(SceneError::TooManyDimensions {
                max: self.ndim,
                got: ndim,
            });
        }
        Ok(())
    }

    fn push(
        &mut self,
        object: SceneObject,
        color: Option<Rgb>,
        mv: &Multivector,
    ) -> &mut SceneEntry {
        let color = color.unwrap_or_else(|| Rgb::palette(self.entries.len()));
        let layout = mv.layout();
        let multivector = mv
            .nonzero_terms()
            .map(|term| BladeCoefficient {
                blade: layout.blade_name(term.axes),
                coef: term.coef,
            })
            .collect();
        log::trace!("adding {object:?} to scene");
        self.entries.push(SceneEntry {
            object,
            color,
            label: None,
            multivector,
        });
        let last = self.entries.len() - 1;
        &mut self.entries[last]
    }

    /// Adds an oriented round. If `color` is `None`, the next palette color is
    /// used.
    pub fn add_round(
        &mut self,
        round: &Round,
        color: impl Into<Option<Rgb>>,
    ) -> Result<&mut SceneEntry, SceneError> {
        self.check_ndim(round.ndim())?;
        let mv = round.to_dual(&self.cga)?;
        Ok(self.push(round.clone().into(), color.into(), &mv))
    }

    /// Adds a pair of points.
    pub fn add_point_pair(
        &mut self,
        ends: [Vector; 2],
        color: impl Into<Option<Rgb>>,
    ) -> Result<&mut SceneEntry, SceneError> {
        self.check_ndim(ends[0].ndim().max(ends[1].ndim()))?;
        let mv = self.cga.up(&ends[0])? ^ self.cga.up(&ends[1])?;
        Ok(self.push(SceneObject::PointPair { ends }, color.into(), &mv))
    }

    /// Adds a multivector from a conformal layout.
    ///
    /// A vector is drawn as the point or dual round it represents, and a
    /// bivector is drawn as a point pair. The stored coefficients use the
    /// blade names of `cga`.
    pub fn add_multivector(
        &mut self,
        cga: &ConformalLayout,
        mv: &Multivector,
        color: impl Into<Option<Rgb>>,
    ) -> Result<&mut SceneEntry, SceneError> {
        if mv.layout() != cga.layout() {
            return Err(LayoutMismatch.into());
        }
        self.check_ndim(cga.euclidean_ndim())?;

        let object = match mv.grade() {
            Some(1) => Round::from_dual(cga, mv)
                .ok_or_else(|| SceneError::Unrepresentable(mv.to_string()))?
                .into(),
            Some(2) => {
                let ends = cga
                    .pp_ends(mv)?
                    .map(|end| cga.down(&end).ok_or(SceneError::PointAtInfinity));
                let [a, b] = ends;
                SceneObject::PointPair { ends: [a?, b?] }
            }
            _ => return Err(SceneError::UnsupportedGrades(mv.grades())),
        };
        Ok(self.push(object, color.into(), mv))
    }

    /// Serializes the scene to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
