//! SVG rendering of scenes.
//!
//! Only the first two coordinates are drawn. Spheres are drawn as their
//! silhouette circles and planes as their intersection with the XY plane.
//! Spheres with negative radius are drawn dashed.

use std::fmt::Write;

use itertools::Itertools;
use liemath::prelude::*;

use crate::{Rgb, Scene, SceneError, SceneObject};

/// Options for [`Scene::to_svg()`].
#[derive(Debug, Clone, PartialEq)]
pub struct SvgOptions {
    /// Width of the image in pixels.
    pub width: u32,
    /// Height of the image in pixels.
    pub height: u32,
    /// Space around the objects, as a fraction of the view size.
    pub margin: Float,
    /// Stroke width in pixels.
    pub stroke_width: Float,
    /// Radius of points in pixels.
    pub point_radius: Float,
    /// Background fill, if any.
    pub background: Option<Rgb>,
}
impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            margin: 0.1,
            stroke_width: 2.0,
            point_radius: 4.0,
            background: Some(Rgb::WHITE),
        }
    }
}

/// Axis-aligned rectangle in scene coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
struct Bounds {
    min: [Float; 2],
    max: [Float; 2],
}
impl Bounds {
    fn around(points: impl IntoIterator<Item = ([Float; 2], Float)>) -> Option<Self> {
        points.into_iter().fold(None, |acc, ([x, y], r)| {
            let r = r.abs();
            let new = Bounds {
                min: [x - r, y - r],
                max: [x + r, y + r],
            };
            Some(match acc {
                None => new,
                Some(b) => Bounds {
                    min: [b.min[0].min(new.min[0]), b.min[1].min(new.min[1])],
                    max: [b.max[0].max(new.max[0]), b.max[1].max(new.max[1])],
                },
            })
        })
    }

    /// Expands the bounds to the aspect ratio `width / height` and adds a
    /// margin.
    fn fit(self, width: Float, height: Float, margin: Float) -> Self {
        let center = [0, 1].map(|i| (self.min[i] + self.max[i]) / 2.0);
        let mut size = [0, 1].map(|i| (self.max[i] - self.min[i]).max(EPSILON));
        size = size.map(|s| s * (1.0 + 2.0 * margin));
        let aspect = width / height;
        if size[0] / size[1] < aspect {
            size[0] = size[1] * aspect;
        } else {
            size[1] = size[0] / aspect;
        }
        Bounds {
            min: [0, 1].map(|i| center[i] - size[i] / 2.0),
            max: [0, 1].map(|i| center[i] + size[i] / 2.0),
        }
    }

    fn diagonal(self) -> Float {
        Float::hypot(self.max[0] - self.min[0], self.max[1] - self.min[1])
    }
}

fn xy(v: &Vector) -> [Float; 2] {
    [v.get(0), v.get(1)]
}

impl Scene {
    /// Renders the scene to an SVG document, choosing a view box that
    /// contains every bounded object.
    pub fn to_svg(&self, opts: &SvgOptions) -> Result<String, SceneError> {
        let bounded = self
            .entries()
            .iter()
            .flat_map(|entry| match &entry.object {
                SceneObject::Point { position } => vec![(xy(position), 0.0)],
                SceneObject::Sphere { center, radius } => vec![(xy(center), *radius)],
                SceneObject::Plane { .. } => vec![],
                SceneObject::PointPair { ends } => ends.iter().map(|e| (xy(e), 0.0)).collect(),
            });
        let default_bounds = Bounds {
            min: [-1.0, -1.0],
            max: [1.0, 1.0],
        };
        let bounds = Bounds::around(bounded).unwrap_or(default_bounds).fit(
            opts.width as Float,
            opts.height as Float,
            opts.margin,
        );
        let px = (bounds.max[0] - bounds.min[0]) / opts.width as Float;
        let stroke = opts.stroke_width * px;
        let point_radius = opts.point_radius * px;

        let mut out = String::new();
        // Y is negated so that it points up.
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}">"#,
            opts.width,
            opts.height,
            bounds.min[0],
            -bounds.max[1],
            bounds.max[0] - bounds.min[0],
            bounds.max[1] - bounds.min[1],
        )?;
        if let Some(bg) = opts.background {
            writeln!(
                out,
                r#"  <rect x="{}" y="{}" width="100%" height="100%" fill="{bg}"/>"#,
                bounds.min[0], -bounds.max[1],
            )?;
        }

        for entry in self.entries() {
            let color = entry.color;
            let label_pos = match &entry.object {
                SceneObject::Point { position } => {
                    let [x, y] = xy(position);
                    write_dot(&mut out, [x, y], point_radius, color)?;
                    Some([x, y])
                }
                SceneObject::Sphere { center, radius } => {
                    let [x, y] = xy(center);
                    let dash = if *radius < 0.0 {
                        format!(r#" stroke-dasharray="{} {}""#, stroke * 4.0, stroke * 2.0)
                    } else {
                        String::new()
                    };
                    writeln!(
                        out,
                        r#"  <circle cx="{x}" cy="{}" r="{}" fill="none" stroke="{color}" stroke-width="{stroke}"{dash}/>"#,
                        -y,
                        radius.abs(),
                    )?;
                    Some([x, y + radius.abs()])
                }
                SceneObject::Plane { normal, distance } => {
                    let n = xy(normal);
                    let n2 = n[0] * n[0] + n[1] * n[1];
                    if is_approx_zero(n2) {
                        log::debug!("skipping plane parallel to the view");
                        continue;
                    }
                    // closest point to the origin, then extend along the line
                    let p = n.map(|c| c * distance / n2);
                    let dir = [-n[1], n[0]].map(|c| c / n2.sqrt());
                    let len = bounds.diagonal() + Float::hypot(p[0], p[1]);
                    let [a, b] = [len, -len].map(|t| [p[0] + dir[0] * t, p[1] + dir[1] * t]);
                    write_line(&mut out, a, b, stroke, color, None)?;
                    None
                }
                SceneObject::PointPair { ends } => {
                    let [a, b] = [xy(&ends[0]), xy(&ends[1])];
                    write_line(&mut out, a, b, stroke, color, Some(stroke * 3.0))?;
                    write_dot(&mut out, a, point_radius, color)?;
                    write_dot(&mut out, b, point_radius, color)?;
                    Some(a)
                }
            };

            if let (Some(label), Some([x, y])) = (&entry.label, label_pos) {
                writeln!(
                    out,
                    r#"  <text x="{x}" y="{}" font-size="{}" fill="{color}">{}</text>"#,
                    -y,
                    point_radius * 4.0,
                    escape_xml(label),
                )?;
            }
        }

        writeln!(out, "</svg>")?;
        Ok(out)
    }
}

fn write_dot(out: &mut String, [x, y]: [Float; 2], r: Float, color: Rgb) -> std::fmt::Result {
    writeln!(out, r#"  <circle cx="{x}" cy="{}" r="{r}" fill="{color}"/>"#, -y)
}

fn write_line(
    out: &mut String,
    a: [Float; 2],
    b: [Float; 2],
    stroke: Float,
    color: Rgb,
    dash: Option<Float>,
) -> std::fmt::Result {
    let dash = dash
        .map(|d| format!(r#" stroke-dasharray="{d} {d}""#))
        .unwrap_or_default();
    writeln!(
        out,
        r#"  <line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{color}" stroke-width="{stroke}"{dash}/>"#,
        a[0], -a[1], b[0], -b[1],
    )
}

fn escape_xml(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_owned(),
            '<' => "&lt;".to_owned(),
            '>' => "&gt;".to_owned(),
            '"' => "&quot;".to_owned(),
            c => c.to_string(),
        })
        .join("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_fit_keeps_aspect_ratio() {
        let b = Bounds::around([([0.0, 0.0], 1.0), ([4.0, 0.0], 0.0)]).unwrap();
        assert_eq!(b.min, [-1.0, -1.0]);
        assert_eq!(b.max, [4.0, 1.0]);
        let fitted = b.fit(100.0, 100.0, 0.0);
        liemath::assert_approx_eq!(fitted.max[0] - fitted.min[0], 5.0);
        liemath::assert_approx_eq!(fitted.max[1] - fitted.min[1], 5.0);
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b & c"), "a &lt; b &amp; c");
    }
}
