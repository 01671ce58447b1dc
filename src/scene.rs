//! Colored triangles ready to be drawn.
//!
//! Every face is drawn as a single triangle made from its first three
//! vertices. This is exact for triangulated complexes. For faces with more
//! vertices it only covers part of the face, and which part depends on the
//! order of the face's vertices.

use incidence_file::{
    CellComplex,
    ElementKind,
    Index,
    PointTable,
};
use nalgebra::{
    Point3,
    Vector3,
};
use palette::Srgba;
use rand::Rng;

use crate::{
    config::SceneConfig,
    util::palette::{
        ColorExt,
        random_color,
    },
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{kind} index {index} out of range ({count} loaded)")]
    IndexOutOfRange {
        kind: ElementKind,
        index: Index,
        count: usize,
    },

    #[error("Face {face} has {num_vertices} vertices, but at least 3 are needed for a triangle")]
    DegenerateFace { face: Index, num_vertices: usize },
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Bounds {
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3<f64>>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = *points.next()?;

        Some(points.fold(
            Self {
                min: first,
                max: first,
            },
            |bounds, point| {
                Self {
                    min: bounds.min.inf(point),
                    max: bounds.max.sup(point),
                }
            },
        ))
    }

    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn half_extents(&self) -> Vector3<f64> {
        0.5 * (self.max - self.min)
    }

    pub fn corners(&self) -> [Point3<f64>; 8] {
        let (min, max) = (self.min, self.max);
        [
            Point3::new(min.x, min.y, min.z),
            Point3::new(max.x, min.y, min.z),
            Point3::new(max.x, max.y, min.z),
            Point3::new(min.x, max.y, min.z),
            Point3::new(min.x, min.y, max.z),
            Point3::new(max.x, min.y, max.z),
            Point3::new(max.x, max.y, max.z),
            Point3::new(min.x, max.y, max.z),
        ]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Triangle {
    pub volume: Index,
    pub face: Index,
    pub vertices: [Point3<f64>; 3],
    pub color: Srgba,
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
    bounds: Option<Bounds>,
    triangles: Vec<Triangle>,
}

impl Scene {
    /// Creates one triangle per face of every volume.
    ///
    /// Each volume gets a random color, drawn in volume order, which is
    /// shared by all of its faces. A face that belongs to multiple volumes
    /// is drawn once per volume.
    pub fn build(
        complex: &CellComplex,
        points: &PointTable,
        rng: &mut impl Rng,
        config: &SceneConfig,
    ) -> Result<Self, Error> {
        let bounds = Bounds::from_points(points.points());
        let mut triangles = vec![];

        for (volume, faces) in complex.volume_faces.iter().enumerate() {
            let color = random_color(rng).with_opacity(config.face_alpha);

            for &face in faces {
                let vertices = triangle_vertices(complex, points, face)?;
                triangles.push(Triangle {
                    volume: volume as Index,
                    face,
                    vertices,
                    color,
                });
            }
        }

        tracing::debug!(
            num_volumes = complex.num_volumes(),
            num_triangles = triangles.len(),
            ?bounds,
            "built scene"
        );

        Ok(Self { bounds, triangles })
    }

    /// Bounding box of all points, including points that no face uses.
    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

fn triangle_vertices(
    complex: &CellComplex,
    points: &PointTable,
    face: Index,
) -> Result<[Point3<f64>; 3], Error> {
    let vertices = complex
        .face_vertices
        .get(face as usize)
        .ok_or(Error::IndexOutOfRange {
            kind: ElementKind::Face,
            index: face,
            count: complex.num_faces(),
        })?;

    let &[a, b, c, ..] = vertices.as_slice()
    else {
        return Err(Error::DegenerateFace {
            face,
            num_vertices: vertices.len(),
        });
    };

    let point = |vertex: Index| {
        points.get(vertex).copied().ok_or(Error::IndexOutOfRange {
            kind: ElementKind::Vertex,
            index: vertex,
            count: points.len(),
        })
    };

    Ok([point(a)?, point(b)?, point(c)?])
}
