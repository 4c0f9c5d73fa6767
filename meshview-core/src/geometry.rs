/// Geometry primitives: indexed meshes, normals and view angles
use std::collections::{BTreeMap, HashSet};

use nalgebra::{Point3, Vector3};

use crate::error::{GeometryError, LoadError};

/// 1-based vertex identifier as it appears in the mesh description.
pub type VertexId = u32;

/// A planar polygon referencing at least three vertices by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    vertices: Vec<VertexId>,
}

impl Face {
    /// Returns `None` for fewer than three vertex ids.
    pub fn new(vertices: Vec<VertexId>) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        Some(Self { vertices })
    }

    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Every pair of vertices in the face, so polygons with more than three
    /// vertices also yield their diagonals.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .flat_map(move |(i, &a)| self.vertices[i + 1..].iter().map(move |&b| (a, b)))
    }
}

/// Vertex positions keyed by id plus the immutable face list.
///
/// Positions are rewritten in place by every rotation, so they always hold
/// the cumulative pose.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: BTreeMap<VertexId, Point3<f64>>,
    faces: Vec<Face>,
}

impl Mesh {
    /// Build a mesh, checking that every face only references known ids.
    pub fn new(
        vertices: BTreeMap<VertexId, Point3<f64>>,
        faces: Vec<Face>,
    ) -> Result<Self, LoadError> {
        for (index, face) in faces.iter().enumerate() {
            if let Some(&id) = face.vertices().iter().find(|&&id| !vertices.contains_key(&id)) {
                return Err(LoadError::UnknownVertex {
                    face: index + 1,
                    id,
                });
            }
        }

        Ok(Self { vertices, faces })
    }

    /// Axis-aligned cube centred on the origin, two triangles per side.
    pub fn cube(size: f64) -> Self {
        let half = size / 2.0;
        let corners = [
            (-half, -half, -half),
            (half, -half, -half),
            (half, half, -half),
            (-half, half, -half),
            (-half, -half, half),
            (half, -half, half),
            (half, half, half),
            (-half, half, half),
        ];
        let vertices = corners
            .iter()
            .zip(1..)
            .map(|(&(x, y, z), id)| (id, Point3::new(x, y, z)))
            .collect();

        let triangles: [[VertexId; 3]; 12] = [
            // Back
            [1, 3, 2],
            [1, 4, 3],
            // Front
            [5, 6, 7],
            [5, 7, 8],
            // Bottom
            [1, 2, 6],
            [1, 6, 5],
            // Top
            [4, 8, 7],
            [4, 7, 3],
            // Left
            [1, 5, 8],
            [1, 8, 4],
            // Right
            [2, 3, 7],
            [2, 7, 6],
        ];
        let faces = triangles
            .iter()
            .map(|t| Face {
                vertices: t.to_vec(),
            })
            .collect();

        Self { vertices, faces }
    }

    pub fn vertices(&self) -> &BTreeMap<VertexId, Point3<f64>> {
        &self.vertices
    }

    pub(crate) fn vertices_mut(&mut self) -> impl Iterator<Item = &mut Point3<f64>> {
        self.vertices.values_mut()
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Position of a vertex. Faces of a constructed mesh only hold known ids.
    pub fn position(&self, id: VertexId) -> Point3<f64> {
        self.vertices[&id]
    }

    /// Unique undirected edges across all faces, as `(min, max)` id pairs in
    /// first-seen order. Edges shared by adjacent faces appear once.
    pub fn unique_edges(&self) -> Vec<(VertexId, VertexId)> {
        let mut seen = HashSet::new();
        self.faces
            .iter()
            .flat_map(Face::edges)
            .map(|(a, b)| (a.min(b), a.max(b)))
            .filter(|edge| seen.insert(*edge))
            .collect()
    }

    /// Unnormalized normal of a face from its first three vertices.
    pub fn face_normal(&self, face: &Face) -> Vector3<f64> {
        let v = face.vertices();
        face_normal(
            &self.position(v[0]),
            &self.position(v[1]),
            &self.position(v[2]),
        )
    }
}

/// Normal `(v2 - v1) x (v3 - v1)`; its length is twice the triangle area.
pub fn face_normal(v1: &Point3<f64>, v2: &Point3<f64>, v3: &Point3<f64>) -> Vector3<f64> {
    let a = v2 - v1;
    let b = v3 - v1;
    a.cross(&b)
}

/// Angle in `[0, pi]` between a normal and the viewing axis. Normals pointing
/// along `-z` (towards the viewer) give small angles.
pub fn view_angle(normal: &Vector3<f64>) -> f64 {
    (normal.y * normal.y + normal.x * normal.x)
        .sqrt()
        .atan2(-normal.z)
}

/// Move the bounding-box centre to the origin and scale uniformly so the
/// largest half-extent becomes a quarter of `viewport_size`.
pub fn center_and_scale(mesh: &mut Mesh, viewport_size: f64) -> Result<f64, GeometryError> {
    if let Some((&id, _)) = mesh
        .vertices
        .iter()
        .find(|(_, p)| p.coords.iter().any(|c| !c.is_finite()))
    {
        return Err(GeometryError::NonFiniteCoordinate { id });
    }

    let mut points = mesh.vertices.values();
    let first = points.next().ok_or(GeometryError::DegenerateMesh)?;
    let (min, max) = points.fold((*first, *first), |(min, max), p| {
        (min.inf(p), max.sup(p))
    });

    let mid = nalgebra::center(&min, &max);
    let half_extent = max - mid;
    let largest = half_extent.max();
    if !largest.is_finite() || largest <= 0.0 {
        return Err(GeometryError::DegenerateMesh);
    }

    let scale = viewport_size / largest / 4.0;
    for point in mesh.vertices.values_mut() {
        *point = Point3::from((*point - mid) * scale);
    }

    tracing::debug!(
        vertices = mesh.vertices.len(),
        faces = mesh.faces.len(),
        scale,
        "centred and scaled mesh"
    );
    Ok(scale)
}
