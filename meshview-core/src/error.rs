/// Error types for mesh loading and geometry
use crate::geometry::VertexId;

/// Failure while reading a mesh description.
///
/// Line numbers are 1-based and refer to the input text.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadError {
    #[error("mesh description is empty")]
    MissingHeader,

    #[error("line {line}: expected `numVertices,numFaces`, got {text:?}")]
    MalformedHeader { line: usize, text: String },

    #[error("line {line}: expected `id,x,y,z`, got {text:?}")]
    MalformedVertex { line: usize, text: String },

    #[error("line {line}: expected comma-separated vertex ids, got {text:?}")]
    MalformedFace { line: usize, text: String },

    #[error("line {line}: face has {count} vertices, at least 3 are required")]
    FaceTooSmall { line: usize, count: usize },

    #[error("line {line}: vertex id {id} is defined twice")]
    DuplicateVertex { line: usize, id: VertexId },

    #[error("face {face} references unknown vertex id {id}")]
    UnknownVertex { face: usize, id: VertexId },

    #[error("header announces {expected} {what}, found {found}")]
    CountMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
}

/// Failure of a geometric transform.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("mesh has no extent: all vertices coincide")]
    DegenerateMesh,

    #[error("vertex {id} has a non-finite coordinate")]
    NonFiniteCoordinate { id: VertexId },

    #[error("point lies on the projection plane (z + offset = 0)")]
    ZeroDepth,
}
