/// Painter's-algorithm ordering of faces
use crate::geometry::{Face, Mesh};

/// Sum of the z-coordinates of a face's vertices. Only relative order matters,
/// so the sum stands in for the centroid depth.
pub fn depth_key(mesh: &Mesh, face: &Face) -> f64 {
    face.vertices().iter().map(|&id| mesh.position(id).z).sum()
}

/// Faces ordered back-to-front: ascending depth key, ties kept in input order.
pub fn sort_back_to_front(mesh: &Mesh) -> Vec<&Face> {
    let mut keyed: Vec<(f64, &Face)> = mesh
        .faces()
        .iter()
        .map(|face| (depth_key(mesh, face), face))
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    keyed.into_iter().map(|(_, face)| face).collect()
}
