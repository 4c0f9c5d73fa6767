/// Parser for the comma-separated mesh description
///
/// ```text
/// numVertices,numFaces
/// id,x,y,z            (numVertices lines, ids are 1-based)
/// id,id,id[,id...]    (numFaces lines)
/// ```
use std::collections::BTreeMap;

use nalgebra::Point3;
use nom::{
    character::complete::{char, space0, u32 as vertex_id},
    combinator::{all_consuming, verify},
    multi::separated_list1,
    number::complete::double,
    sequence::{delimited, preceded, separated_pair, tuple},
    IResult,
};

use crate::error::LoadError;
use crate::geometry::{Face, Mesh, VertexId};

/// Parse a complete mesh description, validating counts and references.
pub fn parse_mesh(input: &str) -> Result<Mesh, LoadError> {
    let mut lines = input
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()));

    let (line, text) = lines
        .next()
        .filter(|(_, text)| !text.is_empty())
        .ok_or(LoadError::MissingHeader)?;
    let (num_vertices, num_faces) =
        parse_line(header, text).ok_or_else(|| LoadError::MalformedHeader {
            line,
            text: text.to_string(),
        })?;
    let (num_vertices, num_faces) = (num_vertices as usize, num_faces as usize);

    let mut vertices = BTreeMap::new();
    for found in 0..num_vertices {
        let (line, text) = lines.next().ok_or(LoadError::CountMismatch {
            what: "vertices",
            expected: num_vertices,
            found,
        })?;
        let (id, x, y, z) = parse_line(vertex, text)
            .filter(|(id, ..)| *id > 0)
            .ok_or_else(|| LoadError::MalformedVertex {
                line,
                text: text.to_string(),
            })?;
        if vertices.insert(id, Point3::new(x, y, z)).is_some() {
            return Err(LoadError::DuplicateVertex { line, id });
        }
    }

    let mut faces = Vec::new();
    for found in 0..num_faces {
        let (line, text) = lines.next().ok_or(LoadError::CountMismatch {
            what: "faces",
            expected: num_faces,
            found,
        })?;
        let ids = parse_line(face, text).ok_or_else(|| LoadError::MalformedFace {
            line,
            text: text.to_string(),
        })?;
        let count = ids.len();
        faces.push(Face::new(ids).ok_or(LoadError::FaceTooSmall { line, count })?);
    }

    let extra = lines.filter(|(_, text)| !text.is_empty()).count();
    if extra > 0 {
        return Err(LoadError::CountMismatch {
            what: "faces",
            expected: num_faces,
            found: num_faces + extra,
        });
    }

    let mesh = Mesh::new(vertices, faces)?;
    tracing::debug!(
        vertices = num_vertices,
        faces = num_faces,
        "parsed mesh description"
    );
    Ok(mesh)
}

fn parse_line<'a, O>(
    parser: impl FnMut(&'a str) -> IResult<&'a str, O>,
    line: &'a str,
) -> Option<O> {
    all_consuming(parser)(line).ok().map(|(_, output)| output)
}

fn comma(input: &str) -> IResult<&str, char> {
    delimited(space0, char(','), space0)(input)
}

fn header(input: &str) -> IResult<&str, (u32, u32)> {
    separated_pair(vertex_id, comma, vertex_id)(input)
}

fn vertex(input: &str) -> IResult<&str, (VertexId, f64, f64, f64)> {
    tuple((
        vertex_id,
        preceded(comma, coordinate),
        preceded(comma, coordinate),
        preceded(comma, coordinate),
    ))(input)
}

/// `double` also reads `nan` and `inf`; only finite values are coordinates.
fn coordinate(input: &str) -> IResult<&str, f64> {
    verify(double, |value: &f64| value.is_finite())(input)
}

fn face(input: &str) -> IResult<&str, Vec<VertexId>> {
    separated_list1(comma, vertex_id)(input)
}
