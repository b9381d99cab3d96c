//! ASCII PLY 1.0 reader.

use std::path::Path;

use crate::error::InputError;
use crate::geometry::Vertex;
use crate::mesh::{Face, Mesh};

const HEADER_START: &str = "ply";
const HEADER_END: &str = "end_header";
const ELEMENT_VERTEX: &str = "element vertex";
const ELEMENT_FACE: &str = "element face";

/// Reads an ASCII PLY 1.0 mesh from `path`.
///
/// Accepts the header shape described in the CLI interface docs: a vertex
/// element with `x y z` float properties and a face element with a
/// `vertex_indices` list property. Additional vertex/face properties
/// (colour, normals, texture coordinates) are ignored. Only triangular
/// faces are supported. Duplicate faces (identical ordered vertex triples)
/// are silently deduplicated by [`Mesh::new`].
pub fn read_ply(path: &Path) -> Result<Mesh, InputError> {
    if !path.exists() {
        return Err(InputError::FileNotFound(path.to_path_buf()));
    }
    if path.extension().and_then(|e| e.to_str()) != Some("ply") {
        return Err(InputError::WrongExtension(path.to_path_buf()));
    }

    let contents = std::fs::read_to_string(path)?;
    parse_ply_str(&contents)
}

/// Parses an in-memory ASCII PLY 1.0 document, without touching the
/// filesystem. [`read_ply`] is a thin file-handling wrapper around this.
fn parse_ply_str(contents: &str) -> Result<Mesh, InputError> {
    let lines: Vec<&str> = contents.lines().collect();

    if lines.first().map(|l| l.trim()) != Some(HEADER_START) {
        return Err(InputError::MalformedHeader(
            "file does not start with \"ply\"".to_string(),
        ));
    }

    let mut num_vertices = None;
    let mut num_faces = None;
    let mut body_start = None;

    for (idx, line) in lines.iter().enumerate() {
        if line.contains(ELEMENT_VERTEX) {
            num_vertices = Some(parse_trailing_count(line)?);
        }
        if line.contains(ELEMENT_FACE) {
            num_faces = Some(parse_trailing_count(line)?);
        }
        if line.trim() == HEADER_END {
            body_start = Some(idx + 1);
            break;
        }
    }

    let num_vertices = num_vertices.ok_or_else(|| {
        InputError::MalformedHeader("missing \"element vertex <N>\" line".to_string())
    })?;
    let num_faces = num_faces.ok_or_else(|| {
        InputError::MalformedHeader("missing \"element face <M>\" line".to_string())
    })?;
    let body_start = body_start.ok_or_else(|| {
        InputError::MalformedHeader("missing \"end_header\" line".to_string())
    })?;

    if lines.len() < body_start + num_vertices + num_faces {
        return Err(InputError::MalformedHeader(
            "fewer data lines than the header declares".to_string(),
        ));
    }

    let mut vertices = Vec::with_capacity(num_vertices);
    for line in &lines[body_start..body_start + num_vertices] {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 3 {
            return Err(InputError::MalformedHeader(format!(
                "vertex line has fewer than 3 fields: {line:?}"
            )));
        }
        let parse_coord = |s: &str| {
            s.parse::<f64>().map_err(|_| {
                InputError::MalformedHeader(format!("could not parse vertex coordinate {s:?}"))
            })
        };
        vertices.push(Vertex::new(
            parse_coord(fields[0])?,
            parse_coord(fields[1])?,
            parse_coord(fields[2])?,
        ));
    }

    let faces_start = body_start + num_vertices;
    let mut faces = Vec::with_capacity(num_faces);
    for (face_index, line) in lines[faces_start..faces_start + num_faces].iter().enumerate() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            return Err(InputError::MalformedHeader(format!(
                "empty face line at face {face_index}"
            )));
        }
        let vertex_count: usize = fields[0].parse().map_err(|_| {
            InputError::MalformedHeader(format!("could not parse face vertex count at face {face_index}"))
        })?;
        if vertex_count != 3 {
            return Err(InputError::NonTriangularFace(face_index));
        }
        if fields.len() < 4 {
            return Err(InputError::MalformedHeader(format!(
                "face {face_index} declares 3 vertices but the line is too short"
            )));
        }

        let mut idxs = [0usize; 3];
        for (i, field) in fields[1..4].iter().enumerate() {
            idxs[i] = field.parse().map_err(|_| {
                InputError::MalformedHeader(format!(
                    "could not parse vertex index {field:?} on face {face_index}"
                ))
            })?;
        }

        for &vertex_index in &idxs {
            if vertex_index >= vertices.len() {
                return Err(InputError::VertexIndexOutOfRange {
                    face_index,
                    vertex_index,
                    num_vertices: vertices.len(),
                });
            }
        }

        faces.push(Face::new(
            vertices[idxs[0]],
            vertices[idxs[1]],
            vertices[idxs[2]],
        ));
    }

    Ok(Mesh::new(vertices, faces))
}

fn parse_trailing_count(line: &str) -> Result<usize, InputError> {
    line.split_whitespace()
        .last()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| InputError::MalformedHeader(format!("could not parse element count in {line:?}")))
}
