//! ASCII PLY 1.0 writer.

use std::io::Write;
use std::path::Path;

use crate::error::InputError;
use crate::mesh::Mesh;

const HEADER: &str = "ply\nformat ascii 1.0\ncomment mesh segmenter output\n";

/// Writes `mesh` to `path` as ASCII PLY 1.0, with each face line augmented
/// by its RGB colour: `3 i j k r g b`.
///
/// Faces are written in [`Mesh::faces`] order and vertices in
/// [`Mesh::vertices`] order, so re-reading the output with [`super::read_ply`]
/// reproduces the same face-index space — this is what makes two runs with
/// identical inputs and seed byte-identical.
pub fn write_ply(mesh: &Mesh, path: &Path) -> Result<(), InputError> {
    let mut out = String::new();
    out.push_str(HEADER);
    out.push_str(&format!("element vertex {}\n", mesh.num_vertices()));
    out.push_str("property float x\nproperty float y\nproperty float z\n");
    out.push_str(&format!("element face {}\n", mesh.num_faces()));
    out.push_str("property list uchar int vertex_indices\n");
    out.push_str("property uint8 red\nproperty uint8 green\nproperty uint8 blue\n");
    out.push_str("end_header\n");

    for vertex in mesh.vertices() {
        out.push_str(&format!("{vertex}\n"));
    }

    for face in mesh.faces() {
        let indices: Vec<String> = face
            .vertices()
            .iter()
            .map(|v| {
                mesh.vertex_index(v)
                    .expect("face vertex must be present in the mesh's vertex list")
                    .to_string()
            })
            .collect();
        let colour = face.colour();
        out.push_str(&format!(
            "3 {} {colour}\n",
            indices.join(" ")
        ));
    }

    let mut file = std::fs::File::create(path)?;
    file.write_all(out.as_bytes())?;
    Ok(())
}
