//! The mesh model: vertex/face arrays and their bookkeeping.

pub mod face;
pub mod mesh;

pub use face::Face;
pub use mesh::Mesh;
