//! ASCII PLY 1.0 mesh I/O.

pub mod reader;
pub mod writer;

pub use reader::read_ply;
pub use writer::write_ply;
