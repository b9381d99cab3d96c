//! Fuzzy k-medoid mesh segmentation, binary and recursive.

pub mod binary;
pub mod palette;
pub mod recursive;

pub use binary::BinarySegmenter;
pub use recursive::RecursiveSegmenter;
