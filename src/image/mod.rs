//! Image contract shapes

pub mod options;
pub mod summary;

pub use options::{CommitOptions, TagOptions};
pub use summary::{Image, ImageDelete, ImageInfo, ImageLayer};
