//! Block rendering pipeline.
//!
//! The pipeline is pure: it takes an already-collected block sequence for one
//! document and returns an owned render tree, which serialises to HTML.
//! Fetching, pagination and page chrome belong to the caller.

mod blocks;
mod document;
mod grouping;
mod options;
mod rich_text;
mod tree;

pub use blocks::render_block;
pub use document::{BlockRenderer, CONTAINER_CLASS, RenderOutput, render_blocks};
pub use grouping::{GroupedBlock, group_blocks};
pub use options::{DEFAULT_IMAGE_ALT, RenderOptions};
pub use rich_text::{format_rich_text, format_span};
pub use tree::{Element, RenderNode};
