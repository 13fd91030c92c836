//! Application services: rendering and the post catalog.

pub mod catalog;
pub mod error;
pub mod render;
