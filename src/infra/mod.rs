//! Infrastructure adapters: wire-format decoding, file input and telemetry.

pub mod error;
pub mod notion;
pub mod source;
pub mod telemetry;
