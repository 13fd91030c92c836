//! Notion content rendering and post catalog for a personal blog.
//!
//! The crate turns document-service JSON (page block children and posts
//! database query results) into an HTML render tree and a filterable,
//! newest-first post list.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
