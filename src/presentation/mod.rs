//! Command output: view models and their text and JSON forms.

pub mod views;
