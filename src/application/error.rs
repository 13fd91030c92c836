use std::error::Error as StdError;

use thiserror::Error;

use crate::{domain::error::DomainError, infra::error::InfraError};

/// An error flattened into its source chain, for reporting at the process
/// boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub source: &'static str,
    pub messages: Vec<String>,
}

impl ErrorReport {
    pub fn from_error(source: &'static str, error: &dyn StdError) -> Self {
        let mut messages = Vec::new();
        messages.push(error.to_string());
        let mut current = error.source();
        while let Some(inner) = current {
            messages.push(inner.to_string());
            current = inner.source();
        }
        Self { source, messages }
    }

    /// The chain joined with `: `, skipping links that only repeat the
    /// previous message.
    pub fn summary(&self) -> String {
        let mut parts: Vec<&str> = Vec::with_capacity(self.messages.len());
        for message in &self.messages {
            if parts.last().is_none_or(|last| !last.contains(message.as_str())) {
                parts.push(message);
            }
        }
        parts.join(": ")
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Infra(#[from] InfraError),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected(message.into())
    }

    pub fn report(&self) -> ErrorReport {
        ErrorReport::from_error("application::error::AppError", self)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::Parser;

    use super::*;
    use crate::config::{self, CliArgs, LoadError};

    #[test]
    fn report_walks_the_source_chain() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let error = AppError::from(InfraError::read(Path::new("posts.json"), io));
        let report = error.report();

        assert_eq!(
            report.messages,
            ["failed to read `posts.json`: no such file", "no such file"]
        );
        assert_eq!(report.summary(), "failed to read `posts.json`: no such file");
    }

    #[test]
    fn domain_not_found_is_transparent() {
        let error = AppError::from(DomainError::not_found("post", "abc"));
        assert_eq!(error.to_string(), "post `abc` not found");
    }

    #[test]
    fn configuration_failures_are_infra_errors() {
        let args = CliArgs::parse_from([
            "notion-blog",
            "--log-level",
            "chatty",
            "categories",
            "posts.json",
        ]);
        let error = AppError::from(InfraError::from(
            config::load(&args).expect_err("invalid level"),
        ));

        assert!(matches!(
            error,
            AppError::Infra(InfraError::Configuration(LoadError::Invalid {
                key: "logging.level",
                ..
            }))
        ));
        assert!(
            error
                .report()
                .summary()
                .starts_with("configuration error: invalid configuration for `logging.level`")
        );
    }
}
