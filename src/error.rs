// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerifierError {
    #[error("Failed to run {program}: {source}")]
    SpawnError {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command `{command}` failed with {status}: {output}")]
    CommandFailed {
        command: String,
        status: String,
        output: String,
    },

    #[error("Failed to parse {what}: {reason}. Raw output: {raw}")]
    ParseError {
        what: String,
        reason: String,
        raw: String,
    },

    #[error("Field '{field}' is missing from {context}")]
    MissingField { field: String, context: String },

    #[error("Unsupported Helm version: {0}")]
    UnsupportedHelmVersion(String),

    #[error("Invalid repository URL '{url}': {source}")]
    InvalidRepoUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Cluster error: {0}")]
    ClusterError(String),

    #[error("Unknown resource kind for naming: {0}")]
    UnknownResourceKind(String),

    #[error("Undefined step: {0}")]
    UndefinedStep(String),

    #[error("Failed to read {path}: {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid feature file: {0}")]
    FeatureError(String),

    #[error(transparent)]
    Assertion(#[from] AssertionFailure),
}

impl VerifierError {
    pub fn parse(what: impl Into<String>, reason: impl fmt::Display, raw: &str) -> Self {
        VerifierError::ParseError {
            what: what.into(),
            reason: reason.to_string(),
            raw: raw.to_string(),
        }
    }

    /// Errors that leave no usable cluster or chart tool, so the run cannot continue
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            VerifierError::ClusterError(_) | VerifierError::UnsupportedHelmVersion(_)
        )
    }

    pub fn missing_field(field: impl Into<String>, context: impl Into<String>) -> Self {
        VerifierError::MissingField {
            field: field.into(),
            context: context.into(),
        }
    }
}

/// A failed check against live cluster state, with what was expected, what was
/// found and the resource that produced it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} (resource: {context}). Expected: {expected}, Actual: {actual}")]
pub struct AssertionFailure {
    pub message: String,
    pub expected: String,
    pub actual: String,
    pub context: String,
}

impl AssertionFailure {
    pub fn new(
        message: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            expected: expected.into(),
            actual: actual.into(),
            context: context.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VerifierError>;
