//! # Validation Issues
//!
//! Structured, severity-tagged findings produced by the schema validator.
//! Validation is fail-soft: every finding becomes a [`ValidationIssue`] and
//! the whole ordered list is handed back to the caller for review.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How serious a validation finding is.
///
/// Ordering puts `Error` before `Default`, so sorting a list of issues by
/// severity yields errors first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The metadata is wrong and must be fixed.
    Error,
    /// The metadata is acceptable; a default will be applied.
    Default,
}

impl Severity {
    /// Returns the lowercase identifier used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which part of the model a finding refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// The top-level model document.
    Model,
    /// A cube fragment.
    Cube,
    /// A dimension fragment.
    Dimension,
}

impl Scope {
    /// Returns the lowercase identifier used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Model => "model",
            Self::Cube => "cube",
            Self::Dimension => "dimension",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Severity of the finding.
    pub severity: Severity,
    /// Part of the model the finding belongs to.
    pub scope: Scope,
    /// Name of the cube or dimension, if known.
    pub object: Option<String>,
    /// Dotted path of the offending property, if any (e.g. `cubes.0.name`).
    pub property: Option<String>,
    /// Human-readable description.
    pub message: String,
}

impl ValidationIssue {
    /// Create a new issue.
    pub fn new(
        severity: Severity,
        scope: Scope,
        object: Option<String>,
        property: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            scope,
            object,
            property,
            message: message.into(),
        }
    }

    /// Returns true for severity `error`.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.scope)?;
        if let Some(object) = &self.object {
            write!(f, " '{object}'")?;
        }
        if let Some(property) = &self.property {
            write!(f, " ({property})")?;
        }
        write!(f, ": {}", self.message)
    }
}
