//! Error families raised by the ledger, the plan and the stats binary.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Code, message and key/value detail carried by an [`LcskError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Kebab-case identifier such as `ledger-missing`.
    pub code: String,
    /// One-line description for humans.
    pub message: String,
    /// Paths, `k`/filename and exit codes involved.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Underlying library error text or a suggested fix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Payload with empty context and no hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records `key=value`; a repeated key keeps the last value.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Replaces the hint.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Every fallible operation of the runner returns this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum LcskError {
    /// Invalid experiment plan or runner configuration.
    #[error("plan error: {0}")]
    Plan(ErrorInfo),
    /// Result ledger IO and CSV errors.
    #[error("ledger error: {0}")]
    Ledger(ErrorInfo),
    /// External stats binary failures (spawn, exit status, output shape).
    #[error("stats error: {0}")]
    Stats(ErrorInfo),
    /// Configuration parsing and JSON encoding failures.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl LcskError {
    /// Payload regardless of family.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            LcskError::Plan(info)
            | LcskError::Ledger(info)
            | LcskError::Stats(info)
            | LcskError::Serde(info) => info,
        }
    }

    /// Shorthand for `info().code`.
    pub fn code(&self) -> &str {
        &self.info().code
    }
}
