// crates/geoprofiles-core/src/indicator.rs

//! # Indicator Errors
//!
//! Retrieval failures that should degrade one indicator, not the whole
//! response. Computation code returns a [`DataRetrievalError`]; the indicator
//! boundary turns it into a [`PartialResult`] whose value is absent and whose
//! [`ErrorReport`] says why.

use crate::error::GeoError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Severity attached to an [`ErrorReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ErrorLevel {
    Info,
    /// The computation legitimately produced no data.
    Empty,
    /// A source could not be reached or is absent.
    Error,
}

/// The serialized form of a failure, carried next to (or instead of) a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub level: ErrorLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataRetrievalError {
    /// Nothing to aggregate: no records in the area, a zero denominator.
    #[error("{0}")]
    Aggregation(String),
    /// An upstream source is missing or failed to answer.
    #[error("{0}")]
    MissingSource(String),
}

impl DataRetrievalError {
    pub fn aggregation(message: impl Into<String>) -> Self {
        Self::Aggregation(message.into())
    }

    pub fn missing_source(message: impl Into<String>) -> Self {
        Self::MissingSource(message.into())
    }

    pub fn level(&self) -> ErrorLevel {
        match self {
            Self::Aggregation(_) => ErrorLevel::Empty,
            Self::MissingSource(_) => ErrorLevel::Error,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Aggregation(m) | Self::MissingSource(m) => m,
        }
    }

    pub fn error_report(&self) -> ErrorReport {
        ErrorReport {
            level: self.level(),
            message: self.message().to_string(),
        }
    }
}

/// Storage and geometry failures surface to indicators as missing sources.
impl From<GeoError> for DataRetrievalError {
    fn from(err: GeoError) -> Self {
        Self::MissingSource(err.to_string())
    }
}

/// An indicator value that may have failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartialResult<T> {
    pub value: Option<T>,
    pub error: Option<ErrorReport>,
}

impl<T> PartialResult<T> {
    pub fn ok(value: T) -> Self {
        Self {
            value: Some(value),
            error: None,
        }
    }

    pub fn failed(err: &DataRetrievalError) -> Self {
        Self {
            value: None,
            error: Some(err.error_report()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

impl<T> From<Result<T, DataRetrievalError>> for PartialResult<T> {
    fn from(result: Result<T, DataRetrievalError>) -> Self {
        match result {
            Ok(v) => Self::ok(v),
            Err(e) => {
                tracing::debug!(severity = ?e.level(), reason = e.message(), "indicator degraded");
                Self::failed(&e)
            }
        }
    }
}

/// Named indicator results for one response.
///
/// Each entry settles independently, so one failing indicator never removes
/// its siblings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorReport<T> {
    pub entries: Vec<(String, PartialResult<T>)>,
}

impl<T> Default for IndicatorReport<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> IndicatorReport<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `compute` and records its outcome under `name`.
    pub fn settle<F>(&mut self, name: impl Into<String>, compute: F) -> &PartialResult<T>
    where
        F: FnOnce() -> Result<T, DataRetrievalError>,
    {
        self.entries.push((name.into(), PartialResult::from(compute())));
        &self.entries[self.entries.len() - 1].1
    }

    pub fn get(&self, name: &str) -> Option<&PartialResult<T>> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, r)| r)
    }

    pub fn errors(&self) -> impl Iterator<Item = (&str, &ErrorReport)> {
        self.entries
            .iter()
            .filter_map(|(n, r)| r.error.as_ref().map(|e| (n.as_str(), e)))
    }

    /// The most severe level among the entries, if any failed.
    pub fn worst_level(&self) -> Option<ErrorLevel> {
        self.errors().map(|(_, e)| e.level).max()
    }
}
