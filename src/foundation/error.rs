/// Result alias used across the crate.
pub type ReportResult<T> = Result<T, ReportError>;

/// Error taxonomy for a report run.
///
/// Only `Aggregation` is recovered internally (the table panel degrades to a placeholder);
/// every other variant aborts the run without producing a partial document.
#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    /// Bad input: missing role column, unreadable sheet, unparseable cell, bad parameter.
    #[error("input error: {0}")]
    Input(String),

    /// Pivot-table aggregation failed for one entity.
    #[error("aggregation error: {0}")]
    Aggregation(String),

    /// Chart composition or rasterization failed.
    #[error("render error: {0}")]
    Render(String),

    /// Scratch storage or output IO failed.
    #[error("resource error: {0}")]
    Resource(String),

    /// Anything else, carried with its context chain.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReportError {
    /// Build an [`ReportError::Input`].
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Build an [`ReportError::Aggregation`].
    pub fn aggregation(msg: impl Into<String>) -> Self {
        Self::Aggregation(msg.into())
    }

    /// Build an [`ReportError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build an [`ReportError::Resource`].
    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
