/// Structural errors raised while extracting a classification report.
///
/// These are the hard failures of the tagging pipeline: a report that is
/// readable JSON but is missing the fields the severity decision depends on
/// cannot be skipped silently, so these propagate to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportError {
    /// A required field is absent from the report document
    MissingField { path: &'static str },

    /// The severity score is present but not coercible to an integer
    InvalidScore { value: String },

    /// `resourcesAffected` is present but does not identify a valid object
    InvalidResource { reason: String },
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::MissingField { path } => {
                write!(f, "Classification report is missing '{}'", path)
            }
            ReportError::InvalidScore { value } => {
                write!(f, "Severity score is not an integer: {}", value)
            }
            ReportError::InvalidResource { reason } => {
                write!(f, "Invalid affected resource in report: {}", reason)
            }
        }
    }
}

impl std::error::Error for ReportError {}

/// Result type for report extraction and the tagging pipeline
pub type ReportResult<T> = Result<T, ReportError>;
