use thiserror::Error;

/// Errors raised while loading data, validating selections or serving charts
///
/// Loading errors (`DataLoad`, `DateParse`, `EmptyDataset`) are fatal at
/// startup. `InvalidSelection` is recoverable: the controller rejects the
/// update and keeps what it last published.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The source could not be opened, read, or is missing required columns
    #[error("failed to load dataset from '{source_name}': {reason}")]
    DataLoad { source_name: String, reason: String },

    /// A `Date` cell did not match `YYYY-MM-DD`
    #[error("line {line}: cannot parse date '{value}' (expected YYYY-MM-DD)")]
    DateParse { line: usize, value: String },

    /// The selection cannot be applied to the loaded dataset
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    #[error("dataset contains no records")]
    EmptyDataset,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to render chart: {0}")]
    Render(String),

    #[error("failed to export records: {0}")]
    Export(String),
}

impl DashboardError {
    pub(crate) fn data_load(source_name: &str, reason: impl Into<String>) -> Self {
        DashboardError::DataLoad {
            source_name: source_name.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the error leaves the running dashboard usable
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DashboardError::InvalidSelection(_))
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
