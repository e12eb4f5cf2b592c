use thiserror::Error;

/// smeter error types
#[derive(Error, Debug)]
pub enum SmeterError {
    /// Input table is unreadable or a required column is missing
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// A timestamp string could not be parsed
    #[error("time parse error: {0}")]
    TimeParse(String),

    /// Tariff parameters are invalid (negative rate or duration)
    #[error("invalid tariff: {0}")]
    InvalidTariff(String),

    /// Statistics requested on zero records
    #[error("empty dataset: statistics are undefined for zero records")]
    EmptyDataset,

    /// Chart or document rendering failed
    #[error("render error: {0}")]
    Render(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for smeter
pub type Result<T> = std::result::Result<T, SmeterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SmeterError::MalformedInput("missing column 'Start'".into());
        assert_eq!(err.to_string(), "malformed input: missing column 'Start'");
    }

    #[test]
    fn test_empty_dataset_display() {
        let err = SmeterError::EmptyDataset;
        assert!(err.to_string().contains("zero records"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SmeterError = io_err.into();
        assert!(err.to_string().contains("io error"));
    }
}
