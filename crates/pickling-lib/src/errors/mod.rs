use thiserror::Error;

#[derive(Error, Debug)]
pub enum PicklingError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive root is not a JSON object (found {found})")]
    NotAnObject { found: &'static str },

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Duplicate field: {0}")]
    DuplicateField(String),

    #[error("Type already enabled for pickling: {0}")]
    AlreadyEnabled(String),

    #[error("Type not enabled for pickling: {0}")]
    NotEnabled(String),

    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PicklingError>;

impl PicklingError {
    /// Returns true for failures caused by the input text rather than the value.
    pub fn is_input_error(&self) -> bool {
        match self {
            PicklingError::Json(e) => e.is_syntax() || e.is_eof() || e.is_data(),
            PicklingError::NotAnObject { .. } | PicklingError::MissingField(_) => true,
            _ => false,
        }
    }
}

/// Logs a fatal error and exits the process with code 1.
///
/// This function never returns (`-> !`). It is intended for unrecoverable
/// errors during initialization.
pub fn handle_fatal(err: PicklingError) -> ! {
    tracing::error!("Fatal error: {}", err);
    std::process::exit(1)
}

/// Maps a `PicklingError` to a user-facing line on stderr, with a hint when
/// the input itself was the problem.
pub fn handle_command_error(err: &PicklingError) {
    match err {
        PicklingError::MissingField(name) => {
            eprintln!("Error: input has no \"{}\" entry", name);
            eprintln!("Hint: wrap the document first with `pickling wrap`.");
        }
        PicklingError::NotAnObject { found } => {
            eprintln!("Error: expected a JSON object at the top level, found {}", found);
        }
        PicklingError::Json(e) if e.is_syntax() || e.is_eof() => {
            eprintln!("Error: malformed JSON at line {}, column {}: {}", e.line(), e.column(), e);
        }
        PicklingError::Io(e) => {
            eprintln!("File error: {}", e);
        }
        _ => {
            eprintln!("Error: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_converts() {
        let err: PicklingError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, PicklingError::Json(_)));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_missing_field_display() {
        let err = PicklingError::MissingField("cereal".to_string());
        assert_eq!(err.to_string(), "Missing field: cereal");
        assert!(err.is_input_error());
    }

    #[test]
    fn test_type_mismatch_display() {
        let err = PicklingError::TypeMismatch {
            expected: "Point".to_string(),
            found: "Line".to_string(),
        };
        assert_eq!(err.to_string(), "Type mismatch: expected Point, found Line");
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PicklingError = io.into();
        assert!(matches!(err, PicklingError::Io(_)));
    }
}
