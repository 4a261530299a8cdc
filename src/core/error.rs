use thiserror::Error;

/// Errors raised while opening and preparing the database
///
/// Repository functions return `rusqlite::Result` directly; this enum is what
/// startup code and the CLI see. Uses `thiserror` for conversion and display.
///
/// # Example
///
/// ```no_run
/// use cardflow::core::error::AppError;
///
/// fn handle_error(err: AppError) {
///     eprintln!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Database connection pool errors
    #[error("Database pool error: {0}")]
    DatabasePool(#[from] r2d2::Error),

    /// Schema migration errors
    #[error("Migration error: {0}")]
    Migration(#[from] anyhow::Error),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_keeps_source_message() {
        let err = AppError::from(anyhow::anyhow!("V2 failed"));
        assert_eq!(err.to_string(), "Migration error: V2 failed");
    }
}
