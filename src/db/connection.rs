use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("cannot fetch server output from an offline database")]
    OfflineConnection,
    #[error("error executing `{sql}`: {message}")]
    Execution { sql: String, message: String },
    #[error("error fetching DBMS_OUTPUT line: {0}")]
    OutputFetch(String),
    #[error("native SQL translation failed: {0}")]
    NativeSql(String),
}

/// Driver-native text escaping. Best effort: callers fall back to the
/// original statement text when this fails.
pub trait NativeSql {
    fn native_sql(&self, sql: &str) -> Result<String, DbError>;
}

/// Server-side output line buffer (DBMS_OUTPUT.GET_LINE).
///
/// `Ok(None)` is the sentinel meaning the buffer is drained.
pub trait OutputLineSource {
    fn next_output_line(&mut self) -> Result<Option<String>, DbError>;
}

/// Simulated connection used for dry runs and changelog validation. It can
/// echo statements back but has no server-side buffer, so asking it for
/// output lines is a configuration error, not a transient fault.
pub struct OfflineConnection;

impl NativeSql for OfflineConnection {
    fn native_sql(&self, sql: &str) -> Result<String, DbError> {
        Ok(sql.to_string())
    }
}

impl OutputLineSource for OfflineConnection {
    fn next_output_line(&mut self) -> Result<Option<String>, DbError> {
        Err(DbError::OfflineConnection)
    }
}
