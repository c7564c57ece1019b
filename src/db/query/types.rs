use std::time::Duration;

/// A single executable statement paired with the delimiter of the script
/// region it was split from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSqlStatement {
    pub sql: String,
    pub delimiter: String,
}

impl RawSqlStatement {
    pub fn new(sql: impl Into<String>, delimiter: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            delimiter: delimiter.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
}

#[derive(Debug, Clone)]
pub struct QueryResult {
    pub columns: Vec<ColumnInfo>,
    pub rows: Vec<Vec<String>>,
    pub row_count: usize,
    pub execution_time: Duration,
    pub message: String,
    pub success: bool,
}

impl QueryResult {
    pub fn new_select(
        columns: Vec<ColumnInfo>,
        rows: Vec<Vec<String>>,
        execution_time: Duration,
    ) -> Self {
        let row_count = rows.len();
        Self {
            columns,
            rows,
            row_count,
            execution_time,
            message: format!("{} rows fetched", row_count),
            success: true,
        }
    }
}

/// Activation state of the server-output relay.
///
/// `Disabled` means output relaying is configured off for the whole session
/// and activation requests are ignored. `Armed` means the relay is installed
/// but the script has not enabled server output yet. `Active` means every
/// executed statement is followed by a drain of the server-side line buffer.
///
/// The state is sticky: it carries over from one script execution to the next
/// against the same target until a script explicitly toggles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputState {
    Disabled,
    #[default]
    Armed,
    Active,
}

/// Destination for diagnostics and relayed server-output lines.
pub trait LogSink {
    fn info(&self, message: &str);
    fn warning(&self, message: &str);
    fn debug(&self, message: &str);
}

/// Default sink forwarding to the `tracing` macros.
pub struct TracingSink;

impl LogSink for TracingSink {
    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }

    fn warning(&self, message: &str) {
        tracing::warn!("{message}");
    }

    fn debug(&self, message: &str) {
        tracing::debug!("{message}");
    }
}
