use crate::db::connection::{DbError, OutputLineSource};

use super::{LogSink, OutputState, QueryResult, RawSqlStatement};

/// Statement execution capability of a database target.
pub trait StatementExecutor {
    fn execute(&mut self, statement: &RawSqlStatement) -> Result<(), DbError>;
    fn query(&mut self, statement: &RawSqlStatement) -> Result<QueryResult, DbError>;
}

/// Decorator that drains the server-side DBMS_OUTPUT buffer after each
/// successful delegation and forwards every line to the log sink.
///
/// The relay never decides its own activation: the session driver toggles it
/// from the statements it is about to execute. While `Active`, the drain loop
/// runs until the source signals no more data; a source that never signals
/// completion will hang the relay, by design. Fetch failures are fatal and
/// propagate unretried.
pub struct OutputRelay<E, S> {
    inner: E,
    output: S,
    state: OutputState,
    sink: Box<dyn LogSink>,
}

impl<E, S> OutputRelay<E, S>
where
    E: StatementExecutor,
    S: OutputLineSource,
{
    pub fn new(inner: E, output: S, sink: Box<dyn LogSink>) -> Self {
        Self {
            inner,
            output,
            state: OutputState::Armed,
            sink,
        }
    }

    /// A relay that ignores activation requests; used when server output is
    /// configured off or the target cannot produce it.
    pub fn disabled(inner: E, output: S, sink: Box<dyn LogSink>) -> Self {
        Self {
            inner,
            output,
            state: OutputState::Disabled,
            sink,
        }
    }

    pub fn state(&self) -> OutputState {
        self.state
    }

    pub fn set_active(&mut self, active: bool) {
        if self.state == OutputState::Disabled {
            return;
        }
        self.state = if active {
            OutputState::Active
        } else {
            OutputState::Armed
        };
    }

    pub fn sink(&self) -> &dyn LogSink {
        self.sink.as_ref()
    }

    fn relay_output(&mut self) -> Result<(), DbError> {
        if self.state != OutputState::Active {
            return Ok(());
        }
        while let Some(line) = self.output.next_output_line()? {
            self.sink.info(&line);
        }
        Ok(())
    }
}

impl<E, S> StatementExecutor for OutputRelay<E, S>
where
    E: StatementExecutor,
    S: OutputLineSource,
{
    fn execute(&mut self, statement: &RawSqlStatement) -> Result<(), DbError> {
        self.inner.execute(statement)?;
        self.relay_output()
    }

    fn query(&mut self, statement: &RawSqlStatement) -> Result<QueryResult, DbError> {
        let result = self.inner.query(statement)?;
        self.relay_output()?;
        Ok(result)
    }
}
