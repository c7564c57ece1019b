use crate::db::connection::{DbError, NativeSql, OutputLineSource};
use crate::db::query::{
    LogSink, OutputRelay, RawSqlStatement, ScriptOptions, ScriptRewriter, StatementExecutor,
};

/// Drives successive script executions against one database target.
///
/// The session owns the output relay, which is the only state that survives
/// between scripts: once a script enables server output, later scripts keep
/// draining it until one disables it again.
pub struct ScriptSession<E, S>
where
    E: StatementExecutor,
    S: OutputLineSource,
{
    executor: OutputRelay<E, S>,
    options: ScriptOptions,
    default_delimiter: String,
}

impl<E, S> ScriptSession<E, S>
where
    E: StatementExecutor,
    S: OutputLineSource,
{
    pub fn new(
        executor: E,
        output: S,
        options: ScriptOptions,
        default_delimiter: &str,
        sink: Box<dyn LogSink>,
    ) -> Self {
        let executor = if options.disable_server_output {
            OutputRelay::disabled(executor, output, sink)
        } else {
            OutputRelay::new(executor, output, sink)
        };
        Self {
            executor,
            options,
            default_delimiter: default_delimiter.to_string(),
        }
    }

    pub fn executor(&self) -> &OutputRelay<E, S> {
        &self.executor
    }

    /// Rewrites and executes one script; returns the executed statements.
    pub fn run_script(
        &mut self,
        sql: &str,
        escaper: Option<&dyn NativeSql>,
    ) -> Result<Vec<RawSqlStatement>, DbError> {
        let statements = ScriptRewriter::generate_statements(
            sql,
            &self.default_delimiter,
            &self.options,
            escaper,
            self.executor.sink(),
        );

        self.arm_output_relay(&statements);

        for statement in &statements {
            self.executor.execute(statement)?;
        }

        Ok(statements)
    }

    /// Toggles the relay from the batch about to run: an enable call turns it
    /// on, a disable call (with no enable) turns it off, otherwise the
    /// previous state sticks.
    fn arm_output_relay(&mut self, statements: &[RawSqlStatement]) {
        let enables = statements
            .iter()
            .any(|s| s.sql.contains("DBMS_OUTPUT.ENABLE"));
        let disables = statements
            .iter()
            .any(|s| s.sql.contains("DBMS_OUTPUT.DISABLE"));

        if enables {
            self.executor.set_active(true);
        } else if disables {
            self.executor.set_active(false);
        }
    }
}
