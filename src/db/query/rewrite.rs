use serde::{Deserialize, Serialize};

use crate::db::connection::NativeSql;

use super::{has_sql, segment_script, split_statements, DelimitedSegment, LogSink, RawSqlStatement};

pub const REORG_TABLE_COMMAND: &str = "REORG TABLE ";

const SERVEROUTPUT_ON_COMMAND: &str = "SET SERVEROUTPUT ON";
const SERVEROUTPUT_OFF_COMMAND: &str = "SET SERVEROUTPUT OFF";

pub const DBMS_OUTPUT_ENABLE_CALL: &str = "CALL SYSIBMADM.DBMS_OUTPUT.ENABLE(NULL)";
pub const DBMS_OUTPUT_DISABLE_CALL: &str = "CALL SYSIBMADM.DBMS_OUTPUT.DISABLE()";

/// Flags controlling segmentation and statement rewriting.
///
/// Missing fields deserialize to their defaults, so a partially specified
/// configuration never leaves a flag "unset" downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptOptions {
    /// Honor `--#SET TERMINATOR` comment lines.
    pub use_terminator_directives: bool,
    /// Rewrite `REORG TABLE X` into an ADMIN_CMD call the driver can run.
    pub rewrite_reorg_table: bool,
    /// Insert a COMMIT before `TRUNCATE TABLE` when one is missing; DB2
    /// requires truncation to start a unit of work.
    pub commit_before_truncate: bool,
    /// Ignore SET SERVEROUTPUT in scripts and never relay DBMS_OUTPUT.
    pub disable_server_output: bool,
}

impl Default for ScriptOptions {
    fn default() -> Self {
        Self {
            use_terminator_directives: true,
            rewrite_reorg_table: true,
            commit_before_truncate: true,
            disable_server_output: false,
        }
    }
}

pub struct ScriptRewriter;

impl ScriptRewriter {
    /// Turns a raw multi-statement script into the ordered list of statements
    /// the driver will actually execute.
    ///
    /// The script is segmented by terminator directives, each segment is
    /// split with its own delimiter, pure-comment fragments are dropped, and
    /// each surviving statement is escaped (best effort) and rewritten. Every
    /// statement carries the delimiter of the segment it came from.
    pub fn generate_statements(
        sql: &str,
        default_delimiter: &str,
        options: &ScriptOptions,
        escaper: Option<&dyn NativeSql>,
        sink: &dyn LogSink,
    ) -> Vec<RawSqlStatement> {
        if sql.trim().is_empty() {
            return Vec::new();
        }

        sink.debug(&format!(
            "parsing script, useTerminatorDirectives: {}, rewriteReorgTable: {}, commitBeforeTruncate: {}",
            options.use_terminator_directives,
            options.rewrite_reorg_table,
            options.commit_before_truncate
        ));

        let segments = segment_script(
            sql,
            default_delimiter,
            options.use_terminator_directives,
            sink,
        );
        Self::generate_from_segments(&segments, options, escaper, sink)
    }

    /// Variant for callers that already segmented the script and want to keep
    /// the segments; segmenter diagnostics are not repeated.
    pub fn generate_from_segments(
        segments: &[DelimitedSegment],
        options: &ScriptOptions,
        escaper: Option<&dyn NativeSql>,
        sink: &dyn LogSink,
    ) -> Vec<RawSqlStatement> {
        let mut statements: Vec<RawSqlStatement> = Vec::new();
        for segment in segments {
            for statement in split_statements(segment.sql(), true, true, segment.delimiter()) {
                let escaped = match escaper {
                    Some(db) => db.native_sql(&statement).unwrap_or_else(|err| {
                        sink.debug(&format!("native escaping failed, using raw text: {err}"));
                        statement.clone()
                    }),
                    None => statement,
                };
                if has_sql(&escaped) {
                    let rewritten =
                        Self::refactor_for_driver(&escaped, &mut statements, options, sink, segment.delimiter());
                    statements.push(RawSqlStatement::new(rewritten, segment.delimiter()));
                }
            }
        }

        statements
    }

    /// Applies the first matching rewrite rule; the truncate check runs for
    /// statements no other rule claimed and may push a synthesized COMMIT
    /// onto `emitted` before the caller appends the current statement.
    fn refactor_for_driver(
        statement: &str,
        emitted: &mut Vec<RawSqlStatement>,
        options: &ScriptOptions,
        sink: &dyn LogSink,
        delimiter: &str,
    ) -> String {
        if options.rewrite_reorg_table && statement.starts_with(REORG_TABLE_COMMAND) {
            return format!(
                "CALL SYSPROC.ADMIN_CMD ('REORG TABLE {}')",
                &statement[REORG_TABLE_COMMAND.len()..]
            );
        } else if statement.starts_with(SERVEROUTPUT_ON_COMMAND) {
            if options.disable_server_output {
                return format!("--{statement}");
            }
            return DBMS_OUTPUT_ENABLE_CALL.to_string();
        } else if statement.starts_with(SERVEROUTPUT_OFF_COMMAND) {
            if options.disable_server_output {
                return format!("--{statement}");
            }
            return DBMS_OUTPUT_DISABLE_CALL.to_string();
        }

        if options.commit_before_truncate && statement.contains("TRUNCATE TABLE ") {
            if let Some(previous) = emitted.last() {
                if !previous.sql.eq_ignore_ascii_case("COMMIT") {
                    sink.warning(
                        "TRUNCATE TABLE must start a unit of work; committing before truncate",
                    );
                    emitted.push(RawSqlStatement::new("COMMIT", delimiter));
                }
            }
        }

        statement.to_string()
    }
}
