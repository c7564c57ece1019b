use std::env;
use std::fs;
use std::time::Instant;

use chrono::Local;

use crate::db::connection::OfflineConnection;
use crate::db::query::{segment_script, ScriptRewriter, TracingSink};
use crate::utils::{AppConfig, RunHistory, RunHistoryEntry};

pub struct App {
    config: AppConfig,
}

impl App {
    pub fn new() -> Self {
        let config = AppConfig::load();
        Self { config }
    }

    /// Dry run: rewrite the script and print the statements the driver would
    /// execute, each tagged with its delimiter.
    pub fn run(&self) -> i32 {
        let mut args = env::args().skip(1);
        let Some(path) = args.next() else {
            eprintln!("usage: db2script <script.sql>");
            return 2;
        };

        let sql = match fs::read_to_string(&path) {
            Ok(sql) => sql,
            Err(err) => {
                eprintln!("Cannot read {path}: {err}");
                return 1;
            }
        };

        let start = Instant::now();
        let sink = TracingSink;
        let escaper = OfflineConnection;
        let segments = segment_script(
            &sql,
            &self.config.default_delimiter,
            self.config.script.use_terminator_directives,
            &sink,
        );
        let statements =
            ScriptRewriter::generate_from_segments(&segments, &self.config.script, Some(&escaper), &sink);

        for statement in &statements {
            println!("-- delimiter: {}", statement.delimiter);
            println!("{}", statement.sql);
            println!();
        }
        println!("-- {} statement(s)", statements.len());

        let mut history = RunHistory::load();
        history.add_entry(RunHistoryEntry {
            path,
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            statement_count: statements.len(),
            segment_count: segments.len(),
            duration_ms: start.elapsed().as_millis() as u64,
        });
        if let Err(err) = history.save() {
            eprintln!("Warning: failed to save run history: {err}");
        }

        0
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
