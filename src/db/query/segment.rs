use super::LogSink;

/// In-script directive that switches the statement delimiter for the rest of
/// the file (DB2 CLP convention). Matched case-insensitively as a line prefix.
pub const SET_TERMINATOR_DIRECTIVE: &str = "--#SET TERMINATOR ";

pub const DEFAULT_DELIMITER: &str = ";";

/// A contiguous run of script text that shares one statement delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedSegment {
    delimiter: String,
    sql: String,
}

impl DelimitedSegment {
    /// Creates a segment; an empty delimiter falls back to `";"`.
    pub fn new(delimiter: &str, initial: &str) -> Self {
        let delimiter = if delimiter.is_empty() {
            DEFAULT_DELIMITER
        } else {
            delimiter
        };
        Self {
            delimiter: delimiter.to_string(),
            sql: initial.to_string(),
        }
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn append(&mut self, text: &str) -> &mut Self {
        self.sql.push_str(text);
        self
    }

    /// Removes and returns the trailing text after the last genuine delimiter
    /// occurrence. The removed text has not been terminated under this
    /// segment's delimiter and belongs to the next delimiter region. Returns
    /// an empty string (and removes nothing) when no genuine occurrence
    /// exists, or when the tail is only whitespace: a blank tail is
    /// terminated content, not an unterminated statement.
    pub fn take_after_last_delimiter(&mut self) -> String {
        let Some(end) = last_real_delimiter(&self.sql, &self.delimiter) else {
            return String::new();
        };
        if self.sql[end..].trim().is_empty() {
            return String::new();
        }
        self.sql.split_off(end)
    }
}

/// Finds the index just past the right-most occurrence of `delimiter` that is
/// neither inside a `-- ...` line comment nor inside a `/* ... */` block
/// comment.
///
/// Iterative right-to-left scan: each rejected candidate moves the search
/// limit strictly left, so the loop always terminates. An unmatched `/*`
/// is treated as commenting out everything up to the end of the buffer, so
/// no delimiter after it counts; a `/*` that is itself behind a `--` on its
/// own line is inert.
pub fn last_real_delimiter(sql: &str, delimiter: &str) -> Option<usize> {
    if delimiter.is_empty() {
        return None;
    }

    let mut limit = sql.len();
    loop {
        let pos = sql[..limit].rfind(delimiter)?;

        // A `--` between the start of the candidate's line and the candidate
        // puts the candidate inside a line comment.
        let line_start = sql[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
        if let Some(marker) = sql[line_start..pos].find("--") {
            limit = line_start + marker;
            continue;
        }

        // A `/*` before the candidate with no `*/` in between puts the
        // candidate inside a block comment (terminated or not). An opener
        // that itself sits behind a `--` on its own line is commented out
        // and does not open anything.
        let mut search = pos;
        let mut unmatched_open = None;
        while let Some(open) = sql[..search].rfind("/*") {
            let opener_line = sql[..open].rfind('\n').map(|i| i + 1).unwrap_or(0);
            if sql[opener_line..open].contains("--") {
                search = open;
                continue;
            }
            if !sql[open + 2..pos].contains("*/") {
                unmatched_open = Some(open);
            }
            break;
        }
        if let Some(open) = unmatched_open {
            limit = open;
            continue;
        }

        return Some(pos + delimiter.len());
    }
}

fn normalize_line_endings(sql: &str) -> String {
    sql.replace("\r\n", "\n").replace('\r', "\n")
}

/// Splits a script into delimiter-homogeneous segments.
///
/// The script is walked line by line; a `--#SET TERMINATOR <d>` line closes
/// the current segment and opens a new one with delimiter `<d>`. Text after
/// the current segment's last genuine delimiter is carried into the new
/// segment, since it has not been terminated yet. The directive line itself
/// is appended to the new segment, where it reads as a plain comment.
///
/// A directive with an empty or whitespace-only value keeps the previous
/// delimiter and logs a warning.
pub fn segment_script(
    sql: &str,
    default_delimiter: &str,
    use_directives: bool,
    sink: &dyn LogSink,
) -> Vec<DelimitedSegment> {
    let normalized = normalize_line_endings(sql);
    let mut lines: Vec<&str> = normalized.split('\n').collect();
    while lines.last() == Some(&"") {
        lines.pop();
    }

    let mut segments: Vec<DelimitedSegment> = Vec::new();
    let mut current = DelimitedSegment::new(default_delimiter, "");

    for line in lines {
        if use_directives && line.to_uppercase().starts_with(SET_TERMINATOR_DIRECTIVE) {
            let spillover = current.take_after_last_delimiter();
            let value = line[SET_TERMINATOR_DIRECTIVE.len()..].trim();
            let delimiter = if value.is_empty() {
                sink.warning(&format!(
                    "{} directive has no value; keeping delimiter `{}`",
                    SET_TERMINATOR_DIRECTIVE.trim_end(),
                    current.delimiter()
                ));
                current.delimiter().to_string()
            } else {
                value.to_string()
            };
            let next = DelimitedSegment::new(&delimiter, &spillover);
            segments.push(std::mem::replace(&mut current, next));
        }
        current.append(line).append("\n");
    }
    segments.push(current);

    segments
}
