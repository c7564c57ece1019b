//! Delimiter-based statement splitting for a single script segment.
//!
//! The scanner tracks quote and comment state so a delimiter only splits at
//! idle state; a `;` inside `'...'`, `"..."`, `-- ...` or `/* ... */` never
//! terminates a statement. DB2 scripts switch to an uncommon delimiter (for
//! example `@`) around compound statements, so no procedural block tracking
//! is needed here.

#[derive(Default)]
struct SplitState {
    in_single_quote: bool,
    in_double_quote: bool,
    in_line_comment: bool,
    in_block_comment: bool,
}

impl SplitState {
    fn is_idle(&self) -> bool {
        !self.in_single_quote
            && !self.in_double_quote
            && !self.in_line_comment
            && !self.in_block_comment
    }
}

struct StatementBuilder {
    state: SplitState,
    delimiter: Vec<char>,
    current: String,
    statements: Vec<String>,
}

impl StatementBuilder {
    fn new(delimiter: &str) -> Self {
        Self {
            state: SplitState::default(),
            delimiter: delimiter.chars().collect(),
            current: String::new(),
            statements: Vec::new(),
        }
    }

    fn matches_delimiter(&self, chars: &[char], i: usize) -> bool {
        !self.delimiter.is_empty()
            && chars.len() - i >= self.delimiter.len()
            && chars[i..i + self.delimiter.len()] == self.delimiter[..]
    }

    fn push_current(&mut self) {
        let trimmed = self.current.trim();
        if !trimmed.is_empty() {
            self.statements.push(trimmed.to_string());
        }
        self.current.clear();
    }

    fn process_text(&mut self, text: &str) {
        let chars: Vec<char> = text.chars().collect();
        let len = chars.len();
        let mut i = 0usize;

        while i < len {
            let c = chars[i];
            let next = if i + 1 < len { Some(chars[i + 1]) } else { None };

            if self.state.in_line_comment {
                self.current.push(c);
                if c == '\n' {
                    self.state.in_line_comment = false;
                }
                i += 1;
                continue;
            }

            if self.state.in_block_comment {
                self.current.push(c);
                if c == '*' && next == Some('/') {
                    self.current.push('/');
                    self.state.in_block_comment = false;
                    i += 2;
                    continue;
                }
                i += 1;
                continue;
            }

            if self.state.in_single_quote {
                self.current.push(c);
                if c == '\'' {
                    if next == Some('\'') {
                        self.current.push('\'');
                        i += 2;
                        continue;
                    }
                    self.state.in_single_quote = false;
                }
                i += 1;
                continue;
            }

            if self.state.in_double_quote {
                self.current.push(c);
                if c == '"' {
                    if next == Some('"') {
                        self.current.push('"');
                        i += 2;
                        continue;
                    }
                    self.state.in_double_quote = false;
                }
                i += 1;
                continue;
            }

            if c == '-' && next == Some('-') {
                self.state.in_line_comment = true;
                self.current.push('-');
                self.current.push('-');
                i += 2;
                continue;
            }

            if c == '/' && next == Some('*') {
                self.state.in_block_comment = true;
                self.current.push('/');
                self.current.push('*');
                i += 2;
                continue;
            }

            if c == '\'' {
                self.state.in_single_quote = true;
                self.current.push(c);
                i += 1;
                continue;
            }

            if c == '"' {
                self.state.in_double_quote = true;
                self.current.push(c);
                i += 1;
                continue;
            }

            if self.matches_delimiter(&chars, i) {
                self.push_current();
                i += self.delimiter.len();
                continue;
            }

            self.current.push(c);
            i += 1;
        }
    }

    fn finalize(&mut self) {
        self.push_current();
    }
}

/// Splits `sql` into individual statements terminated by `delimiter`.
///
/// With `strip_comments` set, leading and trailing comments are removed from
/// each statement; fragments that are nothing but comments disappear. With
/// `split` unset, the whole text is returned as one statement.
pub fn split_statements(
    sql: &str,
    strip_comments: bool,
    split: bool,
    delimiter: &str,
) -> Vec<String> {
    let cleanup = |stmt: String| -> Option<String> {
        let cleaned = if strip_comments {
            strip_surrounding_comments(&stmt)
        } else {
            stmt.trim().to_string()
        };
        if cleaned.is_empty() {
            None
        } else {
            Some(cleaned)
        }
    };

    if !split {
        return cleanup(sql.to_string()).into_iter().collect();
    }

    let mut builder = StatementBuilder::new(delimiter);
    builder.process_text(sql);
    builder.finalize();
    builder.statements.into_iter().filter_map(cleanup).collect()
}

/// True when the text still carries executable SQL once comments are gone.
pub fn has_sql(sql: &str) -> bool {
    !strip_surrounding_comments(sql).is_empty()
}

pub fn strip_leading_comments(sql: &str) -> String {
    let mut remaining = sql;

    loop {
        let trimmed = remaining.trim_start();

        if trimmed.starts_with("--") {
            if let Some(line_end) = trimmed.find('\n') {
                remaining = &trimmed[line_end + 1..];
                continue;
            }
            return String::new();
        }

        if trimmed.starts_with("/*") {
            if let Some(block_end) = trimmed.find("*/") {
                remaining = &trimmed[block_end + 2..];
                continue;
            }
            return String::new();
        }

        return trimmed.to_string();
    }
}

pub fn strip_trailing_comments(sql: &str) -> String {
    let mut remaining = sql;

    loop {
        let trimmed = remaining.trim_end();
        if trimmed.is_empty() {
            return String::new();
        }

        // A final line that is only a `--` comment can be dropped whole.
        let last_line_start = trimmed.rfind('\n').map(|i| i + 1).unwrap_or(0);
        if trimmed[last_line_start..].trim_start().starts_with("--") {
            if last_line_start == 0 {
                return String::new();
            }
            remaining = &trimmed[..last_line_start];
            continue;
        }

        if trimmed.ends_with("*/") {
            if let Some(open) = trimmed.rfind("/*") {
                remaining = &trimmed[..open];
                continue;
            }
        }

        return trimmed.to_string();
    }
}

pub fn strip_surrounding_comments(sql: &str) -> String {
    strip_trailing_comments(&strip_leading_comments(sql))
}
