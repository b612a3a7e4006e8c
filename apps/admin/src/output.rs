//! Screen output: plain tables on stdout, or JSON with `--json`.

use std::io::{self, BufRead, Write};

use serde::Serialize;

use crate::error::{AppError, AppResult};

/// How the current invocation prints.
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    pub json: bool,
    /// Skip confirmation prompts.
    pub assume_yes: bool,
}

impl Output {
    pub fn new(json: bool, assume_yes: bool) -> Self {
        Output { json, assume_yes }
    }

    /// Prints `value` as pretty JSON.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> AppResult<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Prints `value` as JSON in `--json` mode, otherwise runs `human`.
    pub fn emit<T, F>(&self, value: &T, human: F) -> AppResult<()>
    where
        T: Serialize + ?Sized,
        F: FnOnce(),
    {
        if self.json {
            self.json(value)
        } else {
            human();
            Ok(())
        }
    }

    /// A one-line result message, or `{"message": ...}` in JSON mode.
    pub fn message(&self, text: &str) -> AppResult<()> {
        self.emit(&serde_json::json!({ "message": text }), || println!("{}", text))
    }

    /// Asks on stderr before a destructive action.
    pub fn confirm(&self, prompt: &str) -> AppResult<()> {
        if self.assume_yes {
            return Ok(());
        }
        let stdin = io::stdin();
        confirm_with(prompt, &mut stdin.lock(), &mut io::stderr())
    }
}

/// Reads a yes/no answer; anything but `y`/`yes` cancels.
pub fn confirm_with<R: BufRead, W: Write>(prompt: &str, input: &mut R, prompt_out: &mut W) -> AppResult<()> {
    write!(prompt_out, "{} [y/N] ", prompt)?;
    prompt_out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    match answer.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Ok(()),
        _ => Err(AppError::Cancelled),
    }
}

/// Reads one trimmed line after printing `prompt` to stderr.
pub fn prompt_line(prompt: &str) -> AppResult<String> {
    let mut err = io::stderr();
    write!(err, "{}", prompt)?;
    err.flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

// =============================================================================
// Tables
// =============================================================================

/// Left-aligned text table with a header rule.
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Table {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let columns = self.headers.len();
        let mut widths: Vec<usize> = self.headers.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate().take(columns) {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let mut out = String::new();
        push_line(&mut out, &self.headers, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(&mut out, &rule, &widths);
        for row in &self.rows {
            push_line(&mut out, row, &widths);
        }
        out
    }

    /// Prints the table, or `empty` when there are no rows.
    pub fn print_or(&self, empty: &str) {
        if self.is_empty() {
            println!("{}", empty);
        } else {
            print!("{}", self.render());
        }
    }
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (i, width) in widths.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        if i > 0 {
            line.push_str("  ");
        }
        line.push_str(cell);
        let pad = width.saturating_sub(cell.chars().count());
        line.extend(std::iter::repeat(' ').take(pad));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
