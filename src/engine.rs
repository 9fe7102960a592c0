//! The [`Engine`]: executes scripts against a [`Browser`] session.

use crate::browser::Browser;
use crate::command::{Command, Context};
use crate::parser::parse_line;
use anyhow::{Context as _, Result};
use std::path::Path;

/// Executes pagescript commands against one browser session.
///
/// One engine drives one session; to run several scripts concurrently,
/// create one engine per script with its own browser. Scripts never share
/// state, so a failure in one engine cannot affect another.
pub struct Engine {
    ctx: Context,
}

impl Engine {
    /// Create an engine over a browser session.
    pub fn new(browser: Box<dyn Browser>) -> Self {
        Self {
            ctx: Context::new(browser),
        }
    }

    /// Run a script line by line: resolve, parse, and execute each command
    /// in turn.
    ///
    /// Lines empty after trimming or starting with `--` are skipped. The
    /// first failing line aborts the rest of the script; lines before it
    /// have already executed. Errors carry the line number and line text.
    pub async fn run_str(&mut self, script: &str) -> Result<()> {
        for (line_num, line) in script.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with("--") {
                continue;
            }
            let cmd = parse_line(line)
                .with_context(|| format!("Failed to parse line {}: {}", line_num + 1, line))?;
            tracing::debug!(line = line_num + 1, keyword = cmd.name(), "executing command");
            cmd.execute(&mut self.ctx)
                .await
                .with_context(|| format!("Failed at line {}: {}", line_num + 1, line))?;
        }
        Ok(())
    }

    /// Read a script file and run it with [`run_str`](Self::run_str).
    pub async fn run_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let script = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script file: {}", path.display()))?;
        self.run_str(&script).await
    }

    /// Execute pre-parsed commands in order, stopping at the first failure.
    pub async fn execute(&mut self, commands: Vec<Box<dyn Command>>) -> Result<()> {
        for cmd in commands {
            cmd.execute(&mut self.ctx)
                .await
                .with_context(|| format!("Command '{}' failed", cmd.name()))?;
        }
        Ok(())
    }

    /// Access the execution context, e.g. to reach the browser between runs.
    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.ctx
    }
}
