//! Line-oriented terminal I/O for the interactive session.

use std::fmt::Display;
use std::io::Write;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

/// Reads trimmed input lines and writes prompts and output.
pub struct Console<R, W> {
    lines: Lines<R>,
    out: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(input: R, out: W) -> Self {
        Self {
            lines: input.lines(),
            out,
        }
    }

    /// Print `prompt` and read one line. `None` means end of input.
    pub async fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        let line = self
            .lines
            .next_line()
            .await
            .context("failed to read input")?;
        Ok(line.map(|l| l.trim().to_string()))
    }

    /// Write one line of output.
    pub fn say(&mut self, line: impl Display) -> Result<()> {
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    pub fn blank(&mut self) -> Result<()> {
        writeln!(self.out)?;
        Ok(())
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }
}
