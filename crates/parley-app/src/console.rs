//! Terminal prompting and output.

use std::io::Write;

use async_trait::async_trait;
use parley_bridge::MessageSink;
use parley_common::{BridgeError, Result};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Interactive surface of the conversation loop.
#[async_trait]
pub trait Console: MessageSink + Send {
    /// Show `question` and return the next line of input, without its line
    /// terminator. Closed input is `BridgeError::InputClosed`.
    async fn prompt(&mut self, question: &str) -> Result<String>;
}

/// Console backed by the process's stdin and stdout.
pub struct StdConsole {
    lines: Lines<BufReader<Stdin>>,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageSink for StdConsole {
    fn emit(&mut self, message: &str) -> std::io::Result<()> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{message}")?;
        out.flush()
    }
}

#[async_trait]
impl Console for StdConsole {
    async fn prompt(&mut self, question: &str) -> Result<String> {
        let mut out = std::io::stdout();
        write!(out, "{}", prompt_label(question))?;
        out.flush()?;

        match self.lines.next_line().await? {
            Some(line) => Ok(strip_line_ending(line)),
            None => Err(BridgeError::InputClosed),
        }
    }
}

pub(crate) fn prompt_label(question: &str) -> String {
    format!("> {question}: ")
}

/// `Lines` already drops `\n`; a stray `\r` from CRLF input is removed too.
/// Everything else, including surrounding spaces, is kept.
fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\r') {
        line.pop();
    }
    line
}
