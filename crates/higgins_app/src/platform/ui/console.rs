use std::io::{self, Write};

use super::render::ConsoleCommand;

const THINKING: &str = "...";
const PROMPT: &str = "> ";

/// Applies console commands to a line-oriented terminal.
pub struct Console<W: Write> {
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn apply(&mut self, cmds: impl IntoIterator<Item = ConsoleCommand>) -> io::Result<()> {
        for cmd in cmds {
            match cmd {
                ConsoleCommand::ShowThinking => writeln!(self.out, "{THINKING}")?,
                ConsoleCommand::ShowOutput(text) => writeln!(self.out, "{text}")?,
                ConsoleCommand::ShowError(error) => writeln!(self.out, "[error] {error}")?,
                ConsoleCommand::Prompt => write!(self.out, "{PROMPT}")?,
            }
        }
        self.out.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}
