use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};

use super::app::App;
use super::command::Command;

const MAIN_PROMPT: &str = "\nEnter command (Enter 'HELP' to see all commands): ";

/// Severity of a status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

impl StatusKind {
    fn color(self) -> Option<Color> {
        match self {
            StatusKind::Info => None,
            StatusKind::Success => Some(Color::Green),
            StatusKind::Error => Some(Color::Red),
        }
    }
}

/// Line-oriented input plus styled output. Generic over the streams so a
/// whole session can run against in-memory buffers.
pub struct Console<R, W> {
    input: R,
    output: W,
    color: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, color: bool) -> Self {
        Self {
            input,
            output,
            color,
        }
    }

    /// Show `label` and read one line without its terminator. `None` means
    /// the input is exhausted.
    pub fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}").context("failed to write prompt")?;
        self.output.flush().context("failed to flush prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    pub fn line(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}").context("failed to write output")
    }

    pub fn lines<S: AsRef<str>>(&mut self, lines: &[S]) -> Result<()> {
        for line in lines {
            self.line(line.as_ref())?;
        }
        Ok(())
    }

    /// Print a status message, coloured by severity when colour is enabled.
    pub fn status(&mut self, kind: StatusKind, text: &str) -> Result<()> {
        match kind.color().filter(|_| self.color) {
            Some(color) => queue!(
                self.output,
                SetForegroundColor(color),
                Print(text),
                ResetColor,
                Print("\n")
            )
            .context("failed to write status")?,
            None => self.line(text)?,
        }
        self.output.flush().context("failed to flush output")
    }

    pub fn output(&self) -> &W {
        &self.output
    }
}

/// Run an interactive session on the process's stdin and stdout.
pub fn run_app(app: &mut App, startup_file: Option<&str>, color: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout(), color);
    run_session(app, &mut console, startup_file)
}

/// Optionally open `startup_file`, then read and dispatch commands until EXIT
/// or end of input.
pub fn run_session<R: BufRead, W: Write>(
    app: &mut App,
    console: &mut Console<R, W>,
    startup_file: Option<&str>,
) -> Result<()> {
    if let Some(path) = startup_file {
        app.open_path(path, console)?;
    }

    while let Some(line) = console.prompt(MAIN_PROMPT)? {
        if app.handle(Command::parse(&line), console)? {
            break;
        }
    }
    Ok(())
}
