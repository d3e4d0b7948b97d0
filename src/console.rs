//! Terminal input and colored output.
//!
//! The REPL's interactive collaborators live behind the [`Prompter`] trait:
//! line input and the blocking yes/no/escape confirmation. A scripted
//! implementation stands in for the terminal in tests.

use crate::error::{ModmanError, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::{Color, Stylize};
use crossterm::terminal;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Answer to a yes/no confirmation. Escape is not an answer; it raises
/// [`ModmanError::Cancelled`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    No,
}

/// Blocking operator input.
pub trait Prompter {
    /// Asks a yes/no question, blocking until `y`, `n`, or escape.
    fn confirm(&mut self, question: &str) -> Result<Confirmation>;

    /// Reads one line of input, trimmed. End of input is reported as
    /// `"exit"` so REPL loops terminate.
    fn read_line(&mut self, prompt: &str) -> Result<String>;
}

/// Prompter reading from the real terminal.
#[derive(Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }

    fn read_confirm_key() -> Result<Confirmation> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') => return Ok(Confirmation::Yes),
                    KeyCode::Char('n') | KeyCode::Char('N') => return Ok(Confirmation::No),
                    KeyCode::Esc => return Err(ModmanError::Cancelled),
                    _ => {}
                }
            }
        }
    }
}

impl Prompter for TerminalPrompter {
    fn confirm(&mut self, question: &str) -> Result<Confirmation> {
        println!("{question} (y/n)");

        terminal::enable_raw_mode()?;
        let outcome = Self::read_confirm_key();
        terminal::disable_raw_mode()?;

        // Echo the answer; raw mode swallowed the keypress.
        match &outcome {
            Ok(Confirmation::Yes) => println!("y"),
            Ok(Confirmation::No) => println!("n"),
            Err(_) => println!("Esc"),
        }
        outcome
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        if !prompt.is_empty() {
            print!("{prompt}");
            io::stdout().flush()?;
        }
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Ok("exit".to_string());
        }
        Ok(line.trim().to_string())
    }
}

/// One scripted operator input for tests.
#[derive(Debug, Clone)]
pub enum ScriptedInput {
    Yes,
    No,
    Escape,
    Line(String),
}

impl ScriptedInput {
    pub fn line(text: &str) -> Self {
        Self::Line(text.to_string())
    }
}

/// Prompter that replays a scripted input sequence. Once the script is
/// exhausted, line reads report `"exit"` so session loops wind down.
pub struct ScriptedPrompter {
    inputs: VecDeque<ScriptedInput>,
}

impl ScriptedPrompter {
    pub fn new(inputs: Vec<ScriptedInput>) -> Self {
        Self {
            inputs: inputs.into(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&mut self, _question: &str) -> Result<Confirmation> {
        match self.inputs.pop_front() {
            Some(ScriptedInput::Yes) => Ok(Confirmation::Yes),
            Some(ScriptedInput::No) => Ok(Confirmation::No),
            Some(ScriptedInput::Escape) => Err(ModmanError::Cancelled),
            other => Err(ModmanError::state(format!(
                "Scripted prompter expected a confirmation, got {other:?}"
            ))),
        }
    }

    fn read_line(&mut self, _prompt: &str) -> Result<String> {
        match self.inputs.pop_front() {
            Some(ScriptedInput::Line(text)) => Ok(text),
            None => Ok("exit".to_string()),
            other => Err(ModmanError::state(format!(
                "Scripted prompter expected a line, got {other:?}"
            ))),
        }
    }
}

/// Colored output helper. With color disabled every write degrades to
/// plain text.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    color: bool,
}

impl Output {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Prints a plain line.
    pub fn line(&self, text: &str) {
        println!("{text}");
    }

    /// Prints a colored line.
    pub fn colored(&self, text: &str, color: Color) {
        if self.color {
            println!("{}", text.with(color));
        } else {
            println!("{text}");
        }
    }

    /// Prints a cyan label followed by a plain value.
    pub fn labeled(&self, label: &str, value: &str) {
        if self.color {
            print!("{}", label.with(Color::Cyan));
            println!("{value}");
        } else {
            println!("{label}{value}");
        }
    }

    /// Prints a line whose right half carries its own color, like an item
    /// row's state suffix.
    pub fn split(&self, left: &str, right: &str, right_color: Color) {
        if self.color {
            print!("{left}");
            println!("{}", right.with(right_color));
        } else {
            println!("{left}{right}");
        }
    }
}
