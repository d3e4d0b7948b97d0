//! Named, aliased command records and the set they are registered in.
//!
//! A `CommandSet` holds the commands of one REPL menu plus an optional
//! numeric-index handler (for bare-integer input) and a help renderer.
//! Resolution is sum-typed so callers can distinguish a matched command, a
//! numeric selection, and an unknown token.

use crate::error::{ModmanError, Result};

/// Handler invoked with the cleaned argument list.
pub type Handler<C> = fn(&mut C, &[String]) -> Result<()>;

/// Handler invoked when the input line is a bare integer.
pub type IndexHandler<C> = fn(&mut C, i64) -> Result<()>;

/// Renderer invoked for `<command> help`.
pub type HelpRenderer<C> = fn(&mut C, &str) -> Result<()>;

/// One named command with aliases, help metadata, and a handler.
pub struct Command<C> {
    name: &'static str,
    aliases: &'static [&'static str],
    description: &'static str,
    usage: &'static str,
    handler: Handler<C>,
}

impl<C> Command<C> {
    pub fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: Handler<C>,
        aliases: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            aliases,
            description,
            usage,
            handler,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn handler(&self) -> Handler<C> {
        self.handler
    }

    /// Formatted usage text shown for `<command> help`.
    pub fn help_text(&self) -> String {
        format!(
            "{} - {}\n\nUsage:\n{}",
            self.name, self.description, self.usage
        )
    }

    /// Returns true when `token` equals the name or any alias, in full,
    /// case-insensitively.
    fn matches(&self, token: &str) -> bool {
        let token = token.to_lowercase();
        self.name.to_lowercase() == token
            || self.aliases.iter().any(|a| a.to_lowercase() == token)
    }
}

/// Result of resolving one input token against a command set.
pub enum Resolution<'a, C> {
    /// The token matched a command name or alias.
    Command(&'a Command<C>),
    /// The token parsed as an integer.
    NumericIndex(i64),
    /// The token matched nothing; carries the token for secondary lookups.
    NotFound(String),
}

/// Ordered collection of commands for one REPL menu.
pub struct CommandSet<C> {
    commands: Vec<Command<C>>,
    index_handler: Option<IndexHandler<C>>,
    help_renderer: HelpRenderer<C>,
}

impl<C> CommandSet<C> {
    pub fn new(help_renderer: HelpRenderer<C>, index_handler: Option<IndexHandler<C>>) -> Self {
        Self {
            commands: Vec::new(),
            index_handler,
            help_renderer,
        }
    }

    /// Registers a command.
    ///
    /// Fails when the name parses as an integer (it would shadow numeric
    /// selection) or when the name or any alias collides, case-insensitively,
    /// with a name or alias already in the set.
    pub fn register(&mut self, command: Command<C>) -> Result<()> {
        if command.name.parse::<i64>().is_ok() {
            return Err(ModmanError::validation("Command name cannot be a number"));
        }

        for token in std::iter::once(&command.name).chain(command.aliases) {
            if let Resolution::Command(existing) = self.resolve(token) {
                return Err(ModmanError::validation(format!(
                    "Command token '{token}' is already taken by '{}'",
                    existing.name
                )));
            }
        }

        self.commands.push(command);
        Ok(())
    }

    /// Resolves an input token to a command, a numeric index, or nothing.
    pub fn resolve(&self, token: &str) -> Resolution<'_, C> {
        if let Ok(index) = token.parse::<i64>() {
            return Resolution::NumericIndex(index);
        }
        match self.commands.iter().find(|c| c.matches(token)) {
            Some(command) => Resolution::Command(command),
            None => Resolution::NotFound(token.to_string()),
        }
    }

    pub fn index_handler(&self) -> Option<IndexHandler<C>> {
        self.index_handler
    }

    pub fn help_renderer(&self) -> HelpRenderer<C> {
        self.help_renderer
    }

    pub fn commands(&self) -> &[Command<C>] {
        &self.commands
    }

    /// Command names joined with a separator, for the REPL prompt line.
    pub fn names_joined(&self, separator: char) -> String {
        self.commands
            .iter()
            .map(|c| c.name)
            .collect::<Vec<_>>()
            .join(&separator.to_string())
    }
}
