//! The interactive session: state, REPL loops, and command handlers.
//!
//! All session state lives in one [`App`] value threaded through every
//! handler: the loaded profiles, the current profile session's catalog
//! snapshot, the session-wide display filter, and the last status message.

mod item_menu;
mod profile_menu;

use crate::catalog::{Catalog, Item};
use crate::console::{Confirmation, Output, Prompter};
use crate::error::{ModmanError, Result};
use crate::persistence::ProfileStore;
use crate::profile::Profile;
use crossterm::style::Color;
use tracing::{info, warn};

/// Tone of the status line shown under the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
    Notice,
}

/// Last command outcome, rendered once and then cleared.
#[derive(Debug, Clone)]
struct Status {
    kind: StatusKind,
    text: String,
}

/// The session context.
pub struct App {
    store: ProfileStore,
    profiles: Vec<Profile>,
    output: Output,
    prompter: Box<dyn Prompter>,
    /// Session-wide display filter, shared by both menus.
    filter: String,
    status: Option<Status>,
    /// Index of the profile whose item session is active.
    current: Option<usize>,
    /// Catalog snapshot of the active profile session.
    catalog: Option<Catalog>,
    /// Catalog indices passing the filter at the last render; `all`
    /// selections are scoped to this set while a filter is active.
    filtered: Vec<usize>,
}

impl App {
    pub fn new(
        store: ProfileStore,
        profiles: Vec<Profile>,
        output: Output,
        prompter: Box<dyn Prompter>,
    ) -> Self {
        Self {
            store,
            profiles,
            output,
            prompter,
            filter: String::new(),
            status: None,
            current: None,
            catalog: None,
            filtered: Vec::new(),
        }
    }

    /// Runs the interactive session: optionally enters a startup profile,
    /// then the profile menu until the operator exits.
    pub fn run(&mut self, startup_profile: Option<&str>) -> Result<()> {
        if let Some(name) = startup_profile {
            match self.find_profile_by_prefix(name) {
                Some(index) => {
                    if let Err(e) = item_menu::run(self, index) {
                        warn!("Startup profile session failed: {e}");
                        self.set_status(StatusKind::Error, format!("Error: {e}"));
                    }
                }
                None => {
                    self.set_status(
                        StatusKind::Error,
                        format!("Error: No profile matching '{name}'"),
                    );
                }
            }
        }
        profile_menu::run(self)
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    fn set_status(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = Some(Status {
            kind,
            text: text.into(),
        });
    }

    /// Prints and clears the pending status line.
    fn render_status(&mut self) {
        if let Some(status) = self.status.take() {
            let color = match status.kind {
                StatusKind::Success => Color::Green,
                StatusKind::Error => Color::Red,
                StatusKind::Notice => Color::Magenta,
            };
            self.output.line("");
            self.output.colored(&status.text, color);
        }
    }

    fn current_profile(&self) -> Result<&Profile> {
        self.current
            .and_then(|index| self.profiles.get(index))
            .ok_or_else(|| ModmanError::state("No profile loaded"))
    }

    fn current_profile_mut(&mut self) -> Result<&mut Profile> {
        self.current
            .and_then(|index| self.profiles.get_mut(index))
            .ok_or_else(|| ModmanError::state("No profile loaded"))
    }

    fn save_profiles(&mut self) -> Result<()> {
        self.store.save_all(&self.profiles)
    }

    /// Asks a yes/no question; escape propagates as a cancellation.
    fn confirm(&mut self, question: &str) -> Result<bool> {
        Ok(self.prompter.confirm(question)? == Confirmation::Yes)
    }

    /// Blocks until the operator presses enter.
    fn pause(&mut self) -> Result<()> {
        self.prompter.read_line("\n(Enter to continue)")?;
        Ok(())
    }

    /// Returns the catalog item at a user-supplied index, cloned so
    /// handlers can mutate the session afterwards.
    fn item_at(&self, index: i64) -> Result<Item> {
        self.catalog
            .as_ref()
            .ok_or_else(|| ModmanError::state("No profile loaded"))?
            .get(index)
            .cloned()
    }

    /// Returns the single profile whose name starts with `prefix`
    /// (case-insensitively), or None when absent or ambiguous.
    fn find_profile_by_prefix(&self, prefix: &str) -> Option<usize> {
        let prefix = prefix.to_lowercase();
        let mut found = None;
        for (i, profile) in self.profiles.iter().enumerate() {
            if profile.name.to_lowercase().starts_with(&prefix) {
                if found.is_some() {
                    return None;
                }
                found = Some(i);
            }
        }
        found
    }

    /// Re-assigns ordinal positions after the profile list was reordered.
    fn renumber_profiles(&mut self) {
        for (i, profile) in self.profiles.iter_mut().enumerate() {
            profile.ordinal_position = i as u32;
        }
    }
}

/// Parses a user-supplied index token.
fn parse_index(token: &str) -> Result<i64> {
    token
        .trim()
        .parse()
        .map_err(|_| ModmanError::validation("Please enter a number"))
}

/// Guards the common `<command> <index>` argument shape.
fn require_index_arg(args: &[String]) -> Result<&str> {
    match args {
        [] => Err(ModmanError::validation("No index specified")),
        [index] => Ok(index),
        _ => Err(ModmanError::validation("Too many arguments")),
    }
}

/// Help renderer shared by both menus.
fn render_help(app: &mut App, help: &str) -> Result<()> {
    app.output.line("");
    app.output.colored(help, Color::Cyan);
    app.pause()
}

/// `filter` command, registered in both menus. Empty input clears.
fn cmd_filter(app: &mut App, args: &[String]) -> Result<()> {
    app.filter = args.join(" ").trim().to_string();
    if app.filter.is_empty() {
        app.set_status(StatusKind::Success, "Removed filter");
    } else {
        app.set_status(
            StatusKind::Success,
            format!("Applied filter '{}'", app.filter),
        );
    }
    Ok(())
}

/// Boundary handling shared by both REPL loops: render a status line for
/// anything a command raised, with a menu-specific fallback for unknown
/// tokens.
fn report_dispatch_error(app: &mut App, error: ModmanError) {
    match error {
        ModmanError::Cancelled => app.set_status(StatusKind::Error, "Cancelled"),
        e => {
            info!("Command failed ({}): {e}", e.category());
            app.set_status(StatusKind::Error, format!("Error: {e}"));
        }
    }
}
