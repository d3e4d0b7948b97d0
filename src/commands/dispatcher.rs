//! Line dispatch against a command set.
//!
//! A line is head + arguments. A bare-integer head goes straight to the
//! set's numeric-index handler, bypassing command resolution. Otherwise the
//! head resolves by name/alias; `<command> help` (or `?`) renders usage
//! instead of executing, and anything a handler raises propagates to the
//! caller unchanged.

use super::registry::{CommandSet, Resolution};
use crate::error::{ModmanError, Result};

/// Dispatches one input line.
///
/// An unknown head token surfaces as [`ModmanError::UnknownCommand`] carrying
/// the token, so callers can attempt a secondary lookup (e.g. a unique
/// name-prefix match against profiles or items) before reporting it.
pub fn dispatch<C>(set: &CommandSet<C>, ctx: &mut C, line: &str) -> Result<()> {
    let mut parts = line.trim().split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(());
    };

    let command = match set.resolve(head) {
        Resolution::NumericIndex(index) => {
            if let Some(handler) = set.index_handler() {
                handler(ctx, index)?;
            }
            return Ok(());
        }
        Resolution::NotFound(token) => return Err(ModmanError::UnknownCommand(token)),
        Resolution::Command(command) => command,
    };

    let args: Vec<String> = parts.map(clean_argument).collect();

    if args.len() == 1 && (args[0] == "help" || args[0] == "?") {
        (set.help_renderer())(ctx, &command.help_text())
    } else {
        (command.handler())(ctx, &args)
    }
}

/// Strips surrounding quote characters and trims one argument token.
fn clean_argument(raw: &str) -> String {
    raw.trim().trim_matches('"').trim().to_string()
}
