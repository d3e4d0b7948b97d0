//! Batch-toggle selector parsing.
//!
//! A selector is a comma-separated list whose elements are a single index,
//! an inclusive range `a-b` (order-independent), or the literal `all`.
//! An optional leading mode token (`e` / `d`) switches the batch from
//! toggling to forcing a state.

use crate::error::{ModmanError, Result};
use std::collections::BTreeSet;

/// What a batch operation does to each selected item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleMode {
    /// Flip each item's current state.
    Toggle,
    /// Move items into Active; items already there are skipped.
    ForceEnable,
    /// Move items into Inactive; items already there are skipped.
    ForceDisable,
}

/// Splits an optional leading `e`/`d` mode token off the argument list.
pub fn split_mode(args: &[String]) -> (ToggleMode, &[String]) {
    match args.first().map(|s| s.to_lowercase()) {
        Some(ref t) if t == "e" => (ToggleMode::ForceEnable, &args[1..]),
        Some(ref t) if t == "d" => (ToggleMode::ForceDisable, &args[1..]),
        _ => (ToggleMode::Toggle, args),
    }
}

/// Parses a selector against a catalog of `len` items.
///
/// `filtered` is the index set currently passing the active filter; `all`
/// expands to it when present, otherwise to the entire catalog. The result
/// is sorted and deduplicated.
pub fn parse_selection(
    selector: &str,
    len: usize,
    filtered: Option<&[usize]>,
) -> Result<Vec<usize>> {
    let mut selected = BTreeSet::new();

    for element in selector.split(',') {
        let element = element.trim();
        if element.is_empty() {
            return Err(ModmanError::validation(format!(
                "Invalid selection '{selector}'"
            )));
        }

        if element.eq_ignore_ascii_case("all") {
            match filtered {
                Some(indices) => selected.extend(indices.iter().copied()),
                None => selected.extend(0..len),
            }
        } else if let Some((a, b)) = element.split_once('-') {
            let lo = parse_index(a, len)?;
            let hi = parse_index(b, len)?;
            // "3-1" selects the same set as "1-3".
            selected.extend(lo.min(hi)..=lo.max(hi));
        } else {
            selected.insert(parse_index(element, len)?);
        }
    }

    Ok(selected.into_iter().collect())
}

fn parse_index(token: &str, len: usize) -> Result<usize> {
    let index: usize = token
        .trim()
        .parse()
        .map_err(|_| ModmanError::validation(format!("Invalid index '{}'", token.trim())))?;
    if index >= len {
        return Err(ModmanError::validation("Index out of range"));
    }
    Ok(index)
}
