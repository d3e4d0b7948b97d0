//! State transitions on disk: toggling, renaming, and deleting items.
//!
//! Every move is a single rename; nothing here copies file contents, so an
//! interrupted operation never leaves a partially written item behind.

use crate::catalog::{Item, ItemKind, Location};
use crate::error::{ModmanError, Result};
use crate::selector::ToggleMode;
use std::path::Path;
use tracing::debug;

/// Outcome of a toggle request on one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The item was moved to the other location.
    Moved(Location),
    /// The item was already in the requested state; nothing was done.
    AlreadyEnabled,
    /// The item was already in the requested state; nothing was done.
    AlreadyDisabled,
}

/// Summary of a batch toggle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    /// Items actually moved.
    pub moved: usize,
    /// Items skipped because they were already in the target state.
    pub skipped: usize,
}

/// Performs catalog mutations against one profile's two locations.
pub struct SyncEngine<'a> {
    active_path: &'a Path,
    inactive_path: &'a Path,
}

impl<'a> SyncEngine<'a> {
    pub fn new(active_path: &'a Path, inactive_path: &'a Path) -> Self {
        Self {
            active_path,
            inactive_path,
        }
    }

    /// Moves an item to the location implied by `desired_enabled`, or flips
    /// it when `desired_enabled` is None.
    ///
    /// Requesting the state the item is already in is not an error; it is
    /// reported as a distinct outcome and no filesystem call is made.
    pub fn toggle(&self, item: &Item, desired_enabled: Option<bool>) -> Result<ToggleOutcome> {
        let target = desired_enabled.unwrap_or(!item.is_enabled());
        if item.is_enabled() == target {
            return Ok(if target {
                ToggleOutcome::AlreadyEnabled
            } else {
                ToggleOutcome::AlreadyDisabled
            });
        }

        let dest_dir = if target {
            self.active_path
        } else {
            self.inactive_path
        };
        let dest = dest_dir.join(&item.name);
        move_entry(item.kind, &item.path, &dest)?;
        debug!(name = %item.name, dest = %dest.display(), "moved item");

        Ok(ToggleOutcome::Moved(if target {
            Location::Active
        } else {
            Location::Inactive
        }))
    }

    /// Applies a batch mode to one item, counting only actual moves.
    pub fn apply(&self, item: &Item, mode: ToggleMode, summary: &mut BatchSummary) -> Result<()> {
        let desired = match mode {
            ToggleMode::Toggle => None,
            ToggleMode::ForceEnable => Some(true),
            ToggleMode::ForceDisable => Some(false),
        };
        match self.toggle(item, desired)? {
            ToggleOutcome::Moved(_) => summary.moved += 1,
            ToggleOutcome::AlreadyEnabled | ToggleOutcome::AlreadyDisabled => summary.skipped += 1,
        }
        Ok(())
    }

    /// Renames an item within its current location.
    ///
    /// For files, the original extension is appended when the new name does
    /// not carry one. Fails if the resulting name collides with any other
    /// catalog entry. Returns the final name.
    pub fn rename(&self, item: &Item, new_name: &str, existing: &[Item]) -> Result<String> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(ModmanError::validation("Name cannot be empty"));
        }

        let mut final_name = new_name.to_string();
        if item.kind == ItemKind::File && Path::new(new_name).extension().is_none() {
            if let Some(ext) = Path::new(&item.name).extension() {
                final_name = format!("{new_name}.{}", ext.to_string_lossy());
            }
        }

        if existing.iter().any(|other| other.name == final_name) {
            return Err(ModmanError::validation("Name already exists"));
        }

        let parent = item
            .path
            .parent()
            .ok_or_else(|| ModmanError::state("Item has no parent directory"))?;
        move_entry(item.kind, &item.path, &parent.join(&final_name))?;
        debug!(from = %item.name, to = %final_name, "renamed item");
        Ok(final_name)
    }

    /// Permanently removes an item. `recursive` must be set to remove a
    /// non-empty directory.
    pub fn delete(&self, item: &Item, recursive: bool) -> Result<()> {
        match item.kind {
            ItemKind::Directory if recursive => std::fs::remove_dir_all(&item.path)?,
            ItemKind::Directory => std::fs::remove_dir(&item.path)?,
            ItemKind::File => std::fs::remove_file(&item.path)?,
        }
        debug!(name = %item.name, "deleted item");
        Ok(())
    }
}

/// Moves one entry with a single rename. Directory and file moves are
/// separate primitives; neither falls back to copying.
fn move_entry(kind: ItemKind, from: &Path, to: &Path) -> Result<()> {
    match kind {
        ItemKind::Directory => move_dir(from, to),
        ItemKind::File => move_file(from, to),
    }
}

fn move_file(from: &Path, to: &Path) -> Result<()> {
    std::fs::rename(from, to).map_err(|e| annotate_move(e, from, to))
}

fn move_dir(from: &Path, to: &Path) -> Result<()> {
    std::fs::rename(from, to).map_err(|e| annotate_move(e, from, to))
}

fn annotate_move(e: std::io::Error, from: &Path, to: &Path) -> ModmanError {
    ModmanError::Io(std::io::Error::new(
        e.kind(),
        format!(
            "Cannot move {} to {}: {e}",
            from.display(),
            to.display()
        ),
    ))
}
