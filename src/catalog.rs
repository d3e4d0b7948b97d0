//! The merged item catalog across a profile's two locations.
//!
//! Items are never persisted; they are recomputed from a live directory
//! scan on every load. The merged, sorted sequence defines the index space
//! used by every index-based command, and those indices are only valid
//! until the next mutation.

use crate::error::{ModmanError, Result};
use crate::filter::passes_filter;
use crate::profile::{SortField, SortSpec};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Which of the profile's two locations an item currently resides in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Active,
    Inactive,
}

/// Whether an item is a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    File,
    Directory,
}

/// One entry of the catalog: a file or directory in either location.
#[derive(Debug, Clone)]
pub struct Item {
    /// File or directory name, unique across both locations.
    pub name: String,
    /// Full path at scan time.
    pub path: PathBuf,
    pub location: Location,
    pub kind: ItemKind,
    /// Creation time, falling back to modification time on filesystems
    /// that do not report creation times.
    pub created: SystemTime,
}

impl Item {
    /// Returns true when the item resides in the Active location.
    pub fn is_enabled(&self) -> bool {
        self.location == Location::Active
    }

    /// The display label the filter is matched against.
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.name,
            if self.is_enabled() { "Enabled" } else { "Disabled" }
        )
    }

    /// Evaluates the current filter against this item's display label.
    pub fn matches_filter(&self, filter: &str) -> bool {
        passes_filter(&self.label(), filter)
    }
}

/// Raw scan of both locations, before duplicate checking and merging.
#[derive(Debug)]
pub struct Scan {
    pub active: Vec<Item>,
    pub inactive: Vec<Item>,
}

/// Enumerates the immediate children of both locations.
pub fn scan(active_path: &Path, inactive_path: &Path) -> Result<Scan> {
    Ok(Scan {
        active: scan_dir(active_path, Location::Active)?,
        inactive: scan_dir(inactive_path, Location::Inactive)?,
    })
}

fn scan_dir(dir: &Path, location: Location) -> Result<Vec<Item>> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        ModmanError::Io(std::io::Error::new(
            e.kind(),
            format!("Cannot read {}: {e}", dir.display()),
        ))
    })?;

    let mut items = Vec::new();
    for entry in entries {
        let entry = entry?;
        let metadata = entry.metadata()?;
        let kind = if metadata.is_dir() {
            ItemKind::Directory
        } else {
            ItemKind::File
        };
        let created = metadata
            .created()
            .or_else(|_| metadata.modified())
            .unwrap_or(UNIX_EPOCH);

        items.push(Item {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: entry.path(),
            location,
            kind,
            created,
        });
    }

    // Directory enumeration order is filesystem-dependent; sort by name so
    // duplicate detection and the merged view are deterministic.
    items.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(items)
}

/// Returns the index into `inactive` of the first name that also appears in
/// `active`, scanning active entries in order, or None when the name sets
/// are disjoint.
///
/// With multiple collisions the active-outer/inactive-inner order decides
/// which one is surfaced first.
pub fn find_first_duplicate(active: &[Item], inactive: &[Item]) -> Option<usize> {
    for a in active {
        for (j, b) in inactive.iter().enumerate() {
            if b.name == a.name {
                return Some(j);
            }
        }
    }
    None
}

/// The merged, sorted view across both locations for one profile session.
#[derive(Debug)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    /// Builds the merged catalog from a scan.
    ///
    /// Fails with a state error if the scan still contains a cross-location
    /// name collision; the caller must run the duplicate-resolution flow
    /// and rescan first.
    pub fn build(scan: Scan, sort: SortSpec) -> Result<Self> {
        if find_first_duplicate(&scan.active, &scan.inactive).is_some() {
            return Err(ModmanError::state("Cannot have duplicate mods"));
        }

        let mut items = scan.active;
        items.extend(scan.inactive);
        sort_items(&mut items, sort);
        Ok(Self { items })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the item at a user-supplied index, range-checked.
    pub fn get(&self, index: i64) -> Result<&Item> {
        if index < 0 {
            return Err(ModmanError::validation("Index must be positive"));
        }
        self.items
            .get(index as usize)
            .ok_or_else(|| ModmanError::validation("Index out of range"))
    }

    /// Returns the indices of all items passing the given filter.
    pub fn filtered_indices(&self, filter: &str) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.matches_filter(filter))
            .map(|(i, _)| i)
            .collect()
    }

    /// Returns the single item whose name starts with `prefix`
    /// (case-insensitively), or None when the prefix is absent or ambiguous.
    pub fn find_unique_by_prefix(&self, prefix: &str) -> Option<usize> {
        let prefix = prefix.to_lowercase();
        let mut found = None;
        for (i, item) in self.items.iter().enumerate() {
            if item.name.to_lowercase().starts_with(&prefix) {
                if found.is_some() {
                    return None;
                }
                found = Some(i);
            }
        }
        found
    }
}

fn sort_items(items: &mut [Item], sort: SortSpec) {
    match sort.field {
        SortField::Name => items.sort_by_key(|i| i.name.to_lowercase()),
        SortField::Date => items.sort_by_key(|i| i.created),
        SortField::EnabledState => items.sort_by_key(|i| !i.is_enabled()),
    }
    if !sort.ascending {
        items.reverse();
    }
}
