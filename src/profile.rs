//! Profile model and sort preferences.

use crate::error::{ModmanError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Field the item catalog is sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    /// Lexicographic on the item name.
    #[default]
    Name,
    /// By filesystem creation time.
    Date,
    /// Enabled (Active) items before disabled ones.
    #[serde(rename = "state")]
    EnabledState,
}

impl SortField {
    /// Parses a user-facing sort field token.
    pub fn parse(token: &str) -> Result<Self> {
        match token.to_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "date" => Ok(Self::Date),
            "state" => Ok(Self::EnabledState),
            other => Err(ModmanError::validation(format!(
                "Invalid sort field '{other}', must be: name/date/state"
            ))),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Date => write!(f, "date"),
            Self::EnabledState => write!(f, "state"),
        }
    }
}

/// Sort preference for one profile's catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub field: SortField,
    pub ascending: bool,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            field: SortField::Name,
            ascending: true,
        }
    }
}

impl SortSpec {
    /// Parses a user-facing direction token (`asc`/`desc`).
    pub fn parse_direction(token: &str) -> Result<bool> {
        match token.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(true),
            "desc" | "descending" => Ok(false),
            other => Err(ModmanError::validation(format!(
                "Invalid sort direction '{other}', must be: asc/desc"
            ))),
        }
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.field,
            if self.ascending { "asc" } else { "desc" }
        )
    }
}

/// A named configuration bundling an Active path, an Inactive path, an
/// optional executable path, and a sort preference.
///
/// Serialized as one flat JSON record per profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Unique profile name, used as the storage key.
    pub name: String,
    /// Location of enabled mods.
    pub active_path: PathBuf,
    /// Location of disabled mods.
    pub inactive_path: PathBuf,
    /// Optional executable associated with the profile.
    #[serde(default)]
    pub executable_path: Option<PathBuf>,
    /// Catalog sort field.
    #[serde(default)]
    pub sort_field: SortField,
    /// Catalog sort direction.
    #[serde(default = "default_ascending")]
    pub sort_ascending: bool,
    /// Position in the manually ordered profile list.
    #[serde(default)]
    pub ordinal_position: u32,
}

fn default_ascending() -> bool {
    true
}

impl Profile {
    /// Creates a profile with default sort and the given ordinal position.
    pub fn new(
        name: String,
        active_path: PathBuf,
        inactive_path: PathBuf,
        executable_path: Option<PathBuf>,
        ordinal_position: u32,
    ) -> Self {
        Self {
            name,
            active_path,
            inactive_path,
            executable_path,
            sort_field: SortField::default(),
            sort_ascending: true,
            ordinal_position,
        }
    }

    /// Returns the profile's sort preference.
    pub fn sort_spec(&self) -> SortSpec {
        SortSpec {
            field: self.sort_field,
            ascending: self.sort_ascending,
        }
    }

    /// Stores a new sort preference.
    pub fn set_sort(&mut self, spec: SortSpec) {
        self.sort_field = spec.field;
        self.sort_ascending = spec.ascending;
    }
}

/// Returns true when the two paths refer to the same location after
/// normalization. Paths that cannot be canonicalized (e.g. not yet
/// existing) are compared lexically.
pub fn paths_conflict(a: &Path, b: &Path) -> bool {
    let norm_a = std::fs::canonicalize(a).unwrap_or_else(|_| a.to_path_buf());
    let norm_b = std::fs::canonicalize(b).unwrap_or_else(|_| b.to_path_buf());
    norm_a == norm_b
}
