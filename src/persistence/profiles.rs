//! Profile record storage.
//!
//! Each profile is saved as one pretty-printed JSON file whose name is
//! derived from the profile name. Saving all profiles also removes stored
//! records that no longer correspond to an in-memory profile.

use crate::error::{ModmanError, Result};
use crate::profile::Profile;
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// Filesystem store holding one JSON record per profile.
pub struct ProfileStore {
    root: PathBuf,
}

impl ProfileStore {
    /// Opens (creating if necessary) the store rooted at `root`.
    pub fn open(root: PathBuf) -> Result<Self> {
        let store = Self { root };
        fs::create_dir_all(store.profiles_dir()).map_err(|e| {
            ModmanError::Io(std::io::Error::new(
                e.kind(),
                format!(
                    "Failed to create profile store at {}: {e}",
                    store.profiles_dir().display()
                ),
            ))
        })?;
        Ok(store)
    }

    /// Returns the default store root for the current platform.
    ///
    /// - Linux/macOS: `~/.config/modman`
    /// - Windows: `%APPDATA%\modman`
    pub fn default_root() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ModmanError::state("Could not determine config directory"))?;
        Ok(config_dir.join("modman"))
    }

    /// Directory holding the per-profile record files.
    pub fn profiles_dir(&self) -> PathBuf {
        self.root.join("profiles")
    }

    /// Returns the record path a profile with this name is stored at.
    pub fn record_path(&self, name: &str) -> PathBuf {
        self.profiles_dir()
            .join(format!("{}.json", Self::file_stem_for(name)))
    }

    /// Derives a record filename stem from a profile name: lowercased, with
    /// runs of non-alphanumeric characters collapsed to a single `_`.
    pub fn file_stem_for(name: &str) -> String {
        let mut stem = String::with_capacity(name.len());
        let mut gap = false;
        for c in name.to_lowercase().chars() {
            if c.is_ascii_alphanumeric() {
                stem.push(c);
                gap = false;
            } else if !gap {
                stem.push('_');
                gap = true;
            }
        }
        stem
    }

    /// Loads every readable profile record, ordered by ordinal position.
    ///
    /// A store that cannot be read degrades to zero profiles with a
    /// warning; an individual unreadable record is skipped the same way.
    pub fn load_all(&self) -> Vec<Profile> {
        let dir = self.profiles_dir();
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to read profile store {}: {e}", dir.display());
                return Vec::new();
            }
        };

        let mut profiles = Vec::new();
        for entry in entries {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(e) => {
                    warn!("Failed to read profile store entry: {e}");
                    continue;
                }
            };
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            match fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|json| serde_json::from_str::<Profile>(&json).map_err(|e| e.to_string()))
            {
                Ok(profile) => profiles.push(profile),
                Err(e) => warn!("Skipping unreadable profile record {}: {e}", path.display()),
            }
        }

        profiles.sort_by(|a, b| {
            a.ordinal_position
                .cmp(&b.ordinal_position)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        info!("Loaded {} profiles from {}", profiles.len(), dir.display());
        profiles
    }

    /// Writes every profile record and removes orphaned record files.
    pub fn save_all(&self, profiles: &[Profile]) -> Result<()> {
        let dir = self.profiles_dir();
        fs::create_dir_all(&dir)?;

        let mut expected = HashSet::new();
        for profile in profiles {
            let file_name = format!("{}.json", Self::file_stem_for(&profile.name));
            let json = serde_json::to_string_pretty(profile).map_err(|e| {
                ModmanError::state(format!("Failed to serialize profile '{}': {e}", profile.name))
            })?;
            fs::write(dir.join(&file_name), json)?;
            expected.insert(file_name);
        }

        // Orphan cleanup: a record whose filename no longer maps to an
        // in-memory profile is deleted.
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let file_name = entry.file_name().to_string_lossy().into_owned();
            if file_name.ends_with(".json") && !expected.contains(&file_name) {
                fs::remove_file(entry.path())?;
                info!("Removed orphaned profile record {file_name}");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn profile(name: &str, ordinal: u32) -> Profile {
        Profile::new(
            name.to_string(),
            PathBuf::from("/a"),
            PathBuf::from("/b"),
            None,
            ordinal,
        )
    }

    #[test]
    fn test_file_stem_for() {
        assert_eq!(ProfileStore::file_stem_for("Skyrim"), "skyrim");
        assert_eq!(ProfileStore::file_stem_for("My Mods (2024)"), "my_mods_2024_");
        assert_eq!(ProfileStore::file_stem_for("a--b"), "a_b");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::open(dir.path().to_path_buf()).unwrap();

        store
            .save_all(&[profile("beta", 1), profile("alpha", 0)])
            .unwrap();
        let loaded = store.load_all();
        assert_eq!(loaded.len(), 2);
        // Ordered by ordinal, not filename.
        assert_eq!(loaded[0].name, "alpha");
        assert_eq!(loaded[1].name, "beta");
    }

    #[test]
    fn test_orphan_cleanup() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::open(dir.path().to_path_buf()).unwrap();

        store
            .save_all(&[profile("keep", 0), profile("drop", 1)])
            .unwrap();
        assert!(store.record_path("drop").exists());

        store.save_all(&[profile("keep", 0)]).unwrap();
        assert!(store.record_path("keep").exists());
        assert!(!store.record_path("drop").exists());
    }

    #[test]
    fn test_unreadable_store_degrades_to_empty() {
        let store = ProfileStore {
            root: PathBuf::from("/nonexistent/modman"),
        };
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn test_corrupt_record_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::open(dir.path().to_path_buf()).unwrap();

        store.save_all(&[profile("good", 0)]).unwrap();
        fs::write(store.profiles_dir().join("bad.json"), "{not json").unwrap();
        fs::write(store.profiles_dir().join("notes.txt"), "ignored").unwrap();

        let loaded = store.load_all();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "good");
    }

    #[test]
    fn test_record_path_derivation() {
        let store = ProfileStore {
            root: PathBuf::from("/data"),
        };
        assert_eq!(
            store.record_path("My Game"),
            Path::new("/data/profiles/my_game.json")
        );
    }
}
