//! Opening a path in the platform file browser.
//!
//! Thin external collaborator: everything interesting is the target-path
//! selection done by the caller; this module just spawns the browser.

use crate::error::{ModmanError, Result};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Reveals `path` in the platform file browser.
///
/// Directories are opened directly; for files the containing directory is
/// opened, with the file selected where the platform supports it.
pub fn reveal(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ModmanError::not_found(
            "That directory or file no longer exists",
        ));
    }
    debug!(path = %path.display(), "opening in file browser");
    spawn_browser(path)
}

#[cfg(target_os = "windows")]
fn spawn_browser(path: &Path) -> Result<()> {
    let mut command = Command::new("explorer.exe");
    if path.is_dir() {
        command.arg(path);
    } else {
        command.arg("/select,").arg(path);
    }
    command.spawn()?;
    Ok(())
}

#[cfg(target_os = "macos")]
fn spawn_browser(path: &Path) -> Result<()> {
    let mut command = Command::new("open");
    if path.is_dir() {
        command.arg(path);
    } else {
        command.arg("-R").arg(path);
    }
    command.spawn()?;
    Ok(())
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn spawn_browser(path: &Path) -> Result<()> {
    // xdg-open has no selection syntax; open the containing directory.
    let target = if path.is_dir() {
        path
    } else {
        path.parent().unwrap_or(path)
    };
    Command::new("xdg-open").arg(target).spawn()?;
    Ok(())
}
