//! The profile-selection menu and its commands.

use super::{
    cmd_filter, item_menu, parse_index, render_help, report_dispatch_error, require_index_arg,
    App, StatusKind,
};
use crate::commands::{dispatch, Command, CommandSet};
use crate::error::{ModmanError, Result};
use crate::filter::passes_filter;
use crate::persistence::ProfileStore;
use crate::profile::{paths_conflict, Profile};
use crossterm::style::Color;
use std::path::{Path, PathBuf};
use tracing::info;

pub(super) fn command_set() -> Result<CommandSet<App>> {
    let mut set = CommandSet::new(
        render_help,
        Some(enter_by_index as fn(&mut App, i64) -> Result<()>),
    );
    set.register(Command::new(
        "create",
        "Creates a new profile",
        "create <name> <mods_folder> <unused_mods_folder> [executable]",
        cmd_create,
        &["cr", "c"],
    ))?;
    set.register(Command::new(
        "delete",
        "Deletes a profile",
        "delete <index>",
        cmd_delete,
        &["de", "d", "del", "remove"],
    ))?;
    set.register(Command::new(
        "edit",
        "Edits the path of a folder in a profile",
        "edit <index> mod/unused/exe <new_path>",
        cmd_edit,
        &["change", "ch", "ed"],
    ))?;
    set.register(Command::new(
        "details",
        "Shows all the details of a profile",
        "details <index>",
        cmd_details,
        &["see", "type", "detail"],
    ))?;
    set.register(Command::new(
        "load",
        "Loads a profile",
        "load <index>",
        cmd_load,
        &["enter", "en"],
    ))?;
    set.register(Command::new(
        "rename",
        "Renames a profile",
        "rename <index> <new_name>",
        cmd_rename,
        &["re", "r"],
    ))?;
    set.register(Command::new(
        "move",
        "Moves a profile to a new position in the list",
        "move <index> <new_index>",
        cmd_move,
        &["mv"],
    ))?;
    set.register(Command::new(
        "filter",
        "Filters the items that are displayed. Empty to clear filter.",
        "filter <filter>",
        cmd_filter,
        &["f", "search"],
    ))?;
    Ok(set)
}

/// The profile-menu REPL. Returns when the operator exits.
pub(super) fn run(app: &mut App) -> Result<()> {
    let set = command_set()?;
    info!("Entering profile menu");
    loop {
        render(app);
        let prompt = format!(
            "Enter a command ({}) or 'exit' to exit\n",
            set.names_joined('/')
        );
        let line = app.prompter.read_line(&prompt)?;
        if line == "exit" {
            return Ok(());
        }
        if line.is_empty() {
            continue;
        }

        if let Err(error) = dispatch(&set, app, &line) {
            match error {
                // A lone unknown token may be a profile name; enter it when
                // the prefix is unambiguous.
                ModmanError::UnknownCommand(token)
                    if line.split_whitespace().count() == 1 =>
                {
                    match app.find_profile_by_prefix(&token) {
                        Some(index) => {
                            if let Err(e) = item_menu::run(app, index) {
                                report_dispatch_error(app, e);
                            }
                        }
                        None => report_dispatch_error(app, ModmanError::UnknownCommand(token)),
                    }
                }
                error => report_dispatch_error(app, error),
            }
        }
    }
}

fn render(app: &mut App) {
    let out = app.output;
    out.line("");
    if !app.filter.is_empty() {
        out.colored(&format!("Filter: {}", app.filter), Color::Magenta);
    }
    out.line("Profiles:");
    if app.profiles.is_empty() {
        out.line("No profiles.");
    } else {
        for (i, profile) in app.profiles.iter().enumerate() {
            if !passes_filter(&profile.name, &app.filter) {
                continue;
            }
            out.line(&format!("{i}.- {}", profile.name));
        }
    }
    app.render_status();
}

pub(super) fn render_details(app: &App, profile: &Profile) {
    let out = app.output;
    out.colored(&format!("{}:", profile.name), Color::Green);
    out.labeled("Mods Path: ", &profile.active_path.display().to_string());
    out.labeled(
        "Unused Mods Path: ",
        &profile.inactive_path.display().to_string(),
    );
    out.labeled(
        "Executable Path: ",
        &profile
            .executable_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "None".to_string()),
    );
    out.labeled("Sort: ", &profile.sort_spec().to_string());
}

/// Bare-integer input enters that profile.
fn enter_by_index(app: &mut App, index: i64) -> Result<()> {
    let index = profile_index(app, index)?;
    item_menu::run(app, index)
}

fn profile_index(app: &App, index: i64) -> Result<usize> {
    if index < 0 {
        return Err(ModmanError::validation("Index must be positive"));
    }
    let index = index as usize;
    if index >= app.profiles.len() {
        return Err(ModmanError::validation("Index out of range"));
    }
    Ok(index)
}

fn parse_profile_index(app: &App, token: &str) -> Result<usize> {
    profile_index(app, parse_index(token)?)
}

/// Argument at `i`, or an interactive prompt. Path inputs have surrounding
/// quotes stripped; dispatched arguments arrive already cleaned.
fn path_arg(app: &mut App, args: &[String], i: usize, prompt: &str) -> Result<String> {
    match args.get(i) {
        Some(value) => Ok(value.clone()),
        None => Ok(app
            .prompter
            .read_line(prompt)?
            .trim_matches('"')
            .trim()
            .to_string()),
    }
}

fn validate_profile_name(app: &App, name: &str, ignore: Option<usize>) -> Result<()> {
    if name.is_empty() {
        return Err(ModmanError::validation("Name cannot be empty"));
    }
    let stem = ProfileStore::file_stem_for(name);
    for (i, other) in app.profiles.iter().enumerate() {
        if ignore == Some(i) {
            continue;
        }
        // Names must stay unique after filename derivation too; two
        // profiles must never share a record file.
        if other.name.eq_ignore_ascii_case(name)
            || ProfileStore::file_stem_for(&other.name) == stem
        {
            return Err(ModmanError::validation(format!(
                "A profile named '{}' already exists",
                other.name
            )));
        }
    }
    Ok(())
}

pub(super) fn cmd_create(app: &mut App, args: &[String]) -> Result<()> {
    if args.len() > 4 {
        return Err(ModmanError::validation("Too many arguments"));
    }

    let name = match args.first() {
        Some(value) => value.clone(),
        None => app.prompter.read_line("Name: ")?,
    };
    let name = name.trim().to_string();
    validate_profile_name(app, &name, None)?;

    let active = path_arg(app, args, 1, "Mods folder: ")?;
    if !Path::new(&active).is_dir() {
        return Err(ModmanError::validation(format!(
            "Directory '{active}' does not exist"
        )));
    }

    let inactive = path_arg(app, args, 2, "Unused mods folder: ")?;
    if !Path::new(&inactive).is_dir() {
        return Err(ModmanError::validation(format!(
            "Directory '{inactive}' does not exist"
        )));
    }
    if paths_conflict(Path::new(&active), Path::new(&inactive)) {
        return Err(ModmanError::validation(
            "The mods folder and unused mods folder cannot be the same",
        ));
    }

    let executable = match args.get(3) {
        Some(value) => Some(value.clone()),
        None => {
            let input = path_arg(app, args, 3, "Executable path (empty for none): ")?;
            if input.is_empty() {
                None
            } else {
                Some(input)
            }
        }
    };
    if let Some(exe) = &executable {
        if !Path::new(exe).is_file() {
            return Err(ModmanError::validation(format!(
                "File '{exe}' does not exist"
            )));
        }
    }

    let ordinal = app.profiles.len() as u32;
    app.profiles.push(Profile::new(
        name.clone(),
        PathBuf::from(active),
        PathBuf::from(inactive),
        executable.map(PathBuf::from),
        ordinal,
    ));
    app.save_profiles()?;
    info!(profile = %name, "created profile");
    app.set_status(StatusKind::Success, format!("Created profile '{name}'"));
    Ok(())
}

pub(super) fn cmd_delete(app: &mut App, args: &[String]) -> Result<()> {
    let index = parse_profile_index(app, require_index_arg(args)?)?;
    let name = app.profiles[index].name.clone();

    if !app.confirm(&format!("Are you sure you want to delete '{name}'?"))? {
        app.set_status(StatusKind::Error, "Cancelled");
        return Ok(());
    }

    app.profiles.remove(index);
    app.renumber_profiles();
    app.save_profiles()?;
    info!(profile = %name, "deleted profile");
    app.set_status(StatusKind::Success, format!("Deleted profile '{name}'"));
    Ok(())
}

pub(super) fn cmd_edit(app: &mut App, args: &[String]) -> Result<()> {
    if args.is_empty() {
        return Err(ModmanError::validation("No index specified"));
    }
    if args.len() > 3 {
        return Err(ModmanError::validation("Too many arguments"));
    }

    let index = parse_profile_index(app, &args[0])?;
    let mut parameter = args.get(1).cloned().unwrap_or_default();
    if parameter.is_empty() {
        parameter = app
            .prompter
            .read_line("Path to edit (mod/unused/exe): ")?
            .to_lowercase();
    }

    let profile = app.profiles[index].clone();
    let (parameter, current) = if parameter.contains("unused") {
        ("unused", profile.inactive_path.display().to_string())
    } else if parameter.contains("mod") {
        ("mod", profile.active_path.display().to_string())
    } else if parameter.contains("exe") {
        (
            "exe",
            profile
                .executable_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "None".to_string()),
        )
    } else {
        return Err(ModmanError::validation(
            "Invalid parameter, must be: mod/unused/exe",
        ));
    };

    let mut new_path = args.get(2).cloned().unwrap_or_default();
    if new_path.is_empty() {
        app.output.line(&format!("\nCurrent path: {current}"));
        new_path = app
            .prompter
            .read_line("New path (empty to cancel): ")?
            .trim_matches('"')
            .trim()
            .to_string();
        if new_path.is_empty() {
            app.set_status(StatusKind::Error, "Cancelled");
            return Ok(());
        }
    }

    let new_path = PathBuf::from(new_path);
    match parameter {
        "exe" => {
            if !new_path.is_file() {
                return Err(ModmanError::validation(format!(
                    "File '{}' does not exist",
                    new_path.display()
                )));
            }
            app.profiles[index].executable_path = Some(new_path);
        }
        "mod" | "unused" => {
            if !new_path.is_dir() {
                return Err(ModmanError::validation(format!(
                    "Directory '{}' does not exist",
                    new_path.display()
                )));
            }
            let other = if parameter == "mod" {
                &profile.inactive_path
            } else {
                &profile.active_path
            };
            if paths_conflict(&new_path, other) {
                return Err(ModmanError::validation(
                    "The mods folder and unused mods folder cannot be the same",
                ));
            }
            if parameter == "mod" {
                app.profiles[index].active_path = new_path;
            } else {
                app.profiles[index].inactive_path = new_path;
            }
        }
        _ => unreachable!(),
    }

    app.save_profiles()?;
    app.set_status(
        StatusKind::Success,
        format!("Edited profile '{}'", profile.name),
    );
    Ok(())
}

pub(super) fn cmd_details(app: &mut App, args: &[String]) -> Result<()> {
    let index = parse_profile_index(app, require_index_arg(args)?)?;
    let profile = app.profiles[index].clone();
    app.output.line("");
    render_details(app, &profile);
    app.pause()
}

pub(super) fn cmd_load(app: &mut App, args: &[String]) -> Result<()> {
    let index = parse_profile_index(app, require_index_arg(args)?)?;
    item_menu::run(app, index)
}

pub(super) fn cmd_rename(app: &mut App, args: &[String]) -> Result<()> {
    if args.is_empty() {
        return Err(ModmanError::validation("No index specified"));
    }
    if args.len() > 2 {
        return Err(ModmanError::validation("Too many arguments"));
    }

    let index = parse_profile_index(app, &args[0])?;
    let name = match args.get(1) {
        Some(value) => value.clone(),
        None => app.prompter.read_line("Name: ")?,
    };
    let name = name.trim().to_string();
    validate_profile_name(app, &name, Some(index))?;

    app.profiles[index].name = name.clone();
    app.save_profiles()?;
    app.set_status(
        StatusKind::Success,
        format!("Profile renamed to '{name}'"),
    );
    Ok(())
}

pub(super) fn cmd_move(app: &mut App, args: &[String]) -> Result<()> {
    match args.len() {
        0 => return Err(ModmanError::validation("No index specified")),
        1 => return Err(ModmanError::validation("No new position specified")),
        2 => {}
        _ => return Err(ModmanError::validation("Too many arguments")),
    }

    let from = parse_profile_index(app, &args[0])?;
    let to = parse_profile_index(app, &args[1])?;
    let profile = app.profiles.remove(from);
    let name = profile.name.clone();
    app.profiles.insert(to, profile);
    app.renumber_profiles();
    app.save_profiles()?;
    app.set_status(
        StatusKind::Success,
        format!("Moved '{name}' to position {to}"),
    );
    Ok(())
}
