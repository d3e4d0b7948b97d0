//! The item menu: one profile's catalog session and its commands.
//!
//! The catalog is rebuilt from a fresh directory scan on every loop
//! iteration, so indices are always computed against the current on-disk
//! state before an index-based command is accepted.

use super::{
    cmd_filter, parse_index, profile_menu, render_help, report_dispatch_error, require_index_arg,
    App, StatusKind,
};
use crate::browse;
use crate::catalog::{self, find_first_duplicate, Catalog, Item, Scan};
use crate::commands::{dispatch, Command, CommandSet};
use crate::error::{ModmanError, Result};
use crate::profile::{Profile, SortField, SortSpec};
use crate::selector::{parse_selection, split_mode, ToggleMode};
use crate::sync::{BatchSummary, SyncEngine};
use crossterm::style::Color;
use tracing::info;

pub(super) fn command_set() -> Result<CommandSet<App>> {
    let mut set = CommandSet::new(
        render_help,
        Some(toggle_by_index as fn(&mut App, i64) -> Result<()>),
    );
    set.register(Command::new(
        "toggle",
        "Toggles mods between enabled and disabled",
        "toggle [e/d] <index>/<from>-<to>/all (comma-separated)",
        cmd_toggle,
        &["t"],
    ))?;
    set.register(Command::new(
        "delete",
        "Deletes a mod forever",
        "delete <index>",
        cmd_delete,
        &["del", "remove", "de", "d"],
    ))?;
    set.register(Command::new(
        "rename",
        "Renames a mod",
        "rename <index> <new_name>",
        cmd_rename,
        &["re", "r"],
    ))?;
    set.register(Command::new(
        "open",
        "Opens the directory of a mod or profile folder",
        "open mod/unused/exe/<index>",
        cmd_open,
        &["op", "go"],
    ))?;
    set.register(Command::new(
        "sort",
        "Changes how mods are sorted",
        "sort name/date/state [asc/desc]",
        cmd_sort,
        &[],
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

/// Runs the item session for the profile at `index`. The catalog snapshot
/// is discarded when the session ends, however it ends.
pub(super) fn run(app: &mut App, index: usize) -> Result<()> {
    {
        let profile = app
            .profiles
            .get(index)
            .ok_or_else(|| ModmanError::validation("Index out of range"))?;
        info!(profile = %profile.name, "entering profile session");
    }
    app.current = Some(index);
    let result = session_loop(app);
    app.current = None;
    app.catalog = None;
    app.filtered.clear();
    result
}

fn session_loop(app: &mut App) -> Result<()> {
    let set = command_set()?;
    loop {
        reload_catalog(app)?;
        render(app)?;
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
                // A lone unknown token may be a mod name; toggle it when
                // the prefix is unambiguous.
                ModmanError::UnknownCommand(token)
                    if line.split_whitespace().count() == 1 =>
                {
                    match toggle_by_prefix(app, &token) {
                        Ok(true) => {}
                        Ok(false) => {
                            report_dispatch_error(app, ModmanError::UnknownCommand(token));
                        }
                        Err(e) => report_dispatch_error(app, e),
                    }
                }
                error => report_dispatch_error(app, error),
            }
        }
    }
}

/// Rescans both locations until no duplicate remains, then builds the
/// catalog. Each pass performs exactly one resolution action before
/// rescanning; declining resolution fails the load.
fn reload_catalog(app: &mut App) -> Result<()> {
    let profile = app.current_profile()?.clone();
    loop {
        let scan = catalog::scan(&profile.active_path, &profile.inactive_path)?;
        match find_first_duplicate(&scan.active, &scan.inactive) {
            Some(dup) => resolve_duplicate(app, &profile, &scan, dup)?,
            None => {
                app.catalog = Some(Catalog::build(scan, profile.sort_spec())?);
                return Ok(());
            }
        }
    }
}

/// Offers the two resolution options for one duplicate: rename the unused
/// copy, or delete it forever. Declining both blocks the load.
fn resolve_duplicate(app: &mut App, profile: &Profile, scan: &Scan, dup: usize) -> Result<()> {
    let duplicate = scan.inactive[dup].clone();
    app.output.colored(
        &format!("Duplicate mods found. Name: {}", duplicate.name),
        Color::Red,
    );
    let engine = SyncEngine::new(&profile.active_path, &profile.inactive_path);

    if app.confirm("\nRename the unused copy?")? {
        let new_name = app.prompter.read_line("New name: ")?;
        let all: Vec<Item> = scan
            .active
            .iter()
            .chain(scan.inactive.iter())
            .cloned()
            .collect();
        let final_name = engine.rename(&duplicate, &new_name, &all)?;
        app.set_status(
            StatusKind::Success,
            format!("Renamed {} to {final_name}", duplicate.name),
        );
        return Ok(());
    }
    if app.confirm("Delete the unused copy forever?")? {
        engine.delete(&duplicate, true)?;
        app.set_status(StatusKind::Success, format!("Deleted {}", duplicate.name));
        return Ok(());
    }
    Err(ModmanError::state("Cannot have duplicate mods"))
}

fn render(app: &mut App) -> Result<()> {
    let profile = app.current_profile()?.clone();
    let out = app.output;
    out.line("");
    profile_menu::render_details(app, &profile);
    out.line("");
    if !app.filter.is_empty() {
        out.colored(&format!("Filter: {}", app.filter), Color::Magenta);
    }
    out.line("Mods:");

    let filtered = match &app.catalog {
        Some(catalog) => catalog.filtered_indices(&app.filter),
        None => Vec::new(),
    };
    app.filtered = filtered;

    if let Some(catalog) = &app.catalog {
        if catalog.is_empty() {
            out.line("No mods.");
        }
        for &i in &app.filtered {
            let item = &catalog.items()[i];
            let (suffix, color) = if item.is_enabled() {
                (" - Enabled", Color::Green)
            } else {
                (" - Disabled", Color::Red)
            };
            out.split(&format!("{i}.- {}", item.name), suffix, color);
        }
    }
    app.render_status();
    Ok(())
}

fn engine_for(profile: &Profile) -> SyncEngine<'_> {
    SyncEngine::new(&profile.active_path, &profile.inactive_path)
}

fn toggle_single(app: &mut App, item: Item) -> Result<()> {
    let profile = app.current_profile()?.clone();
    engine_for(&profile).toggle(&item, None)?;
    app.set_status(StatusKind::Success, format!("Toggled {}", item.name));
    Ok(())
}

/// Bare-integer input toggles that item.
fn toggle_by_index(app: &mut App, index: i64) -> Result<()> {
    let item = app.item_at(index)?;
    toggle_single(app, item)
}

/// Unknown-token fallback: toggles the single item whose name starts with
/// `token`, if unambiguous.
fn toggle_by_prefix(app: &mut App, token: &str) -> Result<bool> {
    let item = match &app.catalog {
        Some(catalog) => match catalog.find_unique_by_prefix(token) {
            Some(i) => catalog.items()[i].clone(),
            None => return Ok(false),
        },
        None => return Ok(false),
    };
    toggle_single(app, item)?;
    Ok(true)
}

pub(super) fn cmd_toggle(app: &mut App, args: &[String]) -> Result<()> {
    if args.is_empty() {
        return Err(ModmanError::validation("No index provided"));
    }
    let (mode, rest) = split_mode(args);
    let selector = match rest {
        [] => return Err(ModmanError::validation("No index provided")),
        [selector] => selector.clone(),
        _ => return Err(ModmanError::validation("Too many arguments")),
    };

    let catalog = app
        .catalog
        .as_ref()
        .ok_or_else(|| ModmanError::state("No profile loaded"))?;
    let filtered = if app.filter.is_empty() {
        None
    } else {
        Some(app.filtered.as_slice())
    };
    let indices = parse_selection(&selector, catalog.len(), filtered)?;
    let items: Vec<Item> = indices.iter().map(|&i| catalog.items()[i].clone()).collect();

    let profile = app.current_profile()?.clone();
    let engine = engine_for(&profile);
    let mut summary = BatchSummary::default();
    for item in &items {
        engine.apply(item, mode, &mut summary)?;
    }

    let text = match mode {
        ToggleMode::Toggle if items.len() == 1 => format!("Toggled {}", items[0].name),
        ToggleMode::Toggle => format!("Toggled {} mods", summary.moved),
        ToggleMode::ForceEnable => summary_text("Enabled", "enabled", summary),
        ToggleMode::ForceDisable => summary_text("Disabled", "disabled", summary),
    };
    app.set_status(StatusKind::Success, text);
    Ok(())
}

fn summary_text(verb: &str, state: &str, summary: BatchSummary) -> String {
    if summary.skipped > 0 {
        format!(
            "{verb} {} mods ({} already {state})",
            summary.moved, summary.skipped
        )
    } else {
        format!("{verb} {} mods", summary.moved)
    }
}

pub(super) fn cmd_delete(app: &mut App, args: &[String]) -> Result<()> {
    let item = app.item_at(parse_index(require_index_arg(args)?)?)?;

    if !app.confirm(&format!("Delete '{}' forever?", item.name))? {
        app.set_status(StatusKind::Error, "Cancelled");
        return Ok(());
    }

    let profile = app.current_profile()?.clone();
    engine_for(&profile).delete(&item, true)?;
    app.set_status(StatusKind::Success, format!("Deleted {}", item.name));
    Ok(())
}

pub(super) fn cmd_rename(app: &mut App, args: &[String]) -> Result<()> {
    if args.is_empty() {
        return Err(ModmanError::validation("No index provided"));
    }
    if args.len() > 2 {
        return Err(ModmanError::validation("Too many arguments"));
    }

    let item = app.item_at(parse_index(&args[0])?)?;
    let new_name = match args.get(1) {
        Some(value) => value.clone(),
        None => app.prompter.read_line("New name: ")?,
    };

    let profile = app.current_profile()?.clone();
    let catalog = app
        .catalog
        .as_ref()
        .ok_or_else(|| ModmanError::state("No profile loaded"))?;
    let final_name = engine_for(&profile).rename(&item, &new_name, catalog.items())?;
    app.set_status(
        StatusKind::Success,
        format!("Renamed {} to {final_name}", item.name),
    );
    Ok(())
}

pub(super) fn cmd_open(app: &mut App, args: &[String]) -> Result<()> {
    if args.is_empty() {
        return Err(ModmanError::validation("No index provided"));
    }
    if args.len() > 1 {
        return Err(ModmanError::validation("Too many arguments"));
    }
    let arg = &args[0];
    let profile = app.current_profile()?.clone();

    if arg.contains("exe") {
        match &profile.executable_path {
            Some(exe) => {
                browse::reveal(exe)?;
                app.set_status(StatusKind::Success, "Opened the executable path");
            }
            None => app.set_status(StatusKind::Notice, "No executable path set"),
        }
    } else if arg.contains("unused") {
        browse::reveal(&profile.inactive_path)?;
        app.set_status(StatusKind::Success, "Opened the unused mods folder");
    } else if arg.contains("mod") {
        browse::reveal(&profile.active_path)?;
        app.set_status(StatusKind::Success, "Opened the mods folder");
    } else {
        let item = app.item_at(parse_index(arg)?)?;
        browse::reveal(&item.path)?;
        app.set_status(
            StatusKind::Success,
            format!("Opened '{}' location", item.name),
        );
    }
    Ok(())
}

pub(super) fn cmd_sort(app: &mut App, args: &[String]) -> Result<()> {
    if args.is_empty() {
        return Err(ModmanError::validation("No sort field specified"));
    }
    if args.len() > 2 {
        return Err(ModmanError::validation("Too many arguments"));
    }

    let field = SortField::parse(&args[0])?;
    let ascending = match args.get(1) {
        Some(direction) => SortSpec::parse_direction(direction)?,
        None => true,
    };
    let spec = SortSpec { field, ascending };

    app.current_profile_mut()?.set_sort(spec);
    app.save_profiles()?;
    app.set_status(StatusKind::Success, format!("Sorting by {spec}"));
    Ok(())
}
