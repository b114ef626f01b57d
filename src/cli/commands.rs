//! Command dispatch

use std::fs;
use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::menu::Menu;
use crate::cli::output;
use crate::config::{global_config_path, Settings};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Completion { shell }) => cmd_completion(*shell),
        None => cmd_menu(load_settings(cli)?, false),
        Some(Commands::Menu { no_banner }) => cmd_menu(load_settings(cli)?, *no_banner),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => cmd_config_show(&load_settings(cli)?),
            ConfigCommands::Path => cmd_config_path(),
            ConfigCommands::Init => cmd_config_init(),
        },
    }
}

/// Layered settings; also applies the color preference to terminal output.
fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let settings = Settings::load(cli.config.as_deref())?;
    if !settings.color {
        colored::control::set_override(false);
    }
    Ok(settings)
}

#[instrument(skip(settings))]
fn cmd_menu(mut settings: Settings, no_banner: bool) -> CliResult<()> {
    settings.banner &= !no_banner;
    debug!(?settings, "starting menu");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut menu = Menu::new(settings, stdin.lock(), stdout.lock());
    menu.run()?;

    let (tree, _) = menu.into_parts();
    debug!(keys = tree.size(), nodes = tree.node_count(), "menu closed");
    Ok(())
}

fn cmd_config_show(settings: &Settings) -> CliResult<()> {
    let mut out = io::stdout();
    output::info(&mut out, &settings.to_toml()?).map_err(|e| CliError::io("write config", e))
}

fn cmd_config_path() -> CliResult<()> {
    let path = global_config_path()
        .ok_or_else(|| CliError::Usage("cannot determine config directory".into()))?;
    let mut out = io::stdout();
    let state = if path.exists() { "exists" } else { "not created" };
    output::action(&mut out, "Global", &format!("{} ({})", path.display(), state))
        .map_err(|e| CliError::io("write config path", e))
}

#[instrument]
fn cmd_config_init() -> CliResult<()> {
    let path = global_config_path()
        .ok_or_else(|| CliError::Usage("cannot determine config directory".into()))?;
    if path.exists() {
        return Err(CliError::AlreadyExists(path));
    }
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .map_err(|e| CliError::io(format!("create {}", dir.display()), e))?;
    }
    fs::write(&path, Settings::template()?)
        .map_err(|e| CliError::io(format!("write {}", path.display()), e))?;

    let mut out = io::stdout();
    output::success(&mut out, &format!("Created {}", path.display()))
        .map_err(|e| CliError::io("write config path", e))
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
