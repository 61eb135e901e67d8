//! Command dispatch

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::{FamilyService, InitOutcome};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::interactive::{MenuSession, SessionEnd};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, RenderStyle, Settings};
use crate::domain::{FamilyTree, PersonId};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

/// Execute the parsed command line.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let cwd = std::env::current_dir().map_err(|e| InfraError::io("current directory", e))?;
    let mut settings = Settings::load(Some(cwd.as_path()))?;
    if let Some(file) = &cli.file {
        settings.data_file = file.clone();
    }
    debug!("settings: {:?}", settings);

    match &cli.command {
        Some(Commands::Show { root, style }) => {
            let root = root.unwrap_or(settings.root);
            let style = style.unwrap_or(settings.style);
            cmd_show(&ServiceContainer::new(settings), root, style)
        }
        Some(Commands::Generations { root }) => {
            let root = root.unwrap_or(settings.root);
            cmd_generations(&ServiceContainer::new(settings), root)
        }
        Some(Commands::Get { id }) => cmd_get(&ServiceContainer::new(settings), *id),
        Some(Commands::Roots) => cmd_roots(&ServiceContainer::new(settings)),
        Some(Commands::Add {
            name,
            born,
            died,
            parents,
        }) => cmd_add(&ServiceContainer::new(settings), name, *born, *died, parents),
        Some(Commands::Link { parent, child }) => {
            cmd_link(&ServiceContainer::new(settings), *parent, *child)
        }
        Some(Commands::Edit {
            id,
            name,
            born,
            died,
            living,
        }) => cmd_edit(
            &ServiceContainer::new(settings),
            *id,
            name.as_deref(),
            *born,
            *died,
            *living,
        ),
        Some(Commands::Reset) => cmd_reset(&ServiceContainer::new(settings)),
        Some(Commands::Interactive) | None => cmd_interactive(&ServiceContainer::new(settings)),
        Some(Commands::Config { command }) => cmd_config(&settings, &cwd, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

/// Open the session tree for reading and tell the user when the saved file was unusable.
fn open_session(container: &ServiceContainer) -> FamilyService {
    let (service, outcome) = container.family_service();
    if let InitOutcome::Seeded { reason } = &outcome {
        if service.store().exists() {
            output::warning(&fallback_warning(reason));
        } else {
            debug!("no data file yet, using default data");
        }
    }
    service
}

/// Open the session tree for a command that saves. Never falls back over an existing file.
fn open_for_update(container: &ServiceContainer) -> CliResult<FamilyService> {
    Ok(FamilyService::open_for_update(container.tree_store())?)
}

/// Warning shown when an existing data file could not be loaded.
pub fn fallback_warning(reason: &str) -> String {
    format!("{}; using default data", reason)
}

#[instrument(skip(container))]
pub fn cmd_show(container: &ServiceContainer, root: PersonId, style: RenderStyle) -> CliResult<()> {
    let service = open_session(container);
    let tree = service.tree();
    match style {
        RenderStyle::Ascii => output::info(tree.render_family_tree(root)?.trim_end()),
        RenderStyle::Unicode => output::info(tree.to_termtree(root)?.to_string().trim_end()),
    }
    Ok(())
}

#[instrument(skip(container))]
pub fn cmd_generations(container: &ServiceContainer, root: PersonId) -> CliResult<()> {
    let service = open_session(container);
    let tree = service.tree();
    let generations = tree.generations(root);
    if generations.is_empty() {
        return Err(CliError::InvalidArgs(format!("invalid root id: {}", root)));
    }
    for (g, members) in generations.iter().enumerate() {
        output::header(&format!("Generation #{} ({} person(s))", g + 1, members.len()));
        for &id in members {
            output::detail(&format!("[{}] {}", id, tree.get_person(id)?));
        }
    }
    Ok(())
}

#[instrument(skip(container))]
pub fn cmd_get(container: &ServiceContainer, id: PersonId) -> CliResult<()> {
    let service = open_session(container);
    let tree = service.tree();
    let person = tree.get_person(id)?;
    output::header(&format!("[{}] {}", id, person));
    for &child in person.children() {
        output::detail(&format!("[{}] {}", child, tree.get_person(child)?));
    }
    Ok(())
}

#[instrument(skip(container))]
pub fn cmd_roots(container: &ServiceContainer) -> CliResult<()> {
    let service = open_session(container);
    let tree = service.tree();
    for id in tree.roots() {
        output::info(&format!("[{}] {}", id, tree.get_person(id)?));
    }
    Ok(())
}

#[instrument(skip(container))]
pub fn cmd_add(
    container: &ServiceContainer,
    name: &str,
    born: i32,
    died: Option<i32>,
    parents: &[PersonId],
) -> CliResult<()> {
    let mut service = open_for_update(container)?;
    let id = service.add_person(name, born, died, parents)?;
    service.save()?;
    output::success(&format!("added [{}] {}", id, service.tree().get_person(id)?));
    Ok(())
}

#[instrument(skip(container))]
pub fn cmd_link(container: &ServiceContainer, parent: PersonId, child: PersonId) -> CliResult<()> {
    let mut service = open_for_update(container)?;
    service.link(parent, child)?;
    service.save()?;
    output::success(&format!("linked {} -> {}", parent, child));
    Ok(())
}

#[instrument(skip(container))]
pub fn cmd_edit(
    container: &ServiceContainer,
    id: PersonId,
    name: Option<&str>,
    born: Option<i32>,
    died: Option<i32>,
    living: bool,
) -> CliResult<()> {
    if name.is_none() && born.is_none() && died.is_none() && !living {
        return Err(CliError::Usage(
            "nothing to change: pass --name, --born, --died or --living".to_string(),
        ));
    }
    let mut service = open_for_update(container)?;
    let person = service.tree_mut().get_person_mut(id)?;
    if let Some(name) = name {
        person.set_name(name);
    }
    if let Some(born) = born {
        person.set_birth_year(born);
    }
    if let Some(died) = died {
        person.set_death_year(Some(died));
    }
    if living {
        person.set_death_year(None);
    }
    service.save()?;
    output::success(&format!("updated [{}] {}", id, service.tree().get_person(id)?));
    Ok(())
}

#[instrument(skip(container))]
pub fn cmd_reset(container: &ServiceContainer) -> CliResult<()> {
    let service = FamilyService::with_tree(FamilyTree::with_default_seed(), container.tree_store());
    service.save()?;
    output::success(&format!(
        "restored default data to {}",
        service.store().path().display()
    ));
    Ok(())
}

#[instrument(skip(container))]
pub fn cmd_interactive(container: &ServiceContainer) -> CliResult<()> {
    output::header("British Royal Family Tree Creator");
    let (mut service, outcome) = container.family_service();
    let path = service.store().path().display().to_string();
    match outcome {
        InitOutcome::Loaded => output::info(&format!("[Data loaded from '{}' successfully.]\n", path)),
        InitOutcome::Seeded { reason } => output::warning(&format!(
            "Could not load file: {}\n[Initializing default British Royal data...]\n",
            reason
        )),
    }

    let root = container.settings.root;
    let stdin = io::stdin();
    let end = MenuSession::new(&mut service, root, stdin.lock(), io::stdout())
        .run()
        .map_err(|e| InfraError::io("interactive session", e))?;
    if end == SessionEnd::Exit {
        debug!("session ended by exit, unsaved changes discarded");
    }
    Ok(())
}

pub fn cmd_config(settings: &Settings, cwd: &Path, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&settings.to_toml()?);
            Ok(())
        }
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::action("global", &"<unavailable>"),
            }
            output::action("local", &local_config_path(cwd).display());
            output::action("data", &settings.data_file.display());
            Ok(())
        }
        ConfigCommands::Init { global, force } => {
            let path: PathBuf = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".to_string())
                })?
            } else {
                local_config_path(cwd)
            };
            if path.exists() && !force {
                return Err(CliError::Usage(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| InfraError::io(format!("create {}", parent.display()), e))?;
            }
            std::fs::write(&path, Settings::template())
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("created {}", path.display()));
            Ok(())
        }
    }
}
