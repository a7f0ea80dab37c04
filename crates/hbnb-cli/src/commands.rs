use std::io::{self, IsTerminal};

use anyhow::Context;
use hbnb_storage::{FileStorage, ObjectStore, ReloadPolicy, ReloadReport, StorageConfig};
use tracing::info;

use crate::cli::{Cli, Command};
use crate::console::Console;
use crate::session::Session;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let store = open_store(&cli)?;
    let mut session = Session::new(&store, io::stdout().lock(), cli.format);

    match cli.command.unwrap_or(Command::Console) {
        Command::Create(args) => session.create(Some(args.kind.as_str()), &args.fields),
        Command::Show(args) => session.show(args.kind.as_deref(), args.id.as_deref()),
        Command::All(args) => session.all(args.kind.as_deref()),
        Command::Console => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            Console::new(session, stdin.lock(), interactive).run()
        }
    }
}

/// Resolve the storage configuration from flags and reload the registry.
fn open_store(cli: &Cli) -> anyhow::Result<FileStorage> {
    let config = resolve_config(cli)?;
    let store = FileStorage::new(config);
    let report = store
        .reload()
        .with_context(|| format!("failed to reload {}", store.path().display()))?;
    if let ReloadReport::Loaded { count } = report {
        info!(count, "registry restored");
    }
    Ok(store)
}

fn resolve_config(cli: &Cli) -> anyhow::Result<StorageConfig> {
    let mut config = match &cli.config {
        Some(path) => StorageConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => StorageConfig::default(),
    };
    if let Some(file) = &cli.file {
        config.path = file.clone();
    }
    if cli.strict {
        config.reload_policy = ReloadPolicy::Strict;
    }
    Ok(config)
}
