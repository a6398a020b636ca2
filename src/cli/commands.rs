//! Command dispatch: one handler per subcommand

use std::io;
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::{DemoService, IterationService, TreeService};
use crate::application::ApplicationResult;
use crate::cli::args::{Cli, Commands, ConfigCommands, TreeCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::Tree;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Ok(());
    };
    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let config_dir = cli
        .config_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    let settings = Settings::load(Some(&config_dir))?;
    debug!("settings: {:?}", settings);

    match command {
        Commands::Demo => _demo(settings),
        Commands::Tree { command } => _tree(command, &settings),
        Commands::Iter { items, reverse } => _iter(items, *reverse, &settings),
        Commands::Config { command } => _config(command, &settings, &config_dir),
        Commands::Completion { .. } => Ok(()),
    }
}

#[instrument(level = "debug", skip_all)]
fn _demo(settings: Settings) -> CliResult<()> {
    let sections = DemoService::new(settings).run()?;
    for (idx, section) in sections.iter().enumerate() {
        if idx > 0 {
            output::info(&"");
        }
        output::header(&format!("== {} ==", section.title));
        for line in &section.lines {
            output::info(line);
        }
    }
    Ok(())
}

fn parse_or_sample(
    service: &TreeService,
    expr: Option<&str>,
    settings: &Settings,
) -> ApplicationResult<Tree> {
    service.parse(expr.unwrap_or(&settings.tree.sample))
}

#[instrument(level = "debug", skip(settings))]
fn _tree(command: &TreeCommands, settings: &Settings) -> CliResult<()> {
    let service = TreeService::new();
    match command {
        TreeCommands::Op { expr } => {
            let tree = parse_or_sample(&service, expr.as_deref(), settings)?;
            output::info(&tree.operation());
        }
        TreeCommands::Show { expr } => {
            let tree = parse_or_sample(&service, expr.as_deref(), settings)?;
            print!("{}", tree.render());
        }
        TreeCommands::Stats { expr } => {
            let tree = parse_or_sample(&service, expr.as_deref(), settings)?;
            let stats = service.stats(&tree)?;
            output::action("depth", &stats.depth);
            output::action("nodes", &stats.nodes);
            output::action("leaves", &stats.leaves);
            output::action("branches", &stats.branches);
        }
        TreeCommands::Visit { expr, label } => {
            let tree = parse_or_sample(&service, expr.as_deref(), settings)?;
            let reports = service.visit(&tree, std::slice::from_ref(label))?;
            for line in reports.iter().flatten() {
                output::info(line);
            }
        }
        TreeCommands::Leaves { expr } => {
            let tree = parse_or_sample(&service, expr.as_deref(), settings)?;
            for name in service.collect_leaves(&tree)? {
                output::info(&name);
            }
        }
    }
    Ok(())
}

#[instrument(level = "debug", skip(settings))]
fn _iter(items: &[String], reverse: bool, settings: &Settings) -> CliResult<()> {
    let items: &[String] = if items.is_empty() {
        &settings.iterator.items
    } else {
        items
    };
    if items.is_empty() {
        return Err(CliError::Usage("no items given and none configured".to_string()));
    }
    let service = IterationService::new();
    let collection = service.collection(items, reverse || settings.iterator.reverse);
    output::header(&format!("{} traversal:", collection.direction()));
    let mut cursor = collection.cursor();
    while cursor.move_next(&collection) {
        output::detail(&format!("[{}] {}", cursor.key(), cursor.current(&collection)?));
    }
    Ok(())
}

fn _config(command: &ConfigCommands, settings: &Settings, config_dir: &Path) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&settings.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => {
            match global_config_path() {
                Some(path) => output::action("global", &path.display()),
                None => output::action("global", &"<no home directory>"),
            }
            output::action("local", &local_config_path(config_dir).display());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn given_tree_op_args_when_parsed_then_expression_captured() {
        let cli = Cli::parse_from(["treekit", "tree", "op", "Branch(Leaf)"]);
        match cli.command {
            Some(Commands::Tree {
                command: TreeCommands::Op { expr },
            }) => assert_eq!(expr.as_deref(), Some("Branch(Leaf)")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn given_iter_args_when_parsed_then_items_and_flag_captured() {
        let cli = Cli::parse_from(["treekit", "-dd", "iter", "--reverse", "a", "b"]);
        assert_eq!(cli.debug, 2);
        match cli.command {
            Some(Commands::Iter { items, reverse }) => {
                assert_eq!(items, vec!["a", "b"]);
                assert!(reverse);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn given_no_items_anywhere_when_iter_then_usage_error() {
        let mut settings = Settings::default();
        settings.iterator.items.clear();

        let err = _iter(&[], false, &settings).unwrap_err();

        assert!(matches!(err, CliError::Usage(_)));
        assert_eq!(err.exit_code(), crate::exitcode::USAGE);
    }

    #[test]
    fn given_no_command_when_execute_then_ok() {
        let cli = Cli::parse_from(["treekit"]);
        assert!(execute_command(&cli).is_ok());
    }
}
