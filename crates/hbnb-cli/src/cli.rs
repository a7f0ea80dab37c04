use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "hbnb",
    about = "HBnB object store console",
    version,
)]
pub struct Cli {
    /// Runs the interactive console when omitted
    #[command(subcommand)]
    pub command: Option<Command>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Storage file, overriding the configured path
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// TOML storage configuration
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Fail instead of warning when the storage file cannot be reloaded
    #[arg(long, global = true)]
    pub strict: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create an entity, save it, and print its id
    Create(CreateArgs),
    /// Show one entity
    Show(ShowArgs),
    /// Show every entity, optionally of one kind
    All(AllArgs),
    /// Start the interactive console
    Console,
}

#[derive(Args)]
pub struct CreateArgs {
    pub kind: String,
    /// Field assignments as key=value; values are parsed as JSON when possible
    pub fields: Vec<String>,
}

#[derive(Args)]
pub struct ShowArgs {
    pub kind: Option<String>,
    pub id: Option<String>,
}

#[derive(Args)]
pub struct AllArgs {
    pub kind: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_no_command_means_console() {
        let cli = Cli::try_parse_from(["hbnb"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn parse_create_with_fields() {
        let cli = Cli::try_parse_from(["hbnb", "create", "Place", "name=\"Loft\"", "max_guest=4"]).unwrap();
        if let Some(Command::Create(args)) = cli.command {
            assert_eq!(args.kind, "Place");
            assert_eq!(args.fields, vec!["name=\"Loft\"", "max_guest=4"]);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_show() {
        let cli = Cli::try_parse_from(["hbnb", "show", "User", "1234"]).unwrap();
        if let Some(Command::Show(args)) = cli.command {
            assert_eq!(args.kind, Some("User".into()));
            assert_eq!(args.id, Some("1234".into()));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_show_without_id() {
        let cli = Cli::try_parse_from(["hbnb", "show", "User"]).unwrap();
        if let Some(Command::Show(args)) = cli.command {
            assert!(args.id.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_all_with_kind() {
        let cli = Cli::try_parse_from(["hbnb", "all", "City"]).unwrap();
        if let Some(Command::All(args)) = cli.command {
            assert_eq!(args.kind, Some("City".into()));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::try_parse_from([
            "hbnb", "--file", "/tmp/objects.json", "--strict", "-v", "--format", "json", "all",
        ])
        .unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("/tmp/objects.json")));
        assert!(cli.strict);
        assert!(cli.verbose);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn parse_config_after_subcommand() {
        let cli = Cli::try_parse_from(["hbnb", "console", "--config", "hbnb.toml"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Console)));
        assert_eq!(cli.config, Some(PathBuf::from("hbnb.toml")));
    }

    #[test]
    fn create_requires_kind() {
        assert!(Cli::try_parse_from(["hbnb", "create"]).is_err());
    }
}
