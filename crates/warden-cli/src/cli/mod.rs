use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

pub mod global;

pub use global::{GlobalFlags, OutputFormat};

/// Top-level CLI parser for the `wdn` binary.
#[derive(Debug, Parser)]
#[command(name = "wdn", version, about = "Warden - declarative Vault AppRole roles")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// State file path (defaults to general.state_path)
    #[arg(short, long, global = true)]
    pub state: Option<PathBuf>,

    /// Config file used in place of .warden/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            state: self.state.clone(),
            config: self.config.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create or update every role declared in a roles file
    Apply(FileArgs),

    /// Show what apply would send, without writing
    Plan(FileArgs),

    /// Read a role from the server
    Read(ReadArgs),

    /// Delete a role and drop it from state
    Delete(PathArgs),
}

#[derive(Debug, Args)]
pub struct FileArgs {
    /// TOML file with `[[role]]` tables
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct ReadArgs {
    /// Role path (`auth/<mount>/role/<name>`) or a bare role name
    pub path: String,

    /// Store the role in the state file
    #[arg(long)]
    pub save: bool,
}

#[derive(Debug, Args)]
pub struct PathArgs {
    /// Role path (`auth/<mount>/role/<name>`) or a bare role name
    pub path: String,
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "wdn",
            "--format",
            "raw",
            "--verbose",
            "apply",
            "roles.toml",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Apply(ref args) if args.file.ends_with("roles.toml")));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["wdn", "plan", "roles.toml", "--quiet", "--format", "json"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Plan(_)));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["wdn", "--format", "table", "plan", "roles.toml"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn read_accepts_save_flag() {
        let cli = Cli::try_parse_from(["wdn", "read", "auth/approle/role/web", "--save"])
            .expect("cli should parse");
        match cli.command {
            Commands::Read(args) => {
                assert_eq!(args.path, "auth/approle/role/web");
                assert!(args.save);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn delete_requires_path() {
        assert!(Cli::try_parse_from(["wdn", "delete"]).is_err());
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["wdn", "--state", "/tmp/state.json", "delete", "web"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(
            flags.state.as_deref(),
            Some(std::path::Path::new("/tmp/state.json"))
        );
    }
}
