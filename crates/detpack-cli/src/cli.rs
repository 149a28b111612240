//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use detpack_core::PackRequest;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "detpack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output and debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pack a directory into a reproducible archive
    Pack(PackArgs),
    /// Show the entries an archive would contain, in order
    Plan(PlanArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

#[derive(clap::Args)]
pub struct PackArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Deflate level for zip output (1-9)
    #[arg(short = 'l', long, value_parser = clap::value_parser!(u8).range(1..=9))]
    pub compression_level: Option<u8>,

    /// Overwrite output file if it exists
    #[arg(short = 'f', long)]
    pub force: bool,
}

#[derive(clap::Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Input, output and discovery filters shared by `pack` and `plan`.
#[derive(clap::Args)]
pub struct SourceArgs {
    /// Directory to pack
    #[arg(value_name = "INPUT_DIR")]
    pub input_dir: PathBuf,

    /// Output archive path (.zip or .tar)
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Extra file stored under its base name (can be repeated)
    #[arg(long = "include", short = 'i', value_name = "FILE")]
    pub include: Vec<PathBuf>,

    /// Exclude pattern (glob, can be repeated)
    #[arg(long = "exclude", short = 'x', value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Path prepended to every discovered entry
    #[arg(long, value_name = "PREFIX")]
    pub prefix: Option<PathBuf>,

    /// Include hidden files and directories
    #[arg(long)]
    pub include_hidden: bool,

    /// Skip symbolic links instead of following them
    #[arg(long)]
    pub no_follow_symlinks: bool,
}

impl SourceArgs {
    /// Builds the library request these arguments describe.
    pub fn to_request(&self) -> PackRequest {
        PackRequest::new(&self.input_dir, &self.output)
            .with_include(self.include.clone())
            .with_exclude(self.exclude.clone())
            .with_prefix(self.prefix.clone())
            .with_include_hidden(self.include_hidden)
            .with_follow_symlinks(!self.no_follow_symlinks)
    }
}

impl PackArgs {
    pub fn to_request(&self) -> PackRequest {
        let request = self.source.to_request();
        match self.compression_level {
            Some(level) => request.with_compression_level(level),
            None => request,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use detpack_core::request::MAX_COMPRESSION_LEVEL;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_pack_args_to_request() {
        let cli = Cli::try_parse_from([
            "detpack", "pack", "build", "out.zip", "-x", "*.log", "-i", "README.md", "--prefix",
            "pkg", "-l", "3", "--no-follow-symlinks",
        ])
        .unwrap();

        let Commands::Pack(args) = cli.command else {
            panic!("expected pack command");
        };
        let request = args.to_request();
        assert_eq!(request.input_dir, PathBuf::from("build"));
        assert_eq!(request.exclude, vec!["*.log".to_string()]);
        assert_eq!(request.include, vec![PathBuf::from("README.md")]);
        assert_eq!(request.prefix, Some(PathBuf::from("pkg")));
        assert_eq!(request.compression_level, 3);
        assert!(!request.follow_symlinks);
        assert!(!request.include_hidden);
    }

    #[test]
    fn test_pack_default_compression_level() {
        let cli = Cli::try_parse_from(["detpack", "pack", "build", "out.zip"]).unwrap();
        let Commands::Pack(args) = cli.command else {
            panic!("expected pack command");
        };
        assert_eq!(args.to_request().compression_level, MAX_COMPRESSION_LEVEL);
    }

    #[test]
    fn test_compression_level_out_of_range() {
        assert!(Cli::try_parse_from(["detpack", "pack", "build", "out.zip", "-l", "0"]).is_err());
        assert!(Cli::try_parse_from(["detpack", "pack", "build", "out.zip", "-l", "10"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["detpack", "-v", "-q", "plan", "build", "out.tar"]).is_err());
    }
}
