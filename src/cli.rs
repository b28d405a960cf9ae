use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "modmap")]
#[command(about = "Module dependency graph and modularity analyzer", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze a module dependency listing
    Analyze {
        /// JSON document mapping each module to the modules it imports
        tree: PathBuf,

        /// Graphviz SVG rendering of the dependency graph (node coordinates)
        #[arg(long)]
        diagram: Option<PathBuf>,

        /// Configuration file (defaults to the nearest .modmap.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Community resolution; higher values produce larger communities
        #[arg(long)]
        resolution: Option<f64>,

        /// Compute metrics sequentially
        #[arg(long = "no-parallel")]
        no_parallel: bool,

        /// Produce an empty report when the diagram is missing or unreadable
        #[arg(long = "require-layout")]
        require_layout: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Initialize a modmap configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Commands {
    pub fn verbosity(&self) -> u8 {
        match self {
            Commands::Analyze { verbosity, .. } => *verbosity,
            Commands::Init { .. } => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_analyze_flags() {
        let cli = Cli::try_parse_from([
            "modmap",
            "analyze",
            "deps.json",
            "--diagram",
            "graph.svg",
            "--resolution",
            "1.5",
            "--no-parallel",
            "--format",
            "json",
            "-vv",
        ])
        .unwrap();

        match cli.command {
            Commands::Analyze {
                tree,
                diagram,
                resolution,
                no_parallel,
                require_layout,
                format,
                verbosity,
                ..
            } => {
                assert_eq!(tree, PathBuf::from("deps.json"));
                assert_eq!(diagram, Some(PathBuf::from("graph.svg")));
                assert_eq!(resolution, Some(1.5));
                assert!(no_parallel);
                assert!(!require_layout);
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(verbosity, 2);
            }
            Commands::Init { .. } => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_init_force() {
        let cli = Cli::try_parse_from(["modmap", "init", "--force"]).unwrap();
        assert!(matches!(cli.command, Commands::Init { force: true }));
        assert_eq!(cli.command.verbosity(), 0);
    }
}
