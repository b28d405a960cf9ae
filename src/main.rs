use anyhow::Result;
use modmap::cli::{Cli, Commands};
use modmap::commands::{self, AnalyzeConfig};
use modmap::observability::init_logging;

fn main() -> Result<()> {
    let cli = modmap::cli::parse_args();
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    init_logging(cli.command.verbosity());

    match cli.command {
        Commands::Analyze {
            tree,
            diagram,
            config,
            resolution,
            no_parallel,
            require_layout,
            format,
            output,
            verbosity: _,
        } => commands::handle_analyze(AnalyzeConfig {
            tree,
            diagram,
            config,
            resolution,
            no_parallel,
            require_layout,
            format,
            output,
        }),
        Commands::Init { force } => commands::init_config(force),
    }
}
