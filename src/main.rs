use anyhow::Result;
use dirmap::cli::{self, Commands};
use dirmap::commands::{self, AnalyzeConfig};

fn main() -> Result<()> {
    let cli = cli::parse_args();
    cli::init_logging(cli.command.verbosity());

    match cli.command {
        Commands::Analyze {
            input,
            config,
            preset,
            include_tests,
            format,
            output,
            jobs,
            no_parallel,
            verbosity: _,
        } => commands::handle_analyze(AnalyzeConfig {
            input,
            config,
            preset,
            include_tests,
            format,
            output,
            jobs,
            no_parallel,
        }),
        Commands::Presets => commands::list_presets(&mut std::io::stdout().lock()),
        Commands::Init { force } => commands::init_config(force),
    }
}
