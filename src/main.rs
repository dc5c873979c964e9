//! modup - update versioned module imports in place
//!
//! Walks the import graph of a root module and bumps every
//! deno.land/std, deno.land/x and npm: import to its latest release.

use clap::Parser;
use modup::cli::CliArgs;
use modup::config::RunOptions;
use modup::orchestrator::Orchestrator;
use modup::output::{create_formatter, OutputConfig};
use modup::progress::Progress;
use std::io::{self, Write};
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = CliArgs::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .init();

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let options = RunOptions::resolve(&args)?;
    log::debug!(
        "modup v{}: root {}, load_remote {}, dry_run {}",
        env!("CARGO_PKG_VERSION"),
        options.root.display(),
        options.load_remote,
        options.dry_run
    );

    let orchestrator = Orchestrator::new(options)?;
    let mut progress = Progress::new(args.show_progress());
    let result = orchestrator.run(&mut progress).await?;

    let output_config =
        OutputConfig::from_cli(args.json, args.diff, args.verbose, args.quiet, args.dry_run);
    let formatter = create_formatter(output_config);

    let mut stdout = io::stdout().lock();
    formatter.format(&result, &mut stdout)?;
    stdout.flush()?;

    if result.has_errors() {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
