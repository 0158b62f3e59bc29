use anyhow::Result;
use clap::Parser;
use sched_report::cli::{Cli, OutputFormat};
use sched_report::json_output::JsonReport;
use sched_report::report;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber on stderr
///
/// `RUST_LOG` selects the filter, defaulting to warnings (skipped files);
/// `--debug` enables everything on top of it.
fn init_tracing(debug: bool) {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if debug {
        filter = filter.add_directive(tracing::Level::TRACE.into());
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let config = args.resolve_config()?;

    match args.format {
        OutputFormat::Text => {
            report::generate_report(&config, &mut std::io::stdout().lock())?;
        }
        OutputFormat::Json => {
            let report = report::generate_report(&config, &mut std::io::sink())?;
            println!(
                "{}",
                JsonReport::new(&report, &config.results_file).to_json()?
            );
        }
    }

    Ok(())
}
