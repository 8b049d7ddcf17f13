use clap::Parser;
use multipick::cli::commands::Cli;
use multipick::cli::handlers;
use multipick::logging;

fn main() {
    let cli = Cli::parse();

    if let Some(path) = logging::log_path(cli.log_file.as_deref())
        && let Err(e) = logging::init(&path)
    {
        eprintln!("warning: {}", e);
    }

    if let Err(e) = handlers::dispatch(cli) {
        tracing::error!(error = %e, "exiting");
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
