use clap::Parser;
use sourcescrub::{exit_codes, logging, report, run, validate_root, CleanConfig};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Collapse blank lines and strip console.log calls from .js, .ts, .html and .css files in place",
    long_about = None
)]
struct Args {
    /// Root directory to process
    // Optional so a missing path exits with status 1 rather than clap's usage status
    directory: Option<PathBuf>,

    /// Show diagnostic logging
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    let root = match validate_root(args.directory.as_deref()) {
        Ok(root) => root,
        Err(err) => {
            report::fatal(&err);
            return ExitCode::from(exit_codes::USAGE);
        }
    };

    let config = match CleanConfig::builtin() {
        Ok(config) => config,
        Err(err) => {
            report::fatal(format!("{:#}", err));
            return ExitCode::from(exit_codes::USAGE);
        }
    };

    match run(&root, &config) {
        Ok(summary) => {
            summary.log();
            ExitCode::from(exit_codes::OK)
        }
        Err(err) => {
            report::fatal(format!("Error: {:#}", err));
            ExitCode::from(exit_codes::FAILURE)
        }
    }
}
