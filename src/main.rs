use std::process::ExitCode;

use clap::Parser;
use proptable::cli::{Arguments, ExitStatus};

fn main() -> ExitCode {
    let args = Arguments::parse();
    proptable::logging::init(args.verbose());

    match proptable::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
